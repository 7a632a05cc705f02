//! Route definitions for characters addressed by id.
//!
//! Listing and creation are project-scoped and live under `/projects`.

use axum::routing::patch;
use axum::Router;

use crate::handlers::characters;
use crate::state::AppState;

/// Character routes mounted at `/characters`.
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/{id}",
        patch(characters::update_character).delete(characters::delete_character),
    )
}
