//! Route definitions for assets: lookup, ingestion, classification, and
//! the linking/unlinking protocol.

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::{assets, ingestion, linking};
use crate::state::AppState;

/// Asset routes mounted at `/assets`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}", get(assets::get_asset))
        .route("/{id}/parse", post(ingestion::parse_asset))
        .route("/{id}/classification", put(assets::classify_asset))
        .route("/{id}/link-non-dialogue", post(linking::link_non_dialogue))
        .route("/{id}/unlink", post(linking::unlink_asset))
        .route("/{id}/undo", post(linking::undo_asset))
        .route(
            "/{id}/non-dialogue-lines",
            delete(linking::delete_non_dialogue_lines),
        )
}
