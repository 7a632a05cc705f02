//! Route definitions for translation lines and the recording pipeline.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{lines, linking, recording};
use crate::state::AppState;

/// Line routes mounted at `/lines`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(lines::create_line))
        .route("/{id}", get(lines::get_line).patch(lines::update_line))
        .route("/{id}/audio", put(linking::link_audio))
        .route(
            "/{id}/recordings/raw",
            post(recording::submit_raw).delete(recording::undo_raw),
        )
        .route(
            "/{id}/recordings/mix",
            post(recording::submit_mix).delete(recording::undo_mix),
        )
}
