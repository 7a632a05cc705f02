//! Route definitions for contents and asset upload.

use axum::routing::post;
use axum::Router;

use crate::handlers::{assets, projects};
use crate::state::AppState;

/// Content routes mounted at the API root.
///
/// ```text
/// POST /contents                      -> create_content (admin only)
/// POST /contents/{content_id}/assets  -> upload_asset (multipart)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/contents", post(projects::create_content))
        .route("/contents/{content_id}/assets", post(assets::upload_asset))
}
