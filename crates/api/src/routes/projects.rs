//! Route definitions for projects: readiness gate, classification queue,
//! per-project asset settings, line listing, and characters.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{assets, characters, lines, project_assets, projects, readiness};
use crate::state::AppState;

/// Project routes mounted at `/projects`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(projects::create_project))
        .route("/{id}", get(projects::get_project))
        .route("/{id}/readiness", get(readiness::readiness_status))
        .route("/{id}/mark-ready", post(readiness::mark_ready))
        .route(
            "/{id}/assets/next-unclassified",
            get(assets::next_unclassified),
        )
        .route("/{id}/assets/settings", get(project_assets::list_settings))
        .route(
            "/{id}/assets/sync-settings",
            post(project_assets::sync_settings),
        )
        .route(
            "/{id}/assets/{asset_id}/setting",
            put(project_assets::upsert_setting),
        )
        .route("/{id}/lines", get(lines::list_lines))
        .route(
            "/{id}/characters",
            get(characters::list_characters).post(characters::create_character),
        )
}
