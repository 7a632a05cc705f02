pub mod assets;
pub mod characters;
pub mod contents;
pub mod health;
pub mod lines;
pub mod projects;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /contents                                 create content (admin only)
/// /contents/{content_id}/assets             multipart asset upload
///
/// /assets/{id}                              get asset
/// /assets/{id}/parse                        parse localization export (POST)
/// /assets/{id}/classification               classification override (PUT, leader/admin)
/// /assets/{id}/link-non-dialogue            non-dialogue shortcut (POST)
/// /assets/{id}/unlink                       detach + reset (POST)
/// /assets/{id}/undo                         detach + reset (POST, leader/admin)
/// /assets/{id}/non-dialogue-lines           delete synthetic lines (DELETE)
///
/// /projects                                 create project (admin only)
/// /projects/{id}                            get project
/// /projects/{id}/readiness                  backlog + readiness flag (GET)
/// /projects/{id}/mark-ready                 one-way readiness flip (POST, leader/admin)
/// /projects/{id}/assets/next-unclassified   classification queue head (GET)
/// /projects/{id}/assets/settings            list per-project settings (GET)
/// /projects/{id}/assets/sync-settings       back-fill settings (POST)
/// /projects/{id}/assets/{asset_id}/setting  upsert setting (PUT)
/// /projects/{id}/lines                      partitioned line listing (GET, gated)
/// /projects/{id}/characters                 list, create
///
/// /lines                                    create line (POST)
/// /lines/{id}                               get, update
/// /lines/{id}/audio                         bind audio asset (PUT)
/// /lines/{id}/recordings/raw                submit, undo raw take
/// /lines/{id}/recordings/mix                submit, undo final mix
///
/// /characters/{id}                          update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(contents::router())
        .nest("/assets", assets::router())
        .nest("/projects", projects::router())
        .nest("/lines", lines::router())
        .nest("/characters", characters::router())
}
