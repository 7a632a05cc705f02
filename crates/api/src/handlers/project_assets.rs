//! Handlers for per-project asset settings.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use dubline_core::error::CoreError;
use dubline_core::types::DbId;
use dubline_db::repositories::{ProjectAssetSettingRepo, ProjectRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::Actor;
use crate::response::DataResponse;
use crate::state::AppState;

async fn ensure_project_exists(pool: &sqlx::PgPool, id: DbId) -> AppResult<()> {
    ProjectRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    Ok(())
}

/// Body for the per-project setting upsert.
#[derive(Debug, Deserialize)]
pub struct UpsertSettingBody {
    pub is_non_dialogue: bool,
}

/// PUT /projects/{id}/assets/{asset_id}/setting
///
/// Upsert the project-local non-dialogue flag for one asset. Never touches
/// the asset's global classification: two projects sharing a content may
/// treat the same file differently.
pub async fn upsert_setting(
    actor: Actor,
    State(state): State<AppState>,
    Path((project_id, asset_id)): Path<(DbId, DbId)>,
    Json(body): Json<UpsertSettingBody>,
) -> AppResult<impl IntoResponse> {
    ensure_project_exists(&state.pool, project_id).await?;

    let result = ProjectAssetSettingRepo::upsert(
        &state.pool,
        project_id,
        asset_id,
        body.is_non_dialogue,
    )
    .await?;

    tracing::info!(
        project_id = project_id,
        asset_id = asset_id,
        is_non_dialogue = body.is_non_dialogue,
        actor_id = actor.user_id,
        "Project asset setting upserted"
    );

    Ok(Json(DataResponse { data: result }))
}

/// POST /projects/{id}/assets/sync-settings
///
/// Back-fill settings rows for every asset of the project's content not
/// yet covered, defaulting to dialogue treatment.
pub async fn sync_settings(
    actor: Actor,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_project_exists(&state.pool, project_id).await?;

    let created = ProjectAssetSettingRepo::sync(&state.pool, project_id).await?;

    tracing::info!(
        project_id = project_id,
        created = created,
        actor_id = actor.user_id,
        "Project asset settings synchronized"
    );

    Ok(Json(DataResponse {
        data: json!({ "created_count": created }),
    }))
}

/// GET /projects/{id}/assets/settings
pub async fn list_settings(
    _actor: Actor,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_project_exists(&state.pool, project_id).await?;

    let settings = ProjectAssetSettingRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(DataResponse { data: settings }))
}
