//! Handlers for the project readiness gate.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

use dubline_core::error::CoreError;
use dubline_core::types::DbId;
use dubline_db::repositories::ProjectRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::Actor;
use crate::middleware::rbac::RequireLeader;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /projects/{id}/readiness
///
/// The classification backlog over the project's audio assets plus the
/// readiness flag.
pub async fn readiness_status(
    _actor: Actor,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let status = ProjectRepo::readiness_status(&state.pool, project_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }))?;

    Ok(Json(DataResponse { data: status }))
}

/// POST /projects/{id}/mark-ready
///
/// One-way flip of the readiness flag, unlocking the translation workflow
/// for the project. Advisory: a nonzero unclassified backlog does not
/// block the flip, and nothing un-flips it.
pub async fn mark_ready(
    RequireLeader(actor): RequireLeader,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let project = ProjectRepo::mark_ready(&state.pool, project_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }))?;

    tracing::info!(
        project_id = project_id,
        actor_id = actor.user_id,
        "Project marked ready for translation"
    );

    Ok(Json(DataResponse { data: project }))
}
