//! Handlers for contents and localization projects.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use dubline_core::error::CoreError;
use dubline_core::types::DbId;
use dubline_db::models::project::{CreateContent, CreateProject};
use dubline_db::repositories::ProjectRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::Actor;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /contents
///
/// Register a source content (admin only).
pub async fn create_content(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateContent>,
) -> AppResult<impl IntoResponse> {
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Content name must not be empty".into(),
        )));
    }

    let content = ProjectRepo::create_content(&state.pool, &input).await?;

    tracing::info!(
        content_id = content.id,
        admin_id = admin.user_id,
        "Content created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: content })))
}

/// POST /projects
///
/// Create a localization project for a content (admin only).
pub async fn create_project(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateProject>,
) -> AppResult<impl IntoResponse> {
    if input.name.trim().is_empty() || input.target_language.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Project name and target language must not be empty".into(),
        )));
    }

    ProjectRepo::find_content_by_id(&state.pool, input.content_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Content",
            id: input.content_id,
        }))?;

    let project = ProjectRepo::create_project(&state.pool, &input).await?;

    tracing::info!(
        project_id = project.id,
        content_id = project.content_id,
        admin_id = admin.user_id,
        "Project created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: project })))
}

/// GET /projects/{id}
pub async fn get_project(
    _actor: Actor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let project = ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;

    Ok(Json(DataResponse { data: project }))
}
