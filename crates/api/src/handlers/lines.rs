//! Handlers for translation line creation, update, and listing.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use dubline_core::error::CoreError;
use dubline_core::types::DbId;
use dubline_db::models::translation_line::{
    CreateTranslationLine, LinePage, LineView, UpdateTranslationLine,
};
use dubline_db::repositories::{ProjectRepo, TranslationLineRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::Actor;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /lines
///
/// Create a single translation line by hand. Parser-seeded lines use the
/// bulk ingestion path instead.
pub async fn create_line(
    actor: Actor,
    State(state): State<AppState>,
    Json(input): Json<CreateTranslationLine>,
) -> AppResult<impl IntoResponse> {
    if input.key.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Line key must not be empty".into(),
        )));
    }

    ProjectRepo::find_by_id(&state.pool, input.project_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: input.project_id,
        }))?;

    let line = TranslationLineRepo::create(&state.pool, input).await?;

    tracing::info!(line_id = line.id, actor_id = actor.user_id, "Line created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: line })))
}

/// GET /lines/{id}
pub async fn get_line(
    _actor: Actor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let line = TranslationLineRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "TranslationLine",
            id,
        }))?;

    Ok(Json(DataResponse { data: line }))
}

/// PATCH /lines/{id}
///
/// Update translated text, status, or character assignment. No transition
/// guard beyond authorization: approval is a *precondition* consumed by
/// the recording pipeline, not a gate enforced here.
pub async fn update_line(
    _actor: Actor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTranslationLine>,
) -> AppResult<impl IntoResponse> {
    let line = TranslationLineRepo::update(&state.pool, id, input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "TranslationLine",
            id,
        }))?;

    Ok(Json(DataResponse { data: line }))
}

/// Query parameters for the partitioned line listing.
#[derive(Debug, Deserialize)]
pub struct ListLinesParams {
    pub view: LineView,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// GET /projects/{id}/lines?view=dialogue|ui
///
/// List one partition of a project's lines, ordered by key. Unavailable
/// (409) until the project has been marked ready for translation.
pub async fn list_lines(
    _actor: Actor,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Query(params): Query<ListLinesParams>,
) -> AppResult<impl IntoResponse> {
    let project = ProjectRepo::find_by_id(&state.pool, project_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }))?;

    if !project.is_ready_for_translation {
        return Err(AppError::Core(CoreError::Conflict(
            "Project has not been marked ready for translation".into(),
        )));
    }

    let lines = TranslationLineRepo::list(
        &state.pool,
        project_id,
        params.view,
        LinePage {
            limit: params.limit,
            offset: params.offset,
        },
    )
    .await?;

    Ok(Json(DataResponse { data: lines }))
}
