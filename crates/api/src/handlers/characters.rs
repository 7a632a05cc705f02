//! Handlers for project characters.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use dubline_core::error::CoreError;
use dubline_core::types::DbId;
use dubline_db::models::character::{CreateCharacter, UpdateCharacter};
use dubline_db::repositories::{CharacterRepo, ProjectRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::Actor;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /projects/{id}/characters
pub async fn list_characters(
    _actor: Actor,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let characters = CharacterRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(DataResponse { data: characters }))
}

/// POST /projects/{id}/characters
///
/// Names are unique per project; a duplicate collides on
/// `uq_characters_project_name` and returns 409.
pub async fn create_character(
    actor: Actor,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(input): Json<CreateCharacter>,
) -> AppResult<impl IntoResponse> {
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Character name must not be empty".into(),
        )));
    }

    ProjectRepo::find_by_id(&state.pool, project_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }))?;

    let character = CharacterRepo::create(&state.pool, project_id, &input).await?;

    tracing::info!(
        character_id = character.id,
        project_id = project_id,
        actor_id = actor.user_id,
        "Character created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: character })))
}

/// PATCH /characters/{id}
pub async fn update_character(
    _actor: Actor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCharacter>,
) -> AppResult<impl IntoResponse> {
    if let Some(name) = &input.name {
        if name.trim().is_empty() {
            return Err(AppError::Core(CoreError::Validation(
                "Character name must not be empty".into(),
            )));
        }
    }

    let character = CharacterRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Character",
            id,
        }))?;

    Ok(Json(DataResponse { data: character }))
}

/// DELETE /characters/{id}
///
/// Lines assigned to the character keep existing; their character
/// reference falls back to NULL via the foreign key.
pub async fn delete_character(
    actor: Actor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = CharacterRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Character",
            id,
        }));
    }

    tracing::info!(character_id = id, actor_id = actor.user_id, "Character deleted");

    Ok(StatusCode::NO_CONTENT)
}
