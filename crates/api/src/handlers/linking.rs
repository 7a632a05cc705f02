//! Handlers for the audio-to-line linking and unlinking protocol.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use dubline_core::error::CoreError;
use dubline_core::types::DbId;
use dubline_db::models::translation_line::LinkAudio;
use dubline_db::repositories::{LinkingRepo, ProjectRepo, TranslationLineRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::Actor;
use crate::middleware::rbac::RequireLeader;
use crate::response::DataResponse;
use crate::state::AppState;

/// Body for the non-dialogue link shortcut.
#[derive(Debug, Deserialize)]
pub struct LinkNonDialogueBody {
    pub project_id: DbId,
    pub character_id: Option<DbId>,
}

/// POST /assets/{id}/link-non-dialogue
///
/// Classify the asset as non-dialogue vocal and create its synthetic
/// APPROVED line in one transaction. A second call for the same asset
/// collides on the deterministic synthetic key and returns 409.
pub async fn link_non_dialogue(
    actor: Actor,
    State(state): State<AppState>,
    Path(asset_id): Path<DbId>,
    Json(body): Json<LinkNonDialogueBody>,
) -> AppResult<impl IntoResponse> {
    ProjectRepo::find_by_id(&state.pool, body.project_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: body.project_id,
        }))?;

    let line = LinkingRepo::link_non_dialogue(
        &state.pool,
        body.project_id,
        asset_id,
        body.character_id,
    )
    .await?;

    tracing::info!(
        asset_id = asset_id,
        line_id = line.id,
        actor_id = actor.user_id,
        "Asset linked as non-dialogue"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: line })))
}

/// POST /assets/{id}/unlink
///
/// Detach the asset from every referencing line (null-out, not delete) and
/// reset its classification, atomically. Available to any contributor.
pub async fn unlink_asset(
    actor: Actor,
    State(state): State<AppState>,
    Path(asset_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let (asset, cleared) = LinkingRepo::unlink(&state.pool, asset_id).await?;

    tracing::info!(
        asset_id = asset_id,
        lines_cleared = cleared,
        actor_id = actor.user_id,
        "Asset unlinked"
    );

    Ok(Json(DataResponse { data: asset }))
}

/// POST /assets/{id}/undo
///
/// Same operation as unlink, restricted to leader/admin. Kept as a
/// separate route so the elevated "undo classification" action can be
/// audited apart from the routine unlink.
pub async fn undo_asset(
    RequireLeader(actor): RequireLeader,
    State(state): State<AppState>,
    Path(asset_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let (asset, cleared) = LinkingRepo::unlink(&state.pool, asset_id).await?;

    tracing::info!(
        asset_id = asset_id,
        lines_cleared = cleared,
        actor_id = actor.user_id,
        "Asset classification undone"
    );

    Ok(Json(DataResponse { data: asset }))
}

/// DELETE /assets/{id}/non-dialogue-lines
///
/// Remove only the synthetic non-dialogue lines bound to the asset,
/// leaving dialogue bindings untouched.
pub async fn delete_non_dialogue_lines(
    actor: Actor,
    State(state): State<AppState>,
    Path(asset_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = TranslationLineRepo::delete_non_dialogue_by_asset(&state.pool, asset_id).await?;

    tracing::info!(
        asset_id = asset_id,
        lines_deleted = deleted,
        actor_id = actor.user_id,
        "Non-dialogue lines deleted"
    );

    Ok(StatusCode::NO_CONTENT)
}

/// PUT /lines/{id}/audio
///
/// General-purpose binding of an audio asset to an existing line. Rejects
/// with 409 if the asset is already bound to a different line.
pub async fn link_audio(
    actor: Actor,
    State(state): State<AppState>,
    Path(line_id): Path<DbId>,
    Json(input): Json<LinkAudio>,
) -> AppResult<impl IntoResponse> {
    let line = LinkingRepo::link_audio(&state.pool, line_id, &input).await?;

    tracing::info!(
        line_id = line_id,
        asset_id = input.asset_id,
        is_non_dialogue = input.is_non_dialogue,
        actor_id = actor.user_id,
        "Audio linked to line"
    );

    Ok(Json(DataResponse { data: line }))
}
