//! Handlers for the two-phase recording pipeline.
//!
//! Ordering rule for the file/database dual write: submit writes and
//! verifies the file *before* opening the row transaction; undo attempts
//! the file delete best-effort *before* the row transition commits, so the
//! state machine stays consistent even when storage cleanup fails.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use dubline_core::error::CoreError;
use dubline_core::naming;
use dubline_core::recording::RecordingStep;
use dubline_core::types::DbId;
use dubline_db::models::translation_line::TranslationLine;
use dubline_db::repositories::{RecordingRepo, TranslationLineRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::Actor;
use crate::response::DataResponse;
use crate::state::AppState;

async fn ensure_line_exists(pool: &sqlx::PgPool, id: DbId) -> AppResult<TranslationLine> {
    TranslationLineRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "TranslationLine",
            id,
        }))
}

/// POST /lines/{id}/recordings/raw
///
/// Capture the raw actor take: store the file, then insert the unique take
/// row and advance the line to PENDING_MIX in one transaction.
pub async fn submit_raw(
    actor: Actor,
    State(state): State<AppState>,
    Path(line_id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    // Reject an out-of-phase submit before the file lands in storage.
    let current = ensure_line_exists(&state.pool, line_id).await?;
    current.recording_status.apply(RecordingStep::SubmitRaw)?;

    let (filename, bytes) = super::read_file_field(multipart).await?;
    let path = naming::raw_recording_path(
        chrono::Utc::now(),
        line_id,
        &naming::audio_extension(&filename),
    );

    state.files.save(&path, &bytes).await?;

    let (line, recording) = RecordingRepo::submit_raw(&state.pool, line_id, &path).await?;

    tracing::info!(
        line_id = line_id,
        recording_id = recording.id,
        actor_id = actor.user_id,
        "Raw recording submitted"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: line })))
}

/// DELETE /lines/{id}/recordings/raw
///
/// Withdraw the raw take. Double-click safe: a repeat call finds no row
/// and succeeds without changing anything.
pub async fn undo_raw(
    actor: Actor,
    State(state): State<AppState>,
    Path(line_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    // File delete is attempted first and never blocks the row transition.
    if let Some(recording) = RecordingRepo::find_raw_by_line(&state.pool, line_id).await? {
        state.files.delete_best_effort(&recording.file_url).await;
    }

    let line = RecordingRepo::undo_raw(&state.pool, line_id).await?;

    tracing::info!(line_id = line_id, actor_id = actor.user_id, "Raw recording undone");

    Ok(Json(DataResponse { data: line }))
}

/// POST /lines/{id}/recordings/mix
///
/// Deliver the final mix: store the file, then set the mix URL and mark
/// the line COMPLETED.
pub async fn submit_mix(
    actor: Actor,
    State(state): State<AppState>,
    Path(line_id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let current = ensure_line_exists(&state.pool, line_id).await?;
    current.recording_status.apply(RecordingStep::SubmitMix)?;

    let (filename, bytes) = super::read_file_field(multipart).await?;
    let path = naming::mix_recording_path(
        chrono::Utc::now(),
        line_id,
        &naming::audio_extension(&filename),
    );

    state.files.save(&path, &bytes).await?;

    let line = RecordingRepo::submit_mix(&state.pool, line_id, &path).await?;

    tracing::info!(line_id = line_id, actor_id = actor.user_id, "Mix recording submitted");

    Ok(Json(DataResponse { data: line }))
}

/// DELETE /lines/{id}/recordings/mix
///
/// Withdraw the final mix and fall back to PENDING_MIX. Double-click safe.
pub async fn undo_mix(
    actor: Actor,
    State(state): State<AppState>,
    Path(line_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let current = ensure_line_exists(&state.pool, line_id).await?;

    if let Some(url) = &current.voice_recording_url {
        state.files.delete_best_effort(url).await;
    }

    let line = RecordingRepo::undo_mix(&state.pool, line_id).await?;

    tracing::info!(line_id = line_id, actor_id = actor.user_id, "Mix recording undone");

    Ok(Json(DataResponse { data: line }))
}
