//! Integration tests for the two-phase recording pipeline.
//!
//! - Raw submit inserts the unique take row and advances the line
//! - Out-of-phase submits and undos are refused or no-op, never advance
//! - Raw undo deletes the take, resets the line, and is idempotent
//! - Mix submit/undo move between PENDING_MIX and COMPLETED

use sqlx::PgPool;

use dubline_core::error::CoreError;
use dubline_core::recording::RecordingStatus;
use dubline_db::models::project::{CreateContent, CreateProject};
use dubline_db::models::translation_line::CreateTranslationLine;
use dubline_db::repositories::{ProjectRepo, RecordingRepo, RepoError, TranslationLineRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_line(pool: &PgPool) -> i64 {
    let content = ProjectRepo::create_content(
        pool,
        &CreateContent {
            name: "Starfall".to_string(),
        },
    )
    .await
    .unwrap();
    let project = ProjectRepo::create_project(
        pool,
        &CreateProject {
            content_id: content.id,
            name: "Starfall ES".to_string(),
            target_language: "es".to_string(),
        },
    )
    .await
    .unwrap();
    TranslationLineRepo::create(
        pool,
        CreateTranslationLine {
            project_id: project.id,
            translatable_asset_id: None,
            key: "scene1.hello".to_string(),
            original_text: Some("Hello".to_string()),
            character_id: None,
        },
    )
    .await
    .unwrap()
    .id
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_submit_raw_advances_to_pending_mix(pool: PgPool) {
    let line_id = seed_line(&pool).await;

    let (line, recording) =
        RecordingRepo::submit_raw(&pool, line_id, "uploads/recordings/raw/1_line_1.wav")
            .await
            .unwrap();

    assert_eq!(line.recording_status, RecordingStatus::PendingMix);
    assert_eq!(recording.translation_line_id, line_id);
    assert_eq!(recording.file_url, "uploads/recordings/raw/1_line_1.wav");

    let stored = RecordingRepo::find_raw_by_line(&pool, line_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.id, recording.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_double_submit_raw_is_refused(pool: PgPool) {
    let line_id = seed_line(&pool).await;

    RecordingRepo::submit_raw(&pool, line_id, "uploads/recordings/raw/a.wav")
        .await
        .unwrap();
    let err = RecordingRepo::submit_raw(&pool, line_id, "uploads/recordings/raw/b.wav")
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Domain(CoreError::Conflict(_))));

    // The failed submit did not touch the first take or the line state.
    let stored = RecordingRepo::find_raw_by_line(&pool, line_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.file_url, "uploads/recordings/raw/a.wav");
    let line = TranslationLineRepo::find_by_id(&pool, line_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(line.recording_status, RecordingStatus::PendingMix);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_undo_raw_resets_and_is_idempotent(pool: PgPool) {
    let line_id = seed_line(&pool).await;

    RecordingRepo::submit_raw(&pool, line_id, "uploads/recordings/raw/take.wav")
        .await
        .unwrap();

    let line = RecordingRepo::undo_raw(&pool, line_id).await.unwrap();
    assert_eq!(line.recording_status, RecordingStatus::PendingRecording);
    assert!(RecordingRepo::find_raw_by_line(&pool, line_id)
        .await
        .unwrap()
        .is_none());

    // A second undo finds nothing to delete and succeeds unchanged.
    let line = RecordingRepo::undo_raw(&pool, line_id).await.unwrap();
    assert_eq!(line.recording_status, RecordingStatus::PendingRecording);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_undo_raw_missing_line(pool: PgPool) {
    let err = RecordingRepo::undo_raw(&pool, 424242).await.unwrap_err();
    assert!(matches!(
        err,
        RepoError::Domain(CoreError::NotFound {
            entity: "TranslationLine",
            ..
        })
    ));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_mix_submit_completes_and_undo_falls_back(pool: PgPool) {
    let line_id = seed_line(&pool).await;
    RecordingRepo::submit_raw(&pool, line_id, "uploads/recordings/raw/take.wav")
        .await
        .unwrap();

    let line = RecordingRepo::submit_mix(&pool, line_id, "uploads/recordings/mix/final.wav")
        .await
        .unwrap();
    assert_eq!(line.recording_status, RecordingStatus::Completed);
    assert_eq!(
        line.voice_recording_url.as_deref(),
        Some("uploads/recordings/mix/final.wav")
    );

    let line = RecordingRepo::undo_mix(&pool, line_id).await.unwrap();
    assert_eq!(line.recording_status, RecordingStatus::PendingMix);
    assert!(line.voice_recording_url.is_none());

    // The raw take survives a mix undo; only the mix phase rolls back.
    assert!(RecordingRepo::find_raw_by_line(&pool, line_id)
        .await
        .unwrap()
        .is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_undo_mix_on_fresh_line_does_not_advance(pool: PgPool) {
    let line_id = seed_line(&pool).await;

    // No raw take, no mix: the undo has nothing to roll back and must leave
    // the line exactly where it was.
    let line = RecordingRepo::undo_mix(&pool, line_id).await.unwrap();
    assert_eq!(line.recording_status, RecordingStatus::PendingRecording);
    assert!(line.voice_recording_url.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_undo_raw_under_delivered_mix_is_refused(pool: PgPool) {
    let line_id = seed_line(&pool).await;
    RecordingRepo::submit_raw(&pool, line_id, "uploads/recordings/raw/take.wav")
        .await
        .unwrap();
    RecordingRepo::submit_mix(&pool, line_id, "uploads/recordings/mix/final.wav")
        .await
        .unwrap();

    let err = RecordingRepo::undo_raw(&pool, line_id).await.unwrap_err();
    assert!(matches!(err, RepoError::Domain(CoreError::Conflict(_))));

    // The completed line and its mix URL are untouched.
    let line = TranslationLineRepo::find_by_id(&pool, line_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(line.recording_status, RecordingStatus::Completed);
    assert_eq!(
        line.voice_recording_url.as_deref(),
        Some("uploads/recordings/mix/final.wav")
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_submit_mix_without_raw_is_refused(pool: PgPool) {
    let line_id = seed_line(&pool).await;

    let err = RecordingRepo::submit_mix(&pool, line_id, "uploads/recordings/mix/final.wav")
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Domain(CoreError::Conflict(_))));

    let line = TranslationLineRepo::find_by_id(&pool, line_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(line.recording_status, RecordingStatus::PendingRecording);
    assert!(line.voice_recording_url.is_none());
}
