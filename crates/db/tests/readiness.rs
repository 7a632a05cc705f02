//! Integration tests for the classification queue, the readiness gate, and
//! per-project asset settings.

use sqlx::PgPool;

use dubline_core::classification::{AssetClassification, MediaKind};
use dubline_db::models::asset::CreateAsset;
use dubline_db::models::project::{Content, CreateContent, CreateProject, Project};
use dubline_db::repositories::{AssetRepo, ProjectAssetSettingRepo, ProjectRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_content(pool: &PgPool, name: &str) -> Content {
    ProjectRepo::create_content(
        pool,
        &CreateContent {
            name: name.to_string(),
        },
    )
    .await
    .unwrap()
}

async fn seed_project(pool: &PgPool, content_id: i64, name: &str) -> Project {
    ProjectRepo::create_project(
        pool,
        &CreateProject {
            content_id,
            name: name.to_string(),
            target_language: "ja".to_string(),
        },
    )
    .await
    .unwrap()
}

async fn seed_asset(pool: &PgPool, content_id: i64, kind: MediaKind, path: &str) -> i64 {
    AssetRepo::create(
        pool,
        &CreateAsset {
            content_id,
            media_kind: kind,
            file_path: path.to_string(),
            original_filename: path.rsplit('/').next().unwrap().to_string(),
        },
    )
    .await
    .unwrap()
    .id
}

// ---------------------------------------------------------------------------
// Test: Classification queue
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_next_unclassified_walks_audio_queue_in_id_order(pool: PgPool) {
    let content = seed_content(&pool, "Starfall").await;
    let project = seed_project(&pool, content.id, "Starfall JA").await;

    let first = seed_asset(&pool, content.id, MediaKind::Audio, "uploads/a.wav").await;
    let second = seed_asset(&pool, content.id, MediaKind::Audio, "uploads/b.wav").await;
    // Text assets never enter the classification queue.
    seed_asset(&pool, content.id, MediaKind::Text, "uploads/terms.json").await;

    let next = AssetRepo::next_unclassified(&pool, project.id).await.unwrap();
    assert_eq!(next.asset.unwrap().id, first);
    assert_eq!(next.progress.total, 2);
    assert_eq!(next.progress.remaining, 2);
    assert_eq!(next.progress.completed, 0);

    AssetRepo::set_classification(&pool, first, AssetClassification::Dialogue)
        .await
        .unwrap()
        .unwrap();

    let next = AssetRepo::next_unclassified(&pool, project.id).await.unwrap();
    assert_eq!(next.asset.unwrap().id, second);
    assert_eq!(next.progress.remaining, 1);
    assert_eq!(next.progress.completed, 1);

    AssetRepo::set_classification(&pool, second, AssetClassification::OtherClassified)
        .await
        .unwrap()
        .unwrap();

    let next = AssetRepo::next_unclassified(&pool, project.id).await.unwrap();
    assert!(next.asset.is_none());
    assert_eq!(next.progress.remaining, 0);
    assert_eq!(next.progress.completed, 2);
}

// ---------------------------------------------------------------------------
// Test: Readiness gate
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_readiness_counts_unclassified_audio_only(pool: PgPool) {
    let content = seed_content(&pool, "Starfall").await;
    let project = seed_project(&pool, content.id, "Starfall JA").await;

    let audio = seed_asset(&pool, content.id, MediaKind::Audio, "uploads/a.wav").await;
    seed_asset(&pool, content.id, MediaKind::Audio, "uploads/b.wav").await;
    seed_asset(&pool, content.id, MediaKind::Text, "uploads/terms.json").await;

    let status = ProjectRepo::readiness_status(&pool, project.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(status.unclassified_count, 2);
    assert!(!status.is_ready);

    AssetRepo::set_classification(&pool, audio, AssetClassification::Dialogue)
        .await
        .unwrap()
        .unwrap();

    let status = ProjectRepo::readiness_status(&pool, project.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(status.unclassified_count, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_mark_ready_flips_flag_even_with_backlog(pool: PgPool) {
    let content = seed_content(&pool, "Starfall").await;
    let project = seed_project(&pool, content.id, "Starfall JA").await;
    seed_asset(&pool, content.id, MediaKind::Audio, "uploads/a.wav").await;

    // The flip is advisory: a leader may unlock with work remaining.
    let project = ProjectRepo::mark_ready(&pool, project.id)
        .await
        .unwrap()
        .unwrap();
    assert!(project.is_ready_for_translation);

    let status = ProjectRepo::readiness_status(&pool, project.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(status.unclassified_count, 1);
    assert!(status.is_ready);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_readiness_unknown_project(pool: PgPool) {
    assert!(ProjectRepo::readiness_status(&pool, 777).await.unwrap().is_none());
    assert!(ProjectRepo::mark_ready(&pool, 777).await.unwrap().is_none());
}

// ---------------------------------------------------------------------------
// Test: Per-project asset settings
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_setting_sync_backfills_uncovered_assets(pool: PgPool) {
    let content = seed_content(&pool, "Starfall").await;
    let project = seed_project(&pool, content.id, "Starfall JA").await;

    let covered = seed_asset(&pool, content.id, MediaKind::Audio, "uploads/a.wav").await;
    seed_asset(&pool, content.id, MediaKind::Audio, "uploads/b.wav").await;
    seed_asset(&pool, content.id, MediaKind::Text, "uploads/terms.json").await;

    // One asset already has an explicit setting.
    let with_asset = ProjectAssetSettingRepo::upsert(&pool, project.id, covered, true)
        .await
        .unwrap();
    assert!(with_asset.setting.is_non_dialogue);
    assert_eq!(with_asset.asset.id, covered);

    let created = ProjectAssetSettingRepo::sync(&pool, project.id).await.unwrap();
    assert_eq!(created, 2);

    let settings = ProjectAssetSettingRepo::list_by_project(&pool, project.id)
        .await
        .unwrap();
    assert_eq!(settings.len(), 3);
    // Back-filled rows default to false; the explicit one is untouched.
    for setting in &settings {
        assert_eq!(setting.is_non_dialogue, setting.asset_id == covered);
    }

    // A second sync finds everything covered.
    let created = ProjectAssetSettingRepo::sync(&pool, project.id).await.unwrap();
    assert_eq!(created, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_settings_are_scoped_per_project(pool: PgPool) {
    let content = seed_content(&pool, "Starfall").await;
    let first = seed_project(&pool, content.id, "Starfall JA").await;
    let second = seed_project(&pool, content.id, "Starfall KO").await;

    let asset = seed_asset(&pool, content.id, MediaKind::Audio, "uploads/a.wav").await;

    ProjectAssetSettingRepo::upsert(&pool, first.id, asset, true)
        .await
        .unwrap();
    ProjectAssetSettingRepo::upsert(&pool, second.id, asset, false)
        .await
        .unwrap();

    // Same shared asset, independent flags per localization project.
    let first_settings = ProjectAssetSettingRepo::list_by_project(&pool, first.id)
        .await
        .unwrap();
    let second_settings = ProjectAssetSettingRepo::list_by_project(&pool, second.id)
        .await
        .unwrap();
    assert!(first_settings[0].is_non_dialogue);
    assert!(!second_settings[0].is_non_dialogue);

    // Upsert updates in place rather than duplicating.
    ProjectAssetSettingRepo::upsert(&pool, first.id, asset, false)
        .await
        .unwrap();
    let first_settings = ProjectAssetSettingRepo::list_by_project(&pool, first.id)
        .await
        .unwrap();
    assert_eq!(first_settings.len(), 1);
    assert!(!first_settings[0].is_non_dialogue);
}
