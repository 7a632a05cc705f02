//! Integration tests for the audio-to-line linking protocol.
//!
//! Exercises the linking transactions against a real database:
//! - Non-dialogue shortcut creates the synthetic APPROVED line
//! - Re-click protection via the synthetic key unique index
//! - Unlink resets classification and clears voice references
//! - General link rejects an asset already bound elsewhere

use sqlx::PgPool;

use dubline_core::classification::{AssetClassification, MediaKind};
use dubline_core::error::CoreError;
use dubline_core::translation::TranslationStatus;
use dubline_db::models::asset::CreateAsset;
use dubline_db::models::project::{Content, CreateContent, CreateProject, Project};
use dubline_db::models::translation_line::{CreateTranslationLine, LinkAudio};
use dubline_db::repositories::{
    AssetRepo, LinkingRepo, ProjectRepo, RepoError, TranslationLineRepo,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_project(pool: &PgPool) -> (Content, Project) {
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
            name: "Starfall FR".to_string(),
            target_language: "fr".to_string(),
        },
    )
    .await
    .unwrap();
    (content, project)
}

fn new_audio_asset(content_id: i64, path: &str) -> CreateAsset {
    CreateAsset {
        content_id,
        media_kind: MediaKind::Audio,
        file_path: path.to_string(),
        original_filename: "clip.wav".to_string(),
    }
}

fn new_line(project_id: i64, key: &str) -> CreateTranslationLine {
    CreateTranslationLine {
        project_id,
        translatable_asset_id: None,
        key: key.to_string(),
        original_text: Some("Hello there".to_string()),
        character_id: None,
    }
}

// ---------------------------------------------------------------------------
// Test: Non-dialogue shortcut
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_link_non_dialogue_creates_approved_line(pool: PgPool) {
    let (content, project) = seed_project(&pool).await;
    let asset = AssetRepo::create(&pool, &new_audio_asset(content.id, "uploads/1.wav"))
        .await
        .unwrap();
    assert_eq!(asset.classification, AssetClassification::Unclassified);

    let line = LinkingRepo::link_non_dialogue(&pool, project.id, asset.id, None)
        .await
        .unwrap();

    assert_eq!(line.key, format!("non_dialogue_{}", asset.id));
    assert_eq!(line.status, TranslationStatus::Approved);
    assert!(line.is_non_dialogue);
    assert_eq!(line.voice_reference_asset_id, Some(asset.id));
    assert!(line.translatable_asset_id.is_none());

    let asset = AssetRepo::find_by_id(&pool, asset.id).await.unwrap().unwrap();
    assert_eq!(asset.classification, AssetClassification::NonDialogueVocal);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_link_non_dialogue_twice_hits_unique_index(pool: PgPool) {
    let (content, project) = seed_project(&pool).await;
    let asset = AssetRepo::create(&pool, &new_audio_asset(content.id, "uploads/2.wav"))
        .await
        .unwrap();

    LinkingRepo::link_non_dialogue(&pool, project.id, asset.id, None)
        .await
        .unwrap();
    let err = LinkingRepo::link_non_dialogue(&pool, project.id, asset.id, None)
        .await
        .unwrap_err();

    match err {
        RepoError::Db(sqlx::Error::Database(db)) => {
            assert_eq!(db.constraint(), Some("uq_translation_lines_synthetic_key"));
        }
        other => panic!("expected unique violation, got {other:?}"),
    }

    // The asset still has exactly one synthetic line.
    let lines = TranslationLineRepo::list_by_voice_reference(&pool, asset.id)
        .await
        .unwrap();
    assert_eq!(lines.len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_link_non_dialogue_missing_asset(pool: PgPool) {
    let (_, project) = seed_project(&pool).await;
    let err = LinkingRepo::link_non_dialogue(&pool, project.id, 9999, None)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Domain(CoreError::NotFound { entity: "Asset", .. })
    ));
}

// ---------------------------------------------------------------------------
// Test: Unlink resets everything
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unlink_resets_asset_and_clears_references(pool: PgPool) {
    let (content, project) = seed_project(&pool).await;
    let asset = AssetRepo::create(&pool, &new_audio_asset(content.id, "uploads/3.wav"))
        .await
        .unwrap();
    let line = LinkingRepo::link_non_dialogue(&pool, project.id, asset.id, None)
        .await
        .unwrap();

    let (asset, cleared) = LinkingRepo::unlink(&pool, asset.id).await.unwrap();
    assert_eq!(cleared, 1);
    assert_eq!(asset.classification, AssetClassification::Unclassified);

    // The line survives with its reference nulled, ready for re-linking.
    let line = TranslationLineRepo::find_by_id(&pool, line.id)
        .await
        .unwrap()
        .unwrap();
    assert!(line.voice_reference_asset_id.is_none());

    assert!(TranslationLineRepo::list_by_voice_reference(&pool, asset.id)
        .await
        .unwrap()
        .is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unlink_then_relink_succeeds(pool: PgPool) {
    let (content, project) = seed_project(&pool).await;
    let asset = AssetRepo::create(&pool, &new_audio_asset(content.id, "uploads/4.wav"))
        .await
        .unwrap();

    LinkingRepo::link_non_dialogue(&pool, project.id, asset.id, None)
        .await
        .unwrap();
    // The synthetic line must go before the unlink nulls its reference,
    // otherwise the deterministic key collides on the next shortcut call.
    let deleted = TranslationLineRepo::delete_non_dialogue_by_asset(&pool, asset.id)
        .await
        .unwrap();
    assert_eq!(deleted, 1);
    let (asset_reset, cleared) = LinkingRepo::unlink(&pool, asset.id).await.unwrap();
    assert_eq!(cleared, 0);
    assert_eq!(asset_reset.classification, AssetClassification::Unclassified);

    let line = LinkingRepo::link_non_dialogue(&pool, project.id, asset.id, None)
        .await
        .unwrap();
    assert_eq!(line.key, format!("non_dialogue_{}", asset.id));
}

// ---------------------------------------------------------------------------
// Test: General link to an existing line
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_link_audio_binds_and_classifies(pool: PgPool) {
    let (content, project) = seed_project(&pool).await;
    let asset = AssetRepo::create(&pool, &new_audio_asset(content.id, "uploads/5.wav"))
        .await
        .unwrap();
    let line = TranslationLineRepo::create(&pool, new_line(project.id, "intro.greeting"))
        .await
        .unwrap();

    let linked = LinkingRepo::link_audio(
        &pool,
        line.id,
        &LinkAudio {
            asset_id: asset.id,
            character_id: None,
            is_non_dialogue: false,
        },
    )
    .await
    .unwrap();

    assert_eq!(linked.voice_reference_asset_id, Some(asset.id));
    assert!(!linked.is_non_dialogue);

    let asset = AssetRepo::find_by_id(&pool, asset.id).await.unwrap().unwrap();
    assert_eq!(asset.classification, AssetClassification::Dialogue);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_link_audio_rejects_double_binding(pool: PgPool) {
    let (content, project) = seed_project(&pool).await;
    let asset = AssetRepo::create(&pool, &new_audio_asset(content.id, "uploads/6.wav"))
        .await
        .unwrap();
    let first = TranslationLineRepo::create(&pool, new_line(project.id, "scene1.a"))
        .await
        .unwrap();
    let second = TranslationLineRepo::create(&pool, new_line(project.id, "scene1.b"))
        .await
        .unwrap();

    let input = LinkAudio {
        asset_id: asset.id,
        character_id: None,
        is_non_dialogue: false,
    };
    LinkingRepo::link_audio(&pool, first.id, &input).await.unwrap();
    let err = LinkingRepo::link_audio(&pool, second.id, &input)
        .await
        .unwrap_err();

    assert!(matches!(err, RepoError::Domain(CoreError::Conflict(_))));

    // The second line is untouched.
    let second = TranslationLineRepo::find_by_id(&pool, second.id)
        .await
        .unwrap()
        .unwrap();
    assert!(second.voice_reference_asset_id.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_link_audio_is_idempotent_for_same_line(pool: PgPool) {
    let (content, project) = seed_project(&pool).await;
    let asset = AssetRepo::create(&pool, &new_audio_asset(content.id, "uploads/7.wav"))
        .await
        .unwrap();
    let line = TranslationLineRepo::create(&pool, new_line(project.id, "scene2.a"))
        .await
        .unwrap();

    let input = LinkAudio {
        asset_id: asset.id,
        character_id: None,
        is_non_dialogue: false,
    };
    LinkingRepo::link_audio(&pool, line.id, &input).await.unwrap();
    // Re-binding the same asset to the same line is not a conflict.
    let relinked = LinkingRepo::link_audio(&pool, line.id, &input).await.unwrap();
    assert_eq!(relinked.voice_reference_asset_id, Some(asset.id));
}
