//! Repository for the `translation_lines` table.

use sqlx::PgPool;

use dubline_core::translation::normalize_text;
use dubline_core::types::DbId;

use crate::models::translation_line::{
    CreateTranslationLine, LinePage, LineView, TranslationLine, UpdateTranslationLine,
};

/// Column list for `translation_lines` queries.
pub(crate) const LINE_COLUMNS: &str = "\
    id, project_id, translatable_asset_id, key, \
    original_text, translated_text, status, \
    character_id, voice_reference_asset_id, is_non_dialogue, \
    recording_status, voice_recording_url, \
    created_at, updated_at";

/// Default page size for line listings.
const DEFAULT_LIMIT: i64 = 50;

/// Maximum page size for line listings.
const MAX_LIMIT: i64 = 200;

/// Provides data access for translation lines.
pub struct TranslationLineRepo;

impl TranslationLineRepo {
    /// Create a single line by hand. Empty text fields are stored as NULL.
    pub async fn create(
        pool: &PgPool,
        input: CreateTranslationLine,
    ) -> Result<TranslationLine, sqlx::Error> {
        let query = format!(
            "INSERT INTO translation_lines \
                (project_id, translatable_asset_id, key, original_text, character_id) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {LINE_COLUMNS}"
        );
        sqlx::query_as::<_, TranslationLine>(&query)
            .bind(input.project_id)
            .bind(input.translatable_asset_id)
            .bind(&input.key)
            .bind(normalize_text(input.original_text))
            .bind(input.character_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<TranslationLine>, sqlx::Error> {
        let query = format!("SELECT {LINE_COLUMNS} FROM translation_lines WHERE id = $1");
        sqlx::query_as::<_, TranslationLine>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Update text, status, or character assignment. Absent fields keep
    /// their current value; provided empty strings are normalized to NULL
    /// and an explicit null character unassigns the line.
    ///
    /// A single statement with presence flags, so concurrent partial
    /// updates to different fields never overwrite each other.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: UpdateTranslationLine,
    ) -> Result<Option<TranslationLine>, sqlx::Error> {
        let text_set = input.translated_text.is_some();
        let translated_text = normalize_text(input.translated_text);
        let character_set = input.character_id.is_some();
        let character_id = input.character_id.flatten();

        let query = format!(
            "UPDATE translation_lines \
             SET translated_text = CASE WHEN $2 THEN $3 ELSE translated_text END, \
                 status = COALESCE($4, status), \
                 character_id = CASE WHEN $5 THEN $6 ELSE character_id END, \
                 updated_at = now() \
             WHERE id = $1 \
             RETURNING {LINE_COLUMNS}"
        );
        sqlx::query_as::<_, TranslationLine>(&query)
            .bind(id)
            .bind(text_set)
            .bind(translated_text)
            .bind(input.status)
            .bind(character_set)
            .bind(character_id)
            .fetch_optional(pool)
            .await
    }

    /// List one partition of a project's lines, ordered by key.
    ///
    /// `Dialogue` lines have both a character and a bound voice reference;
    /// `Ui` lines have no character at all.
    pub async fn list(
        pool: &PgPool,
        project_id: DbId,
        view: LineView,
        page: LinePage,
    ) -> Result<Vec<TranslationLine>, sqlx::Error> {
        let limit = page.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        let offset = page.offset.unwrap_or(0).max(0);

        let partition = match view {
            LineView::Dialogue => {
                "character_id IS NOT NULL AND voice_reference_asset_id IS NOT NULL"
            }
            LineView::Ui => "character_id IS NULL",
        };

        let query = format!(
            "SELECT {LINE_COLUMNS} FROM translation_lines \
             WHERE project_id = $1 AND {partition} \
             ORDER BY key \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, TranslationLine>(&query)
            .bind(project_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Remove only the synthetic non-dialogue lines bound to an asset,
    /// leaving dialogue bindings untouched. Returns the deleted count.
    pub async fn delete_non_dialogue_by_asset(
        pool: &PgPool,
        asset_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM translation_lines \
             WHERE voice_reference_asset_id = $1 AND is_non_dialogue = true",
        )
        .bind(asset_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// All lines referencing an asset as their voice source. Invariant
    /// checks and the unlink flows use this.
    pub async fn list_by_voice_reference(
        pool: &PgPool,
        asset_id: DbId,
    ) -> Result<Vec<TranslationLine>, sqlx::Error> {
        let query = format!(
            "SELECT {LINE_COLUMNS} FROM translation_lines \
             WHERE voice_reference_asset_id = $1 \
             ORDER BY id"
        );
        sqlx::query_as::<_, TranslationLine>(&query)
            .bind(asset_id)
            .fetch_all(pool)
            .await
    }
}
