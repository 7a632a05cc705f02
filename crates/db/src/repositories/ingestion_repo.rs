//! The ingestion transaction: wrapper row, idempotent re-parse, bulk line
//! insert.

use sqlx::PgPool;

use dubline_core::error::CoreError;
use dubline_core::parser::ParsedLine;
use dubline_core::translation::normalize_text;
use dubline_core::types::DbId;

use super::RepoError;
use crate::models::translatable_asset::{IngestionResult, TranslatableAsset};

/// Column list for `translatable_assets` queries.
const WRAPPER_COLUMNS: &str = "id, asset_id, is_processed, created_at, updated_at";

/// Provides the ingestion side effects around the pure parsers.
pub struct IngestionRepo;

impl IngestionRepo {
    pub async fn find_wrapper_by_asset(
        pool: &PgPool,
        asset_id: DbId,
    ) -> Result<Option<TranslatableAsset>, sqlx::Error> {
        let query =
            format!("SELECT {WRAPPER_COLUMNS} FROM translatable_assets WHERE asset_id = $1");
        sqlx::query_as::<_, TranslatableAsset>(&query)
            .bind(asset_id)
            .fetch_optional(pool)
            .await
    }

    /// Persist a parse run in one transaction:
    ///
    /// 1. create or reuse the wrapper row for the source asset,
    /// 2. refuse with `AlreadyProcessed` if it was parsed before and
    ///    `force` is not set,
    /// 3. delete every line from the previous parse,
    /// 4. bulk-insert the new lines (empty text normalized to NULL),
    /// 5. mark the wrapper processed.
    ///
    /// Any failure rolls the whole run back, so a wrapper is never marked
    /// processed with a partial line set.
    pub async fn replace_parsed_lines(
        pool: &PgPool,
        asset_id: DbId,
        project_id: DbId,
        lines: &[ParsedLine],
        force: bool,
    ) -> Result<IngestionResult, RepoError> {
        let mut tx = pool.begin().await?;

        let upsert_wrapper = format!(
            "INSERT INTO translatable_assets (asset_id) VALUES ($1) \
             ON CONFLICT (asset_id) DO UPDATE SET updated_at = now() \
             RETURNING {WRAPPER_COLUMNS}"
        );
        let wrapper = sqlx::query_as::<_, TranslatableAsset>(&upsert_wrapper)
            .bind(asset_id)
            .fetch_one(&mut *tx)
            .await?;

        if wrapper.is_processed && !force {
            return Err(CoreError::AlreadyProcessed(asset_id).into());
        }

        sqlx::query("DELETE FROM translation_lines WHERE translatable_asset_id = $1")
            .bind(wrapper.id)
            .execute(&mut *tx)
            .await?;

        let mut inserted: i64 = 0;
        for line in lines {
            sqlx::query(
                "INSERT INTO translation_lines \
                    (project_id, translatable_asset_id, key, original_text) \
                 VALUES ($1, $2, $3, $4)",
            )
            .bind(project_id)
            .bind(wrapper.id)
            .bind(&line.key)
            .bind(normalize_text(Some(line.original_text.clone())))
            .execute(&mut *tx)
            .await?;
            inserted += 1;
        }

        sqlx::query(
            "UPDATE translatable_assets SET is_processed = true, updated_at = now() \
             WHERE id = $1",
        )
        .bind(wrapper.id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(IngestionResult {
            translatable_asset_id: wrapper.id,
            lines_created: inserted,
        })
    }
}
