//! Repository for the `assets` table and the classification queue.

use sqlx::PgPool;

use dubline_core::classification::AssetClassification;
use dubline_core::types::DbId;

use crate::models::asset::{Asset, ClassificationProgress, CreateAsset, NextUnclassified};

/// Column list for `assets` queries.
pub(crate) const ASSET_COLUMNS: &str = "\
    id, content_id, media_kind, classification, \
    file_path, original_filename, created_at, updated_at";

/// Provides data access for stored assets.
pub struct AssetRepo;

impl AssetRepo {
    /// Register an uploaded asset. Classification starts unclassified.
    pub async fn create(pool: &PgPool, input: &CreateAsset) -> Result<Asset, sqlx::Error> {
        let query = format!(
            "INSERT INTO assets (content_id, media_kind, file_path, original_filename) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {ASSET_COLUMNS}"
        );
        sqlx::query_as::<_, Asset>(&query)
            .bind(input.content_id)
            .bind(input.media_kind)
            .bind(&input.file_path)
            .bind(&input.original_filename)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Asset>, sqlx::Error> {
        let query = format!("SELECT {ASSET_COLUMNS} FROM assets WHERE id = $1");
        sqlx::query_as::<_, Asset>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Direct classification override. Does not inspect referencing lines;
    /// this is the manual-correction escape hatch and the handler restricts
    /// it to elevated roles.
    pub async fn set_classification(
        pool: &PgPool,
        id: DbId,
        classification: AssetClassification,
    ) -> Result<Option<Asset>, sqlx::Error> {
        let query = format!(
            "UPDATE assets SET classification = $2, updated_at = now() \
             WHERE id = $1 \
             RETURNING {ASSET_COLUMNS}"
        );
        sqlx::query_as::<_, Asset>(&query)
            .bind(id)
            .bind(classification)
            .fetch_optional(pool)
            .await
    }

    /// The classification queue head: the lowest-id UNCLASSIFIED audio
    /// asset of the project's content, plus a progress snapshot over audio
    /// assets only. Non-audio assets never enter this queue.
    pub async fn next_unclassified(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<NextUnclassified, sqlx::Error> {
        let query = format!(
            "SELECT {ASSET_COLUMNS} FROM assets \
             WHERE content_id = (SELECT content_id FROM projects WHERE id = $1) \
               AND media_kind = 'audio' \
               AND classification = 'unclassified' \
             ORDER BY id \
             LIMIT 1"
        );
        let asset = sqlx::query_as::<_, Asset>(&query)
            .bind(project_id)
            .fetch_optional(pool)
            .await?;

        let (total, remaining): (i64, i64) = sqlx::query_as(
            "SELECT \
                COUNT(*), \
                COUNT(*) FILTER (WHERE classification = 'unclassified') \
             FROM assets \
             WHERE content_id = (SELECT content_id FROM projects WHERE id = $1) \
               AND media_kind = 'audio'",
        )
        .bind(project_id)
        .fetch_one(pool)
        .await?;

        Ok(NextUnclassified {
            asset,
            progress: ClassificationProgress {
                total,
                remaining,
                completed: total - remaining,
            },
        })
    }
}
