//! Repository for the `project_asset_settings` table.
//!
//! Settings are a per-project view over assets shared across projects of
//! one content; they never touch the asset's global classification.

use sqlx::PgPool;

use dubline_core::error::CoreError;
use dubline_core::types::DbId;

use super::asset_repo::ASSET_COLUMNS;
use super::RepoError;
use crate::models::asset::Asset;
use crate::models::project_asset_setting::{ProjectAssetSetting, SettingWithAsset};

/// Column list for `project_asset_settings` queries.
const COLUMNS: &str = "id, project_id, asset_id, is_non_dialogue, created_at, updated_at";

/// Provides data access for per-project asset settings.
pub struct ProjectAssetSettingRepo;

impl ProjectAssetSettingRepo {
    /// Upsert the per-project non-dialogue flag for one asset, returning
    /// the setting together with the asset it covers.
    pub async fn upsert(
        pool: &PgPool,
        project_id: DbId,
        asset_id: DbId,
        is_non_dialogue: bool,
    ) -> Result<SettingWithAsset, RepoError> {
        let find_asset = format!("SELECT {ASSET_COLUMNS} FROM assets WHERE id = $1");
        let asset = sqlx::query_as::<_, Asset>(&find_asset)
            .bind(asset_id)
            .fetch_optional(pool)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Asset",
                id: asset_id,
            })?;

        let query = format!(
            "INSERT INTO project_asset_settings (project_id, asset_id, is_non_dialogue) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (project_id, asset_id) \
             DO UPDATE SET is_non_dialogue = EXCLUDED.is_non_dialogue, updated_at = now() \
             RETURNING {COLUMNS}"
        );
        let setting = sqlx::query_as::<_, ProjectAssetSetting>(&query)
            .bind(project_id)
            .bind(asset_id)
            .bind(is_non_dialogue)
            .fetch_one(pool)
            .await?;

        Ok(SettingWithAsset { setting, asset })
    }

    /// Back-fill settings rows for every asset of the project's content
    /// not yet covered, defaulting to `is_non_dialogue = false`. Returns
    /// the number of rows created.
    pub async fn sync(pool: &PgPool, project_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO project_asset_settings (project_id, asset_id) \
             SELECT $1, a.id \
             FROM assets a \
             JOIN projects p ON p.content_id = a.content_id \
             WHERE p.id = $1 \
               AND NOT EXISTS (\
                   SELECT 1 FROM project_asset_settings s \
                   WHERE s.project_id = $1 AND s.asset_id = a.id\
               )",
        )
        .bind(project_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<ProjectAssetSetting>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM project_asset_settings \
             WHERE project_id = $1 \
             ORDER BY asset_id"
        );
        sqlx::query_as::<_, ProjectAssetSetting>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }
}
