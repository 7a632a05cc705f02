//! Per-project asset setting models.

use serde::Serialize;
use sqlx::FromRow;

use dubline_core::types::{DbId, Timestamp};

use super::asset::Asset;

/// A row from the `project_asset_settings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectAssetSetting {
    pub id: DbId,
    pub project_id: DbId,
    pub asset_id: DbId,
    pub is_non_dialogue: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Upsert result: the setting together with the asset it covers.
#[derive(Debug, Serialize)]
pub struct SettingWithAsset {
    pub setting: ProjectAssetSetting,
    pub asset: Asset,
}
