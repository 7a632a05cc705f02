//! Translatable-asset wrapper model.

use serde::Serialize;
use sqlx::FromRow;

use dubline_core::types::{DbId, Timestamp};

/// A row from the `translatable_assets` table: the ingestion wrapper
/// around a parsed source table asset.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TranslatableAsset {
    pub id: DbId,
    pub asset_id: DbId,
    pub is_processed: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Outcome of an ingestion run.
#[derive(Debug, Clone, Serialize)]
pub struct IngestionResult {
    pub translatable_asset_id: DbId,
    pub lines_created: i64,
}
