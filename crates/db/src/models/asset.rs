//! Asset models and DTOs.

use serde::Serialize;
use sqlx::FromRow;

use dubline_core::classification::{AssetClassification, MediaKind};
use dubline_core::types::{DbId, Timestamp};

/// A row from the `assets` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Asset {
    pub id: DbId,
    pub content_id: DbId,
    pub media_kind: MediaKind,
    pub classification: AssetClassification,
    pub file_path: String,
    pub original_filename: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Input for registering an uploaded asset.
#[derive(Debug, Clone)]
pub struct CreateAsset {
    pub content_id: DbId,
    pub media_kind: MediaKind,
    pub file_path: String,
    pub original_filename: String,
}

/// Classification backlog snapshot over a project's AUDIO assets.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ClassificationProgress {
    pub total: i64,
    pub remaining: i64,
    pub completed: i64,
}

/// The next asset awaiting classification plus the queue snapshot.
#[derive(Debug, Serialize)]
pub struct NextUnclassified {
    pub asset: Option<Asset>,
    pub progress: ClassificationProgress,
}
