//! Raw recording model.

use serde::Serialize;
use sqlx::FromRow;

use dubline_core::types::{DbId, Timestamp};

/// A row from the `raw_recordings` table: the single pre-mix actor take
/// for a line.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RawRecording {
    pub id: DbId,
    pub translation_line_id: DbId,
    pub file_url: String,
    pub created_at: Timestamp,
}
