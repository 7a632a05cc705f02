//! Translation line models and DTOs.

use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;

use dubline_core::recording::RecordingStatus;
use dubline_core::translation::TranslationStatus;
use dubline_core::types::{DbId, Timestamp};

/// A row from the `translation_lines` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TranslationLine {
    pub id: DbId,
    pub project_id: DbId,
    pub translatable_asset_id: Option<DbId>,
    pub key: String,
    pub original_text: Option<String>,
    pub translated_text: Option<String>,
    pub status: TranslationStatus,
    pub character_id: Option<DbId>,
    pub voice_reference_asset_id: Option<DbId>,
    pub is_non_dialogue: bool,
    pub recording_status: RecordingStatus,
    pub voice_recording_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Payload for creating a single line by hand.
#[derive(Debug, Deserialize)]
pub struct CreateTranslationLine {
    pub project_id: DbId,
    pub translatable_asset_id: Option<DbId>,
    pub key: String,
    pub original_text: Option<String>,
    pub character_id: Option<DbId>,
}

/// Payload for updating a line's text, status, or character assignment.
/// Absent fields are left untouched; empty strings are normalized to NULL.
/// `character_id` distinguishes absent (keep) from explicit null (unassign).
#[derive(Debug, Deserialize)]
pub struct UpdateTranslationLine {
    pub translated_text: Option<String>,
    pub status: Option<TranslationStatus>,
    #[serde(default, deserialize_with = "double_option")]
    pub character_id: Option<Option<DbId>>,
}

/// Keeps the outer `Some` when the field appears in the payload, so an
/// explicit JSON `null` deserializes as `Some(None)` rather than `None`.
fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(de).map(Some)
}

/// Payload for binding an audio asset to a line.
#[derive(Debug, Deserialize)]
pub struct LinkAudio {
    pub asset_id: DbId,
    pub character_id: Option<DbId>,
    pub is_non_dialogue: bool,
}

/// Which partition of a project's lines to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineView {
    /// Lines with a character and a bound voice reference.
    Dialogue,
    /// Lines with no character: UI strings and other plain text.
    Ui,
}

/// Pagination window for line listings.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LinePage {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
