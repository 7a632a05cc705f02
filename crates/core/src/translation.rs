//! Translation status lifecycle and text normalization.

use serde::{Deserialize, Serialize};

/// Textual progress of a translation line.
///
/// Maps to the `translation_status` Postgres enum. The progression is
/// `NotTranslated -> Translated -> Approved`; synthetic non-dialogue lines
/// are created directly as `Approved`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "translation_status", rename_all = "snake_case")]
pub enum TranslationStatus {
    NotTranslated,
    Translated,
    Approved,
}

/// Normalize a user-supplied text field: empty or whitespace-only strings
/// become `None` so the database never stores a blank sentinel.
pub fn normalize_text(value: Option<String>) -> Option<String> {
    match value {
        Some(s) if s.trim().is_empty() => None,
        other => other,
    }
}
