//! Asset media kinds and classification states.
//!
//! Classification is a small state machine: `unlink`/`undo` are the only
//! paths back to `Unclassified`; every other transition assigns a
//! production meaning to the asset.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// The broad media category of a stored asset.
///
/// Maps to the `media_kind` Postgres enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "media_kind", rename_all = "snake_case")]
pub enum MediaKind {
    Audio,
    Text,
    Other,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Audio => "audio",
            MediaKind::Text => "text",
            MediaKind::Other => "other",
        }
    }

    /// Infer the media kind from an uploaded file's extension.
    ///
    /// Unknown extensions fall back to [`MediaKind::Other`]; the kind is a
    /// routing hint, not a validation gate.
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "wav" | "mp3" | "ogg" | "flac" | "m4a" | "aac" => MediaKind::Audio,
            "json" | "csv" | "txt" | "xml" | "po" | "resx" => MediaKind::Text,
            _ => MediaKind::Other,
        }
    }
}

/// The production-meaning tag on an asset.
///
/// Maps to the `asset_classification` Postgres enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "asset_classification", rename_all = "snake_case")]
pub enum AssetClassification {
    Unclassified,
    Dialogue,
    NonDialogueVocal,
    OtherClassified,
}

impl AssetClassification {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetClassification::Unclassified => "unclassified",
            AssetClassification::Dialogue => "dialogue",
            AssetClassification::NonDialogueVocal => "non_dialogue_vocal",
            AssetClassification::OtherClassified => "other_classified",
        }
    }

    /// Parse a classification from its wire representation.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "unclassified" => Ok(AssetClassification::Unclassified),
            "dialogue" => Ok(AssetClassification::Dialogue),
            "non_dialogue_vocal" => Ok(AssetClassification::NonDialogueVocal),
            "other_classified" => Ok(AssetClassification::OtherClassified),
            other => Err(CoreError::Validation(format!(
                "Unknown classification '{other}'. Must be one of: \
                 unclassified, dialogue, non_dialogue_vocal, other_classified"
            ))),
        }
    }

    /// The classification a link operation assigns for the given line kind.
    pub fn for_link(is_non_dialogue: bool) -> Self {
        if is_non_dialogue {
            AssetClassification::NonDialogueVocal
        } else {
            AssetClassification::Dialogue
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_kind_from_extension() {
        assert_eq!(MediaKind::from_extension("wav"), MediaKind::Audio);
        assert_eq!(MediaKind::from_extension("WAV"), MediaKind::Audio);
        assert_eq!(MediaKind::from_extension("json"), MediaKind::Text);
        assert_eq!(MediaKind::from_extension("blend"), MediaKind::Other);
        assert_eq!(MediaKind::from_extension(""), MediaKind::Other);
    }

    #[test]
    fn parse_round_trips_every_variant() {
        for c in [
            AssetClassification::Unclassified,
            AssetClassification::Dialogue,
            AssetClassification::NonDialogueVocal,
            AssetClassification::OtherClassified,
        ] {
            assert_eq!(AssetClassification::parse(c.as_str()).unwrap(), c);
        }
    }

    #[test]
    fn parse_rejects_unknown() {
        assert!(AssetClassification::parse("vocal").is_err());
    }

    #[test]
    fn link_classification_follows_line_kind() {
        assert_eq!(
            AssetClassification::for_link(true),
            AssetClassification::NonDialogueVocal
        );
        assert_eq!(
            AssetClassification::for_link(false),
            AssetClassification::Dialogue
        );
    }
}
