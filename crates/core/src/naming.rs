//! Storage path naming conventions.
//!
//! All stored files are timestamp-prefixed so concurrent uploads of the
//! same logical name never collide. Paths are relative to the storage
//! root and always use `/` separators.

use crate::types::{DbId, Timestamp};

/// Subdirectory for general asset uploads.
pub const UPLOADS_DIR: &str = "uploads";

/// Subdirectory for raw (pre-mix) recordings.
pub const RAW_RECORDINGS_DIR: &str = "uploads/recordings/raw";

/// Subdirectory for final mixed recordings.
pub const MIX_RECORDINGS_DIR: &str = "uploads/recordings/mix";

/// Relative storage path for an uploaded asset file.
///
/// Convention: `uploads/{unix_millis}_{sanitized_original_name}`.
pub fn upload_path(now: Timestamp, original_name: &str) -> String {
    format!(
        "{UPLOADS_DIR}/{}_{}",
        now.timestamp_millis(),
        sanitize_filename(original_name)
    )
}

/// Relative storage path for a raw recording take.
///
/// Convention: `uploads/recordings/raw/{unix_millis}_line_{id}.{ext}`.
pub fn raw_recording_path(now: Timestamp, line_id: DbId, extension: &str) -> String {
    format!(
        "{RAW_RECORDINGS_DIR}/{}_line_{line_id}.{extension}",
        now.timestamp_millis()
    )
}

/// Relative storage path for a final mix file.
///
/// Convention: `uploads/recordings/mix/{unix_millis}_line_{id}.{ext}`.
pub fn mix_recording_path(now: Timestamp, line_id: DbId, extension: &str) -> String {
    format!(
        "{MIX_RECORDINGS_DIR}/{}_line_{line_id}.{extension}",
        now.timestamp_millis()
    )
}

/// The deterministic key of the synthetic line created when an asset is
/// linked as non-dialogue. Deterministic per asset: a second link attempt
/// collides on the unique key instead of creating a second line.
pub fn non_dialogue_key(asset_id: DbId) -> String {
    format!("non_dialogue_{asset_id}")
}

/// Extract a lowercase file extension, defaulting to `wav` for audio
/// payloads that arrive without one.
pub fn audio_extension(filename: &str) -> String {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| !ext.is_empty() && ext.len() <= 8)
        .unwrap_or_else(|| "wav".to_string())
}

/// Strip path separators and control characters from a client-supplied
/// filename, keeping it usable as a single path segment.
pub fn sanitize_filename(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '\0'..='\x1f' => '_',
            c if c.is_whitespace() => '_',
            c => c,
        })
        .collect();

    let trimmed = cleaned.trim_matches(['.', '_']);
    if trimmed.is_empty() {
        "unnamed".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(millis: i64) -> Timestamp {
        chrono::Utc.timestamp_millis_opt(millis).unwrap()
    }

    #[test]
    fn upload_path_is_timestamp_prefixed() {
        assert_eq!(
            upload_path(at(1700000000000), "take one.wav"),
            "uploads/1700000000000_take_one.wav"
        );
    }

    #[test]
    fn recording_paths_embed_line_id() {
        assert_eq!(
            raw_recording_path(at(5), 42, "wav"),
            "uploads/recordings/raw/5_line_42.wav"
        );
        assert_eq!(
            mix_recording_path(at(5), 42, "ogg"),
            "uploads/recordings/mix/5_line_42.ogg"
        );
    }

    #[test]
    fn non_dialogue_key_is_deterministic() {
        assert_eq!(non_dialogue_key(123), "non_dialogue_123");
        assert_eq!(non_dialogue_key(123), non_dialogue_key(123));
    }

    #[test]
    fn audio_extension_defaults_to_wav() {
        assert_eq!(audio_extension("take.WAV"), "wav");
        assert_eq!(audio_extension("take.flac"), "flac");
        assert_eq!(audio_extension("take"), "wav");
        assert_eq!(audio_extension("take."), "wav");
    }

    #[test]
    fn sanitize_strips_separators() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "etc_passwd");
        assert_eq!(sanitize_filename("a b\tc.wav"), "a_b_c.wav");
        assert_eq!(sanitize_filename("..."), "unnamed");
    }
}
