//! Parser for the nested terms-table JSON export.
//!
//! Expected shape:
//!
//! ```json
//! {
//!   "terms": [
//!     { "key": "intro/greeting", "languages": ["Hello!", "Hallo!"] },
//!     { "key": "intro/farewell", "languages": [] }
//!   ]
//! }
//! ```
//!
//! The first language entry is the source text. Terms with no usable
//! language value are skipped rather than treated as errors, matching the
//! export tool which emits empty slots for untranslated source languages.

use serde_json::Value;

use super::ParsedLine;
use crate::error::CoreError;

pub(super) fn parse(raw: &[u8]) -> Result<Vec<ParsedLine>, CoreError> {
    let doc: Value = serde_json::from_slice(raw)
        .map_err(|e| CoreError::Validation(format!("Invalid terms table JSON: {e}")))?;

    let terms = doc
        .get("terms")
        .and_then(Value::as_array)
        .ok_or_else(|| {
            CoreError::Validation("Terms table must contain a top-level 'terms' array".into())
        })?;

    let mut lines = Vec::with_capacity(terms.len());
    for term in terms {
        let Some(key) = term.get("key").and_then(Value::as_str) else {
            return Err(CoreError::Validation(
                "Every term must have a string 'key'".into(),
            ));
        };

        // First non-null language value is the source text; a term with
        // none is skipped, not erred.
        let text = term
            .get("languages")
            .and_then(Value::as_array)
            .and_then(|langs| langs.iter().find_map(Value::as_str));

        if let Some(text) = text {
            lines.push(ParsedLine {
                key: key.to_string(),
                original_text: text.to_string(),
            });
        }
    }

    Ok(lines)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn parses_terms_taking_first_language() {
        let raw = br#"{
            "terms": [
                { "key": "menu/start", "languages": ["Start", "Starten"] },
                { "key": "menu/quit", "languages": ["Quit"] }
            ]
        }"#;
        let lines = parse(raw).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].key, "menu/start");
        assert_eq!(lines[0].original_text, "Start");
        assert_eq!(lines[1].original_text, "Quit");
    }

    #[test]
    fn skips_terms_without_language_values() {
        let raw = br#"{
            "terms": [
                { "key": "a", "languages": [] },
                { "key": "b" },
                { "key": "c", "languages": [null, "Third"] },
                { "key": "d", "languages": ["Fourth"] }
            ]
        }"#;
        let lines = parse(raw).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].key, "c");
        assert_eq!(lines[0].original_text, "Third");
        assert_eq!(lines[1].key, "d");
    }

    #[test]
    fn rejects_invalid_json() {
        assert_matches!(parse(b"not json"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn rejects_missing_terms_array() {
        assert_matches!(parse(br#"{"entries": []}"#), Err(CoreError::Validation(_)));
    }

    #[test]
    fn rejects_term_without_key() {
        let raw = br#"{ "terms": [ { "languages": ["x"] } ] }"#;
        assert_matches!(parse(raw), Err(CoreError::Validation(_)));
    }

    #[test]
    fn empty_terms_array_yields_empty_sequence() {
        assert!(parse(br#"{"terms": []}"#).unwrap().is_empty());
    }
}
