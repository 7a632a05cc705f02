//! Ingestion parsers for engine localization exports.
//!
//! A parser is a pure function from raw bytes to a flat sequence of
//! `(key, original_text)` pairs. The format is selected by a caller-supplied
//! tag; unknown tags are rejected up front. Parsers never touch the
//! database — the ingestion transaction lives in `dubline-db`.

mod resource_table;
mod terms_table;

use serde::Serialize;

use crate::error::CoreError;

/// One translatable unit extracted from a localization export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedLine {
    pub key: String,
    pub original_text: String,
}

/// The set of registered export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserFormat {
    /// Nested JSON table with a top-level `terms` array, each term holding
    /// a key and a list of per-language values.
    TermsTable,
    /// Binary engine resource table. Decoding is not yet implemented; the
    /// parser returns an empty sequence and the caller reports
    /// `NoTranslatableContent` instead of marking the asset processed.
    ResourceTable,
}

impl ParserFormat {
    /// Resolve a format tag to a registered parser.
    pub fn from_tag(tag: &str) -> Result<Self, CoreError> {
        match tag {
            "terms_table" => Ok(ParserFormat::TermsTable),
            "resource_table" => Ok(ParserFormat::ResourceTable),
            other => Err(CoreError::UnsupportedFormat(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ParserFormat::TermsTable => "terms_table",
            ParserFormat::ResourceTable => "resource_table",
        }
    }
}

/// Parse a localization export into translatable lines.
///
/// Pure and side-effect free. An empty result is a legal outcome (the
/// caller decides whether that is an error); malformed input for a known
/// format fails with `Validation`.
pub fn parse(format: ParserFormat, raw: &[u8]) -> Result<Vec<ParsedLine>, CoreError> {
    match format {
        ParserFormat::TermsTable => terms_table::parse(raw),
        ParserFormat::ResourceTable => resource_table::parse(raw),
    }
}
