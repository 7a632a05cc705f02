//! Parser stub for binary engine resource tables.
//!
//! The binary decode is not implemented yet. To keep ingestion
//! idempotent-safe the stub returns an empty sequence instead of failing:
//! the caller sees zero lines, reports `NoTranslatableContent`, and leaves
//! the asset unprocessed so a later re-parse can pick it up.

use super::ParsedLine;
use crate::error::CoreError;

pub(super) fn parse(_raw: &[u8]) -> Result<Vec<ParsedLine>, CoreError> {
    Ok(Vec::new())
}
