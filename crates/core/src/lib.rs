//! Domain logic for the dubline localization pipeline.
//!
//! Pure types and rules only: status enums and their transitions, the
//! ingestion parsers, storage naming conventions, and the error taxonomy.
//! No I/O lives here; persistence belongs to `dubline-db` and the HTTP
//! surface to `dubline-api`.

pub mod classification;
pub mod error;
pub mod naming;
pub mod parser;
pub mod recording;
pub mod roles;
pub mod translation;
pub mod types;
