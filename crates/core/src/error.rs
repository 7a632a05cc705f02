use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Unsupported localization format: {0}")]
    UnsupportedFormat(String),

    #[error("Asset {0} yielded no translatable content")]
    NoTranslatableContent(DbId),

    #[error("Asset {0} has already been parsed; re-parse requires force")]
    AlreadyProcessed(DbId),

    #[error("Internal error: {0}")]
    Internal(String),
}
