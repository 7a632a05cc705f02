//! Content and project models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use dubline_core::types::{DbId, Timestamp};

/// A row from the `contents` table: the source production whose assets are
/// shared by all of its localization projects.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Content {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `projects` table: one localization of a content.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub content_id: DbId,
    pub name: String,
    pub target_language: String,
    pub is_ready_for_translation: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Payload for creating a content.
#[derive(Debug, Deserialize)]
pub struct CreateContent {
    pub name: String,
}

/// Payload for creating a project.
#[derive(Debug, Deserialize)]
pub struct CreateProject {
    pub content_id: DbId,
    pub name: String,
    pub target_language: String,
}

/// Readiness snapshot for a project: how many audio assets still need
/// classification, and whether the translation workflow is unlocked.
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessStatus {
    pub project_id: DbId,
    pub unclassified_count: i64,
    pub is_ready: bool,
}
