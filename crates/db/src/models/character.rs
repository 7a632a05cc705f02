//! Character models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use dubline_core::types::{DbId, Timestamp};

/// A row from the `characters` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Character {
    pub id: DbId,
    pub project_id: DbId,
    pub name: String,
    pub image_path: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Payload for creating a character.
#[derive(Debug, Deserialize)]
pub struct CreateCharacter {
    pub name: String,
    pub image_path: Option<String>,
}

/// Payload for updating a character. Absent fields are left untouched.
#[derive(Debug, Deserialize)]
pub struct UpdateCharacter {
    pub name: Option<String>,
    pub image_path: Option<String>,
}
