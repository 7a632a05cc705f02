//! Repository for the `characters` table.

use sqlx::PgPool;

use dubline_core::types::DbId;

use crate::models::character::{Character, CreateCharacter, UpdateCharacter};

/// Column list for `characters` queries.
const COLUMNS: &str = "id, project_id, name, image_path, created_at, updated_at";

/// Provides CRUD operations for project characters.
pub struct CharacterRepo;

impl CharacterRepo {
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        input: &CreateCharacter,
    ) -> Result<Character, sqlx::Error> {
        let query = format!(
            "INSERT INTO characters (project_id, name, image_path) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Character>(&query)
            .bind(project_id)
            .bind(&input.name)
            .bind(input.image_path.as_deref())
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Character>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM characters WHERE id = $1");
        sqlx::query_as::<_, Character>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<Character>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM characters WHERE project_id = $1 ORDER BY name"
        );
        sqlx::query_as::<_, Character>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Update name and/or display image. Absent fields keep their value.
    /// One COALESCE statement, so concurrent partial updates to different
    /// fields never overwrite each other.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCharacter,
    ) -> Result<Option<Character>, sqlx::Error> {
        let query = format!(
            "UPDATE characters \
             SET name = COALESCE($2, name), \
                 image_path = COALESCE($3, image_path), \
                 updated_at = now() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Character>(&query)
            .bind(id)
            .bind(input.name.as_deref())
            .bind(input.image_path.as_deref())
            .fetch_optional(pool)
            .await
    }

    /// Delete a character. Lines assigned to it fall back to no character
    /// via the FK's ON DELETE SET NULL.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM characters WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
