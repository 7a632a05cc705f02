//! Repository for the `contents` and `projects` tables, including the
//! readiness gate queries.

use sqlx::PgPool;

use dubline_core::types::DbId;

use crate::models::project::{Content, CreateContent, CreateProject, Project, ReadinessStatus};

/// Column list for `contents` queries.
const CONTENT_COLUMNS: &str = "id, name, created_at, updated_at";

/// Column list for `projects` queries.
const PROJECT_COLUMNS: &str = "\
    id, content_id, name, target_language, \
    is_ready_for_translation, created_at, updated_at";

/// Provides data access for contents and localization projects.
pub struct ProjectRepo;

impl ProjectRepo {
    pub async fn create_content(
        pool: &PgPool,
        input: &CreateContent,
    ) -> Result<Content, sqlx::Error> {
        let query = format!(
            "INSERT INTO contents (name) VALUES ($1) RETURNING {CONTENT_COLUMNS}"
        );
        sqlx::query_as::<_, Content>(&query)
            .bind(&input.name)
            .fetch_one(pool)
            .await
    }

    pub async fn find_content_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Content>, sqlx::Error> {
        let query = format!("SELECT {CONTENT_COLUMNS} FROM contents WHERE id = $1");
        sqlx::query_as::<_, Content>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create_project(
        pool: &PgPool,
        input: &CreateProject,
    ) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (content_id, name, target_language) \
             VALUES ($1, $2, $3) \
             RETURNING {PROJECT_COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(input.content_id)
            .bind(&input.name)
            .bind(&input.target_language)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Count the project's AUDIO assets still awaiting classification and
    /// report the readiness flag. Returns `None` for an unknown project.
    pub async fn readiness_status(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Option<ReadinessStatus>, sqlx::Error> {
        let Some(project) = Self::find_by_id(pool, project_id).await? else {
            return Ok(None);
        };

        let unclassified_count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM assets \
             WHERE content_id = $1 \
               AND media_kind = 'audio' \
               AND classification = 'unclassified'",
        )
        .bind(project.content_id)
        .fetch_one(pool)
        .await?;

        Ok(Some(ReadinessStatus {
            project_id,
            unclassified_count,
            is_ready: project.is_ready_for_translation,
        }))
    }

    /// One-way flip of the readiness flag. Advisory: the backlog count is
    /// not required to be zero. There is no API that un-flips it.
    pub async fn mark_ready(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects \
             SET is_ready_for_translation = true, updated_at = now() \
             WHERE id = $1 \
             RETURNING {PROJECT_COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(project_id)
            .fetch_optional(pool)
            .await
    }
}
