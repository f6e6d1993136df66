//! Repository for the `projects` table.

use devboard_core::types::DbId;
use sqlx::PgPool;

use crate::models::project::{Project, ProjectInput};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, name, client, status, description, delivery_at, created_at, updated_at";

/// Provides CRUD operations for projects.
///
/// Every method is a single statement; there are no multi-statement
/// transactions. Concurrent writers to the same row are last-write-wins.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project, returning the created row with its assigned
    /// `id`, `created_at` and `updated_at`.
    pub async fn create(pool: &PgPool, input: &ProjectInput) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (name, client, status, description, delivery_at)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(&input.name)
            .bind(&input.client)
            .bind(input.status.as_str())
            .bind(&input.description)
            .bind(input.delivery_at)
            .fetch_one(pool)
            .await
    }

    /// Find a project by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all projects, most recently created first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Project>(&query).fetch_all(pool).await
    }

    /// Overwrite every mutable column of a project.
    ///
    /// `updated_at` always moves forward, even when two updates land within
    /// the same clock tick. Returns `None` if no row with the given `id`
    /// exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &ProjectInput,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                name = $2,
                client = $3,
                status = $4,
                description = $5,
                delivery_at = $6,
                updated_at = GREATEST(NOW(), updated_at + INTERVAL '1 microsecond')
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.client)
            .bind(input.status.as_str())
            .bind(&input.description)
            .bind(input.delivery_at)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a project by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
