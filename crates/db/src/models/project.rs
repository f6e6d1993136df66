//! Project entity model and DTOs.

use devboard_core::error::CoreError;
use devboard_core::project::{self, ProjectStatus};
use devboard_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A project row from the `projects` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub name: String,
    pub client: String,
    #[sqlx(try_from = "String")]
    pub status: ProjectStatus,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for create and update, as it arrives on the wire.
///
/// Every field is optional here so that missing values surface as
/// validation errors with a field name instead of a generic decode error.
/// Server-controlled fields (`id`, `created_at`, `updated_at`) are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectPayload {
    pub name: Option<String>,
    pub client: Option<String>,
    pub status: Option<String>,
    pub description: Option<String>,
    pub delivery_at: Option<Timestamp>,
}

/// Validated column values for an insert or a full-row update.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectInput {
    pub name: String,
    pub client: String,
    pub status: ProjectStatus,
    pub description: String,
    pub delivery_at: Option<Timestamp>,
}

impl ProjectPayload {
    /// Check the payload and fill defaults.
    ///
    /// `name` and `client` are required; a missing status becomes `draft`
    /// and a missing description becomes the empty string. No text field
    /// may contain a NUL character.
    pub fn validate(self) -> Result<ProjectInput, CoreError> {
        project::validate_required_text("name", self.name.as_deref())?;
        project::validate_required_text("client", self.client.as_deref())?;
        let status = project::parse_status(self.status.as_deref())?;
        if let Some(description) = self.description.as_deref() {
            project::validate_text_bytes("description", description)?;
        }

        Ok(ProjectInput {
            name: self.name.unwrap_or_default(),
            client: self.client.unwrap_or_default(),
            status,
            description: self.description.unwrap_or_default(),
            delivery_at: self.delivery_at,
        })
    }
}
