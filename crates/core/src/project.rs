//! Project status values and field validation rules.
//!
//! The API layer runs every create/update payload through these helpers
//! before anything reaches the database, so the `projects` table only ever
//! holds one of the four [`ProjectStatus`] values and non-blank names.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum length (in characters) of `name` and `client`.
///
/// Matches the `VARCHAR(255)` columns in the `projects` table.
pub const MAX_TEXT_FIELD_LENGTH: usize = 255;

/// All valid status strings, in lifecycle order.
pub const VALID_STATUSES: &[&str] = &["draft", "in_progress", "delivered", "archived"];

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Lifecycle status of a project, stored as text in the `status` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    #[default]
    Draft,
    InProgress,
    Delivered,
    Archived,
}

impl ProjectStatus {
    /// Return the status as its wire/database string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::InProgress => "in_progress",
            Self::Delivered => "delivered",
            Self::Archived => "archived",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "in_progress" => Ok(Self::InProgress),
            "delivered" => Ok(Self::Delivered),
            "archived" => Ok(Self::Archived),
            other => Err(CoreError::Validation(format!(
                "Invalid status '{other}'. Must be one of: {}",
                VALID_STATUSES.join(", ")
            ))),
        }
    }
}

/// Used when decoding the `status` column.
impl TryFrom<String> for ProjectStatus {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Resolve an optional status from a request body.
///
/// A missing or empty status means [`ProjectStatus::Draft`]; anything else
/// must be one of [`VALID_STATUSES`].
pub fn parse_status(value: Option<&str>) -> Result<ProjectStatus, CoreError> {
    match value {
        None | Some("") => Ok(ProjectStatus::default()),
        Some(s) => s.parse(),
    }
}

// ---------------------------------------------------------------------------
// Field validation
// ---------------------------------------------------------------------------

/// Validate a required text field such as `name` or `client`.
///
/// Rejects a missing value, a value that is empty after trimming, a value
/// holding a NUL character, and a value longer than
/// [`MAX_TEXT_FIELD_LENGTH`] characters.
pub fn validate_required_text(field: &str, value: Option<&str>) -> Result<(), CoreError> {
    let value = value.ok_or_else(|| CoreError::Validation(format!("{field} is required")))?;

    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }

    validate_text_bytes(field, value)?;

    if value.chars().count() > MAX_TEXT_FIELD_LENGTH {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {MAX_TEXT_FIELD_LENGTH} characters"
        )));
    }

    Ok(())
}

/// Reject text PostgreSQL cannot store: `text`/`varchar` columns refuse NUL.
pub fn validate_text_bytes(field: &str, value: &str) -> Result<(), CoreError> {
    if value.contains('\0') {
        return Err(CoreError::Validation(format!("{field} must not contain NUL characters")));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
