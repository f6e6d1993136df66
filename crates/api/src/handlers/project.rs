//! Handlers for the `/projects` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use devboard_core::error::CoreError;
use devboard_core::types::DbId;
use devboard_db::models::project::{Project, ProjectPayload};
use devboard_db::repositories::ProjectRepo;

use crate::error::{AppError, AppResult};
use crate::extractors::{ValidId, ValidJson};
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Project",
        id,
    })
}

/// POST /api/v1/projects
pub async fn create(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<ProjectPayload>,
) -> AppResult<(StatusCode, Json<Project>)> {
    let input = payload.validate()?;
    let project = ProjectRepo::create(&state.pool, &input).await?;
    tracing::info!(id = project.id, name = %project.name, "Project created");
    Ok((StatusCode::CREATED, Json(project)))
}

/// GET /api/v1/projects
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Project>>> {
    let projects = ProjectRepo::list(&state.pool).await?;
    tracing::debug!(count = projects.len(), "Listed projects");
    Ok(Json(projects))
}

/// GET /api/v1/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    ValidId(id): ValidId,
) -> AppResult<Json<Project>> {
    let project = ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::debug!(id, "Fetched project");
    Ok(Json(project))
}

/// PUT /api/v1/projects/{id}
///
/// Full replacement: optional fields missing from the body are reset to
/// their defaults.
pub async fn update(
    State(state): State<AppState>,
    ValidId(id): ValidId,
    ValidJson(payload): ValidJson<ProjectPayload>,
) -> AppResult<Json<Project>> {
    let input = payload.validate()?;
    let project = ProjectRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(id, status = %project.status, "Project updated");
    Ok(Json(project))
}

/// DELETE /api/v1/projects/{id}
pub async fn delete(State(state): State<AppState>, ValidId(id): ValidId) -> AppResult<StatusCode> {
    if ProjectRepo::delete(&state.pool, id).await? {
        tracing::info!(id, "Project deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
