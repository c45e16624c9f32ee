//! HTTP handlers for the task API.
//!
//! Each handler performs exactly one store operation and maps its outcome
//! onto a status code. The store handle arrives through [`AppState`]; no
//! handler keeps state between requests.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use super::dto::{TaskRequest, TaskResponse};
use super::error::ApiErrorResponse;
use crate::domain::TaskId;
use crate::infrastructure::TaskStore;

// =============================================================================
// Application State
// =============================================================================

/// Shared handler dependencies.
#[derive(Clone)]
pub struct AppState {
    /// Task store used by every handler.
    pub store: Arc<dyn TaskStore>,
}

impl AppState {
    /// Creates application state around an already constructed store.
    #[must_use]
    pub fn new(store: Arc<dyn TaskStore>) -> Self {
        Self { store }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("AppState")
            .field("store", &"Arc<dyn TaskStore>")
            .finish()
    }
}

// =============================================================================
// Task Handlers
// =============================================================================

/// `GET /api/todos` - lists all tasks, most recently created first.
///
/// # Errors
///
/// Returns 500 if the store fails.
pub async fn list_tasks(
    State(state): State<AppState>,
) -> Result<Json<Vec<TaskResponse>>, ApiErrorResponse> {
    let tasks = state.store.list().await?;
    Ok(Json(tasks.into_iter().map(TaskResponse::from).collect()))
}

/// `GET /api/todos/{id}` - fetches a single task.
///
/// # Errors
///
/// - 400 if `id` is not an integer
/// - 404 if no task has that id
/// - 500 if the store fails
pub async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TaskResponse>, ApiErrorResponse> {
    let id: TaskId = id.parse()?;

    let task = state
        .store
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found(id))?;

    Ok(Json(TaskResponse::from(task)))
}

/// `POST /api/todos` - creates a task.
///
/// # Request Body
///
/// ```json
/// { "title": "Buy milk", "description": "2%" }
/// ```
///
/// # Errors
///
/// - 400 if `title` is missing or blank
/// - 500 if the store fails
pub async fn create_task(
    State(state): State<AppState>,
    Json(request): Json<TaskRequest>,
) -> Result<(StatusCode, Json<TaskResponse>), ApiErrorResponse> {
    let draft = request.validate()?;

    let task = state.store.create(draft).await?;
    tracing::info!(id = %task.id, title = %task.title, "Task created");

    Ok((StatusCode::CREATED, Json(TaskResponse::from(task))))
}

/// `PUT /api/todos/{id}` - replaces title and description of a task.
///
/// # Errors
///
/// - 400 if `id` is not an integer or `title` is missing or blank
/// - 404 if no task has that id
/// - 500 if the store fails
pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<TaskRequest>,
) -> Result<Json<TaskResponse>, ApiErrorResponse> {
    let id: TaskId = id.parse()?;
    let draft = request.validate()?;

    let task = state
        .store
        .update(id, draft)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(id = %task.id, "Task updated");

    Ok(Json(TaskResponse::from(task)))
}

/// `DELETE /api/todos/{id}` - deletes a task.
///
/// Responds 204 whether or not the task existed.
///
/// # Errors
///
/// - 400 if `id` is not an integer
/// - 500 if the store fails
pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiErrorResponse> {
    let id: TaskId = id.parse()?;

    let removed = state.store.delete(id).await?;
    tracing::info!(%id, removed, "Task delete processed");

    Ok(StatusCode::NO_CONTENT)
}

fn not_found(id: TaskId) -> ApiErrorResponse {
    ApiErrorResponse::not_found(format!("Task {id} not found"))
}

// =============================================================================
// GET /health Handler
// =============================================================================

/// Health check response body.
#[derive(Debug, Clone, serde::Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: &'static str,
    /// Service version.
    pub version: &'static str,
}

/// Health check endpoint.
///
/// Does not touch the store.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

// =============================================================================
// Tests
// =============================================================================
