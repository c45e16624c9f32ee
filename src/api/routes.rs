//! Route configuration for the task API.
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | GET | /api/todos | `list_tasks` |
//! | POST | /api/todos | `create_task` |
//! | GET | /api/todos/{id} | `get_task` |
//! | PUT | /api/todos/{id} | `update_task` |
//! | DELETE | /api/todos/{id} | `delete_task` |
//! | GET | /health | `health_check` |

use axum::Router;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};

use super::handlers::{
    AppState, create_task, delete_task, get_task, health_check, list_tasks, update_task,
};

/// Creates the router with all API routes and a permissive CORS policy.
///
/// Request tracing is layered on by the caller so tests can use the bare
/// router.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/api/todos", get(list_tasks).post(create_task))
        .route(
            "/api/todos/{id}",
            get(get_task).put(update_task).delete(delete_task),
        )
        .layer(cors)
        .with_state(state)
}
