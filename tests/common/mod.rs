//! Common test helpers for integration tests.
//!
//! # Note
//!
//! The `#![allow(dead_code)]` attribute is necessary because Rust compiles each
//! integration test file as a separate crate. Helpers used only by some test
//! files would otherwise generate dead code warnings in the others.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use futures::FutureExt;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use todolist::api::{AppState, create_router};
use todolist::domain::{Task, TaskDraft, TaskId};
use todolist::infrastructure::{InMemoryTaskStore, StoreError, StoreFuture, TaskStore};

// =============================================================================
// AppState Creation Helpers
// =============================================================================

/// Creates a test `AppState` backed by an empty in-memory store.
pub fn create_test_app_state() -> AppState {
    AppState::new(Arc::new(InMemoryTaskStore::new()))
}

/// Creates a router whose store fails every operation.
pub fn create_failing_router() -> Router {
    create_router(AppState::new(Arc::new(FailingTaskStore)))
}

/// Store that rejects every call, simulating a lost database.
#[derive(Debug, Clone, Copy)]
pub struct FailingTaskStore;

pub const FAILURE_MESSAGE: &str = "connection refused";

fn fail<'a, T: Send + 'a>() -> StoreFuture<'a, T> {
    async { Err(StoreError::Database(FAILURE_MESSAGE.to_string())) }.boxed()
}

impl TaskStore for FailingTaskStore {
    fn list(&self) -> StoreFuture<'_, Vec<Task>> {
        fail()
    }

    fn find_by_id(&self, _id: TaskId) -> StoreFuture<'_, Option<Task>> {
        fail()
    }

    fn create(&self, _draft: TaskDraft) -> StoreFuture<'_, Task> {
        fail()
    }

    fn update(&self, _id: TaskId, _draft: TaskDraft) -> StoreFuture<'_, Option<Task>> {
        fail()
    }

    fn delete(&self, _id: TaskId) -> StoreFuture<'_, bool> {
        fail()
    }
}

// =============================================================================
// Request Helpers
// =============================================================================

/// Sends a request through the router and returns the status and JSON body.
///
/// Empty bodies decode as `Value::Null`.
pub async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("valid request");

    let response = router
        .clone()
        .oneshot(request)
        .await
        .expect("router is infallible");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body collects")
        .to_bytes();

    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("JSON body")
    };
    (status, json)
}
