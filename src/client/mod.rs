//! Client side of the task API.
//!
//! [`TodoApi`] is the seam between the view controller and the network;
//! [`HttpTodoApi`] is the production implementation.

pub mod http;

use futures::future::BoxFuture;
use thiserror::Error;

use crate::domain::{Task, TaskDraft, TaskId};

pub use http::HttpTodoApi;

/// Errors raised by a [`TodoApi`] call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClientError {
    /// The request never produced a response.
    #[error("Request failed: {0}")]
    Transport(String),

    /// The server answered with a non-success status.
    #[error("Server responded {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body did not match the expected shape.
    #[error("Malformed response: {0}")]
    Decode(String),
}

/// Future returned by every [`TodoApi`] call.
pub type ClientFuture<'a, T> = BoxFuture<'a, Result<T, ClientError>>;

/// The task API as seen from the client.
pub trait TodoApi: Send + Sync {
    /// `GET /api/todos`
    fn list(&self) -> ClientFuture<'_, Vec<Task>>;

    /// `GET /api/todos/{id}`
    fn get(&self, id: TaskId) -> ClientFuture<'_, Task>;

    /// `POST /api/todos`
    fn create(&self, draft: TaskDraft) -> ClientFuture<'_, Task>;

    /// `PUT /api/todos/{id}`
    fn update(&self, id: TaskId, draft: TaskDraft) -> ClientFuture<'_, Task>;

    /// `DELETE /api/todos/{id}`
    fn delete(&self, id: TaskId) -> ClientFuture<'_, ()>;
}
