//! Store trait for task persistence.
//!
//! Every operation maps to exactly one atomic statement against the backing
//! store. Futures are boxed so the trait stays object-safe and handlers can
//! share a single `Arc<dyn TaskStore>`.

use futures::future::BoxFuture;
use thiserror::Error;

use crate::domain::{Task, TaskDraft, TaskId};

// =============================================================================
// Store Error
// =============================================================================

/// Errors that can occur during store operations.
///
/// Failures are deliberately unclassified: connectivity problems, constraint
/// violations and malformed statements all surface as `Database`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The underlying data layer reported a failure.
    #[error("{0}")]
    Database(String),
}

impl StoreError {
    /// Returns the underlying failure description.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Database(message) => message,
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(error: sqlx::Error) -> Self {
        Self::Database(error.to_string())
    }
}

/// Future returned by every [`TaskStore`] operation.
pub type StoreFuture<'a, T> = BoxFuture<'a, Result<T, StoreError>>;

// =============================================================================
// Task Store
// =============================================================================

/// Persistence operations over the single task relation.
pub trait TaskStore: Send + Sync {
    /// Lists every task, most recently created first (descending id).
    fn list(&self) -> StoreFuture<'_, Vec<Task>>;

    /// Finds a task by its id.
    ///
    /// Returns `Ok(None)` when no row matches.
    fn find_by_id(&self, id: TaskId) -> StoreFuture<'_, Option<Task>>;

    /// Inserts a new task and returns it with its assigned id.
    fn create(&self, draft: TaskDraft) -> StoreFuture<'_, Task>;

    /// Replaces title and description of the task with the given id.
    ///
    /// Returns `Ok(None)` when no row matches.
    fn update(&self, id: TaskId, draft: TaskDraft) -> StoreFuture<'_, Option<Task>>;

    /// Deletes the task with the given id.
    ///
    /// Returns `Ok(true)` if a row was removed, `Ok(false)` if none existed.
    fn delete(&self, id: TaskId) -> StoreFuture<'_, bool>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_store_error_display_is_raw_message() {
        let error = StoreError::Database("connection refused".to_string());
        assert_eq!(format!("{error}"), "connection refused");
        assert_eq!(error.message(), "connection refused");
    }

    #[rstest]
    fn test_store_error_from_sqlx_error() {
        let error = StoreError::from(sqlx::Error::RowNotFound);
        assert!(matches!(error, StoreError::Database(_)));
        assert!(!error.message().is_empty());
    }
}
