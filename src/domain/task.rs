//! Task domain model.
//!
//! A task is the only entity of the application: a store-assigned integer
//! identifier, a required title and an optional free-form description.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// Value Objects - Newtypes
// =============================================================================

/// Unique identifier for a task.
///
/// Identifiers are assigned by the store exactly once, at insertion, and are
/// never reused after the task is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(i64);

impl TaskId {
    /// Wraps a raw identifier value.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw identifier value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Error returned when a path segment is not a valid task identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid task id: '{0}'")]
pub struct InvalidTaskId(pub String);

impl FromStr for TaskId {
    type Err = InvalidTaskId;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        value
            .trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|_| InvalidTaskId(value.to_string()))
    }
}

// =============================================================================
// Task Entity
// =============================================================================

/// A persisted to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Store-assigned identifier.
    pub id: TaskId,
    /// Title of the task.
    pub title: String,
    /// Optional description. `None` when the client omitted it.
    pub description: Option<String>,
}

impl Task {
    /// Creates a task from its persisted fields.
    #[must_use]
    pub fn new(id: TaskId, title: impl Into<String>, description: Option<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description,
        }
    }

    /// Returns a copy of this task with the draft's fields applied.
    ///
    /// The identifier is preserved; title and description are both replaced.
    #[must_use]
    pub fn apply(self, draft: TaskDraft) -> Self {
        Self {
            id: self.id,
            title: draft.title,
            description: draft.description,
        }
    }
}

/// The mutable fields of a task, used for both create and update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDraft {
    /// Title to store.
    pub title: String,
    /// Description to store.
    pub description: Option<String>,
}

impl TaskDraft {
    /// Creates a new draft.
    #[must_use]
    pub fn new(title: impl Into<String>, description: Option<String>) -> Self {
        Self {
            title: title.into(),
            description,
        }
    }

    /// Materializes the draft as a task with the given identifier.
    #[must_use]
    pub fn into_task(self, id: TaskId) -> Task {
        Task {
            id,
            title: self.title,
            description: self.description,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
