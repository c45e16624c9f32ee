//! Domain module for task management.
//!
//! This module contains the task entity and its value objects.

pub mod task;

pub use task::{InvalidTaskId, Task, TaskDraft, TaskId};
