//! In-memory store implementation.
//!
//! Suitable for development and tests. Identifiers are allocated from a
//! monotonically increasing counter, so a deleted id is never handed out
//! again, matching a database sequence.

use std::collections::BTreeMap;
use std::sync::Arc;

use futures::FutureExt;
use tokio::sync::RwLock;

use crate::domain::{Task, TaskDraft, TaskId};
use crate::infrastructure::{StoreFuture, TaskStore};

#[derive(Debug)]
struct InMemoryState {
    /// Last id handed out; the next insert uses `last_id + 1`.
    last_id: i64,
    tasks: BTreeMap<TaskId, Task>,
}

/// In-memory implementation of `TaskStore`.
///
/// Cloning shares the underlying storage.
///
/// # Example
///
/// ```ignore
/// let store = InMemoryTaskStore::new();
/// let task = store.create(TaskDraft::new("Buy milk", None)).await?;
/// assert_eq!(task.id, TaskId::new(1));
/// ```
#[derive(Debug, Clone)]
pub struct InMemoryTaskStore {
    state: Arc<RwLock<InMemoryState>>,
}

impl InMemoryTaskStore {
    /// Creates a new empty store whose first id will be `1`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryState {
                last_id: 0,
                tasks: BTreeMap::new(),
            })),
        }
    }
}

impl Default for InMemoryTaskStore {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(clippy::significant_drop_tightening)]
impl TaskStore for InMemoryTaskStore {
    fn list(&self) -> StoreFuture<'_, Vec<Task>> {
        async move {
            let guard = self.state.read().await;
            Ok(guard.tasks.values().rev().cloned().collect())
        }
        .boxed()
    }

    fn find_by_id(&self, id: TaskId) -> StoreFuture<'_, Option<Task>> {
        async move {
            let guard = self.state.read().await;
            Ok(guard.tasks.get(&id).cloned())
        }
        .boxed()
    }

    fn create(&self, draft: TaskDraft) -> StoreFuture<'_, Task> {
        async move {
            let mut guard = self.state.write().await;
            guard.last_id += 1;
            let task = draft.into_task(TaskId::new(guard.last_id));
            guard.tasks.insert(task.id, task.clone());
            Ok(task)
        }
        .boxed()
    }

    fn update(&self, id: TaskId, draft: TaskDraft) -> StoreFuture<'_, Option<Task>> {
        async move {
            let mut guard = self.state.write().await;
            let updated = guard.tasks.remove(&id).map(|task| task.apply(draft));
            if let Some(task) = &updated {
                guard.tasks.insert(id, task.clone());
            }
            Ok(updated)
        }
        .boxed()
    }

    fn delete(&self, id: TaskId) -> StoreFuture<'_, bool> {
        async move {
            let mut guard = self.state.write().await;
            Ok(guard.tasks.remove(&id).is_some())
        }
        .boxed()
    }
}

// =============================================================================
// Tests
// =============================================================================
