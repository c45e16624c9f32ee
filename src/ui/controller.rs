//! Drives a [`ViewState`] against a [`TodoApi`].

use std::mem;

use crate::client::TodoApi;

use super::view_model::{Action, Request, ViewState, reduce, request_for};

/// Owns the view state and executes the requests actions trigger.
///
/// Outcomes of requests are fed back through the reducer, so every state
/// change still happens in [`reduce`].
#[derive(Debug)]
pub struct TodoView<A> {
    api: A,
    state: ViewState,
}

impl<A: TodoApi> TodoView<A> {
    /// Creates a controller with the list initially shown or hidden.
    pub fn new(api: A, list_visible: bool) -> Self {
        Self {
            api,
            state: ViewState::new(list_visible),
        }
    }

    /// Returns the current view state.
    pub const fn state(&self) -> &ViewState {
        &self.state
    }

    /// Returns the underlying API.
    pub const fn api(&self) -> &A {
        &self.api
    }

    /// Performs the initial fetch if the list starts out visible.
    pub async fn open(&mut self) {
        if self.state.list_visible {
            self.dispatch(Action::Refresh).await;
        }
    }

    /// Applies an action, then runs any request it triggers to completion.
    pub async fn dispatch(&mut self, action: Action) {
        let mut next = Some(action);
        while let Some(action) = next.take() {
            let request = request_for(&self.state, &action);
            self.state = reduce(mem::take(&mut self.state), action);
            if let Some(request) = request {
                next = Some(self.execute(request).await);
            }
        }
    }

    async fn execute(&self, request: Request) -> Action {
        match request {
            Request::List => match self.api.list().await {
                Ok(tasks) => Action::TasksLoaded(tasks),
                Err(error) => {
                    tracing::error!(error = %error, "Failed to load tasks");
                    Action::LoadFailed
                }
            },
            Request::Create(draft) => match self.api.create(draft).await {
                Ok(task) => {
                    tracing::debug!(task_id = %task.id, "Task created");
                    Action::Saved
                }
                Err(error) => {
                    tracing::warn!(error = %error, "Failed to create task");
                    Action::SaveFailed
                }
            },
            Request::Update(id, draft) => match self.api.update(id, draft).await {
                Ok(_) => {
                    tracing::debug!(task_id = %id, "Task updated");
                    Action::Saved
                }
                Err(error) => {
                    tracing::warn!(task_id = %id, error = %error, "Failed to update task");
                    Action::SaveFailed
                }
            },
            Request::Delete(id) => match self.api.delete(id).await {
                Ok(()) => {
                    tracing::debug!(task_id = %id, "Task deleted");
                    Action::Deleted(id)
                }
                Err(error) => {
                    tracing::warn!(task_id = %id, error = %error, "Failed to delete task");
                    Action::DeleteFailed
                }
            },
        }
    }
}
