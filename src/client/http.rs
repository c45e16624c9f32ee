//! HTTP implementation of [`TodoApi`] using `reqwest`.

use futures::FutureExt;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;

use super::{ClientError, ClientFuture, TodoApi};
use crate::api::{ApiError, TaskRequest, TaskResponse};
use crate::domain::{Task, TaskDraft, TaskId};

/// Default base URL of the task API.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Talks to a running task API over HTTP.
#[derive(Debug, Clone)]
pub struct HttpTodoApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTodoApi {
    /// Creates a client for the API rooted at `base_url`.
    ///
    /// A trailing slash on `base_url` is ignored.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Returns the collection URL, `{base}/api/todos`.
    #[must_use]
    pub fn collection_url(&self) -> String {
        format!("{}/api/todos", self.base_url)
    }

    /// Returns the item URL, `{base}/api/todos/{id}`.
    #[must_use]
    pub fn item_url(&self, id: TaskId) -> String {
        format!("{}/api/todos/{id}", self.base_url)
    }
}

impl Default for HttpTodoApi {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl HttpTodoApi {
    async fn list_tasks(&self) -> Result<Vec<Task>, ClientError> {
        let response = send(self.client.get(self.collection_url())).await?;
        let tasks: Vec<TaskResponse> = decode(response).await?;
        Ok(tasks.into_iter().map(Task::from).collect())
    }

    async fn get_task(&self, id: TaskId) -> Result<Task, ClientError> {
        let response = send(self.client.get(self.item_url(id))).await?;
        decode::<TaskResponse>(response).await.map(Task::from)
    }

    async fn create_task(&self, draft: TaskDraft) -> Result<Task, ClientError> {
        let body = TaskRequest::from_draft(&draft);
        let response = send(self.client.post(self.collection_url()).json(&body)).await?;
        decode::<TaskResponse>(response).await.map(Task::from)
    }

    async fn update_task(&self, id: TaskId, draft: TaskDraft) -> Result<Task, ClientError> {
        let body = TaskRequest::from_draft(&draft);
        let response = send(self.client.put(self.item_url(id)).json(&body)).await?;
        decode::<TaskResponse>(response).await.map(Task::from)
    }

    async fn delete_task(&self, id: TaskId) -> Result<(), ClientError> {
        let response = send(self.client.delete(self.item_url(id))).await?;
        ensure_success(response).await.map(drop)
    }
}

impl TodoApi for HttpTodoApi {
    fn list(&self) -> ClientFuture<'_, Vec<Task>> {
        self.list_tasks().boxed()
    }

    fn get(&self, id: TaskId) -> ClientFuture<'_, Task> {
        self.get_task(id).boxed()
    }

    fn create(&self, draft: TaskDraft) -> ClientFuture<'_, Task> {
        self.create_task(draft).boxed()
    }

    fn update(&self, id: TaskId, draft: TaskDraft) -> ClientFuture<'_, Task> {
        self.update_task(id, draft).boxed()
    }

    fn delete(&self, id: TaskId) -> ClientFuture<'_, ()> {
        self.delete_task(id).boxed()
    }
}

async fn send(request: reqwest::RequestBuilder) -> Result<Response, ClientError> {
    request
        .send()
        .await
        .map_err(|error| ClientError::Transport(error.to_string()))
}

/// Converts a non-success response into `ClientError::Status`.
///
/// The `{error}` body is used as the message when present.
async fn ensure_success(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = match response.json::<ApiError>().await {
        Ok(body) => body.error,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("unknown status")
            .to_string(),
    };

    Err(ClientError::Status {
        status: status.as_u16(),
        message,
    })
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let response = ensure_success(response).await?;
    if response.status() == StatusCode::NO_CONTENT {
        return Err(ClientError::Decode("expected a body, got 204".to_string()));
    }
    response
        .json()
        .await
        .map_err(|error| ClientError::Decode(error.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("http://localhost:3000")]
    #[case("http://localhost:3000/")]
    fn test_urls_ignore_trailing_slash(#[case] base: &str) {
        let api = HttpTodoApi::new(base);

        assert_eq!(api.collection_url(), "http://localhost:3000/api/todos");
        assert_eq!(
            api.item_url(TaskId::new(7)),
            "http://localhost:3000/api/todos/7"
        );
    }

    #[rstest]
    fn test_default_points_at_local_server() {
        assert_eq!(
            HttpTodoApi::default().collection_url(),
            format!("{DEFAULT_BASE_URL}/api/todos")
        );
    }
}
