//! Data Transfer Objects for API requests and responses.

use serde::{Deserialize, Serialize};

use super::error::ValidationError;
use crate::domain::{Task, TaskDraft, TaskId};

/// Request body for both `POST /api/todos` and `PUT /api/todos/{id}`.
///
/// Both fields are optional at the wire level so that a missing title is
/// reported as a validation error rather than a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl TaskRequest {
    /// Creates a request body from a draft.
    #[must_use]
    pub fn from_draft(draft: &TaskDraft) -> Self {
        Self {
            title: Some(draft.title.clone()),
            description: draft.description.clone(),
        }
    }

    /// Validates the request into a draft.
    ///
    /// The title is trimmed; the description is passed through unchanged.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the title is missing, `null`, or blank.
    pub fn validate(self) -> Result<TaskDraft, ValidationError> {
        let title = validate_title(self.title.as_deref())?;
        Ok(TaskDraft::new(title, self.description))
    }
}

/// Validates a task title.
///
/// # Errors
///
/// Returns `ValidationError` if the title is absent or blank.
pub fn validate_title(title: Option<&str>) -> Result<String, ValidationError> {
    title
        .map(str::trim)
        .filter(|title| !title.is_empty())
        .map(str::to_string)
        .ok_or(ValidationError::required("title", "Title is required"))
}

/// Response body for a single task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskResponse {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        Self {
            id: task.id.value(),
            title: task.title,
            description: task.description,
        }
    }
}

impl From<TaskResponse> for Task {
    fn from(response: TaskResponse) -> Self {
        Self::new(TaskId::new(response.id), response.title, response.description)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_validate_keeps_description_verbatim() {
        let request = TaskRequest {
            title: Some("  Buy milk ".to_string()),
            description: Some(" 2% ".to_string()),
        };

        let draft = request.validate().unwrap();

        assert_eq!(draft.title, "Buy milk");
        assert_eq!(draft.description.as_deref(), Some(" 2% "));
    }

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    #[case(Some("   "))]
    fn test_validate_title_rejects_missing_or_blank(#[case] title: Option<&str>) {
        let result = validate_title(title);
        assert_eq!(result.unwrap_err().field, "title");
    }

    #[rstest]
    fn test_request_deserializes_without_fields() {
        let request: TaskRequest = serde_json::from_str("{}").unwrap();
        assert!(request.title.is_none());
        assert!(request.description.is_none());
    }

    #[rstest]
    fn test_request_deserializes_null_description() {
        let request: TaskRequest =
            serde_json::from_str(r#"{"title":"A","description":null}"#).unwrap();
        assert_eq!(request.title.as_deref(), Some("A"));
        assert!(request.description.is_none());
    }

    #[rstest]
    fn test_response_from_task() {
        let task = Task::new(TaskId::new(1), "Buy milk", Some("2%".to_string()));

        let response = TaskResponse::from(task.clone());

        assert_eq!(response.id, 1);
        assert_eq!(Task::from(response), task);
    }
}
