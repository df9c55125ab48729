//! DTOs for the todo endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};
use validator::{Validate, ValidationError};

use crate::domain::entities::{Todo, TodoPatch};

/// Request body for `POST /api/todos` and `PUT /api/todos/{id}`.
///
/// `description` defaults to an empty string and `completed` to `false`, so a
/// PUT without them resets both.
#[derive(Debug, Deserialize, Validate)]
pub struct TodoRequest {
    #[validate(custom(function = "validate_title"))]
    pub title: String,

    #[serde(default)]
    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: String,

    #[serde(default)]
    pub completed: bool,
}

/// Request body for `PATCH /api/todos/{id}`.
///
/// All fields are optional; only provided fields are changed.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateTodoRequest {
    #[validate(custom(function = "validate_title"))]
    pub title: Option<String>,

    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,

    pub completed: Option<bool>,
}

/// Title length is counted after trimming, the way it is stored.
fn validate_title(title: &str) -> Result<(), ValidationError> {
    let len = title.trim().chars().count();
    if (1..=200).contains(&len) {
        return Ok(());
    }

    let mut err = ValidationError::new("length");
    err.message = Some("Title must be 1-200 characters".into());
    Err(err)
}

impl From<UpdateTodoRequest> for TodoPatch {
    fn from(req: UpdateTodoRequest) -> Self {
        TodoPatch {
            title: req.title,
            description: req.description,
            completed: req.completed,
        }
    }
}

/// Query parameters for `GET /api/todos`.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct TodoListQuery {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub completed: Option<bool>,
}

/// JSON representation of a todo.
#[derive(Debug, Serialize)]
pub struct TodoResponse {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Todo> for TodoResponse {
    fn from(t: Todo) -> Self {
        Self {
            id: t.id,
            title: t.title,
            description: t.description,
            completed: t.completed,
            created_at: t.created_at,
            updated_at: t.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_todo_request_defaults() {
        let req: TodoRequest = serde_json::from_str(r#"{"title": "Walk dog"}"#).unwrap();
        assert_eq!(req.title, "Walk dog");
        assert_eq!(req.description, "");
        assert!(!req.completed);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_todo_request_title_too_long() {
        let req = TodoRequest {
            title: "x".repeat(201),
            description: String::new(),
            completed: false,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_title_length_counted_after_trim() {
        let padded = TodoRequest {
            title: format!("  {}  ", "x".repeat(200)),
            description: String::new(),
            completed: false,
        };
        assert!(padded.validate().is_ok());

        let blank = TodoRequest {
            title: "   ".to_string(),
            description: String::new(),
            completed: false,
        };
        assert!(blank.validate().is_err());

        let patch: UpdateTodoRequest =
            serde_json::from_str(&format!(r#"{{"title": " {} "}}"#, "y".repeat(200))).unwrap();
        assert!(patch.validate().is_ok());
    }

    #[test]
    fn test_update_request_empty_title_rejected() {
        let req: UpdateTodoRequest = serde_json::from_str(r#"{"title": ""}"#).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_update_request_into_patch() {
        let req: UpdateTodoRequest = serde_json::from_str(r#"{"completed": true}"#).unwrap();
        let patch = TodoPatch::from(req);
        assert_eq!(patch.completed, Some(true));
        assert!(patch.title.is_none());
        assert!(patch.description.is_none());
    }

    #[test]
    fn test_list_query_parses_bool() {
        let q: TodoListQuery = serde_json::from_str(r#"{"completed": "true"}"#).unwrap();
        assert_eq!(q.completed, Some(true));

        let q: TodoListQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(q.completed, None);

        assert!(serde_json::from_str::<TodoListQuery>(r#"{"completed": "maybe"}"#).is_err());
    }
}
