//! Todo management service.

use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::{NewTodo, Todo, TodoPatch};
use crate::domain::repositories::TodoRepository;
use crate::error::AppError;

/// Service for the todo resource.
///
/// All operations are scoped to the calling user; another user's todo is
/// reported as not found.
pub struct TodoService {
    repository: Arc<dyn TodoRepository>,
}

impl TodoService {
    /// Creates a new todo service.
    pub fn new(repository: Arc<dyn TodoRepository>) -> Self {
        Self { repository }
    }

    /// Lists the owner's todos, newest first.
    pub async fn list_todos(
        &self,
        owner_id: i64,
        completed: Option<bool>,
    ) -> Result<Vec<Todo>, AppError> {
        self.repository.list(owner_id, completed).await
    }

    /// Creates a todo.
    ///
    /// The title is trimmed; a blank title is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the title is blank.
    pub async fn create_todo(
        &self,
        owner_id: i64,
        title: String,
        description: String,
        completed: bool,
    ) -> Result<Todo, AppError> {
        let new_todo = NewTodo {
            owner_id,
            title: normalize_title(&title)?,
            description,
            completed,
        };

        let todo = self.repository.create(new_todo).await?;
        tracing::info!(todo_id = todo.id, owner_id, "Todo created");
        Ok(todo)
    }

    /// Retrieves one todo.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the todo is missing or not owned by `owner_id`.
    pub async fn get_todo(&self, id: i64, owner_id: i64) -> Result<Todo, AppError> {
        self.repository
            .find_by_id(id, owner_id)
            .await?
            .ok_or_else(|| todo_not_found(id))
    }

    /// Applies a partial update.
    ///
    /// An empty patch is a no-op that returns the current state.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if a blank title is supplied.
    /// Returns [`AppError::NotFound`] if the todo does not exist for this owner.
    pub async fn update_todo(
        &self,
        id: i64,
        owner_id: i64,
        mut patch: TodoPatch,
    ) -> Result<Todo, AppError> {
        if patch.is_empty() {
            return self.get_todo(id, owner_id).await;
        }

        if let Some(title) = patch.title.as_deref() {
            patch.title = Some(normalize_title(title)?);
        }

        let todo = self
            .repository
            .update(id, owner_id, patch)
            .await?
            .ok_or_else(|| todo_not_found(id))?;

        tracing::debug!(todo_id = id, owner_id, "Todo updated");
        Ok(todo)
    }

    /// Replaces every writable field of a todo.
    pub async fn replace_todo(
        &self,
        id: i64,
        owner_id: i64,
        title: String,
        description: String,
        completed: bool,
    ) -> Result<Todo, AppError> {
        let patch = TodoPatch {
            title: Some(title),
            description: Some(description),
            completed: Some(completed),
        };
        self.update_todo(id, owner_id, patch).await
    }

    /// Deletes a todo.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the todo does not exist for this owner.
    pub async fn delete_todo(&self, id: i64, owner_id: i64) -> Result<(), AppError> {
        if !self.repository.delete(id, owner_id).await? {
            return Err(todo_not_found(id));
        }

        tracing::info!(todo_id = id, owner_id, "Todo deleted");
        Ok(())
    }

    /// Counts todos, optionally for a single owner.
    pub async fn count_todos(&self, owner_id: Option<i64>) -> Result<i64, AppError> {
        self.repository.count(owner_id).await
    }
}

fn todo_not_found(id: i64) -> AppError {
    AppError::not_found("Todo not found", json!({ "id": id }))
}

fn normalize_title(title: &str) -> Result<String, AppError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(AppError::bad_request(
            "Validation failed",
            json!({ "title": ["Title must not be blank"] }),
        ));
    }
    Ok(trimmed.to_string())
}
