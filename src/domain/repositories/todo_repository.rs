//! Repository trait for todo data access.

use crate::domain::entities::{NewTodo, Todo, TodoPatch};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for todos.
///
/// Every lookup is scoped by `owner_id`: a todo owned by someone else behaves
/// exactly like a missing one.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgTodoRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::memory::MemoryTodoRepository`] - In-process implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// Creates a new todo.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn create(&self, new_todo: NewTodo) -> Result<Todo, AppError>;

    /// Finds a todo by id within the owner's todos.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Todo))` if found
    /// - `Ok(None)` if missing or owned by another user
    async fn find_by_id(&self, id: i64, owner_id: i64) -> Result<Option<Todo>, AppError>;

    /// Lists the owner's todos, newest first.
    ///
    /// `completed` filters by completion state when set.
    async fn list(&self, owner_id: i64, completed: Option<bool>) -> Result<Vec<Todo>, AppError>;

    /// Applies a partial update and bumps `updated_at`.
    ///
    /// Returns `Ok(None)` if no todo matches `id` + `owner_id`.
    async fn update(
        &self,
        id: i64,
        owner_id: i64,
        patch: TodoPatch,
    ) -> Result<Option<Todo>, AppError>;

    /// Deletes a todo.
    ///
    /// Returns `Ok(true)` if a row was removed, `Ok(false)` if not found.
    async fn delete(&self, id: i64, owner_id: i64) -> Result<bool, AppError>;

    /// Counts todos, optionally for a single owner.
    async fn count(&self, owner_id: Option<i64>) -> Result<i64, AppError>;
}
