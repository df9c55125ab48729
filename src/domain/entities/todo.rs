//! Todo entity.

use chrono::{DateTime, Utc};

/// A task owned by a single user.
#[derive(Debug, Clone, PartialEq)]
pub struct Todo {
    pub id: i64,
    pub owner_id: i64,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input data for creating a todo.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTodo {
    pub owner_id: i64,
    pub title: String,
    pub description: String,
    pub completed: bool,
}

/// Partial update for an existing todo.
///
/// `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TodoPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
}

impl TodoPatch {
    /// Returns true if the patch would change nothing.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.completed.is_none()
    }

    /// Applies the patch to a todo in place.
    ///
    /// Does not touch `updated_at`; the repository owns timestamps.
    pub fn apply_to(&self, todo: &mut Todo) {
        if let Some(title) = &self.title {
            todo.title = title.clone();
        }
        if let Some(description) = &self.description {
            todo.description = description.clone();
        }
        if let Some(completed) = self.completed {
            todo.completed = completed;
        }
    }
}
