use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::Table;
use crate::domain::entities::{NewTodo, Todo, TodoPatch};
use crate::domain::repositories::TodoRepository;
use crate::error::AppError;

/// In-memory todo storage.
#[derive(Debug, Default)]
pub struct MemoryTodoRepository {
    table: RwLock<Table<Todo>>,
}

impl MemoryTodoRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoRepository for MemoryTodoRepository {
    async fn create(&self, new_todo: NewTodo) -> Result<Todo, AppError> {
        let mut table = self.table.write().await;
        let now = Utc::now();
        let todo = Todo {
            id: table.allocate_id(),
            owner_id: new_todo.owner_id,
            title: new_todo.title,
            description: new_todo.description,
            completed: new_todo.completed,
            created_at: now,
            updated_at: now,
        };
        table.rows.insert(todo.id, todo.clone());
        Ok(todo)
    }

    async fn find_by_id(&self, id: i64, owner_id: i64) -> Result<Option<Todo>, AppError> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .get(&id)
            .filter(|t| t.owner_id == owner_id)
            .cloned())
    }

    async fn list(&self, owner_id: i64, completed: Option<bool>) -> Result<Vec<Todo>, AppError> {
        let table = self.table.read().await;
        // Ids grow with insertion order, so reverse id order is newest first.
        Ok(table
            .rows
            .values()
            .rev()
            .filter(|t| t.owner_id == owner_id)
            .filter(|t| completed.is_none_or(|c| t.completed == c))
            .cloned()
            .collect())
    }

    async fn update(
        &self,
        id: i64,
        owner_id: i64,
        patch: TodoPatch,
    ) -> Result<Option<Todo>, AppError> {
        let mut table = self.table.write().await;
        let Some(todo) = table
            .rows
            .get_mut(&id)
            .filter(|t| t.owner_id == owner_id)
        else {
            return Ok(None);
        };

        patch.apply_to(todo);
        todo.updated_at = Utc::now();
        Ok(Some(todo.clone()))
    }

    async fn delete(&self, id: i64, owner_id: i64) -> Result<bool, AppError> {
        let mut table = self.table.write().await;
        let owned = table.rows.get(&id).is_some_and(|t| t.owner_id == owner_id);
        if owned {
            table.rows.remove(&id);
        }
        Ok(owned)
    }

    async fn count(&self, owner_id: Option<i64>) -> Result<i64, AppError> {
        let table = self.table.read().await;
        let count = table
            .rows
            .values()
            .filter(|t| owner_id.is_none_or(|o| t.owner_id == o))
            .count();
        Ok(count as i64)
    }
}
