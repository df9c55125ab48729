use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use tokio::sync::RwLock;

use super::Table;
use crate::domain::entities::{NewUser, User};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;

/// In-memory user storage.
#[derive(Debug, Default)]
pub struct MemoryUserRepository {
    table: RwLock<Table<User>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let mut table = self.table.write().await;
        if table
            .rows
            .values()
            .any(|u| u.username == new_user.username)
        {
            return Err(AppError::conflict(
                "Username already taken",
                json!({ "username": new_user.username }),
            ));
        }

        let user = User {
            id: table.allocate_id(),
            username: new_user.username,
            password_hash: new_user.password_hash,
            created_at: Utc::now(),
        };
        table.rows.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let table = self.table.read().await;
        Ok(table.rows.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<User>, AppError> {
        let table = self.table.read().await;
        Ok(table.rows.values().cloned().collect())
    }
}
