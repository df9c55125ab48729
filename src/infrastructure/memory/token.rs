use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use tokio::sync::RwLock;

use super::Table;
use crate::domain::repositories::{ApiToken, TokenRepository};
use crate::error::AppError;

/// In-memory API token storage.
#[derive(Debug, Default)]
pub struct MemoryTokenRepository {
    table: RwLock<Table<ApiToken>>,
}

impl MemoryTokenRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TokenRepository for MemoryTokenRepository {
    async fn find_user_id(&self, token_hash: &str) -> Result<Option<i64>, AppError> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .values()
            .find(|t| t.token_hash == token_hash && t.revoked_at.is_none())
            .map(|t| t.user_id))
    }

    async fn update_last_used(&self, token_hash: &str) -> Result<(), AppError> {
        let mut table = self.table.write().await;
        if let Some(token) = table
            .rows
            .values_mut()
            .find(|t| t.token_hash == token_hash && t.revoked_at.is_none())
        {
            token.last_used_at = Some(Utc::now());
        }
        Ok(())
    }

    async fn create_token(
        &self,
        user_id: i64,
        name: &str,
        token_hash: &str,
    ) -> Result<ApiToken, AppError> {
        let mut table = self.table.write().await;
        if table.rows.values().any(|t| t.token_hash == token_hash) {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": "api_tokens_token_hash_key" }),
            ));
        }

        let token = ApiToken {
            id: table.allocate_id(),
            user_id,
            name: name.to_string(),
            token_hash: token_hash.to_string(),
            created_at: Utc::now(),
            last_used_at: None,
            revoked_at: None,
        };
        table.rows.insert(token.id, token.clone());
        Ok(token)
    }

    async fn list_tokens(&self, user_id: Option<i64>) -> Result<Vec<ApiToken>, AppError> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .values()
            .rev()
            .filter(|t| user_id.is_none_or(|u| t.user_id == u))
            .cloned()
            .collect())
    }

    async fn revoke_by_hash(&self, token_hash: &str) -> Result<bool, AppError> {
        let mut table = self.table.write().await;
        match table
            .rows
            .values_mut()
            .find(|t| t.token_hash == token_hash && t.revoked_at.is_none())
        {
            Some(token) => {
                token.revoked_at = Some(Utc::now());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn revoke_token(&self, id: i64) -> Result<bool, AppError> {
        let mut table = self.table.write().await;
        match table
            .rows
            .get_mut(&id)
            .filter(|t| t.revoked_at.is_none())
        {
            Some(token) => {
                token.revoked_at = Some(Utc::now());
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
