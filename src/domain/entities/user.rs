//! User account entity.

use chrono::{DateTime, Utc};

/// A registered account.
///
/// `password_hash` is an Argon2 PHC string; the raw password is never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Input data for creating a user.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
}
