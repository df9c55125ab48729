//! Note entity.

use chrono::{DateTime, Utc};

/// A note written by a single user.
#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    pub id: i64,
    pub author_id: i64,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Input data for creating a note.
#[derive(Debug, Clone, PartialEq)]
pub struct NewNote {
    pub author_id: i64,
    pub title: String,
    pub content: String,
}
