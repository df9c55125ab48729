//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to one resource or concern.

pub mod auth;
pub mod health;
pub mod index;
pub mod notes;
pub mod todos;

pub use auth::{login_handler, logout_handler, register_handler};
pub use health::health_handler;
pub use index::index_handler;
pub use notes::{create_note_handler, delete_note_handler, list_notes_handler};
pub use todos::{
    create_todo_handler, delete_todo_handler, get_todo_handler, list_todos_handler,
    replace_todo_handler, update_todo_handler,
};
