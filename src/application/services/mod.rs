//! Business logic services for the application layer.

pub mod auth_service;
pub mod note_service;
pub mod todo_service;

pub use auth_service::AuthService;
pub use note_service::NoteService;
pub use todo_service::TodoService;
