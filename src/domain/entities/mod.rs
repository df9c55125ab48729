//! Core domain entities.
//!
//! Entities are plain data structures. Each has a companion `New*` struct used
//! for creation; todos additionally have [`TodoPatch`] for partial updates.
//!
//! # Entity Types
//!
//! - [`Todo`] - A task with a completion flag
//! - [`Note`] - A titled free-form note
//! - [`User`] - An account that owns todos and notes

pub mod note;
pub mod todo;
pub mod user;

pub use note::{NewNote, Note};
pub use todo::{NewTodo, Todo, TodoPatch};
pub use user::{NewUser, User};
