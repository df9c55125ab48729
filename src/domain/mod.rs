//! Domain layer containing business entities and repository contracts.
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. Repository traits are implemented in [`crate::infrastructure`];
//! business rules live in [`crate::application::services`].
//!
//! - [`entities`] - Core data structures
//! - [`repositories`] - Data access trait definitions

pub mod entities;
pub mod repositories;
