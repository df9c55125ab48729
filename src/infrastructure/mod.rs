//! Infrastructure layer implementing the domain repository traits.
//!
//! # Modules
//!
//! - [`persistence`] - PostgreSQL repository implementations
//! - [`memory`] - In-process implementations used when no database is configured

pub mod memory;
pub mod persistence;
