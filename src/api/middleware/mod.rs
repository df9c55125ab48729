//! HTTP middleware for request processing.
//!
//! Provides authentication, resource id and observability middleware.

pub mod auth;
pub mod resource_id;
pub mod tracing;
