//! DTOs for the health check endpoint.

use serde::Serialize;

/// Body of `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `healthy` or `degraded`.
    pub status: &'static str,
    pub version: &'static str,
    pub checks: HealthChecks,
}

#[derive(Debug, Serialize)]
pub struct HealthChecks {
    pub storage: StorageCheck,
}

/// Result of probing the storage backend.
#[derive(Debug, Serialize)]
pub struct StorageCheck {
    /// `postgres` or `memory`.
    pub backend: &'static str,
    /// `ok` or `error`.
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl StorageCheck {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}
