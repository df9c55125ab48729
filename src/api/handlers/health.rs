//! Handler for the health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{HealthChecks, HealthResponse, StorageCheck};
use crate::state::AppState;

/// Reports whether the storage backend is usable.
///
/// # Endpoint
///
/// `GET /health` (outside `/api`, no authentication)
///
/// # Response Codes
///
/// - **200 OK**: storage reachable
/// - **503 Service Unavailable**: storage check failed, `status` is `degraded`
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "storage": { "backend": "postgres", "status": "ok" }
///   }
/// }
/// ```
pub async fn health_handler(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let storage = check_storage(&state).await;

    let (code, status) = if storage.is_ok() {
        (StatusCode::OK, "healthy")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    (
        code,
        Json(HealthResponse {
            status,
            version: env!("CARGO_PKG_VERSION"),
            checks: HealthChecks { storage },
        }),
    )
}

/// Reported in place of the driver error, which stays in the log.
const STORAGE_UNREACHABLE: &str = "Storage backend unreachable";

async fn check_storage(state: &AppState) -> StorageCheck {
    let Some(pool) = &state.db else {
        return StorageCheck {
            backend: "memory",
            status: "ok",
            message: None,
        };
    };

    match sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(pool.as_ref())
        .await
    {
        Ok(_) => StorageCheck {
            backend: "postgres",
            status: "ok",
            message: None,
        },
        Err(e) => {
            tracing::warn!(error = %e, "Health check: database unreachable");
            StorageCheck {
                backend: "postgres",
                status: "error",
                message: Some(STORAGE_UNREACHABLE.to_string()),
            }
        }
    }
}
