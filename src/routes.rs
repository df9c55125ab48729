//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`      - Health check: storage (public)
//! - `/api/*`            - REST API, see [`crate::api::routes::ROUTES`]
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Resource id** - Malformed `{id}` segments answer `404` up front
//! - **Authentication** - Bearer token on protected API routes
//! - **Path normalization** - Trailing slash handling

use crate::api::extract::route_not_found;
use crate::api::handlers::health_handler;
use crate::api::middleware::{resource_id, tracing};
use crate::api::routes::{API_PREFIX, api_router};
use crate::error::AppError;
use crate::state::AppState;
use axum::http::Uri;
use axum::{Router, middleware};
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// Trailing slashes are trimmed before routing, so every route answers both
/// with and without one. Paths matching no route get a JSON `404`, and so do
/// `{id}` paths with a malformed id, before any token or method check.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let router = Router::new()
        .route("/health", get(health_handler))
        .nest(API_PREFIX, api_router(state.clone()))
        .fallback(fallback_handler)
        .with_state(state)
        .layer(middleware::from_fn(resource_id::layer))
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}

async fn fallback_handler(uri: Uri) -> AppError {
    route_not_found(uri.path())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::{Method, Request, StatusCode, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    async fn send(
        app: &NormalizePath<Router>,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    async fn app_with_token() -> (NormalizePath<Router>, String) {
        let state = AppState::in_memory("router-test-secret".to_string());
        let issued = state
            .auth_service
            .register("alice", "correct horse")
            .await
            .unwrap();
        (app_router(state), issued.token)
    }

    #[tokio::test]
    async fn test_trailing_slash_is_optional() {
        let (app, token) = app_with_token().await;

        let (with, _) = send(&app, Method::GET, "/api/todos/", Some(&token), None).await;
        let (without, _) = send(&app, Method::GET, "/api/todos", Some(&token), None).await;

        assert_eq!(with, StatusCode::OK);
        assert_eq!(without, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_non_integer_id_is_not_found() {
        let (app, token) = app_with_token().await;

        for uri in ["/api/todos/abc/", "/api/todos/-1/", "/api/notes/delete/x/"] {
            let method = if uri.contains("notes") {
                Method::DELETE
            } else {
                Method::GET
            };
            let (status, body) = send(&app, method, uri, Some(&token), None).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
            assert_eq!(body["error"]["code"], "not_found");
        }
    }

    #[tokio::test]
    async fn test_malformed_id_without_token_is_not_found() {
        let (app, _) = app_with_token().await;

        for (method, uri) in [
            (Method::DELETE, "/api/notes/delete/abc/"),
            (Method::GET, "/api/todos/-1/"),
            (Method::PATCH, "/api/todos/abc"),
        ] {
            let (status, body) = send(&app, method, uri, None, None).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
            assert_eq!(body["error"]["code"], "not_found");
        }
    }

    #[tokio::test]
    async fn test_malformed_id_with_unsupported_method_is_not_found() {
        let (app, token) = app_with_token().await;

        let (status, body) = send(&app, Method::POST, "/api/todos/abc/", Some(&token), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "not_found");

        let (status, _) = send(&app, Method::GET, "/api/notes/delete/x/", None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_valid_id_still_checks_token_and_method() {
        let (app, token) = app_with_token().await;

        let (status, _) = send(&app, Method::GET, "/api/todos/1/", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = send(&app, Method::POST, "/api/todos/1/", Some(&token), None).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_unknown_path_is_json_not_found() {
        let (app, _) = app_with_token().await;

        let (status, body) = send(&app, Method::GET, "/api/nope/", None, None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "not_found");
    }

    #[tokio::test]
    async fn test_note_item_path_has_no_detail_route() {
        let (app, token) = app_with_token().await;

        let (status, _) = send(&app, Method::DELETE, "/api/notes/5/", Some(&token), None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_protected_route_requires_token() {
        let (app, _) = app_with_token().await;

        let (status, body) = send(&app, Method::GET, "/api/notes/", None, None).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["code"], "unauthorized");
    }

    #[tokio::test]
    async fn test_create_then_fetch_through_router() {
        let (app, token) = app_with_token().await;

        let (status, created) = send(
            &app,
            Method::POST,
            "/api/todos/",
            Some(&token),
            Some(json!({ "title": "Buy milk" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let uri = format!("/api/todos/{}/", created["id"]);
        let (status, fetched) = send(&app, Method::GET, &uri, Some(&token), None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["title"], "Buy milk");
    }

    #[tokio::test]
    async fn test_index_is_public() {
        let (app, _) = app_with_token().await;

        let (status, body) = send(&app, Method::GET, "/api/", None, None).await;

        assert_eq!(status, StatusCode::OK);
        let routes = body["routes"].as_array().unwrap();
        assert!(routes.iter().any(|r| r["name"] == "delete-note"
            && r["method"] == "DELETE"
            && r["path"] == "/api/notes/delete/{id}/"));
    }
}
