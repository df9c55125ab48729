#![allow(dead_code)]

use axum::Router;
use axum_test::TestServer;
use serde_json::{Value, json};
use sqlx::PgPool;
use std::sync::Arc;
use todo_api::api::routes::{API_PREFIX, api_router};
use todo_api::state::AppState;

pub const SIGNING_SECRET: &str = "test-signing-secret";
pub const PASSWORD: &str = "correct horse battery";

pub fn create_test_state() -> AppState {
    AppState::in_memory(SIGNING_SECRET.to_string())
}

pub fn create_pg_state(pool: PgPool) -> AppState {
    AppState::postgres(Arc::new(pool), SIGNING_SECRET.to_string())
}

/// Test server exposing the API router under `/api`.
pub fn make_server(state: AppState) -> TestServer {
    let app = Router::new()
        .nest(API_PREFIX, api_router(state.clone()))
        .with_state(state);
    TestServer::new(app).unwrap()
}

/// Registers `username` through the API and returns its bearer token.
pub async fn register(server: &TestServer, username: &str) -> String {
    let response = server
        .post("/api/auth/register")
        .json(&json!({ "username": username, "password": PASSWORD }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);

    response.json::<Value>()["token"]
        .as_str()
        .unwrap()
        .to_string()
}

pub async fn create_todo(server: &TestServer, token: &str, title: &str) -> Value {
    let response = server
        .post("/api/todos")
        .authorization_bearer(token)
        .json(&json!({ "title": title }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()
}

pub async fn create_note(server: &TestServer, token: &str, title: &str, content: &str) -> Value {
    let response = server
        .post("/api/notes")
        .authorization_bearer(token)
        .json(&json!({ "title": title, "content": content }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()
}

pub async fn create_test_user(pool: &PgPool, username: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO users (username, password_hash) VALUES ($1, 'x') RETURNING id")
        .bind(username)
        .fetch_one(pool)
        .await
        .unwrap()
}
