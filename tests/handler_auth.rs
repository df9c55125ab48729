mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};

#[tokio::test]
async fn test_register_returns_token_and_user() {
    let server = common::make_server(common::create_test_state());

    let response = server
        .post("/api/auth/register")
        .json(&json!({ "username": "alice@example.com", "password": common::PASSWORD }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body = response.json::<Value>();
    assert_eq!(body["user"]["username"], "alice@example.com");
    assert_eq!(body["token"].as_str().unwrap().len(), 43);
    assert!(body["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let server = common::make_server(common::create_test_state());
    common::register(&server, "alice").await;

    let response = server
        .post("/api/auth/register")
        .json(&json!({ "username": "alice", "password": common::PASSWORD }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
    assert_eq!(response.json::<Value>()["error"]["code"], "conflict");
}

#[tokio::test]
async fn test_register_validation() {
    let server = common::make_server(common::create_test_state());

    for payload in [
        json!({ "username": "", "password": common::PASSWORD }),
        json!({ "username": "has space", "password": common::PASSWORD }),
        json!({ "username": "alice", "password": "short" }),
    ] {
        server
            .post("/api/auth/register")
            .json(&payload)
            .await
            .assert_status_bad_request();
    }
}

#[tokio::test]
async fn test_login_issues_working_token() {
    let server = common::make_server(common::create_test_state());
    let first = common::register(&server, "alice").await;

    let response = server
        .post("/api/auth/login")
        .json(&json!({ "username": "alice", "password": common::PASSWORD }))
        .await;

    response.assert_status_ok();
    let token = response.json::<Value>()["token"]
        .as_str()
        .unwrap()
        .to_string();
    assert_ne!(token, first);

    server
        .get("/api/todos")
        .authorization_bearer(&token)
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_login_wrong_password() {
    let server = common::make_server(common::create_test_state());
    common::register(&server, "alice").await;

    let response = server
        .post("/api/auth/login")
        .json(&json!({ "username": "alice", "password": "not the password" }))
        .await;

    response.assert_status_unauthorized();
    assert_eq!(response.json::<Value>()["error"]["code"], "unauthorized");
}

#[tokio::test]
async fn test_login_unknown_user() {
    let server = common::make_server(common::create_test_state());

    server
        .post("/api/auth/login")
        .json(&json!({ "username": "nobody", "password": common::PASSWORD }))
        .await
        .assert_status_unauthorized();
}

#[tokio::test]
async fn test_logout_revokes_token() {
    let server = common::make_server(common::create_test_state());
    let token = common::register(&server, "alice").await;

    server
        .post("/api/auth/logout")
        .authorization_bearer(&token)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    server
        .get("/api/todos")
        .authorization_bearer(&token)
        .await
        .assert_status_unauthorized();
}

#[tokio::test]
async fn test_invalid_token_rejected() {
    let server = common::make_server(common::create_test_state());

    let response = server
        .get("/api/notes")
        .authorization_bearer("not-a-real-token")
        .await;

    response.assert_status_unauthorized();
    assert_eq!(
        response.header("www-authenticate").to_str().unwrap(),
        "Bearer"
    );
}

#[tokio::test]
async fn test_token_scheme_is_accepted() {
    let server = common::make_server(common::create_test_state());
    let token = common::register(&server, "alice").await;

    server
        .get("/api/notes")
        .add_header("Authorization", format!("Token {token}"))
        .await
        .assert_status_ok();

    server
        .post("/api/auth/logout")
        .add_header("Authorization", format!("Token {token}"))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    server
        .get("/api/notes")
        .authorization_bearer(&token)
        .await
        .assert_status_unauthorized();
}

#[tokio::test]
async fn test_unknown_scheme_is_rejected() {
    let server = common::make_server(common::create_test_state());
    let token = common::register(&server, "alice").await;

    server
        .get("/api/notes")
        .add_header("Authorization", format!("Basic {token}"))
        .await
        .assert_status_unauthorized();

    server
        .get("/api/notes")
        .add_header("Authorization", "Token ")
        .await
        .assert_status_unauthorized();
}

#[tokio::test]
async fn test_route_index_is_public() {
    let server = common::make_server(common::create_test_state());

    let response = server.get("/api").await;

    response.assert_status_ok();
    let routes = response.json::<Value>()["routes"].clone();
    let names: Vec<&str> = routes
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap())
        .collect();
    for name in [
        "todo-list",
        "todo-create",
        "todo-detail",
        "todo-update",
        "todo-partial-update",
        "todo-destroy",
        "note-list",
        "note-create",
        "delete-note",
    ] {
        assert!(names.contains(&name), "missing {name}");
    }
}
