//! Common test utilities for integration tests.
//!
//! Every test gets its own in-memory SQLite store, so tests run in parallel
//! without sharing data.

// Not every helper is used by every test binary.
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use persistence::TodoStore;
use serde_json::Value;
use std::path::{Path, PathBuf};
use todo_api::{app::create_app, config::Config};
use tower::ServiceExt;

/// Test configuration pointing at an in-memory database.
pub fn test_config() -> Config {
    Config::load_for_test(&[
        ("database.url", "sqlite::memory:"),
        ("server.host", "127.0.0.1"),
        ("logging.format", "pretty"),
    ])
    .expect("Failed to load test config")
}

/// Open a fresh, empty store.
pub async fn create_test_store(config: &Config) -> TodoStore {
    TodoStore::connect(&config.database.to_store_config())
        .await
        .expect("Failed to open test store")
}

/// Create a test application router with its store.
pub async fn create_test_app() -> (Router, TodoStore) {
    let config = test_config();
    let store = create_test_store(&config).await;
    (create_app(&config, store.clone()), store)
}

/// Create a test application backed by a database file under the temp dir.
///
/// Unlike the in-memory store this pool has several connections, so writers
/// really contend. Call [`remove_file_store`] with the returned path when done.
pub async fn create_file_test_app(name: &str) -> (Router, TodoStore, PathBuf) {
    let path = std::env::temp_dir().join(format!(
        "todo-api-{}-{}.db",
        name,
        std::process::id()
    ));
    remove_file_store(&path);

    let url = format!("sqlite://{}", path.display());
    let config = Config::load_for_test(&[
        ("database.url", url.as_str()),
        ("server.host", "127.0.0.1"),
        ("logging.format", "pretty"),
    ])
    .expect("Failed to load test config");
    let store = create_test_store(&config).await;
    (create_app(&config, store.clone()), store, path)
}

/// Delete a file store and its WAL side files.
pub fn remove_file_store(path: &Path) {
    for suffix in ["", "-wal", "-shm"] {
        let _ = std::fs::remove_file(format!("{}{}", path.display(), suffix));
    }
}

/// Build a request with a JSON body.
pub fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    raw_json_request(method, uri, &serde_json::to_string(&body).unwrap())
}

/// Build a request with a literal body and a JSON content type.
pub fn raw_json_request(method: Method, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Build a GET request.
pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Build a DELETE request.
pub fn delete_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Helper to parse JSON response body.
pub async fn parse_response_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap_or(Value::Null)
}

/// Send a request and return status plus parsed body.
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    (status, parse_response_body(response).await)
}

/// Create a todo through the API and return the response body.
pub async fn create_todo(app: &Router, title: &str) -> Value {
    let (status, body) = send(
        app,
        json_request(Method::POST, "/todos", serde_json::json!({ "title": title })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {}", body);
    body
}

/// Ids of every todo currently listed.
pub async fn list_ids(app: &Router) -> Vec<i64> {
    let (status, body) = send(app, get_request("/todos")).await;
    assert_eq!(status, StatusCode::OK);
    body.as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_i64().unwrap())
        .collect()
}
