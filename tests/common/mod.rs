//! HTTP helpers shared by the integration test crates.
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use student_rotations::ServerConfig;
use tower::ServiceExt;

/// Defaults for every setting, as when no variables are set.
pub fn default_config() -> ServerConfig {
    ServerConfig::from_lookup(|_| None).unwrap()
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(v) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(v.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

pub async fn add_student(app: &Router, name: &str, email: &str, role: &str) -> i64 {
    let (status, _) = send(
        app,
        Method::POST,
        "/students",
        Some(json!({"name": name, "email": email, "role": role})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let (_, students) = send(app, Method::GET, "/students", None).await;
    students
        .as_array()
        .unwrap()
        .iter()
        .find(|s| s["email"] == email)
        .and_then(|s| s["id"].as_i64())
        .unwrap()
}

pub async fn student_count(app: &Router) -> usize {
    let (_, students) = send(app, Method::GET, "/students", None).await;
    students.as_array().unwrap().len()
}
