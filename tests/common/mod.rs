// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for API integration tests.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use gym_tracker::config::Config;
use gym_tracker::db::{Database, MemoryStorage};
use gym_tracker::routes::create_router;
use gym_tracker::AppState;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

/// Create a test app over in-memory storage.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let config = Config::default();
    let db = Database::new(Arc::new(MemoryStorage::new()));
    let state = Arc::new(AppState { config, db });
    (create_router(state.clone()), state)
}

/// Send a request and return status plus parsed JSON body.
#[allow(dead_code)]
pub async fn request(
    app: &axum::Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        // Some error responses (e.g. axum's built-in `Json` extractor
        // rejection for missing fields) are plain text, not JSON. Fall
        // back to a string value rather than panicking on parse.
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, json)
}

/// A valid user creation payload.
#[allow(dead_code)]
pub fn user_payload(nombre: &str) -> Value {
    json!({
        "nombre": nombre,
        "apellido": "García",
        "cedula": "V-12345678",
        "edad": 28,
        "sexo": "F",
        "email": format!("{}@example.com", nombre.to_lowercase()),
    })
}

/// A valid metric creation payload.
#[allow(dead_code)]
pub fn metric_payload(usuario_id: &str, fecha: &str, peso: f64) -> Value {
    json!({
        "usuarioId": usuario_id,
        "fecha": fecha,
        "peso": peso,
        "altura": 175.0,
        "grasaCorporal": 22.5,
        "masaMuscular": 31.0,
    })
}

/// Create a user through the API and return its id.
#[allow(dead_code)]
pub async fn seed_user(app: &axum::Router, nombre: &str) -> String {
    let (status, body) = request(
        app,
        Method::POST,
        "/api/users",
        Some(user_payload(nombre)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().unwrap().to_string()
}

/// Create a metric through the API and return its id.
#[allow(dead_code)]
pub async fn seed_metric(app: &axum::Router, usuario_id: &str, fecha: &str, peso: f64) -> String {
    let (status, body) = request(
        app,
        Method::POST,
        "/api/metrics",
        Some(metric_payload(usuario_id, fecha, peso)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().unwrap().to_string()
}
