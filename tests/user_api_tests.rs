// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Integration tests for user CRUD routes.

use axum::http::{Method, StatusCode};
use serde_json::json;

mod common;
use common::{request, seed_user, user_payload};

#[tokio::test]
async fn test_create_user_assigns_id_and_defaults() {
    let (app, _state) = common::create_test_app();

    let (status, body) = request(
        &app,
        Method::POST,
        "/api/users",
        Some(user_payload("Ana")),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(!body["id"].as_str().unwrap().is_empty());
    assert_eq!(body["nombre"], "Ana");
    assert_eq!(body["rol"], "usuario"); // default when unspecified
    assert!(!body["creadoEn"].as_str().unwrap().is_empty());

    // Round-trip through get-by-id
    let id = body["id"].as_str().unwrap();
    let (status, fetched) =
        request(&app, Method::GET, &format!("/api/users/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, body);
}

#[tokio::test]
async fn test_create_user_supervisor_role() {
    let (app, _state) = common::create_test_app();

    let mut payload = user_payload("Luisa");
    payload["rol"] = json!("supervisor");
    let (status, body) = request(&app, Method::POST, "/api/users", Some(payload)).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["rol"], "supervisor");
}

#[tokio::test]
async fn test_create_user_missing_fields_rejected() {
    let (app, _state) = common::create_test_app();

    let (status, _body) = request(
        &app,
        Method::POST,
        "/api/users",
        Some(json!({ "nombre": "Solo" })),
    )
    .await;

    assert!(status.is_client_error());
}

#[tokio::test]
async fn test_get_unknown_user_is_404() {
    let (app, _state) = common::create_test_app();

    let (status, body) = request(&app, Method::GET, "/api/users/nope", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn test_list_users_preserves_insertion_order() {
    let (app, _state) = common::create_test_app();

    let first = seed_user(&app, "Ana").await;
    let second = seed_user(&app, "Berta").await;
    let third = seed_user(&app, "Carla").await;

    let (status, body) = request(&app, Method::GET, "/api/users", None).await;

    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec![first, second, third]);
}

#[tokio::test]
async fn test_update_merges_only_supplied_fields() {
    let (app, _state) = common::create_test_app();
    let id = seed_user(&app, "Ana").await;

    let (_, before) = request(&app, Method::GET, &format!("/api/users/{id}"), None).await;

    let (status, updated) = request(
        &app,
        Method::PUT,
        &format!("/api/users/{id}"),
        Some(json!({ "email": "new@example.com" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["email"], "new@example.com");
    assert_eq!(updated["nombre"], before["nombre"]);
    assert_eq!(updated["apellido"], before["apellido"]);
    assert_eq!(updated["creadoEn"], before["creadoEn"]);
    assert_eq!(updated["id"], before["id"]);
}

#[tokio::test]
async fn test_update_unknown_user_is_404() {
    let (app, _state) = common::create_test_app();

    let (status, _body) = request(
        &app,
        Method::PUT,
        "/api/users/nope",
        Some(json!({ "email": "x@example.com" })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_user_then_404_on_repeat() {
    let (app, _state) = common::create_test_app();
    let id = seed_user(&app, "Ana").await;

    let (status, body) =
        request(&app, Method::DELETE, &format!("/api/users/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User deleted");

    let (status, _) = request(&app, Method::GET, &format!("/api/users/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // A second delete is not a silent success
    let (status, _) =
        request(&app, Method::DELETE, &format!("/api/users/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
