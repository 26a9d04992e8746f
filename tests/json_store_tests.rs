// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Tests for the file-backed storage and persistence across instances.

use gym_tracker::db::{Database, JsonFileStorage, Storage};
use gym_tracker::error::AppError;
use gym_tracker::models::{NewMetric, NewUser, Rol, Sexo};
use serde_json::json;
use std::fs;
use std::sync::Arc;

fn new_user(nombre: &str) -> NewUser {
    NewUser {
        nombre: nombre.to_string(),
        apellido: "García".to_string(),
        cedula: "V-12345678".to_string(),
        edad: 28,
        sexo: Sexo::F,
        email: format!("{}@example.com", nombre.to_lowercase()),
        rol: Rol::Usuario,
    }
}

fn new_metric(usuario_id: &str, fecha: &str, peso: f64) -> NewMetric {
    NewMetric {
        usuario_id: usuario_id.to_string(),
        fecha: fecha.to_string(),
        peso,
        altura: 175.0,
        grasa_corporal: 22.5,
        masa_muscular: 31.0,
        notas: String::new(),
    }
}

#[test]
fn test_first_access_initializes_empty_document() {
    let dir = tempfile::tempdir().unwrap();
    let data_dir = dir.path().join("data");
    let storage = JsonFileStorage::new(&data_dir);

    let records = storage.load("users").unwrap();

    assert!(records.is_empty());
    // The backing document now exists as a valid empty array
    let raw = fs::read_to_string(data_dir.join("users.json")).unwrap();
    assert_eq!(raw, "[]");
}

#[test]
fn test_save_then_load_round_trips_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let storage = JsonFileStorage::new(dir.path());
    let records = vec![json!({"id": "a"}), json!({"id": "b"}), json!({"id": "c"})];

    storage.save("metrics", &records).unwrap();

    assert_eq!(storage.load("metrics").unwrap(), records);
}

#[test]
fn test_documents_are_pretty_printed() {
    let dir = tempfile::tempdir().unwrap();
    let storage = JsonFileStorage::new(dir.path());

    storage
        .save("users", &[json!({"id": "a", "nombre": "Ana"})])
        .unwrap();

    let raw = fs::read_to_string(dir.path().join("users.json")).unwrap();
    assert!(raw.contains('\n'), "expected a pretty-printed document");
    assert!(raw.contains("\"nombre\": \"Ana\""));
}

#[test]
fn test_corrupt_document_is_a_storage_error() {
    let dir = tempfile::tempdir().unwrap();
    let storage = JsonFileStorage::new(dir.path());
    fs::write(dir.path().join("users.json"), "not json at all").unwrap();

    let err = storage.load("users").unwrap_err();

    assert!(matches!(err, AppError::Storage(_)));
}

#[tokio::test]
async fn test_database_state_survives_across_instances() {
    let dir = tempfile::tempdir().unwrap();

    let ana = {
        let db = Database::new(Arc::new(JsonFileStorage::new(dir.path())));
        let ana = db.create_user(new_user("Ana")).await.unwrap();
        db.create_metric(new_metric(&ana.id, "2024-02-10", 74.0))
            .await
            .unwrap();
        db.create_metric(new_metric(&ana.id, "2024-01-15", 75.5))
            .await
            .unwrap();
        ana
    };

    // A fresh instance over the same directory sees the same state
    let db = Database::new(Arc::new(JsonFileStorage::new(dir.path())));

    let fetched = db.get_user(&ana.id).await.unwrap().unwrap();
    assert_eq!(fetched.nombre, "Ana");

    let records = db.get_metrics_for_user(&ana.id).await.unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].fecha, "2024-01-15"); // chronological, not insertion
    assert_eq!(records[1].fecha, "2024-02-10");
}

#[tokio::test]
async fn test_reset_truncates_both_documents() {
    let dir = tempfile::tempdir().unwrap();
    let db = Database::new(Arc::new(JsonFileStorage::new(dir.path())));

    let ana = db.create_user(new_user("Ana")).await.unwrap();
    db.create_metric(new_metric(&ana.id, "2024-01-15", 75.5))
        .await
        .unwrap();

    db.reset().await.unwrap();

    assert!(db.get_users().await.unwrap().is_empty());
    assert!(db.get_metrics().await.unwrap().is_empty());
    assert_eq!(
        fs::read_to_string(dir.path().join("users.json")).unwrap(),
        "[]"
    );
    assert_eq!(
        fs::read_to_string(dir.path().join("metrics.json")).unwrap(),
        "[]"
    );
}
