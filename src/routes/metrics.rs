// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Metric record routes, including supervisor validation.

use crate::error::{AppError, Result};
use crate::models::{MetricRecord, MetricUpdate, NewMetric};
use crate::routes::DeletedResponse;
use crate::AppState;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use std::sync::Arc;

/// Metric routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/metrics", get(list_metrics).post(create_metric))
        .route(
            "/api/metrics/{id}",
            get(get_metric).put(update_metric).delete(delete_metric),
        )
        .route("/api/metrics/{id}/validate", post(validate_metric))
}

/// Accepted measurement ranges, enforced before a record is created.
fn check_ranges(input: &NewMetric) -> Result<()> {
    if input.peso <= 0.0 || input.peso > 300.0 {
        return Err(AppError::BadRequest(
            "peso must be between 0 and 300 kg".to_string(),
        ));
    }
    if input.altura <= 0.0 || input.altura > 250.0 {
        return Err(AppError::BadRequest(
            "altura must be between 0 and 250 cm".to_string(),
        ));
    }
    if input.grasa_corporal < 0.0 || input.grasa_corporal > 100.0 {
        return Err(AppError::BadRequest(
            "grasaCorporal must be between 0 and 100%".to_string(),
        ));
    }
    if input.masa_muscular < 0.0 || input.masa_muscular > 200.0 {
        return Err(AppError::BadRequest(
            "masaMuscular must be between 0 and 200 kg".to_string(),
        ));
    }
    Ok(())
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MetricsQuery {
    /// Filter to one user's records (chronologically sorted)
    usuario_id: Option<String>,
}

/// List metrics: all of them in insertion order, or one user's sorted
/// by measurement date when `usuarioId` is supplied.
async fn list_metrics(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MetricsQuery>,
) -> Result<Json<Vec<MetricRecord>>> {
    // An empty filter value means no filter
    let metrics = match params.usuario_id.filter(|s| !s.is_empty()) {
        Some(usuario_id) => state.db.get_metrics_for_user(&usuario_id).await?,
        None => state.db.get_metrics().await?,
    };
    Ok(Json(metrics))
}

/// Get a single metric record.
async fn get_metric(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<MetricRecord>> {
    let metric = state
        .db
        .get_metric(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Metric {id} not found")))?;
    Ok(Json(metric))
}

/// Record a new measurement.
async fn create_metric(
    State(state): State<Arc<AppState>>,
    Json(input): Json<NewMetric>,
) -> Result<(StatusCode, Json<MetricRecord>)> {
    check_ranges(&input)?;
    let metric = state.db.create_metric(input).await?;
    Ok((StatusCode::CREATED, Json(metric)))
}

/// Partially update a metric record.
async fn update_metric(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(update): Json<MetricUpdate>,
) -> Result<Json<MetricRecord>> {
    let metric = state
        .db
        .update_metric(&id, update)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Metric {id} not found")))?;
    Ok(Json(metric))
}

/// Delete a metric record.
async fn delete_metric(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DeletedResponse>> {
    if !state.db.delete_metric(&id).await? {
        return Err(AppError::NotFound(format!("Metric {id} not found")));
    }
    Ok(Json(DeletedResponse {
        message: "Metric deleted".to_string(),
    }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ValidateRequest {
    supervisor_id: Option<String>,
}

/// Mark a metric as reviewed by a supervisor.
async fn validate_metric(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<ValidateRequest>,
) -> Result<Json<MetricRecord>> {
    let supervisor_id = body
        .supervisor_id
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::BadRequest("supervisorId is required".to_string()))?;

    let metric = state
        .db
        .validate_metric(&id, &supervisor_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Metric {id} not found")))?;
    Ok(Json(metric))
}
