// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Statistics routes.

use crate::error::{AppError, Result};
use crate::AppState;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use std::sync::Arc;

/// Stats routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/stats", get(get_stats))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatsQuery {
    /// When present, return that user's trend summary instead of the
    /// global counts
    usuario_id: Option<String>,
}

/// Global counts, or a per-user trend summary when `usuarioId` is
/// supplied (404 when that user has no recorded metrics).
async fn get_stats(
    State(state): State<Arc<AppState>>,
    Query(params): Query<StatsQuery>,
) -> Result<Response> {
    if let Some(usuario_id) = params.usuario_id.filter(|s| !s.is_empty()) {
        let progress = state.db.stats_for_user(&usuario_id).await?.ok_or_else(|| {
            AppError::NotFound(format!("No metrics recorded for user {usuario_id}"))
        })?;
        return Ok(Json(progress).into_response());
    }

    let stats = state.db.global_stats().await?;
    Ok(Json(stats).into_response())
}
