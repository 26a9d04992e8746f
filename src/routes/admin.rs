// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Administrative routes.

use crate::error::Result;
use crate::AppState;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::Serialize;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Admin routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/reset", post(reset))
}

/// Response for the administrative reset.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/lib/generated/")
)]
pub struct ResetResponse {
    pub ok: bool,
    pub message: String,
}

/// Wipe both collections so the store starts empty.
async fn reset(State(state): State<Arc<AppState>>) -> Result<Json<ResetResponse>> {
    state.db.reset().await?;
    tracing::warn!("Administrative reset: all collections emptied");
    Ok(Json(ResetResponse {
        ok: true,
        message: "Database reset".to_string(),
    }))
}
