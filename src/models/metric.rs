// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Body metric record model and BMI derivation.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// One body-composition measurement stored in the `metrics` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/lib/generated/")
)]
pub struct MetricRecord {
    /// Opaque unique identifier (UUIDv4, assigned at creation)
    pub id: String,
    /// Owning user. Not checked to exist at write time.
    pub usuario_id: String,
    /// Measurement date as entered (`YYYY-MM-DD` or full timestamp)
    pub fecha: String,
    /// Weight in kg
    pub peso: f64,
    /// Height in cm
    pub altura: f64,
    /// Body mass index, always derived from `peso`/`altura`
    pub imc: f64,
    /// Body fat percentage
    pub grasa_corporal: f64,
    /// Muscle mass in kg
    pub masa_muscular: f64,
    /// Free-text notes
    pub notas: String,
    /// Whether a supervisor has reviewed this record
    pub validado: bool,
    /// Id of the supervisor who validated, if any
    pub validado_por: Option<String>,
    /// Creation timestamp (RFC3339, immutable)
    pub creado_en: String,
    /// Bumped on every mutation (RFC3339)
    pub actualizado_en: String,
}

/// Input for recording a measurement. The store assigns `id`, derives
/// `imc`, and initializes the validation and timestamp fields.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMetric {
    pub usuario_id: String,
    pub fecha: String,
    pub peso: f64,
    pub altura: f64,
    pub grasa_corporal: f64,
    pub masa_muscular: f64,
    #[serde(default)]
    pub notas: String,
}

/// Partial update for a metric record. Only supplied fields overwrite
/// existing ones. `imc` is deliberately absent: it is recomputed
/// whenever `peso` or `altura` changes and can never be set to a value
/// inconsistent with them.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricUpdate {
    pub usuario_id: Option<String>,
    pub fecha: Option<String>,
    pub peso: Option<f64>,
    pub altura: Option<f64>,
    pub grasa_corporal: Option<f64>,
    pub masa_muscular: Option<f64>,
    pub notas: Option<String>,
    pub validado: Option<bool>,
    /// Supplying a value overwrites the validator reference; the field
    /// cannot be reset to null through a partial update.
    pub validado_por: Option<String>,
}

/// Round to 2 decimal places, half away from zero (`f64::round`).
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Body mass index from weight (kg) and height (cm), rounded to 2
/// decimal places. A non-positive height yields 0.
pub fn calculate_imc(peso: f64, altura_cm: f64) -> f64 {
    let altura_m = altura_cm / 100.0;
    if altura_m <= 0.0 {
        return 0.0;
    }
    round2(peso / (altura_m * altura_m))
}
