//! Statistics over metric records.
//!
//! Pure computation, no storage access: the data access layer loads the
//! records and hands them here.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::metric::round2;
use crate::models::{MetricRecord, Rol, User};

/// Per-user trend summary: first vs. latest record of their history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/lib/generated/")
)]
pub struct UserProgress {
    pub total_registros: u32,
    pub ultimo_registro: MetricRecord,
    pub primer_registro: MetricRecord,
    pub cambio_peso: f64,
    #[serde(rename = "cambioIMC")]
    pub cambio_imc: f64,
    pub cambio_grasa: f64,
    pub cambio_musculo: f64,
}

impl UserProgress {
    /// Build a trend summary from a user's records, which must already
    /// be in chronological order. Returns `None` for an empty history.
    ///
    /// Deltas are `latest - first`, rounded to 2 decimal places; a
    /// single record compares against itself, so every delta is 0.
    pub fn from_records(records: &[MetricRecord]) -> Option<Self> {
        let first = records.first()?;
        let latest = records.last()?;

        Some(Self {
            total_registros: records.len() as u32,
            cambio_peso: round2(latest.peso - first.peso),
            cambio_imc: round2(latest.imc - first.imc),
            cambio_grasa: round2(latest.grasa_corporal - first.grasa_corporal),
            cambio_musculo: round2(latest.masa_muscular - first.masa_muscular),
            ultimo_registro: latest.clone(),
            primer_registro: first.clone(),
        })
    }
}

/// Dashboard-wide counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/lib/generated/")
)]
pub struct GlobalStats {
    /// Members with role `usuario`; supervisors are not counted
    pub total_usuarios: u32,
    pub total_registros: u32,
    pub registros_validados: u32,
    pub registros_pendientes: u32,
}

impl GlobalStats {
    /// Count users and metric validation states. Empty collections
    /// produce all-zero counts.
    pub fn compute(users: &[User], metrics: &[MetricRecord]) -> Self {
        let validados = metrics.iter().filter(|m| m.validado).count() as u32;

        Self {
            total_usuarios: users.iter().filter(|u| u.rol == Rol::Usuario).count() as u32,
            total_registros: metrics.len() as u32,
            registros_validados: validados,
            registros_pendientes: metrics.len() as u32 - validados,
        }
    }
}
