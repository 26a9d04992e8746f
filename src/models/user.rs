//! User model for storage and API.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Sex recorded for a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/lib/generated/")
)]
pub enum Sexo {
    M,
    F,
}

/// Dashboard role. Supervisors review and validate metric records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/lib/generated/")
)]
pub enum Rol {
    #[default]
    Usuario,
    Supervisor,
}

/// Member (or supervisor) profile stored in the `users` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/lib/generated/")
)]
pub struct User {
    /// Opaque unique identifier (UUIDv4, assigned at creation)
    pub id: String,
    /// First name
    pub nombre: String,
    /// Last name
    pub apellido: String,
    /// Identity document number (free text, not uniqueness-checked)
    pub cedula: String,
    /// Age in years
    pub edad: u32,
    pub sexo: Sexo,
    /// Email address (free text, not uniqueness-checked)
    pub email: String,
    pub rol: Rol,
    /// When the profile was created (RFC3339, immutable)
    pub creado_en: String,
}

/// Input for registering a user. The store assigns `id` and `creadoEn`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub nombre: String,
    pub apellido: String,
    pub cedula: String,
    pub edad: u32,
    pub sexo: Sexo,
    pub email: String,
    /// Defaults to `usuario` when unspecified
    #[serde(default)]
    pub rol: Rol,
}

/// Partial update for a user. Only supplied fields overwrite existing
/// ones; `id` and `creadoEn` are not updatable.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    pub nombre: Option<String>,
    pub apellido: Option<String>,
    pub cedula: Option<String>,
    pub edad: Option<u32>,
    pub sexo: Option<Sexo>,
    pub email: Option<String>,
    pub rol: Option<Rol>,
}
