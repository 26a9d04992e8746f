// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Typed data access over the storage backend.
//!
//! Provides high-level operations for:
//! - Users (member profiles, cascade delete)
//! - Metrics (measurements with derived BMI, supervisor validation)
//! - Statistics (per-user trends, global counts)
//!
//! Every mutation is a full read-modify-write cycle against one
//! collection document. A per-collection async lock serializes writers
//! so a racing pair cannot silently drop each other's update.
//! Operations touching both collections take `users` before `metrics`.

use crate::db::collections;
use crate::db::storage::Storage;
use crate::error::AppError;
use crate::models::metric::calculate_imc;
use crate::models::{
    GlobalStats, MetricRecord, MetricUpdate, NewMetric, NewUser, User, UserProgress, UserUpdate,
};
use crate::time_utils::{now_rfc3339, parse_fecha};
use dashmap::DashMap;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Data access layer for the `users` and `metrics` collections.
#[derive(Clone)]
pub struct Database {
    storage: Arc<dyn Storage>,
    write_locks: Arc<DashMap<&'static str, Arc<Mutex<()>>>>,
}

impl Database {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage,
            write_locks: Arc::new(DashMap::new()),
        }
    }

    fn write_lock(&self, collection: &'static str) -> Arc<Mutex<()>> {
        self.write_locks
            .entry(collection)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    fn load_collection<T: DeserializeOwned>(&self, collection: &str) -> Result<Vec<T>, AppError> {
        self.storage
            .load(collection)?
            .into_iter()
            .map(|record| {
                serde_json::from_value(record).map_err(|e| {
                    AppError::Storage(format!("Corrupt record in '{collection}': {e}"))
                })
            })
            .collect()
    }

    fn save_collection<T: Serialize>(
        &self,
        collection: &str,
        records: &[T],
    ) -> Result<(), AppError> {
        let raw = records
            .iter()
            .map(|record| {
                serde_json::to_value(record).map_err(|e| {
                    AppError::Storage(format!("Failed to encode record for '{collection}': {e}"))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        self.storage.save(collection, &raw)
    }

    // ─── User Operations ─────────────────────────────────────────

    /// All users, insertion order.
    pub async fn get_users(&self) -> Result<Vec<User>, AppError> {
        self.load_collection(collections::USERS)
    }

    /// Get a user by id.
    pub async fn get_user(&self, id: &str) -> Result<Option<User>, AppError> {
        Ok(self.get_users().await?.into_iter().find(|u| u.id == id))
    }

    /// Register a user, assigning a fresh id and creation timestamp.
    pub async fn create_user(&self, input: NewUser) -> Result<User, AppError> {
        let lock = self.write_lock(collections::USERS);
        let _guard = lock.lock().await;

        let mut users: Vec<User> = self.load_collection(collections::USERS)?;
        let user = User {
            id: uuid::Uuid::new_v4().to_string(),
            nombre: input.nombre,
            apellido: input.apellido,
            cedula: input.cedula,
            edad: input.edad,
            sexo: input.sexo,
            email: input.email,
            rol: input.rol,
            creado_en: now_rfc3339(),
        };
        users.push(user.clone());
        self.save_collection(collections::USERS, &users)?;

        tracing::debug!(user_id = %user.id, "User created");
        Ok(user)
    }

    /// Merge the supplied fields over an existing user.
    ///
    /// Returns `None` when no user has this id. `creadoEn` is never
    /// touched.
    pub async fn update_user(
        &self,
        id: &str,
        update: UserUpdate,
    ) -> Result<Option<User>, AppError> {
        let lock = self.write_lock(collections::USERS);
        let _guard = lock.lock().await;

        let mut users: Vec<User> = self.load_collection(collections::USERS)?;
        let Some(user) = users.iter_mut().find(|u| u.id == id) else {
            return Ok(None);
        };

        if let Some(nombre) = update.nombre {
            user.nombre = nombre;
        }
        if let Some(apellido) = update.apellido {
            user.apellido = apellido;
        }
        if let Some(cedula) = update.cedula {
            user.cedula = cedula;
        }
        if let Some(edad) = update.edad {
            user.edad = edad;
        }
        if let Some(sexo) = update.sexo {
            user.sexo = sexo;
        }
        if let Some(email) = update.email {
            user.email = email;
        }
        if let Some(rol) = update.rol {
            user.rol = rol;
        }

        let updated = user.clone();
        self.save_collection(collections::USERS, &users)?;
        Ok(Some(updated))
    }

    /// Delete a user and every metric that belongs to them.
    ///
    /// Returns `false` when no user has this id.
    pub async fn delete_user(&self, id: &str) -> Result<bool, AppError> {
        let users_lock = self.write_lock(collections::USERS);
        let _users_guard = users_lock.lock().await;
        let metrics_lock = self.write_lock(collections::METRICS);
        let _metrics_guard = metrics_lock.lock().await;

        let mut users: Vec<User> = self.load_collection(collections::USERS)?;
        let before = users.len();
        users.retain(|u| u.id != id);
        if users.len() == before {
            return Ok(false);
        }
        self.save_collection(collections::USERS, &users)?;

        let mut metrics: Vec<MetricRecord> = self.load_collection(collections::METRICS)?;
        let metrics_before = metrics.len();
        metrics.retain(|m| m.usuario_id != id);
        self.save_collection(collections::METRICS, &metrics)?;

        tracing::info!(
            user_id = id,
            cascaded_metrics = metrics_before - metrics.len(),
            "User deleted"
        );
        Ok(true)
    }

    // ─── Metric Operations ───────────────────────────────────────

    /// All metrics, insertion order (unsorted).
    pub async fn get_metrics(&self) -> Result<Vec<MetricRecord>, AppError> {
        self.load_collection(collections::METRICS)
    }

    /// Metrics for one user, ascending by the chronological
    /// interpretation of `fecha`.
    ///
    /// The sort is stable: ties (and unparsable dates, which sort
    /// first) keep insertion order.
    pub async fn get_metrics_for_user(
        &self,
        usuario_id: &str,
    ) -> Result<Vec<MetricRecord>, AppError> {
        let mut records: Vec<MetricRecord> = self
            .get_metrics()
            .await?
            .into_iter()
            .filter(|m| m.usuario_id == usuario_id)
            .collect();
        records.sort_by_key(|m| parse_fecha(&m.fecha));
        Ok(records)
    }

    /// Get a metric by id.
    pub async fn get_metric(&self, id: &str) -> Result<Option<MetricRecord>, AppError> {
        Ok(self.get_metrics().await?.into_iter().find(|m| m.id == id))
    }

    /// Record a measurement, deriving `imc` from `peso`/`altura`.
    pub async fn create_metric(&self, input: NewMetric) -> Result<MetricRecord, AppError> {
        let lock = self.write_lock(collections::METRICS);
        let _guard = lock.lock().await;

        let mut metrics: Vec<MetricRecord> = self.load_collection(collections::METRICS)?;
        let now = now_rfc3339();
        let metric = MetricRecord {
            id: uuid::Uuid::new_v4().to_string(),
            imc: calculate_imc(input.peso, input.altura),
            usuario_id: input.usuario_id,
            fecha: input.fecha,
            peso: input.peso,
            altura: input.altura,
            grasa_corporal: input.grasa_corporal,
            masa_muscular: input.masa_muscular,
            notas: input.notas,
            validado: false,
            validado_por: None,
            creado_en: now.clone(),
            actualizado_en: now,
        };
        metrics.push(metric.clone());
        self.save_collection(collections::METRICS, &metrics)?;

        tracing::debug!(
            metric_id = %metric.id,
            usuario_id = %metric.usuario_id,
            "Metric recorded"
        );
        Ok(metric)
    }

    /// Merge the supplied fields over an existing metric.
    ///
    /// When `peso` or `altura` is supplied, `imc` is recomputed from
    /// the resulting pair. `actualizadoEn` is bumped on every call.
    /// Returns `None` when no metric has this id.
    pub async fn update_metric(
        &self,
        id: &str,
        update: MetricUpdate,
    ) -> Result<Option<MetricRecord>, AppError> {
        let lock = self.write_lock(collections::METRICS);
        let _guard = lock.lock().await;

        let mut metrics: Vec<MetricRecord> = self.load_collection(collections::METRICS)?;
        let Some(metric) = metrics.iter_mut().find(|m| m.id == id) else {
            return Ok(None);
        };

        let recompute_imc = update.peso.is_some() || update.altura.is_some();

        if let Some(usuario_id) = update.usuario_id {
            metric.usuario_id = usuario_id;
        }
        if let Some(fecha) = update.fecha {
            metric.fecha = fecha;
        }
        if let Some(peso) = update.peso {
            metric.peso = peso;
        }
        if let Some(altura) = update.altura {
            metric.altura = altura;
        }
        if let Some(grasa_corporal) = update.grasa_corporal {
            metric.grasa_corporal = grasa_corporal;
        }
        if let Some(masa_muscular) = update.masa_muscular {
            metric.masa_muscular = masa_muscular;
        }
        if let Some(notas) = update.notas {
            metric.notas = notas;
        }
        if let Some(validado) = update.validado {
            metric.validado = validado;
        }
        if let Some(validado_por) = update.validado_por {
            metric.validado_por = Some(validado_por);
        }

        if recompute_imc {
            metric.imc = calculate_imc(metric.peso, metric.altura);
        }
        metric.actualizado_en = now_rfc3339();

        let updated = metric.clone();
        self.save_collection(collections::METRICS, &metrics)?;
        Ok(Some(updated))
    }

    /// Delete a metric. Returns `false` when no metric has this id.
    pub async fn delete_metric(&self, id: &str) -> Result<bool, AppError> {
        let lock = self.write_lock(collections::METRICS);
        let _guard = lock.lock().await;

        let mut metrics: Vec<MetricRecord> = self.load_collection(collections::METRICS)?;
        let before = metrics.len();
        metrics.retain(|m| m.id != id);
        if metrics.len() == before {
            return Ok(false);
        }
        self.save_collection(collections::METRICS, &metrics)?;
        Ok(true)
    }

    /// Mark a metric as reviewed by a supervisor.
    ///
    /// Re-validation overwrites `validadoPor` (last write wins). The
    /// supervisor id is not checked against the users collection; that
    /// is the caller's contract.
    pub async fn validate_metric(
        &self,
        id: &str,
        supervisor_id: &str,
    ) -> Result<Option<MetricRecord>, AppError> {
        self.update_metric(
            id,
            MetricUpdate {
                validado: Some(true),
                validado_por: Some(supervisor_id.to_string()),
                ..MetricUpdate::default()
            },
        )
        .await
    }

    // ─── Statistics ──────────────────────────────────────────────

    /// Trend summary for one user, `None` when they have no metrics.
    pub async fn stats_for_user(
        &self,
        usuario_id: &str,
    ) -> Result<Option<UserProgress>, AppError> {
        let records = self.get_metrics_for_user(usuario_id).await?;
        Ok(UserProgress::from_records(&records))
    }

    /// Dashboard-wide counts. Empty collections yield zeros.
    pub async fn global_stats(&self) -> Result<GlobalStats, AppError> {
        let users = self.get_users().await?;
        let metrics = self.get_metrics().await?;
        Ok(GlobalStats::compute(&users, &metrics))
    }

    /// Truncate both collections to empty.
    pub async fn reset(&self) -> Result<(), AppError> {
        let users_lock = self.write_lock(collections::USERS);
        let _users_guard = users_lock.lock().await;
        let metrics_lock = self.write_lock(collections::METRICS);
        let _metrics_guard = metrics_lock.lock().await;

        self.save_collection::<User>(collections::USERS, &[])?;
        self.save_collection::<MetricRecord>(collections::METRICS, &[])?;
        tracing::info!("All collections truncated");
        Ok(())
    }
}
