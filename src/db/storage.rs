// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Collection persistence backends.
//!
//! All JSON document handling lives behind the [`Storage`] trait, so
//! the typed data access layer never touches files or encoding
//! directly and tests can run against the in-memory backend.

use crate::error::AppError;
use dashmap::DashMap;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// A persistence backend holding one ordered record array per named
/// collection.
pub trait Storage: Send + Sync {
    /// Load the full contents of a collection, in insertion order.
    ///
    /// A collection that has never been written is empty, not an error.
    fn load(&self, collection: &str) -> Result<Vec<Value>, AppError>;

    /// Replace the full contents of a collection.
    fn save(&self, collection: &str, records: &[Value]) -> Result<(), AppError>;
}

/// File-backed storage: one pretty-printed JSON array document per
/// collection at `<dir>/<collection>.json`.
///
/// The directory and empty documents are created on first access.
pub struct JsonFileStorage {
    dir: PathBuf,
}

impl JsonFileStorage {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn document_path(&self, collection: &str) -> PathBuf {
        self.dir.join(format!("{collection}.json"))
    }

    fn ensure_dir(&self) -> Result<(), AppError> {
        fs::create_dir_all(&self.dir).map_err(|e| {
            AppError::Storage(format!(
                "Failed to create data directory {}: {e}",
                self.dir.display()
            ))
        })
    }
}

impl Storage for JsonFileStorage {
    fn load(&self, collection: &str) -> Result<Vec<Value>, AppError> {
        self.ensure_dir()?;
        let path = self.document_path(collection);

        if !path.exists() {
            // First access: write an empty document so later readers
            // always find a valid array.
            fs::write(&path, "[]").map_err(|e| {
                AppError::Storage(format!("Failed to initialize {}: {e}", path.display()))
            })?;
            return Ok(Vec::new());
        }

        let raw = fs::read_to_string(&path)
            .map_err(|e| AppError::Storage(format!("Failed to read {}: {e}", path.display())))?;
        serde_json::from_str(&raw)
            .map_err(|e| AppError::Storage(format!("Failed to parse {}: {e}", path.display())))
    }

    fn save(&self, collection: &str, records: &[Value]) -> Result<(), AppError> {
        self.ensure_dir()?;
        let path = self.document_path(collection);
        let json = serde_json::to_string_pretty(records)
            .map_err(|e| AppError::Storage(format!("Failed to encode '{collection}': {e}")))?;
        fs::write(&path, json)
            .map_err(|e| AppError::Storage(format!("Failed to write {}: {e}", path.display())))
    }
}

/// In-memory storage for tests and benchmarks.
#[derive(Default)]
pub struct MemoryStorage {
    collections: DashMap<String, Vec<Value>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn load(&self, collection: &str) -> Result<Vec<Value>, AppError> {
        Ok(self
            .collections
            .get(collection)
            .map(|records| records.clone())
            .unwrap_or_default())
    }

    fn save(&self, collection: &str, records: &[Value]) -> Result<(), AppError> {
        self.collections
            .insert(collection.to_string(), records.to_vec());
        Ok(())
    }
}
