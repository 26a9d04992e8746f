//! Data access layer: storage backends and typed collection operations.

pub mod database;
pub mod storage;

pub use database::Database;
pub use storage::{JsonFileStorage, MemoryStorage, Storage};

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    pub const METRICS: &str = "metrics";
}
