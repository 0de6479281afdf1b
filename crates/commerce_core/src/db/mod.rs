//! SQLite storage bootstrap, schema migrations and the shared client.
//!
//! # Responsibility
//! - Open and configure SQLite connections for the commerce store.
//! - Apply schema migrations in deterministic order.
//! - Own the connection shared by every entity repository (`Client`).
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - Repositories must not read/write entity data before migrations succeed.

use thiserror::Error;

mod client;
pub mod migrations;
mod open;

pub use client::Client;
pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Storage-engine failure, passed through unchanged to callers.
#[derive(Debug, Error)]
pub enum DbError {
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
    #[error("database schema version {db_version} is newer than supported {latest_supported}")]
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    #[error("migration {version} leaves rows in `{table}` referencing missing parents")]
    DanglingReference { version: u32, table: String },
}
