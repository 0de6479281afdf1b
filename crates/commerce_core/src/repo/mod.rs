//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define one CRUD contract per entity (customer, vendor, product, service).
//! - Isolate SQLite query details from callers.
//! - Translate storage failures into the store error taxonomy.
//!
//! # Invariants
//! - Lookups and updates that match no row report `NotFound`.
//! - Deletes that match no row succeed.
//! - Unique/primary key violations report `Conflict`; every other storage
//!   failure passes through as `Db`.

use crate::db::DbError;
use rusqlite::ffi;
use thiserror::Error;

pub mod customer_repo;
pub mod product_repo;
pub mod service_repo;
pub mod vendor_repo;

pub type StoreResult<T> = Result<T, StoreError>;

/// Error taxonomy shared by every entity repository.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Lookup or update targeted an id with no stored row.
    #[error("unable to find {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },
    /// Write collided with an existing unique key.
    #[error("attempted to create a record with an existing key")]
    Conflict,
    /// Any other storage failure, unchanged.
    #[error(transparent)]
    Db(#[from] DbError),
    /// Adopted connection is not at the expected migrated version.
    #[error("store requires schema version {expected_version}, got {actual_version}")]
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Adopted connection lacks a table the repositories read.
    #[error("store requires table `{0}`")]
    MissingRequiredTable(&'static str),
}

impl StoreError {
    pub(crate) fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Maps an insert/update failure, singling out duplicate keys.
pub(crate) fn map_write_error(err: rusqlite::Error) -> StoreError {
    if is_unique_violation(&err) {
        StoreError::Conflict
    } else {
        err.into()
    }
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE
                || failure.extended_code == ffi::SQLITE_CONSTRAINT_PRIMARYKEY
    )
}
