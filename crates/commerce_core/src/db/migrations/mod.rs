//! SQLite migration registry and executor for the commerce schema.
//!
//! # Responsibility
//! - Register schema migrations in strictly increasing order.
//! - Apply pending migrations atomically, including table rebuilds.
//!
//! # Invariants
//! - `version` values must remain monotonic.
//! - Applied migration version is mirrored to `PRAGMA user_version`.
//! - Foreign key enforcement is off while migrations run, so a rebuilt
//!   `vendors` table keeps its `products` references; every step must still
//!   pass `PRAGMA foreign_key_check` before it is recorded.
//! - The connection's `foreign_keys` setting is restored afterwards.

use crate::db::{DbError, DbResult};
use log::{error, info};
use rusqlite::{Connection, OptionalExtension};

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        sql: include_str!("0001_init.sql"),
    },
    Migration {
        version: 2,
        sql: include_str!("0002_product_vendor_index.sql"),
    },
    Migration {
        version: 3,
        sql: include_str!("0003_optional_email_uniqueness.sql"),
    },
];

/// Entity tables every ready connection must expose.
pub const REQUIRED_TABLES: &[&str] = &["customers", "vendors", "products", "services"];

/// Returns the latest schema version known by this binary.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Brings the connection's schema up to `latest_version()`.
///
/// # Errors
/// - `UnsupportedSchemaVersion` when the database is newer than this binary.
/// - `DanglingReference` when a step leaves a product pointing at a missing
///   vendor; nothing from the run is committed.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let from_version = current_user_version(conn)?;
    let latest = latest_version();

    if from_version > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: from_version,
            latest_supported: latest,
        });
    }
    if from_version == latest {
        return Ok(());
    }

    // `PRAGMA foreign_keys` is a no-op inside a transaction, so toggle it around one.
    let enforce_foreign_keys = foreign_keys_enabled(conn)?;
    if enforce_foreign_keys {
        conn.execute_batch("PRAGMA foreign_keys = OFF;")?;
    }
    let applied = apply_pending(conn, from_version);
    let restored = if enforce_foreign_keys {
        conn.execute_batch("PRAGMA foreign_keys = ON;")
    } else {
        Ok(())
    };

    if let Err(err) = &applied {
        error!(
            "event=db_migrate module=db status=error from_version={} error={}",
            from_version, err
        );
    }
    applied?;
    restored?;

    info!(
        "event=db_migrate module=db status=ok from_version={} to_version={}",
        from_version, latest
    );
    Ok(())
}

/// Reads the schema version recorded on the connection.
pub fn current_user_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}

fn apply_pending(conn: &mut Connection, from_version: u32) -> DbResult<()> {
    let tx = conn.transaction()?;
    for migration in MIGRATIONS.iter().filter(|m| m.version > from_version) {
        tx.execute_batch(migration.sql)?;
        ensure_no_dangling_references(&tx, migration.version)?;
        tx.execute_batch(&format!("PRAGMA user_version = {};", migration.version))?;
    }
    tx.commit()?;
    Ok(())
}

fn ensure_no_dangling_references(conn: &Connection, version: u32) -> DbResult<()> {
    let table: Option<String> = conn
        .query_row("PRAGMA foreign_key_check;", [], |row| row.get(0))
        .optional()?;

    match table {
        Some(table) => Err(DbError::DanglingReference { version, table }),
        None => Ok(()),
    }
}

fn foreign_keys_enabled(conn: &Connection) -> DbResult<bool> {
    let enabled: i64 = conn.query_row("PRAGMA foreign_keys;", [], |row| row.get(0))?;
    Ok(enabled == 1)
}
