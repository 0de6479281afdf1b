//! Vendor repository contract and SQLite implementation.
//!
//! # Invariants
//! - `vendor_id` is assigned here on create and never rewritten by update.
//! - Duplicate non-empty emails surface as `StoreError::Conflict`; any
//!   number of rows may leave `email` empty.
//! - Deleting a vendor still referenced by products fails with the
//!   underlying foreign key error.

use crate::model::new_entity_id;
use crate::model::vendor::Vendor;
use crate::repo::{map_write_error, StoreError, StoreResult};
use log::debug;
use rusqlite::{params, Connection, OptionalExtension, Row};

pub const VENDOR_ENTITY: &str = "vendor";

const VENDOR_COLUMNS: &str = "vendor_id, name, contact, phone, email, address";

/// Repository interface for vendor CRUD operations.
pub trait VendorRepository {
    /// Lists every vendor in insertion order.
    fn list_vendors(&self) -> StoreResult<Vec<Vendor>>;
    fn get_vendor(&self, id: &str) -> StoreResult<Vendor>;
    fn add_vendor(&self, vendor: Vendor) -> StoreResult<Vendor>;
    fn update_vendor(&self, vendor: &Vendor) -> StoreResult<Vendor>;
    fn delete_vendor(&self, id: &str) -> StoreResult<()>;
}

/// SQLite-backed vendor repository.
pub struct SqliteVendorRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteVendorRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl VendorRepository for SqliteVendorRepository<'_> {
    fn list_vendors(&self) -> StoreResult<Vec<Vendor>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {VENDOR_COLUMNS} FROM vendors ORDER BY rowid ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut vendors = Vec::new();

        while let Some(row) = rows.next()? {
            vendors.push(parse_vendor_row(row)?);
        }

        Ok(vendors)
    }

    fn get_vendor(&self, id: &str) -> StoreResult<Vendor> {
        self.conn
            .query_row(
                &format!("SELECT {VENDOR_COLUMNS} FROM vendors WHERE vendor_id = ?1;"),
                [id],
                parse_vendor_row,
            )
            .optional()?
            .ok_or_else(|| StoreError::not_found(VENDOR_ENTITY, id))
    }

    fn add_vendor(&self, mut vendor: Vendor) -> StoreResult<Vendor> {
        vendor.vendor_id = new_entity_id();

        self.conn
            .execute(
                &format!("INSERT INTO vendors ({VENDOR_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6);"),
                params![
                    vendor.vendor_id,
                    vendor.name,
                    vendor.contact,
                    vendor.phone,
                    vendor.email,
                    vendor.address,
                ],
            )
            .map_err(map_write_error)?;

        debug!(
            "event=vendor_create module=repo status=ok id={}",
            vendor.vendor_id
        );
        Ok(vendor)
    }

    fn update_vendor(&self, vendor: &Vendor) -> StoreResult<Vendor> {
        let updated = self
            .conn
            .query_row(
                &format!(
                    "UPDATE vendors
                     SET
                        name = ?1,
                        contact = ?2,
                        phone = ?3,
                        email = ?4,
                        address = ?5
                     WHERE vendor_id = ?6
                     RETURNING {VENDOR_COLUMNS};"
                ),
                params![
                    vendor.name,
                    vendor.contact,
                    vendor.phone,
                    vendor.email,
                    vendor.address,
                    vendor.vendor_id,
                ],
                parse_vendor_row,
            )
            .optional()
            .map_err(map_write_error)?;

        updated.ok_or_else(|| StoreError::not_found(VENDOR_ENTITY, &vendor.vendor_id))
    }

    fn delete_vendor(&self, id: &str) -> StoreResult<()> {
        let removed = self
            .conn
            .execute("DELETE FROM vendors WHERE vendor_id = ?1;", [id])?;

        debug!("event=vendor_delete module=repo status=ok id={id} removed={removed}");
        Ok(())
    }
}

fn parse_vendor_row(row: &Row<'_>) -> rusqlite::Result<Vendor> {
    Ok(Vendor {
        vendor_id: row.get("vendor_id")?,
        name: row.get("name")?,
        contact: row.get("contact")?,
        phone: row.get("phone")?,
        email: row.get("email")?,
        address: row.get("address")?,
    })
}
