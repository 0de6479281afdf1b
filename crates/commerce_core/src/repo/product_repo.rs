//! Product repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD APIs over the `products` table.
//! - Support exact-match listing by owning vendor.
//!
//! # Invariants
//! - `product_id` is assigned here on create and never rewritten by update.
//! - A product naming an unknown vendor is rejected by the foreign key and
//!   reported as a storage error, not as `Conflict`.

use crate::model::new_entity_id;
use crate::model::product::Product;
use crate::repo::{map_write_error, StoreError, StoreResult};
use log::debug;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};

pub const PRODUCT_ENTITY: &str = "product";

const PRODUCT_COLUMNS: &str = "product_id, name, price, vendor_id";

/// Exact-match filter for listing products. Unset fields do not constrain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub vendor_id: Option<String>,
}

impl ProductFilter {
    pub fn by_vendor(vendor_id: impl Into<String>) -> Self {
        Self {
            vendor_id: Some(vendor_id.into()),
        }
    }
}

/// Repository interface for product CRUD operations.
pub trait ProductRepository {
    fn list_products(&self, filter: &ProductFilter) -> StoreResult<Vec<Product>>;
    fn get_product(&self, id: &str) -> StoreResult<Product>;
    fn add_product(&self, product: Product) -> StoreResult<Product>;
    fn update_product(&self, product: &Product) -> StoreResult<Product>;
    fn delete_product(&self, id: &str) -> StoreResult<()>;
}

/// SQLite-backed product repository.
pub struct SqliteProductRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteProductRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ProductRepository for SqliteProductRepository<'_> {
    fn list_products(&self, filter: &ProductFilter) -> StoreResult<Vec<Product>> {
        let mut sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(vendor_id) = filter.vendor_id.as_deref() {
            sql.push_str(" AND vendor_id = ?");
            bind_values.push(Value::Text(vendor_id.to_string()));
        }

        sql.push_str(" ORDER BY rowid ASC;");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut products = Vec::new();

        while let Some(row) = rows.next()? {
            products.push(parse_product_row(row)?);
        }

        Ok(products)
    }

    fn get_product(&self, id: &str) -> StoreResult<Product> {
        self.conn
            .query_row(
                &format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE product_id = ?1;"),
                [id],
                parse_product_row,
            )
            .optional()?
            .ok_or_else(|| StoreError::not_found(PRODUCT_ENTITY, id))
    }

    fn add_product(&self, mut product: Product) -> StoreResult<Product> {
        product.product_id = new_entity_id();

        self.conn
            .execute(
                &format!("INSERT INTO products ({PRODUCT_COLUMNS}) VALUES (?1, ?2, ?3, ?4);"),
                params![
                    product.product_id,
                    product.name,
                    product.price,
                    product.vendor_id,
                ],
            )
            .map_err(map_write_error)?;

        debug!(
            "event=product_create module=repo status=ok id={} vendor_id={}",
            product.product_id, product.vendor_id
        );
        Ok(product)
    }

    fn update_product(&self, product: &Product) -> StoreResult<Product> {
        let updated = self
            .conn
            .query_row(
                &format!(
                    "UPDATE products
                     SET
                        name = ?1,
                        price = ?2,
                        vendor_id = ?3
                     WHERE product_id = ?4
                     RETURNING {PRODUCT_COLUMNS};"
                ),
                params![
                    product.name,
                    product.price,
                    product.vendor_id,
                    product.product_id,
                ],
                parse_product_row,
            )
            .optional()
            .map_err(map_write_error)?;

        updated.ok_or_else(|| StoreError::not_found(PRODUCT_ENTITY, &product.product_id))
    }

    fn delete_product(&self, id: &str) -> StoreResult<()> {
        let removed = self
            .conn
            .execute("DELETE FROM products WHERE product_id = ?1;", [id])?;

        debug!("event=product_delete module=repo status=ok id={id} removed={removed}");
        Ok(())
    }
}

fn parse_product_row(row: &Row<'_>) -> rusqlite::Result<Product> {
    Ok(Product {
        product_id: row.get("product_id")?,
        name: row.get("name")?,
        price: row.get("price")?,
        vendor_id: row.get("vendor_id")?,
    })
}
