//! Customer repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD APIs over the `customers` table.
//! - Support exact-match listing by email.
//!
//! # Invariants
//! - `customer_id` is assigned here on create and never rewritten by update.
//! - Duplicate non-empty emails surface as `StoreError::Conflict`; any
//!   number of rows may leave `email` empty.

use crate::model::customer::Customer;
use crate::model::new_entity_id;
use crate::repo::{map_write_error, StoreError, StoreResult};
use log::debug;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};

/// Entity name reported by `StoreError::NotFound`.
pub const CUSTOMER_ENTITY: &str = "customer";

const CUSTOMER_COLUMNS: &str = "customer_id, first_name, last_name, email, phone, address";

/// Exact-match filter for listing customers. Unset fields do not constrain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerFilter {
    pub email: Option<String>,
}

impl CustomerFilter {
    pub fn by_email(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
        }
    }
}

/// Repository interface for customer CRUD operations.
pub trait CustomerRepository {
    fn list_customers(&self, filter: &CustomerFilter) -> StoreResult<Vec<Customer>>;
    fn get_customer(&self, id: &str) -> StoreResult<Customer>;
    /// Stores `customer` under a freshly generated id and returns the stored copy.
    fn add_customer(&self, customer: Customer) -> StoreResult<Customer>;
    /// Rewrites every mutable field of the customer matched by `customer_id`.
    fn update_customer(&self, customer: &Customer) -> StoreResult<Customer>;
    /// Removes the customer; succeeds when nothing matched.
    fn delete_customer(&self, id: &str) -> StoreResult<()>;
}

/// SQLite-backed customer repository.
pub struct SqliteCustomerRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCustomerRepository<'conn> {
    /// Wraps a migrated connection.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl CustomerRepository for SqliteCustomerRepository<'_> {
    fn list_customers(&self, filter: &CustomerFilter) -> StoreResult<Vec<Customer>> {
        let mut sql = format!("SELECT {CUSTOMER_COLUMNS} FROM customers WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(email) = filter.email.as_deref() {
            sql.push_str(" AND email = ?");
            bind_values.push(Value::Text(email.to_string()));
        }

        sql.push_str(" ORDER BY rowid ASC;");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut customers = Vec::new();

        while let Some(row) = rows.next()? {
            customers.push(parse_customer_row(row)?);
        }

        Ok(customers)
    }

    fn get_customer(&self, id: &str) -> StoreResult<Customer> {
        self.conn
            .query_row(
                &format!("SELECT {CUSTOMER_COLUMNS} FROM customers WHERE customer_id = ?1;"),
                [id],
                parse_customer_row,
            )
            .optional()?
            .ok_or_else(|| StoreError::not_found(CUSTOMER_ENTITY, id))
    }

    fn add_customer(&self, mut customer: Customer) -> StoreResult<Customer> {
        customer.customer_id = new_entity_id();

        self.conn
            .execute(
                &format!("INSERT INTO customers ({CUSTOMER_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6);"),
                params![
                    customer.customer_id,
                    customer.first_name,
                    customer.last_name,
                    customer.email,
                    customer.phone,
                    customer.address,
                ],
            )
            .map_err(map_write_error)?;

        debug!(
            "event=customer_create module=repo status=ok id={}",
            customer.customer_id
        );
        Ok(customer)
    }

    fn update_customer(&self, customer: &Customer) -> StoreResult<Customer> {
        let updated = self
            .conn
            .query_row(
                &format!(
                    "UPDATE customers
                     SET
                        first_name = ?1,
                        last_name = ?2,
                        email = ?3,
                        phone = ?4,
                        address = ?5
                     WHERE customer_id = ?6
                     RETURNING {CUSTOMER_COLUMNS};"
                ),
                params![
                    customer.first_name,
                    customer.last_name,
                    customer.email,
                    customer.phone,
                    customer.address,
                    customer.customer_id,
                ],
                parse_customer_row,
            )
            .optional()
            .map_err(map_write_error)?;

        updated.ok_or_else(|| StoreError::not_found(CUSTOMER_ENTITY, &customer.customer_id))
    }

    fn delete_customer(&self, id: &str) -> StoreResult<()> {
        let removed = self
            .conn
            .execute("DELETE FROM customers WHERE customer_id = ?1;", [id])?;

        debug!("event=customer_delete module=repo status=ok id={id} removed={removed}");
        Ok(())
    }
}

fn parse_customer_row(row: &Row<'_>) -> rusqlite::Result<Customer> {
    Ok(Customer {
        customer_id: row.get("customer_id")?,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        email: row.get("email")?,
        phone: row.get("phone")?,
        address: row.get("address")?,
    })
}
