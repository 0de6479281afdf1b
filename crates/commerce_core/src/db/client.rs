//! Shared store client.
//!
//! # Responsibility
//! - Own the single SQLite connection used by every entity repository.
//! - Serialize access so one `Client` can be shared across threads.
//! - Expose an interrupt handle so callers can cancel in-flight statements.
//!
//! # Invariants
//! - The wrapped connection is migrated and has `foreign_keys=ON`.
//! - Each repository call holds the lock for exactly one statement.

use super::migrations::{current_user_version, latest_version, REQUIRED_TABLES};
use super::{open_db, open_db_in_memory};
use crate::config::StoreConfig;
use crate::model::customer::Customer;
use crate::model::product::Product;
use crate::model::service::Service;
use crate::model::vendor::Vendor;
use crate::repo::customer_repo::{CustomerFilter, CustomerRepository, SqliteCustomerRepository};
use crate::repo::product_repo::{ProductFilter, ProductRepository, SqliteProductRepository};
use crate::repo::service_repo::{ServiceRepository, SqliteServiceRepository};
use crate::repo::vendor_repo::{SqliteVendorRepository, VendorRepository};
use crate::repo::{StoreError, StoreResult};
use log::info;
use rusqlite::{Connection, InterruptHandle};
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

/// Connection holder implementing every entity repository.
pub struct Client {
    conn: Mutex<Connection>,
    interrupt: Arc<InterruptHandle>,
}

impl Client {
    /// Opens (creating if needed) and migrates a SQLite file.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        Ok(Self::from_ready(open_db(path)?))
    }

    /// Opens an empty, migrated in-memory store.
    pub fn open_in_memory() -> StoreResult<Self> {
        Ok(Self::from_ready(open_db_in_memory()?))
    }

    /// Opens the store described by `config`.
    pub fn from_config(config: &StoreConfig) -> StoreResult<Self> {
        let conn = match config.database.path.as_deref() {
            Some(path) => open_db(path)?,
            None => open_db_in_memory()?,
        };
        conn.busy_timeout(config.database.busy_timeout())?;
        Ok(Self::from_ready(conn))
    }

    /// Adopts a connection migrated elsewhere.
    ///
    /// # Errors
    /// - `UninitializedConnection` when the schema version is not the latest.
    /// - `MissingRequiredTable` when an entity table is absent.
    pub fn try_from_connection(conn: Connection) -> StoreResult<Self> {
        ensure_connection_ready(&conn)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(Self::from_ready(conn))
    }

    fn from_ready(conn: Connection) -> Self {
        let interrupt = Arc::new(conn.get_interrupt_handle());
        info!("event=client_ready module=db status=ok");
        Self {
            conn: Mutex::new(conn),
            interrupt,
        }
    }

    /// Returns a handle that aborts the statement currently running on this
    /// client. The aborted call fails with `StoreError::Db` (`SQLITE_INTERRUPT`).
    pub fn interrupt_handle(&self) -> Arc<InterruptHandle> {
        Arc::clone(&self.interrupt)
    }

    /// Runs `f` with exclusive access to the underlying connection.
    pub(crate) fn with_connection<T>(&self, f: impl FnOnce(&Connection) -> T) -> T {
        // A panic in another caller cannot leave the connection mid-statement.
        let conn = self.conn.lock().unwrap_or_else(PoisonError::into_inner);
        f(&conn)
    }
}

impl CustomerRepository for Client {
    fn list_customers(&self, filter: &CustomerFilter) -> StoreResult<Vec<Customer>> {
        self.with_connection(|conn| SqliteCustomerRepository::new(conn).list_customers(filter))
    }

    fn get_customer(&self, id: &str) -> StoreResult<Customer> {
        self.with_connection(|conn| SqliteCustomerRepository::new(conn).get_customer(id))
    }

    fn add_customer(&self, customer: Customer) -> StoreResult<Customer> {
        self.with_connection(|conn| SqliteCustomerRepository::new(conn).add_customer(customer))
    }

    fn update_customer(&self, customer: &Customer) -> StoreResult<Customer> {
        self.with_connection(|conn| SqliteCustomerRepository::new(conn).update_customer(customer))
    }

    fn delete_customer(&self, id: &str) -> StoreResult<()> {
        self.with_connection(|conn| SqliteCustomerRepository::new(conn).delete_customer(id))
    }
}

impl VendorRepository for Client {
    fn list_vendors(&self) -> StoreResult<Vec<Vendor>> {
        self.with_connection(|conn| SqliteVendorRepository::new(conn).list_vendors())
    }

    fn get_vendor(&self, id: &str) -> StoreResult<Vendor> {
        self.with_connection(|conn| SqliteVendorRepository::new(conn).get_vendor(id))
    }

    fn add_vendor(&self, vendor: Vendor) -> StoreResult<Vendor> {
        self.with_connection(|conn| SqliteVendorRepository::new(conn).add_vendor(vendor))
    }

    fn update_vendor(&self, vendor: &Vendor) -> StoreResult<Vendor> {
        self.with_connection(|conn| SqliteVendorRepository::new(conn).update_vendor(vendor))
    }

    fn delete_vendor(&self, id: &str) -> StoreResult<()> {
        self.with_connection(|conn| SqliteVendorRepository::new(conn).delete_vendor(id))
    }
}

impl ProductRepository for Client {
    fn list_products(&self, filter: &ProductFilter) -> StoreResult<Vec<Product>> {
        self.with_connection(|conn| SqliteProductRepository::new(conn).list_products(filter))
    }

    fn get_product(&self, id: &str) -> StoreResult<Product> {
        self.with_connection(|conn| SqliteProductRepository::new(conn).get_product(id))
    }

    fn add_product(&self, product: Product) -> StoreResult<Product> {
        self.with_connection(|conn| SqliteProductRepository::new(conn).add_product(product))
    }

    fn update_product(&self, product: &Product) -> StoreResult<Product> {
        self.with_connection(|conn| SqliteProductRepository::new(conn).update_product(product))
    }

    fn delete_product(&self, id: &str) -> StoreResult<()> {
        self.with_connection(|conn| SqliteProductRepository::new(conn).delete_product(id))
    }
}

impl ServiceRepository for Client {
    fn list_services(&self) -> StoreResult<Vec<Service>> {
        self.with_connection(|conn| SqliteServiceRepository::new(conn).list_services())
    }

    fn get_service(&self, id: &str) -> StoreResult<Service> {
        self.with_connection(|conn| SqliteServiceRepository::new(conn).get_service(id))
    }

    fn add_service(&self, service: Service) -> StoreResult<Service> {
        self.with_connection(|conn| SqliteServiceRepository::new(conn).add_service(service))
    }

    fn update_service(&self, service: &Service) -> StoreResult<Service> {
        self.with_connection(|conn| SqliteServiceRepository::new(conn).update_service(service))
    }

    fn delete_service(&self, id: &str) -> StoreResult<()> {
        self.with_connection(|conn| SqliteServiceRepository::new(conn).delete_service(id))
    }
}

fn ensure_connection_ready(conn: &Connection) -> StoreResult<()> {
    let expected_version = latest_version();
    let actual_version = current_user_version(conn)?;
    if actual_version != expected_version {
        return Err(StoreError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    for &table in REQUIRED_TABLES {
        if !table_exists(conn, table)? {
            return Err(StoreError::MissingRequiredTable(table));
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> StoreResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

#[cfg(test)]
mod tests {
    use super::Client;
    use crate::repo::customer_repo::{CustomerFilter, CustomerRepository};
    use rusqlite::ErrorCode;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn interrupt_handle_cancels_running_statement() {
        let client = Arc::new(Client::open_in_memory().unwrap());
        let interrupt = client.interrupt_handle();

        let runner = {
            let client = Arc::clone(&client);
            thread::spawn(move || {
                client.with_connection(|conn| {
                    conn.query_row(
                        "WITH RECURSIVE counter(n) AS (
                            SELECT 1 UNION ALL SELECT n + 1 FROM counter
                        )
                        SELECT COUNT(*) FROM counter;",
                        [],
                        |row| row.get::<_, i64>(0),
                    )
                })
            })
        };

        while !runner.is_finished() {
            interrupt.interrupt();
            thread::sleep(Duration::from_millis(5));
        }

        let err = runner.join().unwrap().unwrap_err();
        assert_eq!(err.sqlite_error_code(), Some(ErrorCode::OperationInterrupted));

        // Still usable after cancellation.
        assert!(client
            .list_customers(&CustomerFilter::default())
            .unwrap()
            .is_empty());
    }
}
