//! Data-access core for the commerce store.
//! Customers, vendors, products and services persisted in SQLite behind
//! per-entity repository traits.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;

pub use config::{ConfigError, DatabaseConfig, LoggingConfig, StoreConfig};
pub use db::{Client, DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::customer::{Customer, CustomerId};
pub use model::product::{Product, ProductId};
pub use model::service::{Service, ServiceId};
pub use model::vendor::{Vendor, VendorId};
pub use repo::customer_repo::{
    CustomerFilter, CustomerRepository, SqliteCustomerRepository, CUSTOMER_ENTITY,
};
pub use repo::product_repo::{
    ProductFilter, ProductRepository, SqliteProductRepository, PRODUCT_ENTITY,
};
pub use repo::service_repo::{ServiceRepository, SqliteServiceRepository, SERVICE_ENTITY};
pub use repo::vendor_repo::{SqliteVendorRepository, VendorRepository, VENDOR_ENTITY};
pub use repo::{StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
