//! Command-line summary of a commerce store.
//!
//! # Responsibility
//! - Open the store described by an optional TOML config file (first
//!   argument) plus `COMMERCE_*` environment overrides.
//! - Print a deterministic per-entity row summary for quick sanity checks.

use commerce_core::{
    core_version, init_logging, Client, CustomerFilter, CustomerRepository, ProductFilter,
    ProductRepository, ServiceRepository, StoreConfig, StoreResult, VendorRepository,
};
use log::info;
use std::process::ExitCode;

struct StoreSummary {
    customers: usize,
    vendors: usize,
    products: usize,
    services: usize,
}

fn main() -> ExitCode {
    let mut config = match std::env::args().nth(1) {
        Some(path) => match StoreConfig::load(&path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("commerce_cli: {err}");
                return ExitCode::FAILURE;
            }
        },
        None => StoreConfig::default(),
    };
    config.apply_env();

    if let Some(log_dir) = config.logging.dir.as_deref() {
        if let Err(err) = init_logging(&config.logging.level, log_dir) {
            eprintln!("commerce_cli: {err}");
            return ExitCode::FAILURE;
        }
    }

    let client = match Client::from_config(&config) {
        Ok(client) => client,
        Err(err) => {
            eprintln!("commerce_cli: failed to open store: {err}");
            return ExitCode::FAILURE;
        }
    };

    match summarize(&client) {
        Ok(summary) => {
            info!("event=cli_summary module=cli status=ok");
            println!("commerce_core version={}", core_version());
            println!(
                "store={}",
                config
                    .database
                    .path
                    .as_deref()
                    .map_or_else(|| ":memory:".to_string(), |path| path.display().to_string())
            );
            println!("customers={}", summary.customers);
            println!("vendors={}", summary.vendors);
            println!("products={}", summary.products);
            println!("services={}", summary.services);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("commerce_cli: failed to read store: {err}");
            ExitCode::FAILURE
        }
    }
}

fn summarize(client: &Client) -> StoreResult<StoreSummary> {
    Ok(StoreSummary {
        customers: client.list_customers(&CustomerFilter::default())?.len(),
        vendors: client.list_vendors()?.len(),
        products: client.list_products(&ProductFilter::default())?.len(),
        services: client.list_services()?.len(),
    })
}
