//! Entity value objects persisted by the commerce store.
//!
//! # Responsibility
//! - Define the record shapes read and written by the repositories.
//! - Keep the JSON wire shape (camelCase field names) next to the types.
//!
//! # Invariants
//! - Every entity is identified by a server-generated text id.
//! - Entities hold no references to each other beyond `Product::vendor_id`.

pub mod customer;
pub mod product;
pub mod service;
pub mod vendor;

use uuid::Uuid;

/// Generates a fresh entity id: a random v4 UUID in hyphenated lowercase text.
pub fn new_entity_id() -> String {
    Uuid::new_v4().to_string()
}
