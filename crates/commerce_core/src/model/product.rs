//! Product domain model.
//!
//! # Invariants
//! - `vendor_id` must name an existing vendor when persisted.

use crate::model::vendor::VendorId;
use serde::{Deserialize, Serialize};

/// Text id assigned to a product on create.
pub type ProductId = String;

/// A product sold by one vendor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Product {
    pub product_id: ProductId,
    pub name: String,
    pub price: f64,
    pub vendor_id: VendorId,
}

impl Product {
    /// Creates an unsaved product for the given vendor.
    pub fn new(name: impl Into<String>, price: f64, vendor_id: impl Into<VendorId>) -> Self {
        Self {
            name: name.into(),
            price,
            vendor_id: vendor_id.into(),
            ..Self::default()
        }
    }
}
