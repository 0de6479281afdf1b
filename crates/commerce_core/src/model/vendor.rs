//! Vendor domain model.

use serde::{Deserialize, Serialize};

/// Text id assigned to a vendor on create.
pub type VendorId = String;

/// A vendor record. Products reference vendors by `vendor_id`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Vendor {
    pub vendor_id: VendorId,
    pub name: String,
    /// Name of the person to reach at the vendor.
    pub contact: String,
    pub phone: String,
    /// Optional; unique across vendors when non-empty.
    pub email: String,
    pub address: String,
}

impl Vendor {
    /// Creates an unsaved vendor with contact details left empty.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            ..Self::default()
        }
    }
}
