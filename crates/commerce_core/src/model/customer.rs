//! Customer domain model.

use serde::{Deserialize, Serialize};

/// Text id assigned to a customer on create.
pub type CustomerId = String;

/// A customer record.
///
/// `email` is optional; when non-empty it is unique across customers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Customer {
    /// Empty until the store assigns one.
    pub customer_id: CustomerId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

impl Customer {
    /// Creates an unsaved customer with contact fields left empty.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            ..Self::default()
        }
    }
}
