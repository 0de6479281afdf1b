//! Service domain model: a priced offering not tied to a vendor.

use serde::{Deserialize, Serialize};

pub type ServiceId = String;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Service {
    pub service_id: ServiceId,
    pub name: String,
    pub price: f64,
}

impl Service {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            price,
            ..Self::default()
        }
    }
}
