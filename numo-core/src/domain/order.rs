//! Order projection rendered into order emails
//!
//! Orders are persisted by the storefront; this crate only receives a
//! read-only copy and renders it.

use crate::error::Result;
use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetails {
    #[validate(length(min = 1, max = 64))]
    pub order_number: String,
    #[validate(length(min = 1))]
    pub order_id: String,
    #[validate(nested)]
    pub customer: Customer,
    #[validate(nested)]
    pub shipping_address: ShippingAddress,
    #[validate(length(min = 1), nested)]
    pub items: Vec<OrderItem>,
    #[validate(range(min = 0.0))]
    pub total_amount: f64,
    pub notes: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Customer {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ShippingAddress {
    #[validate(length(min = 1))]
    pub street: String,
    #[validate(length(min = 1))]
    pub city: String,
    pub state: String,
    pub zip: String,
    #[validate(length(min = 1))]
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(range(min = 1))]
    pub quantity: u32,
    #[serde(alias = "price")]
    #[validate(range(min = 0.0))]
    pub unit_price: f64,
    pub description: Option<String>,
}

impl OrderDetails {
    /// Read and validate an order from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let order: OrderDetails =
            serde_json::from_str(&raw).context("Failed to parse order JSON")?;
        order.validate()?;
        Ok(order)
    }
}

impl OrderItem {
    pub fn line_total(&self) -> f64 {
        self.unit_price * f64::from(self.quantity)
    }
}
