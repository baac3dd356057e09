//! Product data resolved from the catalog.

use serde::Serialize;

use favorites_core::{Price, Sku};

/// A product as shown inside a favorite list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub sku: Sku,
    pub name: String,
    pub price: Price,
    pub category: String,
    pub description: String,
    pub in_stock: bool,
}
