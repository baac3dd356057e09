//! List membership domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use favorites_core::{FavoriteListId, ListProductId, Sku};

/// A SKU saved to a favorite list.
///
/// At most one row exists per `(favorite_list_id, sku)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListProduct {
    /// Unique membership ID.
    pub id: ListProductId,
    /// Owning list; immutable.
    pub favorite_list_id: FavoriteListId,
    /// Product SKU.
    pub sku: Sku,
    /// When the SKU was added.
    pub created_at: DateTime<Utc>,
    /// When the row was last touched.
    pub updated_at: DateTime<Utc>,
}

/// Outcome of adding a SKU to a list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddedProduct {
    /// The (new or pre-existing) membership row.
    pub product: ListProduct,
    /// `false` when the SKU was already on the list.
    pub created: bool,
}
