//! Favorite list domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use favorites_core::{FavoriteListId, ListName, ListStatus, UserId};

use super::Product;

/// A named collection of products owned by exactly one user.
///
/// Serializes to the public JSON shape
/// `{id, userId, name, createdAt, updatedAt}`; the soft-delete bookkeeping
/// is never exposed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteList {
    /// Unique list ID.
    pub id: FavoriteListId,
    /// Owning user; immutable after creation.
    pub user_id: UserId,
    /// Display name.
    pub name: ListName,
    /// When the list was created.
    pub created_at: DateTime<Utc>,
    /// When the list was last renamed.
    pub updated_at: DateTime<Utc>,
    /// Live or soft-deleted.
    #[serde(skip)]
    pub status: ListStatus,
    /// When the list was soft-deleted.
    #[serde(skip)]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl FavoriteList {
    /// Whether `user_id` owns this list.
    #[must_use]
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.user_id == user_id
    }
}

/// A list together with its resolved products.
#[derive(Debug, Clone, Serialize)]
pub struct FavoriteListWithProducts {
    /// The list itself.
    pub list: FavoriteList,
    /// Products resolved from the list's SKUs, in insertion order.
    pub products: Vec<Product>,
}
