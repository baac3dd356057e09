//! Lifecycle status of a favorite list.

use serde::{Deserialize, Serialize};

/// Whether a favorite list is live or soft-deleted.
///
/// Deleted lists keep their row (and their memberships) but are invisible
/// through every owner-scoped read and write. The status is derived from the
/// nullable `deleted_at` column rather than relied upon as an implicit query
/// filter, so the ownership check can test it explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ListStatus {
    /// Visible to its owner.
    #[default]
    Active,
    /// Soft-deleted: retained in storage, hidden from every query.
    Deleted,
}

impl ListStatus {
    /// Derive the status from the soft-delete marker.
    #[must_use]
    pub const fn from_deleted_marker(deleted: bool) -> Self {
        if deleted { Self::Deleted } else { Self::Active }
    }

    /// Returns `true` for [`ListStatus::Active`].
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}

impl std::fmt::Display for ListStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Deleted => write!(f, "deleted"),
        }
    }
}
