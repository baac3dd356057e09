//! Business logic services.
//!
//! # Services
//!
//! - `identity` - Resolves request credentials to a user, provisioning
//!   anonymous accounts when no credential is presented
//! - `ownership` - Single-owner access checks for lists and their memberships
//! - `lists` - Favorite list CRUD
//! - `list_products` - Adding and removing SKUs on a list
//! - `products` - Product lookup by SKU

mod error;
pub mod identity;
pub mod list_products;
pub mod lists;
pub mod ownership;
pub mod products;

pub use error::FavoritesError;
pub use identity::{AuthError, Credentials, IdentityResolver, Provisioned, Resolution};
pub use list_products::ListProductService;
pub use lists::FavoriteListService;
pub use ownership::{Owned, OwnershipGuard};
pub use products::{MockCatalog, ProductLookup};
