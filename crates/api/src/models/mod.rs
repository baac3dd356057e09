//! Domain models for the favorites API.
//!
//! These types represent validated domain objects separate from database row
//! types. The serializable ones double as the JSON response bodies.

pub mod favorite_list;
pub mod identity;
pub mod list_product;
pub mod product;
pub mod user;

pub use favorite_list::{FavoriteList, FavoriteListWithProducts};
pub use identity::CurrentUser;
pub use list_product::{AddedProduct, ListProduct};
pub use product::Product;
pub use user::{NewUser, User};
