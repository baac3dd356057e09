//! Core types for the favorites domain.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod credential;
pub mod email;
pub mod id;
pub mod name;
pub mod price;
pub mod sku;
pub mod status;

pub use credential::{BearerToken, BearerTokenError};
pub use email::{Email, EmailError};
pub use id::*;
pub use name::{ListName, ListNameError};
pub use price::Price;
pub use sku::{Sku, SkuError};
pub use status::ListStatus;
