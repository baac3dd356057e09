//! Favorites Core - Shared types library.
//!
//! This crate provides the domain types used across the favorites workspace:
//! - `api` - The HTTP service managing favorite lists
//! - `cli` - Command-line tools for migrations and user management
//!
//! # Architecture
//!
//! The core crate contains only types and parsing - no I/O, no database access,
//! no HTTP clients. Anything that reaches this crate's constructors has already
//! been validated, so the service layer never sees an empty list name or SKU.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, names, SKUs, emails, prices and credentials

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
