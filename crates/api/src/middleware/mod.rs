//! HTTP middleware stack for the favorites API.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (hub per request, transaction tracing)
//! 2. `TraceLayer` (request span with `request_id` and `user_id` fields)
//! 3. Request ID (add unique ID to each request)
//! 4. Identity (resolve or provision the caller; `/api` routes only)

pub mod auth;
pub mod identity;
pub mod request_id;

pub use auth::RequireUser;
pub use identity::identity_middleware;
pub use request_id::request_id_middleware;
