//! HTTP route handlers for the favorites API.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                          - Liveness check
//! GET    /health/ready                    - Readiness check (store ping)
//!
//! # Favorite lists (identity middleware)
//! GET    /api/lists                       - Caller's lists
//! POST   /api/lists                       - Create list
//! GET    /api/lists/{id}                  - List with resolved products
//! PUT    /api/lists/{id}                  - Rename list
//! DELETE /api/lists/{id}                  - Soft-delete list
//! POST   /api/lists/{id}/products         - Add SKU
//! DELETE /api/lists/{id}/products/{sku}   - Remove SKU
//! ```

pub mod extract;
pub mod health;
pub mod lists;

use axum::{
    Router, middleware,
    routing::{delete, get, post},
};

use crate::middleware::identity_middleware;
use crate::state::AppState;

/// Create the favorite list routes router.
pub fn list_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(lists::index).post(lists::store))
        .route(
            "/{id}",
            get(lists::show).put(lists::update).delete(lists::destroy),
        )
        .route("/{id}/products", post(lists::add_product))
        .route("/{id}/products/{sku}", delete(lists::remove_product))
}

/// Create all routes for the API.
///
/// Only matched `/api` routes run the identity middleware, so unknown paths
/// and health checks never provision users.
pub fn routes(state: &AppState) -> Router<AppState> {
    let api = Router::new()
        .nest("/lists", list_routes())
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            identity_middleware,
        ));

    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .nest("/api", api)
}
