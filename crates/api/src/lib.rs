//! Favorites API library.
//!
//! An HTTP service that lets each caller keep named lists of product SKUs.
//! Callers are identified per request by a bearer token or a long-lived
//! cookie; a caller with neither gets an anonymous account on first contact.
//! Lists are strictly single-owner: a list owned by someone else is
//! indistinguishable from one that does not exist.
//!
//! The router is exposed through [`app`] so it can be driven in tests
//! without binding a socket.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

use std::sync::Arc;

use axum::Router;
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::config::{ApiConfig, ConfigError, StorageBackend};
use crate::db::{MemoryStore, PgStore, Store};
use crate::state::AppState;

/// Build the application router with request tracing.
///
/// Sentry layers are added by the binary, outside this router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::routes(&state))
        .layer(axum::middleware::from_fn(
            middleware::request_id_middleware,
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        user_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}

/// Errors that prevent the store from being opened.
#[derive(Debug, thiserror::Error)]
pub enum StoreInitError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Open the store selected by the configuration.
///
/// # Errors
///
/// Returns `StoreInitError::Config` if `PostgreSQL` is selected without a URL.
/// Returns `StoreInitError::Database` if the pool cannot connect.
pub async fn open_store(config: &ApiConfig) -> Result<Arc<dyn Store>, StoreInitError> {
    match config.storage {
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory store; data is lost on restart");
            Ok(Arc::new(MemoryStore::new()))
        }
        StorageBackend::Postgres => {
            let url = config.database_url.as_ref().ok_or_else(|| {
                ConfigError::MissingEnvVar("FAVORITES_DATABASE_URL".to_owned())
            })?;
            let pool = db::create_pool(url).await?;
            tracing::info!("Database pool created");
            Ok(Arc::new(PgStore::new(pool)))
        }
    }
}
