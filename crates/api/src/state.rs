//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::ApiConfig;
use crate::db::Store;
use crate::services::{MockCatalog, ProductLookup};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// the store, the product catalog, and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ApiConfig,
    store: Arc<dyn Store>,
    products: Arc<dyn ProductLookup>,
}

impl AppState {
    /// Create application state backed by `store` and the mock catalog.
    #[must_use]
    pub fn new(config: ApiConfig, store: Arc<dyn Store>) -> Self {
        Self::with_products(config, store, Arc::new(MockCatalog))
    }

    /// Create application state with an explicit product catalog.
    #[must_use]
    pub fn with_products(
        config: ApiConfig,
        store: Arc<dyn Store>,
        products: Arc<dyn ProductLookup>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                products,
            }),
        }
    }

    /// Get a reference to the API configuration.
    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.inner.config
    }

    /// Get a reference to the store.
    #[must_use]
    pub fn store(&self) -> &dyn Store {
        self.inner.store.as_ref()
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn products(&self) -> &dyn ProductLookup {
        self.inner.products.as_ref()
    }
}
