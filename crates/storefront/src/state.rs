//! Application state shared across handlers.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::catalog::Catalog;
use crate::config::StorefrontConfig;
use crate::error::AppError;
use crate::services::{CartStore, SubmissionStore};
use crate::storage::SharedStore;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. The cart and submission
/// stores sit behind mutexes; guards must not be held across an `.await`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    cart: Mutex<CartStore>,
    submissions: Mutex<SubmissionStore>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// Restores the cart saved under `config.cart_key` from `storage`.
    #[must_use]
    pub fn new(config: StorefrontConfig, catalog: Catalog, storage: SharedStore) -> Self {
        let cart = CartStore::open(Arc::clone(&storage), config.cart_key.clone());
        let submissions = SubmissionStore::new(storage);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                cart: Mutex::new(cart),
                submissions: Mutex::new(submissions),
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Lock the cart store.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Internal` if a previous holder panicked.
    pub fn cart(&self) -> Result<MutexGuard<'_, CartStore>, AppError> {
        self.inner
            .cart
            .lock()
            .map_err(|_| AppError::Internal("cart lock poisoned".to_string()))
    }

    /// Lock the submission store.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Internal` if a previous holder panicked.
    pub fn submissions(&self) -> Result<MutexGuard<'_, SubmissionStore>, AppError> {
        self.inner
            .submissions
            .lock()
            .map_err(|_| AppError::Internal("submissions lock poisoned".to_string()))
    }
}
