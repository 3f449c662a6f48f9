//! CLI command implementations.

pub mod cart;
pub mod catalog;
pub mod submissions;

use std::path::PathBuf;
use std::sync::Arc;

use kitbag_storefront::catalog::Catalog;
use kitbag_storefront::config::{ConfigError, StorefrontConfig};
use kitbag_storefront::services::{CartStore, SubmissionStore};
use kitbag_storefront::storage::{FileStore, SharedStore};
use tracing::debug;

/// What every command works against: the catalog and the on-disk store.
pub struct Context {
    pub config: StorefrontConfig,
    pub catalog: Catalog,
    storage: SharedStore,
}

impl Context {
    /// Load configuration from the environment, with `data_dir` taking
    /// precedence over `KITBAG_DATA_DIR`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if an environment variable is invalid.
    pub fn load(data_dir: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut config = StorefrontConfig::from_env()?;
        if let Some(dir) = data_dir {
            config.data_dir = dir;
        }
        debug!(data_dir = %config.data_dir.display(), "Using data directory");

        let storage: SharedStore = Arc::new(FileStore::new(config.data_dir.clone()));
        Ok(Self {
            config,
            catalog: Catalog::builtin(),
            storage,
        })
    }

    /// Restore the persisted cart.
    #[must_use]
    pub fn cart_store(&self) -> CartStore {
        CartStore::open(Arc::clone(&self.storage), self.config.cart_key.clone())
    }

    #[must_use]
    pub fn submission_store(&self) -> SubmissionStore {
        SubmissionStore::new(Arc::clone(&self.storage))
    }
}
