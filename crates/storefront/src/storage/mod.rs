//! Durable key-value storage.
//!
//! Every persisted value is a single text blob under a fixed key, overwritten
//! wholesale on each write. Two backends:
//!
//! - [`FileStore`] - one file per key in a data directory (the server and CLI)
//! - [`MemoryStore`] - process-local map (tests, ephemeral runs)

mod file;
mod memory;

use std::sync::Arc;

use thiserror::Error;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Errors from a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend could not read or write the value.
    #[error("storage I/O error for key '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
    /// The key contains characters the backend cannot store.
    #[error("invalid storage key '{0}' (allowed: A-Z, a-z, 0-9, '-', '_')")]
    InvalidKey(String),
}

/// A synchronous string key-value store.
///
/// Calls are local and bounded; they complete (or fail) before returning.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend fails. A missing key is `Ok(None)`.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend fails.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Deleting a missing key succeeds.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend fails.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Shared handle to a storage backend.
pub type SharedStore = Arc<dyn KeyValueStore>;

/// Check that `key` only uses characters safe in a file name.
pub(crate) fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}
