//! Integration tests for Kitbag.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p kitbag-integration-tests
//! ```
//!
//! Each test starts the storefront in-process on an ephemeral port and talks
//! to it over HTTP with `reqwest`. No external services are needed.
//!
//! # Test Categories
//!
//! - `cart_api` - Cart operations and persistence across restarts
//! - `checkout_api` - Order placement
//! - `admin_products` - Product submission form

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use kitbag_storefront::AppState;
use kitbag_storefront::catalog::Catalog;
use kitbag_storefront::config::StorefrontConfig;
use kitbag_storefront::storage::{FileStore, MemoryStore, SharedStore};
use reqwest::{Client, Response};
use serde_json::Value;
use tempfile::TempDir;
use tokio::task::JoinHandle;

/// A storefront server running on a background task.
///
/// The server is stopped when this value is dropped.
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    pub storage: SharedStore,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a server over a fresh in-memory store.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    pub async fn start() -> Self {
        Self::with_storage(Arc::new(MemoryStore::new())).await
    }

    /// Start a server over the given store.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    #[allow(clippy::expect_used)]
    pub async fn with_storage(storage: SharedStore) -> Self {
        let state = AppState::new(
            StorefrontConfig::default(),
            Catalog::builtin(),
            Arc::clone(&storage),
        );
        let app = kitbag_storefront::app(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind test listener");
        let addr = listener.local_addr().expect("listener address");

        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            addr,
            client: Client::new(),
            storage,
            handle,
        }
    }

    /// Absolute URL for `path`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// `GET path`, returning status and JSON body.
    ///
    /// # Panics
    ///
    /// Panics if the request fails.
    pub async fn get(&self, path: &str) -> (u16, Value) {
        into_json(self.client.get(self.url(path)).send().await).await
    }

    /// `POST path` with a JSON body, returning status and JSON body.
    ///
    /// # Panics
    ///
    /// Panics if the request fails.
    pub async fn post(&self, path: &str, body: &Value) -> (u16, Value) {
        into_json(self.client.post(self.url(path)).json(body).send().await).await
    }

    /// `DELETE path`, returning the status.
    ///
    /// # Panics
    ///
    /// Panics if the request fails.
    #[allow(clippy::expect_used)]
    pub async fn delete(&self, path: &str) -> u16 {
        self.client
            .delete(self.url(path))
            .send()
            .await
            .expect("send request")
            .status()
            .as_u16()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[allow(clippy::expect_used)]
async fn into_json(response: reqwest::Result<Response>) -> (u16, Value) {
    let response = response.expect("send request");
    let status = response.status().as_u16();
    let text = response.text().await.expect("read body");
    let body = serde_json::from_str(&text).unwrap_or(Value::Null);
    (status, body)
}

/// A temporary data directory, removed on drop.
pub struct ScratchDir(TempDir);

impl ScratchDir {
    /// # Panics
    ///
    /// Panics if the directory cannot be created.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new() -> Self {
        Self(
            tempfile::Builder::new()
                .prefix("kitbag-it-")
                .tempdir()
                .expect("create temp dir"),
        )
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.0.path()
    }

    /// A file store rooted here.
    #[must_use]
    pub fn store(&self) -> SharedStore {
        Arc::new(FileStore::new(self.path()))
    }
}

impl Default for ScratchDir {
    fn default() -> Self {
        Self::new()
    }
}
