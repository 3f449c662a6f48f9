//! Kitbag storefront library.
//!
//! The jersey catalog, the persisted cart, checkout and the admin product
//! form, served as a JSON API. The `kb-cli` tool and the integration tests
//! drive the same code through this library.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;
pub mod storage;

pub use routes::app;
pub use state::AppState;
