//! Kitbag Core - Domain types and the cart state machine.
//!
//! This crate provides the types shared by every Kitbag component:
//! - `storefront` - JSON storefront API and the persisted cart store
//! - `cli` - Command-line access to the catalog, cart and product submissions
//!
//! # Architecture
//!
//! The core crate contains only types and pure transitions - no I/O, no storage
//! access, no HTTP. Persistence lives in the storefront crate, which feeds the
//! [`cart::CartSnapshot`] text format through a key-value store.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product IDs, prices, sizes, emails and catalog records
//! - [`cart`] - Line items, identity keys, the cart reducer and its snapshot format

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod types;

pub use cart::{
    Cart, CartAction, CartError, CartSnapshot, LineItem, LineKey, Outcome, SnapshotError,
};
pub use types::*;
