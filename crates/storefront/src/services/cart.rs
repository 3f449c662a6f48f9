//! Persisted cart store.
//!
//! [`CartStore`] is the single owner of the running application's cart. It is
//! created once at startup, restores the last snapshot from storage, and
//! writes a fresh snapshot after every operation that changes the cart.
//!
//! Storage problems never reach callers: a missing or unreadable snapshot
//! restores as an empty cart, and a failed write is logged while the
//! in-memory cart keeps the new state.

use kitbag_core::{Cart, CartAction, CartError, CartSnapshot, LineItem, LineKey, Outcome, Price};
use tracing::{debug, error, info, warn};

use crate::storage::SharedStore;

/// Default storage key for the cart snapshot.
pub const DEFAULT_CART_KEY: &str = "cart";

/// The application's cart plus its durable snapshot.
pub struct CartStore {
    cart: Cart,
    storage: SharedStore,
    key: String,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("key", &self.key)
            .field("lines", &self.cart.len())
            .finish_non_exhaustive()
    }
}

impl CartStore {
    /// Open the cart stored under `key`, or start empty.
    pub fn open(storage: SharedStore, key: impl Into<String>) -> Self {
        let key = key.into();
        let cart = restore(&storage, &key);
        Self { cart, storage, key }
    }

    /// Apply a cart action and persist the result if the cart changed.
    ///
    /// # Errors
    ///
    /// Returns the [`CartError`] from the transition; nothing is persisted and
    /// the cart is unchanged in that case.
    pub fn dispatch(&mut self, action: CartAction) -> Result<Outcome, CartError> {
        let name = action.name();
        let outcome = self.cart.apply(action).inspect_err(|e| {
            warn!(action = name, error = %e, "Rejected cart action");
        })?;

        if outcome.is_changed() {
            self.persist();
        }
        debug!(
            action = name,
            changed = outcome.is_changed(),
            lines = self.cart.len(),
            total = %self.cart.total(),
            "Cart updated"
        );
        Ok(outcome)
    }

    /// Add a line, merging with an existing line of the same key.
    ///
    /// # Errors
    ///
    /// See [`Cart::add`].
    pub fn add(&mut self, item: LineItem) -> Result<Outcome, CartError> {
        self.dispatch(CartAction::Add(item))
    }

    /// Remove the line with `key`, if present.
    pub fn remove(&mut self, key: LineKey) -> Outcome {
        self.dispatch(CartAction::Remove(key))
            .unwrap_or(Outcome::Unchanged)
    }

    /// Set a line's quantity; zero or less removes it.
    ///
    /// # Errors
    ///
    /// See [`Cart::update_quantity`].
    pub fn update_quantity(&mut self, key: LineKey, quantity: i64) -> Result<Outcome, CartError> {
        self.dispatch(CartAction::UpdateQuantity { key, quantity })
    }

    /// Empty the cart.
    pub fn clear(&mut self) -> Outcome {
        self.dispatch(CartAction::Clear)
            .unwrap_or(Outcome::Unchanged)
    }

    /// The current cart.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Current total, recomputed from the lines.
    #[must_use]
    pub fn total(&self) -> Price {
        self.cart.total()
    }

    /// The storage key the snapshot lives under.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    fn persist(&self) {
        let blob = match CartSnapshot::encode(&self.cart) {
            Ok(blob) => blob,
            Err(e) => {
                error!(key = %self.key, error = %e, "Failed to serialize cart snapshot");
                return;
            }
        };

        if let Err(e) = self.storage.set(&self.key, &blob) {
            error!(key = %self.key, error = %e, "Failed to persist cart snapshot");
        }
    }
}

fn restore(storage: &SharedStore, key: &str) -> Cart {
    let blob = match storage.get(key) {
        Ok(Some(blob)) => blob,
        Ok(None) => {
            debug!(key, "No saved cart, starting empty");
            return Cart::new();
        }
        Err(e) => {
            warn!(key, error = %e, "Could not read saved cart, starting empty");
            return Cart::new();
        }
    };

    match CartSnapshot::decode(&blob) {
        Ok(cart) => {
            info!(key, lines = cart.len(), "Restored saved cart");
            cart
        }
        Err(e) => {
            warn!(key, error = %e, "Discarding unreadable saved cart");
            Cart::new()
        }
    }
}
