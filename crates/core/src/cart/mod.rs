//! Shopping cart state machine.
//!
//! A [`Cart`] is an ordered list of [`LineItem`]s. It only changes through the
//! four [`CartAction`]s, applied by [`Cart::apply`]. Every transition either
//! applies completely or leaves the cart untouched.
//!
//! # Invariants
//!
//! - No two lines share a [`LineKey`] (product, size, player label).
//! - Every line has `quantity >= 1`.
//! - New lines are appended; merged or updated lines keep their position.
//!
//! A missing player label and an empty one are different keys: `None` is
//! "no customization", `Some("")` is a (degenerate) customization.

mod snapshot;

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductId, Size};

pub use snapshot::{CartSnapshot, SNAPSHOT_VERSION, SnapshotError};

/// Errors raised by cart transitions.
///
/// A transition that returns an error has not modified the cart.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CartError {
    /// A line was added with a quantity of zero.
    #[error("quantity must be at least 1")]
    InvalidQuantity,
    /// The resulting quantity does not fit in a line.
    #[error("quantity for {key} would exceed {max}")]
    QuantityOverflow {
        /// The line whose quantity overflowed.
        key: LineKey,
        /// Largest quantity a line can hold.
        max: u32,
    },
    /// Two lines share an identity key.
    #[error("cart contains more than one line for {0}")]
    DuplicateLine(LineKey),
    /// A line total or the cart total is outside the representable range.
    #[error("cart total would overflow at {0}")]
    TotalOverflow(LineKey),
}

/// One row in the cart.
///
/// Name, price and image are a snapshot taken when the line was first added.
/// JSON field names match the snapshot format the browser storefront wrote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(rename = "id")]
    pub product_id: ProductId,
    pub name: String,
    #[serde(rename = "price")]
    pub unit_price: Price,
    pub image: String,
    #[serde(rename = "selectedSize")]
    pub size: Size,
    #[serde(
        rename = "selectedPlayer",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub player: Option<String>,
    pub quantity: u32,
}

impl LineItem {
    /// The identity key of this line.
    #[must_use]
    pub fn key(&self) -> LineKey {
        LineKey {
            product_id: self.product_id.clone(),
            size: self.size,
            player: self.player.clone(),
        }
    }

    /// Whether this line is identified by `key`.
    #[must_use]
    pub fn matches(&self, key: &LineKey) -> bool {
        self.product_id == key.product_id && self.size == key.size && self.player == key.player
    }

    /// `unit_price * quantity`.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price.times(self.quantity)
    }

    /// `unit_price * quantity`, or `None` if it is out of range.
    #[must_use]
    pub fn checked_line_total(&self) -> Option<Price> {
        self.unit_price.checked_times(self.quantity)
    }
}

/// Identity of a cart line: product, size and optional player label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineKey {
    pub product_id: ProductId,
    pub size: Size,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player: Option<String>,
}

impl LineKey {
    /// Create a key.
    #[must_use]
    pub fn new(product_id: impl Into<ProductId>, size: Size, player: Option<String>) -> Self {
        Self {
            product_id: product_id.into(),
            size,
            player,
        }
    }

    /// Create a key from a typed player label, normalized the way
    /// [`Product::line_item`](crate::Product::line_item) stores it: trimmed,
    /// with a blank label meaning no customization.
    #[must_use]
    pub fn from_label(product_id: impl Into<ProductId>, size: Size, player: Option<&str>) -> Self {
        Self::new(product_id, size, normalize_label(player))
    }
}

pub(crate) fn normalize_label(player: Option<&str>) -> Option<String> {
    player
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .map(str::to_owned)
}

impl fmt::Display for LineKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.player {
            Some(player) => write!(f, "{} ({}, \"{player}\")", self.product_id, self.size),
            None => write!(f, "{} ({})", self.product_id, self.size),
        }
    }
}

/// The closed set of cart transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartAction {
    /// Merge into the line with the same key, or append a new line.
    Add(LineItem),
    /// Delete the line with this key, if any.
    Remove(LineKey),
    /// Set a line's quantity; zero or less removes the line.
    UpdateQuantity { key: LineKey, quantity: i64 },
    /// Empty the cart.
    Clear,
}

impl CartAction {
    /// Short name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Add(_) => "add",
            Self::Remove(_) => "remove",
            Self::UpdateQuantity { .. } => "update_quantity",
            Self::Clear => "clear",
        }
    }
}

/// Whether a successful transition changed the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Changed,
    Unchanged,
}

impl Outcome {
    #[must_use]
    pub const fn is_changed(self) -> bool {
        matches!(self, Self::Changed)
    }
}

/// An ordered list of cart lines with unique identity keys.
///
/// Every line total and the cart total fit in a [`Price`], so [`Cart::total`]
/// is always exact.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Build a cart from existing lines, checking the invariants.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidQuantity`] if a line has quantity zero,
    /// [`CartError::DuplicateLine`] if two lines share a key and
    /// [`CartError::TotalOverflow`] if the prices cannot be summed.
    pub fn from_items(items: Vec<LineItem>) -> Result<Self, CartError> {
        for (index, item) in items.iter().enumerate() {
            if item.quantity == 0 {
                return Err(CartError::InvalidQuantity);
            }
            let key = item.key();
            if items.iter().skip(index + 1).any(|other| other.matches(&key)) {
                return Err(CartError::DuplicateLine(key));
            }
        }
        checked_total(&items)?;
        Ok(Self { items })
    }

    /// Apply one transition.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] when the action's arguments are out of range.
    /// The cart is unchanged in that case.
    pub fn apply(&mut self, action: CartAction) -> Result<Outcome, CartError> {
        match action {
            CartAction::Add(item) => self.add(item),
            CartAction::Remove(key) => Ok(self.remove(&key)),
            CartAction::UpdateQuantity { key, quantity } => self.update_quantity(&key, quantity),
            CartAction::Clear => Ok(self.clear()),
        }
    }

    /// Add a line, merging quantities with an existing line of the same key.
    ///
    /// On a merge the existing line's name, price and image are kept.
    ///
    /// # Errors
    ///
    /// [`CartError::InvalidQuantity`] for a zero quantity,
    /// [`CartError::QuantityOverflow`] if the merged quantity does not fit and
    /// [`CartError::TotalOverflow`] if the cart total would leave the price range.
    pub fn add(&mut self, item: LineItem) -> Result<Outcome, CartError> {
        if item.quantity == 0 {
            return Err(CartError::InvalidQuantity);
        }

        let key = item.key();
        match self.position(&key) {
            Some((index, existing)) => {
                let quantity = existing
                    .checked_add(item.quantity)
                    .ok_or_else(|| CartError::QuantityOverflow {
                        key: key.clone(),
                        max: u32::MAX,
                    })?;
                self.set_quantity_checked(index, quantity)?;
            }
            None => {
                self.items.push(item);
                if let Err(e) = checked_total(&self.items) {
                    self.items.pop();
                    return Err(e);
                }
            }
        }
        Ok(Outcome::Changed)
    }

    /// Remove the line with `key`. Removing a missing line is a no-op.
    pub fn remove(&mut self, key: &LineKey) -> Outcome {
        let before = self.items.len();
        self.items.retain(|line| !line.matches(key));
        if self.items.len() == before {
            Outcome::Unchanged
        } else {
            Outcome::Changed
        }
    }

    /// Set the quantity of the line with `key`.
    ///
    /// A quantity of zero or less removes the line. Updating a missing line
    /// is a no-op.
    ///
    /// # Errors
    ///
    /// [`CartError::QuantityOverflow`] if `quantity` does not fit in a line,
    /// [`CartError::TotalOverflow`] if the cart total would leave the price range.
    pub fn update_quantity(&mut self, key: &LineKey, quantity: i64) -> Result<Outcome, CartError> {
        if quantity <= 0 {
            return Ok(self.remove(key));
        }
        let quantity = u32::try_from(quantity).map_err(|_| CartError::QuantityOverflow {
            key: key.clone(),
            max: u32::MAX,
        })?;

        match self.position(key) {
            Some((_, existing)) if existing == quantity => Ok(Outcome::Unchanged),
            Some((index, _)) => {
                self.set_quantity_checked(index, quantity)?;
                Ok(Outcome::Changed)
            }
            None => Ok(Outcome::Unchanged),
        }
    }

    /// Index and quantity of the line with `key`.
    fn position(&self, key: &LineKey) -> Option<(usize, u32)> {
        self.items
            .iter()
            .enumerate()
            .find_map(|(index, line)| line.matches(key).then_some((index, line.quantity)))
    }

    /// Set the quantity of the line at `index`, rolling back if the total
    /// would overflow.
    fn set_quantity_checked(&mut self, index: usize, quantity: u32) -> Result<(), CartError> {
        let Some(line) = self.items.get_mut(index) else {
            return Ok(());
        };
        let previous = core::mem::replace(&mut line.quantity, quantity);
        if let Err(e) = checked_total(&self.items) {
            if let Some(line) = self.items.get_mut(index) {
                line.quantity = previous;
            }
            return Err(e);
        }
        Ok(())
    }

    /// Remove every line.
    pub fn clear(&mut self) -> Outcome {
        if self.items.is_empty() {
            Outcome::Unchanged
        } else {
            self.items.clear();
            Outcome::Changed
        }
    }

    /// Lines in display order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// The line with `key`, if present.
    #[must_use]
    pub fn find(&self, key: &LineKey) -> Option<&LineItem> {
        self.items.iter().find(|line| line.matches(key))
    }

    /// Sum of `unit_price * quantity` over all lines.
    #[must_use]
    pub fn total(&self) -> Price {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// Number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Sum of the line totals, failing on the first line that overflows.
fn checked_total(items: &[LineItem]) -> Result<Price, CartError> {
    items.iter().try_fold(Price::zero(), |total, line| {
        line.checked_line_total()
            .and_then(|line_total| total.checked_add(line_total))
            .ok_or_else(|| CartError::TotalOverflow(line.key()))
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn line(id: &str, size: Size, player: Option<&str>, quantity: u32, cents: i64) -> LineItem {
        LineItem {
            product_id: ProductId::new(id),
            name: format!("{id} jersey"),
            unit_price: Price::from_cents(cents),
            image: format!("/images/{id}.webp"),
            size,
            player: player.map(str::to_owned),
            quantity,
        }
    }

    fn key(id: &str, size: Size, player: Option<&str>) -> LineKey {
        LineKey::new(id, size, player.map(str::to_owned))
    }

    #[test]
    fn test_add_then_merge_scenario() {
        let mut cart = Cart::new();
        cart.apply(CartAction::Add(line("A", Size::M, None, 1, 1000)))
            .unwrap();
        cart.apply(CartAction::Add(line("A", Size::M, None, 2, 1000)))
            .unwrap();

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].quantity, 3);
        assert_eq!(cart.total(), Price::from_cents(3000));

        cart.apply(CartAction::UpdateQuantity {
            key: key("A", Size::M, None),
            quantity: 0,
        })
        .unwrap();
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Price::zero());
    }

    #[test]
    fn test_merge_keeps_first_snapshot_and_position() {
        let mut cart = Cart::new();
        cart.add(line("A", Size::M, None, 1, 1000)).unwrap();
        cart.add(line("B", Size::L, None, 1, 2000)).unwrap();

        let mut repriced = line("A", Size::M, None, 4, 9999);
        repriced.name = "Renamed".to_string();
        cart.add(repriced).unwrap();

        assert_eq!(cart.items()[0].product_id.as_str(), "A");
        assert_eq!(cart.items()[0].quantity, 5);
        assert_eq!(cart.items()[0].unit_price, Price::from_cents(1000));
        assert_eq!(cart.items()[0].name, "A jersey");
        assert_eq!(cart.items()[1].product_id.as_str(), "B");
    }

    #[test]
    fn test_size_and_player_create_distinct_lines() {
        let mut cart = Cart::new();
        cart.add(line("A", Size::M, None, 1, 1000)).unwrap();
        cart.add(line("A", Size::L, None, 1, 1000)).unwrap();
        cart.add(line("A", Size::M, Some("Messi"), 1, 1000)).unwrap();
        cart.add(line("A", Size::M, Some(""), 1, 1000)).unwrap();
        cart.add(line("A", Size::M, Some("Messi"), 2, 1000)).unwrap();

        assert_eq!(cart.len(), 4);
        assert_eq!(cart.find(&key("A", Size::M, Some("Messi"))).unwrap().quantity, 3);
        assert_eq!(cart.find(&key("A", Size::M, Some(""))).unwrap().quantity, 1);
        assert_eq!(cart.find(&key("A", Size::M, None)).unwrap().quantity, 1);
    }

    #[test]
    fn test_keys_stay_unique_over_many_adds() {
        let sizes = [Size::S, Size::M, Size::L];
        let players = [None, Some("Kane"), Some("")];
        let mut cart = Cart::new();
        for round in 0..4_u32 {
            for (i, size) in sizes.iter().enumerate() {
                for player in players {
                    let id = if (round as usize + i) % 2 == 0 { "A" } else { "B" };
                    cart.add(line(id, *size, player, round + 1, 500)).unwrap();
                }
            }
        }

        for (i, a) in cart.items().iter().enumerate() {
            for b in cart.items().iter().skip(i + 1) {
                assert_ne!(a.key(), b.key());
            }
        }
        assert_eq!(cart.item_count(), (1 + 2 + 3 + 4) * 9);
    }

    #[test]
    fn test_add_zero_quantity_is_rejected_without_mutation() {
        let mut cart = Cart::new();
        cart.add(line("A", Size::M, None, 1, 1000)).unwrap();
        let before = cart.clone();

        assert_eq!(
            cart.add(line("A", Size::M, None, 0, 1000)),
            Err(CartError::InvalidQuantity)
        );
        assert_eq!(cart, before);
    }

    #[test]
    fn test_add_overflow_is_rejected_without_mutation() {
        let mut cart = Cart::new();
        cart.add(line("A", Size::M, None, u32::MAX, 1)).unwrap();
        let before = cart.clone();

        let err = cart.add(line("A", Size::M, None, 1, 1)).unwrap_err();
        assert!(matches!(err, CartError::QuantityOverflow { .. }));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_remove_missing_key_is_noop() {
        let mut cart = Cart::new();
        cart.add(line("A", Size::M, Some("Kane"), 1, 1000)).unwrap();
        let before = cart.clone();

        assert_eq!(cart.remove(&key("A", Size::M, None)), Outcome::Unchanged);
        assert_eq!(cart.remove(&key("A", Size::M, Some(""))), Outcome::Unchanged);
        assert_eq!(cart, before);

        assert_eq!(cart.remove(&key("A", Size::M, Some("Kane"))), Outcome::Changed);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity() {
        let mut cart = Cart::new();
        cart.add(line("A", Size::M, None, 1, 1500)).unwrap();
        cart.add(line("B", Size::S, None, 2, 500)).unwrap();

        let outcome = cart.update_quantity(&key("A", Size::M, None), 4).unwrap();
        assert_eq!(outcome, Outcome::Changed);
        assert_eq!(cart.items()[0].quantity, 4);
        assert_eq!(cart.total(), Price::from_cents(7000));

        let outcome = cart.update_quantity(&key("A", Size::M, None), 4).unwrap();
        assert_eq!(outcome, Outcome::Unchanged);

        let outcome = cart.update_quantity(&key("Z", Size::M, None), 3).unwrap();
        assert_eq!(outcome, Outcome::Unchanged);
        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn test_update_quantity_non_positive_equals_remove() {
        let mut base = Cart::new();
        base.add(line("A", Size::M, None, 2, 1500)).unwrap();
        base.add(line("B", Size::S, None, 1, 500)).unwrap();

        let mut removed = base.clone();
        removed.remove(&key("A", Size::M, None));

        for quantity in [0, -1, i64::MIN] {
            let mut cart = base.clone();
            cart.update_quantity(&key("A", Size::M, None), quantity)
                .unwrap();
            assert_eq!(cart, removed);
        }
    }

    #[test]
    fn test_update_quantity_too_large_is_rejected() {
        let mut cart = Cart::new();
        cart.add(line("A", Size::M, None, 1, 1500)).unwrap();
        let err = cart
            .update_quantity(&key("A", Size::M, None), i64::from(u32::MAX) + 1)
            .unwrap_err();
        assert!(matches!(err, CartError::QuantityOverflow { .. }));
        assert_eq!(cart.items()[0].quantity, 1);
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        assert_eq!(cart.apply(CartAction::Clear).unwrap(), Outcome::Unchanged);

        cart.add(line("A", Size::M, None, 2, 1500)).unwrap();
        assert_eq!(cart.apply(CartAction::Clear).unwrap(), Outcome::Changed);
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Price::zero());
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_total_matches_line_sum() {
        let mut cart = Cart::new();
        cart.add(line("A", Size::M, None, 3, 3310)).unwrap();
        cart.add(line("B", Size::XL, Some("Son"), 2, 8799)).unwrap();
        let expected: Price = cart
            .items()
            .iter()
            .map(|l| l.unit_price.times(l.quantity))
            .sum();
        assert_eq!(cart.total(), expected);
        assert_eq!(cart.total(), Price::from_cents(3310 * 3 + 8799 * 2));
    }

    #[test]
    fn test_from_items_checks_invariants() {
        assert!(Cart::from_items(vec![line("A", Size::M, None, 1, 100)]).is_ok());
        assert_eq!(
            Cart::from_items(vec![line("A", Size::M, None, 0, 100)]),
            Err(CartError::InvalidQuantity)
        );
        assert!(matches!(
            Cart::from_items(vec![
                line("A", Size::M, None, 1, 100),
                line("A", Size::M, None, 2, 100),
            ]),
            Err(CartError::DuplicateLine(_))
        ));
    }

    #[test]
    fn test_from_items_rejects_unrepresentable_total() {
        let mut huge = line("A", Size::M, None, 2, 100);
        huge.unit_price = Price::new(rust_decimal::Decimal::MAX);
        assert_eq!(
            Cart::from_items(vec![huge]),
            Err(CartError::TotalOverflow(key("A", Size::M, None)))
        );

        let mut max = line("A", Size::M, None, 1, 100);
        max.unit_price = Price::new(rust_decimal::Decimal::MAX);
        assert!(matches!(
            Cart::from_items(vec![max, line("B", Size::M, None, 1, 100)]),
            Err(CartError::TotalOverflow(_))
        ));
    }

    #[test]
    fn test_total_overflow_is_rejected_without_mutation() {
        let mut max = line("A", Size::M, None, 1, 100);
        max.unit_price = Price::new(rust_decimal::Decimal::MAX);
        let mut cart = Cart::new();
        cart.add(max.clone()).unwrap();
        let before = cart.clone();

        assert!(matches!(
            cart.add(line("B", Size::M, None, 1, 100)),
            Err(CartError::TotalOverflow(_))
        ));
        assert!(matches!(cart.add(max), Err(CartError::TotalOverflow(_))));
        assert!(matches!(
            cart.update_quantity(&key("A", Size::M, None), 2),
            Err(CartError::TotalOverflow(_))
        ));
        assert_eq!(cart, before);
        assert_eq!(cart.total(), Price::new(rust_decimal::Decimal::MAX));
    }

    #[test]
    fn test_line_key_display() {
        assert_eq!(key("A", Size::M, None).to_string(), "A (M)");
        assert_eq!(
            key("A", Size::XL, Some("Kane")).to_string(),
            "A (XL, \"Kane\")"
        );
    }

    #[test]
    fn test_line_key_from_label_normalizes() {
        assert_eq!(
            LineKey::from_label("A", Size::L, Some("  Kane ")),
            key("A", Size::L, Some("Kane"))
        );
        assert_eq!(LineKey::from_label("A", Size::L, Some("   ")), key("A", Size::L, None));
        assert_eq!(LineKey::from_label("A", Size::L, None), key("A", Size::L, None));
    }
}
