//! Cart commands.
//!
//! Each command restores the cart from the data directory, applies at most
//! one change and persists it before printing the result.

use kitbag_core::{LineKey, Outcome, ProductId, Size};
use kitbag_storefront::services::CartStore;
use tracing::info;

use super::Context;

/// Print the cart.
pub fn show(ctx: &Context) {
    print_cart(&ctx.cart_store());
}

/// Add a catalog product.
///
/// # Errors
///
/// Returns an error if the product does not exist, is not made in `size`, or
/// the quantity is rejected.
pub fn add(
    ctx: &Context,
    id: &str,
    size: Option<Size>,
    player: Option<&str>,
    quantity: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    let product = ctx
        .catalog
        .get(&ProductId::new(id))
        .ok_or_else(|| format!("Product not found: {id}"))?;
    let size = size.unwrap_or_else(|| product.default_size());
    let line = product.line_item(size, player, quantity)?;
    let key = line.key();

    let mut store = ctx.cart_store();
    store.add(line)?;
    info!("Added {quantity} x {key}");
    print_cart(&store);
    Ok(())
}

/// Remove a line.
pub fn remove(ctx: &Context, id: &str, size: Size, player: Option<&str>) {
    let key = LineKey::from_label(id, size, player);
    let mut store = ctx.cart_store();
    match store.remove(key.clone()) {
        Outcome::Changed => info!("Removed {key}"),
        Outcome::Unchanged => info!("No line for {key}"),
    }
    print_cart(&store);
}

/// Set a line's quantity.
///
/// # Errors
///
/// Returns an error if the quantity is too large.
pub fn update(
    ctx: &Context,
    id: &str,
    size: Size,
    player: Option<&str>,
    quantity: i64,
) -> Result<(), Box<dyn std::error::Error>> {
    let key = LineKey::from_label(id, size, player);
    let mut store = ctx.cart_store();
    match store.update_quantity(key.clone(), quantity)? {
        Outcome::Changed => info!("Updated {key}"),
        Outcome::Unchanged => info!("No change for {key}"),
    }
    print_cart(&store);
    Ok(())
}

/// Empty the cart.
pub fn clear(ctx: &Context) {
    let mut store = ctx.cart_store();
    store.clear();
    info!("Cart cleared");
}

fn print_cart(store: &CartStore) {
    let cart = store.cart();
    if cart.is_empty() {
        info!("Your cart is empty");
        return;
    }

    for line in cart.items() {
        info!(
            "{:>3} x {:<40} {:>9} {:>10}",
            line.quantity,
            line.key().to_string(),
            line.unit_price.to_string(),
            line.line_total().to_string()
        );
    }
    info!(
        "{} item(s), total {}",
        cart.item_count(),
        store.total()
    );
}
