//! Catalog browsing commands.

use kitbag_core::{ProductId, Size};
use kitbag_storefront::catalog::{ShopQuery, SortOrder};
use tracing::info;

use super::Context;

/// List products, filtered and sorted like the shop page.
///
/// # Errors
///
/// Returns an error if `sort` is not a known order.
pub fn list(
    ctx: &Context,
    team: Option<String>,
    size: Option<Size>,
    sort: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let sort = match sort {
        "popularity" => SortOrder::Popularity,
        "price-asc" => SortOrder::PriceAsc,
        "price-desc" => SortOrder::PriceDesc,
        other => return Err(format!("unknown sort order: {other}").into()),
    };

    let products = ctx.catalog.query(&ShopQuery { team, size, sort });
    if products.is_empty() {
        info!("No products match");
        return Ok(());
    }

    for product in &products {
        let featured = if product.is_featured { " *" } else { "" };
        info!(
            "{:<28} {:>8}  {}{featured}",
            product.id.as_str(),
            product.price.to_string(),
            product.name
        );
    }
    info!(count = products.len(), "Listed products");
    Ok(())
}

/// Show one product in full.
///
/// # Errors
///
/// Returns an error if no product has this ID.
pub fn show(ctx: &Context, id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let product = ctx
        .catalog
        .get(&ProductId::new(id))
        .ok_or_else(|| format!("Product not found: {id}"))?;

    let sizes: Vec<&str> = product.sizes.iter().map(|s| s.as_str()).collect();
    info!("{}", product.name);
    info!("  id:          {}", product.id);
    info!("  team:        {}", product.team);
    info!("  price:       {}", product.price);
    info!("  sizes:       {}", sizes.join(", "));
    info!("  kind:        {:?}", product.kind);
    if let Some(player) = &product.player {
        info!("  player:      {player}");
    }
    if let Some(year) = product.year {
        info!("  year:        {year}");
    }
    info!("  images:      {}", product.gallery().join(", "));
    info!("  {}", product.description);
    Ok(())
}
