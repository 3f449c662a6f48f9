//! Catalog product records.

use serde::{Deserialize, Serialize};

use crate::cart::{LineItem, normalize_label};
use crate::types::{Price, ProductId, Size};

/// What kind of jersey a product is. Drives the home page sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductKind {
    Club,
    Country,
    Player,
    Retro,
    Training,
}

/// A size was requested that the product is not made in.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{product} is not available in size {size}")]
pub struct SizeNotOffered {
    /// The product that was requested.
    pub product: ProductId,
    /// The size that was requested.
    pub size: Size,
}

/// A read-only catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub team: String,
    pub price: Price,
    /// Main image, also used as the cart thumbnail.
    pub image: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub gallery_images: Vec<String>,
    pub description: String,
    pub sizes: Vec<Size>,
    #[serde(default)]
    pub is_featured: bool,
    pub kind: ProductKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<u16>,
}

impl Product {
    /// Whether the product is made in `size`.
    #[must_use]
    pub fn offers(&self, size: Size) -> bool {
        self.sizes.contains(&size)
    }

    /// Size used by the quick "add to cart" button on the shop grid.
    #[must_use]
    pub fn default_size(&self) -> Size {
        self.sizes.first().copied().unwrap_or(Size::M)
    }

    /// Images for the detail gallery, falling back to the main image.
    #[must_use]
    pub fn gallery(&self) -> Vec<&str> {
        if self.gallery_images.is_empty() {
            vec![self.image.as_str()]
        } else {
            self.gallery_images.iter().map(String::as_str).collect()
        }
    }

    /// Build a cart line from this product.
    ///
    /// The name, price and image are copied into the line; later catalog
    /// changes do not reach lines already in a cart. A blank player label is
    /// treated as no customization.
    ///
    /// # Errors
    ///
    /// Returns [`SizeNotOffered`] if the product is not made in `size`.
    pub fn line_item(
        &self,
        size: Size,
        player: Option<&str>,
        quantity: u32,
    ) -> Result<LineItem, SizeNotOffered> {
        if !self.offers(size) {
            return Err(SizeNotOffered {
                product: self.id.clone(),
                size,
            });
        }

        let player = normalize_label(player);

        Ok(LineItem {
            product_id: self.id.clone(),
            name: self.name.clone(),
            unit_price: self.price,
            image: self.image.clone(),
            size,
            player,
            quantity,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn product() -> Product {
        Product {
            id: ProductId::new("argentina-home-2022-messi"),
            name: "Argentina Home Jersey 2022 (Messi)".to_string(),
            team: "Argentina National Team".to_string(),
            price: Price::from_cents(10000),
            image: "/images/argentina_home_messi.webp".to_string(),
            gallery_images: Vec::new(),
            description: "World Cup 2022 home jersey.".to_string(),
            sizes: vec![Size::S, Size::M, Size::L, Size::XL],
            is_featured: true,
            kind: ProductKind::Player,
            country: Some("Argentina".to_string()),
            player: Some("Messi".to_string()),
            year: None,
        }
    }

    #[test]
    fn test_line_item_snapshots_display_fields() {
        let line = product().line_item(Size::M, Some("  Messi 10 "), 2).unwrap();
        assert_eq!(line.product_id.as_str(), "argentina-home-2022-messi");
        assert_eq!(line.unit_price, Price::from_cents(10000));
        assert_eq!(line.player.as_deref(), Some("Messi 10"));
        assert_eq!(line.quantity, 2);
    }

    #[test]
    fn test_line_item_blank_player_is_absent() {
        let line = product().line_item(Size::S, Some("   "), 1).unwrap();
        assert_eq!(line.player, None);
    }

    #[test]
    fn test_line_item_rejects_unoffered_size() {
        let err = product().line_item(Size::XXL, None, 1).unwrap_err();
        assert_eq!(err.size, Size::XXL);
    }

    #[test]
    fn test_default_size_and_gallery_fallback() {
        let mut p = product();
        assert_eq!(p.default_size(), Size::S);
        assert_eq!(p.gallery(), vec!["/images/argentina_home_messi.webp"]);

        p.sizes.clear();
        p.gallery_images = vec!["/a.webp".to_string(), "/b.webp".to_string()];
        assert_eq!(p.default_size(), Size::M);
        assert_eq!(p.gallery(), vec!["/a.webp", "/b.webp"]);
    }
}
