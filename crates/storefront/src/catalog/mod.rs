//! Read-only product catalog.
//!
//! The catalog is a fixed list loaded at startup. It answers lookups by ID and
//! the shop page's filter/sort queries; the cart only ever reads from it.

mod data;

use std::collections::BTreeSet;

use kitbag_core::{Product, ProductId, ProductKind, Size};
use serde::{Deserialize, Serialize};

/// Number of products shown in each home page section.
pub const HOME_SECTION_LIMIT: usize = 6;

/// Shop page sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    /// Featured products first, then by ID.
    #[default]
    Popularity,
    PriceAsc,
    PriceDesc,
}

/// Filters and ordering for the shop page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShopQuery {
    /// Only products of this team (exact match).
    pub team: Option<String>,
    /// Only products offered in this size.
    pub size: Option<Size>,
    pub sort: SortOrder,
}

/// The product catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// The built-in jersey catalog.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(data::products())
    }

    /// A catalog over an arbitrary product list.
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// All products in catalog order.
    #[must_use]
    pub fn all(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by ID.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Distinct team names, alphabetically.
    #[must_use]
    pub fn teams(&self) -> Vec<&str> {
        self.products
            .iter()
            .map(|p| p.team.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Distinct sizes offered by any product, smallest first.
    #[must_use]
    pub fn sizes(&self) -> Vec<Size> {
        self.products
            .iter()
            .flat_map(|p| p.sizes.iter().copied())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Up to `limit` featured products, in catalog order.
    #[must_use]
    pub fn featured(&self, limit: usize) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.is_featured)
            .take(limit)
            .collect()
    }

    /// Up to `limit` products of one kind, in catalog order.
    #[must_use]
    pub fn by_kind(&self, kind: ProductKind, limit: usize) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.kind == kind)
            .take(limit)
            .collect()
    }

    /// Filter and sort products for the shop page.
    #[must_use]
    pub fn query(&self, query: &ShopQuery) -> Vec<&Product> {
        let mut products: Vec<&Product> = self
            .products
            .iter()
            .filter(|p| query.team.as_ref().is_none_or(|team| &p.team == team))
            .filter(|p| query.size.is_none_or(|size| p.offers(size)))
            .collect();

        match query.sort {
            SortOrder::Popularity => products.sort_by(|a, b| {
                b.is_featured
                    .cmp(&a.is_featured)
                    .then_with(|| a.id.cmp(&b.id))
            }),
            SortOrder::PriceAsc => products.sort_by(|a, b| a.price.cmp(&b.price)),
            SortOrder::PriceDesc => products.sort_by(|a, b| b.price.cmp(&a.price)),
        }

        products
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
