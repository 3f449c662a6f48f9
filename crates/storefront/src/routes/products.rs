//! Product route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use kitbag_core::{Price, Product, ProductId, ProductKind, Size};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::catalog::{HOME_SECTION_LIMIT, ShopQuery, SortOrder};
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Product display data.
#[derive(Debug, Clone, Serialize)]
pub struct ProductView {
    pub id: ProductId,
    pub name: String,
    pub team: String,
    pub price: Price,
    pub display_price: String,
    pub image: String,
    pub images: Vec<String>,
    pub description: String,
    pub sizes: Vec<Size>,
    pub is_featured: bool,
    pub kind: ProductKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<u16>,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            team: product.team.clone(),
            price: product.price,
            display_price: product.price.to_string(),
            image: product.image.clone(),
            images: product.gallery().into_iter().map(str::to_string).collect(),
            description: product.description.clone(),
            sizes: product.sizes.clone(),
            is_featured: product.is_featured,
            kind: product.kind,
            country: product.country.clone(),
            player: product.player.clone(),
            year: product.year,
        }
    }
}

fn views(products: Vec<&Product>) -> Vec<ProductView> {
    products.into_iter().map(ProductView::from).collect()
}

/// Shop page query parameters.
///
/// `All` or an empty value means no filter, as in the shop page dropdowns.
#[derive(Debug, Default, Deserialize)]
pub struct ShopParams {
    pub team: Option<String>,
    pub size: Option<String>,
    pub sort: Option<String>,
}

impl ShopParams {
    fn into_query(self) -> Result<ShopQuery> {
        let size = filter_value(self.size.as_deref())
            .map(|raw| {
                raw.parse::<Size>()
                    .map_err(|e| AppError::BadRequest(e.to_string()))
            })
            .transpose()?;

        let sort = match self.sort.as_deref().map(str::trim) {
            None | Some("" | "popularity") => SortOrder::Popularity,
            Some("price-asc") => SortOrder::PriceAsc,
            Some("price-desc") => SortOrder::PriceDesc,
            Some(other) => {
                return Err(AppError::BadRequest(format!("unknown sort order: {other}")));
            }
        };

        Ok(ShopQuery {
            team: filter_value(self.team.as_deref()).map(str::to_string),
            size,
            sort,
        })
    }
}

fn filter_value(value: Option<&str>) -> Option<&str> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("all"))
}

/// Filter options for the shop page.
#[derive(Debug, Serialize)]
pub struct FilterOptions {
    pub teams: Vec<String>,
    pub sizes: Vec<Size>,
}

/// Home page sections.
#[derive(Debug, Serialize)]
pub struct HomeView {
    pub featured: Vec<ProductView>,
    pub country: Vec<ProductView>,
    pub player: Vec<ProductView>,
    pub retro: Vec<ProductView>,
}

/// List products, filtered and sorted.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<ShopParams>,
) -> Result<Json<Vec<ProductView>>> {
    let query = params.into_query()?;
    Ok(Json(views(state.catalog().query(&query))))
}

/// Show one product.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProductView>> {
    let id = ProductId::new(id);
    state
        .catalog()
        .get(&id)
        .map(|product| Json(ProductView::from(product)))
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))
}

/// Teams and sizes available for filtering.
#[instrument(skip(state))]
pub async fn filters(State(state): State<AppState>) -> Json<FilterOptions> {
    let catalog = state.catalog();
    Json(FilterOptions {
        teams: catalog.teams().into_iter().map(str::to_string).collect(),
        sizes: catalog.sizes(),
    })
}

/// Home page sections.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> Json<HomeView> {
    let catalog = state.catalog();
    Json(HomeView {
        featured: views(catalog.featured(HOME_SECTION_LIMIT)),
        country: views(catalog.by_kind(ProductKind::Country, HOME_SECTION_LIMIT)),
        player: views(catalog.by_kind(ProductKind::Player, HOME_SECTION_LIMIT)),
        retro: views(catalog.by_kind(ProductKind::Retro, HOME_SECTION_LIMIT)),
    })
}
