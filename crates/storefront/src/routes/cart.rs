//! Cart route handlers.
//!
//! Every mutating handler answers with the cart as it stands afterwards, so
//! the client never has to issue a second read.

use axum::{Json, extract::State};
use kitbag_core::{Cart, LineItem, LineKey, ProductId, Size};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Cart item display data.
#[derive(Debug, Clone, Serialize)]
pub struct CartItemView {
    pub id: ProductId,
    pub name: String,
    pub image: String,
    pub size: Size,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player: Option<String>,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
}

impl From<&LineItem> for CartItemView {
    fn from(line: &LineItem) -> Self {
        Self {
            id: line.product_id.clone(),
            name: line.name.clone(),
            image: line.image.clone(),
            size: line.size,
            player: line.player.clone(),
            quantity: line.quantity,
            price: line.unit_price.to_string(),
            line_price: line.line_total().to_string(),
        }
    }
}

/// Cart display data.
#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub item_count: u64,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.items().iter().map(CartItemView::from).collect(),
            subtotal: cart.total().to_string(),
            item_count: cart.item_count(),
        }
    }
}

/// Cart count badge.
#[derive(Debug, Serialize)]
pub struct CartCount {
    pub count: u64,
}

/// Add to cart request.
#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    pub product_id: ProductId,
    pub size: Size,
    pub player: Option<String>,
    #[serde(default = "one")]
    pub quantity: u32,
}

const fn one() -> u32 {
    1
}

/// Quick add request from the shop grid.
#[derive(Debug, Deserialize)]
pub struct QuickAddRequest {
    pub product_id: ProductId,
}

/// Identifies one cart line.
#[derive(Debug, Deserialize)]
pub struct LineRequest {
    pub product_id: ProductId,
    pub size: Size,
    pub player: Option<String>,
}

impl LineRequest {
    fn key(self) -> LineKey {
        LineKey::from_label(self.product_id, self.size, self.player.as_deref())
    }
}

/// Update quantity request. Zero or less removes the line.
#[derive(Debug, Deserialize)]
pub struct UpdateCartRequest {
    #[serde(flatten)]
    pub line: LineRequest,
    pub quantity: i64,
}

/// Display cart.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Result<Json<CartView>> {
    let store = state.cart()?;
    Ok(Json(CartView::from(store.cart())))
}

/// Get cart count badge.
#[instrument(skip(state))]
pub async fn count(State(state): State<AppState>) -> Result<Json<CartCount>> {
    let store = state.cart()?;
    Ok(Json(CartCount {
        count: store.cart().item_count(),
    }))
}

/// Add a catalog product to the cart.
#[instrument(skip(state))]
pub async fn add(
    State(state): State<AppState>,
    Json(request): Json<AddToCartRequest>,
) -> Result<Json<CartView>> {
    let product = state
        .catalog()
        .get(&request.product_id)
        .ok_or_else(|| AppError::NotFound(format!("product {}", request.product_id)))?;
    let line = product.line_item(request.size, request.player.as_deref(), request.quantity)?;

    let mut store = state.cart()?;
    store.add(line)?;
    Ok(Json(CartView::from(store.cart())))
}

/// Add one of a product in its default size.
#[instrument(skip(state))]
pub async fn quick_add(
    State(state): State<AppState>,
    Json(request): Json<QuickAddRequest>,
) -> Result<Json<CartView>> {
    let product = state
        .catalog()
        .get(&request.product_id)
        .ok_or_else(|| AppError::NotFound(format!("product {}", request.product_id)))?;
    let line = product.line_item(product.default_size(), None, 1)?;

    let mut store = state.cart()?;
    store.add(line)?;
    Ok(Json(CartView::from(store.cart())))
}

/// Set the quantity of a line.
#[instrument(skip(state))]
pub async fn update(
    State(state): State<AppState>,
    Json(request): Json<UpdateCartRequest>,
) -> Result<Json<CartView>> {
    let key = request.line.key();
    let mut store = state.cart()?;
    store.update_quantity(key, request.quantity)?;
    Ok(Json(CartView::from(store.cart())))
}

/// Remove a line.
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Json(request): Json<LineRequest>,
) -> Result<Json<CartView>> {
    let key = request.key();
    let mut store = state.cart()?;
    store.remove(key);
    Ok(Json(CartView::from(store.cart())))
}

/// Empty the cart.
#[instrument(skip(state))]
pub async fn clear(State(state): State<AppState>) -> Result<Json<CartView>> {
    let mut store = state.cart()?;
    store.clear();
    Ok(Json(CartView::from(store.cart())))
}
