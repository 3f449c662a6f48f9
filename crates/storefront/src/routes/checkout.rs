//! Checkout route handler.

use axum::{Json, extract::State, http::StatusCode};
use tracing::instrument;

use crate::error::Result;
use crate::services::{CheckoutError, OrderReceipt, ShippingForm, ShippingInfo, place_order};
use crate::state::AppState;

/// Place an order for the current cart.
///
/// Shipping details are validated before the cart is looked at.
#[instrument(skip(state, form))]
pub async fn place(
    State(state): State<AppState>,
    Json(form): Json<ShippingForm>,
) -> Result<(StatusCode, Json<OrderReceipt>)> {
    let shipping = ShippingInfo::parse(&form).map_err(CheckoutError::Invalid)?;
    let mut store = state.cart()?;
    let receipt = place_order(&mut store, shipping)?;
    Ok((StatusCode::CREATED, Json(receipt)))
}
