//! Checkout: shipping form validation and order placement.
//!
//! There is no payment processing. Placing an order logs it, empties the
//! cart, and hands back a receipt.

use chrono::{DateTime, Utc};
use kitbag_core::{Email, LineItem, Price};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use super::cart::CartStore;
use super::validation::{ValidationErrors, required};

/// How the customer says they will pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PaymentMethod {
    #[default]
    CreditCard,
    Paypal,
    BankTransfer,
}

/// Raw shipping form input.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShippingForm {
    pub full_name: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub zip_code: String,
    pub country: String,
    pub payment_method: PaymentMethod,
}

/// Validated shipping details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingInfo {
    pub full_name: String,
    pub email: Email,
    pub address: String,
    pub city: String,
    pub zip_code: String,
    pub country: String,
    pub payment_method: PaymentMethod,
}

impl ShippingInfo {
    /// Validate a shipping form. Every field is required.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrors`] with one message per failing field.
    pub fn parse(form: &ShippingForm) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let full_name = required(&mut errors, "fullName", &form.full_name, "Full Name is required");
        let email = match Email::parse(&form.email) {
            Ok(email) => Some(email),
            Err(e) => {
                errors.add("email", e.to_string());
                None
            }
        };
        let address = required(&mut errors, "address", &form.address, "Address is required");
        let city = required(&mut errors, "city", &form.city, "City is required");
        let zip_code = required(&mut errors, "zipCode", &form.zip_code, "Zip Code is required");
        let country = required(&mut errors, "country", &form.country, "Country is required");

        match email {
            Some(email) if errors.is_empty() => Ok(Self {
                full_name,
                email,
                address,
                city,
                zip_code,
                country,
                payment_method: form.payment_method,
            }),
            _ => Err(errors),
        }
    }
}

/// Errors placing an order.
#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("Your cart is empty. Please add items before checking out.")]
    EmptyCart,
    #[error("invalid shipping details: {0}")]
    Invalid(#[from] ValidationErrors),
}

/// Confirmation of a placed order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderReceipt {
    pub order_id: Uuid,
    pub placed_at: DateTime<Utc>,
    pub items: Vec<LineItem>,
    pub item_count: u64,
    pub total: Price,
    pub shipping: ShippingInfo,
}

/// Place an order for everything in the cart, then empty the cart.
///
/// # Errors
///
/// Returns [`CheckoutError::EmptyCart`] if the cart has no lines; the cart is
/// left untouched.
pub fn place_order(
    store: &mut CartStore,
    shipping: ShippingInfo,
) -> Result<OrderReceipt, CheckoutError> {
    if store.cart().is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let receipt = OrderReceipt {
        order_id: Uuid::new_v4(),
        placed_at: Utc::now(),
        items: store.cart().items().to_vec(),
        item_count: store.cart().item_count(),
        total: store.total(),
        shipping,
    };

    info!(
        order_id = %receipt.order_id,
        lines = receipt.items.len(),
        items = receipt.item_count,
        total = %receipt.total,
        payment_method = ?receipt.shipping.payment_method,
        country = %receipt.shipping.country,
        "Order placed"
    );

    store.clear();
    Ok(receipt)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use kitbag_core::{ProductId, Size};

    use super::*;
    use crate::storage::MemoryStore;

    fn form() -> ShippingForm {
        ShippingForm {
            full_name: "Alex Morgan".to_string(),
            email: "alex@example.com".to_string(),
            address: "1 Stadium Way".to_string(),
            city: "Manchester".to_string(),
            zip_code: "M16 0RA".to_string(),
            country: "United Kingdom".to_string(),
            payment_method: PaymentMethod::Paypal,
        }
    }

    fn filled_store() -> CartStore {
        let mut store = CartStore::open(Arc::new(MemoryStore::new()), "cart");
        store
            .add(LineItem {
                product_id: ProductId::new("manutd-away-2024"),
                name: "Man Utd Away Jersey 24/25".to_string(),
                unit_price: Price::from_cents(8500),
                image: "/images/man_united_away.avif".to_string(),
                size: Size::L,
                player: Some("Fernandes".to_string()),
                quantity: 2,
            })
            .unwrap();
        store
    }

    #[test]
    fn test_parse_valid_form_trims_fields() {
        let mut input = form();
        input.city = "  Manchester ".to_string();
        let info = ShippingInfo::parse(&input).unwrap();
        assert_eq!(info.city, "Manchester");
        assert_eq!(info.email.as_str(), "alex@example.com");
        assert_eq!(info.payment_method, PaymentMethod::Paypal);
    }

    #[test]
    fn test_parse_collects_every_missing_field() {
        let errors = ShippingInfo::parse(&ShippingForm::default()).unwrap_err();
        for field in ["fullName", "email", "address", "city", "zipCode", "country"] {
            assert!(errors.get(field).is_some(), "missing error for {field}");
        }
    }

    #[test]
    fn test_parse_rejects_bad_email_only() {
        let mut input = form();
        input.email = "alex.example.com".to_string();
        let errors = ShippingInfo::parse(&input).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.get("email").is_some());
    }

    #[test]
    fn test_payment_method_wire_names() {
        let input: ShippingForm =
            serde_json::from_str(r#"{"paymentMethod":"bankTransfer"}"#).unwrap();
        assert_eq!(input.payment_method, PaymentMethod::BankTransfer);
        let input: ShippingForm = serde_json::from_str("{}").unwrap();
        assert_eq!(input.payment_method, PaymentMethod::CreditCard);
    }

    #[test]
    fn test_place_order_clears_cart() {
        let mut store = filled_store();
        let receipt = place_order(&mut store, ShippingInfo::parse(&form()).unwrap()).unwrap();

        assert_eq!(receipt.total, Price::from_cents(17000));
        assert_eq!(receipt.item_count, 2);
        assert_eq!(receipt.items.len(), 1);
        assert!(store.cart().is_empty());
        assert_eq!(store.total(), Price::zero());
    }

    #[test]
    fn test_place_order_rejects_empty_cart() {
        let mut store = CartStore::open(Arc::new(MemoryStore::new()), "cart");
        let result = place_order(&mut store, ShippingInfo::parse(&form()).unwrap());
        assert!(matches!(result, Err(CheckoutError::EmptyCart)));
    }
}
