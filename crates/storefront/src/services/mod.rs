//! Business logic services for the storefront.
//!
//! # Services
//!
//! - `cart` - The persisted cart store (one cart per running application)
//! - `checkout` - Shipping form validation and order placement
//! - `submissions` - Admin product submission form and its local store
//! - `validation` - Field-level validation error collection

pub mod cart;
pub mod checkout;
pub mod submissions;
pub mod validation;

pub use cart::CartStore;
pub use checkout::{
    CheckoutError, OrderReceipt, PaymentMethod, ShippingForm, ShippingInfo, place_order,
};
pub use submissions::{
    ImageMetadata, ProductSubmission, ProductSubmissionForm, STANDARD_CATEGORIES, StoredSubmission,
    SubmissionError, SubmissionStore,
};
pub use validation::ValidationErrors;
