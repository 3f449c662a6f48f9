//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. All route handlers should return `Result<T, AppError>`.
//!
//! Every error response is a JSON object with an `error` message. Validation
//! failures add a `fields` object mapping each failing field to its message.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use kitbag_core::{CartError, SizeNotOffered};
use serde::Serialize;
use thiserror::Error;

use crate::services::{CheckoutError, SubmissionError, ValidationErrors};

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// A cart action was rejected.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// The requested size is not made for the product.
    #[error("{0}")]
    SizeNotOffered(#[from] SizeNotOffered),

    /// Form input failed validation.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// Order placement failed.
    #[error("{0}")]
    Checkout(#[from] CheckoutError),

    /// Recording a product submission failed.
    #[error("Submission error: {0}")]
    Submission(#[from] SubmissionError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<&'a ValidationErrors>,
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Cart(_) | Self::SizeNotOffered(_) | Self::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Validation(_) | Self::Checkout(CheckoutError::Invalid(_)) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            Self::Checkout(CheckoutError::EmptyCart) => StatusCode::CONFLICT,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Submission(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn fields(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Validation(errors) | Self::Checkout(CheckoutError::Invalid(errors)) => {
                Some(errors)
            }
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Capture server errors to Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Submission(_) | Self::Internal(_) => "Internal server error".to_string(),
            Self::Validation(_) => "Please correct the highlighted fields".to_string(),
            Self::Checkout(CheckoutError::Invalid(_)) => {
                "Please correct your shipping details".to_string()
            }
            _ => self.to_string(),
        };

        let body = ErrorBody {
            error: message,
            fields: self.fields(),
        };
        (status, Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
