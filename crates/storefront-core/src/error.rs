//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in storefront operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Product not found.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Invalid quantity.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Quantity exceeds maximum allowed.
    #[error("Quantity {0} exceeds maximum allowed ({1})")]
    QuantityExceedsLimit(i64, i64),

    /// The chosen add-ons do not satisfy the product's add-on groups.
    #[error("Invalid add-on selection: {0}")]
    InvalidAddOnSelection(String),

    /// Invalid discount code.
    #[error("Invalid discount code: {0}")]
    InvalidDiscountCode(String),

    /// Checkout attempted with nothing in the cart.
    #[error("Cannot place an order with an empty cart")]
    EmptyCart,

    /// Currency mismatch.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Persistence adapter failure.
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Remote product/order API failure.
    #[error("API error: {0}")]
    Api(String),

    /// Configuration could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::Serialization(e.to_string())
    }
}
