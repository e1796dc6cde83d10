//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in storefront operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Product not found.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Two catalog entries share a name.
    #[error("Duplicate product in catalog: {0}")]
    DuplicateProduct(String),

    /// Catalog data could not be parsed.
    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    /// Amount is not a positive integer.
    #[error("Invalid amount: {0}")]
    InvalidAmount(i64),

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Checkout attempted with nothing in the cart.
    #[error("Cannot check out an empty cart")]
    EmptyCart,

    /// A checkout form field failed validation.
    #[error("Invalid {field}: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    /// Storage error.
    #[error("Storage error: {0}")]
    Storage(#[from] jsp_cache::CacheError),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CommerceError {
    /// Build a validation error for `field`.
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        CommerceError::Validation {
            field,
            message: message.into(),
        }
    }
}
