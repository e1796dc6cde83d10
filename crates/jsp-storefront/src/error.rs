//! Storefront error types.

use thiserror::Error;

/// Errors surfaced by page controllers.
#[derive(Error, Debug)]
pub enum StorefrontError {
    /// A location could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A domain operation failed.
    #[error(transparent)]
    Commerce(#[from] jsp_commerce::CommerceError),
}
