//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in storefront commerce operations.
///
/// Cart mutations never produce these; they surface from catalog lookups,
/// candidate building, checkout configuration and persistence adapters.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Product not found.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Size outside the product kind's vocabulary.
    #[error("Size {size} is not offered for {kind}")]
    InvalidSize { size: String, kind: String },

    /// Checkout phone number has no digits.
    #[error("Invalid checkout phone number: {0}")]
    InvalidPhone(String),

    /// Storage slot could not be read or written.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Cache error.
    #[error("Cache error: {0}")]
    Cache(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

#[cfg(feature = "storage")]
impl From<softo_cache::CacheError> for CommerceError {
    fn from(e: softo_cache::CacheError) -> Self {
        CommerceError::Cache(e.to_string())
    }
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::Serialization(e.to_string())
    }
}
