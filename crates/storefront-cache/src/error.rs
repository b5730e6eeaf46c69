//! Cache error types.

use storefront_core::CommerceError;
use thiserror::Error;

/// Errors that can occur when using the cache.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Failed to open the store.
    #[error("Failed to open store: {0}")]
    OpenError(String),

    /// Failed to serialize value.
    #[error("Serialization error: {0}")]
    SerializeError(#[from] serde_json::Error),

    /// Failed to perform store operation.
    #[error("Store operation failed: {0}")]
    StoreError(String),

    /// Filesystem failure in the file-backed store.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<CacheError> for CommerceError {
    fn from(e: CacheError) -> Self {
        match e {
            CacheError::SerializeError(e) => CommerceError::Serialization(e.to_string()),
            other => CommerceError::Persistence(other.to_string()),
        }
    }
}
