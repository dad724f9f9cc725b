//! Unified error type for cart operations.
//!
//! All fallible cart operations return `Result<T, CartError>`.

use thiserror::Error;

use go_marketplace_core::ProductId;

use crate::storage::StorageError;

/// Errors surfaced by the cart store.
#[derive(Debug, Error)]
pub enum CartError {
    /// Blob-store read or write failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Cart snapshot could not be serialized.
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] serde_json::Error),

    /// No line item with this product id is in the cart.
    #[error("Product {0} is not in the cart")]
    NotFound(ProductId),

    /// A `CartHandle` was used after its `CartProvider` shut down.
    #[error("Cart must be used within a running CartProvider")]
    ProviderClosed,
}

/// Result type alias for `CartError`.
pub type Result<T> = std::result::Result<T, CartError>;
