//! GoMarketplace Cart - shopping-cart state container.
//!
//! Holds the list of products in the current user's cart, persists that
//! list to on-device storage, and broadcasts every committed list to
//! subscribers.
//!
//! # Architecture
//!
//! - [`store::CartProvider`] owns the in-memory cart for the lifetime of a
//!   session and loads the persisted snapshot once on startup
//! - [`store::CartHandle`] is the accessor components hold; using a handle
//!   after its provider shut down fails with an explicit error
//! - [`storage::BlobStore`] is the port to durable storage: an async
//!   string-keyed blob store with file-backed and in-memory implementations
//! - Every mutation commits, broadcasts, and persists the same list, in
//!   that order, under one state lock
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use go_marketplace_cart::{CartConfig, CartProvider, FileStore};
//! use go_marketplace_core::{LineItem, ProductId};
//! use rust_decimal::Decimal;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), go_marketplace_cart::CartError> {
//! let config = CartConfig::with_path("/data/cart");
//! let storage = Arc::new(FileStore::new(&config.storage_path));
//! let provider = CartProvider::load(storage, &config).await?;
//!
//! let cart = provider.handle();
//! cart.add_to_cart(LineItem {
//!     id: ProductId::new("sku-1"),
//!     title: "Banana".to_owned(),
//!     image_url: "https://cdn.example/banana.png".to_owned(),
//!     price: Decimal::new(350, 2),
//!     quantity: 1,
//! })
//! .await?;
//! # Ok(())
//! # }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod storage;
pub mod store;

pub use config::{CartConfig, ConfigError, DEFAULT_STORAGE_KEY};
pub use error::{CartError, Result};
pub use storage::{BlobStore, FileStore, MemoryStore, StorageError};
pub use store::{CartHandle, CartProvider};
