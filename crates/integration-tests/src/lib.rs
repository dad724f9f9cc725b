//! Integration test support for the GoMarketplace cart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p go-marketplace-integration-tests
//!
//! # With store logging
//! RUST_LOG=go_marketplace_cart=debug cargo test -p go-marketplace-integration-tests
//! ```
//!
//! Tests run against the real file-backed blob store in a per-test
//! temporary directory; nothing is shared between tests.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use rust_decimal::Decimal;
use tempfile::TempDir;

use go_marketplace_cart::{CartConfig, CartProvider, FileStore};
use go_marketplace_core::{LineItem, ProductId};

/// A cart wired to file-backed storage in a fresh temporary directory.
///
/// The directory lives as long as the fixture, so a test can drop one
/// provider and load another over the same storage to simulate an app
/// restart.
pub struct TestCart {
    /// Cart configuration pointing at the temporary directory.
    pub config: CartConfig,
    /// The file store under test.
    pub storage: Arc<FileStore>,
    _dir: TempDir,
}

impl TestCart {
    /// Create a fixture with its own storage directory.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        init_tracing();

        let dir = tempfile::tempdir().expect("create temp storage dir");
        let config = CartConfig::with_path(dir.path());
        let storage = Arc::new(FileStore::new(&config.storage_path));

        Self {
            config,
            storage,
            _dir: dir,
        }
    }

    /// Start a provider over this fixture's storage.
    ///
    /// # Panics
    ///
    /// Panics if the snapshot cannot be read.
    pub async fn provider(&self) -> CartProvider {
        CartProvider::load(self.storage.clone(), &self.config)
            .await
            .expect("load cart provider")
    }

    /// The raw persisted snapshot, if any.
    ///
    /// # Panics
    ///
    /// Panics if storage cannot be read.
    pub async fn raw_snapshot(&self) -> Option<String> {
        use go_marketplace_cart::BlobStore;

        self.storage
            .get(&self.config.storage_key)
            .await
            .expect("read snapshot")
    }
}

impl Default for TestCart {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a line item with a price in cents.
#[must_use]
pub fn line_item(id: &str, title: &str, price_cents: i64, quantity: u32) -> LineItem {
    LineItem {
        id: ProductId::new(id),
        title: title.to_owned(),
        image_url: format!("https://cdn.gomarketplace.app/products/{id}.png"),
        price: Decimal::new(price_cents, 2),
        quantity,
    }
}

/// Install the test tracing subscriber once; later calls are no-ops.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
