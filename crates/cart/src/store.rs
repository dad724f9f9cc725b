//! The cart store: in-memory line items, snapshot persistence, and the
//! provider/handle access surface.
//!
//! [`CartProvider`] owns the cart for the lifetime of a session. It loads
//! the persisted snapshot once on startup, then serves every mutation from
//! the latest committed state: each operation locks the state, applies one
//! authoritative transition, broadcasts the committed list to watchers, and
//! persists that same committed list before releasing the lock. A snapshot
//! in storage therefore always equals a list that was committed, and
//! back-to-back mutations cannot reorder their writes.

use std::sync::{Arc, Weak};

use tokio::sync::{Mutex, watch};
use tracing::{info, instrument, warn};

use go_marketplace_core::{LineItem, ProductId, sort_by_title};

use crate::config::CartConfig;
use crate::error::{CartError, Result};
use crate::storage::BlobStore;

/// Owns the cart state and its storage binding.
///
/// Dropping the provider shuts the cart down; handles obtained from it
/// then fail with [`CartError::ProviderClosed`].
pub struct CartProvider {
    inner: Arc<CartInner>,
}

struct CartInner {
    state: Mutex<Vec<LineItem>>,
    changed: watch::Sender<Vec<LineItem>>,
    storage: Arc<dyn BlobStore>,
    key: String,
}

impl CartProvider {
    /// Start a provider over `storage`, loading the persisted snapshot
    /// once.
    ///
    /// An absent snapshot starts an empty cart. A snapshot that does not
    /// parse is treated as a discarded cache: the cart starts empty and
    /// the corruption is logged.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Storage`] if the snapshot cannot be read.
    #[instrument(skip(storage))]
    pub async fn load(storage: Arc<dyn BlobStore>, config: &CartConfig) -> Result<Self> {
        let items = match storage.get(&config.storage_key).await? {
            Some(raw) => match serde_json::from_str::<Vec<LineItem>>(&raw) {
                Ok(mut items) => {
                    sort_by_title(&mut items);
                    info!(count = items.len(), "cart snapshot loaded");
                    items
                }
                Err(e) => {
                    warn!(error = %e, "cart snapshot unreadable, starting empty");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        let (changed, _) = watch::channel(items.clone());

        Ok(Self {
            inner: Arc::new(CartInner {
                state: Mutex::new(items),
                changed,
                storage,
                key: config.storage_key.clone(),
            }),
        })
    }

    /// Hand out a cart accessor for app components.
    #[must_use]
    pub fn handle(&self) -> CartHandle {
        CartHandle {
            inner: Arc::downgrade(&self.inner),
        }
    }
}

/// Cloneable accessor to a running [`CartProvider`].
///
/// Handles hold a weak reference to the provider, so a handle that
/// outlives its provider reports the misuse instead of acting on stale
/// state.
#[derive(Clone)]
pub struct CartHandle {
    inner: Weak<CartInner>,
}

impl CartHandle {
    fn inner(&self) -> Result<Arc<CartInner>> {
        self.inner.upgrade().ok_or(CartError::ProviderClosed)
    }

    /// Current line items, sorted by title ascending.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ProviderClosed`] if the provider shut down.
    pub async fn items(&self) -> Result<Vec<LineItem>> {
        let inner = self.inner()?;
        let state = inner.state.lock().await;
        Ok(state.clone())
    }

    /// Watch every committed cart list.
    ///
    /// The receiver starts at the current list and observes each
    /// subsequent commit.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ProviderClosed`] if the provider shut down.
    pub fn watch(&self) -> Result<watch::Receiver<Vec<LineItem>>> {
        Ok(self.inner()?.changed.subscribe())
    }

    /// Add `item` to the cart and return the committed list.
    ///
    /// An item whose id is already in the cart replaces the existing entry
    /// with a quantity of `item.quantity + 1`; a new id is appended at
    /// quantity 1, whatever quantity the input carried.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ProviderClosed`] if the provider shut down, or
    /// a storage/serialization error if the committed list could not be
    /// persisted.
    #[instrument(skip(self, item), fields(id = %item.id))]
    pub async fn add_to_cart(&self, item: LineItem) -> Result<Vec<LineItem>> {
        self.inner()?
            .commit(move |items| {
                merge(items, item);
                Ok(())
            })
            .await
    }

    /// Raise the quantity of the item with `id` by one and return the
    /// committed list.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::NotFound`] if no such item is in the cart, and
    /// the same lifecycle/persistence errors as [`Self::add_to_cart`].
    #[instrument(skip(self))]
    pub async fn increment(&self, id: &ProductId) -> Result<Vec<LineItem>> {
        let inner = self.inner()?;
        let id = id.clone();
        inner
            .commit(move |items| adjust(items, &id, Adjust::Up))
            .await
    }

    /// Lower the quantity of the item with `id` by one and return the
    /// committed list. Decrementing the last unit removes the item.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::NotFound`] if no such item is in the cart, and
    /// the same lifecycle/persistence errors as [`Self::add_to_cart`].
    #[instrument(skip(self))]
    pub async fn decrement(&self, id: &ProductId) -> Result<Vec<LineItem>> {
        let inner = self.inner()?;
        let id = id.clone();
        inner
            .commit(move |items| adjust(items, &id, Adjust::Down))
            .await
    }
}

impl CartInner {
    /// Apply `transition` to the latest committed state, then commit,
    /// broadcast, and persist the result.
    ///
    /// The state lock is held across commit and persist so snapshots land
    /// in commit order. A transition that fails leaves state, watchers,
    /// and storage untouched.
    async fn commit<F>(&self, transition: F) -> Result<Vec<LineItem>>
    where
        F: FnOnce(&mut Vec<LineItem>) -> Result<()>,
    {
        let mut state = self.state.lock().await;

        let mut next = state.clone();
        transition(&mut next)?;
        sort_by_title(&mut next);

        *state = next.clone();
        self.changed.send_replace(next.clone());

        let raw = serde_json::to_string(&next)?;
        self.storage.set(&self.key, &raw).await?;

        Ok(next)
    }
}

/// Direction of a quantity adjustment.
enum Adjust {
    Up,
    Down,
}

/// Find-or-append merge: the single state transition behind `add_to_cart`.
///
/// An existing entry is replaced by the incoming item at
/// `incoming.quantity + 1`; an unknown id is appended at quantity 1. The
/// caller re-sorts, so the replaced entry's position need not be kept.
fn merge(items: &mut Vec<LineItem>, incoming: LineItem) {
    let quantity = if items.iter().any(|it| it.id == incoming.id) {
        incoming.quantity + 1
    } else {
        1
    };

    items.retain(|it| it.id != incoming.id);
    items.push(LineItem {
        quantity,
        ..incoming
    });
}

/// Quantity transition behind `increment`/`decrement`.
fn adjust(items: &mut Vec<LineItem>, id: &ProductId, delta: Adjust) -> Result<()> {
    let Some(pos) = items.iter().position(|it| it.id == *id) else {
        return Err(CartError::NotFound(id.clone()));
    };
    let current = items.get(pos).map_or(0, |it| it.quantity);

    match delta {
        Adjust::Up => {
            if let Some(item) = items.get_mut(pos) {
                item.quantity = current + 1;
            }
        }
        // Decrementing the last unit removes the line entirely.
        Adjust::Down if current <= 1 => {
            items.remove(pos);
        }
        Adjust::Down => {
            if let Some(item) = items.get_mut(pos) {
                item.quantity = current - 1;
            }
        }
    }

    Ok(())
}
