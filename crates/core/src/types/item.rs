//! Cart line items and their canonical ordering.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ProductId;

/// A product entry in the cart with an associated quantity.
///
/// Serializes to the on-device snapshot record
/// `{id, title, image_url, price, quantity}`. `price` is written as a JSON
/// number, matching the snapshot format the mobile client persists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Product identifier, unique within the cart.
    pub id: ProductId,
    /// Display title. The cart is ordered by title, ascending.
    pub title: String,
    /// Product image reference.
    pub image_url: String,
    /// Unit price.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Units of this product in the cart.
    pub quantity: u32,
}

impl LineItem {
    /// Total price for this line (`price * quantity`).
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// Sort line items by title ascending, case-sensitive.
///
/// This is the cart's canonical ordering; every committed list upholds it.
pub fn sort_by_title(items: &mut [LineItem]) {
    items.sort_by(|a, b| a.title.cmp(&b.title));
}
