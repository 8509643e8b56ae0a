//! Cart state and its transitions.
//!
//! Every operation is total: unknown line ids are ignored and quantities are
//! clamped, never rejected. Each line holds a snapshot of the product taken
//! when it was first added, so later catalog refreshes do not reprice it.

use std::sync::atomic::{AtomicU64, Ordering};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use vitrine_core::Product;

/// Source of line-id suffixes, unique for the life of the process.
static NEXT_LINE: AtomicU64 = AtomicU64::new(1);

/// Identifier of one cart line. Distinct from the product id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartId(String);

impl CartId {
    fn generate(product_id: &str) -> Self {
        let seq = NEXT_LINE.fetch_add(1, Ordering::Relaxed);
        Self(format!("{product_id}-{seq}"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CartId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CartId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

/// Product fields copied into the cart at add time, plus the quantity to add.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCartItem {
    pub product_id: String,
    pub name: String,
    pub price: Decimal,
    pub quantity: u32,
    pub image: String,
    pub min_quantity: u32,
}

impl NewCartItem {
    /// Snapshots `product` for adding `quantity` units.
    #[must_use]
    pub fn from_product(product: &Product, quantity: u32) -> Self {
        Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            price: product.unit_price,
            quantity,
            image: product.image.clone(),
            min_quantity: product.min_quantity,
        }
    }
}

/// One line of the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub cart_id: CartId,
    pub product_id: String,
    pub name: String,
    /// Unit price at add time.
    pub price: Decimal,
    /// Never below `min_quantity`.
    pub quantity: u32,
    pub image: String,
    pub min_quantity: u32,
}

impl CartItem {
    /// `price * quantity`, unrounded. Saturates at [`Decimal::MAX`].
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price
            .checked_mul(Decimal::from(self.quantity))
            .unwrap_or(Decimal::MAX)
    }

    /// `true` when decrementing would hit the floor.
    #[must_use]
    pub fn at_minimum(&self) -> bool {
        self.quantity <= self.min_quantity
    }
}

/// The shopper's cart: at most one line per product, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `item` to the cart and returns the id of the line it landed on.
    ///
    /// If a line for the same product exists its quantity grows by
    /// `item.quantity`; the name, price, and image snapshot from the first add
    /// are kept. Otherwise a new line is appended, with its quantity raised to
    /// the minimum if needed.
    pub fn add(&mut self, item: NewCartItem) -> CartId {
        if let Some(existing) = self
            .items
            .iter_mut()
            .find(|line| line.product_id == item.product_id)
        {
            existing.quantity = existing.quantity.saturating_add(item.quantity);
            return existing.cart_id.clone();
        }

        let min_quantity = item.min_quantity.max(1);
        let line = CartItem {
            cart_id: CartId::generate(&item.product_id),
            product_id: item.product_id,
            name: item.name,
            price: item.price,
            quantity: item.quantity.max(min_quantity),
            image: item.image,
            min_quantity,
        };
        let id = line.cart_id.clone();
        tracing::debug!(cart_id = %id, quantity = line.quantity, "cart line added");
        self.items.push(line);
        id
    }

    /// Adds a catalog product the way the product card does: unavailable
    /// products are ignored, and `requested` below the product's minimum is
    /// raised to it.
    pub fn add_product(&mut self, product: &Product, requested: u32) -> Option<CartId> {
        if !product.available {
            tracing::debug!(product_id = %product.id, "ignoring add of unavailable product");
            return None;
        }
        let quantity = requested.max(product.min_quantity);
        Some(self.add(NewCartItem::from_product(product, quantity)))
    }

    /// Adjusts the line's quantity by `delta`, never going below its minimum.
    ///
    /// Unknown ids are ignored.
    pub fn update_quantity(&mut self, cart_id: &CartId, delta: i64) {
        if let Some(line) = self.items.iter_mut().find(|line| &line.cart_id == cart_id) {
            let target = i64::from(line.quantity).saturating_add(delta);
            let clamped = target.clamp(i64::from(line.min_quantity), i64::from(u32::MAX));
            line.quantity = u32::try_from(clamped).unwrap_or(u32::MAX);
        }
    }

    /// Removes the line. Unknown ids are ignored.
    pub fn remove(&mut self, cart_id: &CartId) {
        self.items.retain(|line| &line.cart_id != cart_id);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    #[must_use]
    pub fn get(&self, cart_id: &CartId) -> Option<&CartItem> {
        self.items.iter().find(|line| &line.cart_id == cart_id)
    }

    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Total units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
#[path = "cart_test.rs"]
mod tests;
