//! In-memory shopping cart
//!
//! The catalog publishes no prices, so every line carries a zero unit price.
//! The cart lives only as long as the session.

use openfood_api_client::Product;
use serde::Serialize;

/// One cart line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartItem {
    /// Product barcode
    pub id: String,
    /// Display name at the time it was added
    pub name: String,
    /// Image URL, if any
    pub image: Option<String>,
    /// Always zero
    pub unit_price: f64,
    /// Number of times added, at least 1
    pub quantity: u32,
}

impl CartItem {
    /// Build a cart line for a product
    ///
    /// Returns `None` for products without a barcode, which cannot be keyed.
    #[must_use]
    pub fn from_product(product: &Product) -> Option<Self> {
        let id = product.code.trim();
        if id.is_empty() {
            return None;
        }
        Some(Self {
            id: id.to_string(),
            name: product.display_name().to_string(),
            image: product.image().map(str::to_string),
            unit_price: 0.0,
            quantity: 1,
        })
    }
}

/// Ordered cart, unique by product id
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Lines in insertion order
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Line for a product id
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Number of distinct products
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of all quantities
    #[must_use]
    pub fn total_quantity(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Increment the existing line or append a new one with quantity 1
    pub(crate) fn add(&mut self, item: CartItem) {
        match self.items.iter_mut().find(|existing| existing.id == item.id) {
            Some(existing) => existing.quantity = existing.quantity.saturating_add(1),
            None => self.items.push(CartItem { quantity: 1, ..item }),
        }
    }

    pub(crate) fn remove(&mut self, id: &str) {
        self.items.retain(|item| item.id != id);
    }

    pub(crate) fn clear(&mut self) {
        self.items.clear();
    }
}
