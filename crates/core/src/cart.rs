//! Cart engine.
//!
//! A cart is an ordered list of lines. Each line is identified by its
//! [`VariantKey`] (product id, size, color), which is unique within the cart:
//! adding the same variant again bumps the quantity instead of appending a
//! new line. A side index maps each key to its position so lookups stay
//! constant time as the cart grows.
//!
//! # Storage format
//!
//! The cart is stored as a JSON array of [`CartItem`] under
//! [`CART_STORAGE_KEY`]. Each item is the product snapshot taken at add time
//! with `quantity`, `selectedSize` and `selectedColor` alongside:
//!
//! ```json
//! [{"id":"2","name":"...","price":"3200","category":"...","description":"...",
//!   "image":"...","sizes":["40"],"colors":["white"],"stock":15,
//!   "quantity":2,"selectedSize":"40","selectedColor":"white"}]
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::types::{Price, Product, ProductId};

/// Key under which the serialized cart is stored.
pub const CART_STORAGE_KEY: &str = "souq-cart";

/// Errors reading or writing the stored cart.
#[derive(Debug, thiserror::Error)]
pub enum CartError {
    /// The stored value is not a valid cart.
    #[error("stored cart is malformed: {0}")]
    Malformed(#[source] serde_json::Error),
    /// The cart could not be serialized.
    #[error("failed to serialize cart: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Identity of a cart line: product plus chosen variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VariantKey {
    pub product_id: ProductId,
    pub size: Option<String>,
    pub color: Option<String>,
}

impl VariantKey {
    /// Build a key, treating blank size/color values as "not selected".
    #[must_use]
    pub fn new(product_id: ProductId, size: Option<String>, color: Option<String>) -> Self {
        Self {
            product_id,
            size: normalize_option(size),
            color: normalize_option(color),
        }
    }
}

fn normalize_option(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// One line in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    #[serde(flatten)]
    pub product: Product,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_color: Option<String>,
}

impl CartItem {
    /// The variant key of this line.
    #[must_use]
    pub fn key(&self) -> VariantKey {
        VariantKey::new(
            self.product.id.clone(),
            self.selected_size.clone(),
            self.selected_color.clone(),
        )
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price.times(self.quantity)
    }
}

/// The shopping cart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    items: Vec<CartItem>,
    index: HashMap<VariantKey, usize>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from stored lines.
    ///
    /// Lines with a zero quantity are dropped and lines sharing a variant key
    /// are merged, so the result always satisfies the cart invariants even
    /// if the stored value did not.
    #[must_use]
    pub fn from_items(items: impl IntoIterator<Item = CartItem>) -> Self {
        let mut cart = Self::new();
        for mut item in items.into_iter().filter(|i| i.quantity > 0) {
            let key = item.key();
            item.selected_size.clone_from(&key.size);
            item.selected_color.clone_from(&key.color);
            match cart.line_mut(&key) {
                Some(existing) => existing.quantity = existing.quantity.saturating_add(item.quantity),
                None => cart.push(key, item),
            }
        }
        cart
    }

    /// Restore a cart from its stored JSON form.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Malformed`] if the value is not a JSON array of
    /// cart items.
    pub fn from_json(raw: &str) -> Result<Self, CartError> {
        serde_json::from_str(raw).map_err(CartError::Malformed)
    }

    /// Serialize the cart to its stored JSON form.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Encode`] if serialization fails.
    pub fn to_json(&self) -> Result<String, CartError> {
        serde_json::to_string(self).map_err(CartError::Encode)
    }

    /// Lines in the order they were first added.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0, |acc, item| acc.saturating_add(item.quantity))
    }

    /// Sum of price times quantity over all lines.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Look up a line by variant key.
    #[must_use]
    pub fn get(&self, key: &VariantKey) -> Option<&CartItem> {
        self.index.get(key).and_then(|&pos| self.items.get(pos))
    }

    /// Add one unit of a product variant.
    ///
    /// If a line with the same (product id, size, color) exists its quantity
    /// is incremented; otherwise a new line with quantity 1 is appended,
    /// holding a snapshot of the product as it is now. Stock is not checked.
    ///
    /// Returns the quantity of the line after the add.
    pub fn add(&mut self, product: &Product, size: Option<String>, color: Option<String>) -> u32 {
        let key = VariantKey::new(product.id.clone(), size, color);

        if let Some(existing) = self.line_mut(&key) {
            existing.quantity = existing.quantity.saturating_add(1);
            return existing.quantity;
        }

        let item = CartItem {
            product: product.clone(),
            quantity: 1,
            selected_size: key.size.clone(),
            selected_color: key.color.clone(),
        };
        self.push(key, item);
        1
    }

    /// Remove every line for a product, whatever its size or color.
    ///
    /// This mirrors the storefront's "remove" button, which identifies lines
    /// by product only. Use [`Cart::remove_variant`] to drop a single line.
    ///
    /// Returns the number of lines removed.
    pub fn remove_product(&mut self, product_id: &ProductId) -> usize {
        let before = self.items.len();
        self.items.retain(|item| item.product.id != *product_id);
        let removed = before - self.items.len();
        if removed > 0 {
            self.reindex();
        }
        removed
    }

    /// Remove the single line with this variant key, returning it.
    pub fn remove_variant(&mut self, key: &VariantKey) -> Option<CartItem> {
        let pos = self.index.remove(key)?;
        let item = self.items.remove(pos);
        self.reindex();
        Some(item)
    }

    /// Remove all lines.
    pub fn clear(&mut self) {
        self.items.clear();
        self.index.clear();
    }

    fn line_mut(&mut self, key: &VariantKey) -> Option<&mut CartItem> {
        let pos = *self.index.get(key)?;
        self.items.get_mut(pos)
    }

    fn push(&mut self, key: VariantKey, item: CartItem) {
        self.index.insert(key, self.items.len());
        self.items.push(item);
    }

    fn reindex(&mut self) {
        self.index = self
            .items
            .iter()
            .enumerate()
            .map(|(pos, item)| (item.key(), pos))
            .collect();
    }
}

impl Serialize for Cart {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.items.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Cart {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<CartItem>::deserialize(deserializer).map(Self::from_items)
    }
}
