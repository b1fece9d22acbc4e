//! Cart domain model
//!
//! A cart is an ordered list of line items keyed by product id. The stored
//! JSON shape matches the browser storefront: each entry carries the product
//! fields side by side with `quantity`.

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::product::{deserialize_price, serialize_price, Product};
use super::result::{Error, Result};

/// A product in the cart with its quantity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredCartItem", into = "StoredCartItem")]
pub struct CartItem {
    pub product: Product,
    pub quantity: u32,
}

/// One stored cart entry: the product fields plus `quantity` in a flat object
#[derive(Serialize, Deserialize)]
struct StoredCartItem {
    id: i64,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(serialize_with = "serialize_price", deserialize_with = "deserialize_price")]
    price: Decimal,
    #[serde(default)]
    image: String,
    #[serde(default)]
    category: String,
    quantity: u32,
}

impl From<StoredCartItem> for CartItem {
    fn from(stored: StoredCartItem) -> Self {
        Self {
            product: Product {
                id: stored.id,
                title: stored.title,
                description: stored.description,
                price: stored.price,
                image: stored.image,
                category: stored.category,
            },
            quantity: stored.quantity,
        }
    }
}

impl From<CartItem> for StoredCartItem {
    fn from(item: CartItem) -> Self {
        let CartItem { product, quantity } = item;
        Self {
            id: product.id,
            title: product.title,
            description: product.description,
            price: product.price,
            image: product.image,
            category: product.category,
            quantity,
        }
    }
}

impl CartItem {
    /// Create a new line item with quantity 1
    pub fn new(product: Product) -> Self {
        Self {
            product,
            quantity: 1,
        }
    }

    pub fn id(&self) -> i64 {
        self.product.id
    }

    /// price × quantity
    pub fn subtotal(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity)
    }
}

/// Ordered collection of cart items
///
/// Invariants: no two entries share a product id, every quantity is at
/// least 1, and every price is non-negative. The total is always derived.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from items, checking every invariant
    pub fn from_items(items: Vec<CartItem>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(item.id()) {
                return Err(Error::validation(format!(
                    "duplicate cart entry for product {}",
                    item.id()
                )));
            }
            if item.quantity == 0 {
                return Err(Error::validation(format!(
                    "quantity for product {} must be at least 1",
                    item.id()
                )));
            }
            item.product
                .validate()
                .map_err(|e| Error::validation(format!("product {}: {}", item.id(), e)))?;
        }
        Ok(Self { items })
    }

    /// Parse a cart from its stored JSON form
    pub fn from_json(json: &str) -> Result<Self> {
        let items: Vec<CartItem> = serde_json::from_str(json)?;
        Self::from_items(items)
    }

    /// Serialize the cart to its stored JSON form
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.items)?)
    }

    /// Add one unit of a product
    ///
    /// A repeat add only bumps the quantity; the fields captured on the
    /// first add are kept as-is.
    pub fn add(&mut self, product: &Product) {
        match self.items.iter_mut().find(|item| item.id() == product.id) {
            Some(item) => item.quantity = item.quantity.saturating_add(1),
            None => self.items.push(CartItem::new(product.clone())),
        }
    }

    /// Remove the entry for a product id. Returns whether anything was removed.
    pub fn remove(&mut self, product_id: i64) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id() != product_id);
        self.items.len() != before
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn get(&self, product_id: i64) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id() == product_id)
    }

    /// Number of distinct entries (what the cart badge shows)
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of quantities across all entries
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Sum of price × quantity; zero for an empty cart
    pub fn total(&self) -> Decimal {
        self.items.iter().map(CartItem::subtotal).sum()
    }
}

/// Cart contents with derived counts, as printed by `--json` output
#[derive(Debug, Clone, Serialize)]
pub struct CartSummary<'a> {
    pub items: &'a [CartItem],
    pub line_count: usize,
    pub item_count: u64,
    #[serde(serialize_with = "serialize_price")]
    pub total: Decimal,
}

impl<'a> From<&'a Cart> for CartSummary<'a> {
    fn from(cart: &'a Cart) -> Self {
        Self {
            items: cart.items(),
            line_count: cart.len(),
            item_count: cart.item_count(),
            total: cart.total(),
        }
    }
}
