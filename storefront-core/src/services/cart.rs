//! Cart store - single owner of the cart, persisted to local storage

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::domain::result::{Error, Result};
use crate::domain::{Cart, CartItem, Product};
use crate::ports::LocalStorage;

/// Storage slot holding the JSON-serialized cart
pub const CART_STORAGE_KEY: &str = "cart";

/// What happened when the saved cart was read at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rehydration {
    /// A saved cart with this many entries was adopted
    Restored(usize),
    /// Nothing was saved
    Empty,
    /// Something was saved but could not be used; started empty
    Discarded(String),
}

/// Cart store
///
/// Holds the current cart and writes it back to storage after every
/// mutation. Mutation methods are the only write path; views get the
/// store by reference.
pub struct CartStore {
    cart: Cart,
    storage: Arc<dyn LocalStorage>,
}

impl CartStore {
    /// Rehydrate the cart from storage
    ///
    /// Reading is best-effort: a missing, unreadable or malformed saved
    /// cart yields an empty store, never an error.
    pub fn load(storage: Arc<dyn LocalStorage>) -> (Self, Rehydration) {
        let (cart, rehydration) = match storage.get_item(CART_STORAGE_KEY) {
            Ok(Some(json)) => match Cart::from_json(&json) {
                Ok(cart) => {
                    let n = cart.len();
                    (cart, Rehydration::Restored(n))
                }
                Err(e) => (Cart::new(), Rehydration::Discarded(e.to_string())),
            },
            Ok(None) => (Cart::new(), Rehydration::Empty),
            Err(e) => (Cart::new(), Rehydration::Discarded(e.to_string())),
        };

        (Self { cart, storage }, rehydration)
    }

    /// Add one unit of a product, then persist
    pub fn add_to_cart(&mut self, product: &Product) -> Result<()> {
        product
            .validate()
            .map_err(|e| Error::validation(format!("product {}: {}", product.id, e)))?;
        self.cart.add(product);
        self.persist()
    }

    /// Remove a product's entry, then persist
    ///
    /// Returns whether an entry was removed; an unknown id is not an error.
    pub fn remove_from_cart(&mut self, product_id: i64) -> Result<bool> {
        let removed = self.cart.remove(product_id);
        self.persist()?;
        Ok(removed)
    }

    /// Empty the cart, then persist
    pub fn clear_cart(&mut self) -> Result<()> {
        self.cart.clear();
        self.persist()
    }

    /// Replace the whole cart, then persist
    ///
    /// The new items must satisfy the cart invariants; on error the current
    /// cart is left untouched.
    pub fn set_cart(&mut self, items: Vec<CartItem>) -> Result<()> {
        self.cart = Cart::from_items(items)?;
        self.persist()
    }

    /// Sum of price × quantity over all entries
    pub fn total(&self) -> Decimal {
        self.cart.total()
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn items(&self) -> &[CartItem] {
        self.cart.items()
    }

    pub fn get(&self, product_id: i64) -> Option<&CartItem> {
        self.cart.get(product_id)
    }

    /// Distinct entries (the cart badge)
    pub fn len(&self) -> usize {
        self.cart.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    /// Total units across all entries
    pub fn item_count(&self) -> u64 {
        self.cart.item_count()
    }

    fn persist(&self) -> Result<()> {
        let json = self.cart.to_json()?;
        self.storage.set_item(CART_STORAGE_KEY, &json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory_storage::MemoryStorage;

    fn product(id: i64, cents: i64) -> Product {
        Product::new(id, format!("Product {}", id), Decimal::new(cents, 2))
    }

    fn empty_store() -> (CartStore, Arc<MemoryStorage>) {
        let storage = Arc::new(MemoryStorage::new());
        let (store, _) = CartStore::load(storage.clone());
        (store, storage)
    }

    #[test]
    fn test_load_without_saved_cart() {
        let (store, rehydration) = CartStore::load(Arc::new(MemoryStorage::new()));
        assert!(store.is_empty());
        assert_eq!(rehydration, Rehydration::Empty);
    }

    #[test]
    fn test_load_malformed_saved_cart_starts_empty() {
        let storage = Arc::new(MemoryStorage::with_item(CART_STORAGE_KEY, "{{{"));
        let (store, rehydration) = CartStore::load(storage);

        assert!(store.is_empty());
        assert!(matches!(rehydration, Rehydration::Discarded(_)));
    }

    #[test]
    fn test_load_cart_with_duplicate_ids_starts_empty() {
        let json = r#"[
            {"id": 1, "title": "A", "price": 1, "quantity": 1},
            {"id": 1, "title": "A", "price": 1, "quantity": 2}
        ]"#;
        let (store, rehydration) = CartStore::load(Arc::new(MemoryStorage::with_item(CART_STORAGE_KEY, json)));

        assert!(store.is_empty());
        assert!(matches!(rehydration, Rehydration::Discarded(_)));
    }

    #[test]
    fn test_add_persists_every_change() {
        let (mut store, storage) = empty_store();
        let p = product(1, 1000);

        store.add_to_cart(&p).unwrap();
        store.add_to_cart(&p).unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.get(1).unwrap().quantity, 2);

        let saved = storage.get_item(CART_STORAGE_KEY).unwrap().unwrap();
        assert_eq!(Cart::from_json(&saved).unwrap(), *store.cart());
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let (mut store, _) = empty_store();
        store.add_to_cart(&product(1, 1000)).unwrap();

        assert!(!store.remove_from_cart(99).unwrap());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_total() {
        let (mut store, _) = empty_store();
        assert_eq!(store.total(), Decimal::ZERO);

        store
            .set_cart(vec![
                CartItem {
                    product: product(1, 1000),
                    quantity: 2,
                },
                CartItem {
                    product: product(2, 500),
                    quantity: 1,
                },
            ])
            .unwrap();

        assert_eq!(store.total(), Decimal::new(25, 0));
        assert_eq!(store.item_count(), 3);
    }

    #[test]
    fn test_set_cart_rejects_invalid_and_keeps_current() {
        let (mut store, _) = empty_store();
        store.add_to_cart(&product(1, 1000)).unwrap();

        let result = store.set_cart(vec![CartItem {
            product: product(2, 500),
            quantity: 0,
        }]);

        assert!(result.is_err());
        assert_eq!(store.len(), 1);
        assert!(store.get(1).is_some());
    }

    #[test]
    fn test_clear_cart() {
        let (mut store, storage) = empty_store();
        store.add_to_cart(&product(1, 1000)).unwrap();
        store.clear_cart().unwrap();

        assert!(store.is_empty());
        assert_eq!(store.total(), Decimal::ZERO);
        assert_eq!(storage.get_item(CART_STORAGE_KEY).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_round_trip_through_storage() {
        let (mut store, storage) = empty_store();
        store.add_to_cart(&product(3, 10995)).unwrap();
        store.add_to_cart(&product(1, 2299)).unwrap();
        store.add_to_cart(&product(3, 10995)).unwrap();

        let (reloaded, rehydration) = CartStore::load(storage);
        assert_eq!(rehydration, Rehydration::Restored(2));
        assert_eq!(reloaded.cart(), store.cart());
    }

    #[test]
    fn test_high_precision_price_survives_reload() {
        let (mut store, storage) = empty_store();
        let bullion: Product = serde_json::from_str(
            r#"{"id": 5, "title": "Gold bar", "price": "1234567890.123456789"}"#,
        )
        .unwrap();
        store.add_to_cart(&bullion).unwrap();

        let (reloaded, rehydration) = CartStore::load(storage);
        assert_eq!(rehydration, Rehydration::Restored(1));
        assert_eq!(reloaded.cart(), store.cart());
        assert_eq!(
            reloaded.get(5).unwrap().product.price.to_string(),
            "1234567890.123456789"
        );
    }
}
