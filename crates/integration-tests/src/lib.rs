//! Integration test harness for Vitrine.
//!
//! Provides in-memory backends for the storefront's remote seams so the cart,
//! inventory and checkout flows can be driven end to end without `PostgreSQL`.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p vitrine-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_properties` - Cart mutation, reconciliation and stock gating rules
//! - `shopping_flow` - Device storage, wishlist and checkout across sessions

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use rust_decimal::Decimal;
use vitrine_core::{CartId, ColorOption, InventoryRecord, Product, ProductId, UserId};
use vitrine_storefront::cart::{QuantityChange, RemoteCartItem, RemoteCartStore};
use vitrine_storefront::db::RepositoryError;
use vitrine_storefront::inventory::InventoryStore;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn offline() -> RepositoryError {
    RepositoryError::Unavailable("backend offline".to_string())
}

/// Build a catalog product offered in sizes P/M/G and colors Preto/Off-white.
pub fn product(id: &str, name: &str, price: i64) -> Product {
    Product {
        id: ProductId::new(id),
        slug: name.to_lowercase().replace(' ', "-"),
        name: name.to_string(),
        category: "Vestidos".to_string(),
        price: Decimal::new(price, 0),
        images: vec![format!("/images/{id}.jpg")],
        description: String::new(),
        details: String::new(),
        composition: "100% linho".to_string(),
        sizes: vec!["P".to_string(), "M".to_string(), "G".to_string()],
        colors: vec![
            ColorOption::new("Preto", "#000000"),
            ColorOption::new("Off-white", "#f5f1e8"),
        ],
    }
}

/// A remote cart database held in memory.
///
/// Every operation fails with [`RepositoryError::Unavailable`] while the
/// store is offline.
#[derive(Default)]
pub struct InMemoryCarts {
    carts: Mutex<HashMap<UserId, CartId>>,
    lines: Mutex<HashMap<CartId, Vec<RemoteCartItem>>>,
    products: Mutex<HashMap<ProductId, Product>>,
    offline: AtomicBool,
    writes: AtomicUsize,
}

impl InMemoryCarts {
    #[must_use]
    pub fn new(catalog: &[Product]) -> Self {
        let store = Self::default();
        lock(&store.products).extend(catalog.iter().map(|p| (p.id.clone(), p.clone())));
        store
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Successful writes so far.
    #[must_use]
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Put a line straight into `user`'s remote cart.
    pub fn preload(&self, user: &UserId, product: &Product, size: &str, color: &str, quantity: u32) {
        let cart_id = self.cart_of(user);
        lock(&self.lines).entry(cart_id).or_default().push(RemoteCartItem {
            product: product.clone(),
            size: size.to_string(),
            color: color.to_string(),
            quantity,
        });
    }

    /// `(product, size, quantity)` for every line in `user`'s remote cart.
    #[must_use]
    pub fn contents(&self, user: &UserId) -> Vec<(String, String, u32)> {
        let Some(cart_id) = lock(&self.carts).get(user).copied() else {
            return Vec::new();
        };
        lock(&self.lines)
            .get(&cart_id)
            .map(|items| {
                items
                    .iter()
                    .map(|i| (i.product.id.to_string(), i.size.clone(), i.quantity))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn cart_of(&self, user: &UserId) -> CartId {
        *lock(&self.carts)
            .entry(user.clone())
            .or_insert_with(CartId::generate)
    }

    fn check_online(&self) -> Result<(), RepositoryError> {
        if self.offline.load(Ordering::SeqCst) {
            Err(offline())
        } else {
            Ok(())
        }
    }
}

impl RemoteCartStore for InMemoryCarts {
    async fn get_or_create_cart(&self, user_id: &UserId) -> Result<CartId, RepositoryError> {
        self.check_online()?;
        Ok(self.cart_of(user_id))
    }

    async fn list_items(&self, cart_id: CartId) -> Result<Vec<RemoteCartItem>, RepositoryError> {
        self.check_online()?;
        Ok(lock(&self.lines).get(&cart_id).cloned().unwrap_or_default())
    }

    async fn upsert_item(
        &self,
        cart_id: CartId,
        product_id: &ProductId,
        size: &str,
        color: &str,
        change: QuantityChange,
    ) -> Result<(), RepositoryError> {
        self.check_online()?;
        let product = lock(&self.products)
            .get(product_id)
            .cloned()
            .ok_or(RepositoryError::NotFound)?;

        let mut lines = lock(&self.lines);
        let items = lines.entry(cart_id).or_default();
        let existing = items
            .iter_mut()
            .find(|i| &i.product.id == product_id && i.size == size);
        match (existing, change) {
            (Some(item), QuantityChange::Increment(delta)) => {
                item.quantity = item.quantity.saturating_add_signed(delta).max(1);
            }
            (Some(item), QuantityChange::Set(quantity)) => item.quantity = quantity.max(1),
            (None, change) => {
                let quantity = match change {
                    QuantityChange::Increment(delta) => delta.max(1).unsigned_abs(),
                    QuantityChange::Set(quantity) => quantity.max(1),
                };
                items.push(RemoteCartItem {
                    product,
                    size: size.to_string(),
                    color: color.to_string(),
                    quantity,
                });
            }
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn delete_item(
        &self,
        cart_id: CartId,
        product_id: &ProductId,
        size: &str,
    ) -> Result<(), RepositoryError> {
        self.check_online()?;
        if let Some(items) = lock(&self.lines).get_mut(&cart_id) {
            items.retain(|i| !(&i.product.id == product_id && i.size == size));
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn clear(&self, cart_id: CartId) -> Result<(), RepositoryError> {
        self.check_online()?;
        lock(&self.lines).remove(&cart_id);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Inventory rows held in memory, with an offline switch.
#[derive(Default)]
pub struct InMemoryInventory {
    rows: Mutex<Vec<InventoryRecord>>,
    offline: AtomicBool,
}

impl InMemoryInventory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the quantity of a `(product, color, size)` row, adding it if absent.
    pub fn stock(&self, product_id: &ProductId, color: &str, size: &str, quantity: u32) {
        let mut rows = lock(&self.rows);
        if let Some(row) = rows
            .iter_mut()
            .find(|r| &r.product_id == product_id && r.color == color && r.size == size)
        {
            row.quantity = quantity;
        } else {
            rows.push(InventoryRecord::new(product_id.clone(), color, size, quantity));
        }
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }
}

impl InventoryStore for InMemoryInventory {
    async fn records_for(
        &self,
        product_id: &ProductId,
    ) -> Result<Vec<InventoryRecord>, RepositoryError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(offline());
        }
        Ok(lock(&self.rows)
            .iter()
            .filter(|r| &r.product_id == product_id)
            .cloned()
            .collect())
    }
}
