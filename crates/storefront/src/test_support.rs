//! In-memory fakes shared by unit tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use rust_decimal::Decimal;
use vitrine_core::{CartId, ColorOption, Product, ProductId, UserId};

use crate::cart::{QuantityChange, RemoteCartItem, RemoteCartStore};
use crate::db::RepositoryError;

pub fn product(id: &str, price: i64) -> Product {
    Product {
        id: ProductId::new(id),
        slug: format!("{id}-slug"),
        name: format!("Product {id}"),
        category: "Dresses".to_owned(),
        price: Decimal::new(price, 0),
        images: vec![format!("{id}.jpg")],
        description: String::new(),
        details: String::new(),
        composition: String::new(),
        sizes: vec!["P".to_owned(), "M".to_owned(), "G".to_owned()],
        colors: vec![
            ColorOption::new("Navy", "#1f2a44"),
            ColorOption::new("Sand", "#d8c8a8"),
        ],
    }
}

/// Remote cart kept in memory, with optional failure injection.
#[derive(Default)]
pub struct FakeRemote {
    carts: Mutex<HashMap<UserId, CartId>>,
    items: Mutex<HashMap<CartId, Vec<RemoteCartItem>>>,
    catalog: Mutex<HashMap<ProductId, Product>>,
    writes: AtomicUsize,
    /// Fail every write once this many writes have succeeded.
    fail_after_writes: Option<usize>,
    fail_reads: bool,
}

impl FakeRemote {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_after(writes: usize) -> Self {
        Self {
            fail_after_writes: Some(writes),
            ..Self::default()
        }
    }

    pub fn unreachable() -> Self {
        Self {
            fail_reads: true,
            fail_after_writes: Some(0),
            ..Self::default()
        }
    }

    /// Make `product` known so inserted lines can be enriched.
    pub fn register(&self, product: &Product) {
        self.catalog
            .lock()
            .unwrap()
            .insert(product.id.clone(), product.clone());
    }

    /// Seed the user's remote cart with a line.
    pub fn seed(&self, user: &UserId, product: &Product, size: &str, color: &str, quantity: u32) {
        self.register(product);
        let cart_id = self.cart_for(user);
        self.items
            .lock()
            .unwrap()
            .entry(cart_id)
            .or_default()
            .push(RemoteCartItem {
                product: product.clone(),
                size: size.to_owned(),
                color: color.to_owned(),
                quantity,
            });
    }

    pub fn items_for(&self, user: &UserId) -> Vec<RemoteCartItem> {
        let Some(cart_id) = self.carts.lock().unwrap().get(user).copied() else {
            return Vec::new();
        };
        self.items
            .lock()
            .unwrap()
            .get(&cart_id)
            .cloned()
            .unwrap_or_default()
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn cart_for(&self, user: &UserId) -> CartId {
        *self
            .carts
            .lock()
            .unwrap()
            .entry(user.clone())
            .or_insert_with(CartId::generate)
    }

    fn begin_write(&self) -> Result<(), RepositoryError> {
        if let Some(limit) = self.fail_after_writes
            && self.writes.load(Ordering::SeqCst) >= limit
        {
            return Err(RepositoryError::Unavailable("remote write rejected".to_owned()));
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

impl RemoteCartStore for FakeRemote {
    async fn get_or_create_cart(&self, user_id: &UserId) -> Result<CartId, RepositoryError> {
        if self.fail_reads {
            return Err(RepositoryError::Unavailable("remote unreachable".to_owned()));
        }
        Ok(self.cart_for(user_id))
    }

    async fn list_items(&self, cart_id: CartId) -> Result<Vec<RemoteCartItem>, RepositoryError> {
        if self.fail_reads {
            return Err(RepositoryError::Unavailable("remote unreachable".to_owned()));
        }
        Ok(self
            .items
            .lock()
            .unwrap()
            .get(&cart_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn upsert_item(
        &self,
        cart_id: CartId,
        product_id: &ProductId,
        size: &str,
        color: &str,
        change: QuantityChange,
    ) -> Result<(), RepositoryError> {
        self.begin_write()?;
        let product = self
            .catalog
            .lock()
            .unwrap()
            .get(product_id)
            .cloned()
            .ok_or(RepositoryError::NotFound)?;

        let mut items = self.items.lock().unwrap();
        let lines = items.entry(cart_id).or_default();
        if let Some(existing) = lines
            .iter_mut()
            .find(|i| &i.product.id == product_id && i.size == size)
        {
            existing.quantity = match change {
                QuantityChange::Increment(delta) => {
                    u32::try_from((i64::from(existing.quantity) + i64::from(delta)).max(1))
                        .unwrap()
                }
                QuantityChange::Set(quantity) => quantity.max(1),
            };
        } else {
            let quantity = match change {
                QuantityChange::Increment(delta) => u32::try_from(delta.max(1)).unwrap(),
                QuantityChange::Set(quantity) => quantity.max(1),
            };
            lines.push(RemoteCartItem {
                product,
                size: size.to_owned(),
                color: color.to_owned(),
                quantity,
            });
        }
        Ok(())
    }

    async fn delete_item(
        &self,
        cart_id: CartId,
        product_id: &ProductId,
        size: &str,
    ) -> Result<(), RepositoryError> {
        self.begin_write()?;
        if let Some(lines) = self.items.lock().unwrap().get_mut(&cart_id) {
            lines.retain(|i| !(&i.product.id == product_id && i.size == size));
        }
        Ok(())
    }

    async fn clear(&self, cart_id: CartId) -> Result<(), RepositoryError> {
        self.begin_write()?;
        self.items.lock().unwrap().remove(&cart_id);
        Ok(())
    }
}
