//! Inventory fetching and stock lookups.
//!
//! Rows are fetched per product from the inventory backend and cached in
//! memory via `moka`. The fail-open/fail-closed rules live in
//! [`StockLookup`]; this module only decides which rows it sees.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use tracing::{debug, instrument, warn};
use vitrine_core::{InventoryRecord, Product, ProductId, StockLookup};

use crate::db::RepositoryError;

/// Source of per-product inventory rows.
pub trait InventoryStore: Send + Sync {
    /// Every inventory row of the product (possibly none).
    fn records_for(
        &self,
        product_id: &ProductId,
    ) -> impl Future<Output = Result<Vec<InventoryRecord>, RepositoryError>> + Send;
}

impl<T: InventoryStore> InventoryStore for Arc<T> {
    fn records_for(
        &self,
        product_id: &ProductId,
    ) -> impl Future<Output = Result<Vec<InventoryRecord>, RepositoryError>> + Send {
        (**self).records_for(product_id)
    }
}

/// Cached inventory access for purchase gating.
pub struct InventoryService<S> {
    store: S,
    cache: Cache<ProductId, Vec<InventoryRecord>>,
}

impl<S: InventoryStore> InventoryService<S> {
    /// Create a service caching rows for `ttl`.
    #[must_use]
    pub fn new(store: S, ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(ttl)
            .build();
        Self { store, cache }
    }

    /// Stock lookup for a product.
    ///
    /// If the rows cannot be fetched, the failure is logged and the returned
    /// lookup reports every variant as unavailable. Failures are not cached.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn lookup(&self, product_id: &ProductId) -> StockLookup {
        if let Some(records) = self.cache.get(product_id).await {
            debug!("Inventory cache hit");
            return StockLookup::new(records);
        }

        match self.store.records_for(product_id).await {
            Ok(records) => {
                self.cache
                    .insert(product_id.clone(), records.clone())
                    .await;
                StockLookup::new(records)
            }
            Err(e) => {
                warn!(error = %e, "Failed to load inventory, treating product as unavailable");
                StockLookup::unavailable()
            }
        }
    }

    /// Whether the `(size, color)` variant of `product` can be purchased.
    pub async fn has_stock(&self, product: &Product, size: &str, color: &str) -> bool {
        self.lookup(&product.id).await.has_stock(size, color)
    }

    /// Whether any size of `product` has stock in `color`.
    pub async fn color_has_any_stock(&self, product: &Product, color: &str) -> bool {
        self.lookup(&product.id)
            .await
            .color_has_any_stock(color, &product.sizes)
    }

    /// Drop cached rows for a product.
    pub async fn invalidate(&self, product_id: &ProductId) {
        self.cache.invalidate(product_id).await;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use rust_decimal::Decimal;
    use vitrine_core::ColorOption;

    use super::*;

    #[derive(Default)]
    struct FakeInventory {
        rows: Mutex<Vec<InventoryRecord>>,
        fail: bool,
        calls: AtomicUsize,
    }

    impl InventoryStore for FakeInventory {
        async fn records_for(
            &self,
            product_id: &ProductId,
        ) -> Result<Vec<InventoryRecord>, RepositoryError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(RepositoryError::Unavailable("inventory offline".to_owned()));
            }
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .filter(|r| &r.product_id == product_id)
                .cloned()
                .collect())
        }
    }

    fn dress() -> Product {
        Product {
            id: ProductId::new("p1"),
            slug: "wrap-dress".to_owned(),
            name: "Wrap Dress".to_owned(),
            category: "Dresses".to_owned(),
            price: Decimal::new(18990, 2),
            images: Vec::new(),
            description: String::new(),
            details: String::new(),
            composition: String::new(),
            sizes: vec!["P".to_owned(), "M".to_owned()],
            colors: vec![ColorOption::new("Navy", "#1f2a44")],
        }
    }

    fn row(size: &str, color: &str, quantity: u32) -> InventoryRecord {
        InventoryRecord::new(ProductId::new("p1"), color, size, quantity)
    }

    #[tokio::test]
    async fn test_untracked_product_is_purchasable() {
        let service = InventoryService::new(FakeInventory::default(), Duration::from_secs(60));
        assert!(service.has_stock(&dress(), "M", "Navy").await);
    }

    #[tokio::test]
    async fn test_swatch_uses_product_sizes() {
        let store = FakeInventory::default();
        *store.rows.lock().unwrap() = vec![row("P", "Navy", 0), row("M", "Navy", 5)];
        let service = InventoryService::new(store, Duration::from_secs(60));

        assert!(service.color_has_any_stock(&dress(), "Navy").await);
        assert!(!service.has_stock(&dress(), "P", "Navy").await);
    }

    #[tokio::test]
    async fn test_rows_are_cached_until_invalidated() {
        let service = InventoryService::new(FakeInventory::default(), Duration::from_secs(60));
        let id = ProductId::new("p1");

        service.lookup(&id).await;
        service.lookup(&id).await;
        assert_eq!(service.store.calls.load(Ordering::SeqCst), 1);

        service.invalidate(&id).await;
        service.lookup(&id).await;
        assert_eq!(service.store.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_fetch_failure_reports_unavailable_and_is_not_cached() {
        let store = FakeInventory {
            fail: true,
            ..FakeInventory::default()
        };
        let service = InventoryService::new(store, Duration::from_secs(60));

        assert!(!service.has_stock(&dress(), "M", "Navy").await);
        assert!(!service.has_stock(&dress(), "M", "Navy").await);
        assert_eq!(service.store.calls.load(Ordering::SeqCst), 2);
    }
}
