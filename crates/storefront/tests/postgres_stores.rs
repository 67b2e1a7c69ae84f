//! Live tests for the `PostgreSQL` stores using `#[sqlx::test]`.
//!
//! Each test gets a fresh database with the crate's `migrations/` applied.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use rust_decimal::Decimal;
use vitrine_core::{CartId, ColorOption, ProductId, UserId};
use vitrine_storefront::cart::{QuantityChange, RemoteCartStore};
use vitrine_storefront::catalog::CatalogStore;
use vitrine_storefront::db::{PgCartStore, PgCatalogStore, PgInventoryStore};
use vitrine_storefront::inventory::InventoryStore;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Insert a product offered in P/M/G and Navy/Sand.
async fn insert_product(pool: &sqlx::PgPool, id: &str, slug: &str) -> ProductId {
    sqlx::query(
        "INSERT INTO storefront.product \
             (id, slug, name, category, price, images, sizes, colors) \
         VALUES ($1, $2, $3, 'Dresses', 189.90, ARRAY['front.jpg'], \
                 ARRAY['P', 'M', 'G'], $4::jsonb)",
    )
    .bind(id)
    .bind(slug)
    .bind(format!("Product {id}"))
    .bind(r##"[{"name":"Navy","hex":"#1f2a44"},{"name":"Sand","hex":"#d8c8a8"}]"##)
    .execute(pool)
    .await
    .unwrap_or_else(|e| panic!("insert_product failed for id '{id}': {e}"));

    ProductId::new(id)
}

async fn insert_stock(pool: &sqlx::PgPool, product_id: &str, color: &str, size: &str, qty: i32) {
    sqlx::query(
        "INSERT INTO storefront.inventory (product_id, color, size, quantity) \
         VALUES ($1, $2, $3, $4)",
    )
    .bind(product_id)
    .bind(color)
    .bind(size)
    .bind(qty)
    .execute(pool)
    .await
    .unwrap_or_else(|e| panic!("insert_stock failed for '{product_id}': {e}"));
}

async fn quantities(store: &PgCartStore, cart_id: CartId) -> Vec<(String, String, u32)> {
    store
        .list_items(cart_id)
        .await
        .unwrap()
        .into_iter()
        .map(|item| (item.size, item.color, item.quantity))
        .collect()
}

// ---------------------------------------------------------------------------
// Carts
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn get_or_create_cart_is_idempotent_per_user(pool: sqlx::PgPool) {
    let store = PgCartStore::new(pool);
    let alice = UserId::new("u-alice");

    let first = store.get_or_create_cart(&alice).await.unwrap();
    let second = store.get_or_create_cart(&alice).await.unwrap();
    let other = store.get_or_create_cart(&UserId::new("u-bob")).await.unwrap();

    assert_eq!(first, second);
    assert_ne!(first, other);
}

#[sqlx::test(migrations = "./migrations")]
async fn increment_inserts_missing_line_and_floors_at_one(pool: sqlx::PgPool) {
    let dress = insert_product(&pool, "p1", "linen-dress").await;
    let store = PgCartStore::new(pool);
    let cart = store.get_or_create_cart(&UserId::new("u-1")).await.unwrap();

    store
        .upsert_item(cart, &dress, "M", "Navy", QuantityChange::Increment(-3))
        .await
        .unwrap();
    assert_eq!(quantities(&store, cart).await, vec![("M".into(), "Navy".into(), 1)]);

    store
        .upsert_item(cart, &dress, "M", "Navy", QuantityChange::Increment(1))
        .await
        .unwrap();
    assert_eq!(quantities(&store, cart).await, vec![("M".into(), "Navy".into(), 2)]);

    store
        .upsert_item(cart, &dress, "M", "Navy", QuantityChange::Increment(-5))
        .await
        .unwrap();
    assert_eq!(quantities(&store, cart).await, vec![("M".into(), "Navy".into(), 1)]);
}

#[sqlx::test(migrations = "./migrations")]
async fn set_overwrites_quantity_and_keeps_stored_color(pool: sqlx::PgPool) {
    let dress = insert_product(&pool, "p1", "linen-dress").await;
    let store = PgCartStore::new(pool);
    let cart = store.get_or_create_cart(&UserId::new("u-1")).await.unwrap();

    store
        .upsert_item(cart, &dress, "G", "Navy", QuantityChange::Set(4))
        .await
        .unwrap();
    store
        .upsert_item(cart, &dress, "G", "Sand", QuantityChange::Set(2))
        .await
        .unwrap();

    assert_eq!(quantities(&store, cart).await, vec![("G".into(), "Navy".into(), 2)]);
}

#[sqlx::test(migrations = "./migrations")]
async fn listed_items_carry_the_product_record(pool: sqlx::PgPool) {
    let dress = insert_product(&pool, "p1", "linen-dress").await;
    let scarf = insert_product(&pool, "p2", "silk-scarf").await;
    let store = PgCartStore::new(pool);
    let cart = store.get_or_create_cart(&UserId::new("u-1")).await.unwrap();
    store
        .upsert_item(cart, &dress, "M", "Navy", QuantityChange::Increment(1))
        .await
        .unwrap();
    store
        .upsert_item(cart, &scarf, "P", "Sand", QuantityChange::Increment(1))
        .await
        .unwrap();

    let items = store.list_items(cart).await.unwrap();

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].product.id, dress);
    assert_eq!(items[0].product.price, Decimal::new(18990, 2));
    assert_eq!(items[1].product.slug, "silk-scarf");
}

#[sqlx::test(migrations = "./migrations")]
async fn delete_and_clear_only_touch_their_cart(pool: sqlx::PgPool) {
    let dress = insert_product(&pool, "p1", "linen-dress").await;
    let store = PgCartStore::new(pool);
    let mine = store.get_or_create_cart(&UserId::new("u-1")).await.unwrap();
    let theirs = store.get_or_create_cart(&UserId::new("u-2")).await.unwrap();
    for cart in [mine, theirs] {
        for size in ["P", "M"] {
            store
                .upsert_item(cart, &dress, size, "Navy", QuantityChange::Increment(1))
                .await
                .unwrap();
        }
    }

    store.delete_item(mine, &dress, "P").await.unwrap();
    assert_eq!(quantities(&store, mine).await, vec![("M".into(), "Navy".into(), 1)]);

    store.clear(mine).await.unwrap();
    assert!(store.list_items(mine).await.unwrap().is_empty());
    assert_eq!(store.list_items(theirs).await.unwrap().len(), 2);
}

// ---------------------------------------------------------------------------
// Catalog and inventory
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn catalog_reads_products_by_slug_and_id(pool: sqlx::PgPool) {
    let dress = insert_product(&pool, "p1", "linen-dress").await;
    let catalog = PgCatalogStore::new(pool);

    let by_slug = catalog.product_by_slug("linen-dress").await.unwrap().unwrap();
    assert_eq!(by_slug.id, dress);
    assert_eq!(by_slug.sizes, vec!["P", "M", "G"]);
    assert_eq!(
        by_slug.colors,
        vec![ColorOption::new("Navy", "#1f2a44"), ColorOption::new("Sand", "#d8c8a8")]
    );

    let by_id = catalog.product_by_id(&dress).await.unwrap();
    assert_eq!(by_id, Some(by_slug));
    assert!(catalog.product_by_slug("missing").await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn inventory_rows_are_returned_per_product(pool: sqlx::PgPool) {
    let dress = insert_product(&pool, "p1", "linen-dress").await;
    insert_product(&pool, "p2", "silk-scarf").await;
    insert_stock(&pool, "p1", "Navy", "M", 3).await;
    insert_stock(&pool, "p1", "Sand", "M", 0).await;
    insert_stock(&pool, "p2", "Navy", "P", 9).await;
    let inventory = PgInventoryStore::new(pool);

    let records = inventory.records_for(&dress).await.unwrap();

    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|r| r.product_id == dress));
    assert_eq!((records[0].color.as_str(), records[0].quantity), ("Navy", 3));
    assert_eq!((records[1].color.as_str(), records[1].quantity), ("Sand", 0));
    assert!(
        inventory
            .records_for(&ProductId::new("untracked"))
            .await
            .unwrap()
            .is_empty()
    );
}
