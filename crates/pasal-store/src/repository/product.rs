//! # Product Repository
//!
//! Catalog operations for products.
//!
//! ## Key Operations
//! - Filtered, paginated listing
//! - CRUD operations
//! - Atomic stock reservation for order placement
//!
//! ## Filtering
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  GET /api/products?category=grocery&search=rice&maxPrice=200           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  category ─► search (name, nameEn, description) ─► minPrice            │
//! │       ─► maxPrice ─► inStock ─► paginate                               │
//! │                                                                         │
//! │  Every filter is optional; catalog order is insertion order.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use pasal_core::validation::{
    validate_new_product, validate_price, validate_product_update, validate_search_query,
};
use pasal_core::{
    Category, InventorySummary, Money, NewProduct, OrderItem, OrderLine, Product, ProductUpdate,
};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::repository::{Page, Pagination};

/// Catalog filters. `None` / `false` means "don't filter".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    pub category: Option<Category>,
    pub search: Option<String>,
    pub min_price: Option<Money>,
    pub max_price: Option<Money>,
    pub in_stock_only: bool,
}

impl ProductFilter {
    fn matches(&self, product: &Product) -> bool {
        if self.category.is_some_and(|c| c != product.category) {
            return false;
        }
        if let Some(needle) = self.search.as_deref().filter(|s| !s.is_empty()) {
            if !product.matches_search(needle) {
                return false;
            }
        }
        if self.min_price.is_some_and(|min| product.price < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| product.price > max) {
            return false;
        }
        if self.in_stock_only && !product.in_stock {
            return false;
        }
        true
    }
}

/// Repository for catalog operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = store.products();
///
/// let page = repo.list(&ProductFilter::default(), Pagination::default()).await?;
/// let product = repo.get("demo-1").await?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct ProductRepository {
    products: Arc<RwLock<Vec<Product>>>,
}

impl ProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lists products matching `filter`, one page at a time.
    pub async fn list(&self, filter: &ProductFilter, page: Pagination) -> StoreResult<Page<Product>> {
        let search = filter
            .search
            .as_deref()
            .map(validate_search_query)
            .transpose()?;
        let filter = ProductFilter {
            search,
            ..filter.clone()
        };

        let products = self.products.read().await;
        let matching: Vec<Product> = products
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();
        drop(products);

        debug!(matched = matching.len(), page = page.page(), "Listing products");
        Ok(page.slice(matching))
    }

    /// Gets a product by its ID.
    pub async fn get(&self, id: &str) -> StoreResult<Product> {
        self.products
            .read()
            .await
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("Product", id))
    }

    /// Creates a product from a client payload. Assigns a new UUID.
    pub async fn create(&self, new: NewProduct) -> StoreResult<Product> {
        validate_new_product(&new)?;
        let product = Product::from_new(Uuid::new_v4().to_string(), new, Utc::now());
        self.insert(product.clone()).await?;
        Ok(product)
    }

    /// Inserts a fully-formed product (seeding, tests).
    pub async fn insert(&self, product: Product) -> StoreResult<()> {
        validate_price("price", product.price)?;
        let mut products = self.products.write().await;
        if products.iter().any(|p| p.id == product.id) {
            return Err(StoreError::duplicate("id", product.id));
        }
        debug!(id = %product.id, name = %product.name_en, "Inserting product");
        products.push(product);
        Ok(())
    }

    /// Merges a partial update into an existing product.
    pub async fn update(&self, id: &str, update: ProductUpdate) -> StoreResult<Product> {
        validate_product_update(&update)?;

        let mut products = self.products.write().await;
        let product = products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| StoreError::not_found("Product", id))?;

        product.apply_update(update, Utc::now());
        debug!(id = %id, "Updated product");
        Ok(product.clone())
    }

    /// Deletes a product, returning what was removed.
    pub async fn delete(&self, id: &str) -> StoreResult<Product> {
        let mut products = self.products.write().await;
        let index = products
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| StoreError::not_found("Product", id))?;

        debug!(id = %id, "Deleting product");
        Ok(products.remove(index))
    }

    pub async fn count(&self) -> usize {
        self.products.read().await.len()
    }

    /// Catalog size, products per category and low-stock count.
    pub async fn inventory_summary(&self) -> InventorySummary {
        let products = self.products.read().await;
        InventorySummary::from_stock(products.iter().map(|p| (p.category, p.stock)))
    }

    /// Checks and decrements stock for every line, all or nothing.
    ///
    /// Duplicate product ids are merged first. Returns price snapshots taken
    /// under the same lock, so the order is priced at exactly what was
    /// reserved. A product whose stock reaches zero is marked out of stock.
    pub async fn reserve(&self, lines: &[OrderLine]) -> StoreResult<Vec<OrderItem>> {
        let mut wanted: BTreeMap<&str, u32> = BTreeMap::new();
        let mut order: Vec<&str> = Vec::new();
        for line in lines {
            let qty = wanted.entry(line.product_id.as_str()).or_insert_with(|| {
                order.push(line.product_id.as_str());
                0
            });
            *qty = qty.saturating_add(line.quantity);
        }

        let mut products = self.products.write().await;

        let mut snapshots = Vec::with_capacity(order.len());
        for id in &order {
            let qty = wanted[id];
            let product = products
                .iter()
                .find(|p| p.id == *id)
                .ok_or_else(|| StoreError::not_found("Product", *id))?;

            if !product.can_sell(qty) {
                return Err(StoreError::OutOfStock {
                    product_id: product.id.clone(),
                    requested: qty,
                    available: if product.in_stock { product.stock } else { 0 },
                });
            }
            snapshots.push(OrderItem::snapshot(product, qty));
        }

        for item in &snapshots {
            if let Some(product) = products.iter_mut().find(|p| p.id == item.product_id) {
                product.stock -= item.quantity;
                if product.stock == 0 {
                    product.in_stock = false;
                }
            }
        }

        debug!(lines = snapshots.len(), "Reserved stock");
        Ok(snapshots)
    }

    /// Returns reserved stock, e.g. when building the order failed.
    pub async fn release(&self, items: &[OrderItem]) {
        let mut products = self.products.write().await;
        for item in items {
            if let Some(product) = products.iter_mut().find(|p| p.id == item.product_id) {
                product.stock = product.stock.saturating_add(item.quantity);
                product.in_stock = true;
            }
        }
    }
}
