//! # Store Handle
//!
//! The one handle to all storefront data.
//!
//! ## Design
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  axum State<AppState>                                                  │
//! │       │  .store (Clone = Arc bumps)                                    │
//! │       ▼                                                                 │
//! │  Store ──┬── products(): ProductRepository  Arc<RwLock<Vec<Product>>> │
//! │          └── orders():   OrderRepository    Arc<RwLock<Vec<Order>>>   │
//! │                                                                         │
//! │  Each test builds its own Store; nothing is process-global.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use pasal_core::{CheckoutPricing, Order, OrderRequest, StoreAnalytics};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::StoreResult;
use crate::repository::order::OrderRepository;
use crate::repository::product::ProductRepository;
use crate::seed::demo_catalog;

/// Main store handle providing repository access.
#[derive(Debug, Clone, Default)]
pub struct Store {
    products: ProductRepository,
    orders: OrderRepository,
}

impl Store {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding the demo catalog.
    pub async fn seeded() -> StoreResult<Self> {
        let store = Store::new();
        for product in demo_catalog(Utc::now()) {
            store.products.insert(product).await?;
        }
        info!(products = store.products.count().await, "Seeded demo catalog");
        Ok(store)
    }

    pub fn products(&self) -> &ProductRepository {
        &self.products
    }

    pub fn orders(&self) -> &OrderRepository {
        &self.orders
    }

    /// Dashboard figures over all orders and the current catalog.
    pub async fn analytics(&self) -> StoreResult<StoreAnalytics> {
        let orders = self.orders.summary().await?;
        let inventory = self.products.inventory_summary().await;
        Ok(StoreAnalytics::new(orders, inventory))
    }

    /// Validates, reserves stock, prices and stores an order.
    ///
    /// ## Steps
    /// 1. `request.validate()`: customer, lines, payment method, coordinates
    /// 2. Reserve stock and snapshot prices (all or nothing)
    /// 3. Price server-side with `pricing`; client totals are ignored
    /// 4. Store as `pending`
    ///
    /// Stock is released again if step 3 or 4 fails.
    pub async fn place_order(&self, pricing: &CheckoutPricing, request: OrderRequest) -> StoreResult<Order> {
        request.validate()?;

        let items = self.products.reserve(&request.items).await?;

        let order = match pricing.build_order(Uuid::new_v4().to_string(), request, items.clone(), Utc::now()) {
            Ok(order) => order,
            Err(err) => {
                warn!(error = %err, "Pricing failed after reservation, releasing stock");
                self.products.release(&items).await;
                return Err(err.into());
            }
        };

        match self.orders.place(order).await {
            Ok(order) => Ok(order),
            Err(err) => {
                self.products.release(&items).await;
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use pasal_core::{
        CoreError, Coordinate, CustomerInfo, DeliveryFeePolicy, DeliveryLocation, Money, OrderLine,
        OrderStatus, PaymentMethod,
    };

    const STORE: Coordinate = Coordinate {
        latitude: 27.8742,
        longitude: 83.4534,
    };

    fn pricing() -> CheckoutPricing {
        CheckoutPricing::new(STORE, DeliveryFeePolicy::default())
    }

    fn request(lines: &[(&str, u32)], location: Option<Coordinate>) -> OrderRequest {
        OrderRequest {
            customer: CustomerInfo {
                id: Some("cust-1".to_string()),
                name: "Gita".to_string(),
                phone: "+977-9812345678".to_string(),
                email: None,
            },
            items: lines
                .iter()
                .map(|(id, quantity)| OrderLine {
                    product_id: id.to_string(),
                    quantity: *quantity,
                })
                .collect(),
            location: location.map(|coordinates| DeliveryLocation {
                coordinates,
                is_manual: false,
                address: None,
            }),
            payment_method: PaymentMethod::Cash,
            special_instructions: None,
        }
    }

    #[tokio::test]
    async fn test_seeded_store() {
        let store = Store::seeded().await.unwrap();
        assert_eq!(store.products().count().await, 6);
        assert_eq!(store.orders().count().await, 0);
    }

    #[tokio::test]
    async fn test_place_order_prices_server_side() {
        let store = Store::seeded().await.unwrap();
        let order = store
            .place_order(&pricing(), request(&[("demo-1", 2), ("demo-3", 1)], None))
            .await
            .unwrap();

        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.pricing.subtotal, Money::from_rupees(445));
        assert_eq!(order.pricing.tax_amount, Money::from_paisa(5785));
        assert_eq!(order.pricing.total, Money::from_paisa(60285));
        assert_eq!(order.items[0].name_en, "Basmati Rice");

        assert_eq!(store.products().get("demo-1").await.unwrap().stock, 48);
        assert_eq!(store.orders().get(&order.id).await.unwrap(), order);
    }

    #[tokio::test]
    async fn test_place_order_at_store_location() {
        let store = Store::seeded().await.unwrap();
        let order = store
            .place_order(&pricing(), request(&[("demo-5", 1)], Some(STORE)))
            .await
            .unwrap();
        assert_eq!(order.pricing.delivery_fee, Money::from_rupees(50));
        assert_eq!(order.delivery.map(|d| d.distance_km), Some(0.0));
    }

    #[tokio::test]
    async fn test_place_order_rejects_out_of_stock() {
        let store = Store::seeded().await.unwrap();
        let err = store
            .place_order(&pricing(), request(&[("demo-1", 1), ("demo-6", 1)], None))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::OutOfStock { .. }));
        assert_eq!(store.products().get("demo-1").await.unwrap().stock, 50);
        assert_eq!(store.orders().count().await, 0);
    }

    #[tokio::test]
    async fn test_place_order_rejects_unknown_and_invalid() {
        let store = Store::seeded().await.unwrap();

        let err = store
            .place_order(&pricing(), request(&[("demo-99", 1)], None))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));

        let mut bad = request(&[("demo-1", 1)], None);
        bad.customer.name = " ".to_string();
        let err = store.place_order(&pricing(), bad).await.unwrap_err();
        assert!(matches!(err, StoreError::Core(_)));
    }

    #[tokio::test]
    async fn test_analytics() {
        let store = Store::seeded().await.unwrap();
        store
            .place_order(&pricing(), request(&[("demo-1", 2)], None))
            .await
            .unwrap();
        store
            .place_order(&pricing(), request(&[("demo-4", 6)], None))
            .await
            .unwrap();

        let analytics = store.analytics().await.unwrap();
        assert_eq!(analytics.total_products, 6);
        assert_eq!(analytics.total_orders, 2);
        // 506.80 + 2269.60
        assert_eq!(analytics.total_revenue, Money::from_paisa(277640));
        assert_eq!(analytics.average_order_value, Money::from_paisa(138820));
        assert_eq!(analytics.top_categories[0].count, 3);
        // demo-4 drops to 9, demo-6 is out
        assert_eq!(analytics.low_stock_products, 2);
    }

    #[tokio::test]
    async fn test_pricing_failure_releases_stock() {
        let store = Store::seeded().await.unwrap();
        let pricing = CheckoutPricing::new(
            STORE,
            DeliveryFeePolicy::new(Money::from_rupees(2000), Money::MAX),
        );
        let err = store
            .place_order(&pricing, request(&[("demo-1", 1)], None))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Core(CoreError::AmountOverflow { .. })));
        assert_eq!(store.products().get("demo-1").await.unwrap().stock, 50);
        assert_eq!(store.orders().count().await, 0);
    }

    #[tokio::test]
    async fn test_concurrent_orders_never_oversell() {
        let store = Store::seeded().await.unwrap();
        // demo-2 has 20 units; 30 customers each want one
        let mut handles = Vec::new();
        for _ in 0..30 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.place_order(&pricing(), request(&[("demo-2", 1)], None)).await
            }));
        }

        let mut placed = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                placed += 1;
            }
        }
        assert_eq!(placed, 20);
        assert_eq!(store.products().get("demo-2").await.unwrap().stock, 0);
    }
}
