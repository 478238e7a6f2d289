//! # Order Repository
//!
//! Storage for placed orders.
//!
//! ## Order Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Store::place_order()                                                   │
//! │       │  reserve stock, price server-side                              │
//! │       ▼                                                                 │
//! │  place() ──► [pending] ──update_status()──► confirmed ─► … ─► delivered│
//! │                                    │                                    │
//! │                                    └────────────────────────► cancelled│
//! │                                                                         │
//! │  Orders are never deleted.                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use chrono::Utc;
use pasal_core::validation::validate_search_query;
use pasal_core::{Order, OrderStatus, OrderSummary};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};

/// Order listing criteria. Empty criteria match every order.
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    pub customer_id: Option<String>,
    pub status: Option<OrderStatus>,
    /// Free text over order id, order number, customer name and phone.
    pub search: Option<String>,
}

impl OrderFilter {
    fn matches(&self, order: &Order) -> bool {
        if let Some(id) = self.customer_id.as_deref() {
            if order.customer.id.as_deref() != Some(id) {
                return false;
            }
        }
        if self.status.is_some_and(|s| s != order.status) {
            return false;
        }
        if let Some(needle) = self.search.as_deref().filter(|s| !s.is_empty()) {
            if !order.matches_search(needle) {
                return false;
            }
        }
        true
    }
}

/// Repository for order operations.
#[derive(Debug, Clone, Default)]
pub struct OrderRepository {
    orders: Arc<RwLock<Vec<Order>>>,
}

impl OrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a new order.
    pub async fn place(&self, order: Order) -> StoreResult<Order> {
        let mut orders = self.orders.write().await;
        if orders.iter().any(|o| o.id == order.id) {
            return Err(StoreError::duplicate("id", order.id));
        }

        info!(
            id = %order.id,
            order_number = %order.order_number,
            total = %order.pricing.total,
            "Order placed"
        );
        orders.push(order.clone());
        Ok(order)
    }

    /// Gets an order by its UUID or its `ORD-` number.
    pub async fn get(&self, id: &str) -> StoreResult<Order> {
        self.orders
            .read()
            .await
            .iter()
            .find(|o| o.id == id || o.order_number == id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("Order", id))
    }

    /// Lists orders matching `filter`, newest first.
    pub async fn list(&self, filter: &OrderFilter) -> StoreResult<Vec<Order>> {
        let search = filter
            .search
            .as_deref()
            .map(validate_search_query)
            .transpose()?;
        let filter = OrderFilter {
            search,
            ..filter.clone()
        };

        let orders = self.orders.read().await;
        let mut matching: Vec<Order> = orders
            .iter()
            .rev()
            .filter(|o| filter.matches(o))
            .cloned()
            .collect();
        drop(orders);

        // stable: same-instant orders stay latest-inserted first
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        debug!(count = matching.len(), "Listing orders");
        Ok(matching)
    }

    /// Moves an order to `status` if the workflow allows it.
    pub async fn update_status(&self, id: &str, status: OrderStatus) -> StoreResult<Order> {
        let mut orders = self.orders.write().await;
        let order = orders
            .iter_mut()
            .find(|o| o.id == id || o.order_number == id)
            .ok_or_else(|| StoreError::not_found("Order", id))?;

        order.status = order.status.transition_to(status)?;
        order.updated_at = Some(Utc::now());

        info!(id = %order.id, status = %order.status, "Order status changed");
        Ok(order.clone())
    }

    pub async fn count(&self) -> usize {
        self.orders.read().await.len()
    }

    /// Order count, revenue and average order value.
    pub async fn summary(&self) -> StoreResult<OrderSummary> {
        let orders = self.orders.read().await;
        Ok(OrderSummary::from_totals(
            orders.iter().map(|o| o.pricing.total),
        )?)
    }
}
