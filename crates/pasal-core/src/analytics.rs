//! # Analytics Module
//!
//! Figures for the admin dashboard, computed from the current orders and
//! catalog.
//!
//! ```text
//! orders  ──► OrderSummary      { totalOrders, totalRevenue, averageOrderValue }
//! catalog ──► InventorySummary  { totalProducts, topCategories, lowStockProducts }
//!                    └──────────┬──────────┘
//!                               ▼
//!                         StoreAnalytics
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::Category;
use crate::LOW_STOCK_THRESHOLD;

/// Order count and revenue. Every stored order counts, whatever its status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    #[ts(type = "number")]
    pub total_orders: usize,
    pub total_revenue: Money,
    /// Revenue per order, rounded to paisa. Zero with no orders.
    pub average_order_value: Money,
}

impl OrderSummary {
    /// Summarizes order totals.
    pub fn from_totals(totals: impl IntoIterator<Item = Money>) -> CoreResult<Self> {
        let mut total_orders = 0usize;
        let mut total_revenue = Money::zero();
        for total in totals {
            total_orders += 1;
            total_revenue = total_revenue
                .checked_add(total)
                .ok_or(CoreError::AmountOverflow { operation: "revenue" })?;
        }

        let average_order_value = total_revenue
            .checked_split(total_orders)
            .map(|avg| avg.rounded())
            .unwrap_or_default();

        Ok(OrderSummary {
            total_orders,
            total_revenue,
            average_order_value,
        })
    }
}

/// Number of catalog products in one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CategoryCount {
    pub category: Category,
    #[ts(type = "number")]
    pub count: usize,
}

/// Catalog size, category spread and low-stock count.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct InventorySummary {
    #[ts(type = "number")]
    pub total_products: usize,
    /// Busiest category first; empty categories are left out.
    pub top_categories: Vec<CategoryCount>,
    /// Products with fewer than [`LOW_STOCK_THRESHOLD`] units.
    #[ts(type = "number")]
    pub low_stock_products: usize,
}

impl InventorySummary {
    /// Summarizes `(category, stock)` pairs, one per product.
    pub fn from_stock(products: impl IntoIterator<Item = (Category, u32)>) -> Self {
        let mut counts = [0usize; Category::ALL.len()];
        let mut total_products = 0;
        let mut low_stock_products = 0;

        for (category, stock) in products {
            total_products += 1;
            if stock < LOW_STOCK_THRESHOLD {
                low_stock_products += 1;
            }
            if let Some(slot) = Category::ALL.iter().position(|c| *c == category) {
                counts[slot] += 1;
            }
        }

        let mut top_categories: Vec<CategoryCount> = Category::ALL
            .iter()
            .zip(counts)
            .filter(|(_, count)| *count > 0)
            .map(|(category, count)| CategoryCount {
                category: *category,
                count,
            })
            .collect();
        // stable: ties keep catalog order
        top_categories.sort_by(|a, b| b.count.cmp(&a.count));

        InventorySummary {
            total_products,
            top_categories,
            low_stock_products,
        }
    }
}

/// Everything the admin dashboard shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StoreAnalytics {
    #[ts(type = "number")]
    pub total_products: usize,
    #[ts(type = "number")]
    pub total_orders: usize,
    pub total_revenue: Money,
    pub average_order_value: Money,
    pub top_categories: Vec<CategoryCount>,
    #[ts(type = "number")]
    pub low_stock_products: usize,
}

impl StoreAnalytics {
    pub fn new(orders: OrderSummary, inventory: InventorySummary) -> Self {
        StoreAnalytics {
            total_products: inventory.total_products,
            total_orders: orders.total_orders,
            total_revenue: orders.total_revenue,
            average_order_value: orders.average_order_value,
            top_categories: inventory.top_categories,
            low_stock_products: inventory.low_stock_products,
        }
    }
}
