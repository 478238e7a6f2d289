//! # Checkout Module
//!
//! Wires the estimator, fee policy and calculator together the same way for
//! the cart quote and for order placement, so the two can never disagree.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  customer coordinate? ──► DeliveryEstimator ──► DeliveryEstimate?      │
//! │                                                        │                │
//! │  lines ──► subtotal ──────────────► DeliveryFeePolicy ◄┘                │
//! │                                            │ fee                        │
//! │                                            ▼                            │
//! │                              OrderPricingCalculator                     │
//! │                                            │                            │
//! │                    ┌───────────────────────┴──────────────┐            │
//! │                    ▼                                      ▼            │
//! │                  Quote                          Order (build_order)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::delivery::{DeliveryEstimate, DeliveryEstimator};
use crate::error::CoreResult;
use crate::geo::Coordinate;
use crate::money::Money;
use crate::pricing::{CartLineItem, DeliveryFeePolicy, OrderPricingCalculator, PricingBreakdown};
use crate::types::{CustomerInfo, DeliveryLocation, Order, OrderItem, OrderStatus, PaymentMethod};
use crate::validation::{
    validate_customer_name, validate_email, validate_line_count, validate_payment_method,
    validate_phone, validate_quantity, validate_required_text, validate_special_instructions,
};

/// Delivery window assumed when the order has no location.
pub const DEFAULT_DELIVERY_WINDOW_HOURS: i64 = 24;

// =============================================================================
// Requests
// =============================================================================

/// One requested line: which product and how many. Prices come from the
/// catalog, never from the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    #[serde(alias = "id")]
    pub product_id: String,
    pub quantity: u32,
}

/// Order submission payload.
///
/// Unknown fields (such as the client's own totals) are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub customer: CustomerInfo,
    pub items: Vec<OrderLine>,
    #[serde(default)]
    pub location: Option<DeliveryLocation>,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub special_instructions: Option<String>,
}

impl OrderRequest {
    /// Checks everything that can be checked without the catalog.
    pub fn validate(&self) -> CoreResult<()> {
        validate_customer_name(&self.customer.name)?;
        validate_phone(&self.customer.phone)?;
        if let Some(email) = self.customer.email.as_deref().filter(|e| !e.trim().is_empty()) {
            validate_email(email)?;
        }

        validate_line_count(self.items.len())?;
        for line in &self.items {
            validate_required_text("items.productId", &line.product_id, 100)?;
            validate_quantity(line.quantity)?;
        }

        validate_payment_method(self.payment_method)?;

        if let Some(location) = &self.location {
            location.coordinates.validate()?;
        }
        if let Some(text) = &self.special_instructions {
            validate_special_instructions(text)?;
        }
        Ok(())
    }
}

// =============================================================================
// Quote
// =============================================================================

/// What the cart and checkout screens display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    #[serde(flatten)]
    pub breakdown: PricingBreakdown,
    pub free_shipping: bool,
    pub amount_until_free_shipping: Money,
    /// Present when a customer location was given.
    pub delivery: Option<DeliveryEstimate>,
}

// =============================================================================
// Checkout Pricing
// =============================================================================

/// The pricing pipeline for one store.
#[derive(Debug, Clone, Copy)]
pub struct CheckoutPricing {
    store: Coordinate,
    policy: DeliveryFeePolicy,
    calculator: OrderPricingCalculator,
    estimator: DeliveryEstimator,
}

impl CheckoutPricing {
    pub fn new(store: Coordinate, policy: DeliveryFeePolicy) -> Self {
        CheckoutPricing {
            store,
            policy,
            calculator: OrderPricingCalculator::new(),
            estimator: DeliveryEstimator::new(),
        }
    }

    pub fn with_calculator(mut self, calculator: OrderPricingCalculator) -> Self {
        self.calculator = calculator;
        self
    }

    pub fn store(&self) -> Coordinate {
        self.store
    }

    pub fn policy(&self) -> &DeliveryFeePolicy {
        &self.policy
    }

    /// Estimate for a customer coordinate, `None` without one.
    pub fn estimate(&self, customer: Option<Coordinate>) -> CoreResult<Option<DeliveryEstimate>> {
        customer
            .map(|c| self.estimator.estimate(self.store, c))
            .transpose()
    }

    /// Prices a cart.
    ///
    /// ## Example
    /// ```rust
    /// use pasal_core::checkout::CheckoutPricing;
    /// use pasal_core::{CartLineItem, Coordinate, DeliveryFeePolicy, Money};
    ///
    /// let store = Coordinate::new(27.8742, 83.4534).unwrap();
    /// let pricing = CheckoutPricing::new(store, DeliveryFeePolicy::default());
    ///
    /// let items = [CartLineItem::new("rice", Money::from_rupees(180), 2)];
    /// let quote = pricing.quote(&items, Some(store)).unwrap();
    /// assert_eq!(quote.breakdown.delivery_fee, Money::from_rupees(50));
    /// assert_eq!(quote.amount_until_free_shipping, Money::from_rupees(1640));
    /// ```
    pub fn quote(&self, items: &[CartLineItem], customer: Option<Coordinate>) -> CoreResult<Quote> {
        let delivery = self.estimate(customer)?;
        let breakdown = self.breakdown(items, delivery.as_ref())?;

        Ok(Quote {
            free_shipping: self.policy.qualifies_for_free_shipping(breakdown.subtotal),
            amount_until_free_shipping: self.policy.amount_until_free_shipping(breakdown.subtotal),
            breakdown,
            delivery,
        })
    }

    fn breakdown(
        &self,
        items: &[CartLineItem],
        delivery: Option<&DeliveryEstimate>,
    ) -> CoreResult<PricingBreakdown> {
        let subtotal = self.calculator.subtotal(items)?;
        let fee = self.policy.resolve(subtotal, delivery);
        self.calculator.compute_breakdown(items, fee)
    }

    /// Builds a pending order from a validated request and catalog snapshots.
    ///
    /// `items` must be the snapshots for `request.items`, in any order.
    pub fn build_order(
        &self,
        id: String,
        request: OrderRequest,
        items: Vec<OrderItem>,
        now: DateTime<Utc>,
    ) -> CoreResult<Order> {
        let delivery = self.estimate(request.location.as_ref().map(|l| l.coordinates))?;
        let lines: Vec<CartLineItem> = items.iter().map(OrderItem::line_item).collect();
        let pricing = self.breakdown(&lines, delivery.as_ref())?;

        let window = delivery
            .as_ref()
            .map(|d| d.band.window())
            .unwrap_or_else(|| Duration::hours(DEFAULT_DELIVERY_WINDOW_HOURS));

        Ok(Order {
            id,
            order_number: Order::order_number_for(now),
            customer: request.customer,
            items,
            location: request.location,
            delivery,
            payment_method: request.payment_method,
            pricing,
            status: OrderStatus::Pending,
            special_instructions: request
                .special_instructions
                .filter(|s| !s.trim().is_empty()),
            created_at: now,
            updated_at: None,
            estimated_delivery: now + window,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
