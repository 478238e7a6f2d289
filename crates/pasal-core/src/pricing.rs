//! # Pricing Module
//!
//! Turns cart lines and a delivery fee into the numbers shown on the cart
//! and checkout screens.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  [CartLineItem] ──► Σ price × qty ──► subtotal ─┬──► VAT (13%)         │
//! │                                                  │                      │
//! │  DeliveryEstimate? ──► DeliveryFeePolicy ◄───────┘                      │
//! │                              │                                          │
//! │                              ▼                                          │
//! │               total = subtotal + deliveryFee + VAT                      │
//! │                                                                         │
//! │  Nothing is rounded here. Display code calls Money::rounded().          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::delivery::DeliveryEstimate;
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::TaxRate;
use crate::{FALLBACK_DELIVERY_FEE, FREE_SHIPPING_THRESHOLD, MAX_UNIT_PRICE, TAX_RATE_BPS};

// =============================================================================
// Cart Line Item
// =============================================================================

/// One product line in a cart: unit price × quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    pub product_id: String,
    pub unit_price: Money,
    pub quantity: u32,
}

impl CartLineItem {
    pub fn new(product_id: impl Into<String>, unit_price: Money, quantity: u32) -> Self {
        CartLineItem {
            product_id: product_id.into(),
            unit_price,
            quantity,
        }
    }

    /// Unit price × quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }

    /// [`line_total`](Self::line_total) without the overflow panic.
    pub fn checked_line_total(&self) -> CoreResult<Money> {
        self.unit_price
            .checked_multiply_quantity(self.quantity)
            .ok_or(CoreError::AmountOverflow {
                operation: "line total",
            })
    }

    /// Rejects negative or oversized prices and zero quantities.
    pub fn validate(&self) -> CoreResult<()> {
        if self.unit_price.is_negative() {
            return Err(CoreError::InvalidLineItem {
                product_id: self.product_id.clone(),
                reason: format!("unit price {} is negative", self.unit_price.amount()),
            });
        }
        if self.unit_price > MAX_UNIT_PRICE {
            return Err(CoreError::InvalidLineItem {
                product_id: self.product_id.clone(),
                reason: format!(
                    "unit price {} exceeds {}",
                    self.unit_price.amount(),
                    MAX_UNIT_PRICE.amount()
                ),
            });
        }
        if self.quantity < 1 {
            return Err(CoreError::InvalidLineItem {
                product_id: self.product_id.clone(),
                reason: "quantity must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

// =============================================================================
// Pricing Breakdown
// =============================================================================

/// Subtotal, delivery fee, VAT and total for one cart/checkout.
///
/// All four amounts are exact; `total == subtotal + delivery_fee + tax_amount`
/// holds with no rounding slack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PricingBreakdown {
    pub subtotal: Money,
    pub delivery_fee: Money,
    pub tax_amount: Money,
    pub total: Money,
}

impl PricingBreakdown {
    /// Same breakdown with every amount rounded to 2 decimals.
    ///
    /// The rounded total may differ from the sum of the rounded parts by a
    /// paisa; it is rounded from the exact total, not re-added.
    pub fn rounded(&self) -> PricingBreakdown {
        PricingBreakdown {
            subtotal: self.subtotal.rounded(),
            delivery_fee: self.delivery_fee.rounded(),
            tax_amount: self.tax_amount.rounded(),
            total: self.total.rounded(),
        }
    }
}

// =============================================================================
// Calculator
// =============================================================================

/// Computes a [`PricingBreakdown`]. Stateless; holds only the tax rate.
#[derive(Debug, Clone, Copy)]
pub struct OrderPricingCalculator {
    tax_rate: TaxRate,
}

impl Default for OrderPricingCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderPricingCalculator {
    /// Calculator using Nepal VAT (13%).
    pub const fn new() -> Self {
        OrderPricingCalculator {
            tax_rate: TaxRate::from_bps(TAX_RATE_BPS),
        }
    }

    /// Calculator with a custom tax rate.
    pub const fn with_tax_rate(tax_rate: TaxRate) -> Self {
        OrderPricingCalculator { tax_rate }
    }

    pub const fn tax_rate(&self) -> TaxRate {
        self.tax_rate
    }

    /// Computes subtotal, tax and total.
    ///
    /// `items` may be empty; blocking checkout on an empty cart is the
    /// caller's job. The free-shipping rule is NOT applied here: pass the fee
    /// [`DeliveryFeePolicy::resolve`] returned.
    ///
    /// ## Example
    /// ```rust
    /// use pasal_core::{CartLineItem, Money, OrderPricingCalculator};
    ///
    /// let items = vec![
    ///     CartLineItem::new("rice", Money::from_rupees(180), 2),
    ///     CartLineItem::new("masala", Money::from_rupees(85), 1),
    /// ];
    /// let b = OrderPricingCalculator::new()
    ///     .compute_breakdown(&items, Money::from_rupees(100))
    ///     .unwrap();
    /// assert_eq!(b.subtotal, Money::from_rupees(445));
    /// assert_eq!(b.tax_amount, Money::from_paisa(5785));
    /// assert_eq!(b.total, Money::from_paisa(60285));
    /// ```
    pub fn compute_breakdown(
        &self,
        items: &[CartLineItem],
        delivery_fee: Money,
    ) -> CoreResult<PricingBreakdown> {
        if delivery_fee.is_negative() {
            return Err(ValidationError::OutOfRange {
                field: "deliveryFee".to_string(),
                min: "0".to_string(),
                max: "unbounded".to_string(),
            }
            .into());
        }

        let subtotal = self.subtotal(items)?;
        let tax_amount = subtotal
            .checked_calculate_tax(self.tax_rate)
            .ok_or(CoreError::AmountOverflow { operation: "tax" })?;
        let total = subtotal
            .checked_add(delivery_fee)
            .and_then(|t| t.checked_add(tax_amount))
            .ok_or(CoreError::AmountOverflow { operation: "total" })?;

        Ok(PricingBreakdown {
            subtotal,
            delivery_fee,
            tax_amount,
            total,
        })
    }

    /// Validates every line and sums the line totals.
    pub fn subtotal(&self, items: &[CartLineItem]) -> CoreResult<Money> {
        items.iter().try_fold(Money::zero(), |acc, item| {
            item.validate()?;
            acc.checked_add(item.checked_line_total()?)
                .ok_or(CoreError::AmountOverflow {
                    operation: "subtotal",
                })
        })
    }
}

// =============================================================================
// Delivery Fee Policy
// =============================================================================

/// Decides which delivery fee a cart pays.
///
/// ## Rule (same for cart page, quote and order placement)
/// ```text
/// subtotal > threshold ?  ──yes──►  0
///        │ no
///        ▼
/// location estimate ?     ──yes──►  estimate.fee (distance band)
///        │ no
///        ▼
///   fallback fee (flat)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryFeePolicy {
    pub free_shipping_threshold: Money,
    pub fallback_fee: Money,
}

impl Default for DeliveryFeePolicy {
    fn default() -> Self {
        DeliveryFeePolicy {
            free_shipping_threshold: FREE_SHIPPING_THRESHOLD,
            fallback_fee: FALLBACK_DELIVERY_FEE,
        }
    }
}

impl DeliveryFeePolicy {
    pub fn new(free_shipping_threshold: Money, fallback_fee: Money) -> Self {
        DeliveryFeePolicy {
            free_shipping_threshold,
            fallback_fee,
        }
    }

    /// Delivery is free strictly above the threshold.
    #[inline]
    pub fn qualifies_for_free_shipping(&self, subtotal: Money) -> bool {
        subtotal > self.free_shipping_threshold
    }

    /// Fee to charge for this subtotal and (optional) location estimate.
    pub fn resolve(&self, subtotal: Money, estimate: Option<&DeliveryEstimate>) -> Money {
        if self.qualifies_for_free_shipping(subtotal) {
            return Money::zero();
        }
        estimate.map_or(self.fallback_fee, |e| e.fee)
    }

    /// How much more the customer must add to reach the threshold.
    ///
    /// Zero once the threshold is reached. At exactly the threshold this is
    /// zero even though delivery is not yet free; the cart hint hides itself
    /// there, matching the storefront's "add Rs. X more" banner.
    pub fn amount_until_free_shipping(&self, subtotal: Money) -> Money {
        (self.free_shipping_threshold - subtotal).clamp_non_negative()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delivery::DeliveryBand;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn item(id: &str, rupees: i64, qty: u32) -> CartLineItem {
        CartLineItem::new(id, Money::from_rupees(rupees), qty)
    }

    #[test]
    fn test_breakdown_matches_checkout_example() {
        let items = vec![item("rice", 180, 2), item("masala", 85, 1)];
        let b = OrderPricingCalculator::new()
            .compute_breakdown(&items, Money::from_rupees(100))
            .unwrap();

        assert_eq!(b.subtotal.amount(), dec!(445));
        assert_eq!(b.tax_amount.amount(), dec!(57.85));
        assert_eq!(b.total.amount(), dec!(602.85));
        assert_eq!(b.delivery_fee, Money::from_rupees(100));
    }

    #[test]
    fn test_empty_cart() {
        let b = OrderPricingCalculator::new()
            .compute_breakdown(&[], Money::zero())
            .unwrap();
        assert_eq!(b, PricingBreakdown::default());
    }

    #[test]
    fn test_rejects_bad_lines() {
        let calc = OrderPricingCalculator::new();

        let err = calc
            .compute_breakdown(&[item("p1", 10, 0)], Money::zero())
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidLineItem { ref product_id, .. } if product_id == "p1"));

        let err = calc
            .compute_breakdown(&[item("p2", -1, 1)], Money::zero())
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidLineItem { .. }));
    }

    #[test]
    fn test_rejects_price_above_cap() {
        let calc = OrderPricingCalculator::new();

        let over = CartLineItem::new("gold", Money::from_decimal(dec!(100000000000000000000000000)), 1);
        let err = calc.compute_breakdown(&[over], Money::zero()).unwrap_err();
        assert!(matches!(err, CoreError::InvalidLineItem { ref product_id, .. } if product_id == "gold"));

        let at_cap = CartLineItem::new("gold", MAX_UNIT_PRICE, crate::MAX_ITEM_QUANTITY);
        let b = calc.compute_breakdown(&[at_cap], Money::zero()).unwrap();
        assert_eq!(b.subtotal.amount(), dec!(9990000000));
    }

    #[test]
    fn test_negative_price_message_is_exact() {
        let err = CartLineItem::new("p", Money::from_decimal(dec!(-0.001)), 1)
            .validate()
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid line item p: unit price -0.001 is negative");
    }

    #[test]
    fn test_fee_overflow_is_an_error() {
        let fee = Money::from_decimal(rust_decimal::Decimal::MAX);
        let err = OrderPricingCalculator::new()
            .compute_breakdown(&[item("p", 100, 1)], fee)
            .unwrap_err();
        assert!(matches!(err, CoreError::AmountOverflow { operation: "total" }));
    }

    #[test]
    fn test_rejects_negative_fee() {
        let err = OrderPricingCalculator::new()
            .compute_breakdown(&[item("p1", 10, 1)], Money::from_rupees(-5))
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn test_tax_stays_unrounded() {
        // 3 × 33.33 = 99.99, VAT 12.9987
        let items = vec![CartLineItem::new("p", Money::from_paisa(3333), 3)];
        let b = OrderPricingCalculator::new()
            .compute_breakdown(&items, Money::zero())
            .unwrap();
        assert_eq!(b.tax_amount.amount(), dec!(12.9987));
        assert_eq!(b.total.amount(), dec!(112.9887));
        assert_eq!(b.rounded().total.amount(), dec!(112.99));
    }

    #[test]
    fn test_custom_tax_rate() {
        let calc = OrderPricingCalculator::with_tax_rate(TaxRate::zero());
        let b = calc
            .compute_breakdown(&[item("p", 100, 1)], Money::from_rupees(50))
            .unwrap();
        assert_eq!(b.total, Money::from_rupees(150));
    }

    #[test]
    fn test_policy_free_shipping_wins() {
        let policy = DeliveryFeePolicy::default();
        let far = DeliveryEstimate::from_distance(80.0);

        assert_eq!(policy.resolve(Money::from_rupees(2001), Some(&far)), Money::zero());
        assert_eq!(policy.resolve(Money::from_rupees(2001), None), Money::zero());
    }

    #[test]
    fn test_policy_threshold_is_strict() {
        let policy = DeliveryFeePolicy::default();
        assert!(!policy.qualifies_for_free_shipping(Money::from_rupees(2000)));
        assert_eq!(policy.resolve(Money::from_rupees(2000), None), Money::from_rupees(100));
        assert!(policy.qualifies_for_free_shipping(Money::from_paisa(200001)));
    }

    #[test]
    fn test_policy_uses_band_then_fallback() {
        let policy = DeliveryFeePolicy::default();
        let near = DeliveryEstimate::from_distance(3.0);
        let district = DeliveryEstimate::from_distance(20.0);

        assert_eq!(policy.resolve(Money::from_rupees(500), Some(&near)), Money::from_rupees(50));
        assert_eq!(district.band, DeliveryBand::District);
        assert_eq!(policy.resolve(Money::from_rupees(500), Some(&district)), Money::from_rupees(200));
        assert_eq!(policy.resolve(Money::from_rupees(500), None), Money::from_rupees(100));
    }

    #[test]
    fn test_amount_until_free_shipping() {
        let policy = DeliveryFeePolicy::default();
        assert_eq!(policy.amount_until_free_shipping(Money::from_rupees(445)), Money::from_rupees(1555));
        assert_eq!(policy.amount_until_free_shipping(Money::from_rupees(2000)), Money::zero());
        assert_eq!(policy.amount_until_free_shipping(Money::from_rupees(5000)), Money::zero());
    }

    fn line() -> impl Strategy<Value = CartLineItem> {
        (0i64..1_000_000, 1u32..=999).prop_map(|(paisa, qty)| CartLineItem::new("p", Money::from_paisa(paisa), qty))
    }

    proptest! {
        #[test]
        fn totals_never_undercut_parts(items in prop::collection::vec(line(), 0..20), fee in 0i64..100_000) {
            let fee = Money::from_paisa(fee);
            let b = OrderPricingCalculator::new().compute_breakdown(&items, fee).unwrap();
            prop_assert!(!b.subtotal.is_negative());
            prop_assert!(!b.tax_amount.is_negative());
            prop_assert!(b.total >= b.subtotal + b.delivery_fee);
            prop_assert_eq!(b.total, b.subtotal + b.delivery_fee + b.tax_amount);
        }

        #[test]
        fn breakdown_is_idempotent(items in prop::collection::vec(line(), 0..20)) {
            let calc = OrderPricingCalculator::new();
            let first = calc.compute_breakdown(&items, Money::from_rupees(100)).unwrap();
            let second = calc.compute_breakdown(&items, Money::from_rupees(100)).unwrap();
            prop_assert_eq!(first, second);
        }
    }
}
