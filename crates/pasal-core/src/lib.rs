//! # pasal-core: Pure Business Logic for the Pasal storefront
//!
//! This crate holds the deterministic rules of the storefront: how far a
//! customer is from the store, what delivery costs, and what an order adds
//! up to. Nothing in here performs I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Pasal Architecture                               │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Storefront client (Next.js)                     │   │
//! │  │    Products ──► Cart ──► Location ──► Checkout ──► Order       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ JSON over HTTP                         │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    storefront-api (axum)                        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ pasal-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │    geo    │  │ delivery  │  │  pricing  │  │   cart    │  │   │
//! │  │   │Coordinate │  │ Estimator │  │Calculator │  │  Cart     │  │   │
//! │  │   │ Haversine │  │  Bands    │  │FeePolicy  │  │ LineItem  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO SHARED STATE • PURE FUNCTIONS                    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              pasal-store (in-memory repositories)               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Decimal rupee amounts, rounded only for display
//! - [`geo`] - Coordinates and great-circle distance
//! - [`delivery`] - Distance bands → delivery fee and time estimate
//! - [`pricing`] - Subtotal, VAT, totals, free-shipping policy
//! - [`cart`] - Cart session mutations
//! - [`checkout`] - Quote and order pricing pipeline
//! - [`analytics`] - Admin dashboard figures
//! - [`types`] - Domain types (Product, Order, statuses)
//! - [`validation`] - Business rule validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use pasal_core::{Coordinate, DeliveryEstimator, Money, OrderPricingCalculator, CartLineItem};
//!
//! let store = Coordinate::new(27.8742, 83.4534).unwrap();
//! let estimate = DeliveryEstimator::new().estimate(store, store).unwrap();
//! assert_eq!(estimate.fee, Money::from_rupees(50));
//!
//! let items = vec![CartLineItem::new("rice", Money::from_rupees(180), 2)];
//! let breakdown = OrderPricingCalculator::new()
//!     .compute_breakdown(&items, estimate.fee)
//!     .unwrap();
//! assert_eq!(breakdown.total.to_string(), "Rs. 456.80");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod analytics;
pub mod cart;
pub mod checkout;
pub mod delivery;
pub mod error;
pub mod geo;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use analytics::{CategoryCount, InventorySummary, OrderSummary, StoreAnalytics};
pub use cart::Cart;
pub use checkout::{CheckoutPricing, OrderLine, OrderRequest, Quote};
pub use delivery::{DeliveryBand, DeliveryEstimate, DeliveryEstimator, Locale};
pub use error::{CoreError, CoreResult, ValidationError};
pub use geo::Coordinate;
pub use money::Money;
pub use pricing::{CartLineItem, DeliveryFeePolicy, OrderPricingCalculator, PricingBreakdown};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Nepal VAT in basis points (13%).
pub const TAX_RATE_BPS: u32 = 1300;

/// Label shown next to the tax line on cart and checkout.
pub const TAX_LABEL: &str = "13% VAT";

/// Prefix used when rendering rupee amounts.
pub const CURRENCY_PREFIX: &str = "Rs.";

/// Subtotal above which delivery is free (strictly greater than).
pub const FREE_SHIPPING_THRESHOLD: Money = Money::from_rupees(2000);

/// Delivery fee used when the customer's location is unknown.
pub const FALLBACK_DELIVERY_FEE: Money = Money::from_rupees(100);

/// Highest accepted unit price (one crore rupees).
///
/// With [`MAX_ITEM_QUANTITY`] and [`MAX_CART_ITEMS`] this keeps every cart
/// total far inside `Decimal` range.
pub const MAX_UNIT_PRICE: Money = Money::from_rupees(10_000_000);

/// Products with fewer units than this count as low stock.
pub const LOW_STOCK_THRESHOLD: u32 = 10;

/// Maximum distinct lines allowed in a single cart.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum quantity of a single line.
///
/// Guards against typing 1000 instead of 10.
pub const MAX_ITEM_QUANTITY: u32 = 999;
