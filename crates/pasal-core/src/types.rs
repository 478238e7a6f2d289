//! # Domain Types
//!
//! Core domain types used throughout the Pasal storefront.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │      Order      │   │   OrderItem     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id (UUID)      │   │  product_id     │       │
//! │  │  name / name_en │   │  order_number   │   │  name (frozen)  │       │
//! │  │  price          │   │  status         │   │  unit_price     │       │
//! │  │  category       │   │  pricing        │   │  quantity       │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    TaxRate      │   │  OrderStatus    │   │ PaymentMethod   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  bps (u32)      │   │  Pending …      │   │  Cash           │       │
//! │  │  1300 = 13%     │   │  Delivered      │   │  Esewa / Khalti │       │
//! │  └─────────────────┘   │  Cancelled      │   │  Bank (n/a)     │       │
//! │                        └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Orders carry both:
//! - `id`: UUID v4, immutable, used for lookups
//! - `order_number`: `ORD-<millis>`, what the customer reads out on the phone

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::delivery::DeliveryEstimate;
use crate::error::{CoreError, CoreResult};
use crate::geo::Coordinate;
use crate::money::Money;
use crate::pricing::{CartLineItem, PricingBreakdown};

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 1300 bps = 13% (Nepal VAT)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::from_bps(crate::TAX_RATE_BPS)
    }
}

// =============================================================================
// Category
// =============================================================================

/// Catalog category. Slugs match the storefront's URL filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Grocery,
    Cosmetics,
    DailyEssentials,
    BabyProducts,
    Household,
    Kitchen,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Grocery,
        Category::Cosmetics,
        Category::DailyEssentials,
        Category::BabyProducts,
        Category::Household,
        Category::Kitchen,
    ];

    /// URL slug, e.g. `daily-essentials`.
    pub const fn slug(&self) -> &'static str {
        match self {
            Category::Grocery => "grocery",
            Category::Cosmetics => "cosmetics",
            Category::DailyEssentials => "daily-essentials",
            Category::BabyProducts => "baby-products",
            Category::Household => "household",
            Category::Kitchen => "kitchen",
        }
    }

    /// Nepali display name.
    pub const fn label_ne(&self) -> &'static str {
        match self {
            Category::Grocery => "खाद्य सामग्री",
            Category::Cosmetics => "सौन्दर्य उत्पादन",
            Category::DailyEssentials => "दैनिक सामान",
            Category::BabyProducts => "बच्चाका सामान",
            Category::Household => "घरायसी सामान",
            Category::Kitchen => "भान्साका सामान",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product listed in the storefront catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,

    /// Display name in Nepali.
    pub name: String,

    /// English name, also searched.
    pub name_en: String,

    /// Current selling price.
    pub price: Money,

    /// Price before discount, if the product is on sale.
    pub original_price: Option<Money>,

    /// Image path or URL.
    pub image: String,

    pub description: String,

    pub category: Category,

    /// Shown as "in stock" on the storefront. Orders are refused when false.
    pub in_stock: bool,

    /// Units on hand.
    pub stock: u32,

    /// Pack size, free text ("1kg", "100ml").
    pub weight: Option<String>,

    pub brand: Option<String>,

    /// Whole percent off `original_price`. Derived, never client-set.
    pub discount: u32,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    #[ts(as = "Option<String>")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Builds a product from a validated [`NewProduct`].
    pub fn from_new(id: impl Into<String>, new: NewProduct, now: DateTime<Utc>) -> Self {
        let discount = discount_percent(new.price, new.original_price);
        Product {
            id: id.into(),
            name: new.name,
            name_en: new.name_en,
            price: new.price,
            original_price: new.original_price,
            image: new.image.unwrap_or_else(|| DEFAULT_PRODUCT_IMAGE.to_string()),
            description: new.description,
            category: new.category,
            in_stock: new.in_stock,
            stock: new.stock,
            weight: new.weight,
            brand: new.brand,
            discount,
            created_at: now,
            updated_at: None,
        }
    }

    /// Merges a partial update and re-derives `discount`.
    pub fn apply_update(&mut self, update: ProductUpdate, now: DateTime<Utc>) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(name_en) = update.name_en {
            self.name_en = name_en;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(original_price) = update.original_price {
            self.original_price = Some(original_price);
        }
        if let Some(image) = update.image {
            self.image = image;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(in_stock) = update.in_stock {
            self.in_stock = in_stock;
        }
        if let Some(stock) = update.stock {
            self.stock = stock;
        }
        if let Some(weight) = update.weight {
            self.weight = Some(weight);
        }
        if let Some(brand) = update.brand {
            self.brand = Some(brand);
        }
        self.discount = discount_percent(self.price, self.original_price);
        self.updated_at = Some(now);
    }

    /// Checks if `quantity` units can be ordered right now.
    pub fn can_sell(&self, quantity: u32) -> bool {
        self.in_stock && self.stock >= quantity
    }

    /// Cart line at the current price.
    pub fn line_item(&self, quantity: u32) -> CartLineItem {
        CartLineItem::new(self.id.clone(), self.price, quantity)
    }

    /// Case-insensitive substring match over both names and the description.
    pub fn matches_search(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.name.to_lowercase().contains(&needle)
            || self.name_en.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
    }
}

/// Placeholder image used when a product is created without one.
pub const DEFAULT_PRODUCT_IMAGE: &str = "nns.png?height=300&width=300";

/// Whole percent discount, rounded half up. Zero unless `original > price`.
///
/// ## Example
/// ```rust
/// use pasal_core::{discount_percent, Money};
///
/// let pct = discount_percent(Money::from_rupees(180), Some(Money::from_rupees(200)));
/// assert_eq!(pct, 10);
/// ```
pub fn discount_percent(price: Money, original: Option<Money>) -> u32 {
    let Some(original) = original else {
        return 0;
    };
    if original <= price || !original.is_positive() {
        return 0;
    }
    let pct = (original.amount() - price.amount()) / original.amount() * Decimal::ONE_HUNDRED;
    pct.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u32()
        .unwrap_or(0)
}

/// Payload for creating a product.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub name_en: String,
    pub price: Money,
    #[serde(default)]
    pub original_price: Option<Money>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub description: String,
    pub category: Category,
    #[serde(default = "default_true")]
    pub in_stock: bool,
    #[serde(default)]
    pub stock: u32,
    #[serde(default)]
    pub weight: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
}

fn default_true() -> bool {
    true
}

/// Partial update for a product. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub name_en: Option<String>,
    pub price: Option<Money>,
    pub original_price: Option<Money>,
    pub image: Option<String>,
    pub description: Option<String>,
    pub category: Option<Category>,
    pub in_stock: Option<bool>,
    pub stock: Option<u32>,
    pub weight: Option<String>,
    pub brand: Option<String>,
}

// =============================================================================
// Order Status
// =============================================================================

/// Fulfilment state of an order.
///
/// ```text
/// pending ─► confirmed ─► preparing ─► shipped ─► delivered
///    │           │            │           │
///    └───────────┴────────────┴───────────┴──► cancelled
/// ```
/// Forward skips are allowed (a walk-in pickup goes straight to delivered);
/// going backwards or leaving a terminal state is not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Preparing,
    Shipped,
    Delivered,
    Cancelled,
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Pending
    }
}

impl OrderStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Nepali label shown on the order tracking page.
    pub const fn label_ne(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "पेन्डिङ",
            OrderStatus::Confirmed => "पुष्टि भयो",
            OrderStatus::Preparing => "तयारी गर्दै",
            OrderStatus::Shipped => "पठाइयो",
            OrderStatus::Delivered => "पुर्याइयो",
            OrderStatus::Cancelled => "रद्द गरियो",
        }
    }

    pub const fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// Position along the happy path; `None` for cancelled.
    const fn stage(&self) -> Option<u8> {
        match self {
            OrderStatus::Pending => Some(0),
            OrderStatus::Confirmed => Some(1),
            OrderStatus::Preparing => Some(2),
            OrderStatus::Shipped => Some(3),
            OrderStatus::Delivered => Some(4),
            OrderStatus::Cancelled => None,
        }
    }

    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        if self.is_terminal() {
            return false;
        }
        match (self.stage(), next.stage()) {
            (_, None) => true,
            (Some(from), Some(to)) => to > from,
            (None, _) => false,
        }
    }

    /// Returns `next` if the move is allowed.
    pub fn transition_to(&self, next: OrderStatus) -> CoreResult<OrderStatus> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(CoreError::InvalidStatusTransition {
                from: self.to_string(),
                to: next.to_string(),
            })
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Payment Method
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Cash on delivery.
    Cash,
    /// eSewa wallet.
    Esewa,
    /// Khalti wallet.
    Khalti,
    /// Bank transfer. Listed on the checkout page but not yet offered.
    Bank,
}

impl Default for PaymentMethod {
    fn default() -> Self {
        PaymentMethod::Cash
    }
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::Cash,
        PaymentMethod::Esewa,
        PaymentMethod::Khalti,
        PaymentMethod::Bank,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Esewa => "esewa",
            PaymentMethod::Khalti => "khalti",
            PaymentMethod::Bank => "bank",
        }
    }

    /// Whether new orders may use this method.
    pub const fn is_available(&self) -> bool {
        !matches!(self, PaymentMethod::Bank)
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Order
// =============================================================================

/// Who placed the order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInfo {
    /// Account id when the customer is logged in.
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Where the order goes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryLocation {
    pub coordinates: Coordinate,
    /// Set when the customer typed an address and `coordinates` is the
    /// service-area fallback rather than a GPS fix.
    #[serde(default)]
    pub is_manual: bool,
    /// Free-text address from manual entry.
    #[serde(default)]
    pub address: Option<String>,
}

/// A line in a placed order.
/// Uses snapshot pattern to freeze product data at time of order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: String,
    /// Nepali name at time of order (frozen).
    pub name: String,
    /// English name at time of order (frozen).
    pub name_en: String,
    /// Unit price at time of order (frozen).
    pub unit_price: Money,
    pub quantity: u32,
    pub line_total: Money,
}

impl OrderItem {
    /// Freezes `product` at its current price.
    pub fn snapshot(product: &Product, quantity: u32) -> Self {
        OrderItem {
            product_id: product.id.clone(),
            name: product.name.clone(),
            name_en: product.name_en.clone(),
            unit_price: product.price,
            quantity,
            line_total: product.price.multiply_quantity(quantity),
        }
    }

    pub fn line_item(&self) -> CartLineItem {
        CartLineItem::new(self.product_id.clone(), self.unit_price, self.quantity)
    }
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Unique identifier (UUID v4).
    pub id: String,
    /// Human-readable number, `ORD-<unix millis>`.
    pub order_number: String,
    pub customer: CustomerInfo,
    pub items: Vec<OrderItem>,
    pub location: Option<DeliveryLocation>,
    /// Estimate the fee was computed from; absent without a location.
    pub delivery: Option<DeliveryEstimate>,
    pub payment_method: PaymentMethod,
    /// Server-computed totals.
    pub pricing: PricingBreakdown,
    pub status: OrderStatus,
    pub special_instructions: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "Option<String>")]
    pub updated_at: Option<DateTime<Utc>>,
    #[ts(as = "String")]
    pub estimated_delivery: DateTime<Utc>,
}

impl Order {
    /// `ORD-<unix millis>` for the given timestamp.
    pub fn order_number_for(created_at: DateTime<Utc>) -> String {
        format!("ORD-{}", created_at.timestamp_millis())
    }

    /// Sum of item quantities.
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Case-insensitive match on id, order number, customer name and typed
    /// address. Phone digits match as typed.
    pub fn matches_search(&self, needle: &str) -> bool {
        let lower = needle.to_lowercase();
        let address = self.location.as_ref().and_then(|l| l.address.as_deref());
        self.id.to_lowercase().contains(&lower)
            || self.order_number.to_lowercase().contains(&lower)
            || self.customer.name.to_lowercase().contains(&lower)
            || self.customer.phone.contains(needle)
            || address.is_some_and(|a| a.to_lowercase().contains(&lower))
    }
}

// =============================================================================
// Store Location
// =============================================================================

/// Opening hours as displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StoreHours {
    pub weekdays: String,
    pub weekends: String,
}

/// The physical shop deliveries start from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StoreLocation {
    pub name: String,
    pub address: String,
    pub coordinates: Coordinate,
    pub phone: String,
    pub hours: StoreHours,
}

impl Default for StoreLocation {
    fn default() -> Self {
        StoreLocation {
            name: "नबिन निर्मल स्टोर".to_string(),
            address: "रामपुर-६, तालपोखरा, पाल्पा, नेपाल".to_string(),
            coordinates: Coordinate {
                latitude: 27.8742,
                longitude: 83.4534,
            },
            phone: "+977-9876543210".to_string(),
            hours: StoreHours {
                weekdays: "बिहान ६:०० - बेलुका ९:००".to_string(),
                weekends: "बिहान ७:०० - बेलुका ८:००".to_string(),
            },
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
