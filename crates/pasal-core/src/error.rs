//! # Error Types
//!
//! Domain-specific error types for pasal-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  pasal-core errors (this file)                                         │
//! │  ├── CoreError        - Business rule violations                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  pasal-store errors (separate crate)                                   │
//! │  └── StoreError       - Lookup / persistence failures                  │
//! │                                                                         │
//! │  storefront-api errors (in app)                                        │
//! │  └── ApiError         - What the client sees (serialized)              │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StoreError → ApiError → Client    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! None of these are retried: the core performs no I/O, so every failure is
//! a caller-side data problem.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A latitude or longitude is out of range or not a finite number.
    ///
    /// ## When This Occurs
    /// - Device geolocation returned garbage
    /// - Manual entry typed longitude into the latitude box
    ///
    /// The caller should prompt the customer to re-enter the location.
    #[error("Invalid coordinate: {field} = {value} (must be finite and within ±{limit})")]
    InvalidCoordinate {
        field: &'static str,
        value: f64,
        limit: f64,
    },

    /// A cart line has a negative price or a zero quantity.
    ///
    /// This is a caller-side integrity bug, not a transient condition.
    #[error("Invalid line item {product_id}: {reason}")]
    InvalidLineItem { product_id: String, reason: String },

    /// Cart has exceeded maximum allowed lines.
    #[error("Cart cannot have more than {max} items")]
    CartTooLarge { max: usize },

    /// Line quantity exceeds maximum allowed.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: u32, max: u32 },

    /// The product is not in the cart.
    #[error("Product {0} not in cart")]
    ItemNotInCart(String),

    /// An amount left `Decimal` range while pricing.
    ///
    /// Unreachable for prices within [`crate::MAX_UNIT_PRICE`].
    #[error("Amount too large while computing {operation}")]
    AmountOverflow { operation: &'static str },

    /// Order status change not allowed by the fulfilment workflow.
    ///
    /// ## Workflow
    /// ```text
    /// pending ─► confirmed ─► preparing ─► shipped ─► delivered
    ///    │           │            │           │
    ///    └───────────┴────────────┴───────────┴──► cancelled
    /// ```
    #[error("Order cannot move from {from} to {to}")]
    InvalidStatusTransition { from: String, to: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Used for early validation of request payloads before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: String, max: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., phone number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
