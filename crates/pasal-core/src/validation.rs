//! # Validation Module
//!
//! Input validation utilities for the Pasal storefront.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Storefront client                                            │
//! │  ├── Required fields on the checkout form                              │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: storefront-api (Rust)                                        │
//! │  ├── Type validation (serde deserialization)                           │
//! │  └── THIS MODULE: Business rule validation                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: pasal-store                                                  │
//! │  ├── Existence checks (product / order ids)                            │
//! │  └── Stock checks at order placement                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use pasal_core::validation::{validate_phone, validate_quantity};
//!
//! validate_phone("+977-9876543210").unwrap();
//! validate_quantity(5).unwrap();
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{NewProduct, PaymentMethod, ProductUpdate};
use crate::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY, MAX_UNIT_PRICE};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest product name, in characters.
pub const MAX_NAME_LEN: usize = 200;

/// Longest free-text note on an order.
pub const MAX_INSTRUCTIONS_LEN: usize = 500;

const MAX_SEARCH_LEN: usize = 100;
const MIN_PHONE_DIGITS: usize = 7;
const MAX_PHONE_DIGITS: usize = 15;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a required, length-limited text field.
///
/// Length is counted in characters, not bytes: Devanagari names are three
/// bytes per character.
///
/// ## Example
/// ```rust
/// use pasal_core::validation::validate_required_text;
///
/// assert!(validate_required_text("name", "बासमती चामल", 200).is_ok());
/// assert!(validate_required_text("name", "   ", 200).is_err());
/// ```
pub fn validate_required_text(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

/// Validates a product name (Nepali or English).
pub fn validate_product_name(field: &str, name: &str) -> ValidationResult<()> {
    validate_required_text(field, name, MAX_NAME_LEN)
}

/// Validates the customer's name on an order.
pub fn validate_customer_name(name: &str) -> ValidationResult<()> {
    validate_required_text("customer.name", name, MAX_NAME_LEN)
}

/// Validates a phone number.
///
/// ## Rules
/// - Must not be empty
/// - Digits plus an optional leading `+`, spaces and hyphens
/// - 7 to 15 digits (E.164 upper bound)
///
/// ## Example
/// ```rust
/// use pasal_core::validation::validate_phone;
///
/// assert!(validate_phone("9812345678").is_ok());
/// assert!(validate_phone("+977-9876543210").is_ok());
/// assert!(validate_phone("call me").is_err());
/// ```
pub fn validate_phone(phone: &str) -> ValidationResult<()> {
    let phone = phone.trim();

    if phone.is_empty() {
        return Err(ValidationError::Required {
            field: "customer.phone".to_string(),
        });
    }

    let body = phone.strip_prefix('+').unwrap_or(phone);
    if !body
        .chars()
        .all(|c| c.is_ascii_digit() || c == '-' || c == ' ')
    {
        return Err(ValidationError::InvalidFormat {
            field: "customer.phone".to_string(),
            reason: "must contain only digits, spaces, hyphens and a leading +".to_string(),
        });
    }

    let digits = body.chars().filter(char::is_ascii_digit).count();
    if !(MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits) {
        return Err(ValidationError::InvalidFormat {
            field: "customer.phone".to_string(),
            reason: format!("must have {MIN_PHONE_DIGITS} to {MAX_PHONE_DIGITS} digits"),
        });
    }

    Ok(())
}

/// Validates an optional email address. Only the basic `local@domain` shape
/// is checked.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();
    let valid = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.') && !domain.starts_with('.'));

    if !valid {
        return Err(ValidationError::InvalidFormat {
            field: "customer.email".to_string(),
            reason: "must look like name@example.com".to_string(),
        });
    }

    Ok(())
}

/// Validates a search query.
///
/// ## Returns
/// The trimmed query string. Empty means "no filter".
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > MAX_SEARCH_LEN {
        return Err(ValidationError::TooLong {
            field: "search".to_string(),
            max: MAX_SEARCH_LEN,
        });
    }

    Ok(query.to_string())
}

/// Validates the free-text delivery note.
pub fn validate_special_instructions(text: &str) -> ValidationResult<()> {
    if text.chars().count() > MAX_INSTRUCTIONS_LEN {
        return Err(ValidationError::TooLong {
            field: "specialInstructions".to_string(),
            max: MAX_INSTRUCTIONS_LEN,
        });
    }
    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity value.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (999)
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Product page: "Add to cart"                                           │
/// │                                                                         │
/// │  Customer picks quantity: 5                                            │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_quantity(5) ← THIS FUNCTION                                  │
/// │       │                                                                 │
/// │       ├── qty == 0? → Error: "quantity must be positive"               │
/// │       │                                                                 │
/// │       ├── qty > 999? → Error: "quantity must be between 1 and 999"     │
/// │       │                                                                 │
/// │       └── OK → Proceed with add_item                                   │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_quantity(qty: u32) -> ValidationResult<()> {
    if qty == 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: "1".to_string(),
            max: MAX_ITEM_QUANTITY.to_string(),
        });
    }

    Ok(())
}

/// Validates a price.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free samples)
/// - Must not exceed MAX_UNIT_PRICE (Rs 1,00,00,000)
///
/// ## Example
/// ```rust
/// use pasal_core::{validation::validate_price, Money};
///
/// assert!(validate_price("price", Money::from_rupees(180)).is_ok());
/// assert!(validate_price("price", Money::zero()).is_ok());
/// assert!(validate_price("price", Money::from_rupees(-1)).is_err());
/// assert!(validate_price("price", Money::from_rupees(10_000_001)).is_err());
/// ```
pub fn validate_price(field: &str, price: Money) -> ValidationResult<()> {
    if price.is_negative() || price > MAX_UNIT_PRICE {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: "0".to_string(),
            max: MAX_UNIT_PRICE.amount().to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates the number of distinct lines in a cart or order.
///
/// ## Rules
/// - At least one line
/// - Must not exceed MAX_CART_ITEMS (100)
pub fn validate_line_count(lines: usize) -> ValidationResult<()> {
    if lines == 0 {
        return Err(ValidationError::Required {
            field: "items".to_string(),
        });
    }

    if lines > MAX_CART_ITEMS {
        return Err(ValidationError::OutOfRange {
            field: "items".to_string(),
            min: "1".to_string(),
            max: MAX_CART_ITEMS.to_string(),
        });
    }

    Ok(())
}

/// Rejects payment methods the shop does not accept yet.
pub fn validate_payment_method(method: PaymentMethod) -> ValidationResult<()> {
    if method.is_available() {
        return Ok(());
    }

    Err(ValidationError::NotAllowed {
        field: "paymentMethod".to_string(),
        allowed: PaymentMethod::ALL
            .iter()
            .filter(|m| m.is_available())
            .map(|m| m.as_str().to_string())
            .collect(),
    })
}

// =============================================================================
// Payload Validators
// =============================================================================

/// Validates a product creation payload.
pub fn validate_new_product(product: &NewProduct) -> ValidationResult<()> {
    validate_product_name("name", &product.name)?;
    validate_product_name("nameEn", &product.name_en)?;
    validate_price("price", product.price)?;
    if let Some(original) = product.original_price {
        validate_price("originalPrice", original)?;
    }
    Ok(())
}

/// Validates the fields present in a partial product update.
pub fn validate_product_update(update: &ProductUpdate) -> ValidationResult<()> {
    if let Some(name) = &update.name {
        validate_product_name("name", name)?;
    }
    if let Some(name_en) = &update.name_en {
        validate_product_name("nameEn", name_en)?;
    }
    if let Some(price) = update.price {
        validate_price("price", price)?;
    }
    if let Some(original) = update.original_price {
        validate_price("originalPrice", original)?;
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
