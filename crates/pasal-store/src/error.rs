//! # Store Error Types
//!
//! Error types for catalog and order storage.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  CoreError (pasal-core) ─┐                                             │
//! │                          ▼                                              │
//! │  StoreError (this module) ← Adds lookups and stock failures            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (storefront-api) ← Serialized for the client                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use pasal_core::{CoreError, ValidationError};
use thiserror::Error;

/// Storage operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Entity not found.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// An entity with the same identifier already exists.
    #[error("Duplicate {field}: '{value}' already exists")]
    Duplicate { field: String, value: String },

    /// Not enough stock to fill an order line.
    ///
    /// ## When This Occurs
    /// - Product marked out of stock
    /// - Requested quantity exceeds units on hand
    #[error("Product {product_id} is out of stock (requested {requested}, available {available})")]
    OutOfStock {
        product_id: String,
        requested: u32,
        available: u32,
    },

    /// A business rule from pasal-core rejected the operation.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl StoreError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        StoreError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Creates a Duplicate error.
    pub fn duplicate(field: impl Into<String>, value: impl Into<String>) -> Self {
        StoreError::Duplicate {
            field: field.into(),
            value: value.into(),
        }
    }
}

impl From<ValidationError> for StoreError {
    fn from(err: ValidationError) -> Self {
        StoreError::Core(CoreError::Validation(err))
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            StoreError::not_found("Product", "demo-9").to_string(),
            "Product not found: demo-9"
        );
        let err = StoreError::OutOfStock {
            product_id: "demo-6".to_string(),
            requested: 2,
            available: 0,
        };
        assert_eq!(
            err.to_string(),
            "Product demo-6 is out of stock (requested 2, available 0)"
        );
    }

    #[test]
    fn test_core_errors_pass_through() {
        let err: StoreError = CoreError::ItemNotInCart("x".to_string()).into();
        assert_eq!(err.to_string(), "Product x not in cart");

        let err: StoreError = ValidationError::Required {
            field: "name".to_string(),
        }
        .into();
        assert!(matches!(err, StoreError::Core(CoreError::Validation(_))));
    }
}
