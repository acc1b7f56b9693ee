//! # Error Types
//!
//! Domain-specific error types for tally-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tally-core errors (this file)                                         │
//! │  ├── CoreError        - Not-found and business rule violations         │
//! │  └── ValidationError  - Operator input that failed to parse            │
//! │                                                                         │
//! │  tally-store errors (separate crate)                                   │
//! │  └── StoreError       - File I/O and corrupt data                      │
//! │                                                                         │
//! │  tally-cli errors (app)                                                │
//! │  ├── AuthError        - Bad credentials                                │
//! │  └── AppError         - Startup failures                               │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → rendered by the Presenter         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! None of these errors end the program: flows catch them, show them and
//! re-prompt.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// No inventory record carries this product id.
    #[error("Product not found: {0}")]
    ProductNotFound(i64),

    /// The product's expiry date has passed; it cannot be sold.
    #[error("Product {product_id} has expired (expiry date {expiry_date})")]
    ProductExpired {
        product_id: i64,
        expiry_date: chrono::NaiveDate,
    },

    /// Requested more units than are currently on the shelf.
    ///
    /// ## User Workflow
    /// ```text
    /// Enter quantity: 8
    ///      │
    ///      ▼
    /// Check stock: available=5 (may already reflect this session's lines)
    ///      │
    ///      ▼
    /// InsufficientStock { available: 5, requested: 8 }
    ///      │
    ///      ▼
    /// Operator is asked for a lower quantity
    /// ```
    #[error("Insufficient quantity in inventory for product {product_id}: available {available}, requested {requested}")]
    InsufficientStock {
        product_id: i64,
        available: i64,
        requested: i64,
    },

    /// Pricing `quantity` units would overflow the money range.
    #[error("Amount too large for product {product_id} at quantity {quantity}")]
    AmountTooLarge { product_id: i64, quantity: i64 },

    /// The ledger already holds the largest representable sale id.
    #[error("No sale id left after the largest one on record")]
    SaleIdsExhausted,

    /// Input was submitted to a checkout that has already ended.
    #[error("Checkout session has already ended")]
    SessionClosed,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required value is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} cannot be negative")]
    Negative { field: String },

    /// Value could not be parsed (not an integer, not a date, ...).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Name of the field that failed validation.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::MustBePositive { field }
            | ValidationError::Negative { field }
            | ValidationError::InvalidFormat { field, .. } => field,
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientStock {
            product_id: 2,
            available: 3,
            requested: 5,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient quantity in inventory for product 2: available 3, requested 5"
        );

        assert_eq!(
            CoreError::ProductNotFound(42).to_string(),
            "Product not found: 42"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        assert_eq!(err.to_string(), "quantity must be positive");
        assert_eq!(err.field(), "quantity");

        let err = ValidationError::InvalidFormat {
            field: "mrp".to_string(),
            reason: "not a decimal number".to_string(),
        };
        assert_eq!(err.to_string(), "mrp has invalid format: not a decimal number");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "product id".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
