//! # Validation Module
//!
//! Parsing and validation of operator input for Tally.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Terminal (tally-cli)                                         │
//! │  ├── Reads raw lines, recognises `exit`                                │
//! │  └── Renders errors and re-prompts                                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Text → typed value (integer, date, money)                         │
//! │  └── Range rules (positive quantity, non-negative stock, mrp > 0)      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Business rules (checkout, edit)                              │
//! │  ├── Product exists                                                    │
//! │  ├── Product not expired                                               │
//! │  └── Enough stock                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tally_core::validation::{is_exit, parse_quantity};
//!
//! assert!(is_exit(" EXIT "));
//! assert_eq!(parse_quantity("3").unwrap(), 3);
//! assert!(parse_quantity("0").is_err());
//! ```

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::ValidationError;
use crate::money::{Money, ParseMoneyError};
use crate::EXIT_SENTINEL;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Date layouts accepted for expiry dates, tried in order.
pub const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Date-time layouts whose date part is accepted as an expiry date.
pub const DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

// =============================================================================
// Sentinels
// =============================================================================

/// True when the operator typed the exit sentinel (any case).
pub fn is_exit(input: &str) -> bool {
    input.trim().eq_ignore_ascii_case(EXIT_SENTINEL)
}

/// True for `Y`/`y`; anything else means "no".
pub fn is_continue(input: &str) -> bool {
    input.trim().eq_ignore_ascii_case("y")
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Parses a whole number.
pub fn parse_integer(field: &str, raw: &str) -> ValidationResult<i64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    raw.parse::<i64>()
        .map_err(|_| ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: format!("'{}' is not an integer", raw),
        })
}

/// Parses a product id typed at a prompt.
pub fn parse_product_id(raw: &str) -> ValidationResult<i64> {
    parse_integer("product id", raw)
}

/// Parses a purchase quantity.
///
/// ## Rules
/// - Must be an integer
/// - Must be strictly positive
pub fn parse_quantity(raw: &str) -> ValidationResult<i64> {
    let qty = parse_integer("quantity", raw)?;
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }
    Ok(qty)
}

/// Parses a stock level set by the admin. Zero is allowed, negatives are not.
pub fn parse_stock_level(raw: &str) -> ValidationResult<i64> {
    let qty = parse_integer("quantity", raw)?;
    if qty < 0 {
        return Err(ValidationError::Negative {
            field: "quantity".to_string(),
        });
    }
    Ok(qty)
}

/// Parses decimal money text, rounding to cents.
pub fn parse_money(field: &str, raw: &str) -> ValidationResult<Money> {
    raw.parse::<Money>().map_err(|e| match e {
        ParseMoneyError::Empty => ValidationError::Required {
            field: field.to_string(),
        },
        other => ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: other.to_string(),
        },
    })
}

/// Parses an MRP. Must be strictly positive.
pub fn parse_mrp(raw: &str) -> ValidationResult<Money> {
    let mrp = parse_money("mrp", raw)?;
    if !mrp.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "mrp".to_string(),
        });
    }
    Ok(mrp)
}

// =============================================================================
// Date Validators
// =============================================================================

/// Parses a calendar date in any of the accepted layouts.
///
/// ## Example
/// ```rust
/// use tally_core::validation::parse_date;
///
/// let a = parse_date("expiry date", "2025-12-31").unwrap();
/// let b = parse_date("expiry date", "12/31/2025").unwrap();
/// let c = parse_date("expiry date", "2025-12-31 00:00:00").unwrap();
/// assert_eq!(a, b);
/// assert_eq!(a, c);
/// assert!(parse_date("expiry date", "31st Dec").is_err());
/// ```
pub fn parse_date(field: &str, raw: &str) -> ValidationResult<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            DATE_TIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                .map(|dt| dt.date())
        })
        .ok_or_else(|| ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: format!("'{}' is not a date (expected YYYY-MM-DD)", raw),
        })
}

// =============================================================================
// Unit Tests
// =============================================================================
