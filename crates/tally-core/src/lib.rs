//! # tally-core: Pure Business Logic for Tally
//!
//! This crate is the **heart** of Tally. It contains the inventory rules,
//! the checkout state machine and all money math as pure functions with zero
//! I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Tally Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Terminal (tally-cli)                         │   │
//! │  │    Login ──► Admin menu / Sales checkout ──► Receipt            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ &mut Datasets                          │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ tally-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │ inventory │  │ checkout  │  │   │
//! │  │   │  Record   │  │   Money   │  │  queries  │  │  Basket   │  │   │
//! │  │   │  Line     │  │   Rate    │  │  edit     │  │  Receipt  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO FILES • NO TERMINAL • NO CLOCK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    tally-store (Record Store)                   │   │
//! │  │              inventory.csv, sales.csv, load/save                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (InventoryRecord, SalesLineItem, Role, ...)
//! - [`money`] - Money type with integer arithmetic and basis-point rates
//! - [`error`] - Domain error types
//! - [`validation`] - Parsing and validation of operator input
//! - [`inventory`] - Inventory collection and read-only queries
//! - [`edit`] - Validated single-field edits of inventory records
//! - [`ledger`] - The append-only sales ledger
//! - [`checkout`] - The multi-item checkout state machine
//!
//! ## Example Usage
//!
//! ```rust
//! use tally_core::money::Money;
//! use tally_core::{SALES_TAX, SALE_DISCOUNT};
//!
//! let mrp = Money::from_cents(2000); // 20.00
//! let sale_price = mrp.apply_discount(SALE_DISCOUNT);
//! assert_eq!(sale_price.to_string(), "18.00");
//!
//! let subtotal = sale_price.checked_mul(7).unwrap();
//! assert_eq!(subtotal.calculate_tax(SALES_TAX).to_string(), "6.30");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod checkout;
pub mod edit;
pub mod error;
pub mod inventory;
pub mod ledger;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use checkout::{Basket, Checkout, CheckoutEvent, CheckoutState, Receipt};
pub use edit::{update_field, FieldChange};
pub use error::{CoreError, CoreResult, ValidationError};
pub use inventory::Inventory;
pub use ledger::SalesLedger;
pub use money::{Money, Rate};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Discount applied to the MRP of every item at checkout (10%).
///
/// Fixed by policy, not configurable.
pub const SALE_DISCOUNT: Rate = Rate::from_bps(1000);

/// Sales tax charged on the receipt subtotal (5%).
pub const SALES_TAX: Rate = Rate::from_bps(500);

/// Quantity below which a product shows up in the low-stock report.
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 20;

/// Sentinel that backs out of the current prompt.
pub const EXIT_SENTINEL: &str = "exit";
