//! # tally-store: Record Store for Tally
//!
//! This crate owns the two data files and everything that touches them.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Tally Data Flow                                  │
//! │                                                                         │
//! │  Router (tally-cli)                                                    │
//! │       │ with_flow(..)                                                   │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    tally-store (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │  RecordStore  │    │    codec      │    │    table     │  │   │
//! │  │   │  (store.rs)   │───►│ Inventory ⇄   │───►│ load/save    │  │   │
//! │  │   │  Datasets     │    │ rows          │    │ temp+rename  │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  <base dir>/inventory.csv      <base dir>/sales.csv                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`schema`] - Column layout of both files
//! - [`table`] - Untyped CSV load/save
//! - [`codec`] - Typed load/save of inventory and ledger
//! - [`store`] - The `RecordStore` and flow-scoped persistence
//! - [`error`] - Store error types

// =============================================================================
// Module Declarations
// =============================================================================

pub mod codec;
pub mod error;
pub mod schema;
pub mod store;
pub mod table;

// =============================================================================
// Re-exports
// =============================================================================

pub use codec::{load_inventory, load_ledger, save_inventory, save_ledger, Loaded};
pub use error::{StoreError, StoreResult};
pub use schema::{Schema, INVENTORY, SALES};
pub use store::RecordStore;
pub use table::{load_table, save_table, Row, Table};
