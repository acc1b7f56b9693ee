//! # Domain Types
//!
//! Core domain types used throughout Tally.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ InventoryRecord │   │  SalesLineItem  │   │    Datasets     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  product_id     │   │  sale_id        │   │  inventory      │       │
//! │  │  name           │   │  product_id     │   │  ledger         │       │
//! │  │  quantity       │   │  name snapshot  │   └─────────────────┘       │
//! │  │  product_type   │   │  mrp snapshot   │                              │
//! │  │  expiry_date    │   │  sale_price     │   ┌─────────────────┐       │
//! │  │  mrp            │   │  line_total     │   │ InventoryField  │       │
//! │  └─────────────────┘   │  billed_by      │   │  Name … Mrp     │       │
//! │                        └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                              │
//! │  │      Role       │   │    Operator     │                              │
//! │  │  Admin          │   │  identity       │                              │
//! │  │  SalesRep       │   │  role           │                              │
//! │  └─────────────────┘   └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! A sales line freezes the product name and MRP at the moment of sale, so
//! later edits to the inventory record never rewrite history.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::fmt;

use crate::inventory::Inventory;
use crate::ledger::SalesLedger;
use crate::money::Money;
use crate::error::{CoreError, CoreResult};
use crate::SALE_DISCOUNT;

/// Timestamp layout of the `date of purchase` column.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// =============================================================================
// Inventory Record
// =============================================================================

/// A product on the shelf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryRecord {
    /// Business key; at most one record per id.
    pub product_id: i64,

    /// Display name shown at checkout and on the receipt.
    pub name: String,

    /// Units on hand. Decremented by checkout, set by the admin.
    pub quantity: i64,

    /// Free-text category ("Stationery", "Toiletries", ...).
    pub product_type: String,

    /// Last day the product may be sold. Absent means it never expires.
    pub expiry_date: Option<NaiveDate>,

    /// List price before the checkout discount.
    pub mrp: Money,
}

impl InventoryRecord {
    /// A product is expired once `as_of` is strictly past midnight of its
    /// expiry date.
    ///
    /// ```rust
    /// use chrono::NaiveDate;
    /// use tally_core::{InventoryRecord, Money};
    ///
    /// let soap = InventoryRecord {
    ///     product_id: 1,
    ///     name: "Soap".into(),
    ///     quantity: 5,
    ///     product_type: "Toiletries".into(),
    ///     expiry_date: NaiveDate::from_ymd_opt(2020, 1, 1),
    ///     mrp: Money::from_units(30),
    /// };
    /// let now = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap().and_hms_opt(10, 0, 0).unwrap();
    /// assert!(soap.is_expired(now));
    /// ```
    pub fn is_expired(&self, as_of: NaiveDateTime) -> bool {
        match self.expiry_date {
            Some(date) => as_of > date.and_time(NaiveTime::MIN),
            None => false,
        }
    }

    /// Expiry date for display; `N/A` when absent.
    pub fn expiry_display(&self) -> String {
        self.expiry_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "N/A".to_string())
    }

    /// Current value of one editable field, as shown to the operator.
    pub fn field_display(&self, field: InventoryField) -> String {
        match field {
            InventoryField::Name => self.name.clone(),
            InventoryField::Quantity => self.quantity.to_string(),
            InventoryField::ProductType => self.product_type.clone(),
            InventoryField::ExpiryDate => self.expiry_display(),
            InventoryField::Mrp => self.mrp.to_string(),
        }
    }

    /// Price charged at checkout: MRP less the sale discount.
    #[inline]
    pub fn sale_price(&self) -> Money {
        self.mrp.apply_discount(SALE_DISCOUNT)
    }
}

// =============================================================================
// Sales Line Item
// =============================================================================

/// One product purchased within a checkout. Immutable once in the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalesLineItem {
    /// Shared by every line of one checkout session.
    pub sale_id: i64,
    pub product_id: i64,
    /// Product name at time of sale (frozen).
    pub product_name: String,
    /// MRP at time of sale (frozen).
    pub mrp: Money,
    /// MRP less the sale discount, rounded to the cent.
    pub sale_price: Money,
    pub quantity: i64,
    pub timestamp: NaiveDateTime,
    /// `mrp × quantity` less the sale discount, rounded once. Equals
    /// `sale_price × quantity` whenever the unit price is a whole cent.
    pub line_total: Money,
    /// Identity of the sales rep who rang the sale.
    pub billed_by: String,
}

impl SalesLineItem {
    /// Prices a line for `quantity` units of `record`.
    ///
    /// Fails with `AmountTooLarge` when `mrp × quantity` does not fit.
    pub fn priced(
        sale_id: i64,
        record: &InventoryRecord,
        quantity: i64,
        timestamp: NaiveDateTime,
        billed_by: &str,
    ) -> CoreResult<Self> {
        let gross = record
            .mrp
            .checked_mul(quantity)
            .ok_or(CoreError::AmountTooLarge {
                product_id: record.product_id,
                quantity,
            })?;

        Ok(Self {
            sale_id,
            product_id: record.product_id,
            product_name: record.name.clone(),
            mrp: record.mrp,
            sale_price: record.sale_price(),
            quantity,
            timestamp,
            line_total: gross.apply_discount(SALE_DISCOUNT),
            billed_by: billed_by.to_string(),
        })
    }
}

// =============================================================================
// Inventory Field
// =============================================================================

/// The editable columns of an inventory record, keyed by admin menu number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InventoryField {
    Name,
    Quantity,
    ProductType,
    ExpiryDate,
    Mrp,
}

impl InventoryField {
    /// Menu order.
    pub const ALL: [InventoryField; 5] = [
        InventoryField::Name,
        InventoryField::Quantity,
        InventoryField::ProductType,
        InventoryField::ExpiryDate,
        InventoryField::Mrp,
    ];

    /// Resolves a menu key (`1`-`5`).
    pub fn from_menu_key(key: &str) -> Option<Self> {
        match key.trim() {
            "1" => Some(InventoryField::Name),
            "2" => Some(InventoryField::Quantity),
            "3" => Some(InventoryField::ProductType),
            "4" => Some(InventoryField::ExpiryDate),
            "5" => Some(InventoryField::Mrp),
            _ => None,
        }
    }

    pub fn menu_key(&self) -> &'static str {
        match self {
            InventoryField::Name => "1",
            InventoryField::Quantity => "2",
            InventoryField::ProductType => "3",
            InventoryField::ExpiryDate => "4",
            InventoryField::Mrp => "5",
        }
    }

    /// Human-readable label, also used as the field name in validation errors.
    pub fn label(&self) -> &'static str {
        match self {
            InventoryField::Name => "product name",
            InventoryField::Quantity => "quantity",
            InventoryField::ProductType => "product type",
            InventoryField::ExpiryDate => "expiry date",
            InventoryField::Mrp => "mrp",
        }
    }
}

impl fmt::Display for InventoryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Roles & Operators
// =============================================================================

/// Who is at the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Inspects and edits inventory.
    Admin,
    /// Rings up sales.
    SalesRep,
}

impl Role {
    /// Resolves the login selector (`A` or `S`, any case).
    pub fn from_selector(selector: &str) -> Option<Self> {
        match selector.trim().to_ascii_uppercase().as_str() {
            "A" => Some(Role::Admin),
            "S" => Some(Role::SalesRep),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => f.write_str("admin"),
            Role::SalesRep => f.write_str("sales rep"),
        }
    }
}

/// An authenticated operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operator {
    pub identity: String,
    pub role: Role,
}

// =============================================================================
// Datasets
// =============================================================================

/// Everything the flows operate on. Lent mutably to one flow at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Datasets {
    pub inventory: Inventory,
    pub ledger: SalesLedger,
}

// =============================================================================
// Unit Tests
// =============================================================================
