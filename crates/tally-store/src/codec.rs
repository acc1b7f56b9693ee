//! # Typed Codecs
//!
//! Serde row types for both files, their conversion to the domain types,
//! and the typed `load_*` / `save_*` wrappers.
//!
//! ## Cell Rules
//! ```text
//! ┌──────────────────────┬──────────────────────────────────────────────────┐
//! │ Cell                 │ On load                                          │
//! ├──────────────────────┼──────────────────────────────────────────────────┤
//! │ ids, quantities      │ integer; "5.0" accepted; else CorruptData        │
//! │ mrp, prices, totals  │ decimal, rounded half up to cents; else Corrupt  │
//! │ expiry date          │ any accepted date layout; else absent (warned)   │
//! │ date of purchase     │ YYYY-MM-DD HH:MM:SS; else CorruptData            │
//! │ names, type, billed  │ text as stored                                   │
//! └──────────────────────┴──────────────────────────────────────────────────┘
//! ```

use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use tally_core::types::TIMESTAMP_FORMAT;
use tally_core::validation::parse_date;
use tally_core::{Inventory, InventoryRecord, Money, SalesLedger, SalesLineItem};
use tracing::warn;

use crate::error::{StoreError, StoreResult};
use crate::schema::{INVENTORY, SALES};
use crate::table::{load_table, save_table, Row};

/// A loaded dataset and whether its file had to be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loaded<T> {
    pub data: T,
    pub created: bool,
}

// =============================================================================
// Inventory
// =============================================================================

/// One line of `inventory.csv`, fields in column order.
#[derive(Debug, Serialize, Deserialize)]
struct InventoryRow {
    #[serde(rename = "Product_id", deserialize_with = "lenient_integer")]
    product_id: i64,
    #[serde(rename = "product_name")]
    name: String,
    #[serde(rename = "total quantity", deserialize_with = "lenient_integer")]
    quantity: i64,
    #[serde(rename = "product type")]
    product_type: String,
    #[serde(rename = "expiry date")]
    expiry_date: String,
    mrp: Money,
}

impl From<&InventoryRecord> for InventoryRow {
    fn from(record: &InventoryRecord) -> Self {
        Self {
            product_id: record.product_id,
            name: record.name.clone(),
            quantity: record.quantity,
            product_type: record.product_type.clone(),
            expiry_date: record
                .expiry_date
                .map(|d| d.to_string())
                .unwrap_or_default(),
            mrp: record.mrp,
        }
    }
}

impl Row<InventoryRow> {
    fn into_record(self, path: &Path) -> InventoryRecord {
        let expiry_date = lenient_expiry(&self.value.expiry_date, self.line, path);
        let row = self.value;
        InventoryRecord {
            product_id: row.product_id,
            name: row.name,
            quantity: row.quantity,
            product_type: row.product_type,
            expiry_date,
            mrp: row.mrp,
        }
    }
}

pub fn load_inventory(path: &Path) -> StoreResult<Loaded<Inventory>> {
    let table = load_table::<InventoryRow>(path, &INVENTORY)?;
    let records = table
        .rows
        .into_iter()
        .map(|row| row.into_record(path))
        .collect();
    Ok(Loaded {
        data: Inventory::new(records),
        created: table.created,
    })
}

pub fn save_inventory(path: &Path, inventory: &Inventory) -> StoreResult<()> {
    save_table(path, &INVENTORY, inventory.iter().map(InventoryRow::from))
}

// =============================================================================
// Sales Ledger
// =============================================================================

/// One line of `sales.csv`, fields in column order.
#[derive(Debug, Serialize, Deserialize)]
struct SalesRow {
    #[serde(rename = "sales_id", deserialize_with = "lenient_integer")]
    sale_id: i64,
    #[serde(deserialize_with = "lenient_integer")]
    product_id: i64,
    product_name: String,
    mrp: Money,
    #[serde(rename = "store_price")]
    sale_price: Money,
    #[serde(rename = "quantity purchased", deserialize_with = "lenient_integer")]
    quantity: i64,
    #[serde(rename = "date of purchase")]
    timestamp: String,
    #[serde(rename = "total price")]
    line_total: Money,
    billed_by: String,
}

impl From<&SalesLineItem> for SalesRow {
    fn from(line: &SalesLineItem) -> Self {
        Self {
            sale_id: line.sale_id,
            product_id: line.product_id,
            product_name: line.product_name.clone(),
            mrp: line.mrp,
            sale_price: line.sale_price,
            quantity: line.quantity,
            timestamp: line.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            line_total: line.line_total,
            billed_by: line.billed_by.clone(),
        }
    }
}

impl Row<SalesRow> {
    fn into_line(self, path: &Path) -> StoreResult<SalesLineItem> {
        let timestamp = parse_timestamp(&self.value.timestamp).ok_or_else(|| {
            StoreError::corrupt(
                path,
                self.line,
                format!(
                    "date of purchase '{}' is not YYYY-MM-DD HH:MM:SS",
                    self.value.timestamp
                ),
            )
        })?;
        let row = self.value;
        Ok(SalesLineItem {
            sale_id: row.sale_id,
            product_id: row.product_id,
            product_name: row.product_name,
            mrp: row.mrp,
            sale_price: row.sale_price,
            quantity: row.quantity,
            timestamp,
            line_total: row.line_total,
            billed_by: row.billed_by,
        })
    }
}

pub fn load_ledger(path: &Path) -> StoreResult<Loaded<SalesLedger>> {
    let table = load_table::<SalesRow>(path, &SALES)?;

    let mut lines = Vec::with_capacity(table.rows.len());
    for row in table.rows {
        let line_no = row.line;
        let line = row.into_line(path)?;
        // the next sale id must stay representable
        if line.sale_id == i64::MAX {
            return Err(StoreError::corrupt(
                path,
                line_no,
                format!("sales_id {} leaves no room for another sale", line.sale_id),
            ));
        }
        lines.push(line);
    }

    Ok(Loaded {
        data: SalesLedger::new(lines),
        created: table.created,
    })
}

pub fn save_ledger(path: &Path, ledger: &SalesLedger) -> StoreResult<()> {
    save_table(path, &SALES, ledger.lines().iter().map(SalesRow::from))
}

// =============================================================================
// Cell Parsers
// =============================================================================

/// Parses an integer cell, tolerating an all-zero fractional part.
fn parse_integer(text: &str) -> Option<i64> {
    if let Ok(value) = text.parse::<i64>() {
        return Some(value);
    }
    let (whole, frac) = text.split_once('.')?;
    if !frac.is_empty() && frac.bytes().all(|b| b == b'0') {
        whole.parse().ok()
    } else {
        None
    }
}

fn lenient_integer<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    parse_integer(&text).ok_or_else(|| D::Error::custom(format!("'{text}' is not an integer")))
}

/// Blank, `NaT`, `nan` and unreadable cells all mean "no expiry".
fn lenient_expiry(text: &str, line: u64, path: &Path) -> Option<NaiveDate> {
    if text.is_empty() || text.eq_ignore_ascii_case("nat") || text.eq_ignore_ascii_case("nan") {
        return None;
    }
    match parse_date("expiry date", text) {
        Ok(date) => Some(date),
        Err(_) => {
            warn!(
                path = %path.display(),
                line,
                value = text,
                "Unreadable expiry date, treating as absent"
            );
            None
        }
    }
}

fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_integer_tolerates_float_rendering() {
        assert_eq!(parse_integer("5"), Some(5));
        assert_eq!(parse_integer("-3"), Some(-3));
        assert_eq!(parse_integer("5.0"), Some(5));
        assert_eq!(parse_integer("12.00"), Some(12));
        assert_eq!(parse_integer("5.5"), None);
        assert_eq!(parse_integer("5."), None);
        assert_eq!(parse_integer("five"), None);
        assert_eq!(parse_integer(""), None);
    }

    #[test]
    fn test_parse_timestamp_accepts_fractional_seconds() {
        assert!(parse_timestamp("2024-06-01 10:30:00").is_some());
        assert!(parse_timestamp("2024-06-01 10:30:00.123456").is_some());
        assert!(parse_timestamp("yesterday").is_none());
    }
}
