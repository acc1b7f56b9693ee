//! # Inventory
//!
//! The in-memory inventory table and its read-only queries.
//!
//! Records keep the order they had in the inventory file; every query
//! returns matches in that order. Queries never fail: no match is an empty
//! result.

use chrono::NaiveDateTime;
use tracing::debug;

use crate::types::InventoryRecord;

/// Ordered collection of inventory records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    records: Vec<InventoryRecord>,
}

impl Inventory {
    pub fn new(records: Vec<InventoryRecord>) -> Self {
        Self { records }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, InventoryRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First record with `product_id`.
    pub fn find_by_id(&self, product_id: i64) -> Option<&InventoryRecord> {
        let found = self.records.iter().find(|r| r.product_id == product_id);
        debug!(product_id, found = found.is_some(), "Inventory lookup");
        found
    }

    /// Mutable access to the first record with `product_id`.
    pub fn find_by_id_mut(&mut self, product_id: i64) -> Option<&mut InventoryRecord> {
        self.records.iter_mut().find(|r| r.product_id == product_id)
    }

    /// Records whose expiry date has passed as of `as_of`.
    pub fn find_expired(&self, as_of: NaiveDateTime) -> Vec<&InventoryRecord> {
        self.records.iter().filter(|r| r.is_expired(as_of)).collect()
    }

    /// Records with fewer than `threshold` units on hand.
    pub fn find_low_stock(&self, threshold: i64) -> Vec<&InventoryRecord> {
        self.records
            .iter()
            .filter(|r| r.quantity < threshold)
            .collect()
    }
}

impl From<Vec<InventoryRecord>> for Inventory {
    fn from(records: Vec<InventoryRecord>) -> Self {
        Self::new(records)
    }
}

impl<'a> IntoIterator for &'a Inventory {
    type Item = &'a InventoryRecord;
    type IntoIter = std::slice::Iter<'a, InventoryRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use chrono::NaiveDate;

    fn record(id: i64, name: &str, qty: i64, expiry: Option<(i32, u32, u32)>) -> InventoryRecord {
        InventoryRecord {
            product_id: id,
            name: name.to_string(),
            quantity: qty,
            product_type: "General".to_string(),
            expiry_date: expiry.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
            mrp: Money::from_units(10),
        }
    }

    fn sample() -> Inventory {
        Inventory::new(vec![
            record(1, "Soap", 5, Some((2020, 1, 1))),
            record(2, "Pen", 10, None),
            record(3, "Milk", 40, Some((2024, 6, 1))),
            record(4, "Rice", 20, Some((2030, 1, 1))),
        ])
    }

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_find_expired_in_store_order() {
        let inventory = sample();
        let ids: Vec<i64> = inventory
            .find_expired(now())
            .iter()
            .map(|r| r.product_id)
            .collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_find_low_stock_is_strictly_below() {
        let inventory = sample();
        let ids: Vec<i64> = inventory
            .find_low_stock(20)
            .iter()
            .map(|r| r.product_id)
            .collect();
        assert_eq!(ids, vec![1, 2]);

        assert!(inventory.find_low_stock(0).is_empty());
    }

    #[test]
    fn test_find_by_id() {
        let inventory = sample();
        assert_eq!(inventory.find_by_id(2).map(|r| r.name.as_str()), Some("Pen"));
        assert!(inventory.find_by_id(99).is_none());
    }

    #[test]
    fn test_find_by_id_returns_first_duplicate() {
        let inventory = Inventory::new(vec![
            record(7, "First", 1, None),
            record(7, "Second", 2, None),
        ]);
        assert_eq!(inventory.find_by_id(7).map(|r| r.name.as_str()), Some("First"));
    }

    #[test]
    fn test_empty_inventory_queries() {
        let inventory = Inventory::default();
        assert!(inventory.is_empty());
        assert!(inventory.find_expired(now()).is_empty());
        assert!(inventory.find_low_stock(20).is_empty());
        assert!(inventory.find_by_id(1).is_none());
    }
}
