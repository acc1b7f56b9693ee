//! # Sales Ledger
//!
//! Append-only record of committed sales lines.
//!
//! ```text
//! sales_id │ product │ qty │ total
//! ─────────┼─────────┼─────┼───────
//!        1 │ Pen     │   3 │ 54.00   ┐ one checkout
//!        1 │ Ink     │   1 │  9.00   ┘
//!        2 │ Pen     │   4 │ 72.00   ─ next checkout (max + 1)
//! ```
//!
//! Lines are only ever appended, as a whole basket, when a checkout
//! finalises.

use tracing::info;

use crate::types::SalesLineItem;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SalesLedger {
    lines: Vec<SalesLineItem>,
}

impl SalesLedger {
    pub fn new(lines: Vec<SalesLineItem>) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> &[SalesLineItem] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sale id for the next checkout: one past the largest id on record,
    /// or `1` for an empty ledger. `None` once ids are exhausted.
    pub fn next_sale_id(&self) -> Option<i64> {
        match self.lines.iter().map(|l| l.sale_id).max() {
            Some(max) => max.checked_add(1),
            None => Some(1),
        }
    }

    /// Lines belonging to one sale, in ledger order.
    pub fn lines_for_sale(&self, sale_id: i64) -> Vec<&SalesLineItem> {
        self.lines.iter().filter(|l| l.sale_id == sale_id).collect()
    }

    /// Appends a finalised basket.
    pub fn append(&mut self, batch: impl IntoIterator<Item = SalesLineItem>) {
        let before = self.lines.len();
        self.lines.extend(batch);
        info!(appended = self.lines.len() - before, total = self.lines.len(), "Ledger appended");
    }
}

impl From<Vec<SalesLineItem>> for SalesLedger {
    fn from(lines: Vec<SalesLineItem>) -> Self {
        Self::new(lines)
    }
}
