//! # Record Store
//!
//! Owns the datasets for the lifetime of the process and persists them at
//! flow boundaries.
//!
//! ## Flow-Scoped Persistence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  RecordStore::open(dir)                                                │
//! │       │  load inventory.csv, sales.csv (create if missing)             │
//! │       ▼                                                                 │
//! │  with_flow(|data| admin or sales flow)                                 │
//! │       │  &mut Datasets lent to exactly one flow                        │
//! │       ▼                                                                 │
//! │  flow returns ──► save sales.csv  (only if lines are not yet on disk)  │
//! │                   save inventory.csv                                   │
//! │                                                                         │
//! │  A crash mid-flow loses that flow's in-memory changes; files on disk   │
//! │  are always either the previous or the new version.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use tally_core::Datasets;
use tracing::info;

use crate::codec::{load_inventory, load_ledger, save_inventory, save_ledger};
use crate::error::{StoreError, StoreResult};
use crate::schema::{INVENTORY, SALES};

#[derive(Debug)]
pub struct RecordStore {
    inventory_path: PathBuf,
    ledger_path: PathBuf,
    created: Vec<PathBuf>,
    datasets: Datasets,
    /// Ledger lines known to be in `sales.csv`.
    persisted_ledger_len: usize,
}

impl RecordStore {
    /// Loads both data files from `base_dir`, creating the directory and any
    /// missing file.
    pub fn open(base_dir: impl Into<PathBuf>) -> StoreResult<Self> {
        let base_dir = base_dir.into();
        std::fs::create_dir_all(&base_dir).map_err(|e| StoreError::io(&base_dir, e))?;

        let inventory_path = base_dir.join(INVENTORY.file_name);
        let ledger_path = base_dir.join(SALES.file_name);

        let inventory = load_inventory(&inventory_path)?;
        let ledger = load_ledger(&ledger_path)?;

        let mut created = Vec::new();
        if inventory.created {
            created.push(inventory_path.clone());
        }
        if ledger.created {
            created.push(ledger_path.clone());
        }

        info!(
            dir = %base_dir.display(),
            products = inventory.data.len(),
            sales_lines = ledger.data.len(),
            "Record store opened"
        );

        Ok(Self {
            inventory_path,
            ledger_path,
            created,
            persisted_ledger_len: ledger.data.len(),
            datasets: Datasets {
                inventory: inventory.data,
                ledger: ledger.data,
            },
        })
    }

    /// Files that did not exist and were created by [`RecordStore::open`].
    pub fn created_files(&self) -> &[PathBuf] {
        &self.created
    }

    pub fn datasets(&self) -> &Datasets {
        &self.datasets
    }

    /// Lends the datasets to one flow, then persists.
    ///
    /// ## Usage
    /// ```rust,no_run
    /// # fn main() -> tally_store::StoreResult<()> {
    /// let mut store = tally_store::RecordStore::open("data")?;
    /// let products = store.with_flow(|data| data.inventory.len())?;
    /// # let _ = products;
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_flow<F, R>(&mut self, f: F) -> StoreResult<R>
    where
        F: FnOnce(&mut Datasets) -> R,
    {
        let result = f(&mut self.datasets);
        self.persist()?;
        Ok(result)
    }

    /// Writes the ledger if it holds lines not yet on disk (including lines
    /// a failed earlier save left behind), then the inventory.
    ///
    /// The ledger goes first so a failure never leaves stock decremented on
    /// disk for a sale that is not.
    fn persist(&mut self) -> StoreResult<()> {
        let pending = self
            .datasets
            .ledger
            .len()
            .saturating_sub(self.persisted_ledger_len);
        if pending > 0 {
            save_ledger(&self.ledger_path, &self.datasets.ledger)?;
            self.persisted_ledger_len = self.datasets.ledger.len();
        }

        save_inventory(&self.inventory_path, &self.datasets.inventory)?;
        info!(ledger_lines_written = pending, "Flow persisted");
        Ok(())
    }
}
