//! # Store Error Types
//!
//! Error types for record store operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / csv::Error / bad cell                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds the file path and line                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  AppError (in tally-cli) ← Startup fails with a non-zero exit          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Record store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A file or directory could not be read, created or replaced.
    ///
    /// ## When This Occurs
    /// - Base directory cannot be created
    /// - File permissions issue
    /// - Disk full during a rewrite
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV reader or writer failed.
    #[error("CSV error in {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The file parsed as CSV but its contents do not fit the schema.
    ///
    /// ## When This Occurs
    /// - A required column is missing from the header
    /// - A row has the wrong number of cells
    /// - An id, quantity, price or timestamp cell does not parse
    #[error("Corrupt data in {} at line {line}: {reason}", path.display())]
    CorruptData {
        path: PathBuf,
        line: u64,
        reason: String,
    },
}

impl StoreError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn csv(path: &Path, source: csv::Error) -> Self {
        StoreError::Csv {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn corrupt(path: &Path, line: u64, reason: impl Into<String>) -> Self {
        StoreError::CorruptData {
            path: path.to_path_buf(),
            line,
            reason: reason.into(),
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corrupt_data_message_names_file_and_line() {
        let err = StoreError::corrupt(Path::new("data/inventory.csv"), 4, "quantity 'ten' is not an integer");
        assert_eq!(
            err.to_string(),
            "Corrupt data in data/inventory.csv at line 4: quantity 'ten' is not an integer"
        );
    }
}
