//! # Application Error Type
//!
//! Errors that end the program.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Tally                                  │
//! │                                                                         │
//! │  Inside a flow                        At startup                        │
//! │  ─────────────                        ──────────                        │
//! │                                                                         │
//! │  ValidationError ─┐                   ConfigError ──┐                   │
//! │  CoreError ───────┼─► Presenter       StoreError ───┼─► AppError        │
//! │  AuthError ───────┘   (error panel,                 │      │            │
//! │                        re-prompt)                   │      ▼            │
//! │                                                     │   stderr,         │
//! │                                                     │   exit code 1     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tally_store::StoreError;
use thiserror::Error;

use crate::config::ConfigError;

/// Top-level error returned from [`crate::run`].
#[derive(Debug, Error)]
pub enum AppError {
    /// Data files could not be opened, created or parsed.
    #[error("{0}")]
    Store(#[from] StoreError),

    /// An environment variable holds an unusable value.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Convenience type alias for app results.
pub type AppResult<T> = Result<T, AppError>;
