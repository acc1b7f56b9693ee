//! # Session Router
//!
//! Top-level loop: choose the data directory, then repeatedly log an
//! operator in and hand the datasets to their flow.
//!
//! ## Session Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  1. Base directory prompt ───────────────────────────────────────────► │
//! │     • blank or not a directory → configured default (error notice)     │
//! │     • RecordStore::open (creates missing files, info notice)           │
//! │                                                                         │
//! │  2. Login Screen (loop) ─────────────────────────────────────────────► │
//! │     • A / S  → credentials → Authenticator                             │
//! │     • exit   → goodbye, end                                            │
//! │                                                                         │
//! │  3. Flow ────────────────────────────────────────────────────────────► │
//! │     • store.with_flow(|data| admin::run / sales::run)                  │
//! │     • files saved when the flow returns                                │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use directories::BaseDirs;
use tally_core::validation::is_exit;
use tally_core::Role;
use tally_store::RecordStore;
use tracing::{error, info, warn};

use crate::auth::Authenticator;
use crate::config::AppConfig;
use crate::console::{MessageKind, Terminal};
use crate::error::AppResult;
use crate::flows::{admin, sales, Clock};

pub struct Router<'a, A: Authenticator> {
    config: &'a AppConfig,
    auth: A,
    clock: Clock,
}

impl<'a, A: Authenticator> Router<'a, A> {
    pub fn new(config: &'a AppConfig, auth: A, clock: Clock) -> Self {
        Self {
            config,
            auth,
            clock,
        }
    }

    /// Runs a whole session. Only a failure to open the data files is an
    /// error; everything after that is reported on the terminal.
    pub fn run(&self, term: &mut dyn Terminal) -> AppResult<()> {
        let base_dir = self.choose_base_dir(term);
        let mut store = RecordStore::open(&base_dir)?;

        for path in store.created_files() {
            term.info(
                "Info",
                &format!(
                    "File '{}' not found.\nCreated a new file with headers only.",
                    path.display()
                ),
            );
        }

        self.login_loop(term, &mut store);
        Ok(())
    }

    fn choose_base_dir(&self, term: &mut dyn Terminal) -> PathBuf {
        let answer = term
            .prompt("Enter the base directory path where inventory and sales CSV files are located")
            .unwrap_or_default();

        let candidate = expand_home(answer.trim());
        match candidate {
            Some(dir) if dir.is_dir() => {
                info!(dir = %dir.display(), "Using base directory");
                dir
            }
            _ => {
                warn!(input = %answer, "Unusable base directory, falling back to default");
                term.error("Invalid directory path. Using default path.");
                self.config.default_data_dir.clone()
            }
        }
    }

    fn login_loop(&self, term: &mut dyn Terminal, store: &mut RecordStore) {
        loop {
            term.panel(
                "Login Screen",
                &format!(
                    "Welcome to {}! Are you an admin (A) or sales representative (S)?\n\
                     Type 'exit' to quit.",
                    self.config.store_name
                ),
                MessageKind::Info,
            );

            let choice = term
                .prompt("Enter your choice (A/S/exit)")
                .unwrap_or_else(|| "exit".to_string());
            if is_exit(&choice) {
                term.panel("Exit", "Exiting program. Goodbye!", MessageKind::Info);
                return;
            }

            let Some(role) = Role::from_selector(&choice) else {
                term.error("Invalid option. Please choose 'A' for admin or 'S' for sales.");
                continue;
            };

            let labels = match role {
                Role::Admin => ("Enter admin username", "Enter admin password"),
                Role::SalesRep => ("Enter your sales username", "Enter your password"),
            };
            let Some(identity) = term.prompt(labels.0).filter(|s| !is_exit(s)) else {
                continue;
            };
            let Some(secret) = term.prompt(labels.1).filter(|s| !is_exit(s)) else {
                continue;
            };

            let operator = match self.auth.authenticate(role, &identity, &secret) {
                Ok(operator) => operator,
                Err(e) => {
                    term.error(&e.to_string());
                    continue;
                }
            };

            let threshold = self.config.low_stock_threshold;
            let clock = self.clock;
            let saved = store.with_flow(|data| match operator.role {
                Role::Admin => admin::run(&mut *term, data, threshold, clock),
                Role::SalesRep => sales::run(&mut *term, data, &operator, clock),
            });

            if let Err(e) = saved {
                error!(error = %e, "Failed to save data after flow");
                term.error(&format!("Could not save data: {e}"));
            }
        }
    }
}

/// Expands a leading `~` to the home directory. `None` for blank input.
fn expand_home(input: &str) -> Option<PathBuf> {
    if input.is_empty() {
        return None;
    }
    let home = || BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf());
    if input == "~" {
        return home();
    }
    match input.strip_prefix("~/") {
        Some(rest) => home().map(|h| h.join(rest)),
        None => Some(PathBuf::from(input)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_home() {
        assert_eq!(expand_home(""), None);
        assert_eq!(expand_home("/srv/data"), Some(PathBuf::from("/srv/data")));
        if let Some(home) = BaseDirs::new().map(|d| d.home_dir().to_path_buf()) {
            assert_eq!(expand_home("~/shop"), Some(home.join("shop")));
        }
    }
}
