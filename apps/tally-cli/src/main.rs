//! # Tally Entry Point
//!
//! The actual setup is in lib.rs for better testability.

use std::process::ExitCode;

fn main() -> ExitCode {
    match tally_cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Tally stopped");
            eprintln!("tally: {e}");
            ExitCode::FAILURE
        }
    }
}
