//! # Tally Terminal Application
//!
//! Core library for the Tally terminal app. `main.rs` only calls [`run`].
//!
//! ## Module Organization
//! ```text
//! tally_cli/
//! ├── lib.rs          ◄─── You are here (startup & logging)
//! ├── config.rs       ◄─── AppConfig from TALLY_* variables
//! ├── error.rs        ◄─── AppError for startup failures
//! ├── auth.rs         ◄─── Authenticator + default operator table
//! ├── router.rs       ◄─── Base dir prompt, login loop, flow dispatch
//! ├── console/
//! │   ├── mod.rs      ◄─── Prompter / Presenter traits, Table
//! │   ├── render.rs   ◄─── Box-drawn panels and tables
//! │   └── terminal.rs ◄─── TextTerminal over stdin/stdout
//! └── flows/
//!     ├── admin.rs    ◄─── Reports, database view, record edits
//!     └── sales.rs    ◄─── Checkout prompts and receipt
//! ```

pub mod auth;
pub mod config;
pub mod console;
pub mod error;
pub mod flows;
pub mod router;

use tracing::info;
use tracing_subscriber::EnvFilter;

use auth::OperatorTable;
use config::AppConfig;
use console::TextTerminal;
use error::AppResult;
use flows::system_clock;
use router::Router;

/// Runs the application against the process terminal.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, written to stderr             │
/// │     • Default: WARN, can be overridden with RUST_LOG                    │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • TALLY_DATA_DIR, TALLY_LOW_STOCK_THRESHOLD, TALLY_STORE_NAME       │
/// │                                                                         │
/// │  3. Run the Router ───────────────────────────────────────────────────► │
/// │     • Base directory prompt, open record store                          │
/// │     • Login loop until `exit`                                           │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> AppResult<()> {
    init_tracing();

    let config = AppConfig::from_env()?;
    info!(?config, "Starting Tally");

    let mut term = TextTerminal::stdio();
    Router::new(&config, OperatorTable::default(), system_clock).run(&mut term)
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=tally=info` - Show sales, edits and saves
/// - `RUST_LOG=debug` - Show lookups and menu choices
/// - Default: WARN level
///
/// Logs go to stderr so they never interleave with prompts on stdout.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
