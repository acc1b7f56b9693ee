//! # Flows
//!
//! One interaction from login back to the router. Each flow borrows the
//! datasets mutably for its whole run and returns when the operator backs
//! out; persistence is the router's job.
//!
//! - [`admin`] - inventory reports and record edits
//! - [`sales`] - the checkout loop and receipt

pub mod admin;
pub mod sales;

use chrono::NaiveDateTime;

/// Source of "now" for expiry checks and sale timestamps.
pub type Clock = fn() -> NaiveDateTime;

/// Local wall-clock time.
pub fn system_clock() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}
