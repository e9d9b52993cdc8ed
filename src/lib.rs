#![doc(test(attr(deny(warnings))))]

//! Finz turns monthly cash records into a savings history, projects it
//! forward, and scores savings goals against it.
//!
//! The heavy lifting lives in `finz-core`; this crate wires it to
//! configuration, fixtures, currency formatting and the `finz_cli` binary.

pub mod cli;
pub mod currency;
pub mod errors;
pub mod fixtures;
pub mod report;
pub mod utils;

pub use errors::{CliError, FinzError};
pub use report::SavingsReport;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("finz tracing initialized");
    });
}
