//! finz-domain
//!
//! Pure domain models for the savings engine (months, cash records, savings
//! series, goals, analysis results, forecasting settings).
//! No I/O, no CLI, no storage. Only data types and core enums.

pub mod common;
pub mod error;
pub mod goal;
pub mod savings;
pub mod settings;
pub mod transaction;

pub use common::*;
pub use error::DomainError;
pub use goal::*;
pub use savings::*;
pub use settings::*;
pub use transaction::*;
