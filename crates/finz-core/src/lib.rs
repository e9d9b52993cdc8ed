//! finz-core
//!
//! Savings aggregation, forecasting, and goal analysis services.
//! Depends on finz-domain. No CLI, no terminal I/O, no storage.

pub mod aggregation_service;
pub mod error;
pub mod forecast_service;
pub mod format;
pub mod goal_service;
pub mod insight_service;
pub mod time;

pub use aggregation_service::*;
pub use error::CoreError;
pub use forecast_service::*;
pub use format::*;
pub use goal_service::*;
pub use insight_service::*;
pub use time::*;

#[cfg(test)]
mod tests;
