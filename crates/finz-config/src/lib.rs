//! finz-config
//!
//! Persistent user preferences and engine tuning.
//! Owns the Config data structure plus disk persistence helpers.

pub mod error;
pub mod manager;
pub mod model;

pub use error::ConfigError;
pub use manager::{ConfigManager, CONFIG_FILE_NAME, HOME_ENV};
pub use model::Config;
