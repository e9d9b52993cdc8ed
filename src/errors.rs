use std::result::Result as StdResult;

use finz_config::ConfigError;
use finz_core::CoreError;
use finz_domain::DomainError;
use thiserror::Error;

/// Unified error type for the domain, service, config and fixture layers.
#[derive(Error, Debug)]
pub enum FinzError {
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Goal not found: {0}")]
    GoalNotFound(String),
    #[error("Invalid month: {0}")]
    InvalidMonth(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Fixture error: {0}")]
    Fixture(String),
    #[error("IO error: {0}")]
    Io(String),
}

pub type Result<T> = StdResult<T, FinzError>;

/// User-facing CLI error wrapper.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] FinzError),
    #[error("Invalid input: {0}")]
    Input(String),
    #[error("Command failed: {0}")]
    Command(String),
}

impl From<std::io::Error> for FinzError {
    fn from(err: std::io::Error) -> Self {
        FinzError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for FinzError {
    fn from(err: serde_json::Error) -> Self {
        FinzError::Fixture(err.to_string())
    }
}

impl From<DomainError> for FinzError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidMonth(label) => FinzError::InvalidMonth(label),
            DomainError::MonthOutOfRange(month) => FinzError::InvalidMonth(month.to_string()),
        }
    }
}

impl From<CoreError> for FinzError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidSettings(message) => FinzError::InvalidSettings(message),
            CoreError::Validation(problems) => FinzError::Validation(problems.join("; ")),
            CoreError::GoalNotFound(key) => FinzError::GoalNotFound(key),
            CoreError::Domain(err) => FinzError::from(err),
        }
    }
}

impl From<ConfigError> for FinzError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Io(io) => FinzError::Io(io.to_string()),
            ConfigError::Serde(message) => FinzError::Config(message),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        CliError::from(FinzError::from(err))
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        CliError::from(FinzError::from(err))
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::from(FinzError::from(err))
    }
}
