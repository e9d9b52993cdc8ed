use finz_domain::DomainError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),
    /// Every problem found, in the order they were checked.
    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),
    #[error("Goal not found: {0}")]
    GoalNotFound(String),
    #[error(transparent)]
    Domain(#[from] DomainError),
}
