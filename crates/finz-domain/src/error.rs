use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid month `{0}` (expected YYYY-MM)")]
    InvalidMonth(String),
    #[error("Month out of range: {0}")]
    MonthOutOfRange(u32),
}
