//! Error types for the statistics engine

use thiserror::Error;

/// Errors surfaced by report computation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StatsError {
    /// Malformed or out-of-domain date, month, year or range input.
    /// Always raised before any store query is issued.
    #[error("Invalid range: {0}")]
    InvalidRange(String),

    /// The record store failed to answer a query
    #[error("Record store unavailable: {0}")]
    StoreUnavailable(String),
}

impl StatsError {
    pub fn invalid_range(message: impl Into<String>) -> Self {
        Self::InvalidRange(message.into())
    }

    pub fn store_unavailable(message: impl Into<String>) -> Self {
        Self::StoreUnavailable(message.into())
    }

    /// Stable machine-readable code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            StatsError::InvalidRange(_) => "INVALID_RANGE",
            StatsError::StoreUnavailable(_) => "STORE_UNAVAILABLE",
        }
    }
}

/// Result alias for statistics operations
pub type StatsResult<T> = Result<T, StatsError>;
