//! Margin error types.
//!
//! Missing data is never an error: aggregates over no rows are zero.
//! Only failures of the backing store surface here.

use thiserror::Error;

/// Errors that can occur while gathering margin figures.
#[derive(Debug, Error)]
pub enum MarginError {
    /// The backing store failed to answer an aggregate query.
    #[error("Repository error: {0}")]
    Repository(String),
}

impl MarginError {
    /// Wraps any store error.
    pub fn repository(err: impl std::fmt::Display) -> Self {
        Self::Repository(err.to_string())
    }
}
