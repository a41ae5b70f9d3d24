//! Report error types.

use chrono::NaiveDate;
use thiserror::Error;

use crate::margin::MarginError;

/// Errors that can occur during report generation.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Invalid date range.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        /// Start date.
        start: NaiveDate,
        /// End date.
        end: NaiveDate,
    },

    /// Margin figures could not be loaded.
    #[error(transparent)]
    Margin(#[from] MarginError),
}
