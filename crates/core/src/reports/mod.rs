//! Period margin reports.
//!
//! This module provides pure business logic for the margin report over
//! completed projects:
//! - Period columns (monthly, quarterly, annual)
//! - Grouping rows by a project attribute
//! - Per-period and total margin figures

pub mod error;
pub mod period;
pub mod service;
pub mod types;


pub use error::ReportError;
pub use period::{period_key, period_label, periods};
pub use service::{MarginReportBuilder, TOTAL_ROW};
pub use types::*;
