//! Project margin analytics.
//!
//! This module compares what a project was sold for (theoretical figures,
//! from sales order lines) with what it actually cost (real figures, from
//! timesheets, purchases, consumed material, expense claims and
//! manufacturing):
//! - Theoretical totals per analysis axis
//! - Real cost breakdown
//! - Margin percentages and labour hours
//! - Traffic-light indicators

pub mod axis;
pub mod calculator;
pub mod error;
pub mod indicator;
pub mod ledger;
pub mod repository;
pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use axis::AnalysisAxis;
pub use calculator::MarginCalculator;
pub use error::MarginError;
pub use indicator::Indicator;
pub use ledger::{
    BundleComponentLineItem, ManufacturingRecord, Project, ProjectLedger, ProjectStatus,
    PurchaseOrder, PurchaseOrderLineItem, SalesLineItem, SalesOrder, Timesheet, TimesheetEntry,
};
pub use repository::MarginRepository;
pub use service::MarginService;
pub use types::{
    AxisMargins, CostProfile, CostSource, DocStatus, LabourHours, LineSet, ProjectCostFields,
    ProjectMargins, RealCostBreakdown, TheoreticalTotals,
};
