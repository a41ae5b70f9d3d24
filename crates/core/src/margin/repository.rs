//! Data access seam for margin figures.

use std::future::Future;

use rust_decimal::Decimal;
use vt_shared::types::ProjectKey;

use super::axis::AnalysisAxis;
use super::error::MarginError;
use super::types::{LineSet, ProjectCostFields, TheoreticalTotals};
use crate::reports::{ProjectFilter, ProjectSummary};

/// Repository trait for the aggregates the margin service needs.
///
/// This trait is implemented by the db crate to provide actual database
/// operations, and by [`super::ledger::ProjectLedger`] for in-memory data.
/// Every aggregate over no matching rows returns zero, and an unknown
/// project is treated like a project with no rows.
pub trait MarginRepository: Send + Sync {
    /// Sums sale amount and cost basis over one set of sales lines.
    ///
    /// Only lines of submitted sales orders of `project` that are not
    /// excluded from statistics count, filtered by `axis`.
    fn sales_line_totals(
        &self,
        project: &ProjectKey,
        axis: AnalysisAxis,
        lines: LineSet,
    ) -> impl Future<Output = Result<TheoreticalTotals, MarginError>> + Send;

    /// Reads the running cost totals kept on the project record.
    fn project_cost_fields(
        &self,
        project: &ProjectKey,
    ) -> impl Future<Output = Result<ProjectCostFields, MarginError>> + Send;

    /// Sums purchase order lines of non-cancelled purchase orders.
    fn purchase_order_total(
        &self,
        project: &ProjectKey,
    ) -> impl Future<Output = Result<Decimal, MarginError>> + Send;

    /// Sums the cost of non-cancelled manufacturing records.
    fn manufacturing_total(
        &self,
        project: &ProjectKey,
    ) -> impl Future<Output = Result<Decimal, MarginError>> + Send;

    /// Sums the labour hours sold on counted sales orders.
    fn expected_labour_hours(
        &self,
        project: &ProjectKey,
    ) -> impl Future<Output = Result<Decimal, MarginError>> + Send;

    /// Sums hours logged on non-cancelled timesheets.
    fn timesheet_hours(
        &self,
        project: &ProjectKey,
    ) -> impl Future<Output = Result<Decimal, MarginError>> + Send;

    /// Lists completed projects whose expected end date falls in the
    /// filter's range and that match its optional attributes.
    fn completed_projects(
        &self,
        filter: &ProjectFilter,
    ) -> impl Future<Output = Result<Vec<ProjectSummary>, MarginError>> + Send;
}
