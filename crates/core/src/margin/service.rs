//! Margin service: repository aggregates in, margin figures out.

use std::sync::Arc;

use futures::stream::{self, StreamExt, TryStreamExt};
use futures::try_join;
use tracing::{debug, info};
use vt_shared::config::MarginConfig;
use vt_shared::types::ProjectKey;

use super::axis::AnalysisAxis;
use super::calculator::MarginCalculator;
use super::error::MarginError;
use super::repository::MarginRepository;
use super::types::{
    AxisMargins, LabourHours, LineSet, ProjectMargins, RealCostBreakdown, TheoreticalTotals,
};
use crate::dashboard::ProjectDashboard;
use crate::reports::{periods, MarginReport, MarginReportBuilder, MarginReportFilter, ReportError};

/// Margin service for project profitability figures.
///
/// Stateless apart from its configuration; each call reads a fresh snapshot
/// through the repository, and each aggregate is queried once per axis.
pub struct MarginService<R: MarginRepository> {
    repo: Arc<R>,
    config: MarginConfig,
}

impl<R: MarginRepository> MarginService<R> {
    /// Create a new margin service.
    #[must_use]
    pub fn new(repo: Arc<R>, config: MarginConfig) -> Self {
        Self { repo, config }
    }

    /// Theoretical sale and cost of a project on one axis.
    ///
    /// Regular sales lines and bundle components are summed together.
    pub async fn theoretical(
        &self,
        project: &ProjectKey,
        axis: AnalysisAxis,
    ) -> Result<TheoreticalTotals, MarginError> {
        let (regular, bundle) = try_join!(
            self.repo.sales_line_totals(project, axis, LineSet::Regular),
            self.repo
                .sales_line_totals(project, axis, LineSet::BundleComponents),
        )?;

        let totals = regular + bundle;
        debug!(
            project = %project,
            axis = %axis,
            sale = %totals.sale,
            cost = %totals.cost,
            "theoretical totals"
        );
        Ok(totals)
    }

    /// Real cost of a project over its five sources.
    pub async fn real_cost(&self, project: &ProjectKey) -> Result<RealCostBreakdown, MarginError> {
        let (fields, purchase_order, manufacturing) = try_join!(
            self.repo.project_cost_fields(project),
            self.repo.purchase_order_total(project),
            self.repo.manufacturing_total(project),
        )?;

        let breakdown = RealCostBreakdown::new(fields, purchase_order, manufacturing);
        debug!(project = %project, total = %breakdown.total(), "real cost");
        Ok(breakdown)
    }

    /// Theoretical vs. real margins of a project.
    pub async fn project_margins(
        &self,
        project: &ProjectKey,
    ) -> Result<ProjectMargins, MarginError> {
        let (labor, purchases, real) = try_join!(
            self.theoretical(project, AnalysisAxis::Labor),
            self.theoretical(project, AnalysisAxis::Purchases),
            self.real_cost(project),
        )?;

        Ok(MarginCalculator::project_margins(labor, purchases, &real))
    }

    /// Theoretical vs. real margins of a project restricted to one axis.
    pub async fn axis_margins(
        &self,
        project: &ProjectKey,
        axis: AnalysisAxis,
    ) -> Result<AxisMargins, MarginError> {
        let (theoretical, real) =
            try_join!(self.theoretical(project, axis), self.real_cost(project))?;

        Ok(MarginCalculator::axis_margins(axis, theoretical, &real))
    }

    /// Sold vs. logged labour hours of a project.
    pub async fn labour_hours(&self, project: &ProjectKey) -> Result<LabourHours, MarginError> {
        let (expected, actual) = try_join!(
            self.repo.expected_labour_hours(project),
            self.repo.timesheet_hours(project),
        )?;

        Ok(MarginCalculator::labour_hours(expected, actual))
    }

    /// Every figure of the project dashboard.
    pub async fn project_dashboard(
        &self,
        project: &ProjectKey,
    ) -> Result<ProjectDashboard, MarginError> {
        let (labor, purchases, real, hours) = try_join!(
            self.theoretical(project, AnalysisAxis::Labor),
            self.theoretical(project, AnalysisAxis::Purchases),
            self.real_cost(project),
            self.labour_hours(project),
        )?;

        Ok(ProjectDashboard::build(
            project.clone(),
            labor,
            purchases,
            &real,
            hours,
            &self.config,
        ))
    }

    /// Margin report of completed projects, grouped and split by period.
    ///
    /// At most `report_concurrency` projects are loaded at the same time.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::InvalidDateRange` if `from` is after `to`.
    pub async fn margin_report(
        &self,
        filter: &MarginReportFilter,
    ) -> Result<MarginReport, ReportError> {
        let report_periods = periods(filter.projects.from, filter.projects.to, filter.range)?;

        let projects = self.repo.completed_projects(&filter.projects).await?;
        let dated: Vec<_> = projects
            .into_iter()
            .filter_map(|p| p.expected_end_date.map(|end| (p, end)))
            .collect();

        let margins: Vec<AxisMargins> = stream::iter(&dated)
            .map(|(project, _)| self.axis_margins(&project.key, filter.axis))
            .buffered(self.config.report_concurrency.max(1))
            .try_collect()
            .await?;

        let mut builder = MarginReportBuilder::new(filter.range);
        for ((project, end_date), axis_margins) in dated.iter().zip(&margins) {
            builder.add(project.group_value(filter.group_by), *end_date, axis_margins);
        }

        let report = builder.build(filter, report_periods);
        info!(
            axis = %filter.axis,
            projects = dated.len(),
            rows = report.rows.len(),
            "margin report built"
        );
        Ok(report)
    }
}
