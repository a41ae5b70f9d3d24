//! Report data types.

use std::ops::{Add, AddAssign};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use vt_shared::types::ProjectKey;

use crate::margin::{AnalysisAxis, AxisMargins, MarginCalculator};

/// Period granularity of the margin report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportRange {
    /// One column per calendar month.
    #[default]
    Monthly,
    /// One column per calendar quarter.
    Quarterly,
    /// One column per calendar year.
    Annual,
}

impl ReportRange {
    /// Number of calendar months in one period.
    #[must_use]
    pub const fn months(self) -> u32 {
        match self {
            Self::Monthly => 1,
            Self::Quarterly => 3,
            Self::Annual => 12,
        }
    }
}

/// Project attribute the report rows are grouped by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupBy {
    /// One row per project.
    #[default]
    Project,
    /// One row per company.
    Company,
    /// One row per cost center.
    CostCenter,
    /// One row per insurance company.
    Insurance,
    /// One row per project type.
    ProjectType,
    /// One row per sales sector.
    Sector,
}

/// Reporting attributes of a project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSummary {
    /// Project key.
    pub key: ProjectKey,
    /// Owning company.
    pub company: Option<String>,
    /// Cost center.
    pub cost_center: Option<String>,
    /// Project type.
    pub project_type: Option<String>,
    /// Insurance company.
    pub insurance: Option<String>,
    /// Sales sector.
    pub sector: Option<String>,
    /// Project manager.
    pub project_manager: Option<String>,
    /// Expected end date.
    pub expected_end_date: Option<NaiveDate>,
}

impl ProjectSummary {
    /// Returns the value of the grouping attribute; missing values group
    /// under the empty string.
    #[must_use]
    pub fn group_value(&self, group_by: GroupBy) -> String {
        let value = match group_by {
            GroupBy::Project => return self.key.to_string(),
            GroupBy::Company => &self.company,
            GroupBy::CostCenter => &self.cost_center,
            GroupBy::Insurance => &self.insurance,
            GroupBy::ProjectType => &self.project_type,
            GroupBy::Sector => &self.sector,
        };
        value.clone().unwrap_or_default()
    }
}

/// Selection of completed projects for a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectFilter {
    /// First day of the range (inclusive).
    pub from: NaiveDate,
    /// Last day of the range (inclusive).
    pub to: NaiveDate,
    /// Only this company.
    pub company: Option<String>,
    /// Only this project.
    pub project: Option<ProjectKey>,
    /// Only this cost center.
    pub cost_center: Option<String>,
    /// Only projects of this manager.
    pub project_manager: Option<String>,
    /// Only this insurance company.
    pub insurance: Option<String>,
    /// Only this project type.
    pub project_type: Option<String>,
    /// Only this sector.
    pub sector: Option<String>,
}

impl ProjectFilter {
    /// Creates a filter over a date range with no attribute constraint.
    #[must_use]
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            from,
            to,
            company: None,
            project: None,
            cost_center: None,
            project_manager: None,
            insurance: None,
            project_type: None,
            sector: None,
        }
    }

    /// Returns true if the project ends within the range and matches every
    /// attribute that is set.
    #[must_use]
    pub fn matches(&self, project: &ProjectSummary) -> bool {
        fn accepts(wanted: Option<&String>, actual: Option<&String>) -> bool {
            wanted.is_none_or(|w| actual == Some(w))
        }

        let in_range = project
            .expected_end_date
            .is_some_and(|end| self.from <= end && end <= self.to);

        in_range
            && self.project.as_ref().is_none_or(|key| &project.key == key)
            && accepts(self.company.as_ref(), project.company.as_ref())
            && accepts(self.cost_center.as_ref(), project.cost_center.as_ref())
            && accepts(self.project_manager.as_ref(), project.project_manager.as_ref())
            && accepts(self.insurance.as_ref(), project.insurance.as_ref())
            && accepts(self.project_type.as_ref(), project.project_type.as_ref())
            && accepts(self.sector.as_ref(), project.sector.as_ref())
    }
}

/// Margin report request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarginReportFilter {
    /// Project selection.
    pub projects: ProjectFilter,
    /// Period granularity.
    pub range: ReportRange,
    /// Row grouping.
    pub group_by: GroupBy,
    /// Analysis axis.
    pub axis: AnalysisAxis,
}

impl MarginReportFilter {
    /// Creates a monthly, per-project, global report request.
    #[must_use]
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            projects: ProjectFilter::new(from, to),
            range: ReportRange::default(),
            group_by: GroupBy::default(),
            axis: AnalysisAxis::default(),
        }
    }
}

/// One report column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    /// Stable key, e.g. `2025_01`, `2025_q1` or `2025`.
    pub key: String,
    /// Display label, e.g. `Jan 2025`, `Q1 2025` or `2025`.
    pub label: String,
    /// First day, clipped to the report range.
    pub start: NaiveDate,
    /// Last day, clipped to the report range.
    pub end: NaiveDate,
}

/// Real and theoretical sale/cost sums.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarginTotals {
    /// Real sale.
    pub real_sale: Decimal,
    /// Real cost.
    pub real_cost: Decimal,
    /// Theoretical sale.
    pub theo_sale: Decimal,
    /// Theoretical cost.
    pub theo_cost: Decimal,
}

impl MarginTotals {
    /// Takes the sums of one project's axis margins.
    #[must_use]
    pub fn from_axis(margins: &AxisMargins) -> Self {
        Self {
            real_sale: margins.real_sale,
            real_cost: margins.real_cost,
            theo_sale: margins.theo_sale,
            theo_cost: margins.theo_cost,
        }
    }

    /// Margin figures of these sums.
    #[must_use]
    pub fn figures(&self) -> MarginFigures {
        let amount = self.real_sale - self.real_cost;
        MarginFigures {
            margin: MarginCalculator::margin(self.real_sale, self.real_cost),
            amount,
            diff: amount - (self.theo_sale - self.theo_cost),
        }
    }
}

impl Add for MarginTotals {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            real_sale: self.real_sale + rhs.real_sale,
            real_cost: self.real_cost + rhs.real_cost,
            theo_sale: self.theo_sale + rhs.theo_sale,
            theo_cost: self.theo_cost + rhs.theo_cost,
        }
    }
}

impl AddAssign for MarginTotals {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

/// Figures shown in one report cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarginFigures {
    /// Real margin percentage.
    pub margin: Decimal,
    /// Real margin amount (real sale - real cost).
    pub amount: Decimal,
    /// Real margin amount minus theoretical margin amount.
    pub diff: Decimal,
}

/// Figures of one period in a row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodCell {
    /// Period key.
    pub period: String,
    /// Cell figures.
    #[serde(flatten)]
    pub figures: MarginFigures,
}

/// One report row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarginReportRow {
    /// Group value, or `Total` for the total row.
    pub group: String,
    /// One cell per report period, in period order.
    pub cells: Vec<PeriodCell>,
    /// Figures over the whole row.
    pub total: MarginFigures,
}

/// Margin report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarginReport {
    /// Analysis axis.
    pub axis: AnalysisAxis,
    /// Row grouping.
    pub group_by: GroupBy,
    /// Period granularity.
    pub range: ReportRange,
    /// Report periods.
    pub periods: Vec<Period>,
    /// Group rows, sorted by group value.
    pub rows: Vec<MarginReportRow>,
    /// Total row; absent when there are no rows.
    pub total: Option<MarginReportRow>,
}
