//! In-memory snapshot of a project's transactional records.
//!
//! [`ProjectLedger`] holds the same record kinds the order-management system
//! stores and answers [`MarginRepository`] queries by filtering them, which
//! makes it the reference for the aggregation rules.

use std::collections::HashSet;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use vt_shared::types::ProjectKey;

use super::axis::AnalysisAxis;
use super::error::MarginError;
use super::repository::MarginRepository;
use super::types::{DocStatus, LineSet, ProjectCostFields, TheoreticalTotals};
use crate::reports::{ProjectFilter, ProjectSummary};

/// Project lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ProjectStatus {
    /// Work in progress.
    #[default]
    Open,
    /// Work finished.
    Completed,
    /// Abandoned.
    Cancelled,
}

/// A project and the running totals the host keeps on it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Project {
    /// Project key.
    pub key: ProjectKey,
    /// Lifecycle status.
    pub status: ProjectStatus,
    /// Owning company.
    pub company: Option<String>,
    /// Cost center.
    pub cost_center: Option<String>,
    /// Project type.
    pub project_type: Option<String>,
    /// Insurance company paying for the work, if any.
    pub insurance: Option<String>,
    /// Sales sector.
    pub sector: Option<String>,
    /// Project manager.
    pub project_manager: Option<String>,
    /// Expected end date.
    pub expected_end_date: Option<NaiveDate>,
    /// Accumulated timesheet costing amount.
    pub total_costing_amount: Option<Decimal>,
    /// Accumulated consumed-material cost.
    pub total_consumed_material_cost: Option<Decimal>,
    /// Accumulated expense-claim cost.
    pub total_expense_claim: Option<Decimal>,
}

impl Project {
    /// Creates an open project with no attributes.
    #[must_use]
    pub fn new(key: impl Into<ProjectKey>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    /// Returns the attributes used for reporting.
    #[must_use]
    pub fn summary(&self) -> ProjectSummary {
        ProjectSummary {
            key: self.key.clone(),
            company: self.company.clone(),
            cost_center: self.cost_center.clone(),
            project_type: self.project_type.clone(),
            insurance: self.insurance.clone(),
            sector: self.sector.clone(),
            project_manager: self.project_manager.clone(),
            expected_end_date: self.expected_end_date,
        }
    }

    fn cost_fields(&self) -> ProjectCostFields {
        ProjectCostFields {
            total_costing_amount: self.total_costing_amount.unwrap_or_default(),
            total_consumed_material_cost: self.total_consumed_material_cost.unwrap_or_default(),
            total_expense_claim: self.total_expense_claim.unwrap_or_default(),
        }
    }
}

/// A sales order header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesOrder {
    /// Document name.
    pub name: String,
    /// Project the order belongs to.
    pub project: ProjectKey,
    /// Document status.
    pub docstatus: DocStatus,
    /// Excluded from statistics by the sales team.
    pub exclude_from_statistics: bool,
    /// Labour hours sold.
    pub labour_hours: Option<Decimal>,
}

/// A sales order line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesLineItem {
    /// Parent sales order name.
    pub sales_order: String,
    /// Quantity.
    pub qty: Decimal,
    /// Stored sale amount of the line.
    pub amount: Decimal,
    /// Unit cost basis.
    pub unit_cost_price: Option<Decimal>,
    /// Labor classification of the item.
    pub is_labor: Option<bool>,
    /// Bundle name when the line is a bundle parent.
    pub bundle_name: Option<String>,
}

impl SalesLineItem {
    /// Returns true if the line is a bundle parent, whose components are
    /// counted separately.
    #[must_use]
    pub fn is_bundle(&self) -> bool {
        self.bundle_name.as_deref().is_some_and(|name| !name.is_empty())
    }
}

/// A component of a bundled product sold on a sales order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BundleComponentLineItem {
    /// Parent sales order name.
    pub sales_order: String,
    /// Quantity.
    pub qty: Decimal,
    /// Unit sale rate.
    pub rate: Decimal,
    /// Unit cost basis.
    pub unit_cost_price: Option<Decimal>,
    /// Labor classification of the item.
    pub is_labor: Option<bool>,
}

/// A purchase order header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseOrder {
    /// Document name.
    pub name: String,
    /// Document status.
    pub docstatus: DocStatus,
}

/// A purchase order line; the project is set per line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseOrderLineItem {
    /// Parent purchase order name.
    pub purchase_order: String,
    /// Project charged.
    pub project: Option<ProjectKey>,
    /// Line amount.
    pub amount: Decimal,
}

/// A manufacturing record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManufacturingRecord {
    /// Project charged.
    pub project: ProjectKey,
    /// Document status.
    pub docstatus: DocStatus,
    /// Manufacturing cost.
    pub manufacturing_cost: Option<Decimal>,
}

/// A timesheet header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Timesheet {
    /// Document name.
    pub name: String,
    /// Document status.
    pub docstatus: DocStatus,
}

/// A timesheet line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimesheetEntry {
    /// Parent timesheet name.
    pub timesheet: String,
    /// Project the hours were logged against.
    pub project: Option<ProjectKey>,
    /// Hours logged.
    pub hours: Decimal,
}

/// Snapshot of every record relevant to margins.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectLedger {
    /// Projects.
    pub projects: Vec<Project>,
    /// Sales order headers.
    pub sales_orders: Vec<SalesOrder>,
    /// Sales order lines.
    pub sales_lines: Vec<SalesLineItem>,
    /// Bundle components.
    pub bundle_components: Vec<BundleComponentLineItem>,
    /// Purchase order headers.
    pub purchase_orders: Vec<PurchaseOrder>,
    /// Purchase order lines.
    pub purchase_order_lines: Vec<PurchaseOrderLineItem>,
    /// Manufacturing records.
    pub manufacturing: Vec<ManufacturingRecord>,
    /// Timesheet headers.
    pub timesheets: Vec<Timesheet>,
    /// Timesheet lines.
    pub timesheet_entries: Vec<TimesheetEntry>,
}

impl ProjectLedger {
    fn project(&self, key: &ProjectKey) -> Option<&Project> {
        self.projects.iter().find(|p| &p.key == key)
    }

    /// Sales orders that count for statistics: submitted and not excluded.
    fn counted_sales_orders<'a>(
        &'a self,
        project: &'a ProjectKey,
    ) -> impl Iterator<Item = &'a SalesOrder> {
        self.sales_orders.iter().filter(move |so| {
            &so.project == project
                && so.docstatus == DocStatus::Submitted
                && !so.exclude_from_statistics
        })
    }

    fn active_names<'a>(
        headers: impl Iterator<Item = (&'a str, DocStatus)>,
    ) -> HashSet<&'a str> {
        headers
            .filter(|(_, status)| status.is_active())
            .map(|(name, _)| name)
            .collect()
    }

    fn regular_totals(&self, orders: &HashSet<&str>, axis: AnalysisAxis) -> TheoreticalTotals {
        self.sales_lines
            .iter()
            .filter(|line| orders.contains(line.sales_order.as_str()))
            .filter(|line| !line.is_bundle() && axis.includes(line.is_labor))
            .fold(TheoreticalTotals::ZERO, |acc, line| {
                acc + TheoreticalTotals::new(
                    line.amount,
                    line.qty * line.unit_cost_price.unwrap_or_default(),
                )
            })
    }

    fn bundle_totals(&self, orders: &HashSet<&str>, axis: AnalysisAxis) -> TheoreticalTotals {
        self.bundle_components
            .iter()
            .filter(|line| orders.contains(line.sales_order.as_str()))
            .filter(|line| axis.includes(line.is_labor))
            .fold(TheoreticalTotals::ZERO, |acc, line| {
                acc + TheoreticalTotals::new(
                    line.qty * line.rate,
                    line.qty * line.unit_cost_price.unwrap_or_default(),
                )
            })
    }
}

impl MarginRepository for ProjectLedger {
    async fn sales_line_totals(
        &self,
        project: &ProjectKey,
        axis: AnalysisAxis,
        lines: LineSet,
    ) -> Result<TheoreticalTotals, MarginError> {
        let orders: HashSet<&str> = self
            .counted_sales_orders(project)
            .map(|so| so.name.as_str())
            .collect();

        Ok(match lines {
            LineSet::Regular => self.regular_totals(&orders, axis),
            LineSet::BundleComponents => self.bundle_totals(&orders, axis),
        })
    }

    async fn project_cost_fields(
        &self,
        project: &ProjectKey,
    ) -> Result<ProjectCostFields, MarginError> {
        Ok(self
            .project(project)
            .map(Project::cost_fields)
            .unwrap_or_default())
    }

    async fn purchase_order_total(&self, project: &ProjectKey) -> Result<Decimal, MarginError> {
        let active = Self::active_names(
            self.purchase_orders
                .iter()
                .map(|po| (po.name.as_str(), po.docstatus)),
        );

        Ok(self
            .purchase_order_lines
            .iter()
            .filter(|line| line.project.as_ref() == Some(project))
            .filter(|line| active.contains(line.purchase_order.as_str()))
            .map(|line| line.amount)
            .sum())
    }

    async fn manufacturing_total(&self, project: &ProjectKey) -> Result<Decimal, MarginError> {
        Ok(self
            .manufacturing
            .iter()
            .filter(|record| &record.project == project && record.docstatus.is_active())
            .map(|record| record.manufacturing_cost.unwrap_or_default())
            .sum())
    }

    async fn expected_labour_hours(&self, project: &ProjectKey) -> Result<Decimal, MarginError> {
        Ok(self
            .counted_sales_orders(project)
            .map(|so| so.labour_hours.unwrap_or_default())
            .sum())
    }

    async fn timesheet_hours(&self, project: &ProjectKey) -> Result<Decimal, MarginError> {
        let active = Self::active_names(
            self.timesheets
                .iter()
                .map(|ts| (ts.name.as_str(), ts.docstatus)),
        );

        Ok(self
            .timesheet_entries
            .iter()
            .filter(|entry| entry.project.as_ref() == Some(project))
            .filter(|entry| active.contains(entry.timesheet.as_str()))
            .map(|entry| entry.hours)
            .sum())
    }

    async fn completed_projects(
        &self,
        filter: &ProjectFilter,
    ) -> Result<Vec<ProjectSummary>, MarginError> {
        Ok(self
            .projects
            .iter()
            .filter(|p| p.status == ProjectStatus::Completed)
            .map(Project::summary)
            .filter(|summary| filter.matches(summary))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sales_order(name: &str, project: &str, docstatus: DocStatus) -> SalesOrder {
        SalesOrder {
            name: name.to_string(),
            project: ProjectKey::new(project),
            docstatus,
            exclude_from_statistics: false,
            labour_hours: None,
        }
    }

    fn line(order: &str, amount: Decimal, cost: Decimal, is_labor: Option<bool>) -> SalesLineItem {
        SalesLineItem {
            sales_order: order.to_string(),
            qty: dec!(1),
            amount,
            unit_cost_price: Some(cost),
            is_labor,
            bundle_name: None,
        }
    }

    fn entry(timesheet: &str, project: Option<&ProjectKey>, hours: Decimal) -> TimesheetEntry {
        TimesheetEntry {
            timesheet: timesheet.to_string(),
            project: project.cloned(),
            hours,
        }
    }

    #[tokio::test]
    async fn test_draft_and_cancelled_orders_are_ignored() {
        let project = ProjectKey::new("P");
        let ledger = ProjectLedger {
            sales_orders: vec![
                sales_order("SO-1", "P", DocStatus::Submitted),
                sales_order("SO-2", "P", DocStatus::Draft),
                sales_order("SO-3", "P", DocStatus::Cancelled),
            ],
            sales_lines: vec![
                line("SO-1", dec!(100), dec!(40), None),
                line("SO-2", dec!(1000), dec!(400), None),
                line("SO-3", dec!(1000), dec!(400), None),
            ],
            ..ProjectLedger::default()
        };

        let totals = ledger
            .sales_line_totals(&project, AnalysisAxis::Global, LineSet::Regular)
            .await
            .unwrap();
        assert_eq!(totals, TheoreticalTotals::new(dec!(100), dec!(40)));
    }

    #[tokio::test]
    async fn test_bundle_parents_are_skipped_and_components_counted() {
        let project = ProjectKey::new("P");
        let mut parent = line("SO-1", dec!(900), dec!(0), None);
        parent.bundle_name = Some("Kit vitrage".to_string());
        let mut empty_bundle_name = line("SO-1", dec!(50), dec!(10), None);
        empty_bundle_name.bundle_name = Some(String::new());

        let ledger = ProjectLedger {
            sales_orders: vec![sales_order("SO-1", "P", DocStatus::Submitted)],
            sales_lines: vec![parent, empty_bundle_name],
            bundle_components: vec![BundleComponentLineItem {
                sales_order: "SO-1".to_string(),
                qty: dec!(3),
                rate: dec!(250),
                unit_cost_price: None,
                is_labor: Some(false),
            }],
            ..ProjectLedger::default()
        };

        let regular = ledger
            .sales_line_totals(&project, AnalysisAxis::Global, LineSet::Regular)
            .await
            .unwrap();
        assert_eq!(regular, TheoreticalTotals::new(dec!(50), dec!(10)));

        let bundle = ledger
            .sales_line_totals(&project, AnalysisAxis::Purchases, LineSet::BundleComponents)
            .await
            .unwrap();
        assert_eq!(bundle, TheoreticalTotals::new(dec!(750), dec!(0)));
    }

    #[tokio::test]
    async fn test_unknown_project_yields_zero() {
        let ledger = ProjectLedger::default();
        let missing = ProjectKey::new("MISSING");

        assert_eq!(
            ledger.project_cost_fields(&missing).await.unwrap(),
            ProjectCostFields::default()
        );
        assert_eq!(ledger.purchase_order_total(&missing).await.unwrap(), dec!(0));
        assert_eq!(ledger.manufacturing_total(&missing).await.unwrap(), dec!(0));
        assert_eq!(ledger.timesheet_hours(&missing).await.unwrap(), dec!(0));
    }

    #[tokio::test]
    async fn test_excluded_orders_do_not_count_hours() {
        let project = ProjectKey::new("P");
        let mut counted = sales_order("SO-1", "P", DocStatus::Submitted);
        counted.labour_hours = Some(dec!(12));
        let mut excluded = sales_order("SO-2", "P", DocStatus::Submitted);
        excluded.labour_hours = Some(dec!(30));
        excluded.exclude_from_statistics = true;

        let ledger = ProjectLedger {
            sales_orders: vec![counted, excluded],
            ..ProjectLedger::default()
        };

        assert_eq!(ledger.expected_labour_hours(&project).await.unwrap(), dec!(12));
    }

    #[tokio::test]
    async fn test_timesheet_hours_skip_cancelled_timesheets() {
        let project = ProjectKey::new("P");
        let ledger = ProjectLedger {
            timesheets: vec![
                Timesheet {
                    name: "TS-1".to_string(),
                    docstatus: DocStatus::Draft,
                },
                Timesheet {
                    name: "TS-2".to_string(),
                    docstatus: DocStatus::Cancelled,
                },
            ],
            timesheet_entries: vec![
                entry("TS-1", Some(&project), dec!(7.5)),
                entry("TS-2", Some(&project), dec!(8)),
                entry("TS-1", None, dec!(2)),
            ],
            ..ProjectLedger::default()
        };

        assert_eq!(ledger.timesheet_hours(&project).await.unwrap(), dec!(7.5));
    }
}
