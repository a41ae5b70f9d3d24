//! Margin data types.

use std::ops::Add;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::axis::AnalysisAxis;

/// Document lifecycle status as recorded by the order-management system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocStatus {
    /// Saved but not submitted.
    Draft,
    /// Submitted (contracted).
    Submitted,
    /// Cancelled (voided).
    Cancelled,
}

impl DocStatus {
    /// Returns the numeric docstatus.
    #[must_use]
    pub const fn code(self) -> i16 {
        match self {
            Self::Draft => 0,
            Self::Submitted => 1,
            Self::Cancelled => 2,
        }
    }

    /// Returns true unless the document is cancelled.
    #[must_use]
    pub const fn is_active(self) -> bool {
        !matches!(self, Self::Cancelled)
    }
}

/// Which set of sales lines an aggregate runs over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineSet {
    /// Sales order lines that are not bundle parents.
    Regular,
    /// Components of bundled products.
    BundleComponents,
}

/// Theoretical sale and cost totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TheoreticalTotals {
    /// Total sale amount.
    pub sale: Decimal,
    /// Total cost basis.
    pub cost: Decimal,
}

impl TheoreticalTotals {
    /// Zero totals.
    pub const ZERO: Self = Self {
        sale: Decimal::ZERO,
        cost: Decimal::ZERO,
    };

    /// Creates totals from a sale and a cost amount.
    #[must_use]
    pub const fn new(sale: Decimal, cost: Decimal) -> Self {
        Self { sale, cost }
    }

    /// Creates totals from nullable aggregate results.
    #[must_use]
    pub fn from_nullable(sale: Option<Decimal>, cost: Option<Decimal>) -> Self {
        Self {
            sale: sale.unwrap_or_default(),
            cost: cost.unwrap_or_default(),
        }
    }
}

impl Add for TheoreticalTotals {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            sale: self.sale + rhs.sale,
            cost: self.cost + rhs.cost,
        }
    }
}

/// Running totals kept on the project record by the host system.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectCostFields {
    /// Accumulated timesheet costing amount.
    pub total_costing_amount: Decimal,
    /// Accumulated consumed-material cost.
    pub total_consumed_material_cost: Decimal,
    /// Accumulated expense-claim cost.
    pub total_expense_claim: Decimal,
}

/// One of the independent sources of real cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostSource {
    /// Labor cost from timesheets (project running total).
    Timesheet,
    /// Purchase order lines referencing the project.
    PurchaseOrder,
    /// Consumed material (project running total).
    ConsumedMaterial,
    /// Expense claims (project running total).
    ExpenseClaim,
    /// Manufacturing records referencing the project.
    Manufacturing,
}

impl CostSource {
    /// All sources.
    pub const ALL: [Self; 5] = [
        Self::Timesheet,
        Self::PurchaseOrder,
        Self::ConsumedMaterial,
        Self::ExpenseClaim,
        Self::Manufacturing,
    ];
}

/// The set of cost sources that participate in an axis' real cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CostProfile {
    sources: &'static [CostSource],
}

impl CostProfile {
    /// Every source.
    pub const ALL: Self = Self {
        sources: &CostSource::ALL,
    };

    /// Labor only.
    pub const LABOR: Self = Self {
        sources: &[CostSource::Timesheet],
    };

    /// Everything bought or produced for the project.
    pub const PURCHASES: Self = Self {
        sources: &[
            CostSource::PurchaseOrder,
            CostSource::ConsumedMaterial,
            CostSource::ExpenseClaim,
            CostSource::Manufacturing,
        ],
    };

    /// Returns the profile used for an axis.
    #[must_use]
    pub const fn for_axis(axis: AnalysisAxis) -> Self {
        match axis {
            AnalysisAxis::Labor => Self::LABOR,
            AnalysisAxis::Purchases => Self::PURCHASES,
            AnalysisAxis::Global => Self::ALL,
        }
    }

    /// Returns the participating sources.
    #[must_use]
    pub const fn sources(&self) -> &'static [CostSource] {
        self.sources
    }
}

/// Real (incurred) cost of a project, by source.
///
/// `total` is always the sum of the five components; the only way to build
/// a breakdown is through [`RealCostBreakdown::new`] or
/// [`RealCostBreakdown::with_component`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RealCostBreakdown {
    costing_amount: Decimal,
    purchase_order: Decimal,
    consumed_material: Decimal,
    expense_claim: Decimal,
    manufacturing: Decimal,
    total: Decimal,
}

impl RealCostBreakdown {
    /// Builds a breakdown from the project running totals and the two
    /// queried sums.
    #[must_use]
    pub fn new(fields: ProjectCostFields, purchase_order: Decimal, manufacturing: Decimal) -> Self {
        let mut breakdown = Self {
            costing_amount: fields.total_costing_amount,
            purchase_order,
            consumed_material: fields.total_consumed_material_cost,
            expense_claim: fields.total_expense_claim,
            manufacturing,
            total: Decimal::ZERO,
        };
        breakdown.total = breakdown.total_for(CostProfile::ALL);
        breakdown
    }

    /// Returns a copy with one component replaced and the total recomputed.
    #[must_use]
    pub fn with_component(mut self, source: CostSource, value: Decimal) -> Self {
        match source {
            CostSource::Timesheet => self.costing_amount = value,
            CostSource::PurchaseOrder => self.purchase_order = value,
            CostSource::ConsumedMaterial => self.consumed_material = value,
            CostSource::ExpenseClaim => self.expense_claim = value,
            CostSource::Manufacturing => self.manufacturing = value,
        }
        self.total = self.total_for(CostProfile::ALL);
        self
    }

    /// Returns the amount of one source.
    #[must_use]
    pub const fn component(&self, source: CostSource) -> Decimal {
        match source {
            CostSource::Timesheet => self.costing_amount,
            CostSource::PurchaseOrder => self.purchase_order,
            CostSource::ConsumedMaterial => self.consumed_material,
            CostSource::ExpenseClaim => self.expense_claim,
            CostSource::Manufacturing => self.manufacturing,
        }
    }

    /// Sums the sources that participate in `profile`.
    #[must_use]
    pub fn total_for(&self, profile: CostProfile) -> Decimal {
        profile
            .sources()
            .iter()
            .map(|source| self.component(*source))
            .sum()
    }

    /// Timesheet costing amount.
    #[must_use]
    pub const fn costing_amount(&self) -> Decimal {
        self.costing_amount
    }

    /// Purchase order total.
    #[must_use]
    pub const fn purchase_order(&self) -> Decimal {
        self.purchase_order
    }

    /// Consumed material cost.
    #[must_use]
    pub const fn consumed_material(&self) -> Decimal {
        self.consumed_material
    }

    /// Expense claim total.
    #[must_use]
    pub const fn expense_claim(&self) -> Decimal {
        self.expense_claim
    }

    /// Manufacturing cost.
    #[must_use]
    pub const fn manufacturing(&self) -> Decimal {
        self.manufacturing
    }

    /// Sum of all five sources.
    #[must_use]
    pub const fn total(&self) -> Decimal {
        self.total
    }
}

/// Theoretical vs. real margins of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectMargins {
    /// Theoretical sale (labor + purchases).
    pub theo_sale: Decimal,
    /// Theoretical cost (labor + purchases).
    pub theo_cost: Decimal,
    /// Theoretical margin percentage.
    pub theo_margin: Decimal,
    /// Sale basis for the real margin (same as `theo_sale`).
    pub real_sale: Decimal,
    /// Real cost over all sources.
    pub real_cost: Decimal,
    /// Real margin percentage.
    pub real_margin: Decimal,
    /// `real_margin - theo_margin`, in percentage points.
    pub margin_diff: Decimal,
}

/// Theoretical vs. real margins restricted to one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisMargins {
    /// Axis the figures apply to.
    pub axis: AnalysisAxis,
    /// Theoretical sale of the axis.
    pub theo_sale: Decimal,
    /// Theoretical cost of the axis.
    pub theo_cost: Decimal,
    /// Theoretical margin percentage.
    pub theo_margin: Decimal,
    /// Sale basis for the real margin.
    pub real_sale: Decimal,
    /// Real cost over the axis' cost profile.
    pub real_cost: Decimal,
    /// Real margin percentage.
    pub real_margin: Decimal,
    /// `real_margin - theo_margin`, in percentage points.
    pub margin_diff: Decimal,
}

/// Expected vs. actual labour hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabourHours {
    /// Hours sold on the project's sales orders.
    pub expected: Decimal,
    /// Hours logged on timesheets.
    pub actual: Decimal,
    /// `actual - expected`; positive means over budget.
    pub diff: Decimal,
}

impl LabourHours {
    /// Builds the comparison.
    #[must_use]
    pub fn new(expected: Decimal, actual: Decimal) -> Self {
        Self {
            expected,
            actual,
            diff: actual - expected,
        }
    }

    /// Returns true if any hours were sold or logged.
    #[must_use]
    pub fn has_hours(&self) -> bool {
        self.expected > Decimal::ZERO || self.actual > Decimal::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn breakdown() -> RealCostBreakdown {
        RealCostBreakdown::new(
            ProjectCostFields {
                total_costing_amount: dec!(100),
                total_consumed_material_cost: dec!(20),
                total_expense_claim: dec!(5),
            },
            dec!(300),
            dec!(75),
        )
    }

    #[test]
    fn test_doc_status_codes() {
        assert_eq!(DocStatus::Draft.code(), 0);
        assert_eq!(DocStatus::Submitted.code(), 1);
        assert_eq!(DocStatus::Cancelled.code(), 2);
        assert!(DocStatus::Draft.is_active());
        assert!(!DocStatus::Cancelled.is_active());
    }

    #[test]
    fn test_theoretical_totals_from_nullable() {
        assert_eq!(
            TheoreticalTotals::from_nullable(None, None),
            TheoreticalTotals::ZERO
        );
        assert_eq!(
            TheoreticalTotals::from_nullable(Some(dec!(10)), None),
            TheoreticalTotals::new(dec!(10), dec!(0))
        );
    }

    #[test]
    fn test_theoretical_totals_add() {
        let sum = TheoreticalTotals::new(dec!(1000), dec!(400))
            + TheoreticalTotals::new(dec!(500), dec!(300));
        assert_eq!(sum, TheoreticalTotals::new(dec!(1500), dec!(700)));
    }

    #[test]
    fn test_breakdown_total_is_sum_of_components() {
        let costs = breakdown();
        assert_eq!(costs.costing_amount(), dec!(100));
        assert_eq!(costs.purchase_order(), dec!(300));
        assert_eq!(costs.consumed_material(), dec!(20));
        assert_eq!(costs.expense_claim(), dec!(5));
        assert_eq!(costs.manufacturing(), dec!(75));
        assert_eq!(costs.total(), dec!(500));
    }

    #[test]
    fn test_cost_profiles() {
        let costs = breakdown();
        assert_eq!(costs.total_for(CostProfile::ALL), dec!(500));
        assert_eq!(costs.total_for(CostProfile::LABOR), dec!(100));
        assert_eq!(costs.total_for(CostProfile::PURCHASES), dec!(400));
        assert_eq!(
            CostProfile::for_axis(AnalysisAxis::Purchases),
            CostProfile::PURCHASES
        );
        assert!(!CostProfile::PURCHASES.sources().contains(&CostSource::Timesheet));
    }

    #[test]
    fn test_labor_and_purchase_profiles_partition_all_sources() {
        for source in CostSource::ALL {
            assert_ne!(
                CostProfile::LABOR.sources().contains(&source),
                CostProfile::PURCHASES.sources().contains(&source)
            );
            assert!(CostProfile::ALL.sources().contains(&source));
        }
    }

    #[test]
    fn test_labour_hours_diff() {
        let hours = LabourHours::new(dec!(40), dec!(46));
        assert_eq!(hours.diff, dec!(6));
        assert!(hours.has_hours());
        assert!(!LabourHours::new(dec!(0), dec!(0)).has_hours());
    }
}
