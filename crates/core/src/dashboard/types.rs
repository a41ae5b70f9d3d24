//! Project dashboard types.

use rust_decimal::Decimal;
use serde::Serialize;
use vt_shared::config::MarginConfig;
use vt_shared::types::{Currency, Money, ProjectKey};

use crate::margin::{
    AnalysisAxis, AxisMargins, Indicator, LabourHours, MarginCalculator, ProjectMargins,
    RealCostBreakdown, TheoreticalTotals,
};

/// Everything shown on a project's margin dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectDashboard {
    /// Project key.
    pub project: ProjectKey,
    /// Global margins.
    pub margins: ProjectMargins,
    /// Rating of the global real margin.
    pub margin_indicator: Indicator,
    /// Margins of the purchases axis.
    pub purchases: AxisMargins,
    /// Rating of the purchases real margin.
    pub purchases_indicator: Indicator,
    /// Sold vs. logged hours.
    pub hours: LabourHours,
    /// Rating of the logged hours.
    pub hours_indicator: Indicator,
    /// Whether the labour section is worth showing.
    pub show_labour_section: bool,
    /// Amounts in the configured currency.
    pub financials: ProjectFinancials,
}

/// Money figures of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProjectFinancials {
    /// Amount ordered (theoretical sale).
    pub ordered: Money,
    /// Purchase orders and expense claims.
    pub purchases: Money,
    /// Manufacturing cost.
    pub manufacturing: Money,
    /// Timesheet costing amount.
    pub labour: Money,
    /// Consumed material cost.
    pub consumed_material: Money,
    /// Real sale minus total real cost.
    pub profit: Money,
}

impl ProjectFinancials {
    fn new(margins: &ProjectMargins, real: &RealCostBreakdown, currency: Currency) -> Self {
        let money = |amount: Decimal| Money::new(amount, currency);
        Self {
            ordered: money(margins.theo_sale),
            purchases: money(real.purchase_order() + real.expense_claim()),
            manufacturing: money(real.manufacturing()),
            labour: money(real.costing_amount()),
            consumed_material: money(real.consumed_material()),
            profit: money(margins.real_sale - real.total()),
        }
    }
}

impl ProjectDashboard {
    /// Assembles the dashboard from already loaded figures.
    #[must_use]
    pub fn build(
        project: ProjectKey,
        labor: TheoreticalTotals,
        purchases: TheoreticalTotals,
        real: &RealCostBreakdown,
        hours: LabourHours,
        config: &MarginConfig,
    ) -> Self {
        let margins = MarginCalculator::project_margins(labor, purchases, real);
        let purchases = MarginCalculator::axis_margins(AnalysisAxis::Purchases, purchases, real);
        let band = config.margin_warning_band;

        Self {
            project,
            margin_indicator: Indicator::for_margin(margins.real_margin, margins.theo_margin, band),
            purchases_indicator: Indicator::for_margin(
                purchases.real_margin,
                purchases.theo_margin,
                band,
            ),
            hours_indicator: Indicator::for_hours(
                hours.actual,
                hours.expected,
                config.hours_warning_ratio,
            ),
            show_labour_section: hours.has_hours(),
            financials: ProjectFinancials::new(&margins, real, config.currency),
            margins,
            purchases,
            hours,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::margin::ProjectCostFields;
    use rust_decimal_macros::dec;

    #[test]
    fn test_dashboard_figures() {
        let real = RealCostBreakdown::new(
            ProjectCostFields {
                total_costing_amount: dec!(600),
                total_consumed_material_cost: dec!(50),
                total_expense_claim: dec!(20),
            },
            dec!(280),
            dec!(10),
        );

        let dashboard = ProjectDashboard::build(
            ProjectKey::new("P"),
            TheoreticalTotals::new(dec!(1000), dec!(400)),
            TheoreticalTotals::new(dec!(500), dec!(300)),
            &real,
            LabourHours::new(dec!(40), dec!(43)),
            &MarginConfig::default(),
        );

        // theo 53.33 %, real (1500 - 960) / 1500 = 36 %
        assert_eq!(dashboard.margins.real_margin, dec!(36));
        assert_eq!(dashboard.margin_indicator, Indicator::Danger);
        // purchases: theo 40 %, real (500 - 360) / 500 = 28 %
        assert_eq!(dashboard.purchases.real_cost, dec!(360));
        assert_eq!(dashboard.purchases_indicator, Indicator::Danger);
        assert_eq!(dashboard.hours_indicator, Indicator::Warning);
        assert!(dashboard.show_labour_section);

        let f = dashboard.financials;
        assert_eq!(f.ordered.amount, dec!(1500));
        assert_eq!(f.purchases.amount, dec!(300));
        assert_eq!(f.manufacturing.amount, dec!(10));
        assert_eq!(f.labour.amount, dec!(600));
        assert_eq!(f.consumed_material.amount, dec!(50));
        assert_eq!(f.profit.amount, dec!(540));
        assert_eq!(f.profit.currency, Currency::Eur);
    }

    #[test]
    fn test_labour_section_hidden_without_hours() {
        let dashboard = ProjectDashboard::build(
            ProjectKey::new("P"),
            TheoreticalTotals::ZERO,
            TheoreticalTotals::ZERO,
            &RealCostBreakdown::default(),
            LabourHours::new(dec!(0), dec!(0)),
            &MarginConfig::default(),
        );

        assert!(!dashboard.show_labour_section);
        assert_eq!(dashboard.margin_indicator, Indicator::Success);
        assert_eq!(dashboard.hours_indicator, Indicator::Success);
        assert_eq!(dashboard.financials.profit.amount, Decimal::ZERO);
    }
}
