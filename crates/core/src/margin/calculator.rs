//! Margin formulas.

use rust_decimal::Decimal;

use super::axis::AnalysisAxis;
use super::types::{
    AxisMargins, CostProfile, LabourHours, ProjectMargins, RealCostBreakdown, TheoreticalTotals,
};

/// Pure margin calculations over already aggregated figures.
pub struct MarginCalculator;

impl MarginCalculator {
    /// Percentage margin: `(sale - cost) / sale * 100`.
    ///
    /// A zero sale yields a margin of exactly zero, whatever the cost.
    #[must_use]
    pub fn margin(sale: Decimal, cost: Decimal) -> Decimal {
        if sale.is_zero() {
            Decimal::ZERO
        } else {
            (sale - cost) / sale * Decimal::ONE_HUNDRED
        }
    }

    /// Combines the labor and purchases theoretical totals with the real
    /// cost of a project.
    ///
    /// The theoretical sale doubles as the real sale basis: invoiced sales
    /// are not tracked separately.
    #[must_use]
    pub fn project_margins(
        labor: TheoreticalTotals,
        purchases: TheoreticalTotals,
        real: &RealCostBreakdown,
    ) -> ProjectMargins {
        let theoretical = labor + purchases;
        let theo_margin = Self::margin(theoretical.sale, theoretical.cost);

        let real_sale = theoretical.sale;
        let real_cost = real.total();
        let real_margin = Self::margin(real_sale, real_cost);

        ProjectMargins {
            theo_sale: theoretical.sale,
            theo_cost: theoretical.cost,
            theo_margin,
            real_sale,
            real_cost,
            real_margin,
            margin_diff: real_margin - theo_margin,
        }
    }

    /// Margins restricted to one axis: the axis' theoretical totals against
    /// the cost sources of the axis' [`CostProfile`].
    #[must_use]
    pub fn axis_margins(
        axis: AnalysisAxis,
        theoretical: TheoreticalTotals,
        real: &RealCostBreakdown,
    ) -> AxisMargins {
        let theo_margin = Self::margin(theoretical.sale, theoretical.cost);
        let real_cost = real.total_for(CostProfile::for_axis(axis));
        let real_margin = Self::margin(theoretical.sale, real_cost);

        AxisMargins {
            axis,
            theo_sale: theoretical.sale,
            theo_cost: theoretical.cost,
            theo_margin,
            real_sale: theoretical.sale,
            real_cost,
            real_margin,
            margin_diff: real_margin - theo_margin,
        }
    }

    /// Expected vs. actual hours.
    #[must_use]
    pub fn labour_hours(expected: Decimal, actual: Decimal) -> LabourHours {
        LabourHours::new(expected, actual)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::margin::types::{CostSource, ProjectCostFields};
    use rust_decimal_macros::dec;

    fn real_costs(timesheet: Decimal, purchase_order: Decimal) -> RealCostBreakdown {
        RealCostBreakdown::new(
            ProjectCostFields {
                total_costing_amount: timesheet,
                ..ProjectCostFields::default()
            },
            purchase_order,
            Decimal::ZERO,
        )
    }

    #[test]
    fn test_margin_formula() {
        assert_eq!(MarginCalculator::margin(dec!(1000), dec!(400)), dec!(60));
        assert_eq!(MarginCalculator::margin(dec!(1500), dec!(700)).round_dp(2), dec!(53.33));
        assert_eq!(MarginCalculator::margin(dec!(100), dec!(150)), dec!(-50));
    }

    #[test]
    fn test_margin_zero_sale_is_zero() {
        assert_eq!(MarginCalculator::margin(dec!(0), dec!(0)), dec!(0));
        assert_eq!(MarginCalculator::margin(dec!(0), dec!(250)), dec!(0));
    }

    #[test]
    fn test_project_margins_scenario() {
        let labor = TheoreticalTotals::new(dec!(1000), dec!(400));
        let purchases = TheoreticalTotals::new(dec!(500), dec!(300));
        let real = real_costs(dec!(450), dec!(350));

        let margins = MarginCalculator::project_margins(labor, purchases, &real);

        assert_eq!(margins.theo_sale, dec!(1500));
        assert_eq!(margins.theo_cost, dec!(700));
        assert_eq!(margins.theo_margin.round_dp(2), dec!(53.33));
        assert_eq!(margins.real_sale, dec!(1500));
        assert_eq!(margins.real_cost, dec!(800));
        assert_eq!(margins.real_margin.round_dp(2), dec!(46.67));
        assert_eq!(margins.margin_diff.round_dp(2), dec!(-6.67));
    }

    #[test]
    fn test_project_margins_empty_project() {
        let margins = MarginCalculator::project_margins(
            TheoreticalTotals::ZERO,
            TheoreticalTotals::ZERO,
            &RealCostBreakdown::default(),
        );

        assert_eq!(margins.theo_margin, dec!(0));
        assert_eq!(margins.real_margin, dec!(0));
        assert_eq!(margins.margin_diff, dec!(0));
    }

    #[test]
    fn test_axis_margins_use_axis_cost_profile() {
        let real = real_costs(dec!(450), dec!(350))
            .with_component(CostSource::Manufacturing, dec!(50));

        let labor = MarginCalculator::axis_margins(
            AnalysisAxis::Labor,
            TheoreticalTotals::new(dec!(1000), dec!(400)),
            &real,
        );
        assert_eq!(labor.real_cost, dec!(450));
        assert_eq!(labor.real_margin, dec!(55));
        assert_eq!(labor.theo_margin, dec!(60));
        assert_eq!(labor.margin_diff, dec!(-5));

        let purchases = MarginCalculator::axis_margins(
            AnalysisAxis::Purchases,
            TheoreticalTotals::new(dec!(500), dec!(300)),
            &real,
        );
        assert_eq!(purchases.real_cost, dec!(400));
        assert_eq!(purchases.real_margin, dec!(20));

        let global = MarginCalculator::axis_margins(
            AnalysisAxis::Global,
            TheoreticalTotals::new(dec!(1500), dec!(700)),
            &real,
        );
        assert_eq!(global.real_cost, dec!(850));
    }

    #[test]
    fn test_labour_hours_over_budget() {
        let hours = MarginCalculator::labour_hours(dec!(40), dec!(46));
        assert_eq!(hours.expected, dec!(40));
        assert_eq!(hours.actual, dec!(46));
        assert_eq!(hours.diff, dec!(6));
    }
}
