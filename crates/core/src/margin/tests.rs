//! Property-based tests for the margin module.

use proptest::prelude::*;
use rust_decimal::Decimal;
use vt_shared::types::ProjectKey;

use super::axis::AnalysisAxis;
use super::calculator::MarginCalculator;
use super::ledger::{BundleComponentLineItem, ProjectLedger, SalesLineItem, SalesOrder};
use super::repository::MarginRepository;
use super::types::{
    CostProfile, CostSource, DocStatus, LineSet, ProjectCostFields, RealCostBreakdown,
};

fn cents(value: i64) -> Decimal {
    Decimal::new(value, 2)
}

fn labor_flag() -> impl Strategy<Value = Option<bool>> {
    prop_oneof![Just(None), Just(Some(true)), Just(Some(false))]
}

fn source() -> impl Strategy<Value = CostSource> {
    prop::sample::select(CostSource::ALL.to_vec())
}

fn breakdown(parts: [i64; 5]) -> RealCostBreakdown {
    RealCostBreakdown::new(
        ProjectCostFields {
            total_costing_amount: cents(parts[0]),
            total_consumed_material_cost: cents(parts[2]),
            total_expense_claim: cents(parts[3]),
        },
        cents(parts[1]),
        cents(parts[4]),
    )
}

proptest! {
    /// A zero sale always yields a zero margin.
    #[test]
    fn test_margin_is_zero_without_sale(cost in -1_000_000_000i64..1_000_000_000) {
        prop_assert_eq!(MarginCalculator::margin(Decimal::ZERO, cents(cost)), Decimal::ZERO);
    }

    /// margin * sale / 100 gives back the absolute margin.
    #[test]
    fn test_margin_formula(
        sale in 1i64..1_000_000_000,
        cost in 0i64..1_000_000_000,
    ) {
        let sale = cents(sale);
        let cost = cents(cost);

        let margin = MarginCalculator::margin(sale, cost);

        prop_assert_eq!((margin * sale / Decimal::ONE_HUNDRED).round_dp(6), sale - cost);
        prop_assert!(margin <= Decimal::ONE_HUNDRED);
    }

    /// The total is the sum of the five components.
    #[test]
    fn test_real_cost_total_is_sum(parts in prop::array::uniform5(0i64..1_000_000_000)) {
        let costs = breakdown(parts);
        let sum: Decimal = parts.iter().copied().map(cents).sum();

        prop_assert_eq!(costs.total(), sum);
    }

    /// Increasing one component raises the total by the same delta.
    #[test]
    fn test_real_cost_component_delta(
        parts in prop::array::uniform5(0i64..1_000_000_000),
        source in source(),
        delta in 0i64..1_000_000_000,
    ) {
        let costs = breakdown(parts);
        let raised = costs.with_component(source, costs.component(source) + cents(delta));

        prop_assert_eq!(raised.total() - costs.total(), cents(delta));
    }

    /// Labor and purchases cost profiles split the total exactly.
    #[test]
    fn test_cost_profiles_partition_total(parts in prop::array::uniform5(0i64..1_000_000_000)) {
        let costs = breakdown(parts);

        prop_assert_eq!(
            costs.total_for(CostProfile::LABOR) + costs.total_for(CostProfile::PURCHASES),
            costs.total()
        );
    }

    /// Labor + Purchases theoretical totals equal the Global totals, on both
    /// line sets, whatever the labor flags.
    #[test]
    fn test_axes_partition_theoretical_totals(
        lines in prop::collection::vec((0i64..10_000_000, 0i64..10_000_000, labor_flag()), 0..12),
        components in prop::collection::vec(
            (1i64..50, 0i64..100_000, 0i64..100_000, labor_flag()),
            0..6,
        ),
    ) {
        let project = ProjectKey::new("P");
        let ledger = ProjectLedger {
            sales_orders: vec![SalesOrder {
                name: "SO-1".to_string(),
                project: project.clone(),
                docstatus: DocStatus::Submitted,
                exclude_from_statistics: false,
                labour_hours: None,
            }],
            sales_lines: lines
                .into_iter()
                .map(|(amount, cost, is_labor)| SalesLineItem {
                    sales_order: "SO-1".to_string(),
                    qty: Decimal::ONE,
                    amount: cents(amount),
                    unit_cost_price: Some(cents(cost)),
                    is_labor,
                    bundle_name: None,
                })
                .collect(),
            bundle_components: components
                .into_iter()
                .map(|(qty, rate, cost, is_labor)| BundleComponentLineItem {
                    sales_order: "SO-1".to_string(),
                    qty: Decimal::from(qty),
                    rate: cents(rate),
                    unit_cost_price: Some(cents(cost)),
                    is_labor,
                })
                .collect(),
            ..ProjectLedger::default()
        };

        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            for set in [LineSet::Regular, LineSet::BundleComponents] {
                let labor = ledger
                    .sales_line_totals(&project, AnalysisAxis::Labor, set)
                    .await
                    .unwrap();
                let purchases = ledger
                    .sales_line_totals(&project, AnalysisAxis::Purchases, set)
                    .await
                    .unwrap();
                let global = ledger
                    .sales_line_totals(&project, AnalysisAxis::Global, set)
                    .await
                    .unwrap();

                prop_assert_eq!(labor + purchases, global);
            }
            Ok(())
        })?;
    }
}
