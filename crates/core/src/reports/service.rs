//! Margin report assembly.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;

use super::period::period_key;
use super::types::{
    MarginFigures, MarginReport, MarginReportFilter, MarginReportRow, MarginTotals, Period,
    PeriodCell, ReportRange,
};
use crate::margin::AxisMargins;

/// Label of the total row.
pub const TOTAL_ROW: &str = "Total";

/// Accumulates project margins per group and period.
///
/// Groups are kept sorted so rows come out ordered by group value.
#[derive(Debug, Clone)]
pub struct MarginReportBuilder {
    range: ReportRange,
    groups: BTreeMap<String, HashMap<String, MarginTotals>>,
    periods: HashMap<String, MarginTotals>,
    grand: MarginTotals,
}

impl MarginReportBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new(range: ReportRange) -> Self {
        Self {
            range,
            groups: BTreeMap::new(),
            periods: HashMap::new(),
            grand: MarginTotals::default(),
        }
    }

    /// Adds one project, ending on `end_date`, to `group`.
    pub fn add(&mut self, group: String, end_date: NaiveDate, margins: &AxisMargins) {
        let key = period_key(end_date, self.range);
        let totals = MarginTotals::from_axis(margins);

        *self
            .groups
            .entry(group)
            .or_default()
            .entry(key.clone())
            .or_default() += totals;
        *self.periods.entry(key).or_default() += totals;
        self.grand += totals;
    }

    /// Builds the report over `periods`.
    #[must_use]
    pub fn build(self, filter: &MarginReportFilter, periods: Vec<Period>) -> MarginReport {
        let rows: Vec<MarginReportRow> = self
            .groups
            .iter()
            .map(|(group, by_period)| {
                let (cells, total) = Self::cells(&periods, by_period);
                MarginReportRow {
                    group: group.clone(),
                    cells,
                    total: total.figures(),
                }
            })
            .collect();

        let total = (!rows.is_empty()).then(|| {
            let (cells, _) = Self::cells(&periods, &self.periods);
            MarginReportRow {
                group: TOTAL_ROW.to_string(),
                cells,
                total: self.grand.figures(),
            }
        });

        MarginReport {
            axis: filter.axis,
            group_by: filter.group_by,
            range: filter.range,
            periods,
            rows,
            total,
        }
    }

    /// One cell per period, plus the sums over those periods.
    fn cells(
        periods: &[Period],
        by_period: &HashMap<String, MarginTotals>,
    ) -> (Vec<PeriodCell>, MarginTotals) {
        let mut row_total = MarginTotals::default();
        let cells: Vec<PeriodCell> = periods
            .iter()
            .map(|period| {
                let figures = by_period
                    .get(&period.key)
                    .map_or_else(MarginFigures::default, |totals| {
                        row_total += *totals;
                        totals.figures()
                    });
                PeriodCell {
                    period: period.key.clone(),
                    figures,
                }
            })
            .collect();
        (cells, row_total)
    }
}
