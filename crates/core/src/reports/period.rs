//! Report period generation.

use chrono::{Datelike, Days, Months, NaiveDate};

use super::error::ReportError;
use super::types::{Period, ReportRange};

/// Key of the period containing `date`: `2025_01`, `2025_q1` or `2025`.
#[must_use]
pub fn period_key(date: NaiveDate, range: ReportRange) -> String {
    match range {
        ReportRange::Monthly => date.format("%Y_%m").to_string(),
        ReportRange::Quarterly => format!("{}_q{}", date.year(), quarter(date)),
        ReportRange::Annual => date.year().to_string(),
    }
}

/// Label of the period containing `date`: `Jan 2025`, `Q1 2025` or `2025`.
#[must_use]
pub fn period_label(date: NaiveDate, range: ReportRange) -> String {
    match range {
        ReportRange::Monthly => date.format("%b %Y").to_string(),
        ReportRange::Quarterly => format!("Q{} {}", quarter(date), date.year()),
        ReportRange::Annual => date.year().to_string(),
    }
}

/// Builds the consecutive periods covering `from..=to`.
///
/// The first and last periods are clipped to the range.
///
/// # Errors
///
/// Returns `ReportError::InvalidDateRange` if `from` is after `to`.
pub fn periods(
    from: NaiveDate,
    to: NaiveDate,
    range: ReportRange,
) -> Result<Vec<Period>, ReportError> {
    if from > to {
        return Err(ReportError::InvalidDateRange {
            start: from,
            end: to,
        });
    }

    let mut result = Vec::new();
    let mut current = period_start(from, range);

    while let Some(start) = current.filter(|start| *start <= to) {
        let next = start.checked_add_months(Months::new(range.months()));
        let last_day = next
            .and_then(|next| next.checked_sub_days(Days::new(1)))
            .unwrap_or(NaiveDate::MAX);

        result.push(Period {
            key: period_key(start, range),
            label: period_label(start, range),
            start: start.max(from),
            end: last_day.min(to),
        });
        current = next;
    }

    Ok(result)
}

fn quarter(date: NaiveDate) -> u32 {
    date.month0() / 3 + 1
}

fn period_start(date: NaiveDate, range: ReportRange) -> Option<NaiveDate> {
    let month = match range {
        ReportRange::Monthly => date.month(),
        ReportRange::Quarterly => (quarter(date) - 1) * 3 + 1,
        ReportRange::Annual => 1,
    };
    NaiveDate::from_ymd_opt(date.year(), month, 1)
}
