//! Traffic-light classification of margins and hours.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Traffic-light status shown next to a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Indicator {
    /// On or better than plan.
    Success,
    /// Slightly worse than plan.
    Warning,
    /// Clearly worse than plan.
    Danger,
}

impl Indicator {
    /// Rates a real margin against the theoretical one.
    ///
    /// Success when the real margin reaches the theoretical margin, warning
    /// while it stays within `warning_band` percentage points under it.
    #[must_use]
    pub fn for_margin(real: Decimal, theoretical: Decimal, warning_band: Decimal) -> Self {
        if real >= theoretical {
            Self::Success
        } else if real > theoretical - warning_band {
            Self::Warning
        } else {
            Self::Danger
        }
    }

    /// Rates logged hours against sold hours.
    ///
    /// Success within budget, warning below `expected * warning_ratio`.
    #[must_use]
    pub fn for_hours(actual: Decimal, expected: Decimal, warning_ratio: Decimal) -> Self {
        if actual <= expected {
            Self::Success
        } else if actual < expected * warning_ratio {
            Self::Warning
        } else {
            Self::Danger
        }
    }
}
