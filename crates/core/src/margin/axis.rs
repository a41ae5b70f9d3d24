//! Analysis axes used to split a project's sales lines.

use serde::{Deserialize, Serialize};

/// Dimension along which sales lines are filtered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisAxis {
    /// Labor-related lines (installation, "pose").
    Labor,
    /// Everything not flagged as labor (materials, goods).
    Purchases,
    /// No filter.
    #[default]
    Global,
}

impl AnalysisAxis {
    /// Resolves an axis from a free-form label.
    ///
    /// Accepts the English names as well as the labels used in the
    /// order-management UI ("Temps passé", "Achats", "Marge globale"),
    /// case-insensitively. Any other label resolves to [`AnalysisAxis::Global`],
    /// i.e. no filter is applied. The fallback is logged at warn level.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "labor" | "labour" | "temps passé" | "temps passe" => Self::Labor,
            "purchases" | "achats" => Self::Purchases,
            "global" | "marge globale" => Self::Global,
            other => {
                tracing::warn!(axis = other, "unrecognized analysis axis, using global");
                Self::Global
            }
        }
    }

    /// Returns the canonical label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Labor => "labor",
            Self::Purchases => "purchases",
            Self::Global => "global",
        }
    }

    /// Returns true if a line with the given labor flag belongs to this axis.
    ///
    /// A missing flag counts as "not labor", so `Labor` and `Purchases`
    /// partition every line.
    #[must_use]
    pub fn includes(self, is_labor: Option<bool>) -> bool {
        let is_labor = is_labor.unwrap_or(false);
        match self {
            Self::Labor => is_labor,
            Self::Purchases => !is_labor,
            Self::Global => true,
        }
    }
}

impl std::fmt::Display for AnalysisAxis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
