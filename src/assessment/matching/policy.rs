use serde::{Deserialize, Serialize};

use crate::assessment::domain::StandardizedVector;
use crate::catalog::domain::MinimumRequirement;

/// Sentinel note emitted when no minimum-threshold constraint triggered.
pub const NO_RISKS_NOTE: &str = "No risks identified";

/// Categorical bucket summarizing a match percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitLabel {
    PerfectFit,
    StrongFit,
    ModerateFit,
    WeakFit,
    Risk,
}

impl FitLabel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::PerfectFit => "Perfect Fit",
            Self::StrongFit => "Strong Fit",
            Self::ModerateFit => "Moderate Fit",
            Self::WeakFit => "Weak Fit",
            Self::Risk => "Risk",
        }
    }

    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 85.0 {
            Self::PerfectFit
        } else if percentage >= 70.0 {
            Self::StrongFit
        } else if percentage >= 50.0 {
            Self::ModerateFit
        } else if percentage >= 30.0 {
            Self::WeakFit
        } else {
            Self::Risk
        }
    }
}

/// Builds the validation notes for one career: one entry per unmet minimum
/// requirement, or the sentinel when nothing triggered. Requirements on
/// modules the profile has not completed cannot be verified and stay
/// silent.
pub(crate) fn validation_notes(
    requirements: &[MinimumRequirement],
    t_score_of: impl Fn(crate::assessment::domain::Dimension) -> Option<f64>,
) -> Vec<String> {
    let mut notes = Vec::new();
    for requirement in requirements {
        if let Some(actual) = t_score_of(requirement.dimension) {
            if actual < requirement.min_t_score {
                notes.push(format!(
                    "{} T-score {:.0} is below the required minimum of {:.0}",
                    requirement.dimension.label(),
                    actual,
                    requirement.min_t_score
                ));
            }
        }
    }
    if notes.is_empty() {
        notes.push(NO_RISKS_NOTE.to_string());
    }
    notes
}

/// Mean absolute T-score distance turned into a 0-100 similarity over the
/// dimensions both sides share.
pub(crate) fn module_similarity(
    user: &StandardizedVector,
    targets: &[(crate::assessment::domain::Dimension, f64)],
) -> Option<f64> {
    let mut total_distance = 0.0;
    let mut shared = 0usize;
    for (dimension, target) in targets {
        if let Some(t_score) = user.t_score(*dimension) {
            total_distance += (t_score - target).abs();
            shared += 1;
        }
    }
    if shared == 0 {
        return None;
    }
    let similarity = 100.0 - total_distance / shared as f64;
    Some(similarity.clamp(0.0, 100.0))
}
