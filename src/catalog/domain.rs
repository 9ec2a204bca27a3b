use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::assessment::domain::{AgeGroup, Dimension, ModuleCode, OptionKey, QuestionId, Region};

/// One answer option of a scaled question, mapping the option key to its
/// contribution value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleOption {
    pub key: OptionKey,
    pub value: f64,
}

/// One side of a forced-choice question, tagged with the dimension it
/// credits when selected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub key: OptionKey,
    pub dimension: Dimension,
}

/// Scoring shape of a question. The option sets are validated at the
/// catalog boundary so the scorer can match exhaustively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    Scaled {
        reverse_scored: bool,
        options: Vec<ScaleOption>,
    },
    ForcedChoice {
        first: ChoiceOption,
        second: ChoiceOption,
    },
}

/// Reference scoring unit, externally owned and static for the lifetime of
/// an assessment run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub module: ModuleCode,
    pub age_group: AgeGroup,
    /// Owning dimension for scaled items; forced-choice items credit the
    /// selected option's own target dimension instead.
    pub dimension: Dimension,
    /// Construct tag. Two items sharing a dimension and tag form a
    /// consistency pair for the validity assessment.
    pub sub_dimension: Option<String>,
    pub weight: f64,
    pub kind: QuestionKind,
}

impl Question {
    /// Lowest and highest option value of a scaled item, used for the
    /// reverse-scoring transform.
    pub fn value_bounds(&self) -> Option<(f64, f64)> {
        match &self.kind {
            QuestionKind::Scaled { options, .. } => {
                let mut values = options.iter().map(|option| option.value);
                let first = values.next()?;
                let (min, max) = values.fold((first, first), |(min, max), value| {
                    (min.min(value), max.max(value))
                });
                Some((min, max))
            }
            QuestionKind::ForcedChoice { .. } => None,
        }
    }

    /// Dimensions this question can credit.
    pub fn target_dimensions(&self) -> Vec<Dimension> {
        match &self.kind {
            QuestionKind::Scaled { .. } => vec![self.dimension],
            QuestionKind::ForcedChoice { first, second } => {
                vec![first.dimension, second.dimension]
            }
        }
    }
}

/// Percentile anchor raw values stored with each norm segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentileAnchors {
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub p90: f64,
}

impl PercentileAnchors {
    pub const fn pairs(&self) -> [(f64, f64); 4] {
        [
            (25.0, self.p25),
            (50.0, self.p50),
            (75.0, self.p75),
            (90.0, self.p90),
        ]
    }
}

/// Population statistic for one (module, age group, region, dimension)
/// segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormRecord {
    pub module: ModuleCode,
    pub age_group: AgeGroup,
    pub region: Region,
    pub dimension: Dimension,
    pub mean: f64,
    pub sd: f64,
    pub anchors: PercentileAnchors,
}

/// Minimum T-score a career demands on one dimension. Unmet requirements
/// annotate the match, they never exclude the career.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinimumRequirement {
    pub dimension: Dimension,
    pub min_t_score: f64,
}

/// Required trait profile of one career, externally owned reference data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerProfile {
    pub career_id: String,
    pub job_title: String,
    /// Relative weight of each module this career specifies; the loader
    /// verifies they sum to 1.
    pub module_weights: BTreeMap<ModuleCode, f64>,
    /// Target T-scores per dimension.
    pub targets: BTreeMap<Dimension, f64>,
    pub minimum_requirements: Vec<MinimumRequirement>,
}

impl CareerProfile {
    /// Target dimensions belonging to one module.
    pub fn targets_for(&self, module: ModuleCode) -> impl Iterator<Item = (Dimension, f64)> + '_ {
        self.targets
            .iter()
            .filter(move |(dimension, _)| dimension.module() == module)
            .map(|(dimension, target)| (*dimension, *target))
    }

    pub fn weight_sum(&self) -> f64 {
        self.module_weights.values().sum()
    }
}
