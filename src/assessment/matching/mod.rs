//! Career matching: ranks the career catalog against the profile built
//! from every completed module.

mod policy;

pub use policy::{FitLabel, NO_RISKS_NOTE};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::{ModuleCode, StandardizedVector};
use crate::catalog::domain::CareerProfile;
use crate::catalog::CareerCatalog;
use crate::error::EngineError;

pub const DEFAULT_MATCH_LIMIT: usize = 10;

/// Standardized vectors of every module the respondent completed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub completed: BTreeMap<ModuleCode, StandardizedVector>,
}

impl CandidateProfile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, vector: StandardizedVector) {
        self.completed.insert(vector.module, vector);
    }

    fn t_score(&self, dimension: super::domain::Dimension) -> Option<f64> {
        self.completed
            .get(&dimension.module())
            .and_then(|vector| vector.t_score(dimension))
    }
}

/// Similarity contribution of one module to a career match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleSimilarity {
    pub module: ModuleCode,
    pub similarity: f64,
    pub weight: f64,
}

/// One ranked career recommendation. Recomputed in full on every report
/// generation, never patched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerMatch {
    pub career_id: String,
    pub job_title: String,
    pub match_percentage: f64,
    pub fit: FitLabel,
    pub breakdown: Vec<ModuleSimilarity>,
    pub validation_notes: Vec<String>,
    pub rank_position: usize,
}

/// Stateless matcher applying the weighted similarity policy to a career
/// catalog.
#[derive(Debug, Clone)]
pub struct MatchEngine {
    default_limit: usize,
}

impl Default for MatchEngine {
    fn default() -> Self {
        Self::new(DEFAULT_MATCH_LIMIT)
    }
}

impl MatchEngine {
    pub fn new(default_limit: usize) -> Self {
        Self {
            default_limit: default_limit.max(1),
        }
    }

    /// Ranks every career against the candidate profile. Careers with zero
    /// completed-module overlap are excluded, not failed.
    pub fn rank(
        &self,
        candidate: &CandidateProfile,
        careers: &dyn CareerCatalog,
        limit: Option<usize>,
    ) -> Vec<CareerMatch> {
        let mut matches: Vec<CareerMatch> = Vec::new();
        for career in careers.all() {
            match self.evaluate(candidate, &career) {
                Ok(career_match) => matches.push(career_match),
                Err(EngineError::CareerProfileIncomplete { career_id }) => {
                    tracing::debug!(career_id = %career_id, "career excluded from ranking");
                }
                Err(error) => {
                    tracing::debug!(career_id = %career.career_id, %error, "career skipped");
                }
            }
        }

        matches.sort_by(|a, b| {
            b.match_percentage
                .partial_cmp(&a.match_percentage)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.career_id.cmp(&b.career_id))
        });
        matches.truncate(limit.unwrap_or(self.default_limit));
        for (index, career_match) in matches.iter_mut().enumerate() {
            career_match.rank_position = index + 1;
        }
        matches
    }

    /// Scores a single career; `CareerProfileIncomplete` when none of the
    /// career's weighted modules were completed by the respondent.
    fn evaluate(
        &self,
        candidate: &CandidateProfile,
        career: &CareerProfile,
    ) -> Result<CareerMatch, EngineError> {
        let mut breakdown = Vec::new();
        let mut weighted_sum = 0.0;
        let mut weight_total = 0.0;

        for (module, weight) in &career.module_weights {
            let Some(user_vector) = candidate.completed.get(module) else {
                continue;
            };
            let targets: Vec<_> = career.targets_for(*module).collect();
            let Some(similarity) = policy::module_similarity(user_vector, &targets) else {
                continue;
            };
            breakdown.push(ModuleSimilarity {
                module: *module,
                similarity,
                weight: *weight,
            });
            weighted_sum += similarity * weight;
            weight_total += weight;
        }

        if weight_total <= 0.0 {
            return Err(EngineError::CareerProfileIncomplete {
                career_id: career.career_id.clone(),
            });
        }

        // Absent modules drop out of the average; their weight is not
        // redistributed as a neutral score.
        let match_percentage = weighted_sum / weight_total;
        let validation_notes =
            policy::validation_notes(&career.minimum_requirements, |dimension| {
                candidate.t_score(dimension)
            });

        Ok(CareerMatch {
            career_id: career.career_id.clone(),
            job_title: career.job_title.clone(),
            match_percentage,
            fit: FitLabel::from_percentage(match_percentage),
            breakdown,
            validation_notes,
            rank_position: 0,
        })
    }
}
