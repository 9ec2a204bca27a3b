//! Presentation views matching the field contract consumed by the
//! rendering and export collaborators. All score maps are keyed by the
//! dimensions' snake_case keys and carry integer scores.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{ComprehensiveReport, ModuleFailure, ModuleOutcome, ReportStatus};
use crate::assessment::classify::Interpretation;
use crate::assessment::domain::ModuleCode;
use crate::assessment::matching::CareerMatch;

#[derive(Debug, Clone, Serialize)]
pub struct StandardizedView {
    pub t_scores: BTreeMap<&'static str, i64>,
    pub percentiles: BTreeMap<&'static str, i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PreferencePairView {
    pub pair: String,
    pub first_tally: f64,
    pub second_tally: f64,
    pub selected: &'static str,
    pub clarity: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClarityView {
    pub average: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct IqProjectionView {
    pub score: i32,
    pub classification: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct LearningProfileView {
    pub style: &'static str,
    pub strength: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidityView {
    pub response_consistency: f64,
    pub profile_differentiation: f64,
    pub status: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReliabilityView {
    pub cronbach_alpha: f64,
    pub sem: f64,
}

/// One module's exported result.
#[derive(Debug, Clone, Serialize)]
pub struct ModuleReportView {
    pub module: ModuleCode,
    pub module_label: &'static str,
    pub headline: String,
    pub dominant: Vec<&'static str>,
    pub standardized: StandardizedView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<Vec<PreferencePairView>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preference_clarity: Option<ClarityView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overall_eq: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eq_level: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dominant_intelligences: Option<Vec<&'static str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iq_projection: Option<IqProjectionView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<LearningProfileView>,
    pub validity: ValidityView,
    pub reliability: ReliabilityView,
}

#[derive(Debug, Clone, Serialize)]
pub struct CareerMatchView {
    pub career_id: String,
    pub job_title: String,
    pub match_score: f64,
    pub fit_label: &'static str,
    pub validation_notes: Vec<String>,
    pub rank_position: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModuleFailureView {
    pub module: ModuleCode,
    pub message: String,
}

/// The immutable report envelope handed to presentation collaborators.
#[derive(Debug, Clone, Serialize)]
pub struct ReportEnvelope {
    pub report_code: String,
    pub generated_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub status: &'static str,
    pub confidence_score: u8,
    pub modules: BTreeMap<&'static str, ModuleReportView>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<ModuleFailureView>,
    pub career_matches: Vec<CareerMatchView>,
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

impl ModuleOutcome {
    pub fn view(&self) -> ModuleReportView {
        let mut t_scores = BTreeMap::new();
        let mut percentiles = BTreeMap::new();
        for (dimension, entry) in &self.standardized.entries {
            t_scores.insert(dimension.key(), entry.t_score.round() as i64);
            percentiles.insert(dimension.key(), entry.percentile.round() as i64);
        }

        let dominant = self
            .interpretation
            .dominant_dimensions()
            .into_iter()
            .map(|dimension| dimension.label())
            .collect();

        let mut view = ModuleReportView {
            module: self.module,
            module_label: self.module.label(),
            headline: self.interpretation.headline(),
            dominant,
            standardized: StandardizedView {
                t_scores,
                percentiles,
            },
            code: None,
            type_code: None,
            breakdown: None,
            preference_clarity: None,
            overall_eq: None,
            eq_level: None,
            dominant_intelligences: None,
            iq_projection: None,
            profile: None,
            validity: ValidityView {
                response_consistency: round2(self.validity.response_consistency),
                profile_differentiation: round1(self.validity.profile_differentiation),
                status: self.validity.status.label(),
            },
            reliability: ReliabilityView {
                cronbach_alpha: round2(self.validity.cronbach_alpha),
                sem: round1(self.validity.sem),
            },
        };

        match &self.interpretation {
            Interpretation::Riasec(profile) => {
                view.code = Some(profile.code.clone());
            }
            Interpretation::Mbti(profile) => {
                view.type_code = Some(profile.type_code.clone());
                view.breakdown = Some(
                    profile
                        .pairs
                        .iter()
                        .map(|pair| PreferencePairView {
                            pair: format!("{}/{}", pair.first.letter(), pair.second.letter()),
                            first_tally: pair.first_tally,
                            second_tally: pair.second_tally,
                            selected: pair.selected.letter(),
                            clarity: round1(pair.clarity),
                        })
                        .collect(),
                );
                view.preference_clarity = Some(ClarityView {
                    average: round1(profile.clarity_average),
                });
            }
            Interpretation::Eq(profile) => {
                view.overall_eq = Some(round1(profile.overall));
                view.eq_level = Some(profile.level.label());
            }
            Interpretation::Gardner(profile) => {
                view.dominant_intelligences = Some(
                    profile
                        .dominant
                        .iter()
                        .map(|dimension| dimension.label())
                        .collect(),
                );
            }
            Interpretation::Aptitude(profile) => {
                view.iq_projection = Some(IqProjectionView {
                    score: profile.score,
                    classification: profile.band.label(),
                });
            }
            Interpretation::Vark(profile) => {
                view.profile = Some(LearningProfileView {
                    style: profile.style.label(),
                    strength: profile.strength.label(),
                });
            }
        }

        view
    }
}

impl CareerMatch {
    pub fn view(&self) -> CareerMatchView {
        CareerMatchView {
            career_id: self.career_id.clone(),
            job_title: self.job_title.clone(),
            match_score: round1(self.match_percentage),
            fit_label: self.fit.label(),
            validation_notes: self.validation_notes.clone(),
            rank_position: self.rank_position,
        }
    }
}

impl ModuleFailure {
    pub fn view(&self) -> ModuleFailureView {
        ModuleFailureView {
            module: self.module,
            message: self.message.clone(),
        }
    }
}

impl ComprehensiveReport {
    /// Builds the presentation envelope. The report itself stays immutable;
    /// views are derived on demand.
    pub fn envelope(&self) -> ReportEnvelope {
        ReportEnvelope {
            report_code: self.report_code.clone(),
            generated_at: self.generated_at,
            expires_at: self.expires_at,
            status: self.status.label(),
            confidence_score: self.confidence_score,
            modules: self
                .modules
                .iter()
                .map(|(module, outcome)| (module.code(), outcome.view()))
                .collect(),
            failures: self.failures.iter().map(ModuleFailure::view).collect(),
            career_matches: self.career_matches.iter().map(CareerMatch::view).collect(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.envelope())
    }
}

impl ReportStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Complete => "Complete",
            Self::Flagged => "Flagged",
        }
    }
}
