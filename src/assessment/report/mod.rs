//! Report assembly: runs the full pipeline per completed module, ranks the
//! career catalog, and seals everything into one immutable report.

mod code;
mod views;

pub use views::{
    CareerMatchView, ClarityView, IqProjectionView, LearningProfileView, ModuleFailureView,
    ModuleReportView, PreferencePairView, ReliabilityView, ReportEnvelope, StandardizedView,
    ValidityView,
};

use std::collections::{BTreeMap, HashSet};
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::classify::Interpretation;
use super::domain::{ModuleCode, ResponseSet, ScoreVector, StandardizedVector};
use super::matching::{CandidateProfile, CareerMatch, MatchEngine};
use super::validity::ValidityReport;
use super::{classify, scoring, standardize, validity};
use crate::catalog::{CareerCatalog, NormTable, QuestionCatalog};
use crate::config::EngineConfig;
use crate::error::EngineError;

/// Issuance bookkeeping for report codes. Implementations must reject a
/// code that was already registered so regenerations surface
/// `ReportAlreadyExists` instead of silently reissuing.
pub trait ReportRegistry: Send + Sync {
    fn register(&self, report_code: &str) -> Result<(), EngineError>;
}

/// Registry backed by a set, sufficient for tests and single-process
/// callers.
#[derive(Debug, Default)]
pub struct InMemoryReportRegistry {
    issued: Mutex<HashSet<String>>,
}

impl ReportRegistry for InMemoryReportRegistry {
    fn register(&self, report_code: &str) -> Result<(), EngineError> {
        let mut issued = match self.issued.lock() {
            Ok(issued) => issued,
            Err(poisoned) => poisoned.into_inner(),
        };
        if !issued.insert(report_code.to_string()) {
            return Err(EngineError::ReportAlreadyExists {
                report_code: report_code.to_string(),
            });
        }
        Ok(())
    }
}

/// Which module set a report request covers. Partial sets are permitted
/// only for single-module requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    SingleModule(ModuleCode),
    Comprehensive,
}

/// One report-generation request over finalized attempts.
#[derive(Debug, Clone)]
pub struct ReportRequest {
    pub kind: ReportKind,
    pub submissions: Vec<ResponseSet>,
    pub generated_at: DateTime<Utc>,
    /// Caller override for the career-match truncation limit.
    pub match_limit: Option<usize>,
}

/// Everything derived for one completed module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleOutcome {
    pub module: ModuleCode,
    pub raw: ScoreVector,
    pub standardized: StandardizedVector,
    pub interpretation: Interpretation,
    pub validity: ValidityReport,
}

/// A required module whose computation failed; the rest of the report is
/// still assembled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleFailure {
    pub module: ModuleCode,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Complete,
    Flagged,
}

/// The immutable aggregate result. A new attempt set produces a new
/// report; nothing here is ever patched in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComprehensiveReport {
    pub report_code: String,
    pub generated_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub status: ReportStatus,
    pub confidence_score: u8,
    pub modules: BTreeMap<ModuleCode, ModuleOutcome>,
    pub failures: Vec<ModuleFailure>,
    pub career_matches: Vec<CareerMatch>,
}

/// Runs scoring, standardization, classification, and validity assessment
/// for one completed module.
pub fn evaluate_module(
    questions: &dyn QuestionCatalog,
    norms: &dyn NormTable,
    set: &ResponseSet,
    config: &EngineConfig,
) -> Result<ModuleOutcome, EngineError> {
    let slice = questions.questions_for(set.attempt.module, set.attempt.age_group);
    let scoring_outcome = scoring::score_responses(&slice, set)?;
    let region = set
        .attempt
        .region
        .clone()
        .unwrap_or_else(|| config.default_region.clone());
    let standardized =
        standardize::standardize(&scoring_outcome.vector, set.attempt.age_group, &region, norms)?;
    let interpretation = classify::interpret(&scoring_outcome.vector, &standardized);
    let validity = validity::assess(
        &scoring_outcome.items,
        &standardized,
        interpretation.preference_clarity(),
        &config.validity,
    );

    Ok(ModuleOutcome {
        module: set.module(),
        raw: scoring_outcome.vector,
        standardized,
        interpretation,
        validity,
    })
}

/// Composes module outcomes, career matches, and issuance metadata into one
/// report. Holds only borrowed collaborators; every invocation is
/// independent.
pub struct ReportAssembler<'a> {
    questions: &'a dyn QuestionCatalog,
    norms: &'a dyn NormTable,
    careers: &'a dyn CareerCatalog,
    registry: &'a dyn ReportRegistry,
    config: &'a EngineConfig,
}

impl<'a> ReportAssembler<'a> {
    pub fn new(
        questions: &'a dyn QuestionCatalog,
        norms: &'a dyn NormTable,
        careers: &'a dyn CareerCatalog,
        registry: &'a dyn ReportRegistry,
        config: &'a EngineConfig,
    ) -> Self {
        Self {
            questions,
            norms,
            careers,
            registry,
            config,
        }
    }

    pub fn assemble(&self, request: ReportRequest) -> Result<ComprehensiveReport, EngineError> {
        let required: Vec<ModuleCode> = match request.kind {
            ReportKind::SingleModule(module) => vec![module],
            ReportKind::Comprehensive => self.config.comprehensive_modules.clone(),
        };

        let mut by_module: BTreeMap<ModuleCode, &ResponseSet> = BTreeMap::new();
        for set in &request.submissions {
            if by_module.insert(set.module(), set).is_some() {
                return Err(EngineError::InvalidResponseSet {
                    module: set.module(),
                    reason: "more than one submission for the same module".to_string(),
                });
            }
        }
        for module in &required {
            if !by_module.contains_key(module) {
                return Err(EngineError::InvalidResponseSet {
                    module: *module,
                    reason: "no completed attempt supplied for a required module".to_string(),
                });
            }
        }

        let mut modules: BTreeMap<ModuleCode, ModuleOutcome> = BTreeMap::new();
        let mut failed: Vec<(ModuleCode, EngineError)> = Vec::new();
        for (module, set) in &by_module {
            match evaluate_module(self.questions, self.norms, set, self.config) {
                Ok(outcome) => {
                    modules.insert(*module, outcome);
                }
                Err(
                    error @ (EngineError::InvalidResponseSet { .. }
                    | EngineError::NormNotFound { .. }),
                ) => {
                    tracing::debug!(module = %module, %error, "module computation failed");
                    failed.push((*module, error));
                }
                Err(error) => return Err(error),
            }
        }

        if modules.is_empty() {
            // Nothing to report on; surface the first failure as-is.
            if let Some((_, error)) = failed.into_iter().next() {
                return Err(error);
            }
            return Err(EngineError::InvalidResponseSet {
                module: required.first().copied().unwrap_or(ModuleCode::Riasec),
                reason: "request contained no submissions".to_string(),
            });
        }

        let mut candidate = CandidateProfile::new();
        for outcome in modules.values() {
            candidate.insert(outcome.standardized.clone());
        }
        let career_matches = MatchEngine::new(self.config.match_limit).rank(
            &candidate,
            self.careers,
            request.match_limit,
        );

        let confidence_score = confidence(&modules, failed.len());
        let status = if failed.is_empty() {
            ReportStatus::Complete
        } else {
            ReportStatus::Flagged
        };

        let report_code = code::derive_report_code(&modules, &career_matches);
        self.registry.register(&report_code)?;

        Ok(ComprehensiveReport {
            report_code,
            generated_at: request.generated_at,
            expires_at: request.generated_at + Duration::days(self.config.retention_days),
            status,
            confidence_score,
            modules,
            failures: failed
                .into_iter()
                .map(|(module, error)| ModuleFailure {
                    module,
                    message: error.to_string(),
                })
                .collect(),
            career_matches,
        })
    }
}

/// Blend of average consistency, average reliability, and module coverage,
/// expressed 0-100.
fn confidence(modules: &BTreeMap<ModuleCode, ModuleOutcome>, failed_count: usize) -> u8 {
    if modules.is_empty() {
        return 0;
    }
    let count = modules.len() as f64;
    let avg_consistency = modules
        .values()
        .map(|outcome| outcome.validity.response_consistency)
        .sum::<f64>()
        / count;
    let avg_alpha = modules
        .values()
        .map(|outcome| outcome.validity.cronbach_alpha)
        .sum::<f64>()
        / count;
    let coverage = count / (count + failed_count as f64);

    let score = 100.0 * (0.5 * avg_consistency + 0.3 * avg_alpha + 0.2 * coverage);
    score.round().clamp(0.0, 100.0) as u8
}
