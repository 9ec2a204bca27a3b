//! The scoring core: raw scoring, standardization, classification,
//! validity assessment, career matching, and report assembly. Every
//! component is a pure function of its immutable inputs, so concurrent
//! scoring requests need no shared state and no locking.

pub mod classify;
pub mod domain;
pub mod matching;
pub mod report;
pub mod scoring;
pub mod standardize;
pub mod validity;

#[cfg(test)]
mod tests;

pub use classify::{
    interpret, AptitudeProfile, EqLevel, EqProfile, GardnerProfile, Interpretation, IqBand,
    MbtiProfile, PreferencePair, RiasecProfile, VarkProfile, VarkStrength,
};
pub use domain::{
    AgeGroup, Attempt, AttemptId, AttemptStatus, Dimension, ItemScore, ModuleCode, OptionKey,
    QuestionId, Region, Response, ResponseSet, ScoreVector, StandardScore, StandardizedVector,
    MBTI_PAIRS,
};
pub use matching::{
    CandidateProfile, CareerMatch, FitLabel, MatchEngine, ModuleSimilarity, DEFAULT_MATCH_LIMIT,
    NO_RISKS_NOTE,
};
pub use report::{
    evaluate_module, ComprehensiveReport, InMemoryReportRegistry, ModuleFailure, ModuleOutcome,
    ReportAssembler, ReportEnvelope, ReportKind, ReportRegistry, ReportRequest, ReportStatus,
};
pub use scoring::{score_responses, ScoringOutcome};
pub use standardize::standardize;
pub use validity::{assess, ValidityReport, ValidityStatus, ValidityThresholds};
