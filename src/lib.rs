//! Orienta turns a respondent's raw answers to six psychometric modules
//! (RIASEC, MBTI, Gardner, EQ, General Aptitude, VARK) into standardized,
//! explainable scores and ranks a career catalog against the combined
//! profile.
//!
//! The crate is a synchronous library boundary: reference data (question
//! catalogs, norm tables, career profiles) is loaded up front behind the
//! collaborator traits in [`catalog`], scoring runs as pure functions over
//! immutable inputs, and [`assessment::ReportAssembler`] returns one
//! immutable report per finalized attempt set. Routing, rendering, and
//! persistence live in the calling layers.

pub mod assessment;
pub mod catalog;
pub mod config;
pub mod error;
pub mod telemetry;

pub use assessment::{
    evaluate_module, CandidateProfile, CareerMatch, ComprehensiveReport, FitLabel,
    InMemoryReportRegistry, Interpretation, MatchEngine, ModuleCode, ModuleOutcome,
    ReportAssembler, ReportEnvelope, ReportKind, ReportRegistry, ReportRequest, ResponseSet,
    ScoreVector, StandardizedVector, ValidityReport,
};
pub use catalog::{
    CareerCatalog, InMemoryCareerCatalog, InMemoryNormTable, InMemoryQuestionCatalog, NormTable,
    QuestionCatalog,
};
pub use config::EngineConfig;
pub use error::EngineError;
