use crate::assessment::domain::{AgeGroup, Dimension, ModuleCode, Region};

/// Failure taxonomy of the scoring engine. Every variant is deterministic
/// and reproducible given identical inputs; retry policy belongs to the
/// calling layer.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    /// Structural mismatch between a response set and the question catalog,
    /// or an incomplete attempt marked completed.
    #[error("invalid response set for module '{module}': {reason}")]
    InvalidResponseSet { module: ModuleCode, reason: String },

    /// Neither the requested region nor the Global fallback carries a norm
    /// for a required dimension. Standardization never defaults to a
    /// population mean.
    #[error(
        "no norm record for module '{module}', dimension '{dimension}', \
         age group '{age_group}' in region '{region}' or Global"
    )]
    NormNotFound {
        module: ModuleCode,
        age_group: AgeGroup,
        dimension: Dimension,
        region: Region,
    },

    /// A career profile has zero weight overlap with the completed modules;
    /// the career is excluded from ranking, the engine keeps going.
    #[error("career '{career_id}' shares no completed module with the profile")]
    CareerProfileIncomplete { career_id: String },

    /// Regeneration attempted for a report code that was already issued.
    #[error("report code '{report_code}' has already been issued")]
    ReportAlreadyExists { report_code: String },
}
