use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// The six assessment modules supported by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleCode {
    Riasec,
    Mbti,
    Gardner,
    Eq,
    Aptitude,
    Vark,
}

impl ModuleCode {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::Riasec,
            Self::Mbti,
            Self::Gardner,
            Self::Eq,
            Self::Aptitude,
            Self::Vark,
        ]
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::Riasec => "riasec",
            Self::Mbti => "mbti",
            Self::Gardner => "gardner",
            Self::Eq => "eq",
            Self::Aptitude => "aptitude",
            Self::Vark => "vark",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Riasec => "Holland Interest Inventory (RIASEC)",
            Self::Mbti => "Personality Type Indicator (MBTI)",
            Self::Gardner => "Multiple Intelligences (Gardner)",
            Self::Eq => "Emotional Intelligence",
            Self::Aptitude => "General Aptitude",
            Self::Vark => "Learning Style (VARK)",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|module| module.code().eq_ignore_ascii_case(value.trim()))
    }
}

impl fmt::Display for ModuleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Age bands recognised by the norm tables and question catalogs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AgeGroup {
    #[serde(rename = "13-15")]
    Ages13To15,
    #[serde(rename = "16-18")]
    Ages16To18,
    #[serde(rename = "19-25")]
    Ages19To25,
    #[serde(rename = "adult")]
    Adult,
}

impl AgeGroup {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::Ages13To15,
            Self::Ages16To18,
            Self::Ages19To25,
            Self::Adult,
        ]
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::Ages13To15 => "13-15",
            Self::Ages16To18 => "16-18",
            Self::Ages19To25 => "19-25",
            Self::Adult => "adult",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|group| group.code().eq_ignore_ascii_case(value.trim()))
    }
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Norm-table population region. `Global` is the fallback segment every
/// deployment must provide.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Region(String);

impl Region {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into().trim().to_string())
    }

    pub fn global() -> Self {
        Self("Global".to_string())
    }

    pub fn is_global(&self) -> bool {
        self.0.eq_ignore_ascii_case("Global")
    }

    pub fn matches(&self, other: &Region) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Every scored dimension across the six modules. Declaration order within a
/// module is the canonical tie-break order (R,I,A,S,E,C for interests,
/// V,A,R,K for learning styles, and so on), which `Ord` preserves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    // RIASEC
    Realistic,
    Investigative,
    Artistic,
    Social,
    Enterprising,
    Conventional,
    // MBTI preference poles
    Extraversion,
    Introversion,
    Sensing,
    Intuition,
    Thinking,
    Feeling,
    Judging,
    Perceiving,
    // Gardner intelligences
    Linguistic,
    LogicalMathematical,
    Spatial,
    Musical,
    BodilyKinesthetic,
    Interpersonal,
    Intrapersonal,
    Naturalistic,
    // EQ domains
    SelfAwareness,
    SelfRegulation,
    Motivation,
    Empathy,
    SocialSkills,
    // General aptitude subtests
    VerbalReasoning,
    NumericalReasoning,
    AbstractReasoning,
    SpatialReasoning,
    MechanicalReasoning,
    // VARK styles
    Visual,
    Auditory,
    ReadWrite,
    Kinesthetic,
}

impl Dimension {
    pub const ALL: [Self; 36] = [
        Self::Realistic,
        Self::Investigative,
        Self::Artistic,
        Self::Social,
        Self::Enterprising,
        Self::Conventional,
        Self::Extraversion,
        Self::Introversion,
        Self::Sensing,
        Self::Intuition,
        Self::Thinking,
        Self::Feeling,
        Self::Judging,
        Self::Perceiving,
        Self::Linguistic,
        Self::LogicalMathematical,
        Self::Spatial,
        Self::Musical,
        Self::BodilyKinesthetic,
        Self::Interpersonal,
        Self::Intrapersonal,
        Self::Naturalistic,
        Self::SelfAwareness,
        Self::SelfRegulation,
        Self::Motivation,
        Self::Empathy,
        Self::SocialSkills,
        Self::VerbalReasoning,
        Self::NumericalReasoning,
        Self::AbstractReasoning,
        Self::SpatialReasoning,
        Self::MechanicalReasoning,
        Self::Visual,
        Self::Auditory,
        Self::ReadWrite,
        Self::Kinesthetic,
    ];

    pub const fn module(self) -> ModuleCode {
        match self {
            Self::Realistic
            | Self::Investigative
            | Self::Artistic
            | Self::Social
            | Self::Enterprising
            | Self::Conventional => ModuleCode::Riasec,
            Self::Extraversion
            | Self::Introversion
            | Self::Sensing
            | Self::Intuition
            | Self::Thinking
            | Self::Feeling
            | Self::Judging
            | Self::Perceiving => ModuleCode::Mbti,
            Self::Linguistic
            | Self::LogicalMathematical
            | Self::Spatial
            | Self::Musical
            | Self::BodilyKinesthetic
            | Self::Interpersonal
            | Self::Intrapersonal
            | Self::Naturalistic => ModuleCode::Gardner,
            Self::SelfAwareness
            | Self::SelfRegulation
            | Self::Motivation
            | Self::Empathy
            | Self::SocialSkills => ModuleCode::Eq,
            Self::VerbalReasoning
            | Self::NumericalReasoning
            | Self::AbstractReasoning
            | Self::SpatialReasoning
            | Self::MechanicalReasoning => ModuleCode::Aptitude,
            Self::Visual | Self::Auditory | Self::ReadWrite | Self::Kinesthetic => ModuleCode::Vark,
        }
    }

    /// Single-letter code used when composing Holland codes and MBTI types.
    pub const fn letter(self) -> &'static str {
        match self {
            Self::Realistic => "R",
            Self::Investigative => "I",
            Self::Artistic => "A",
            Self::Social => "S",
            Self::Enterprising => "E",
            Self::Conventional => "C",
            Self::Extraversion => "E",
            Self::Introversion => "I",
            Self::Sensing => "S",
            Self::Intuition => "N",
            Self::Thinking => "T",
            Self::Feeling => "F",
            Self::Judging => "J",
            Self::Perceiving => "P",
            Self::Linguistic => "Li",
            Self::LogicalMathematical => "Lm",
            Self::Spatial => "Sp",
            Self::Musical => "Mu",
            Self::BodilyKinesthetic => "Bk",
            Self::Interpersonal => "Ie",
            Self::Intrapersonal => "Ia",
            Self::Naturalistic => "Na",
            Self::SelfAwareness => "Sa",
            Self::SelfRegulation => "Sr",
            Self::Motivation => "Mo",
            Self::Empathy => "Em",
            Self::SocialSkills => "Ss",
            Self::VerbalReasoning => "V",
            Self::NumericalReasoning => "N",
            Self::AbstractReasoning => "Ab",
            Self::SpatialReasoning => "Sp",
            Self::MechanicalReasoning => "Me",
            Self::Visual => "V",
            Self::Auditory => "A",
            Self::ReadWrite => "R",
            Self::Kinesthetic => "K",
        }
    }

    /// Stable snake_case key, matching the serde representation. Used to key
    /// exported score maps and to parse reference data.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Realistic => "realistic",
            Self::Investigative => "investigative",
            Self::Artistic => "artistic",
            Self::Social => "social",
            Self::Enterprising => "enterprising",
            Self::Conventional => "conventional",
            Self::Extraversion => "extraversion",
            Self::Introversion => "introversion",
            Self::Sensing => "sensing",
            Self::Intuition => "intuition",
            Self::Thinking => "thinking",
            Self::Feeling => "feeling",
            Self::Judging => "judging",
            Self::Perceiving => "perceiving",
            Self::Linguistic => "linguistic",
            Self::LogicalMathematical => "logical_mathematical",
            Self::Spatial => "spatial",
            Self::Musical => "musical",
            Self::BodilyKinesthetic => "bodily_kinesthetic",
            Self::Interpersonal => "interpersonal",
            Self::Intrapersonal => "intrapersonal",
            Self::Naturalistic => "naturalistic",
            Self::SelfAwareness => "self_awareness",
            Self::SelfRegulation => "self_regulation",
            Self::Motivation => "motivation",
            Self::Empathy => "empathy",
            Self::SocialSkills => "social_skills",
            Self::VerbalReasoning => "verbal_reasoning",
            Self::NumericalReasoning => "numerical_reasoning",
            Self::AbstractReasoning => "abstract_reasoning",
            Self::SpatialReasoning => "spatial_reasoning",
            Self::MechanicalReasoning => "mechanical_reasoning",
            Self::Visual => "visual",
            Self::Auditory => "auditory",
            Self::ReadWrite => "read_write",
            Self::Kinesthetic => "kinesthetic",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Realistic => "Realistic",
            Self::Investigative => "Investigative",
            Self::Artistic => "Artistic",
            Self::Social => "Social",
            Self::Enterprising => "Enterprising",
            Self::Conventional => "Conventional",
            Self::Extraversion => "Extraversion",
            Self::Introversion => "Introversion",
            Self::Sensing => "Sensing",
            Self::Intuition => "Intuition",
            Self::Thinking => "Thinking",
            Self::Feeling => "Feeling",
            Self::Judging => "Judging",
            Self::Perceiving => "Perceiving",
            Self::Linguistic => "Linguistic",
            Self::LogicalMathematical => "Logical-Mathematical",
            Self::Spatial => "Spatial",
            Self::Musical => "Musical",
            Self::BodilyKinesthetic => "Bodily-Kinesthetic",
            Self::Interpersonal => "Interpersonal",
            Self::Intrapersonal => "Intrapersonal",
            Self::Naturalistic => "Naturalistic",
            Self::SelfAwareness => "Self-Awareness",
            Self::SelfRegulation => "Self-Regulation",
            Self::Motivation => "Motivation",
            Self::Empathy => "Empathy",
            Self::SocialSkills => "Social Skills",
            Self::VerbalReasoning => "Verbal Reasoning",
            Self::NumericalReasoning => "Numerical Reasoning",
            Self::AbstractReasoning => "Abstract Reasoning",
            Self::SpatialReasoning => "Spatial Reasoning",
            Self::MechanicalReasoning => "Mechanical Reasoning",
            Self::Visual => "Visual",
            Self::Auditory => "Auditory",
            Self::ReadWrite => "Read/Write",
            Self::Kinesthetic => "Kinesthetic",
        }
    }

    /// The module's dimensions in canonical order.
    pub fn of_module(module: ModuleCode) -> Vec<Self> {
        Self::ALL
            .into_iter()
            .filter(|dimension| dimension.module() == module)
            .collect()
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|dimension| dimension.key().eq_ignore_ascii_case(value.trim()))
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The four opposed MBTI preference pairs, first-listed pole first. The
/// first pole wins tied tallies.
pub const MBTI_PAIRS: [(Dimension, Dimension); 4] = [
    (Dimension::Extraversion, Dimension::Introversion),
    (Dimension::Sensing, Dimension::Intuition),
    (Dimension::Thinking, Dimension::Feeling),
    (Dimension::Judging, Dimension::Perceiving),
];

/// Identifier wrapper for catalog questions.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct QuestionId(pub String);

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier wrapper for assessment attempts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttemptId(pub String);

impl fmt::Display for AttemptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Key of an answer option within a question's option set.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OptionKey(pub String);

impl fmt::Display for OptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle of one module run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttemptStatus {
    NotStarted,
    InProgress,
    Completed,
    Abandoned,
}

impl AttemptStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::NotStarted => "Not Started",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::Abandoned => "Abandoned",
        }
    }
}

/// One module run for one respondent. Status transitions are serialized by
/// the calling layer; the engine only consumes completed attempts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attempt {
    pub id: AttemptId,
    pub module: ModuleCode,
    pub age_group: AgeGroup,
    /// Norm region of the respondent; the engine's configured default
    /// region applies when absent.
    pub region: Option<Region>,
    pub status: AttemptStatus,
    /// Responses recorded against this attempt, skipped rows included.
    pub answered_count: usize,
}

/// One answered (or explicitly skipped) item, immutable once submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub question_id: QuestionId,
    pub attempt_id: AttemptId,
    /// `None` marks a skipped item; it contributes zero to every dimension.
    pub selected: Option<OptionKey>,
}

impl Response {
    pub fn skipped(&self) -> bool {
        self.selected.is_none()
    }
}

/// A completed attempt together with its recorded responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseSet {
    pub attempt: Attempt,
    pub responses: Vec<Response>,
}

impl ResponseSet {
    pub fn module(&self) -> ModuleCode {
        self.attempt.module
    }
}

/// Raw weighted totals per dimension, a pure function of the response set
/// and catalog slice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreVector {
    pub module: ModuleCode,
    pub values: BTreeMap<Dimension, f64>,
}

impl ScoreVector {
    pub fn get(&self, dimension: Dimension) -> f64 {
        self.values.get(&dimension).copied().unwrap_or(0.0)
    }

    pub fn dimensions(&self) -> impl Iterator<Item = Dimension> + '_ {
        self.values.keys().copied()
    }
}

/// Standardized position of one dimension against its norm segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StandardScore {
    pub t_score: f64,
    pub percentile: f64,
    /// Standard deviation of the norm segment used, kept for the SEM.
    pub norm_sd: f64,
}

/// T-scores and percentiles, one entry per raw-score dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardizedVector {
    pub module: ModuleCode,
    pub entries: BTreeMap<Dimension, StandardScore>,
}

impl StandardizedVector {
    pub fn t_score(&self, dimension: Dimension) -> Option<f64> {
        self.entries.get(&dimension).map(|entry| entry.t_score)
    }

    pub fn mean_t_score(&self) -> f64 {
        if self.entries.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.entries.values().map(|entry| entry.t_score).sum();
        sum / self.entries.len() as f64
    }

    pub fn mean_norm_sd(&self) -> f64 {
        if self.entries.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.entries.values().map(|entry| entry.norm_sd).sum();
        sum / self.entries.len() as f64
    }

    /// Dimensions ordered by descending T-score; canonical declaration order
    /// breaks exact ties.
    pub fn ranked(&self) -> Vec<(Dimension, f64)> {
        let mut ranked: Vec<(Dimension, f64)> = self
            .entries
            .iter()
            .map(|(dimension, entry)| (*dimension, entry.t_score))
            .collect();
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        ranked
    }
}

/// Per-item weighted score retained for reliability estimation. Skipped
/// items never appear here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemScore {
    pub question_id: QuestionId,
    pub dimension: Dimension,
    pub sub_dimension: Option<String>,
    pub value: f64,
}
