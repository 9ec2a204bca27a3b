//! Module-specific categorical interpretation of a standardized vector.

use serde::{Deserialize, Serialize};

use super::domain::{Dimension, ModuleCode, ScoreVector, StandardizedVector, MBTI_PAIRS};

/// Holland code summary: top three interest dimensions by T-score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiasecProfile {
    pub code: String,
    pub dominant: Dimension,
}

/// Both tallies and the resolved pole for one MBTI preference pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreferencePair {
    pub first: Dimension,
    pub second: Dimension,
    pub first_tally: f64,
    pub second_tally: f64,
    pub selected: Dimension,
    /// `|first − second| / (first + second) × 100`, 0 when both tallies
    /// are 0.
    pub clarity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MbtiProfile {
    pub type_code: String,
    pub pairs: Vec<PreferencePair>,
    pub clarity_average: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EqLevel {
    High,
    Average,
    NeedsDevelopment,
}

impl EqLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Average => "Average",
            Self::NeedsDevelopment => "Needs Development",
        }
    }

    fn from_overall(overall: f64) -> Self {
        if overall >= 60.0 {
            Self::High
        } else if overall >= 40.0 {
            Self::Average
        } else {
            Self::NeedsDevelopment
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EqProfile {
    pub overall: f64,
    pub level: EqLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GardnerProfile {
    /// Every intelligence at or above a T-score of 60; may be empty.
    pub dominant: Vec<Dimension>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IqBand {
    Superior,
    AboveAverage,
    Average,
    BelowAverage,
    Low,
}

impl IqBand {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Superior => "Superior",
            Self::AboveAverage => "Above Average",
            Self::Average => "Average",
            Self::BelowAverage => "Below Average",
            Self::Low => "Low",
        }
    }

    fn from_score(score: i32) -> Self {
        if score >= 120 {
            Self::Superior
        } else if score >= 110 {
            Self::AboveAverage
        } else if score >= 90 {
            Self::Average
        } else if score >= 80 {
            Self::BelowAverage
        } else {
            Self::Low
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AptitudeProfile {
    pub score: i32,
    pub band: IqBand,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VarkStrength {
    Strong,
    Mixed,
}

impl VarkStrength {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Strong => "Strong",
            Self::Mixed => "Mixed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VarkProfile {
    pub style: Dimension,
    pub strength: VarkStrength,
}

/// Categorical summary of one completed module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interpretation {
    Riasec(RiasecProfile),
    Mbti(MbtiProfile),
    Eq(EqProfile),
    Gardner(GardnerProfile),
    Aptitude(AptitudeProfile),
    Vark(VarkProfile),
}

impl Interpretation {
    /// One-line headline used by the report views.
    pub fn headline(&self) -> String {
        match self {
            Interpretation::Riasec(profile) => format!("Holland code {}", profile.code),
            Interpretation::Mbti(profile) => format!("Type {}", profile.type_code),
            Interpretation::Eq(profile) => {
                format!("{} emotional intelligence", profile.level.label())
            }
            Interpretation::Gardner(profile) => {
                if profile.dominant.is_empty() {
                    "Balanced intelligence profile".to_string()
                } else {
                    let labels: Vec<&str> = profile
                        .dominant
                        .iter()
                        .map(|dimension| dimension.label())
                        .collect();
                    format!("Dominant: {}", labels.join(", "))
                }
            }
            Interpretation::Aptitude(profile) => {
                format!("IQ projection {} ({})", profile.score, profile.band.label())
            }
            Interpretation::Vark(profile) => format!(
                "{} learner ({})",
                profile.style.label(),
                profile.strength.label()
            ),
        }
    }

    /// Dominant dimensions surfaced to presentation collaborators.
    pub fn dominant_dimensions(&self) -> Vec<Dimension> {
        match self {
            Interpretation::Riasec(profile) => vec![profile.dominant],
            Interpretation::Mbti(profile) => {
                profile.pairs.iter().map(|pair| pair.selected).collect()
            }
            Interpretation::Eq(_) | Interpretation::Aptitude(_) => Vec::new(),
            Interpretation::Gardner(profile) => profile.dominant.clone(),
            Interpretation::Vark(profile) => vec![profile.style],
        }
    }

    pub fn preference_clarity(&self) -> Option<f64> {
        match self {
            Interpretation::Mbti(profile) => Some(profile.clarity_average),
            _ => None,
        }
    }
}

/// Derives the module-specific interpretation. Pure over the standardized
/// vector; MBTI additionally reads the raw pair tallies.
pub fn interpret(raw: &ScoreVector, standardized: &StandardizedVector) -> Interpretation {
    match standardized.module {
        ModuleCode::Riasec => Interpretation::Riasec(classify_riasec(standardized)),
        ModuleCode::Mbti => Interpretation::Mbti(classify_mbti(raw)),
        ModuleCode::Eq => Interpretation::Eq(classify_eq(standardized)),
        ModuleCode::Gardner => Interpretation::Gardner(classify_gardner(standardized)),
        ModuleCode::Aptitude => Interpretation::Aptitude(classify_aptitude(standardized)),
        ModuleCode::Vark => Interpretation::Vark(classify_vark(standardized)),
    }
}

fn classify_riasec(standardized: &StandardizedVector) -> RiasecProfile {
    let ranked = standardized.ranked();
    let code: String = ranked
        .iter()
        .take(3)
        .map(|(dimension, _)| dimension.letter())
        .collect();
    let dominant = ranked
        .first()
        .map(|(dimension, _)| *dimension)
        .unwrap_or(Dimension::Realistic);
    RiasecProfile { code, dominant }
}

fn classify_mbti(raw: &ScoreVector) -> MbtiProfile {
    let mut pairs = Vec::with_capacity(MBTI_PAIRS.len());
    let mut type_code = String::with_capacity(4);

    for (first, second) in MBTI_PAIRS {
        let first_tally = raw.get(first);
        let second_tally = raw.get(second);
        // Ties resolve toward the first-listed pole.
        let selected = if second_tally > first_tally {
            second
        } else {
            first
        };
        let total = first_tally + second_tally;
        let clarity = if total > 0.0 {
            (first_tally - second_tally).abs() / total * 100.0
        } else {
            0.0
        };
        type_code.push_str(selected.letter());
        pairs.push(PreferencePair {
            first,
            second,
            first_tally,
            second_tally,
            selected,
            clarity,
        });
    }

    let clarity_average = pairs.iter().map(|pair| pair.clarity).sum::<f64>() / pairs.len() as f64;

    MbtiProfile {
        type_code,
        pairs,
        clarity_average,
    }
}

fn classify_eq(standardized: &StandardizedVector) -> EqProfile {
    let overall = standardized.mean_t_score();
    EqProfile {
        overall,
        level: EqLevel::from_overall(overall),
    }
}

fn classify_gardner(standardized: &StandardizedVector) -> GardnerProfile {
    let dominant = standardized
        .entries
        .iter()
        .filter(|(_, entry)| entry.t_score >= 60.0)
        .map(|(dimension, _)| *dimension)
        .collect();
    GardnerProfile { dominant }
}

fn classify_aptitude(standardized: &StandardizedVector) -> AptitudeProfile {
    let mean_t = standardized.mean_t_score();
    let score = (100.0 + 3.0 * (mean_t - 50.0) / 10.0).round() as i32;
    AptitudeProfile {
        score,
        band: IqBand::from_score(score),
    }
}

fn classify_vark(standardized: &StandardizedVector) -> VarkProfile {
    let ranked = standardized.ranked();
    let style = ranked
        .first()
        .map(|(dimension, _)| *dimension)
        .unwrap_or(Dimension::Visual);
    let strength = match (ranked.first(), ranked.get(1)) {
        (Some((_, top)), Some((_, runner_up))) if top - runner_up > 10.0 => VarkStrength::Strong,
        (Some(_), None) => VarkStrength::Strong,
        _ => VarkStrength::Mixed,
    };
    VarkProfile { style, strength }
}
