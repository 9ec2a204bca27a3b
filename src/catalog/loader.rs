//! CSV loaders for exported reference data. Each loader parses rows with
//! serde, maps them into validated domain records, and rejects malformed
//! rows with the offending line.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer};

use super::domain::{
    CareerProfile, ChoiceOption, MinimumRequirement, NormRecord, PercentileAnchors, Question,
    QuestionKind, ScaleOption,
};
use crate::assessment::domain::{AgeGroup, Dimension, ModuleCode, OptionKey, QuestionId, Region};

/// Failure raised while reading or mapping reference data.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read reference data: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid reference CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row}: {reason}")]
    Row { row: usize, reason: String },
}

fn row_error(row: usize, reason: impl Into<String>) -> CatalogError {
    CatalogError::Row {
        row,
        reason: reason.into(),
    }
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader)
}

pub fn load_questions_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Question>, CatalogError> {
    let file = std::fs::File::open(path)?;
    load_questions(file)
}

pub fn load_questions<R: Read>(reader: R) -> Result<Vec<Question>, CatalogError> {
    let mut questions = Vec::new();
    for (index, record) in csv_reader(reader).deserialize::<QuestionRow>().enumerate() {
        let row = index + 1;
        let parsed = record?;
        questions.push(parsed.into_question(row)?);
    }
    Ok(questions)
}

pub fn load_norms_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<NormRecord>, CatalogError> {
    let file = std::fs::File::open(path)?;
    load_norms(file)
}

pub fn load_norms<R: Read>(reader: R) -> Result<Vec<NormRecord>, CatalogError> {
    let mut records = Vec::new();
    for (index, record) in csv_reader(reader).deserialize::<NormRow>().enumerate() {
        let row = index + 1;
        let parsed = record?;
        records.push(parsed.into_record(row)?);
    }
    Ok(records)
}

pub fn load_careers_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<CareerProfile>, CatalogError> {
    let file = std::fs::File::open(path)?;
    load_careers(file)
}

/// Careers span one row per module; rows sharing a career id merge into one
/// profile. Module weights must sum to 1 per career.
pub fn load_careers<R: Read>(reader: R) -> Result<Vec<CareerProfile>, CatalogError> {
    let mut order: Vec<String> = Vec::new();
    let mut profiles: BTreeMap<String, CareerProfile> = BTreeMap::new();

    for (index, record) in csv_reader(reader).deserialize::<CareerRow>().enumerate() {
        let row = index + 1;
        let parsed = record?;
        parsed.merge_into(row, &mut order, &mut profiles)?;
    }

    for profile in profiles.values() {
        let sum = profile.weight_sum();
        if (sum - 1.0).abs() > 1e-6 {
            return Err(row_error(
                0,
                format!(
                    "career '{}' module weights sum to {sum:.4}, expected 1",
                    profile.career_id
                ),
            ));
        }
    }

    Ok(order
        .into_iter()
        .filter_map(|career_id| profiles.remove(&career_id))
        .collect())
}

#[derive(Debug, Deserialize)]
struct QuestionRow {
    #[serde(rename = "Question Id")]
    id: String,
    #[serde(rename = "Module")]
    module: String,
    #[serde(rename = "Age Group")]
    age_group: String,
    #[serde(rename = "Dimension")]
    dimension: String,
    #[serde(rename = "Sub Dimension", default, deserialize_with = "empty_as_none")]
    sub_dimension: Option<String>,
    #[serde(rename = "Weight")]
    weight: f64,
    #[serde(rename = "Kind")]
    kind: String,
    #[serde(rename = "Reverse Scored", default)]
    reverse_scored: bool,
    #[serde(rename = "Options")]
    options: String,
}

impl QuestionRow {
    fn into_question(self, row: usize) -> Result<Question, CatalogError> {
        let module = ModuleCode::parse(&self.module)
            .ok_or_else(|| row_error(row, format!("unknown module '{}'", self.module)))?;
        let age_group = AgeGroup::parse(&self.age_group)
            .ok_or_else(|| row_error(row, format!("unknown age group '{}'", self.age_group)))?;
        let dimension = parse_dimension(row, &self.dimension)?;
        if dimension.module() != module {
            return Err(row_error(
                row,
                format!("dimension '{}' does not belong to module '{module}'", self.dimension),
            ));
        }
        if !(self.weight.is_finite() && self.weight > 0.0) {
            return Err(row_error(row, "weight must be a positive number"));
        }

        let kind = match self.kind.trim() {
            "scaled" => {
                let options = parse_pairs(row, &self.options)?
                    .into_iter()
                    .map(|(key, value)| {
                        let value = value.parse::<f64>().map_err(|_| {
                            row_error(row, format!("option '{key}' has non-numeric value '{value}'"))
                        })?;
                        Ok(ScaleOption {
                            key: OptionKey(key),
                            value,
                        })
                    })
                    .collect::<Result<Vec<_>, CatalogError>>()?;
                if options.len() < 2 {
                    return Err(row_error(row, "scaled questions need at least two options"));
                }
                QuestionKind::Scaled {
                    reverse_scored: self.reverse_scored,
                    options,
                }
            }
            "forced_choice" => {
                let choices = parse_pairs(row, &self.options)?
                    .into_iter()
                    .map(|(key, target)| {
                        let target_dimension = parse_dimension(row, &target)?;
                        if target_dimension.module() != module {
                            return Err(row_error(
                                row,
                                format!("choice target '{target}' does not belong to '{module}'"),
                            ));
                        }
                        Ok(ChoiceOption {
                            key: OptionKey(key),
                            dimension: target_dimension,
                        })
                    })
                    .collect::<Result<Vec<_>, CatalogError>>()?;
                if self.reverse_scored {
                    return Err(row_error(row, "forced-choice questions cannot be reverse scored"));
                }
                let [first, second] = <[ChoiceOption; 2]>::try_from(choices).map_err(|_| {
                    row_error(row, "forced-choice questions need exactly two options")
                })?;
                QuestionKind::ForcedChoice { first, second }
            }
            other => return Err(row_error(row, format!("unknown question kind '{other}'"))),
        };

        Ok(Question {
            id: QuestionId(self.id),
            module,
            age_group,
            dimension,
            sub_dimension: self.sub_dimension,
            weight: self.weight,
            kind,
        })
    }
}

#[derive(Debug, Deserialize)]
struct NormRow {
    #[serde(rename = "Module")]
    module: String,
    #[serde(rename = "Age Group")]
    age_group: String,
    #[serde(rename = "Region")]
    region: String,
    #[serde(rename = "Dimension")]
    dimension: String,
    #[serde(rename = "Mean")]
    mean: f64,
    #[serde(rename = "Sd")]
    sd: f64,
    #[serde(rename = "P25")]
    p25: f64,
    #[serde(rename = "P50")]
    p50: f64,
    #[serde(rename = "P75")]
    p75: f64,
    #[serde(rename = "P90")]
    p90: f64,
}

impl NormRow {
    fn into_record(self, row: usize) -> Result<NormRecord, CatalogError> {
        let module = ModuleCode::parse(&self.module)
            .ok_or_else(|| row_error(row, format!("unknown module '{}'", self.module)))?;
        let age_group = AgeGroup::parse(&self.age_group)
            .ok_or_else(|| row_error(row, format!("unknown age group '{}'", self.age_group)))?;
        let dimension = parse_dimension(row, &self.dimension)?;
        if dimension.module() != module {
            return Err(row_error(
                row,
                format!("dimension '{}' does not belong to module '{module}'", self.dimension),
            ));
        }
        if self.region.trim().is_empty() {
            return Err(row_error(row, "region must not be empty"));
        }
        if !(self.sd.is_finite() && self.sd > 0.0) {
            return Err(row_error(row, "sd must be a positive number"));
        }
        let anchors = [self.p25, self.p50, self.p75, self.p90];
        if anchors.windows(2).any(|pair| pair[1] < pair[0]) {
            return Err(row_error(row, "percentile anchors must be non-decreasing"));
        }

        Ok(NormRecord {
            module,
            age_group,
            region: Region::new(self.region),
            dimension,
            mean: self.mean,
            sd: self.sd,
            anchors: PercentileAnchors {
                p25: self.p25,
                p50: self.p50,
                p75: self.p75,
                p90: self.p90,
            },
        })
    }
}

#[derive(Debug, Deserialize)]
struct CareerRow {
    #[serde(rename = "Career Id")]
    career_id: String,
    #[serde(rename = "Job Title")]
    job_title: String,
    #[serde(rename = "Module")]
    module: String,
    #[serde(rename = "Weight")]
    weight: f64,
    #[serde(rename = "Targets")]
    targets: String,
    #[serde(
        rename = "Minimum Requirements",
        default,
        deserialize_with = "empty_as_none"
    )]
    minimum_requirements: Option<String>,
}

impl CareerRow {
    fn merge_into(
        self,
        row: usize,
        order: &mut Vec<String>,
        profiles: &mut BTreeMap<String, CareerProfile>,
    ) -> Result<(), CatalogError> {
        let module = ModuleCode::parse(&self.module)
            .ok_or_else(|| row_error(row, format!("unknown module '{}'", self.module)))?;
        if !(self.weight.is_finite() && self.weight > 0.0) {
            return Err(row_error(row, "weight must be a positive number"));
        }
        if self.career_id.trim().is_empty() {
            return Err(row_error(row, "career id must not be empty"));
        }

        let mut targets = BTreeMap::new();
        for (key, value) in parse_pairs(row, &self.targets)? {
            let dimension = parse_dimension(row, &key)?;
            if dimension.module() != module {
                return Err(row_error(
                    row,
                    format!("target '{key}' does not belong to module '{module}'"),
                ));
            }
            let target = value.parse::<f64>().map_err(|_| {
                row_error(row, format!("target '{key}' has non-numeric value '{value}'"))
            })?;
            targets.insert(dimension, target);
        }
        if targets.is_empty() {
            return Err(row_error(row, "career rows need at least one target"));
        }

        let mut requirements = Vec::new();
        if let Some(listed) = &self.minimum_requirements {
            for (key, value) in parse_pairs(row, listed)? {
                let dimension = parse_dimension(row, &key)?;
                let min_t_score = value.parse::<f64>().map_err(|_| {
                    row_error(row, format!("requirement '{key}' has non-numeric value '{value}'"))
                })?;
                requirements.push(MinimumRequirement {
                    dimension,
                    min_t_score,
                });
            }
        }

        let profile = profiles
            .entry(self.career_id.clone())
            .or_insert_with(|| CareerProfile {
                career_id: self.career_id.clone(),
                job_title: self.job_title.clone(),
                module_weights: BTreeMap::new(),
                targets: BTreeMap::new(),
                minimum_requirements: Vec::new(),
            });
        if profile.module_weights.is_empty() {
            order.push(self.career_id.clone());
        }
        if profile.module_weights.contains_key(&module) {
            return Err(row_error(
                row,
                format!("career '{}' lists module '{module}' twice", self.career_id),
            ));
        }
        profile.module_weights.insert(module, self.weight);
        profile.targets.extend(targets);
        profile.minimum_requirements.extend(requirements);
        Ok(())
    }
}

/// Parses `key=value|key=value` lists used for option sets, targets, and
/// minimum requirements.
fn parse_pairs(row: usize, list: &str) -> Result<Vec<(String, String)>, CatalogError> {
    let mut pairs = Vec::new();
    for part in list.split('|') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let (key, value) = part
            .split_once('=')
            .ok_or_else(|| row_error(row, format!("expected 'key=value', found '{part}'")))?;
        pairs.push((key.trim().to_string(), value.trim().to_string()));
    }
    if pairs.is_empty() {
        return Err(row_error(row, "expected at least one 'key=value' pair"));
    }
    Ok(pairs)
}

fn parse_dimension(row: usize, value: &str) -> Result<Dimension, CatalogError> {
    Dimension::parse(value).ok_or_else(|| row_error(row, format!("unknown dimension '{value}'")))
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
