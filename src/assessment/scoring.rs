//! Raw scoring: reduces a completed response set and its catalog slice into
//! weighted per-dimension totals.

use std::collections::{BTreeMap, HashMap, HashSet};

use super::domain::{Dimension, ItemScore, ModuleCode, ResponseSet, ScoreVector};
use crate::catalog::domain::{Question, QuestionKind};
use crate::error::EngineError;

/// Raw totals plus the per-item scores consumed by the validity assessment.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringOutcome {
    pub vector: ScoreVector,
    pub items: Vec<ItemScore>,
}

fn invalid(module: ModuleCode, reason: impl Into<String>) -> EngineError {
    EngineError::InvalidResponseSet {
        module,
        reason: reason.into(),
    }
}

/// Scores a completed response set against the module's catalog slice.
/// Pure: identical inputs always yield an identical vector.
pub fn score_responses(
    questions: &[Question],
    set: &ResponseSet,
) -> Result<ScoringOutcome, EngineError> {
    let module = set.module();

    if set.attempt.status != super::domain::AttemptStatus::Completed {
        return Err(invalid(
            module,
            format!("attempt '{}' is not completed", set.attempt.id),
        ));
    }
    if questions.is_empty() {
        return Err(invalid(module, "no active questions for this module and age group"));
    }
    if set.attempt.answered_count != questions.len() || set.responses.len() != questions.len() {
        return Err(invalid(
            module,
            format!(
                "completed attempt recorded {} of {} responses",
                set.responses.len(),
                questions.len()
            ),
        ));
    }

    let by_id: HashMap<_, _> = questions
        .iter()
        .map(|question| (&question.id, question))
        .collect();

    // Every targeted dimension starts at zero so skipped items still leave
    // the dimension present in the vector.
    let mut values: BTreeMap<Dimension, f64> = BTreeMap::new();
    for question in questions {
        for dimension in question.target_dimensions() {
            values.entry(dimension).or_insert(0.0);
        }
    }

    let mut items = Vec::new();
    let mut seen: HashSet<&super::domain::QuestionId> = HashSet::new();

    for response in &set.responses {
        let question = match by_id.get(&response.question_id) {
            Some(question) => *question,
            None if response.skipped() => continue,
            None => {
                return Err(invalid(
                    module,
                    format!(
                        "response references question '{}' outside the module catalog",
                        response.question_id
                    ),
                ))
            }
        };
        if !seen.insert(&question.id) {
            return Err(invalid(
                module,
                format!("question '{}' answered more than once", question.id),
            ));
        }

        let Some(selected) = &response.selected else {
            continue;
        };

        match &question.kind {
            QuestionKind::Scaled {
                reverse_scored,
                options,
            } => {
                let option = options
                    .iter()
                    .find(|option| option.key == *selected)
                    .ok_or_else(|| {
                        invalid(
                            module,
                            format!(
                                "question '{}' has no option '{selected}'",
                                question.id
                            ),
                        )
                    })?;
                let value = if *reverse_scored {
                    let (min, max) = question.value_bounds().unwrap_or((0.0, 0.0));
                    (max + min) - option.value
                } else {
                    option.value
                };
                let weighted = question.weight * value;
                *values.entry(question.dimension).or_insert(0.0) += weighted;
                items.push(ItemScore {
                    question_id: question.id.clone(),
                    dimension: question.dimension,
                    sub_dimension: question.sub_dimension.clone(),
                    value: weighted,
                });
            }
            QuestionKind::ForcedChoice { first, second } => {
                let choice = [first, second]
                    .into_iter()
                    .find(|choice| choice.key == *selected)
                    .ok_or_else(|| {
                        invalid(
                            module,
                            format!(
                                "question '{}' has no option '{selected}'",
                                question.id
                            ),
                        )
                    })?;
                *values.entry(choice.dimension).or_insert(0.0) += question.weight;
                items.push(ItemScore {
                    question_id: question.id.clone(),
                    dimension: choice.dimension,
                    sub_dimension: question.sub_dimension.clone(),
                    value: question.weight,
                });
            }
        }
    }

    Ok(ScoringOutcome {
        vector: ScoreVector { module, values },
        items,
    })
}
