use std::collections::BTreeMap;

use crate::assessment::domain::{
    AgeGroup, Attempt, AttemptId, AttemptStatus, Dimension, ModuleCode, OptionKey, QuestionId,
    Region, Response, ResponseSet, ScoreVector, StandardScore, StandardizedVector,
};
use crate::catalog::domain::{
    ChoiceOption, NormRecord, PercentileAnchors, Question, QuestionKind, ScaleOption,
};
use crate::catalog::{InMemoryCareerCatalog, InMemoryNormTable, InMemoryQuestionCatalog};
use crate::config::EngineConfig;

pub(super) fn scaled_question(
    id: &str,
    dimension: Dimension,
    sub_dimension: Option<&str>,
    weight: f64,
    reverse_scored: bool,
) -> Question {
    let options = (1..=5)
        .map(|key| ScaleOption {
            key: OptionKey(key.to_string()),
            value: (key - 1) as f64,
        })
        .collect();
    Question {
        id: QuestionId(id.to_string()),
        module: dimension.module(),
        age_group: AgeGroup::Ages13To15,
        dimension,
        sub_dimension: sub_dimension.map(str::to_string),
        weight,
        kind: QuestionKind::Scaled {
            reverse_scored,
            options,
        },
    }
}

pub(super) fn forced_question(id: &str, first: Dimension, second: Dimension) -> Question {
    Question {
        id: QuestionId(id.to_string()),
        module: first.module(),
        age_group: AgeGroup::Ages13To15,
        dimension: first,
        sub_dimension: None,
        weight: 1.0,
        kind: QuestionKind::ForcedChoice {
            first: ChoiceOption {
                key: OptionKey("a".to_string()),
                dimension: first,
            },
            second: ChoiceOption {
                key: OptionKey("b".to_string()),
                dimension: second,
            },
        },
    }
}

/// Twelve scaled interest questions, two per dimension in canonical order.
/// `r2` is reverse scored.
pub(super) fn riasec_questions() -> Vec<Question> {
    let dimensions = Dimension::of_module(ModuleCode::Riasec);
    let tags = [
        "hands_on",
        "analysis",
        "creative",
        "helping",
        "leading",
        "organizing",
    ];
    let mut questions = Vec::new();
    for (index, (dimension, tag)) in dimensions.into_iter().zip(tags).enumerate() {
        let base = index * 2;
        questions.push(scaled_question(
            &format!("r{}", base + 1),
            dimension,
            Some(tag),
            1.0,
            false,
        ));
        questions.push(scaled_question(
            &format!("r{}", base + 2),
            dimension,
            Some(tag),
            1.0,
            base + 2 == 2,
        ));
    }
    questions
}

/// Eight forced-choice questions, two per preference pair.
pub(super) fn mbti_questions() -> Vec<Question> {
    let pairs = crate::assessment::domain::MBTI_PAIRS;
    let mut questions = Vec::new();
    for (index, (first, second)) in pairs.into_iter().enumerate() {
        let base = index * 2;
        questions.push(forced_question(&format!("m{}", base + 1), first, second));
        questions.push(forced_question(&format!("m{}", base + 2), first, second));
    }
    questions
}

pub(super) fn norm(
    dimension: Dimension,
    region: &str,
    mean: f64,
    sd: f64,
    anchors: [f64; 4],
) -> NormRecord {
    NormRecord {
        module: dimension.module(),
        age_group: AgeGroup::Ages13To15,
        region: Region::new(region),
        dimension,
        mean,
        sd,
        anchors: PercentileAnchors {
            p25: anchors[0],
            p50: anchors[1],
            p75: anchors[2],
            p90: anchors[3],
        },
    }
}

/// Global norms sized to the two-question fixture scale: raw totals range
/// 0-8, centred at 4.
pub(super) fn riasec_norms() -> Vec<NormRecord> {
    Dimension::of_module(ModuleCode::Riasec)
        .into_iter()
        .map(|dimension| norm(dimension, "Global", 4.0, 2.0, [2.0, 4.0, 6.0, 7.0]))
        .collect()
}

/// Global norms for the preference tallies: raw totals range 0-2 per pole.
pub(super) fn mbti_norms() -> Vec<NormRecord> {
    Dimension::of_module(ModuleCode::Mbti)
        .into_iter()
        .map(|dimension| norm(dimension, "Global", 1.0, 0.5, [0.0, 1.0, 1.5, 2.0]))
        .collect()
}

pub(super) fn completed_attempt(module: ModuleCode, answered_count: usize) -> Attempt {
    Attempt {
        id: AttemptId(format!("att-{}", module.code())),
        module,
        age_group: AgeGroup::Ages13To15,
        region: Some(Region::new("France")),
        status: AttemptStatus::Completed,
        answered_count,
    }
}

pub(super) fn response_set(
    questions: &[Question],
    attempt: Attempt,
    answers: &[Option<&str>],
) -> ResponseSet {
    let responses = questions
        .iter()
        .zip(answers)
        .map(|(question, answer)| Response {
            question_id: question.id.clone(),
            attempt_id: attempt.id.clone(),
            selected: answer.map(|key| OptionKey(key.to_string())),
        })
        .collect();
    ResponseSet { attempt, responses }
}

/// A differentiated interest profile: strong Realistic, weak Artistic.
pub(super) fn riasec_answers() -> Vec<Option<&'static str>> {
    vec![
        Some("5"), // r1 Realistic, value 4
        Some("1"), // r2 Realistic, reverse scored: 4 - 0 = 4
        Some("4"), // r3 Investigative, 3
        Some("3"), // r4 Investigative, 2
        Some("1"), // r5 Artistic, 0
        Some("2"), // r6 Artistic, 1
        Some("4"), // r7 Social, 3
        Some("4"), // r8 Social, 3
        Some("2"), // r9 Enterprising, 1
        Some("3"), // r10 Enterprising, 2
        Some("3"), // r11 Conventional, 2
        Some("4"), // r12 Conventional, 3
    ]
}

pub(super) fn riasec_response_set() -> ResponseSet {
    let questions = riasec_questions();
    let attempt = completed_attempt(ModuleCode::Riasec, questions.len());
    response_set(&questions, attempt, &riasec_answers())
}

/// An extraverted ESTJ answer sheet: 'a' selects the first pole.
pub(super) fn mbti_response_set() -> ResponseSet {
    let questions = mbti_questions();
    let attempt = completed_attempt(ModuleCode::Mbti, questions.len());
    let answers: Vec<Option<&str>> = vec![
        Some("a"),
        Some("a"), // E, E
        Some("a"),
        Some("b"), // S, N
        Some("a"),
        Some("a"), // T, T
        Some("b"),
        Some("a"), // P, J
    ];
    response_set(&questions, attempt, &answers)
}

pub(super) fn question_catalog() -> InMemoryQuestionCatalog {
    let mut questions = riasec_questions();
    questions.extend(mbti_questions());
    InMemoryQuestionCatalog::new(questions)
}

pub(super) fn norm_table() -> InMemoryNormTable {
    let mut norms = riasec_norms();
    norms.extend(mbti_norms());
    InMemoryNormTable::new(norms)
}

pub(super) fn career_catalog() -> InMemoryCareerCatalog {
    InMemoryCareerCatalog::new(vec![
        career(
            "c-eng",
            "Mechanical Engineer",
            &[(ModuleCode::Riasec, 1.0)],
            &[(Dimension::Realistic, 60.0), (Dimension::Investigative, 55.0)],
            &[(Dimension::Realistic, 45.0)],
        ),
        career(
            "c-care",
            "School Counselor",
            &[(ModuleCode::Riasec, 0.7), (ModuleCode::Mbti, 0.3)],
            &[(Dimension::Social, 62.0), (Dimension::Feeling, 60.0)],
            &[(Dimension::Social, 50.0)],
        ),
        career(
            "c-admin",
            "Office Administrator",
            &[(ModuleCode::Riasec, 1.0)],
            &[(Dimension::Conventional, 58.0)],
            &[],
        ),
    ])
}

pub(super) fn career(
    career_id: &str,
    job_title: &str,
    weights: &[(ModuleCode, f64)],
    targets: &[(Dimension, f64)],
    requirements: &[(Dimension, f64)],
) -> crate::catalog::domain::CareerProfile {
    crate::catalog::domain::CareerProfile {
        career_id: career_id.to_string(),
        job_title: job_title.to_string(),
        module_weights: weights.iter().copied().collect(),
        targets: targets.iter().copied().collect(),
        minimum_requirements: requirements
            .iter()
            .map(|(dimension, min_t_score)| crate::catalog::domain::MinimumRequirement {
                dimension: *dimension,
                min_t_score: *min_t_score,
            })
            .collect(),
    }
}

/// Hand-built standardized vector for classifier and matcher tests.
pub(super) fn standardized(module: ModuleCode, scores: &[(Dimension, f64)]) -> StandardizedVector {
    let entries: BTreeMap<Dimension, StandardScore> = scores
        .iter()
        .map(|(dimension, t_score)| {
            (
                *dimension,
                StandardScore {
                    t_score: *t_score,
                    percentile: 50.0,
                    norm_sd: 10.0,
                },
            )
        })
        .collect();
    StandardizedVector { module, entries }
}

pub(super) fn raw_vector(module: ModuleCode, values: &[(Dimension, f64)]) -> ScoreVector {
    ScoreVector {
        module,
        values: values.iter().copied().collect(),
    }
}

pub(super) fn engine_config() -> EngineConfig {
    let mut config = EngineConfig::default();
    config.comprehensive_modules = vec![ModuleCode::Riasec, ModuleCode::Mbti];
    config
}
