use super::common::*;
use crate::assessment::domain::{Dimension, ItemScore, ModuleCode, QuestionId};
use crate::assessment::validity::{assess, ValidityStatus, ValidityThresholds};

fn item(id: &str, dimension: Dimension, tag: Option<&str>, value: f64) -> ItemScore {
    ItemScore {
        question_id: QuestionId(id.to_string()),
        dimension,
        sub_dimension: tag.map(str::to_string),
        value,
    }
}

fn spread_vector() -> crate::assessment::domain::StandardizedVector {
    standardized(
        ModuleCode::Riasec,
        &[
            (Dimension::Realistic, 70.0),
            (Dimension::Investigative, 55.0),
            (Dimension::Artistic, 35.0),
            (Dimension::Social, 60.0),
            (Dimension::Enterprising, 45.0),
            (Dimension::Conventional, 55.0),
        ],
    )
}

#[test]
fn perfectly_agreeing_pairs_yield_full_consistency() {
    let items = vec![
        item("q1", Dimension::Realistic, Some("hands_on"), 4.0),
        item("q2", Dimension::Realistic, Some("hands_on"), 4.0),
        item("q3", Dimension::Artistic, Some("creative"), 1.0),
        item("q4", Dimension::Artistic, Some("creative"), 1.0),
        item("q5", Dimension::Social, Some("helping"), 3.0),
        item("q6", Dimension::Social, Some("helping"), 3.0),
    ];

    let report = assess(&items, &spread_vector(), None, &ValidityThresholds::default());

    assert!((report.response_consistency - 1.0).abs() < 1e-9);
    assert_eq!(report.status, ValidityStatus::Valid);
}

#[test]
fn contradictory_pairs_clamp_to_zero_consistency() {
    // Each pair answers high then low; the pair correlation is negative and
    // must clamp at zero rather than go below the scale.
    let items = vec![
        item("q1", Dimension::Realistic, Some("hands_on"), 4.0),
        item("q2", Dimension::Realistic, Some("hands_on"), 0.0),
        item("q3", Dimension::Artistic, Some("creative"), 0.0),
        item("q4", Dimension::Artistic, Some("creative"), 4.0),
        item("q5", Dimension::Social, Some("helping"), 3.0),
        item("q6", Dimension::Social, Some("helping"), 1.0),
    ];

    let report = assess(&items, &spread_vector(), None, &ValidityThresholds::default());

    assert_eq!(report.response_consistency, 0.0);
    assert_eq!(report.status, ValidityStatus::Flagged);
}

#[test]
fn split_half_stands_in_without_tagged_pairs() {
    // Two untagged items per dimension with equal halves: the odd/even sums
    // match exactly, so the split-half correlation is perfect.
    let items = vec![
        item("q1", Dimension::Realistic, None, 4.0),
        item("q2", Dimension::Realistic, None, 4.0),
        item("q3", Dimension::Investigative, None, 2.0),
        item("q4", Dimension::Investigative, None, 2.0),
        item("q5", Dimension::Artistic, None, 1.0),
        item("q6", Dimension::Artistic, None, 1.0),
    ];

    let report = assess(&items, &spread_vector(), None, &ValidityThresholds::default());

    assert!((report.response_consistency - 1.0).abs() < 1e-9);
    assert!((report.cronbach_alpha - 1.0).abs() < 1e-9);
}

#[test]
fn flat_profiles_score_low_differentiation_and_get_flagged() {
    let items = vec![
        item("q1", Dimension::Realistic, Some("hands_on"), 2.0),
        item("q2", Dimension::Realistic, Some("hands_on"), 2.0),
        item("q3", Dimension::Artistic, Some("creative"), 3.0),
        item("q4", Dimension::Artistic, Some("creative"), 3.0),
    ];
    let flat = standardized(
        ModuleCode::Riasec,
        &[
            (Dimension::Realistic, 50.0),
            (Dimension::Investigative, 50.0),
            (Dimension::Artistic, 50.0),
        ],
    );

    let report = assess(&items, &flat, None, &ValidityThresholds::default());

    assert_eq!(report.profile_differentiation, 0.0);
    assert_eq!(report.status, ValidityStatus::Flagged);
}

#[test]
fn sem_shrinks_as_reliability_rises() {
    let reliable = vec![
        item("q1", Dimension::Realistic, None, 4.0),
        item("q2", Dimension::Realistic, None, 4.0),
        item("q3", Dimension::Artistic, None, 1.0),
        item("q4", Dimension::Artistic, None, 1.0),
    ];
    let report = assess(
        &reliable,
        &spread_vector(),
        None,
        &ValidityThresholds::default(),
    );
    // Perfect split-half agreement: alpha 1, no measurement error left.
    assert!((report.cronbach_alpha - 1.0).abs() < 1e-9);
    assert!(report.sem.abs() < 1e-9);

    let noisy = vec![
        item("q1", Dimension::Realistic, None, 4.0),
        item("q2", Dimension::Realistic, None, 0.0),
        item("q3", Dimension::Artistic, None, 0.0),
        item("q4", Dimension::Artistic, None, 3.0),
    ];
    let report = assess(
        &noisy,
        &spread_vector(),
        None,
        &ValidityThresholds::default(),
    );
    assert!(report.cronbach_alpha < 1.0);
    assert!(report.sem > 0.0);
}

#[test]
fn preference_clarity_passes_through_for_mbti() {
    let items = vec![
        item("m1", Dimension::Extraversion, None, 1.0),
        item("m2", Dimension::Extraversion, None, 1.0),
    ];
    let vector = standardized(ModuleCode::Mbti, &[(Dimension::Extraversion, 70.0)]);

    let report = assess(&items, &vector, Some(62.5), &ValidityThresholds::default());

    assert_eq!(report.preference_clarity, Some(62.5));
}

#[test]
fn thresholds_govern_the_status() {
    let items = vec![
        item("q1", Dimension::Realistic, Some("hands_on"), 4.0),
        item("q2", Dimension::Realistic, Some("hands_on"), 3.9),
        item("q3", Dimension::Artistic, Some("creative"), 1.0),
        item("q4", Dimension::Artistic, Some("creative"), 1.1),
    ];

    let lenient = ValidityThresholds {
        min_consistency: 0.5,
        min_differentiation: 1.0,
    };
    let report = assess(&items, &spread_vector(), None, &lenient);
    assert_eq!(report.status, ValidityStatus::Valid);

    let strict = ValidityThresholds {
        min_consistency: 0.999,
        min_differentiation: 50.0,
    };
    let report = assess(&items, &spread_vector(), None, &strict);
    assert_eq!(report.status, ValidityStatus::Flagged);
}
