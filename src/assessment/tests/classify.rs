use super::common::*;
use crate::assessment::classify::{interpret, Interpretation, VarkStrength};
use crate::assessment::domain::{Dimension, ModuleCode};

#[test]
fn holland_code_takes_the_top_three_descending() {
    let raw = raw_vector(ModuleCode::Riasec, &[]);
    let standardized = standardized(
        ModuleCode::Riasec,
        &[
            (Dimension::Realistic, 55.0),
            (Dimension::Investigative, 45.0),
            (Dimension::Artistic, 37.5),
            (Dimension::Social, 50.0),
            (Dimension::Enterprising, 42.5),
            (Dimension::Conventional, 47.5),
        ],
    );

    match interpret(&raw, &standardized) {
        Interpretation::Riasec(profile) => {
            assert_eq!(profile.code, "RSC");
            assert_eq!(profile.dominant, Dimension::Realistic);
        }
        other => panic!("expected riasec profile, got {other:?}"),
    }
}

#[test]
fn holland_ties_resolve_in_canonical_order() {
    let raw = raw_vector(ModuleCode::Riasec, &[]);
    let standardized = standardized(
        ModuleCode::Riasec,
        &[
            (Dimension::Realistic, 60.0),
            (Dimension::Investigative, 60.0),
            (Dimension::Artistic, 60.0),
            (Dimension::Social, 60.0),
            (Dimension::Enterprising, 60.0),
            (Dimension::Conventional, 60.0),
        ],
    );

    match interpret(&raw, &standardized) {
        Interpretation::Riasec(profile) => assert_eq!(profile.code, "RIA"),
        other => panic!("expected riasec profile, got {other:?}"),
    }
}

#[test]
fn mbti_ties_resolve_toward_the_first_pole() {
    let raw = raw_vector(
        ModuleCode::Mbti,
        &[
            (Dimension::Extraversion, 5.0),
            (Dimension::Introversion, 5.0),
            (Dimension::Sensing, 3.0),
            (Dimension::Intuition, 7.0),
            (Dimension::Thinking, 6.0),
            (Dimension::Feeling, 4.0),
            (Dimension::Judging, 0.0),
            (Dimension::Perceiving, 0.0),
        ],
    );
    let standardized = standardized(ModuleCode::Mbti, &[]);

    match interpret(&raw, &standardized) {
        Interpretation::Mbti(profile) => {
            assert_eq!(profile.type_code, "ENTJ");
            let ei = &profile.pairs[0];
            assert_eq!(ei.selected, Dimension::Extraversion);
            assert_eq!(ei.first_tally, 5.0);
            assert_eq!(ei.second_tally, 5.0);
            assert!((ei.clarity - 0.0).abs() < 1e-9);

            let sn = &profile.pairs[1];
            assert_eq!(sn.selected, Dimension::Intuition);
            assert!((sn.clarity - 40.0).abs() < 1e-9);

            // Both tallies zero degrades clarity to zero, not NaN.
            let jp = &profile.pairs[3];
            assert_eq!(jp.selected, Dimension::Judging);
            assert!((jp.clarity - 0.0).abs() < 1e-9);

            let expected_average = (0.0 + 40.0 + 20.0 + 0.0) / 4.0;
            assert!((profile.clarity_average - expected_average).abs() < 1e-9);
        }
        other => panic!("expected mbti profile, got {other:?}"),
    }
}

#[test]
fn eq_levels_bucket_on_the_mean_t_score() {
    let raw = raw_vector(ModuleCode::Eq, &[]);
    let cases = [
        (65.0, "High"),
        (60.0, "High"),
        (59.0, "Average"),
        (40.0, "Average"),
        (39.5, "Needs Development"),
    ];

    for (t_score, expected) in cases {
        let standardized = standardized(
            ModuleCode::Eq,
            &[
                (Dimension::SelfAwareness, t_score),
                (Dimension::Empathy, t_score),
            ],
        );
        match interpret(&raw, &standardized) {
            Interpretation::Eq(profile) => {
                assert!((profile.overall - t_score).abs() < 1e-9);
                assert_eq!(profile.level.label(), expected, "mean T {t_score}");
            }
            other => panic!("expected eq profile, got {other:?}"),
        }
    }
}

#[test]
fn gardner_dominance_requires_a_t_score_of_sixty() {
    let raw = raw_vector(ModuleCode::Gardner, &[]);
    let standardized = standardized(
        ModuleCode::Gardner,
        &[
            (Dimension::Linguistic, 62.0),
            (Dimension::Musical, 60.0),
            (Dimension::Spatial, 59.9),
            (Dimension::Naturalistic, 41.0),
        ],
    );

    match interpret(&raw, &standardized) {
        Interpretation::Gardner(profile) => {
            assert_eq!(
                profile.dominant,
                vec![Dimension::Linguistic, Dimension::Musical]
            );
        }
        other => panic!("expected gardner profile, got {other:?}"),
    }
}

#[test]
fn gardner_dominance_may_be_empty() {
    let raw = raw_vector(ModuleCode::Gardner, &[]);
    let standardized = standardized(
        ModuleCode::Gardner,
        &[
            (Dimension::Linguistic, 50.0),
            (Dimension::Musical, 45.0),
        ],
    );

    match interpret(&raw, &standardized) {
        Interpretation::Gardner(profile) => assert!(profile.dominant.is_empty()),
        other => panic!("expected gardner profile, got {other:?}"),
    }
}

#[test]
fn aptitude_projects_iq_from_the_mean_t_score() {
    let raw = raw_vector(ModuleCode::Aptitude, &[]);
    let cases = [
        (50.0, 100, "Average"),
        (60.0, 103, "Average"),
        (100.0, 115, "Above Average"),
        (0.0, 85, "Below Average"),
    ];

    for (t_score, expected_score, expected_band) in cases {
        let standardized = standardized(
            ModuleCode::Aptitude,
            &[
                (Dimension::VerbalReasoning, t_score),
                (Dimension::NumericalReasoning, t_score),
            ],
        );
        match interpret(&raw, &standardized) {
            Interpretation::Aptitude(profile) => {
                assert_eq!(profile.score, expected_score, "mean T {t_score}");
                assert_eq!(profile.band.label(), expected_band);
            }
            other => panic!("expected aptitude profile, got {other:?}"),
        }
    }
}

#[test]
fn vark_style_strength_depends_on_the_margin() {
    let raw = raw_vector(ModuleCode::Vark, &[]);

    let strong = standardized(
        ModuleCode::Vark,
        &[
            (Dimension::Visual, 68.0),
            (Dimension::Auditory, 55.0),
            (Dimension::ReadWrite, 50.0),
            (Dimension::Kinesthetic, 45.0),
        ],
    );
    match interpret(&raw, &strong) {
        Interpretation::Vark(profile) => {
            assert_eq!(profile.style, Dimension::Visual);
            assert_eq!(profile.strength, VarkStrength::Strong);
        }
        other => panic!("expected vark profile, got {other:?}"),
    }

    // A margin of exactly ten points stays Mixed.
    let mixed = standardized(
        ModuleCode::Vark,
        &[
            (Dimension::Visual, 60.0),
            (Dimension::Auditory, 50.0),
            (Dimension::ReadWrite, 48.0),
            (Dimension::Kinesthetic, 45.0),
        ],
    );
    match interpret(&raw, &mixed) {
        Interpretation::Vark(profile) => {
            assert_eq!(profile.style, Dimension::Visual);
            assert_eq!(profile.strength, VarkStrength::Mixed);
        }
        other => panic!("expected vark profile, got {other:?}"),
    }
}
