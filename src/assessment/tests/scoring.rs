use super::common::*;
use crate::assessment::catalog::{
    CatalogError, Category, CriteriaCatalog, Criterion, ScoreBand, SelectOption,
};
use crate::assessment::domain::{ResponseSet, ResponseValue};
use crate::assessment::scoring::{Grade, ScoringEngine};

#[test]
fn foundation_scores_full_marks_with_optional_unanswered() {
    // Boolean criteria answered true, the numeric tenure lands in the open
    // final band, and the optional DBA question is left blank.
    let engine = engine();
    let responses = respond(&[
        ("entity_registered", ResponseValue::Boolean(true)),
        ("ein_obtained", ResponseValue::Boolean(true)),
        ("business_address", ResponseValue::Boolean(true)),
        ("business_phone", ResponseValue::Boolean(true)),
        ("months_in_business", ResponseValue::Number(30.0)),
    ]);

    let snapshot = engine.score(&responses);
    let foundation = snapshot.category("foundation").expect("category scored");

    assert_eq!(foundation.raw_points, 23);
    assert_eq!(foundation.max_points, 23);
    assert_eq!(foundation.percentage, 100);
    assert_eq!(foundation.answered, 5);
    assert_eq!(foundation.total, 6);
    assert!(foundation.complete);
}

#[test]
fn unanswered_category_scores_zero_and_flags_incomplete() {
    let engine = engine();
    let snapshot = engine.score(&ResponseSet::new());
    let foundation = snapshot.category("foundation").expect("category scored");

    assert_eq!(foundation.raw_points, 0);
    assert_eq!(foundation.max_points, 23);
    assert_eq!(foundation.percentage, 0);
    assert!(!foundation.complete);
    assert_eq!(snapshot.overall.percentage, 0);
    assert_eq!(snapshot.overall.grade, Grade::F);
}

#[test]
fn numeric_bands_are_left_inclusive() {
    let engine = engine();

    for (months, expected) in [(0.0, 0), (6.0, 0), (7.0, 3), (12.0, 3), (13.0, 5), (24.0, 5), (25.0, 7), (300.0, 7)] {
        let responses = respond(&[("months_in_business", ResponseValue::Number(months))]);
        let snapshot = engine.score(&responses);
        let foundation = snapshot.category("foundation").expect("category scored");
        assert_eq!(
            foundation.raw_points, expected,
            "months={months} should earn {expected} points"
        );
    }
}

#[test]
fn negative_number_scores_zero_but_counts_as_answered() {
    let engine = engine();
    let responses = respond(&[("months_in_business", ResponseValue::Number(-3.0))]);
    let snapshot = engine.score(&responses);
    let foundation = snapshot.category("foundation").expect("category scored");

    assert_eq!(foundation.raw_points, 0);
    assert_eq!(foundation.answered, 1);
}

#[test]
fn mismatched_value_shape_is_treated_as_unanswered() {
    let engine = engine();
    let responses = respond(&[
        ("months_in_business", ResponseValue::Boolean(true)),
        ("entity_registered", ResponseValue::Number(1.0)),
    ]);
    let snapshot = engine.score(&responses);
    let foundation = snapshot.category("foundation").expect("category scored");

    assert_eq!(foundation.raw_points, 0);
    assert_eq!(foundation.answered, 0);
}

#[test]
fn unknown_criterion_ids_are_ignored() {
    let engine = engine();
    let responses = respond(&[("no_such_criterion", ResponseValue::Boolean(true))]);
    let snapshot = engine.score(&responses);

    assert_eq!(snapshot.overall.percentage, 0);
    assert_eq!(snapshot.completion_percent, 0);
}

#[test]
fn select_sentinel_scores_zero_and_unknown_choice_is_unanswered() {
    let engine = engine();

    let none = respond(&[("location_type", ResponseValue::Selection("none".to_string()))]);
    let snapshot = engine.score(&none);
    let operations = snapshot.category("operations").expect("category scored");
    assert_eq!(operations.raw_points, 0);
    assert_eq!(operations.answered, 1);

    let unknown = respond(&[(
        "location_type",
        ResponseValue::Selection("houseboat".to_string()),
    )]);
    let snapshot = engine.score(&unknown);
    let operations = snapshot.category("operations").expect("category scored");
    assert_eq!(operations.answered, 0);
}

#[test]
fn optional_unanswered_criteria_do_not_penalize() {
    let engine = engine();
    let responses = respond(&[
        ("website_live", ResponseValue::Boolean(true)),
        ("business_email", ResponseValue::Boolean(true)),
        ("listings_consistent", ResponseValue::Boolean(true)),
    ]);

    let snapshot = engine.score(&responses);
    let digital = snapshot.category("digital").expect("category scored");

    assert_eq!(digital.raw_points, 10);
    assert_eq!(digital.max_points, 10);
    assert_eq!(digital.percentage, 100);
    assert!(digital.complete);
}

#[test]
fn criterion_components_flag_unmet_items() {
    let engine = engine();
    let snapshot = engine.score(&respond(&[
        ("entity_registered", ResponseValue::Boolean(false)),
        ("ein_obtained", ResponseValue::Boolean(true)),
    ]));
    let foundation = snapshot.category("foundation").expect("category scored");

    let component = |id: &str| {
        foundation
            .components
            .iter()
            .find(|component| component.criterion_id == id)
            .expect("component present")
    };

    assert!(component("entity_registered").unmet());
    assert!(!component("ein_obtained").unmet());
    // Unanswered required criteria are unmet too.
    assert!(component("business_address").unmet());
}

#[test]
fn full_responses_reach_a_plus() {
    let engine = engine();
    let snapshot = engine.score(&full_responses());

    for score in &snapshot.category_scores {
        assert_eq!(score.percentage, 100, "category {}", score.category_id);
    }
    assert_eq!(snapshot.overall.percentage, 100);
    assert_eq!(snapshot.overall.grade, Grade::APlus);
    assert_eq!(snapshot.completion_percent, 100);
}

#[test]
fn boolean_flip_never_decreases_category_percentage() {
    let engine = engine();
    let without = respond(&[
        ("entity_registered", ResponseValue::Boolean(true)),
        ("business_phone", ResponseValue::Boolean(false)),
    ]);
    let with = respond(&[
        ("entity_registered", ResponseValue::Boolean(true)),
        ("business_phone", ResponseValue::Boolean(true)),
    ]);

    let before = engine.score(&without);
    let after = engine.score(&with);

    assert!(
        after.category("foundation").expect("scored").percentage
            >= before.category("foundation").expect("scored").percentage
    );
}

#[test]
fn scoring_is_idempotent() {
    let engine = engine();
    let responses = full_responses();

    assert_eq!(engine.score(&responses), engine.score(&responses));
}

#[test]
fn grade_thresholds_match_the_scale() {
    for (percentage, grade) in [
        (100, Grade::APlus),
        (90, Grade::APlus),
        (89, Grade::A),
        (80, Grade::A),
        (79, Grade::B),
        (70, Grade::B),
        (69, Grade::C),
        (60, Grade::C),
        (59, Grade::D),
        (50, Grade::D),
        (49, Grade::F),
        (0, Grade::F),
    ] {
        assert_eq!(Grade::from_percentage(percentage), grade, "{percentage}%");
    }
}

#[test]
fn empty_catalog_scores_zero_without_error() {
    let engine = ScoringEngine::new(CriteriaCatalog {
        version: "test".to_string(),
        categories: Vec::new(),
    })
    .expect("empty catalog is degenerate, not invalid");

    let snapshot = engine.score(&full_responses());
    assert!(snapshot.category_scores.is_empty());
    assert_eq!(snapshot.overall.percentage, 0);
}

#[test]
fn duplicate_criterion_ids_fail_validation() {
    let catalog = CriteriaCatalog {
        version: "test".to_string(),
        categories: vec![Category {
            id: "only".to_string(),
            name: "Only".to_string(),
            weight: 10,
            criteria: vec![
                Criterion::boolean("twice", "First?", 1),
                Criterion::boolean("twice", "Second?", 1),
            ],
        }],
    };

    assert!(ScoringEngine::new(catalog).is_err());
}

#[test]
fn band_gaps_and_bounded_tails_fail_validation() {
    let gapped = CriteriaCatalog {
        version: "test".to_string(),
        categories: vec![Category {
            id: "only".to_string(),
            name: "Only".to_string(),
            weight: 10,
            criteria: vec![Criterion::number(
                "gappy",
                "How many?",
                3,
                vec![
                    ScoreBand {
                        min: 0.0,
                        max: Some(5.0),
                        points: 0,
                    },
                    ScoreBand {
                        min: 6.0,
                        max: None,
                        points: 3,
                    },
                ],
            )],
        }],
    };
    assert!(ScoringEngine::new(gapped).is_err());

    let bounded = CriteriaCatalog {
        version: "test".to_string(),
        categories: vec![Category {
            id: "only".to_string(),
            name: "Only".to_string(),
            weight: 10,
            criteria: vec![Criterion::number(
                "bounded",
                "How many?",
                3,
                vec![ScoreBand {
                    min: 0.0,
                    max: Some(5.0),
                    points: 0,
                }],
            )],
        }],
    };
    assert!(ScoringEngine::new(bounded).is_err());
}

#[test]
fn points_above_the_criterion_weight_fail_validation() {
    // A band worth more than the weight would push raw over max and the
    // percentage past 100.
    let inflated_band = CriteriaCatalog {
        version: "test".to_string(),
        categories: vec![Category {
            id: "only".to_string(),
            name: "Only".to_string(),
            weight: 10,
            criteria: vec![Criterion::number(
                "inflated",
                "How many?",
                3,
                vec![ScoreBand {
                    min: 0.0,
                    max: None,
                    points: 10,
                }],
            )],
        }],
    };
    assert!(matches!(
        ScoringEngine::new(inflated_band),
        Err(CatalogError::PointsExceedWeight { .. })
    ));

    let inflated_option = CriteriaCatalog {
        version: "test".to_string(),
        categories: vec![Category {
            id: "only".to_string(),
            name: "Only".to_string(),
            weight: 10,
            criteria: vec![Criterion::select(
                "inflated",
                "Pick one?",
                2,
                vec![SelectOption {
                    value: "generous".to_string(),
                    points: 5,
                }],
            )],
        }],
    };
    assert!(matches!(
        ScoringEngine::new(inflated_option),
        Err(CatalogError::PointsExceedWeight { .. })
    ));
}

#[test]
fn select_without_options_fails_validation() {
    let catalog = CriteriaCatalog {
        version: "test".to_string(),
        categories: vec![Category {
            id: "only".to_string(),
            name: "Only".to_string(),
            weight: 10,
            criteria: vec![Criterion::select("empty", "Pick one?", 2, Vec::new())],
        }],
    };

    assert!(ScoringEngine::new(catalog).is_err());
}
