// ABOUTME: Tests for dataset parsing: catalog, weight table, and JSONL result indexes
// ABOUTME: Covers combination-key normalization and unknown-objective rejection
//
// SPDX-License-Identifier: MIT OR Apache-2.0

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use planner_core::datasets::{
    combination_key, normalize_objective_ids, parse_catalog, parse_weight_table,
    InterferenceIndex, PhysiologyIndex, INTERFERENCE_KEY_FIELDS, PHYSIOLOGY_KEY_FIELDS,
};
use planner_core::models::Axis;
use planner_core::PlannerError;

fn catalog_payload() -> &'static str {
    r#"{
        "categories": [
            {
                "id": "strength",
                "title": "Strength",
                "objectives": [
                    {"id": "back_squat", "title": "Back squat strength", "min_weekly_minutes": 120},
                    {"id": "pullup_ladder", "title": "Pull-up ladder", "min_weekly_minutes": 90,
                     "competition_options": ["meet_prep"]}
                ]
            },
            {
                "id": "endurance",
                "title": "Endurance",
                "objectives": [
                    {"id": "five_k", "title": "5k time", "min_weekly_minutes": 150}
                ]
            }
        ]
    }"#
}

#[test]
fn test_parse_catalog_exposes_objectives_across_categories() {
    let catalog = parse_catalog(catalog_payload()).unwrap();

    assert_eq!(catalog.categories.len(), 2);
    assert_eq!(catalog.objectives().count(), 3);

    let pullup = catalog.objective("pullup_ladder").unwrap();
    assert_eq!(pullup.title, "Pull-up ladder");
    assert_eq!(pullup.min_weekly_minutes, 90);
    assert_eq!(pullup.competition_options, vec!["meet_prep".to_owned()]);

    assert!(catalog.objective("nonexistent").is_none());
}

#[test]
fn test_combination_key_sorts_dedupes_and_drops_empties() {
    let key = combination_key(["five_k", "back_squat", "", "five_k"]);
    assert_eq!(key, vec!["back_squat".to_owned(), "five_k".to_owned()]);
}

#[test]
fn test_normalize_objective_ids_rejects_unknown_ids() {
    let catalog = parse_catalog(catalog_payload()).unwrap();

    let ids = vec!["five_k".to_owned(), "back_squat".to_owned(), "five_k".to_owned()];
    let normalized = normalize_objective_ids(&ids, &catalog).unwrap();
    assert_eq!(normalized, vec!["back_squat".to_owned(), "five_k".to_owned()]);

    let bad = vec!["five_k".to_owned(), "handstand".to_owned()];
    let err = normalize_objective_ids(&bad, &catalog).unwrap_err();
    match err {
        PlannerError::UnknownObjectives { objective_ids } => {
            assert_eq!(objective_ids, "handstand");
        }
        other => panic!("expected UnknownObjectives, got {other:?}"),
    }
}

#[test]
fn test_interference_index_keys_by_sorted_tuple() {
    let payload = concat!(
        r#"{"inputs": ["five_k", "back_squat"], "score": 0.42, "breakdown": []}"#,
        "\n\n",
        r#"{"objectives": ["back_squat", "pullup_ladder"], "score": 0.18, "redundancy_flags": ["pulling volume repeats"]}"#,
        "\n",
    );
    let index =
        InterferenceIndex::parse_jsonl(payload, INTERFERENCE_KEY_FIELDS, "interference results")
            .unwrap();
    assert_eq!(index.len(), 2);

    // Query order and duplicates do not matter.
    let record = index.get(&["five_k", "back_squat", "five_k"]).unwrap();
    assert!((record.score - 0.42).abs() < f64::EPSILON);

    let record = index.get(&["pullup_ladder", "back_squat"]).unwrap();
    assert_eq!(record.redundancy_flags, vec!["pulling volume repeats".to_owned()]);

    assert!(index.get(&["five_k"]).is_none());
}

#[test]
fn test_result_index_skips_records_without_keys() {
    let payload = concat!(
        r#"{"score": 0.9}"#,
        "\n",
        r#"{"objectives": [], "score": 0.5}"#,
        "\n",
        r#"{"objectives": ["back_squat"], "score": 0.1}"#,
        "\n",
    );
    let index =
        InterferenceIndex::parse_jsonl(payload, INTERFERENCE_KEY_FIELDS, "interference results")
            .unwrap();
    assert_eq!(index.len(), 1);
}

#[test]
fn test_result_index_rejects_malformed_lines() {
    let payload = "{\"objectives\": [\"a\"], \"score\": 0.1}\nnot json\n";
    let err =
        InterferenceIndex::parse_jsonl(payload, INTERFERENCE_KEY_FIELDS, "interference results")
            .unwrap_err();
    assert!(matches!(err, PlannerError::DataFormat { .. }));
}

#[test]
fn test_index_key_precedence_follows_the_record_writer() {
    // A record carrying both spellings keys by the index's primary field.
    let payload = concat!(
        r#"{"inputs": ["back_squat", "five_k"], "objectives": ["pullup_ladder"], "score": 0.3}"#,
        "\n",
    );
    let interference =
        InterferenceIndex::parse_jsonl(payload, INTERFERENCE_KEY_FIELDS, "interference results")
            .unwrap();
    assert!(interference.get(&["five_k", "back_squat"]).is_some());
    assert!(interference.get(&["pullup_ladder"]).is_none());

    let payload = concat!(
        r#"{"objectives": ["pullup_ladder"], "inputs": ["back_squat", "five_k"], "axes": {}}"#,
        "\n",
    );
    let physiology =
        PhysiologyIndex::parse_jsonl(payload, PHYSIOLOGY_KEY_FIELDS, "physiology results")
            .unwrap();
    assert!(physiology.get(&["pullup_ladder"]).is_some());
    assert!(physiology.get(&["back_squat", "five_k"]).is_none());

    // An empty primary array falls through to the secondary field.
    let payload = r#"{"inputs": [], "objectives": ["five_k"], "score": 0.2}"#;
    let fallback =
        InterferenceIndex::parse_jsonl(payload, INTERFERENCE_KEY_FIELDS, "interference results")
            .unwrap();
    assert!(fallback.get(&["five_k"]).is_some());
}

#[test]
fn test_physiology_index_defaults_missing_axes_to_zero() {
    let payload = concat!(
        r#"{"objectives": ["back_squat", "five_k"], "#,
        r#""axes": {"endurance": 42.0, "strength_local_endurance": 18.5}, "#,
        r#""meta": {"source": "precomputed"}}"#,
        "\n",
    );
    let index =
        PhysiologyIndex::parse_jsonl(payload, PHYSIOLOGY_KEY_FIELDS, "physiology results").unwrap();
    let record = index.get(&["five_k", "back_squat"]).unwrap();

    assert!((record.axes.get(Axis::Endurance) - 42.0).abs() < f64::EPSILON);
    assert!((record.axes.get(Axis::PowerSpeed)).abs() < f64::EPSILON);
    assert!(record.meta.contains_key("source"));
}

#[test]
fn test_parse_weight_table_preserves_option_order() {
    let payload = r#"{
        "pullup_ladder": {
            "base": {"strength": 0.7, "endurance": 0.3},
            "options": [
                {"name": "meet_prep", "weights": {"strength": 0.9, "endurance": 0.1}},
                {"name": "volume_block", "weights": {"strength": 0.5, "endurance": 0.5}}
            ]
        }
    }"#;
    let table = parse_weight_table(payload).unwrap();
    let profile = &table["pullup_ladder"];

    assert_eq!(profile.base.len(), 2);
    assert_eq!(profile.options[0].name, "meet_prep");
    assert_eq!(profile.options[1].name, "volume_block");
}
