// ABOUTME: Integration tests for the engine façade: readiness gate, projections, demand
// ABOUTME: Exercises the full tables-plus-context flow the way an embedding layer would
//
// SPDX-License-Identifier: MIT OR Apache-2.0

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use planner_core::models::{
    DisciplineInterferenceMapping, DisciplineWeightProfile, ExperienceLevel,
    InterferenceBreakdown, InterferenceMatrix, InterferenceResult, MetricDefinition,
    MetricSelection, MetricTrend, Objective, ObjectiveCatalog, ObjectiveCategory,
    PhysiologicalAxisVector, ProgressionRateTable, UserProfile,
};
use planner_intelligence::engine::{
    InsightEngine, ProjectionOutcome, ReferenceTables, SelectedObjective, SelectionContext,
};
use planner_intelligence::interference::Severity;
use planner_intelligence::modifiers::ModifierTables;
use std::collections::BTreeMap;

fn weight_map(pairs: &[(&str, f64)]) -> BTreeMap<String, f64> {
    pairs
        .iter()
        .map(|(discipline, weight)| ((*discipline).to_owned(), *weight))
        .collect()
}

fn objective(id: &str, title: &str, minutes: u32) -> Objective {
    Objective {
        id: id.to_owned(),
        title: title.to_owned(),
        category_id: "general".to_owned(),
        min_weekly_minutes: minutes,
        competition_options: Vec::new(),
    }
}

fn reference_tables() -> ReferenceTables {
    let catalog = ObjectiveCatalog {
        categories: vec![ObjectiveCategory {
            id: "general".to_owned(),
            title: "General".to_owned(),
            objectives: vec![
                objective("back_squat", "Back squat strength", 120),
                objective("five_k", "5k time", 150),
                objective("handstand", "Handstand hold", 60),
            ],
        }],
    };

    let mut weights = BTreeMap::new();
    weights.insert(
        "back_squat".to_owned(),
        DisciplineWeightProfile {
            base: weight_map(&[("strength", 1.0)]),
            options: Vec::new(),
        },
    );
    weights.insert(
        "five_k".to_owned(),
        DisciplineWeightProfile {
            base: weight_map(&[("endurance", 0.8), ("strength", 0.2)]),
            options: Vec::new(),
        },
    );

    let mut strength_rates = BTreeMap::new();
    strength_rates.insert("novice".to_owned(), 0.04);
    strength_rates.insert("intermediate".to_owned(), 0.025);
    strength_rates.insert("advanced".to_owned(), 0.01);
    let mut endurance_rates = BTreeMap::new();
    endurance_rates.insert("intermediate".to_owned(), 0.02);
    let mut rates = BTreeMap::new();
    rates.insert("strength".to_owned(), strength_rates);
    rates.insert("endurance".to_owned(), endurance_rates);

    let mut matrix = BTreeMap::new();
    matrix.insert(
        "strength".to_owned(),
        DisciplineInterferenceMapping {
            base_weight: 0.4,
            axis_weights: weight_map(&[("endurance", 0.7), ("power_speed", 0.3)]),
        },
    );

    let mut metric_definitions = BTreeMap::new();
    metric_definitions.insert(
        "back_squat".to_owned(),
        vec![MetricDefinition {
            id: "squat_1rm".to_owned(),
            label: "Back squat 1RM".to_owned(),
            unit: "kg".to_owned(),
            discipline: "strength".to_owned(),
            trend: MetricTrend::Increase,
            default_value: None,
        }],
    );
    metric_definitions.insert(
        "five_k".to_owned(),
        vec![MetricDefinition {
            id: "five_k_time".to_owned(),
            label: "5k time".to_owned(),
            unit: "min".to_owned(),
            discipline: "endurance".to_owned(),
            trend: MetricTrend::Decrease,
            default_value: Some(27.5),
        }],
    );

    let mut adherence = BTreeMap::new();
    adherence.insert("high".to_owned(), 1.05);
    let mut recovery = BTreeMap::new();
    recovery.insert("good".to_owned(), 1.02);
    let mut resources = BTreeMap::new();
    resources.insert("rack".to_owned(), 0.1);

    ReferenceTables {
        catalog,
        weights,
        rates: ProgressionRateTable(rates),
        interference_matrix: InterferenceMatrix(matrix),
        metric_definitions,
        modifier_tables: ModifierTables {
            adherence,
            recovery,
            resources,
        },
    }
}

fn complete_profile() -> UserProfile {
    let mut experience = BTreeMap::new();
    experience.insert("strength".to_owned(), ExperienceLevel::Novice);
    UserProfile {
        age: Some(34),
        weight_kg: Some(78.0),
        height_cm: Some(181.0),
        gender: Some("male".to_owned()),
        experience,
        recovery_state: Some("good".to_owned()),
        adherence_level: Some("high".to_owned()),
        resources: ["rack".to_owned()].into(),
        weekly_availability_minutes: 300,
    }
}

fn interference_result() -> InterferenceResult {
    InterferenceResult {
        score: 0.4,
        score_base: 0.35,
        breakdown: vec![InterferenceBreakdown {
            axis: "endurance".to_owned(),
            label: None,
            impact: Some(0.6),
            contribution: None,
        }],
        redundancy_flags: Vec::new(),
    }
}

fn ready_context() -> SelectionContext {
    let mut metric_selections = BTreeMap::new();
    metric_selections.insert(
        "back_squat".to_owned(),
        MetricSelection {
            metric_id: "squat_1rm".to_owned(),
            current_value: Some(100.0),
        },
    );
    metric_selections.insert(
        "five_k".to_owned(),
        MetricSelection {
            metric_id: "five_k_time".to_owned(),
            current_value: Some(25.0),
        },
    );

    let axes: PhysiologicalAxisVector = [
        ("endurance".to_owned(), 40.0),
        ("strength_local_endurance".to_owned(), 30.0),
        ("body_composition".to_owned(), 30.0),
    ]
    .into_iter()
    .collect();

    SelectionContext {
        selected: vec![
            SelectedObjective {
                objective_id: "back_squat".to_owned(),
                competition_option: None,
            },
            SelectedObjective {
                objective_id: "five_k".to_owned(),
                competition_option: None,
            },
        ],
        profile: complete_profile(),
        metric_selections,
        interference: Some(interference_result()),
        axis_vector: Some(axes),
    }
}

#[test]
fn test_weekly_totals_track_the_selection() {
    let engine = InsightEngine::new(reference_tables());
    let totals = engine.weekly_totals(&ready_context());

    assert_eq!(totals.committed_minutes, 270);
    assert_eq!(totals.availability_minutes, 300);
}

#[test]
fn test_unknown_selected_objectives_are_skipped() {
    let engine = InsightEngine::new(reference_tables());
    let mut context = ready_context();
    context.selected.push(SelectedObjective {
        objective_id: "ghost".to_owned(),
        competition_option: None,
    });

    let totals = engine.weekly_totals(&context);
    assert_eq!(totals.committed_minutes, 270);
}

#[test]
fn test_interference_insight_classifies_the_fetched_score() {
    let engine = InsightEngine::new(reference_tables());
    let insight = engine.interference(&ready_context());

    assert_eq!(insight.severity, Severity::Moderate);
    assert!(!insight.reasons.is_empty());
}

#[test]
fn test_balance_degrades_without_an_axis_vector() {
    let engine = InsightEngine::new(reference_tables());
    let mut context = ready_context();
    context.axis_vector = None;

    let report = engine.balance(&context);
    assert!(report.narrative.contains("No physiological demand data"));
}

#[test]
fn test_discipline_demand_averages_resolved_weights() {
    let engine = InsightEngine::new(reference_tables());
    let demand = engine.discipline_demand(&ready_context());

    // strength mean 0.6 and endurance mean 0.8, normalized over 1.4
    assert!((demand.values().sum::<f64>() - 1.0).abs() < 1e-9);
    assert!(demand["endurance"] > demand["strength"]);
}

#[test]
fn test_projections_cover_every_selected_objective() {
    let engine = InsightEngine::new(reference_tables());
    let outcome = engine.projections(&ready_context());

    let ProjectionOutcome::Ready(projections) = outcome else {
        panic!("expected projections, got {outcome:?}");
    };
    assert_eq!(projections.len(), 2);

    let squat = projections
        .iter()
        .find(|p| p.objective_id == "back_squat")
        .unwrap();
    assert_eq!(squat.metric.points.len(), 13);
    assert!(squat.metric.points[12].value > squat.metric.points[0].value);

    let five_k = projections
        .iter()
        .find(|p| p.objective_id == "five_k")
        .unwrap();
    assert!(five_k.metric.points[12].value < five_k.metric.points[0].value);
    assert!(five_k.metric.points[12].value >= 12.5);
}

#[test]
fn test_projection_results_are_idempotent() {
    let engine = InsightEngine::new(reference_tables());
    let context = ready_context();

    let first = serde_json::to_string(&engine.projections(&context)).unwrap();
    let second = serde_json::to_string(&engine.projections(&context)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_metric_without_a_value_falls_back_to_its_default() {
    let engine = InsightEngine::new(reference_tables());
    let mut context = ready_context();
    context
        .metric_selections
        .get_mut("five_k")
        .unwrap()
        .current_value = None;

    let ProjectionOutcome::Ready(projections) = engine.projections(&context) else {
        panic!("expected projections");
    };
    let five_k = projections
        .iter()
        .find(|p| p.objective_id == "five_k")
        .unwrap();
    assert!((five_k.metric.starting_value - 27.5).abs() < f64::EPSILON);
}

#[test]
fn test_empty_selection_blocks_projections() {
    let engine = InsightEngine::new(reference_tables());
    let mut context = ready_context();
    context.selected.clear();

    let outcome = engine.projections(&context);
    assert_eq!(
        outcome,
        ProjectionOutcome::Blocked("Select at least one objective to project progress.".to_owned())
    );
}

#[test]
fn test_incomplete_profile_blocks_projections() {
    let engine = InsightEngine::new(reference_tables());
    let mut context = ready_context();
    context.profile.age = None;

    let ProjectionOutcome::Blocked(reason) = engine.projections(&context) else {
        panic!("expected a block");
    };
    assert!(reason.contains("Complete your profile"));
}

#[test]
fn test_objective_without_metrics_blocks_projections() {
    let engine = InsightEngine::new(reference_tables());
    let mut context = ready_context();
    context.selected.push(SelectedObjective {
        objective_id: "handstand".to_owned(),
        competition_option: None,
    });

    let ProjectionOutcome::Blocked(reason) = engine.projections(&context) else {
        panic!("expected a block");
    };
    assert_eq!(reason, "No metrics are defined for 'Handstand hold'.");
}

#[test]
fn test_objective_without_a_chosen_metric_blocks_projections() {
    let engine = InsightEngine::new(reference_tables());
    let mut context = ready_context();
    context.metric_selections.remove("five_k");

    let ProjectionOutcome::Blocked(reason) = engine.projections(&context) else {
        panic!("expected a block");
    };
    assert_eq!(reason, "Choose a metric for '5k time'.");
}

#[test]
fn test_no_entered_values_block_projections() {
    let engine = InsightEngine::new(reference_tables());
    let mut context = ready_context();
    for selection in context.metric_selections.values_mut() {
        selection.current_value = None;
    }

    let ProjectionOutcome::Blocked(reason) = engine.projections(&context) else {
        panic!("expected a block");
    };
    assert!(reason.contains("current value"));
}

#[test]
fn test_stale_values_for_deselected_objectives_do_not_satisfy_the_gate() {
    let engine = InsightEngine::new(reference_tables());
    let mut context = ready_context();
    // Deselect five_k but leave its valued metric selection behind, and
    // clear the remaining objective's value (its metric has no default).
    context
        .selected
        .retain(|selection| selection.objective_id == "back_squat");
    context
        .metric_selections
        .get_mut("back_squat")
        .unwrap()
        .current_value = None;

    let ProjectionOutcome::Blocked(reason) = engine.projections(&context) else {
        panic!("expected a block");
    };
    assert!(reason.contains("current value"));
}

#[test]
fn test_interference_counts_only_catalog_objectives() {
    let engine = InsightEngine::new(reference_tables());
    let mut context = ready_context();
    context.selected = vec![
        SelectedObjective {
            objective_id: "back_squat".to_owned(),
            competition_option: None,
        },
        SelectedObjective {
            objective_id: "ghost".to_owned(),
            competition_option: None,
        },
    ];

    // One catalog objective remains, so interference is not applicable.
    let insight = engine.interference(&context);
    assert_eq!(insight.severity, Severity::None);
    assert_eq!(insight.gauge_label, "Awaiting selection");
}
