// ABOUTME: Engine façade: reference tables plus a selection context in, insights out
// ABOUTME: Every method is a pure function of (tables, context); recomputation is idempotent
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The insight engine façade.
//!
//! Reference tables are loaded once and injected; per-call state travels
//! in an explicit [`SelectionContext`] rather than ambient globals. The
//! caller owns stale-result avoidance: the interference result and axis
//! vector in the context must match the current selection.

use crate::balance::{classify_balance, BalanceReport};
use crate::config::{InterpreterConfig, ProjectionConfig};
use crate::interference::{interpret_interference, InterferenceInsight};
use crate::modifiers::{compose_modifier, ModifierTables};
use crate::projection::{
    check_readiness, generate_projection, resolve_base_rate, MetricProjection, Readiness,
};
use crate::weights::{average_weight_maps, resolve_weights};
use planner_core::models::{
    DisciplineWeightProfile, InterferenceMatrix, InterferenceResult, MetricDefinition,
    MetricSelection, Objective, ObjectiveCatalog, PhysiologicalAxisVector, ProgressionRateTable,
    UserProfile, WeeklyTotals,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// All reference tables the engine reads. Loaded once at startup,
/// immutable thereafter.
#[derive(Debug, Clone, Default)]
pub struct ReferenceTables {
    /// Objective catalog
    pub catalog: ObjectiveCatalog,
    /// Objective id -> discipline weight profile
    pub weights: BTreeMap<String, DisciplineWeightProfile>,
    /// Discipline -> experience level -> base weekly rate
    pub rates: ProgressionRateTable,
    /// Discipline -> interference mapping
    pub interference_matrix: InterferenceMatrix,
    /// Objective id -> metric definitions
    pub metric_definitions: BTreeMap<String, Vec<MetricDefinition>>,
    /// Adherence, recovery, and resource modifier tables
    pub modifier_tables: ModifierTables,
}

/// One selected objective with its chosen competition-focus option.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectedObjective {
    /// Objective id from the catalog
    pub objective_id: String,
    /// Chosen competition-focus option, if any
    pub competition_option: Option<String>,
}

/// Per-call input state: the user's current selection, profile, metric
/// choices, and the externally fetched results for that selection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SelectionContext {
    /// Selected objectives in selection order
    pub selected: Vec<SelectedObjective>,
    /// The user's profile
    pub profile: UserProfile,
    /// Objective id -> chosen metric
    pub metric_selections: BTreeMap<String, MetricSelection>,
    /// Precomputed interference result for this selection, if fetched
    pub interference: Option<InterferenceResult>,
    /// Precomputed axis vector for this selection, if fetched
    pub axis_vector: Option<PhysiologicalAxisVector>,
}

/// One objective's metric projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectiveProjection {
    /// Objective the metric belongs to
    pub objective_id: String,
    /// The projected trajectory
    pub metric: MetricProjection,
}

/// Result of a projection request: either trajectories or the earliest
/// blocking reason. Blocking is an expected control path, not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "body", rename_all = "snake_case")]
pub enum ProjectionOutcome {
    /// Projections were generated (metrics with invalid values omitted)
    Ready(Vec<ObjectiveProjection>),
    /// Generation is blocked for the named reason
    Blocked(String),
}

/// The training insight and projection engine.
pub struct InsightEngine {
    tables: ReferenceTables,
    interpreter_config: InterpreterConfig,
    projection_config: ProjectionConfig,
}

impl InsightEngine {
    /// Create an engine over loaded reference tables with default
    /// component configuration.
    #[must_use]
    pub fn new(tables: ReferenceTables) -> Self {
        Self {
            tables,
            interpreter_config: InterpreterConfig::default(),
            projection_config: ProjectionConfig::default(),
        }
    }

    /// Create an engine with custom component configuration.
    #[must_use]
    pub const fn with_config(
        tables: ReferenceTables,
        interpreter_config: InterpreterConfig,
        projection_config: ProjectionConfig,
    ) -> Self {
        Self {
            tables,
            interpreter_config,
            projection_config,
        }
    }

    /// Committed versus available weekly minutes for the selection.
    #[must_use]
    pub fn weekly_totals(&self, context: &SelectionContext) -> WeeklyTotals {
        let selected = self.selected_objectives(context);
        WeeklyTotals::for_selection(&selected, context.profile.weekly_availability_minutes)
    }

    /// Physiological balance classification for the selection's axis
    /// vector. A missing vector classifies as no usable demand data.
    #[must_use]
    pub fn balance(&self, context: &SelectionContext) -> BalanceReport {
        let empty = PhysiologicalAxisVector::default();
        classify_balance(context.axis_vector.as_ref().unwrap_or(&empty))
    }

    /// Interpreted interference insight for the selection. The selection
    /// count is taken after catalog filtering, matching the other methods.
    #[must_use]
    pub fn interference(&self, context: &SelectionContext) -> InterferenceInsight {
        interpret_interference(
            context.interference.as_ref(),
            self.selected_objectives(context).len(),
            &self.interpreter_config,
        )
    }

    /// Normalized discipline demand across the selection: each objective's
    /// weights are resolved through the fallback chain, then averaged.
    #[must_use]
    pub fn discipline_demand(&self, context: &SelectionContext) -> BTreeMap<String, f64> {
        let maps: Vec<BTreeMap<String, f64>> = context
            .selected
            .iter()
            .map(|selection| {
                self.tables.weights.get(&selection.objective_id).map_or_else(
                    || {
                        debug!(
                            objective_id = %selection.objective_id,
                            "no weight profile registered for objective"
                        );
                        BTreeMap::new()
                    },
                    |profile| resolve_weights(profile, selection.competition_option.as_deref()),
                )
            })
            .filter(|map| !map.is_empty())
            .collect();
        average_weight_maps(&maps)
    }

    /// Composed rate modifier for one discipline under the current
    /// context.
    #[must_use]
    pub fn modifier_for(&self, context: &SelectionContext, discipline: &str) -> f64 {
        compose_modifier(
            discipline,
            &context.profile,
            &self.tables.modifier_tables,
            &self.tables.interference_matrix,
            context.interference.as_ref(),
            self.weekly_totals(context),
        )
    }

    /// Generate 12-week projections for every selected objective's chosen
    /// metric, or report the earliest blocking reason.
    ///
    /// Metrics whose current value is non-finite or non-positive are
    /// omitted from the result rather than blocking it.
    #[must_use]
    pub fn projections(&self, context: &SelectionContext) -> ProjectionOutcome {
        let selected = self.selected_objectives(context);
        let readiness = check_readiness(
            &selected,
            &context.profile,
            &self.tables.metric_definitions,
            &context.metric_selections,
        );
        if let Readiness::Blocked(reason) = readiness {
            return ProjectionOutcome::Blocked(reason);
        }

        let totals = self.weekly_totals(context);
        let mut projections = Vec::new();
        for objective in &selected {
            let Some(selection) = context.metric_selections.get(&objective.id) else {
                continue;
            };
            let Some(definition) = self
                .tables
                .metric_definitions
                .get(&objective.id)
                .and_then(|defs| defs.iter().find(|def| def.id == selection.metric_id))
            else {
                warn!(
                    objective_id = %objective.id,
                    metric_id = %selection.metric_id,
                    "chosen metric is not defined for the objective; skipping"
                );
                continue;
            };

            let current_value = selection
                .current_value
                .or(definition.default_value)
                .filter(|value| value.is_finite());
            let Some(current_value) = current_value else {
                continue;
            };

            let level = context.profile.experience_for(&definition.discipline);
            let base_rate = resolve_base_rate(&definition.discipline, level, &self.tables.rates);
            let modifier = compose_modifier(
                &definition.discipline,
                &context.profile,
                &self.tables.modifier_tables,
                &self.tables.interference_matrix,
                context.interference.as_ref(),
                totals,
            );

            if let Some(metric) = generate_projection(
                definition,
                current_value,
                base_rate,
                modifier,
                level,
                &self.projection_config,
            ) {
                projections.push(ObjectiveProjection {
                    objective_id: objective.id.clone(),
                    metric,
                });
            }
        }

        ProjectionOutcome::Ready(projections)
    }

    /// Resolve the selection's objective ids against the catalog,
    /// skipping ids the catalog does not know.
    fn selected_objectives<'a>(&'a self, context: &SelectionContext) -> Vec<&'a Objective> {
        context
            .selected
            .iter()
            .filter_map(|selection| {
                let objective = self.tables.catalog.objective(&selection.objective_id);
                if objective.is_none() {
                    warn!(
                        objective_id = %selection.objective_id,
                        "selected objective missing from catalog; skipping"
                    );
                }
                objective
            })
            .collect()
    }
}
