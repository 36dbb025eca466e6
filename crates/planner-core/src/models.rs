// ABOUTME: Data model for objectives, discipline weights, interference payloads, and profiles
// ABOUTME: Matches the reference-data wire formats; all tables are loaded once and read-only
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core data model for the objective planner.
//!
//! Everything here is either immutable reference data (catalog, weight
//! profiles, rate tables, interference matrix, metric definitions) or
//! user-owned input (profile, metric selections). The engine never mutates
//! any of it.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// The five physiological axes used for both balance display and
/// interference breakdowns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    /// Body composition (mass and tissue changes)
    BodyComposition,
    /// Strength and local muscular endurance
    StrengthLocalEndurance,
    /// Power and speed
    PowerSpeed,
    /// Whole-body endurance
    Endurance,
    /// Motor control and skill acquisition
    MotorControlSkill,
}

impl Axis {
    /// Canonical display order for the five axes.
    pub const ALL: [Self; 5] = [
        Self::BodyComposition,
        Self::StrengthLocalEndurance,
        Self::PowerSpeed,
        Self::Endurance,
        Self::MotorControlSkill,
    ];

    /// Snake-case wire identifier, as used in dataset payloads.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::BodyComposition => "body_composition",
            Self::StrengthLocalEndurance => "strength_local_endurance",
            Self::PowerSpeed => "power_speed",
            Self::Endurance => "endurance",
            Self::MotorControlSkill => "motor_control_skill",
        }
    }

    /// Human-readable axis label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::BodyComposition => "Body composition",
            Self::StrengthLocalEndurance => "Strength & local endurance",
            Self::PowerSpeed => "Power & speed",
            Self::Endurance => "Endurance",
            Self::MotorControlSkill => "Motor control & skill",
        }
    }

    /// Parse a wire identifier back into an axis.
    #[must_use]
    pub fn parse(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|axis| axis.id() == id)
    }
}

/// A training objective from the catalog. Immutable reference data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Objective {
    /// Stable objective identifier
    pub id: String,
    /// Display title
    pub title: String,
    /// Owning category identifier
    #[serde(default)]
    pub category_id: String,
    /// Minimum weekly training minutes this objective demands
    pub min_weekly_minutes: u32,
    /// Optional competition-focus option names
    #[serde(default)]
    pub competition_options: Vec<String>,
}

/// A catalog category grouping objectives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectiveCategory {
    /// Stable category identifier
    pub id: String,
    /// Display title
    pub title: String,
    /// Objectives registered under this category
    #[serde(default)]
    pub objectives: Vec<Objective>,
}

/// The full objective catalog, grouped by category.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObjectiveCatalog {
    /// All categories in registration order
    #[serde(default)]
    pub categories: Vec<ObjectiveCategory>,
}

impl ObjectiveCatalog {
    /// Iterate over every objective across all categories.
    pub fn objectives(&self) -> impl Iterator<Item = &Objective> {
        self.categories
            .iter()
            .flat_map(|category| category.objectives.iter())
    }

    /// Look up an objective by id.
    #[must_use]
    pub fn objective(&self, objective_id: &str) -> Option<&Objective> {
        self.objectives()
            .find(|objective| objective.id == objective_id)
    }

    /// All known objective ids.
    #[must_use]
    pub fn objective_ids(&self) -> BTreeSet<String> {
        self.objectives()
            .map(|objective| objective.id.clone())
            .collect()
    }
}

/// A named competition-focus weight map variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightOption {
    /// Option name as shown in the catalog
    pub name: String,
    /// Discipline weights for this variant
    #[serde(default)]
    pub weights: BTreeMap<String, f64>,
}

/// Per-objective discipline weights, with optional competition-focus
/// variants. Options preserve registration order so the "first available
/// option" fallback is deterministic.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisciplineWeightProfile {
    /// Base discipline weight map (sums to 1 once normalized)
    #[serde(default)]
    pub base: BTreeMap<String, f64>,
    /// Named option variants in registration order
    #[serde(default)]
    pub options: Vec<WeightOption>,
}

/// One axis entry of a precomputed interference breakdown.
///
/// The upstream payload carries the per-axis impact under `interference`
/// and a secondary `contribution` field; `impact` is preferred and
/// `contribution` is the documented fallback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterferenceBreakdown {
    /// Axis wire identifier
    pub axis: String,
    /// Optional precomputed display label
    #[serde(default)]
    pub label: Option<String>,
    /// Per-axis impact in [0, 1]
    #[serde(default, alias = "interference")]
    pub impact: Option<f64>,
    /// Secondary contribution figure, used when `impact` is absent
    #[serde(default)]
    pub contribution: Option<f64>,
}

impl InterferenceBreakdown {
    /// Impact with the `contribution` fallback applied, clamped to [0, 1].
    /// Non-finite or missing values resolve to 0.
    #[must_use]
    pub fn effective_impact(&self) -> f64 {
        self.impact
            .or(self.contribution)
            .filter(|value| value.is_finite())
            .map_or(0.0, |value| value.clamp(0.0, 1.0))
    }
}

/// Precomputed interference result for one objective combination.
/// Supplied externally; immutable per call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InterferenceResult {
    /// Overall interference score in [0, 1]
    #[serde(default)]
    pub score: f64,
    /// Score before redundancy adjustments
    #[serde(default)]
    pub score_base: f64,
    /// Ordered per-axis breakdown
    #[serde(default)]
    pub breakdown: Vec<InterferenceBreakdown>,
    /// Redundancy warnings attached to the combination
    #[serde(default)]
    pub redundancy_flags: Vec<String>,
}

/// Physiological demand magnitudes over the fixed five-axis set.
/// Missing axes default to 0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhysiologicalAxisVector(pub BTreeMap<String, f64>);

impl PhysiologicalAxisVector {
    /// Magnitude for an axis, defaulting missing entries to 0.
    #[must_use]
    pub fn get(&self, axis: Axis) -> f64 {
        self.0.get(axis.id()).copied().unwrap_or(0.0)
    }
}

impl FromIterator<(String, f64)> for PhysiologicalAxisVector {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Precomputed physiological profile record for one objective combination.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PhysiologyRecord {
    /// Aggregated axis magnitudes
    #[serde(default)]
    pub axes: PhysiologicalAxisVector,
    /// Opaque upstream metadata, passed through untouched
    #[serde(default)]
    pub meta: BTreeMap<String, serde_json::Value>,
}

/// Per-discipline training experience level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    /// New to the discipline
    Novice,
    /// Consistent training history
    Intermediate,
    /// Long training history near individual potential
    Advanced,
}

impl ExperienceLevel {
    /// Wire identifier used as the rate-table key.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Novice => "novice",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }

    /// Parse a wire string. Anything unrecognized maps to `Advanced`,
    /// matching the saturation rule's "anything else" branch.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "novice" | "beginner" => Self::Novice,
            "intermediate" => Self::Intermediate,
            _ => Self::Advanced,
        }
    }
}

/// User profile. Mutated only by explicit profile submission; the engine
/// treats it as read-only input.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserProfile {
    /// Age in years
    pub age: Option<u32>,
    /// Body weight in kilograms
    pub weight_kg: Option<f64>,
    /// Height in centimeters
    pub height_cm: Option<f64>,
    /// Self-reported gender
    pub gender: Option<String>,
    /// Per-discipline experience level
    #[serde(default)]
    pub experience: BTreeMap<String, ExperienceLevel>,
    /// Recovery-state identifier from the reference table
    pub recovery_state: Option<String>,
    /// Adherence-level identifier from the reference table
    pub adherence_level: Option<String>,
    /// Resource identifiers the user has access to
    #[serde(default)]
    pub resources: BTreeSet<String>,
    /// Weekly training availability in minutes
    #[serde(default)]
    pub weekly_availability_minutes: u32,
}

impl UserProfile {
    /// Whether every required field is set. Projections are gated on this
    /// by the engine's readiness check, not by storage.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.age.is_some()
            && self.weight_kg.is_some()
            && self.height_cm.is_some()
            && self.gender.as_deref().is_some_and(|g| !g.is_empty())
            && self.recovery_state.is_some()
            && self.adherence_level.is_some()
    }

    /// Experience level for a discipline, defaulting to `Intermediate`
    /// when the user has not rated that discipline.
    #[must_use]
    pub fn experience_for(&self, discipline: &str) -> ExperienceLevel {
        self.experience
            .get(discipline)
            .copied()
            .unwrap_or(ExperienceLevel::Intermediate)
    }
}

/// Base weekly progression rates: discipline -> experience level -> rate.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgressionRateTable(pub BTreeMap<String, BTreeMap<String, f64>>);

impl ProgressionRateTable {
    /// Rates registered for a discipline, if any.
    #[must_use]
    pub fn rates_for(&self, discipline: &str) -> Option<&BTreeMap<String, f64>> {
        self.0.get(discipline)
    }
}

/// How a global interference score translates into a discipline-specific
/// penalty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisciplineInterferenceMapping {
    /// Weight of the global score in the combined penalty, in [0, 1]
    pub base_weight: f64,
    /// Per-axis contribution weights
    #[serde(default)]
    pub axis_weights: BTreeMap<String, f64>,
}

/// The discipline interference matrix: discipline -> mapping.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InterferenceMatrix(pub BTreeMap<String, DisciplineInterferenceMapping>);

impl InterferenceMatrix {
    /// Mapping for a discipline, if registered.
    #[must_use]
    pub fn mapping_for(&self, discipline: &str) -> Option<&DisciplineInterferenceMapping> {
        self.0.get(discipline)
    }
}

/// Direction a metric is expected to move under effective training.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricTrend {
    /// Higher is better (e.g. estimated 1RM)
    Increase,
    /// Lower is better (e.g. 5k time)
    Decrease,
    /// Expected to hold steady (e.g. body weight during a skill block)
    Stable,
}

/// A trackable metric attached to an objective.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricDefinition {
    /// Stable metric identifier
    pub id: String,
    /// Display label
    pub label: String,
    /// Display unit
    pub unit: String,
    /// Discipline governing rate and interference lookups
    pub discipline: String,
    /// Expected direction of change
    pub trend: MetricTrend,
    /// Optional prefill value when the user has not entered one
    #[serde(default)]
    pub default_value: Option<f64>,
}

/// The user's chosen metric for one selected objective.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetricSelection {
    /// Chosen metric identifier
    pub metric_id: String,
    /// Current value, if the user has entered one
    pub current_value: Option<f64>,
}

/// Committed versus available weekly minutes. Derived, never stored:
/// recomputed whenever selection or availability changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyTotals {
    /// Sum of selected objectives' minimum weekly minutes
    pub committed_minutes: u32,
    /// The user's weekly availability in minutes
    pub availability_minutes: u32,
}

impl WeeklyTotals {
    /// Compute totals for a selection against an availability budget.
    #[must_use]
    pub fn for_selection(selected: &[&Objective], availability_minutes: u32) -> Self {
        let committed_minutes = selected
            .iter()
            .map(|objective| objective.min_weekly_minutes)
            .sum();
        Self {
            committed_minutes,
            availability_minutes,
        }
    }
}
