// ABOUTME: Training insight and projection engine for the objective planner
// ABOUTME: Pure-computation layer: weights, balance, interference, modifiers, projections
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Planner Intelligence
//!
//! The training insight and projection engine. Stateless per call: every
//! operation is a pure function of the injected reference tables and an
//! explicit selection context, so recomputation on any input change is
//! idempotent and safe to repeat.
//!
//! Components, leaf to root: the weight resolver and interference
//! interpreter feed the modifier composer; the modifier composer feeds
//! the projection generator; the balance classifier is independent and
//! consumes only an axis vector.

/// Physiological balance classification
pub mod balance;
/// Component configuration
pub mod config;
/// Shared tuning constants
pub mod constants;
/// Engine façade over reference tables and a selection context
pub mod engine;
/// Interference severity and reason interpretation
pub mod interference;
/// Rate modifier composition
pub mod modifiers;
/// Metric progression forecasting and the readiness gate
pub mod projection;
/// Discipline weight resolution
pub mod weights;

pub use balance::{classify_balance, AxisShare, BalanceReport, Emphasis};
pub use config::{InterpreterConfig, ProjectionConfig};
pub use engine::{
    InsightEngine, ObjectiveProjection, ProjectionOutcome, ReferenceTables, SelectedObjective,
    SelectionContext,
};
pub use interference::{interpret_interference, InterferenceInsight, Severity};
pub use modifiers::{
    adherence_modifier, availability_modifier, compose_modifier, interference_modifier,
    recovery_modifier, resource_modifier, ModifierTables,
};
pub use projection::{
    check_readiness, generate_projection, resolve_base_rate, saturation_factor, MetricProjection,
    ProjectionPoint, Readiness,
};
pub use weights::{average_weight_maps, normalize_weights, resolve_weights};
