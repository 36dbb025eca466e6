// ABOUTME: Core crate for the objective planner: data model, dataset loading, errors
// ABOUTME: Holds everything the intelligence engine consumes as read-only reference data
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Planner Core
//!
//! Reference data model and dataset loading for the hybrid objective
//! planner. The companion `planner-intelligence` crate implements the
//! computation layer on top of these types.

/// Dataset parsing and load-once reference table construction
pub mod datasets;
/// Loader error types
pub mod errors;
/// Data model shared across the workspace
pub mod models;

pub use errors::PlannerError;
pub use models::{
    Axis, DisciplineInterferenceMapping, DisciplineWeightProfile, ExperienceLevel,
    InterferenceBreakdown, InterferenceMatrix, InterferenceResult, MetricDefinition,
    MetricSelection, MetricTrend, Objective, ObjectiveCatalog, ObjectiveCategory,
    PhysiologicalAxisVector, PhysiologyRecord, ProgressionRateTable, UserProfile, WeeklyTotals,
    WeightOption,
};
