// ABOUTME: Projection generator: saturation-curve 12-week metric trajectories
// ABOUTME: Also owns base-rate resolution and the readiness gate that precedes generation
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Metric progression forecasting.
//!
//! Week-by-week trajectories over a 12-week horizon, driven by an
//! exponential-approach saturation curve and the composed rate modifier.
//! Invalid current values skip the metric; readiness problems block the
//! whole generation with a specific reason.

use crate::config::ProjectionConfig;
use crate::constants::projection::{
    ADVANCED_SATURATION, DEFAULT_BASE_RATE, GAIN_CAP, GAIN_FRACTION, INTERMEDIATE_SATURATION,
    LATE_BLOCK_ACCELERATION, NOVICE_SATURATION, REDUCTION_CAP, REDUCTION_FLOOR,
    REDUCTION_FRACTION, SWAY_CAP, SWAY_RATE_FRACTION,
};
use planner_core::models::{
    ExperienceLevel, MetricDefinition, MetricSelection, MetricTrend, Objective,
    ProgressionRateTable, UserProfile,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::f64::consts::TAU;
use tracing::{debug, warn};

/// One forecast point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionPoint {
    /// Week index, 0 being the starting point
    pub week: u32,
    /// Forecast metric value, rounded to 2 decimals
    pub value: f64,
    /// Percent delta from the starting value, rounded to 2 decimals
    pub percent_change: f64,
}

/// Full trajectory for one metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricProjection {
    /// Metric identifier
    pub metric_id: String,
    /// Display label
    pub label: String,
    /// Display unit
    pub unit: String,
    /// Discipline the rate and modifier were resolved for
    pub discipline: String,
    /// Expected direction of change
    pub trend: MetricTrend,
    /// Starting value the deltas are relative to
    pub starting_value: f64,
    /// Adjusted weekly rate after modifier composition and clamping
    pub adjusted_weekly_rate: f64,
    /// Weekly points from week 0 through the horizon
    pub points: Vec<ProjectionPoint>,
}

/// Outcome of the readiness gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Readiness {
    /// Projection generation may proceed
    Ready,
    /// Generation is blocked; the string names the earliest blocker
    Blocked(String),
}

/// Check whether projection generation is permitted for the current
/// selection, profile, and metric choices.
///
/// Blocking reasons are checked in order: no objectives selected,
/// incomplete profile, an objective without defined metrics, an objective
/// without a chosen metric, and finally no selected objective's chosen
/// metric carrying a finite current value. Stale selections for
/// deselected objectives never satisfy the value gate.
#[must_use]
pub fn check_readiness(
    selected: &[&Objective],
    profile: &UserProfile,
    metric_definitions: &BTreeMap<String, Vec<MetricDefinition>>,
    selections: &BTreeMap<String, MetricSelection>,
) -> Readiness {
    if selected.is_empty() {
        return Readiness::Blocked("Select at least one objective to project progress.".to_owned());
    }
    if !profile.is_complete() {
        return Readiness::Blocked(
            "Complete your profile before projections can be generated.".to_owned(),
        );
    }
    for objective in selected {
        let has_metrics = metric_definitions
            .get(&objective.id)
            .is_some_and(|defs| !defs.is_empty());
        if !has_metrics {
            return Readiness::Blocked(format!(
                "No metrics are defined for '{}'.",
                objective.title
            ));
        }
    }
    for objective in selected {
        let chosen = selections
            .get(&objective.id)
            .is_some_and(|selection| !selection.metric_id.is_empty());
        if !chosen {
            return Readiness::Blocked(format!("Choose a metric for '{}'.", objective.title));
        }
    }
    let any_value = selected.iter().any(|objective| {
        selections
            .get(&objective.id)
            .and_then(|selection| selection.current_value)
            .is_some_and(f64::is_finite)
    });
    if !any_value {
        return Readiness::Blocked(
            "Enter a current value for at least one chosen metric.".to_owned(),
        );
    }
    Readiness::Ready
}

/// Resolve the base weekly rate for a discipline and experience level.
///
/// Falls back to the average of the discipline's registered rates when
/// the level has no entry, and to a default rate when the discipline
/// itself is unknown.
#[must_use]
pub fn resolve_base_rate(
    discipline: &str,
    level: ExperienceLevel,
    rates: &ProgressionRateTable,
) -> f64 {
    let Some(levels) = rates.rates_for(discipline) else {
        warn!(discipline, "no progression rates registered; using default");
        return DEFAULT_BASE_RATE;
    };
    if let Some(rate) = levels.get(level.id()) {
        return *rate;
    }
    if levels.is_empty() {
        return DEFAULT_BASE_RATE;
    }
    let average = levels.values().sum::<f64>() / levels.len() as f64;
    debug!(
        discipline,
        level = level.id(),
        average,
        "level missing from rate table; averaging registered rates"
    );
    average
}

/// Saturation factor per experience level. Higher flattens the curve
/// sooner.
#[must_use]
pub const fn saturation_factor(level: ExperienceLevel) -> f64 {
    match level {
        ExperienceLevel::Novice => NOVICE_SATURATION,
        ExperienceLevel::Intermediate => INTERMEDIATE_SATURATION,
        ExperienceLevel::Advanced => ADVANCED_SATURATION,
    }
}

/// Generate a week-by-week trajectory for one metric.
///
/// Returns `None` when the current value is non-finite or non-positive:
/// the metric is omitted from results rather than failing the call.
#[must_use]
pub fn generate_projection(
    definition: &MetricDefinition,
    current_value: f64,
    base_rate: f64,
    modifier: f64,
    level: ExperienceLevel,
    config: &ProjectionConfig,
) -> Option<MetricProjection> {
    if !current_value.is_finite() || current_value <= 0.0 {
        return None;
    }

    let adjusted_rate =
        (base_rate * modifier).clamp(config.min_weekly_rate, config.max_weekly_rate);
    let max_gain_linear = adjusted_rate * f64::from(config.horizon_weeks);
    let saturation = saturation_factor(level);
    let horizon = f64::from(config.horizon_weeks);

    let points = (0..=config.horizon_weeks)
        .map(|week| {
            let w = f64::from(week);
            let progress_ratio =
                1.0 - (-saturation * w * (w / horizon).mul_add(LATE_BLOCK_ACCELERATION, 1.0)).exp();
            let factor = match definition.trend {
                MetricTrend::Increase => {
                    let max_gain = (max_gain_linear * GAIN_FRACTION).min(GAIN_CAP);
                    max_gain.mul_add(progress_ratio, 1.0)
                }
                MetricTrend::Decrease => {
                    let max_reduction = (max_gain_linear * REDUCTION_FRACTION).min(REDUCTION_CAP);
                    max_reduction
                        .mul_add(-progress_ratio, 1.0)
                        .max(REDUCTION_FLOOR)
                }
                MetricTrend::Stable => {
                    let sway = (adjusted_rate * SWAY_RATE_FRACTION).min(SWAY_CAP);
                    (sway * (TAU * w / horizon).sin()) + 1.0
                }
            };
            let value = current_value * factor;
            ProjectionPoint {
                week,
                value: round2(value),
                percent_change: round2((factor - 1.0) * 100.0),
            }
        })
        .collect();

    Some(MetricProjection {
        metric_id: definition.id.clone(),
        label: definition.label.clone(),
        unit: definition.unit.clone(),
        discipline: definition.discipline.clone(),
        trend: definition.trend,
        starting_value: current_value,
        adjusted_weekly_rate: adjusted_rate,
        points,
    })
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
