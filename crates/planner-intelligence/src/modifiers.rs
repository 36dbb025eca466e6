// ABOUTME: Modifier composer: adherence, recovery, resources, availability, interference
// ABOUTME: Five independent multiplicative factors folded into one per-discipline modifier
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Progression-rate modifier composition.
//!
//! Each factor is a pure function with a documented identity fallback;
//! the composed modifier is their product. Clamping against the base rate
//! happens in the projection generator.

use crate::constants::modifier::{
    AVAILABILITY_FLOOR, COMFORT_BONUS, COMFORT_RATIO, INTERFERENCE_FLOOR, INTERFERENCE_SLOPE,
    RESOURCE_BONUS_CAP, SCORE_ONLY_SLOPE, SURPLUS_BONUS, SURPLUS_RATIO, TIGHT_PENALTY, TIGHT_RATIO,
};
use planner_core::models::{InterferenceMatrix, InterferenceResult, UserProfile, WeeklyTotals};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Reference tables for the profile-driven factors: adherence-level,
/// recovery-state, and per-resource modifier values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModifierTables {
    /// Adherence-level id -> modifier
    #[serde(default)]
    pub adherence: BTreeMap<String, f64>,
    /// Recovery-state id -> modifier
    #[serde(default)]
    pub recovery: BTreeMap<String, f64>,
    /// Resource id -> additive bonus contribution
    #[serde(default)]
    pub resources: BTreeMap<String, f64>,
}

/// Adherence factor: table lookup by the profile's adherence level,
/// identity when unset or unknown.
#[must_use]
pub fn adherence_modifier(profile: &UserProfile, tables: &ModifierTables) -> f64 {
    profile
        .adherence_level
        .as_ref()
        .and_then(|id| tables.adherence.get(id))
        .copied()
        .unwrap_or(1.0)
}

/// Recovery factor: table lookup by the profile's recovery state,
/// identity when unset or unknown.
#[must_use]
pub fn recovery_modifier(profile: &UserProfile, tables: &ModifierTables) -> f64 {
    profile
        .recovery_state
        .as_ref()
        .and_then(|id| tables.recovery.get(id))
        .copied()
        .unwrap_or(1.0)
}

/// Resource factor: a bounded positive bonus from equipment and space
/// access, `1 + min(0.2, max(0, sum of per-resource values))`.
#[must_use]
pub fn resource_modifier(profile: &UserProfile, tables: &ModifierTables) -> f64 {
    let sum: f64 = profile
        .resources
        .iter()
        .filter_map(|id| tables.resources.get(id))
        .sum();
    1.0 + sum.clamp(0.0, RESOURCE_BONUS_CAP)
}

/// Availability factor from the ratio of available to required minutes.
///
/// Returns exactly 1.0 when either quantity is 0, since the ratio is
/// undefined and neither bonus nor penalty applies.
#[must_use]
pub fn availability_modifier(totals: WeeklyTotals) -> f64 {
    if totals.availability_minutes == 0 || totals.committed_minutes == 0 {
        return 1.0;
    }
    let ratio = f64::from(totals.availability_minutes) / f64::from(totals.committed_minutes);
    if ratio >= SURPLUS_RATIO {
        SURPLUS_BONUS
    } else if ratio >= COMFORT_RATIO {
        COMFORT_BONUS
    } else if ratio >= 1.0 {
        1.0
    } else if ratio >= TIGHT_RATIO {
        TIGHT_PENALTY
    } else {
        ratio.max(AVAILABILITY_FLOOR)
    }
}

/// Interference factor for one discipline.
///
/// With a discipline mapping, the global score is blended with an
/// axis-weighted penalty from the breakdown; without one (or with no
/// breakdown axis matching), the raw score drives a gentler `1 - 0.4 *
/// score` fallback. The floor is 0.45 on the mapped path.
#[must_use]
pub fn interference_modifier(
    discipline: &str,
    matrix: &InterferenceMatrix,
    result: Option<&InterferenceResult>,
) -> f64 {
    let Some(result) = result else {
        return 1.0;
    };
    let score = if result.score.is_finite() {
        result.score.clamp(0.0, 1.0)
    } else {
        0.0
    };

    let Some(mapping) = matrix.mapping_for(discipline) else {
        return SCORE_ONLY_SLOPE.mul_add(-score, 1.0);
    };

    let mut weight_total = 0.0;
    let mut weighted_impact = 0.0;
    for entry in &result.breakdown {
        if let Some(weight) = mapping.axis_weights.get(&entry.axis) {
            weight_total += weight;
            weighted_impact += weight * entry.effective_impact();
        }
    }

    let axis_penalty = if weight_total > 0.0 {
        weighted_impact / weight_total
    } else {
        score
    };
    let base_weight = mapping.base_weight.clamp(0.0, 1.0);
    let combined = base_weight.mul_add(score, (1.0 - base_weight) * axis_penalty);
    INTERFERENCE_SLOPE.mul_add(-combined, 1.0).max(INTERFERENCE_FLOOR)
}

/// Compose the five factors into one multiplicative rate modifier for a
/// discipline.
#[must_use]
pub fn compose_modifier(
    discipline: &str,
    profile: &UserProfile,
    tables: &ModifierTables,
    matrix: &InterferenceMatrix,
    result: Option<&InterferenceResult>,
    totals: WeeklyTotals,
) -> f64 {
    let adherence = adherence_modifier(profile, tables);
    let recovery = recovery_modifier(profile, tables);
    let resources = resource_modifier(profile, tables);
    let availability = availability_modifier(totals);
    let interference = interference_modifier(discipline, matrix, result);

    debug!(
        discipline,
        adherence, recovery, resources, availability, interference, "composed rate modifier"
    );

    adherence * recovery * resources * availability * interference
}
