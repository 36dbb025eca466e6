// ABOUTME: Weight resolver: normalization, averaging, and the per-objective fallback chain
// ABOUTME: Turns raw discipline-weight maps into normalized demand signals
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Discipline weight resolution.
//!
//! `normalize_weights` and `average_weight_maps` are reusable primitives;
//! `resolve_weights` applies the per-objective fallback chain (chosen
//! option, base, first registered option, empty).

use planner_core::models::DisciplineWeightProfile;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Normalize a raw weight map so its values sum to 1.
///
/// Non-positive and non-finite entries are dropped before summing. An
/// empty or all-non-positive input normalizes to an empty map.
#[must_use]
pub fn normalize_weights(raw: &BTreeMap<String, f64>) -> BTreeMap<String, f64> {
    let kept: Vec<(&String, f64)> = raw
        .iter()
        .filter(|(_, weight)| weight.is_finite() && **weight > 0.0)
        .map(|(discipline, weight)| (discipline, *weight))
        .collect();

    let dropped = raw.len() - kept.len();
    if dropped > 0 {
        warn!(dropped, "dropped non-positive weight entries");
    }

    let total: f64 = kept.iter().map(|(_, weight)| weight).sum();
    if total <= 0.0 {
        return BTreeMap::new();
    }

    kept.into_iter()
        .map(|(discipline, weight)| (discipline.clone(), weight / total))
        .collect()
}

/// Average several weight maps into one normalized map.
///
/// Each discipline's weight is summed across the maps that contain it and
/// divided by the count of contributing maps, then the result is
/// normalized. Averaging a single map is equivalent to normalizing it.
#[must_use]
pub fn average_weight_maps(maps: &[BTreeMap<String, f64>]) -> BTreeMap<String, f64> {
    let mut sums: BTreeMap<String, (f64, u32)> = BTreeMap::new();
    for map in maps {
        for (discipline, weight) in map {
            let entry = sums.entry(discipline.clone()).or_insert((0.0, 0));
            entry.0 += weight;
            entry.1 += 1;
        }
    }

    let means: BTreeMap<String, f64> = sums
        .into_iter()
        .map(|(discipline, (sum, count))| (discipline, sum / f64::from(count)))
        .collect();
    normalize_weights(&means)
}

/// Resolve the weight map for an objective, honoring a chosen
/// competition-focus option.
///
/// Fallback chain, first non-empty result wins:
/// 1. the option map matching `option`, if named and registered;
/// 2. the profile's base map;
/// 3. the first-registered option map;
/// 4. an empty map (no discipline signal for this objective).
#[must_use]
pub fn resolve_weights(
    profile: &DisciplineWeightProfile,
    option: Option<&str>,
) -> BTreeMap<String, f64> {
    let chosen = option.and_then(|name| {
        profile
            .options
            .iter()
            .find(|candidate| candidate.name == name)
            .map(|candidate| candidate.weights.clone())
    });

    chosen
        .filter(|weights| !weights.is_empty())
        .or_else(|| Some(profile.base.clone()).filter(|base| !base.is_empty()))
        .or_else(|| {
            profile
                .options
                .first()
                .map(|first| first.weights.clone())
                .filter(|weights| !weights.is_empty())
        })
        .unwrap_or_else(|| {
            debug!("objective resolves to an empty discipline weight map");
            BTreeMap::new()
        })
}
