// ABOUTME: Physiological balance classifier: axis shares, emphasis tag, narrative
// ABOUTME: Pure function of one axis vector; independent of every other component
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Physiological balance classification.

use crate::constants::balance::{DOMINANT_GAP, DOMINANT_TOP_SHARE, TILT_GAP};
use planner_core::models::{Axis, PhysiologicalAxisVector};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// One axis with its rounded percentage share of the total demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisShare {
    /// Axis wire identifier
    pub axis: String,
    /// Display label
    pub label: String,
    /// Rounded percentage share of the total demand
    pub percent: u32,
}

/// How concentrated the physiological demand is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Emphasis {
    /// No usable demand data
    None,
    /// Demand spread evenly across axes
    Balanced,
    /// One axis clearly ahead without dominating
    Tilt,
    /// One axis carries at least half the demand with a clear gap
    Dominant,
}

/// Full balance classification for one axis vector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceReport {
    /// Per-axis shares in canonical axis order
    pub axes: Vec<AxisShare>,
    /// Emphasis classification
    pub emphasis: Emphasis,
    /// Label of the dominant axis, when one exists
    pub dominant_axis: Option<String>,
    /// One-sentence summary of the classification
    pub narrative: String,
}

/// Classify an axis vector into shares, an emphasis tag, and a narrative.
///
/// Missing axes default to 0 and negative magnitudes are treated as 0. A
/// vector with no positive demand classifies as `Emphasis::None`.
#[must_use]
pub fn classify_balance(vector: &PhysiologicalAxisVector) -> BalanceReport {
    let values: Vec<(Axis, f64)> = Axis::ALL
        .into_iter()
        .map(|axis| (axis, vector.get(axis).max(0.0)))
        .collect();
    let total: f64 = values.iter().map(|(_, value)| value).sum();

    if total <= 0.0 {
        let axes = values
            .iter()
            .map(|(axis, _)| AxisShare {
                axis: axis.id().to_owned(),
                label: axis.label().to_owned(),
                percent: 0,
            })
            .collect();
        return BalanceReport {
            axes,
            emphasis: Emphasis::None,
            dominant_axis: None,
            narrative: "No physiological demand data is available for this selection.".to_owned(),
        };
    }

    let axes: Vec<AxisShare> = values
        .iter()
        .map(|(axis, value)| AxisShare {
            axis: axis.id().to_owned(),
            label: axis.label().to_owned(),
            percent: (100.0 * value / total).round() as u32,
        })
        .collect();

    // Stable sort keeps canonical order between tied axes.
    let mut ranked = values;
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    let (top_axis, top_value) = ranked[0];
    let second = ranked.get(1).copied();

    let top_share = top_value / total;
    let second_share = second.map_or(0.0, |(_, value)| value / total);
    let gap = top_share - second_share;

    let emphasis = if top_share >= DOMINANT_TOP_SHARE && gap >= DOMINANT_GAP {
        Emphasis::Dominant
    } else if gap >= TILT_GAP {
        Emphasis::Tilt
    } else {
        Emphasis::Balanced
    };

    let top_pct = (100.0 * top_share).round() as u32;
    let second_pct = (100.0 * second_share).round() as u32;
    let second_label = second.map_or("", |(axis, _)| axis.label());

    let narrative = match emphasis {
        Emphasis::Dominant => format!(
            "{} dominates this combination at {top_pct}% of the physiological demand.",
            top_axis.label()
        ),
        Emphasis::Tilt => format!(
            "Demand tilts toward {} at {top_pct}%, ahead of {second_label} at {second_pct}%.",
            top_axis.label()
        ),
        Emphasis::Balanced | Emphasis::None => format!(
            "Demand is balanced across axes, led by {} at {top_pct}% and {second_label} at {second_pct}%.",
            top_axis.label()
        ),
    };

    BalanceReport {
        axes,
        emphasis,
        dominant_axis: (emphasis == Emphasis::Dominant).then(|| top_axis.label().to_owned()),
        narrative,
    }
}
