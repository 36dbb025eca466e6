// ABOUTME: Interference interpreter: severity classification and ranked reason strings
// ABOUTME: Turns a precomputed score and axis breakdown into gauge-ready messaging
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Interference interpretation.
//!
//! The score and breakdown arrive precomputed; this module only
//! classifies, ranks, and phrases them. A missing or unusable result
//! degrades to the "unavailable" messaging rather than failing.

use crate::config::InterpreterConfig;
use crate::constants::severity::{LOW_MAX, MODERATE_MAX};
use planner_core::models::{Axis, InterferenceResult};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Interference severity classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Not applicable: fewer than two objectives, or no usable score
    None,
    /// Score below 0.3
    Low,
    /// Score in [0.3, 0.6)
    Moderate,
    /// Score at or above 0.6
    High,
}

/// Interpreted interference insight for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterferenceInsight {
    /// One-sentence summary of the severity
    pub summary: String,
    /// Ranked reasons, at most the configured cap
    pub reasons: Vec<String>,
    /// Severity classification
    pub severity: Severity,
    /// Short caption for the gauge widget
    pub gauge_label: String,
}

/// Interpret a precomputed interference result for the current selection.
#[must_use]
pub fn interpret_interference(
    result: Option<&InterferenceResult>,
    selection_count: usize,
    config: &InterpreterConfig,
) -> InterferenceInsight {
    if selection_count <= 1 {
        return InterferenceInsight {
            summary: "Select at least two objectives to estimate interference.".to_owned(),
            reasons: Vec::new(),
            severity: Severity::None,
            gauge_label: "Awaiting selection".to_owned(),
        };
    }

    let usable = result.filter(|r| r.score.is_finite());
    let Some(result) = usable else {
        return InterferenceInsight {
            summary: "Interference data is unavailable for this selection.".to_owned(),
            reasons: Vec::new(),
            severity: Severity::None,
            gauge_label: "No data".to_owned(),
        };
    };

    let score = result.score.clamp(0.0, 1.0);
    let (severity, summary, gauge_label) = if score < LOW_MAX {
        (
            Severity::Low,
            "Low interference: these objectives coexist well with sensible scheduling.",
            "Low conflict",
        )
    } else if score < MODERATE_MAX {
        (
            Severity::Moderate,
            "Moderate interference: expect some compromise between these objectives.",
            "Some conflict",
        )
    } else {
        (
            Severity::High,
            "High interference: these objectives compete strongly for recovery and adaptation.",
            "Strong conflict",
        )
    };

    InterferenceInsight {
        summary: summary.to_owned(),
        reasons: ranked_reasons(result, config.max_reasons),
        severity,
        gauge_label: gauge_label.to_owned(),
    }
}

/// Rank breakdown entries by impact and phrase the top ones, backfilling
/// from redundancy flags up to the cap.
fn ranked_reasons(result: &InterferenceResult, max_reasons: usize) -> Vec<String> {
    let mut entries: Vec<(f64, String)> = result
        .breakdown
        .iter()
        .map(|entry| {
            let impact = entry.effective_impact();
            let label = resolve_axis_label(&entry.axis, entry.label.as_deref());
            (impact, axis_reason_description(&entry.axis, &label))
        })
        .collect();
    entries.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));

    let mut reasons: Vec<String> = entries
        .into_iter()
        .take(max_reasons)
        .map(|(impact, description)| {
            let pct = (impact * 100.0).round() as u32;
            format!("{description} (~{pct}% of the combined stress).")
        })
        .collect();

    for flag in &result.redundancy_flags {
        if reasons.len() >= max_reasons {
            break;
        }
        reasons.push(format!("Watch for repeated work: {flag}."));
    }

    if reasons.is_empty() {
        reasons.push(
            "The combination spreads stress across multiple systems without a single standout conflict."
                .to_owned(),
        );
    }

    reasons
}

/// Resolve a display label: explicit label, then the axis table, then the
/// raw id with underscores replaced by spaces.
fn resolve_axis_label(axis_id: &str, explicit: Option<&str>) -> String {
    explicit
        .filter(|label| !label.is_empty())
        .map(str::to_owned)
        .or_else(|| Axis::parse(axis_id).map(|axis| axis.label().to_owned()))
        .unwrap_or_else(|| axis_id.replace('_', " "))
}

/// Fixed descriptive template per axis id.
fn axis_reason_description(axis_id: &str, label: &str) -> String {
    match Axis::parse(axis_id) {
        Some(Axis::BodyComposition) => {
            "Competing fueling and recovery needs pull body composition in different directions"
                .to_owned()
        }
        Some(Axis::StrengthLocalEndurance) => {
            "Heavy strength work and local muscular endurance compete for the same tissue recovery"
                .to_owned()
        }
        Some(Axis::PowerSpeed) => {
            "Explosive power and speed sessions clash with fatigue from slower, high-volume work"
                .to_owned()
        }
        Some(Axis::Endurance) => {
            "High aerobic volume blunts the signaling that drives strength and power adaptations"
                .to_owned()
        }
        Some(Axis::MotorControlSkill) => {
            "Skill practice suffers when it shares the week with heavy fatiguing sessions"
                .to_owned()
        }
        None => format!("{label}: overlap in similar training demands"),
    }
}
