// ABOUTME: Named thresholds and factors for severity, balance, modifiers, and projections
// ABOUTME: Single source for every tuning constant the engine components share
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Engine tuning constants.
//!
//! Grouped by component so each module imports only the thresholds it
//! actually applies. Values match the precomputed interference datasets;
//! changing them changes classification boundaries, not data.

/// Interference severity classification thresholds over the clamped
/// overall score.
pub mod severity {
    /// Scores below this classify as low interference
    pub const LOW_MAX: f64 = 0.3;

    /// Scores below this (and at or above `LOW_MAX`) classify as moderate
    pub const MODERATE_MAX: f64 = 0.6;
}

/// Physiological balance classification thresholds over axis shares.
pub mod balance {
    /// Minimum top-axis share for a "dominant" classification
    pub const DOMINANT_TOP_SHARE: f64 = 0.5;

    /// Minimum gap between the top and second shares for "dominant"
    pub const DOMINANT_GAP: f64 = 0.15;

    /// Minimum top-to-second gap for a "tilt" classification
    pub const TILT_GAP: f64 = 0.10;
}

/// Bounds and ladder steps for the five rate-modifier factors.
pub mod modifier {
    /// Cap on the summed resource bonus before it is added to 1
    pub const RESOURCE_BONUS_CAP: f64 = 0.2;

    /// Availability ratio granting the full surplus bonus
    pub const SURPLUS_RATIO: f64 = 1.25;
    /// Modifier at or above `SURPLUS_RATIO`
    pub const SURPLUS_BONUS: f64 = 1.08;

    /// Availability ratio granting the comfortable-margin bonus
    pub const COMFORT_RATIO: f64 = 1.10;
    /// Modifier at or above `COMFORT_RATIO`
    pub const COMFORT_BONUS: f64 = 1.04;

    /// Availability ratio below 1.0 treated as a mild shortfall
    pub const TIGHT_RATIO: f64 = 0.90;
    /// Modifier for the mild-shortfall band
    pub const TIGHT_PENALTY: f64 = 0.92;

    /// Floor on the availability modifier for severe shortfalls
    pub const AVAILABILITY_FLOOR: f64 = 0.65;

    /// Floor on the interference modifier
    pub const INTERFERENCE_FLOOR: f64 = 0.45;

    /// Slope applied to the combined interference penalty
    pub const INTERFERENCE_SLOPE: f64 = 0.75;

    /// Slope of the score-only fallback when no discipline mapping exists
    pub const SCORE_ONLY_SLOPE: f64 = 0.4;
}

/// Projection horizon, rate bounds, and saturation-curve factors.
pub mod projection {
    /// Lowest adjusted weekly rate after modifier composition
    pub const MIN_WEEKLY_RATE: f64 = 0.0025;

    /// Highest adjusted weekly rate after modifier composition
    pub const MAX_WEEKLY_RATE: f64 = 0.07;

    /// Forecast horizon in weeks
    pub const HORIZON_WEEKS: u32 = 12;

    /// Saturation factor for novices: gains arrive late, curve stays open
    pub const NOVICE_SATURATION: f64 = 0.4;

    /// Saturation factor for intermediates
    pub const INTERMEDIATE_SATURATION: f64 = 0.5;

    /// Saturation factor for advanced trainees: curve flattens soonest
    pub const ADVANCED_SATURATION: f64 = 0.65;

    /// Late-block acceleration of the saturation exponent
    pub const LATE_BLOCK_ACCELERATION: f64 = 0.5;

    /// Fraction of the linear gain ceiling reachable on an increase trend
    pub const GAIN_FRACTION: f64 = 0.9;

    /// Hard cap on total relative gain over the horizon
    pub const GAIN_CAP: f64 = 0.5;

    /// Fraction of the linear ceiling reachable on a decrease trend
    pub const REDUCTION_FRACTION: f64 = 0.8;

    /// Hard cap on total relative reduction over the horizon
    pub const REDUCTION_CAP: f64 = 0.4;

    /// A decrease-trend metric never improves past this fraction of its
    /// starting value
    pub const REDUCTION_FLOOR: f64 = 0.5;

    /// Fraction of the adjusted rate that sets the stable-trend sway
    pub const SWAY_RATE_FRACTION: f64 = 0.15;

    /// Cap on the stable-trend sway amplitude
    pub const SWAY_CAP: f64 = 0.02;

    /// Weekly rate assumed for disciplines missing from the rate table
    pub const DEFAULT_BASE_RATE: f64 = 0.02;
}
