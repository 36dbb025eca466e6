// ABOUTME: Component configuration for the interpreter and projection generator
// ABOUTME: Defaults draw on the constants module; tests inject shrunken variants
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Engine component configuration.

use crate::constants::projection;
use serde::{Deserialize, Serialize};

/// Configuration for the interference interpreter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterpreterConfig {
    /// Maximum number of ranked reasons to surface
    pub max_reasons: usize,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self { max_reasons: 3 }
    }
}

/// Configuration for the projection generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionConfig {
    /// Forecast horizon in weeks
    pub horizon_weeks: u32,
    /// Lower clamp on the adjusted weekly rate
    pub min_weekly_rate: f64,
    /// Upper clamp on the adjusted weekly rate
    pub max_weekly_rate: f64,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            horizon_weeks: projection::HORIZON_WEEKS,
            min_weekly_rate: projection::MIN_WEEKLY_RATE,
            max_weekly_rate: projection::MAX_WEEKLY_RATE,
        }
    }
}
