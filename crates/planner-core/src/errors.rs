// ABOUTME: Error types for dataset loading and objective-id validation
// ABOUTME: The engine itself never raises; these cover the load-once reference layer
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::path::PathBuf;

/// Errors from the dataset loading layer.
///
/// Engine computations never produce these: every missing-data condition
/// inside the engine resolves to a documented fallback. Loader errors are
/// only possible while reading the reference tables at startup.
#[derive(Debug, thiserror::Error)]
pub enum PlannerError {
    /// A dataset file could not be read
    #[error("failed to read dataset file '{path}'")]
    Io {
        /// Path that failed to read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A dataset payload failed to parse
    #[error("malformed {context} payload")]
    DataFormat {
        /// Which dataset was being parsed
        context: &'static str,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// Requested objective ids are not present in the catalog
    #[error("unknown objective ids: {objective_ids}")]
    UnknownObjectives {
        /// Comma-separated unknown ids
        objective_ids: String,
    },
}
