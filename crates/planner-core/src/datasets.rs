// ABOUTME: Load-once parsing of reference tables and precomputed result indexes
// ABOUTME: JSON tables keyed by id, JSONL results keyed by the sorted objective-id tuple
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dataset loading for the planner's reference tables.
//!
//! Every table is parsed once at startup into an immutable in-memory
//! structure and injected into the engine. Parse functions operate on
//! string payloads so they can be exercised without fixtures on disk;
//! `load_*` wrappers add file I/O.

use crate::errors::PlannerError;
use crate::models::{
    DisciplineWeightProfile, InterferenceMatrix, InterferenceResult, MetricDefinition,
    ObjectiveCatalog, PhysiologyRecord, ProgressionRateTable,
};
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// Index of precomputed per-combination records, keyed by the sorted,
/// deduplicated objective-id tuple of each record.
#[derive(Debug, Clone, Default)]
pub struct ResultIndex<T> {
    records: BTreeMap<Vec<String>, T>,
}

/// Precomputed interference results per objective combination.
pub type InterferenceIndex = ResultIndex<InterferenceResult>;

/// Precomputed physiological profiles per objective combination.
pub type PhysiologyIndex = ResultIndex<PhysiologyRecord>;

/// Key-field precedence for interference records: the writer labels the
/// combination `inputs`, with `objectives` as the secondary spelling.
pub const INTERFERENCE_KEY_FIELDS: [&str; 2] = ["inputs", "objectives"];

/// Key-field precedence for physiology records: `objectives` first,
/// `inputs` as the secondary spelling.
pub const PHYSIOLOGY_KEY_FIELDS: [&str; 2] = ["objectives", "inputs"];

impl<T: DeserializeOwned> ResultIndex<T> {
    /// Parse a JSONL payload: one JSON record per line, blank lines
    /// skipped. Each record is keyed by the first of `key_fields` holding
    /// a non-empty id array; records without a usable key are skipped.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::DataFormat` if a non-blank line is not valid
    /// JSON or a record does not match the expected shape.
    pub fn parse_jsonl(
        payload: &str,
        key_fields: [&'static str; 2],
        context: &'static str,
    ) -> Result<Self, PlannerError> {
        let mut records = BTreeMap::new();
        for line in payload.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let value: serde_json::Value = serde_json::from_str(line)
                .map_err(|source| PlannerError::DataFormat { context, source })?;
            let key = key_fields
                .iter()
                .filter_map(|field| value.get(field))
                .filter_map(serde_json::Value::as_array)
                .find(|ids| !ids.is_empty())
                .map_or_else(Vec::new, |ids| {
                    combination_key(ids.iter().filter_map(serde_json::Value::as_str))
                });
            if key.is_empty() {
                continue;
            }
            let record: T = serde_json::from_value(value)
                .map_err(|source| PlannerError::DataFormat { context, source })?;
            records.insert(key, record);
        }
        debug!(context, records = records.len(), "parsed result index");
        Ok(Self { records })
    }

    /// Load and parse a JSONL file.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::Io` if the file cannot be read, or
    /// `PlannerError::DataFormat` on malformed records.
    pub fn load(
        path: &Path,
        key_fields: [&'static str; 2],
        context: &'static str,
    ) -> Result<Self, PlannerError> {
        Self::parse_jsonl(&read_file(path)?, key_fields, context)
    }

    /// Look up the record for a combination. The query is normalized the
    /// same way record keys are, so id order and duplicates do not matter.
    #[must_use]
    pub fn get<S: AsRef<str>>(&self, objective_ids: &[S]) -> Option<&T> {
        let key = combination_key(objective_ids.iter().map(AsRef::as_ref));
        self.records.get(&key)
    }

    /// Number of indexed combinations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the index holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Canonical combination key: sorted, deduplicated, empties dropped.
#[must_use]
pub fn combination_key<'a, I>(objective_ids: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut key: Vec<String> = objective_ids
        .into_iter()
        .filter(|id| !id.is_empty())
        .map(str::to_owned)
        .collect();
    key.sort();
    key.dedup();
    key
}

/// Normalize a requested objective-id set against the catalog: sort,
/// dedupe, drop empties, and reject ids the catalog does not know.
///
/// # Errors
///
/// Returns `PlannerError::UnknownObjectives` listing every id absent from
/// the catalog.
pub fn normalize_objective_ids(
    objective_ids: &[String],
    catalog: &ObjectiveCatalog,
) -> Result<Vec<String>, PlannerError> {
    let key = combination_key(objective_ids.iter().map(String::as_str));
    let known = catalog.objective_ids();
    let unknown: Vec<&str> = key
        .iter()
        .filter(|id| !known.contains(*id))
        .map(String::as_str)
        .collect();
    if unknown.is_empty() {
        Ok(key)
    } else {
        Err(PlannerError::UnknownObjectives {
            objective_ids: unknown.join(", "),
        })
    }
}

/// Parse the objective catalog (`objectives.json` shape).
///
/// # Errors
///
/// Returns `PlannerError::DataFormat` on malformed JSON.
pub fn parse_catalog(payload: &str) -> Result<ObjectiveCatalog, PlannerError> {
    let catalog: ObjectiveCatalog = parse_json(payload, "objective catalog")?;
    debug!(
        categories = catalog.categories.len(),
        objectives = catalog.objectives().count(),
        "parsed objective catalog"
    );
    Ok(catalog)
}

/// Parse the discipline-weight table: objective id -> weight profile.
///
/// # Errors
///
/// Returns `PlannerError::DataFormat` on malformed JSON.
pub fn parse_weight_table(
    payload: &str,
) -> Result<BTreeMap<String, DisciplineWeightProfile>, PlannerError> {
    parse_json(payload, "discipline weight table")
}

/// Parse the progression-rate table: discipline -> level -> weekly rate.
///
/// # Errors
///
/// Returns `PlannerError::DataFormat` on malformed JSON.
pub fn parse_rate_table(payload: &str) -> Result<ProgressionRateTable, PlannerError> {
    parse_json(payload, "progression rate table")
}

/// Parse the discipline-interference matrix.
///
/// # Errors
///
/// Returns `PlannerError::DataFormat` on malformed JSON.
pub fn parse_interference_matrix(payload: &str) -> Result<InterferenceMatrix, PlannerError> {
    parse_json(payload, "interference matrix")
}

/// Parse metric definitions: objective id -> metric list.
///
/// # Errors
///
/// Returns `PlannerError::DataFormat` on malformed JSON.
pub fn parse_metric_definitions(
    payload: &str,
) -> Result<BTreeMap<String, Vec<MetricDefinition>>, PlannerError> {
    parse_json(payload, "metric definitions")
}

/// Load the objective catalog from a file.
///
/// # Errors
///
/// Returns `PlannerError::Io` or `PlannerError::DataFormat`.
pub fn load_catalog(path: &Path) -> Result<ObjectiveCatalog, PlannerError> {
    parse_catalog(&read_file(path)?)
}

/// Load the discipline-weight table from a file.
///
/// # Errors
///
/// Returns `PlannerError::Io` or `PlannerError::DataFormat`.
pub fn load_weight_table(
    path: &Path,
) -> Result<BTreeMap<String, DisciplineWeightProfile>, PlannerError> {
    parse_weight_table(&read_file(path)?)
}

/// Load the progression-rate table from a file.
///
/// # Errors
///
/// Returns `PlannerError::Io` or `PlannerError::DataFormat`.
pub fn load_rate_table(path: &Path) -> Result<ProgressionRateTable, PlannerError> {
    parse_rate_table(&read_file(path)?)
}

/// Load the interference matrix from a file.
///
/// # Errors
///
/// Returns `PlannerError::Io` or `PlannerError::DataFormat`.
pub fn load_interference_matrix(path: &Path) -> Result<InterferenceMatrix, PlannerError> {
    parse_interference_matrix(&read_file(path)?)
}

/// Load metric definitions from a file.
///
/// # Errors
///
/// Returns `PlannerError::Io` or `PlannerError::DataFormat`.
pub fn load_metric_definitions(
    path: &Path,
) -> Result<BTreeMap<String, Vec<MetricDefinition>>, PlannerError> {
    parse_metric_definitions(&read_file(path)?)
}

fn parse_json<T: DeserializeOwned>(
    payload: &str,
    context: &'static str,
) -> Result<T, PlannerError> {
    serde_json::from_str(payload).map_err(|source| PlannerError::DataFormat { context, source })
}

fn read_file(path: &Path) -> Result<String, PlannerError> {
    std::fs::read_to_string(path).map_err(|source| PlannerError::Io {
        path: path.to_path_buf(),
        source,
    })
}
