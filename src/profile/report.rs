//! Report building from aggregated field statistics

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::aggregator::Schema;
use super::error::ProfileError;
use super::histogram::ValueCount;
use super::types::TypeTag;

/// Placeholder shown when a field has no recorded values
pub const NOT_AVAILABLE: &str = "N/A";

/// One reported field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRow {
    /// Dotted field path
    pub path: String,
    /// Tag of the first value seen at the path
    pub type_tag: TypeTag,
    /// Share of records containing the path, rounded to two decimals
    pub occurrence_percentage: f64,
    /// Percentage formatted for display, e.g. `"66.67 %"`
    pub occurrence: String,
    /// Most frequent values, highest first
    pub top_values: Vec<ValueCount>,
    /// Number of records containing the path
    pub presence_count: u64,
    /// Full histogram in first-seen order
    pub values: IndexMap<String, u64>,
    /// Whether histogram counts are upper bounds rather than exact
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub approximate: bool,
}

impl ReportRow {
    /// Top values as `value(count)` joined with `", "`, or `N/A` when empty
    pub fn top_values_display(&self) -> String {
        if self.top_values.is_empty() {
            return NOT_AVAILABLE.to_string();
        }
        self.top_values
            .iter()
            .map(|v| format!("{}({})", v.value, v.count))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Finalized profile of a record set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// Number of records profiled
    pub total_records: u64,
    /// Number of values listed per row
    pub top_k: usize,
    /// Rows sorted by descending presence, ties in discovery order
    pub rows: Vec<ReportRow>,
}

impl Report {
    /// Look up a row by path
    pub fn row(&self, path: &str) -> Option<&ReportRow> {
        self.rows.iter().find(|r| r.path == path)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Build the report for an aggregated schema.
///
/// Pure: the schema is only read, so calling this twice yields equal
/// reports. Fails with [`ProfileError::EmptyInput`] when no record was
/// observed.
pub fn finalize(schema: &Schema, top_k: usize) -> Result<Report, ProfileError> {
    let total_records = schema.total_records();
    if total_records == 0 {
        return Err(ProfileError::EmptyInput);
    }

    let mut rows: Vec<ReportRow> = schema
        .iter()
        .map(|(path, stats)| {
            let occurrence_percentage = percentage(stats.presence_count, total_records);
            ReportRow {
                path: path.to_string(),
                type_tag: stats.type_tag,
                occurrence_percentage,
                occurrence: format_occurrence(occurrence_percentage),
                top_values: stats.histogram.top(top_k),
                presence_count: stats.presence_count,
                values: stats.histogram.to_map(),
                approximate: stats.histogram.is_approximate(),
            }
        })
        .collect();

    // Stable sort keeps discovery order among equal counts
    rows.sort_by(|a, b| b.presence_count.cmp(&a.presence_count));

    Ok(Report {
        total_records,
        top_k,
        rows,
    })
}

/// `presence * 100 / total`, rounded to two decimals with ties to even
fn percentage(presence: u64, total: u64) -> f64 {
    let raw = presence as f64 * 100.0 / total as f64;
    (raw * 100.0).round_ties_even() / 100.0
}

/// Format a percentage the way reports show it: `"100.0 %"`, `"66.67 %"`
pub fn format_occurrence(percentage: f64) -> String {
    format!("{:?} %", percentage)
}
