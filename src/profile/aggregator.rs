//! Frequency aggregation across records

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::flatten::FlattenedRecord;
use super::histogram::{ValueHistogram, value_key};
use super::types::TypeTag;

/// Running statistics for one field path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldStats {
    /// Tag of the first scalar ever observed at this path
    pub type_tag: TypeTag,
    /// Number of records holding at least one value at this path
    pub presence_count: u64,
    /// Occurrences per stringified value, across all records and array elements
    pub histogram: ValueHistogram,
}

impl FieldStats {
    fn new(type_tag: TypeTag, capacity: Option<usize>) -> Self {
        Self {
            type_tag,
            presence_count: 0,
            histogram: match capacity {
                Some(capacity) => ValueHistogram::bounded(capacity),
                None => ValueHistogram::new(),
            },
        }
    }
}

/// Field statistics for a whole record set, in first-discovery order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    fields: IndexMap<String, FieldStats>,
    total_records: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    histogram_capacity: Option<usize>,
}

impl Schema {
    /// Empty schema with exact histograms
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty schema whose histograms track at most `capacity` values each
    pub fn with_histogram_capacity(capacity: Option<usize>) -> Self {
        Self {
            histogram_capacity: capacity,
            ..Self::default()
        }
    }

    /// Merge one flattened record.
    ///
    /// The record count grows by one regardless of content. Each path present
    /// gains one presence, and each scalar at the path one histogram hit. A
    /// path's type tag is fixed by the first scalar that created it.
    pub fn observe(&mut self, record: &FlattenedRecord<'_>) {
        self.total_records += 1;

        for (path, scalars) in record.iter() {
            let Some(first) = scalars.first() else {
                continue;
            };

            let capacity = self.histogram_capacity;
            let stats = self.fields.entry(path.to_string()).or_insert_with(|| {
                debug!(path, tag = %first.tag, "discovered field");
                FieldStats::new(first.tag, capacity)
            });

            stats.presence_count += 1;

            let was_approximate = stats.histogram.is_approximate();
            for scalar in scalars {
                stats.histogram.record(value_key(scalar.value));
            }
            if !was_approximate && stats.histogram.is_approximate() {
                warn!(
                    path,
                    capacity = ?stats.histogram.capacity(),
                    "value histogram full, counts are now approximate"
                );
            }
        }
    }

    /// Statistics for one path
    pub fn get(&self, path: &str) -> Option<&FieldStats> {
        self.fields.get(path)
    }

    /// Paths and statistics in first-discovery order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldStats)> {
        self.fields.iter().map(|(p, s)| (p.as_str(), s))
    }

    /// Number of records observed
    pub fn total_records(&self) -> u64 {
        self.total_records
    }

    /// Number of distinct paths
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn histogram_capacity(&self) -> Option<usize> {
        self.histogram_capacity
    }
}
