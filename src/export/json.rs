//! JSON and YAML exporters.
//!
//! Unlike the row-shaped CSV and table views these mirror the raw
//! statistics: an object keyed by field path (in report order) holding the
//! type, presence count, formatted occurrence and the full value histogram.

use serde_json::{Map, Value, json};

use crate::export::{ExportError, ExportResult};
use crate::profile::Report;

/// Exporter for JSON format.
pub struct JsonExporter;

impl JsonExporter {
    /// Build the JSON value for a report
    ///
    /// ```rust
    /// use bson::doc;
    /// use bson_schema_profiler::export::JsonExporter;
    /// use bson_schema_profiler::profile::SchemaProfiler;
    ///
    /// let mut profiler = SchemaProfiler::new();
    /// profiler.add_document(&doc! { "a": 1 }).unwrap();
    /// let value = JsonExporter::to_value(&profiler.finalize().unwrap());
    /// assert_eq!(value["a"]["sum"], 1);
    /// assert_eq!(value["a"]["values"]["1"], 1);
    /// ```
    pub fn to_value(report: &Report) -> Value {
        let mut fields = Map::new();
        for row in &report.rows {
            let values: Map<String, Value> = row
                .values
                .iter()
                .map(|(value, count)| (value.clone(), json!(count)))
                .collect();

            let mut entry = Map::new();
            entry.insert("type".to_string(), json!(row.type_tag));
            entry.insert("sum".to_string(), json!(row.presence_count));
            entry.insert("occurrence".to_string(), json!(row.occurrence));
            entry.insert("values".to_string(), Value::Object(values));
            if row.approximate {
                entry.insert("approximate".to_string(), Value::Bool(true));
            }

            fields.insert(row.path.clone(), Value::Object(entry));
        }
        Value::Object(fields)
    }

    /// Export a report as pretty-printed JSON
    pub fn export(report: &Report) -> Result<ExportResult, ExportError> {
        let content = serde_json::to_string_pretty(&Self::to_value(report))
            .map_err(|e| ExportError::SerializationError(e.to_string()))?;
        Ok(ExportResult {
            content,
            format: "json".to_string(),
        })
    }
}

/// Exporter for YAML format, same shape as [`JsonExporter`].
pub struct YamlExporter;

impl YamlExporter {
    pub fn export(report: &Report) -> Result<ExportResult, ExportError> {
        let content = serde_yaml::to_string(&JsonExporter::to_value(report))
            .map_err(|e| ExportError::SerializationError(e.to_string()))?;
        Ok(ExportResult {
            content,
            format: "yaml".to_string(),
        })
    }
}
