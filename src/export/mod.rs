//! Export functionality
//!
//! Renders a finalized [`Report`] in several formats:
//! - Text table (fixed-width, for terminals)
//! - CSV
//! - JSON (field path to raw statistics)
//! - YAML (same shape as JSON)

pub mod csv;
pub mod json;
pub mod table;

use std::str::FromStr;

use crate::profile::Report;

/// Result of an export operation
#[derive(Debug, Clone, PartialEq)]
pub struct ExportResult {
    /// Exported content
    pub content: String,
    /// Format identifier
    pub format: String,
}

/// Error during export
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Serialization error: {0}")]
    SerializationError(String),
    #[error("CSV error: {0}")]
    CsvError(String),
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Unknown export format: {0}")]
    UnknownFormat(String),
}

impl From<std::io::Error> for ExportError {
    fn from(e: std::io::Error) -> Self {
        ExportError::IoError(e.to_string())
    }
}

/// Output format for a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Table,
    Csv,
    Json,
    Yaml,
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "table" | "text" | "ascii" => Ok(ExportFormat::Table),
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            "yaml" | "yml" => Ok(ExportFormat::Yaml),
            other => Err(ExportError::UnknownFormat(other.to_string())),
        }
    }
}

/// Export a report in the given format
pub fn export_report(report: &Report, format: ExportFormat) -> Result<ExportResult, ExportError> {
    match format {
        ExportFormat::Table => Ok(TableExporter::default().export(report)),
        ExportFormat::Csv => CsvExporter::export(report),
        ExportFormat::Json => JsonExporter::export(report),
        ExportFormat::Yaml => YamlExporter::export(report),
    }
}

/// Column headers shared by the row-shaped exports
pub fn column_headers(report: &Report) -> [String; 5] {
    [
        "Field".to_string(),
        "Data Type".to_string(),
        "Occurrence".to_string(),
        format!("Top {} Values", report.top_k),
        "Field Count".to_string(),
    ]
}

/// Cells of one row, in [`column_headers`] order
pub(crate) fn row_cells(row: &crate::profile::ReportRow) -> [String; 5] {
    [
        row.path.clone(),
        row.type_tag.to_string(),
        row.occurrence.clone(),
        row.top_values_display(),
        row.presence_count.to_string(),
    ]
}

// Re-export for convenience
pub use self::csv::CsvExporter;
pub use json::{JsonExporter, YamlExporter};
pub use table::TableExporter;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_export_format() {
        assert_eq!("csv".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!("ascii".parse::<ExportFormat>().unwrap(), ExportFormat::Table);
        assert_eq!("yml".parse::<ExportFormat>().unwrap(), ExportFormat::Yaml);
        assert!("pdf".parse::<ExportFormat>().is_err());
    }
}
