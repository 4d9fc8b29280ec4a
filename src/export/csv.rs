//! CSV exporter for profile reports.
//!
//! One header row followed by one row per field, in report order. The
//! `Occurrence` column carries the formatted percentage (`"66.67 %"`).

use crate::export::{ExportError, ExportResult, column_headers, row_cells};
use crate::profile::Report;

/// Exporter for CSV format.
pub struct CsvExporter;

impl CsvExporter {
    /// Export a report as comma-separated text
    pub fn export(report: &Report) -> Result<ExportResult, ExportError> {
        Self::export_with_delimiter(report, b',')
    }

    /// Export a report with a custom delimiter (e.g. `b';'` for spreadsheet locales)
    pub fn export_with_delimiter(
        report: &Report,
        delimiter: u8,
    ) -> Result<ExportResult, ExportError> {
        let mut writer = ::csv::WriterBuilder::new()
            .delimiter(delimiter)
            .from_writer(Vec::new());

        writer
            .write_record(column_headers(report))
            .map_err(|e| ExportError::CsvError(e.to_string()))?;
        for row in &report.rows {
            writer
                .write_record(row_cells(row))
                .map_err(|e| ExportError::CsvError(e.to_string()))?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| ExportError::CsvError(e.to_string()))?;
        let content =
            String::from_utf8(bytes).map_err(|e| ExportError::SerializationError(e.to_string()))?;

        Ok(ExportResult {
            content,
            format: "csv".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::SchemaProfiler;
    use bson::doc;

    #[test]
    fn test_export_csv() {
        let mut profiler = SchemaProfiler::new();
        profiler
            .add_documents(&[doc! { "a": 1 }, doc! { "a": 2 }, doc! { "a": 1 }])
            .unwrap();
        let report = profiler.finalize().unwrap();

        let result = CsvExporter::export(&report).unwrap();
        let mut lines = result.content.lines();
        assert_eq!(
            lines.next(),
            Some("Field,Data Type,Occurrence,Top 10 Values,Field Count")
        );
        assert_eq!(lines.next(), Some("a,int32,100.0 %,\"1(2), 2(1)\",3"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_export_csv_semicolon() {
        let mut profiler = SchemaProfiler::new();
        profiler.add_document(&doc! { "x": "y" }).unwrap();
        let report = profiler.finalize().unwrap();

        let result = CsvExporter::export_with_delimiter(&report, b';').unwrap();
        assert!(result.content.contains("x;string;100.0 %;y(1);1"));
    }
}
