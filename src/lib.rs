//! BSON Schema Profiler - schema inference and field statistics for
//! schema-less document collections
//!
//! Provides:
//! - Field path discovery over nested documents and arrays
//! - BSON type tagging per field
//! - Presence and value-frequency statistics with top-K summaries
//! - Record sources for MongoDB Extended JSON exports and live collections
//! - Report exporters (text table, CSV, JSON, YAML)

pub mod export;
pub mod import;
pub mod profile;

// Re-export commonly used types
pub use export::{
    CsvExporter, ExportError, ExportFormat, ExportResult, JsonExporter, TableExporter,
    YamlExporter, export_report,
};
pub use import::{ExtJsonImporter, ImportError, InputFormat, RecordReader};
#[cfg(feature = "mongodb")]
pub use import::MongoSource;
pub use profile::{
    FieldStats, ProfileConfig, ProfileError, ProfileStats, Report, ReportRow, Schema,
    SchemaProfiler, TypeTag,
};
