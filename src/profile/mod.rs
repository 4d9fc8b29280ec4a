//! Schema profiling engine for BSON documents
//!
//! This module discovers every field path in a collection of schema-less
//! documents, tags each path with a BSON type and accumulates presence and
//! value-frequency statistics into a ranked report.
//!
//! ## Pipeline
//!
//! - **Classification** - Map a scalar to one [`TypeTag`] from a closed set
//! - **Flattening** - Turn a nested document into dotted field paths
//! - **Aggregation** - Merge flattened records into a running [`Schema`]
//! - **Reporting** - Finalize the schema into a sorted [`Report`]
//!
//! ## Example
//!
//! ```rust
//! use bson::doc;
//! use bson_schema_profiler::profile::SchemaProfiler;
//!
//! let mut profiler = SchemaProfiler::new();
//! profiler.add_document(&doc! { "name": "Alice", "tags": ["a", "b"] })?;
//! profiler.add_document(&doc! { "name": "Bob" })?;
//!
//! let report = profiler.finalize()?;
//! assert_eq!(report.rows[0].path, "name");
//! assert_eq!(report.rows[0].occurrence, "100.0 %");
//! # Ok::<(), bson_schema_profiler::profile::ProfileError>(())
//! ```

mod aggregator;
mod classify;
mod config;
mod error;
mod flatten;
mod histogram;
mod profiler;
mod report;
mod types;

pub use aggregator::{FieldStats, Schema};
pub use classify::classify;
pub use config::{ProfileConfig, ProfileConfigBuilder};
pub use error::{ProfileError, UnsupportedTypeError};
pub use flatten::{FlattenedRecord, Scalar, flatten, flatten_value};
pub use histogram::{ValueCount, ValueHistogram, value_key};
pub use profiler::{ProfileStats, SchemaProfiler};
pub use report::{NOT_AVAILABLE, Report, ReportRow, finalize, format_occurrence};
pub use types::{PATH_SEPARATOR, TypeTag};
