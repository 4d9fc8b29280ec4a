//! Schema profiler driving flattening, aggregation and reporting

use bson::{Bson, Document};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::aggregator::Schema;
use super::config::ProfileConfig;
use super::error::ProfileError;
use super::flatten::{flatten, flatten_value};
use super::report::{Report, finalize};

/// Statistics from a profiling run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileStats {
    /// Total records processed
    pub records_processed: u64,
    /// Total field paths discovered
    pub fields_discovered: usize,
    /// Distinct values tracked across all histograms
    pub histogram_entries: usize,
    /// Fields whose histograms hit their capacity
    pub approximate_fields: usize,
}

/// Schema profiler
///
/// Consumes records one at a time and owns the schema being built. Each run
/// has its own profiler; nothing is shared between runs.
#[derive(Debug, Clone)]
pub struct SchemaProfiler {
    config: ProfileConfig,
    schema: Schema,
}

impl SchemaProfiler {
    /// Create a new profiler with default configuration
    pub fn new() -> Self {
        Self {
            config: ProfileConfig::default(),
            schema: Schema::new(),
        }
    }

    /// Create a new profiler with custom configuration
    pub fn with_config(config: ProfileConfig) -> Result<Self, ProfileError> {
        config.validate()?;
        let schema = Schema::with_histogram_capacity(config.histogram_capacity());
        Ok(Self { config, schema })
    }

    fn sample_full(&self) -> bool {
        self.config.sample_size > 0
            && self.schema.total_records() >= self.config.sample_size as u64
    }

    /// Add a document for analysis
    pub fn add_document(&mut self, document: &Document) -> Result<(), ProfileError> {
        if self.sample_full() {
            return Ok(());
        }

        let flat = flatten(document)?;
        self.schema.observe(&flat);
        Ok(())
    }

    /// Add a BSON value, which must be a document
    pub fn add_bson(&mut self, value: &Bson) -> Result<(), ProfileError> {
        if self.sample_full() {
            return Ok(());
        }

        let flat = flatten_value(value)?;
        self.schema.observe(&flat);
        Ok(())
    }

    /// Add a record given as MongoDB Extended JSON text
    pub fn add_json(&mut self, json: &str) -> Result<(), ProfileError> {
        if self.sample_full() {
            return Ok(());
        }

        let value: serde_json::Value = serde_json::from_str(json)?;
        let bson = Bson::try_from(value)?;
        self.add_bson(&bson)
    }

    /// Add a sequence of documents, stopping at the first error
    pub fn add_documents<'a, I>(&mut self, documents: I) -> Result<(), ProfileError>
    where
        I: IntoIterator<Item = &'a Document>,
    {
        for document in documents {
            self.add_document(document)?;
        }
        Ok(())
    }

    /// Build the report from everything observed so far
    pub fn finalize(&self) -> Result<Report, ProfileError> {
        let report = finalize(&self.schema, self.config.top_k)?;
        info!(
            records = report.total_records,
            fields = report.rows.len(),
            "schema profile finalized"
        );
        Ok(report)
    }

    /// Get current profiling statistics
    pub fn stats(&self) -> ProfileStats {
        let mut stats = ProfileStats {
            records_processed: self.schema.total_records(),
            fields_discovered: self.schema.len(),
            ..ProfileStats::default()
        };
        for (_, field) in self.schema.iter() {
            stats.histogram_entries += field.histogram.len();
            if field.histogram.is_approximate() {
                stats.approximate_fields += 1;
            }
        }
        stats
    }

    /// The schema built so far
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn config(&self) -> &ProfileConfig {
        &self.config
    }

    /// Get the number of records processed
    pub fn record_count(&self) -> u64 {
        self.schema.total_records()
    }
}

impl Default for SchemaProfiler {
    fn default() -> Self {
        Self::new()
    }
}
