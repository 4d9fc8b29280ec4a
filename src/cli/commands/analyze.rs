//! CLI command for profiling a document export or a live collection

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

use bson::Bson;
use bson_schema_profiler::{
    ExportFormat, ImportError, InputFormat, ProfileConfig, RecordReader, SchemaProfiler,
    export_report,
};
use tracing::{debug, info};

use crate::error::CliError;
use crate::output::format_summary;

/// Where the records come from
#[derive(Debug, Clone, PartialEq)]
pub enum InputSource {
    /// Extended JSON file, or `-` for stdin
    File(String),
    /// Live collection queried with an optional Extended JSON filter
    Collection {
        uri: String,
        db: String,
        collection: String,
        query: Option<String>,
    },
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputSource::File(path) => write!(f, "'{}'", path),
            InputSource::Collection { db, collection, .. } => {
                write!(f, "collection '{}.{}'", db, collection)
            }
        }
    }
}

type Records = Box<dyn Iterator<Item = Result<Bson, ImportError>>>;

/// Arguments for the `analyze` command
pub struct AnalyzeArgs {
    /// Record source
    pub source: InputSource,
    /// Input framing (auto, jsonl, array)
    pub input_format: String,
    /// Output format (table, csv, json, yaml)
    pub format: String,
    /// Output file path (stdout if not provided)
    pub output: Option<PathBuf>,
    /// TOML configuration file
    pub config: Option<PathBuf>,
    /// Overrides for configuration values
    pub sample_size: Option<usize>,
    pub top_k: Option<usize>,
    pub max_tracked_values: Option<usize>,
}

/// Build the effective configuration: file first, then flag overrides
fn resolve_config(args: &AnalyzeArgs) -> Result<ProfileConfig, CliError> {
    let mut config = match &args.config {
        Some(path) => {
            debug!(path = %path.display(), "loading configuration");
            ProfileConfig::from_toml_file(path)?
        }
        None => ProfileConfig::default(),
    };

    if let Some(sample_size) = args.sample_size {
        config.sample_size = sample_size;
    }
    if let Some(top_k) = args.top_k {
        config.top_k = top_k;
    }
    if let Some(max) = args.max_tracked_values {
        config.max_tracked_values = max;
    }

    config.validate()?;
    Ok(config)
}

fn open_input(input: &str) -> Result<Box<dyn BufRead>, CliError> {
    if input == "-" {
        return Ok(Box::new(BufReader::new(std::io::stdin())));
    }
    let path = PathBuf::from(input);
    let file = File::open(&path).map_err(|e| CliError::FileReadError(path, e.to_string()))?;
    Ok(Box::new(BufReader::new(file)))
}

fn open_records(source: &InputSource, input_format: InputFormat) -> Result<Records, CliError> {
    match source {
        InputSource::File(input) => {
            let reader = RecordReader::new(open_input(input)?, input_format)?;
            Ok(Box::new(reader))
        }
        InputSource::Collection {
            uri,
            db,
            collection,
            query,
        } => open_collection(uri, db, collection, query.as_deref()),
    }
}

#[cfg(feature = "mongodb")]
fn open_collection(
    uri: &str,
    db: &str,
    collection: &str,
    query: Option<&str>,
) -> Result<Records, CliError> {
    let source = bson_schema_profiler::MongoSource::new(uri, db, collection)
        .with_query(query.unwrap_or_default())?;
    let records = source.records()?;
    Ok(Box::new(records.map(|r| r.map(Bson::Document))))
}

#[cfg(not(feature = "mongodb"))]
fn open_collection(
    _uri: &str,
    _db: &str,
    _collection: &str,
    _query: Option<&str>,
) -> Result<Records, CliError> {
    Err(CliError::InvalidArgument(
        "reading from a collection requires the `mongodb` feature".to_string(),
    ))
}

/// Handle the `analyze` command
pub fn handle_analyze(args: &AnalyzeArgs) -> Result<(), CliError> {
    let input_format: InputFormat = args.input_format.parse()?;
    let export_format: ExportFormat = args.format.parse()?;
    let config = resolve_config(args)?;

    info!(source = %args.source, "profiling records");

    let mut profiler = SchemaProfiler::with_config(config.clone())?;
    for record in open_records(&args.source, input_format)? {
        if config.sample_size > 0 && profiler.record_count() >= config.sample_size as u64 {
            break;
        }
        profiler.add_bson(&record?)?;
    }

    let report = profiler.finalize()?;
    eprint!("{}", format_summary(&profiler.stats(), &config));

    let result = export_report(&report, export_format)?;

    if let Some(ref output_path) = args.output {
        std::fs::write(output_path, &result.content)
            .map_err(|e| CliError::FileWriteError(output_path.clone(), e.to_string()))?;
        eprintln!();
        eprintln!("Report written to: {}", output_path.display());
    } else {
        print!("{}", result.content);
        if !result.content.ends_with('\n') {
            println!();
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn args(input: String, output: Option<PathBuf>) -> AnalyzeArgs {
        AnalyzeArgs {
            source: InputSource::File(input),
            input_format: "auto".to_string(),
            format: "csv".to_string(),
            output,
            config: None,
            sample_size: None,
            top_k: None,
            max_tracked_values: None,
        }
    }

    #[test]
    fn test_analyze_writes_report() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("records.jsonl");
        let mut file = File::create(&input).unwrap();
        writeln!(file, r#"{{"a": 1}}"#).unwrap();
        writeln!(file, r#"{{"a": 2, "b": "x"}}"#).unwrap();

        let output = dir.path().join("report.csv");
        handle_analyze(&args(input.display().to_string(), Some(output.clone()))).unwrap();

        let content = std::fs::read_to_string(&output).unwrap();
        assert!(content.starts_with("Field,Data Type,Occurrence,Top 10 Values,Field Count"));
        assert!(content.contains("b,string,50.0 %,x(1),1"));
    }

    #[test]
    fn test_flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("profile.toml");
        std::fs::write(&config_path, "topK = 3\nsampleSize = 10\n").unwrap();

        let mut a = args("-".to_string(), None);
        a.config = Some(config_path);
        a.top_k = Some(5);

        let config = resolve_config(&a).unwrap();
        assert_eq!(config.top_k, 5);
        assert_eq!(config.sample_size, 10);
    }

    #[test]
    fn test_empty_input_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("empty.jsonl");
        std::fs::write(&input, "").unwrap();

        let err = handle_analyze(&args(input.display().to_string(), None)).unwrap_err();
        assert!(matches!(
            err,
            CliError::Profile(bson_schema_profiler::ProfileError::EmptyInput)
        ));
    }

    #[test]
    fn test_missing_input_file() {
        let err = handle_analyze(&args("/nonexistent/records.jsonl".to_string(), None))
            .unwrap_err();
        assert!(matches!(err, CliError::FileReadError(..)));
    }

    fn collection_args(query: Option<&str>) -> AnalyzeArgs {
        let mut a = args(String::new(), None);
        a.source = InputSource::Collection {
            uri: "mongodb://localhost:27017".to_string(),
            db: "shop".to_string(),
            collection: "orders".to_string(),
            query: query.map(str::to_string),
        };
        a
    }

    #[test]
    fn test_source_display() {
        assert_eq!(InputSource::File("a.json".to_string()).to_string(), "'a.json'");
        assert_eq!(
            collection_args(None).source.to_string(),
            "collection 'shop.orders'"
        );
    }

    #[cfg(feature = "mongodb")]
    #[test]
    fn test_invalid_query_fails_before_connecting() {
        let err = handle_analyze(&collection_args(Some("[1, 2]"))).unwrap_err();
        assert!(matches!(err, CliError::Import(ImportError::InvalidQuery(_))));
    }

    #[cfg(not(feature = "mongodb"))]
    #[test]
    fn test_collection_requires_feature() {
        let err = handle_analyze(&collection_args(None)).unwrap_err();
        assert!(matches!(err, CliError::InvalidArgument(_)));
    }
}
