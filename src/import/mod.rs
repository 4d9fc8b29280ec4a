//! Import functionality
//!
//! Provides record sources for profiling:
//! - MongoDB Extended JSON, one document per line (`mongoexport` default)
//! - MongoDB Extended JSON array (`mongoexport --jsonArray`)
//! - A live MongoDB collection with an optional query filter (`mongodb` feature)

pub mod extjson;
#[cfg(feature = "mongodb")]
pub mod mongo;

use std::str::FromStr;

/// Error during import
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("IO error: {0}")]
    IoError(String),
    #[error("JSON parse error at record {record}: {message}")]
    ParseError { record: usize, message: String },
    #[error("Extended JSON error at record {record}: {message}")]
    ExtendedJsonError { record: usize, message: String },
    #[error("Unknown input format: {0}")]
    UnknownFormat(String),
    #[error("Invalid query filter: {0}")]
    InvalidQuery(String),
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<std::io::Error> for ImportError {
    fn from(e: std::io::Error) -> Self {
        ImportError::IoError(e.to_string())
    }
}

/// Framing of the input records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputFormat {
    /// Array when the first non-whitespace byte is `[`, lines otherwise
    #[default]
    Auto,
    /// One document per line
    JsonLines,
    /// A single JSON array of documents
    JsonArray,
}

impl FromStr for InputFormat {
    type Err = ImportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(InputFormat::Auto),
            "jsonl" | "ndjson" | "lines" => Ok(InputFormat::JsonLines),
            "array" | "json" => Ok(InputFormat::JsonArray),
            other => Err(ImportError::UnknownFormat(other.to_string())),
        }
    }
}

// Re-export for convenience
pub use extjson::{ExtJsonImporter, RecordReader, parse_filter};
#[cfg(feature = "mongodb")]
pub use mongo::MongoSource;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_input_format() {
        assert_eq!("auto".parse::<InputFormat>().unwrap(), InputFormat::Auto);
        assert_eq!(
            "ndjson".parse::<InputFormat>().unwrap(),
            InputFormat::JsonLines
        );
        assert_eq!(
            "array".parse::<InputFormat>().unwrap(),
            InputFormat::JsonArray
        );
        assert!(matches!(
            "xml".parse::<InputFormat>(),
            Err(ImportError::UnknownFormat(_))
        ));
    }
}
