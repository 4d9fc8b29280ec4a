//! MongoDB Extended JSON record source.
//!
//! Accepts canonical and relaxed Extended JSON, so exports keep their BSON
//! types (`{"$oid": ...}`, `{"$date": ...}`, `{"$numberLong": ...}`, ...).
//! Records are yielded as [`Bson`] values; checking that each one is a
//! document is left to the profiler.

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use bson::{Bson, Document};

use crate::import::{ImportError, InputFormat};

/// Lazily reads records from a JSON Lines stream or a JSON array.
///
/// Line mode streams one record per non-blank line and reports errors with
/// the 1-based line number. Array mode parses the whole array up front and
/// reports errors with the 1-based element position.
pub struct RecordReader<R> {
    state: ReaderState<R>,
    position: usize,
}

enum ReaderState<R> {
    Lines(Lines<R>),
    Array(std::vec::IntoIter<serde_json::Value>),
}

impl<R: BufRead> RecordReader<R> {
    /// Create a reader; `InputFormat::Auto` peeks at the first significant byte
    pub fn new(mut reader: R, format: InputFormat) -> Result<Self, ImportError> {
        let format = match format {
            InputFormat::Auto => detect_format(&mut reader)?,
            explicit => explicit,
        };

        let state = match format {
            InputFormat::JsonArray => {
                let values: Vec<serde_json::Value> = serde_json::from_reader(reader)
                    .map_err(|e| ImportError::ParseError {
                        record: 0,
                        message: e.to_string(),
                    })?;
                ReaderState::Array(values.into_iter())
            }
            _ => ReaderState::Lines(reader.lines()),
        };

        Ok(Self { state, position: 0 })
    }
}

impl<R: BufRead> Iterator for RecordReader<R> {
    type Item = Result<Bson, ImportError>;

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.state {
            ReaderState::Lines(lines) => loop {
                let line = match lines.next()? {
                    Ok(line) => line,
                    Err(e) => return Some(Err(e.into())),
                };
                self.position += 1;
                if line.trim().is_empty() {
                    continue;
                }
                let record = self.position;
                return Some(
                    serde_json::from_str::<serde_json::Value>(&line)
                        .map_err(|e| ImportError::ParseError {
                            record,
                            message: e.to_string(),
                        })
                        .and_then(|value| to_bson(value, record)),
                );
            },
            ReaderState::Array(values) => {
                let value = values.next()?;
                self.position += 1;
                Some(to_bson(value, self.position))
            }
        }
    }
}

fn to_bson(value: serde_json::Value, record: usize) -> Result<Bson, ImportError> {
    Bson::try_from(value).map_err(|e| ImportError::ExtendedJsonError {
        record,
        message: e.to_string(),
    })
}

/// Skip leading whitespace and decide between array and line framing
fn detect_format<R: BufRead>(reader: &mut R) -> Result<InputFormat, ImportError> {
    loop {
        let buf = reader.fill_buf()?;
        if buf.is_empty() {
            return Ok(InputFormat::JsonLines);
        }
        match buf.iter().position(|b| !b.is_ascii_whitespace()) {
            Some(idx) => {
                let format = if buf[idx] == b'[' {
                    InputFormat::JsonArray
                } else {
                    InputFormat::JsonLines
                };
                reader.consume(idx);
                return Ok(format);
            }
            None => {
                let len = buf.len();
                reader.consume(len);
            }
        }
    }
}

/// Parse a query filter given as Extended JSON text.
///
/// Blank text is the empty filter, matching every document. Anything other
/// than a JSON object is rejected.
pub fn parse_filter(query: &str) -> Result<Document, ImportError> {
    if query.trim().is_empty() {
        return Ok(Document::new());
    }
    let value: serde_json::Value =
        serde_json::from_str(query).map_err(|e| ImportError::InvalidQuery(e.to_string()))?;
    match Bson::try_from(value).map_err(|e| ImportError::InvalidQuery(e.to_string()))? {
        Bson::Document(filter) => Ok(filter),
        other => Err(ImportError::InvalidQuery(format!(
            "expected an object, found {}",
            format!("{:?}", other.element_type()).to_lowercase()
        ))),
    }
}

/// Importer for MongoDB Extended JSON exports.
pub struct ExtJsonImporter;

impl ExtJsonImporter {
    /// Read every record from a string
    pub fn import_str(content: &str, format: InputFormat) -> Result<Vec<Bson>, ImportError> {
        RecordReader::new(content.as_bytes(), format)?.collect()
    }

    /// Open a file as a lazy record stream
    pub fn open(
        path: impl AsRef<Path>,
        format: InputFormat,
    ) -> Result<RecordReader<BufReader<File>>, ImportError> {
        let file = File::open(path.as_ref()).map_err(|e| {
            ImportError::IoError(format!("{}: {}", path.as_ref().display(), e))
        })?;
        RecordReader::new(BufReader::new(file), format)
    }
}
