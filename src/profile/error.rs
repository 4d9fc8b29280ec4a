//! Error types for schema profiling

use thiserror::Error;

/// Errors that can occur while profiling a record set
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProfileError {
    /// A value's BSON type is outside the supported vocabulary
    #[error("Unsupported value type '{type_name}' at field '{path}'")]
    UnsupportedType { path: String, type_name: &'static str },

    /// Finalize was called before any record was observed
    #[error("No records provided for profiling")]
    EmptyInput,

    /// Record root is not a document
    #[error("Malformed record: expected document at root, found {0}")]
    MalformedRecord(String),

    /// JSON / Extended JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(String),

    /// Configuration rejected
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(String),
}

/// A scalar whose runtime type has no [`TypeTag`](super::TypeTag).
///
/// Raised by [`classify`](super::classify), which does not know where the
/// value lives; flattening attaches the field path.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("unsupported BSON type '{type_name}'")]
pub struct UnsupportedTypeError {
    pub type_name: &'static str,
}

impl UnsupportedTypeError {
    /// Attach the field path the value was found at
    pub fn at_path(self, path: &str) -> ProfileError {
        ProfileError::UnsupportedType {
            path: path.to_string(),
            type_name: self.type_name,
        }
    }
}

impl From<serde_json::Error> for ProfileError {
    fn from(e: serde_json::Error) -> Self {
        ProfileError::Json(e.to_string())
    }
}

impl From<bson::extjson::de::Error> for ProfileError {
    fn from(e: bson::extjson::de::Error) -> Self {
        ProfileError::Json(e.to_string())
    }
}

impl From<std::io::Error> for ProfileError {
    fn from(e: std::io::Error) -> Self {
        ProfileError::Io(e.to_string())
    }
}

impl From<toml::de::Error> for ProfileError {
    fn from(e: toml::de::Error) -> Self {
        ProfileError::InvalidConfig(e.to_string())
    }
}
