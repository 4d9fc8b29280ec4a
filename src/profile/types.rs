//! Type tags for profiled fields

use std::fmt;

use serde::{Deserialize, Serialize};

/// Separator joining nested document keys into a field path
pub const PATH_SEPARATOR: char = '.';

/// Closed set of BSON type tags a field can be reported as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TypeTag {
    Null,
    ObjectId,
    Int32,
    Int64,
    Decimal128,
    Bool,
    Date,
    Regex,
    String,
    Float,
    Array,
    Object,
    Binary,
}

impl TypeTag {
    /// All tags, in reporting vocabulary order
    pub const ALL: [TypeTag; 13] = [
        TypeTag::Null,
        TypeTag::ObjectId,
        TypeTag::Int32,
        TypeTag::Int64,
        TypeTag::Decimal128,
        TypeTag::Bool,
        TypeTag::Date,
        TypeTag::Regex,
        TypeTag::String,
        TypeTag::Float,
        TypeTag::Array,
        TypeTag::Object,
        TypeTag::Binary,
    ];

    /// Get the tag name as shown in reports
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeTag::Null => "null",
            TypeTag::ObjectId => "objectId",
            TypeTag::Int32 => "int32",
            TypeTag::Int64 => "int64",
            TypeTag::Decimal128 => "decimal128",
            TypeTag::Bool => "bool",
            TypeTag::Date => "date",
            TypeTag::Regex => "regex",
            TypeTag::String => "string",
            TypeTag::Float => "float",
            TypeTag::Array => "array",
            TypeTag::Object => "object",
            TypeTag::Binary => "binary",
        }
    }

    /// Whether values with this tag are containers rather than scalars
    pub fn is_container(&self) -> bool {
        matches!(self, TypeTag::Array | TypeTag::Object)
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
