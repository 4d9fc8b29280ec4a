//! Scalar type classification

use bson::Bson;

use super::error::UnsupportedTypeError;
use super::types::TypeTag;

/// Classify a BSON value into its [`TypeTag`].
///
/// Checks run in a fixed priority order: null, object id, boolean,
/// integers (split on the 32-bit range by value, not by wire type),
/// decimal128, then the remaining one-to-one mappings. Any BSON type
/// outside the supported vocabulary is an error rather than a fallback tag.
pub fn classify(value: &Bson) -> Result<TypeTag, UnsupportedTypeError> {
    let tag = match value {
        Bson::Null => TypeTag::Null,
        Bson::ObjectId(_) => TypeTag::ObjectId,
        Bson::Boolean(_) => TypeTag::Bool,
        Bson::Int32(_) => TypeTag::Int32,
        Bson::Int64(v) => integer_tag(*v),
        Bson::Decimal128(_) => TypeTag::Decimal128,
        Bson::DateTime(_) => TypeTag::Date,
        Bson::RegularExpression(_) => TypeTag::Regex,
        Bson::String(_) => TypeTag::String,
        Bson::Double(_) => TypeTag::Float,
        Bson::Array(_) => TypeTag::Array,
        Bson::Document(_) => TypeTag::Object,
        Bson::Binary(_) => TypeTag::Binary,
        other => {
            return Err(UnsupportedTypeError {
                type_name: bson_type_name(other),
            });
        }
    };
    Ok(tag)
}

fn integer_tag(value: i64) -> TypeTag {
    if i32::try_from(value).is_ok() {
        TypeTag::Int32
    } else {
        TypeTag::Int64
    }
}

/// Canonical BSON type name of a value, used in error messages
pub(crate) fn bson_type_name(value: &Bson) -> &'static str {
    match value {
        Bson::Double(_) => "double",
        Bson::String(_) => "string",
        Bson::Array(_) => "array",
        Bson::Document(_) => "object",
        Bson::Boolean(_) => "bool",
        Bson::Null => "null",
        Bson::RegularExpression(_) => "regex",
        Bson::JavaScriptCode(_) => "javascript",
        Bson::JavaScriptCodeWithScope(_) => "javascriptWithScope",
        Bson::Int32(_) => "int",
        Bson::Int64(_) => "long",
        Bson::Timestamp(_) => "timestamp",
        Bson::Binary(_) => "binData",
        Bson::ObjectId(_) => "objectId",
        Bson::DateTime(_) => "date",
        Bson::Symbol(_) => "symbol",
        Bson::Decimal128(_) => "decimal",
        Bson::Undefined => "undefined",
        Bson::MaxKey => "maxKey",
        Bson::MinKey => "minKey",
        Bson::DbPointer(_) => "dbPointer",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::oid::ObjectId;
    use bson::spec::BinarySubtype;
    use bson::{Binary, Decimal128, Regex, Timestamp, doc};

    #[test]
    fn test_classify_scalars() {
        assert_eq!(classify(&Bson::Null).unwrap(), TypeTag::Null);
        assert_eq!(classify(&Bson::Boolean(true)).unwrap(), TypeTag::Bool);
        assert_eq!(classify(&Bson::Double(1.5)).unwrap(), TypeTag::Float);
        assert_eq!(
            classify(&Bson::String("x".to_string())).unwrap(),
            TypeTag::String
        );
        assert_eq!(
            classify(&Bson::ObjectId(ObjectId::new())).unwrap(),
            TypeTag::ObjectId
        );
        assert_eq!(
            classify(&Bson::DateTime(bson::DateTime::from_millis(0))).unwrap(),
            TypeTag::Date
        );
        assert_eq!(
            classify(&Bson::Decimal128(Decimal128::from_bytes([0; 16]))).unwrap(),
            TypeTag::Decimal128
        );
        let regex = Regex {
            pattern: "^a".to_string(),
            options: "i".to_string(),
        };
        assert_eq!(
            classify(&Bson::RegularExpression(regex)).unwrap(),
            TypeTag::Regex
        );
        let binary = Binary {
            subtype: BinarySubtype::Generic,
            bytes: vec![1, 2, 3],
        };
        assert_eq!(classify(&Bson::Binary(binary)).unwrap(), TypeTag::Binary);
    }

    #[test]
    fn test_classify_containers() {
        assert_eq!(classify(&Bson::Array(vec![])).unwrap(), TypeTag::Array);
        assert_eq!(
            classify(&Bson::Document(doc! { "a": 1 })).unwrap(),
            TypeTag::Object
        );
    }

    #[test]
    fn test_integer_range_split() {
        assert_eq!(classify(&Bson::Int32(i32::MIN)).unwrap(), TypeTag::Int32);
        assert_eq!(classify(&Bson::Int64(5)).unwrap(), TypeTag::Int32);
        assert_eq!(
            classify(&Bson::Int64(2_147_483_647)).unwrap(),
            TypeTag::Int32
        );
        assert_eq!(
            classify(&Bson::Int64(-2_147_483_648)).unwrap(),
            TypeTag::Int32
        );
        assert_eq!(
            classify(&Bson::Int64(2_147_483_648)).unwrap(),
            TypeTag::Int64
        );
        assert_eq!(
            classify(&Bson::Int64(-2_147_483_649)).unwrap(),
            TypeTag::Int64
        );
    }

    #[test]
    fn test_unsupported_types() {
        let ts = Bson::Timestamp(Timestamp {
            time: 1,
            increment: 1,
        });
        assert_eq!(
            classify(&ts),
            Err(UnsupportedTypeError {
                type_name: "timestamp"
            })
        );
        assert_eq!(
            classify(&Bson::MinKey).unwrap_err().type_name,
            "minKey"
        );
        assert_eq!(
            classify(&Bson::Symbol("s".to_string())).unwrap_err().type_name,
            "symbol"
        );
        assert_eq!(
            classify(&Bson::Undefined).unwrap_err().type_name,
            "undefined"
        );
    }
}
