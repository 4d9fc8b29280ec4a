//! Flattening of nested documents into dotted field paths

use bson::{Bson, Document};
use indexmap::IndexMap;

use super::classify::{bson_type_name, classify};
use super::error::ProfileError;
use super::types::{PATH_SEPARATOR, TypeTag};

/// One classified scalar found at a field path
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scalar<'a> {
    pub tag: TypeTag,
    pub value: &'a Bson,
}

/// Field paths of a single record with the scalars found at each.
///
/// Paths are kept in discovery order (document order, depth first). Every
/// path holds at least one scalar.
#[derive(Debug, Clone, Default)]
pub struct FlattenedRecord<'a> {
    paths: IndexMap<String, Vec<Scalar<'a>>>,
}

impl<'a> FlattenedRecord<'a> {
    /// Iterate paths and their scalars in discovery order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Scalar<'a>])> {
        self.paths.iter().map(|(p, v)| (p.as_str(), v.as_slice()))
    }

    /// Scalars recorded at a path
    pub fn get(&self, path: &str) -> Option<&[Scalar<'a>]> {
        self.paths.get(path).map(Vec::as_slice)
    }

    /// Paths in discovery order
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.paths.keys().map(String::as_str)
    }

    /// Number of distinct paths
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Total scalars across all paths
    pub fn scalar_count(&self) -> usize {
        self.paths.values().map(Vec::len).sum()
    }

    fn push(&mut self, path: &str, scalar: Scalar<'a>) {
        match self.paths.get_mut(path) {
            Some(values) => values.push(scalar),
            None => {
                self.paths.insert(path.to_string(), vec![scalar]);
            }
        }
    }
}

/// Flatten one document into its field paths.
///
/// Nested documents extend the path with their keys. Array elements,
/// including elements of nested arrays, share the path of the array itself.
/// Every scalar is classified here, so a record containing an unsupported
/// type fails as a whole before anything is aggregated.
pub fn flatten(record: &Document) -> Result<FlattenedRecord<'_>, ProfileError> {
    let mut flat = FlattenedRecord::default();
    visit_document(record, None, &mut flat)?;
    Ok(flat)
}

/// Flatten a value that is expected to be a document
pub fn flatten_value(record: &Bson) -> Result<FlattenedRecord<'_>, ProfileError> {
    match record {
        Bson::Document(doc) => flatten(doc),
        other => Err(ProfileError::MalformedRecord(
            bson_type_name(other).to_string(),
        )),
    }
}

fn visit_document<'a>(
    doc: &'a Document,
    prefix: Option<&str>,
    flat: &mut FlattenedRecord<'a>,
) -> Result<(), ProfileError> {
    for (key, value) in doc {
        let path = match prefix {
            Some(prefix) => format!("{}{}{}", prefix, PATH_SEPARATOR, key),
            None => key.clone(),
        };
        visit_value(value, &path, flat)?;
    }
    Ok(())
}

fn visit_value<'a>(
    value: &'a Bson,
    path: &str,
    flat: &mut FlattenedRecord<'a>,
) -> Result<(), ProfileError> {
    match value {
        Bson::Document(doc) => visit_document(doc, Some(path), flat),
        Bson::Array(items) => {
            for item in items {
                visit_value(item, path, flat)?;
            }
            Ok(())
        }
        scalar => {
            let tag = classify(scalar).map_err(|e| e.at_path(path))?;
            flat.push(path, Scalar { tag, value: scalar });
            Ok(())
        }
    }
}
