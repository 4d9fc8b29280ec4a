//! Live MongoDB collection as a record source.
//!
//! Uses the driver's blocking API, so profiling stays single-threaded and
//! documents are pulled from the cursor one batch at a time.

use bson::Document;
use mongodb::sync::{Client, Cursor};
use tracing::info;

use crate::import::ImportError;
use crate::import::extjson::parse_filter;

/// Connection string used when none is given
pub const DEFAULT_URI: &str = "mongodb://localhost:27017";

/// A collection and the filter selecting the documents to profile
#[derive(Debug, Clone, PartialEq)]
pub struct MongoSource {
    uri: String,
    database: String,
    collection: String,
    filter: Document,
}

impl MongoSource {
    /// Source over every document of `database.collection`; an empty `uri`
    /// means [`DEFAULT_URI`]
    pub fn new(
        uri: impl Into<String>,
        database: impl Into<String>,
        collection: impl Into<String>,
    ) -> Self {
        let uri = uri.into();
        Self {
            uri: if uri.trim().is_empty() {
                DEFAULT_URI.to_string()
            } else {
                uri
            },
            database: database.into(),
            collection: collection.into(),
            filter: Document::new(),
        }
    }

    pub fn with_filter(mut self, filter: Document) -> Self {
        self.filter = filter;
        self
    }

    /// Set the filter from Extended JSON text, e.g. `{"status": "active"}`
    pub fn with_query(self, query: &str) -> Result<Self, ImportError> {
        let filter = parse_filter(query)?;
        Ok(self.with_filter(filter))
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn filter(&self) -> &Document {
        &self.filter
    }

    /// `database.collection`
    pub fn namespace(&self) -> String {
        format!("{}.{}", self.database, self.collection)
    }

    /// Run the query and stream the matching documents
    pub fn records(&self) -> Result<MongoRecords, ImportError> {
        if self.database.is_empty() || self.collection.is_empty() {
            return Err(ImportError::DatabaseError(
                "database and collection names are required".to_string(),
            ));
        }

        let client = Client::with_uri_str(&self.uri).map_err(database_error)?;
        let collection = client
            .database(&self.database)
            .collection::<Document>(&self.collection);

        info!(namespace = %self.namespace(), filter = %self.filter, "querying collection");
        let cursor = collection
            .find(self.filter.clone())
            .run()
            .map_err(database_error)?;
        Ok(MongoRecords { cursor })
    }
}

/// Documents returned by a [`MongoSource`] query
pub struct MongoRecords {
    cursor: Cursor<Document>,
}

impl Iterator for MongoRecords {
    type Item = Result<Document, ImportError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.cursor.next().map(|r| r.map_err(database_error))
    }
}

fn database_error(e: mongodb::error::Error) -> ImportError {
    ImportError::DatabaseError(e.to_string())
}
