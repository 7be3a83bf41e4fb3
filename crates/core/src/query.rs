//! Query model
//!
//! A [`Query`] is one line (or one `<DOC>` record) of a query file: a
//! caller-assigned integer id plus free-form search text. The id is opaque;
//! it tags result lines and never drives ordering.

use std::fmt;

/// Query identifier as it appears in query files and run files.
pub type QueryId = i64;

/// A single search request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    id: QueryId,
    text: String,
}

impl Query {
    /// Create a query from its id and raw text
    pub fn new(id: QueryId, text: impl Into<String>) -> Self {
        Query {
            id,
            text: text.into(),
        }
    }

    /// Query id
    pub fn id(&self) -> QueryId {
        self.id
    }

    /// Raw query text, passed unchanged to the engine's query parser
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.id, self.text)
    }
}
