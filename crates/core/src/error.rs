//! Error types for trecrun
//!
//! One enum covers every failure the pipeline can report. Variants fall into
//! three groups:
//! - setup failures (bad arguments, missing corpus, existing index) that abort
//!   a command before any index I/O happens
//! - per-record failures (a malformed corpus filename, a query that does not
//!   parse) that callers log and skip
//! - engine and output failures surfaced from the index engine or the run file
//!
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for trecrun operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the indexing and retrieval pipeline
#[derive(Debug, Error)]
pub enum Error {
    /// Missing or malformed command-line or API input
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration file could not be read or parsed
    #[error("Configuration error: {0}")]
    Config(String),

    /// Document root does not exist or is not a directory
    #[error("Cannot find corpus directory {}", .0.display())]
    CorpusNotFound(PathBuf),

    /// Index destination already exists
    #[error("Index already exists at {}; reset it before indexing", .0.display())]
    IndexAlreadyExists(PathBuf),

    /// Query file content does not follow the expected format
    #[error("Malformed query file: {0}")]
    MalformedQueryFile(String),

    /// Corpus filename does not carry a derivable document id
    #[error("Malformed corpus filename {name:?}: {reason}")]
    MalformedFilename {
        /// The offending file name
        name: String,
        /// Why the name was rejected
        reason: String,
    },

    /// Index engine rejected a document or failed to persist the index
    #[error("Index write failed: {0}")]
    EngineWrite(String),

    /// Index engine could not open an index
    #[error("Cannot open index {}: {reason}", .path.display())]
    EngineOpen {
        /// Path that was opened
        path: PathBuf,
        /// Engine-reported cause
        reason: String,
    },

    /// Query string was rejected by the engine's query parser
    #[error("Cannot parse query {query:?}: {reason}")]
    QueryParse {
        /// The raw query text
        query: String,
        /// Parser-reported cause
        reason: String,
    },

    /// Search or stored-field retrieval failed inside the engine
    #[error("Search failed: {0}")]
    EngineSearch(String),

    /// Run file could not be written
    #[error("Cannot write to {}: {source}", .path.display())]
    OutputWrite {
        /// Destination path
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: io::Error,
    },

    /// I/O error outside the output sink (reading corpus files, query files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Process exit code for a command that failed with this error.
    ///
    /// - 1: bad arguments or configuration
    /// - 2: I/O or engine failure
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::InvalidArgument(_) | Error::Config(_) => 1,
            _ => 2,
        }
    }

    /// Shorthand for a malformed-filename error.
    pub fn malformed_filename(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::MalformedFilename {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Shorthand for an index-open error.
    pub fn engine_open(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Error::EngineOpen {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Shorthand for a query-parse error.
    pub fn query_parse(query: impl Into<String>, reason: impl ToString) -> Self {
        Error::QueryParse {
            query: query.into(),
            reason: reason.to_string(),
        }
    }
}
