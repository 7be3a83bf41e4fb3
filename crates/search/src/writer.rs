//! Run file output
//!
//! A run file holds one line per hit in query order, then rank order:
//!
//! ```text
//! 1 Q0 1410 1 7.8163 tantivy_STOPPED
//! 1 Q0 2319 2 7.2214 tantivy_STOPPED
//! ```

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use trecrun_core::{Error, Result, ResultSet};

/// Writes result sets as TREC run lines
pub struct ResultWriter {
    description: String,
}

impl ResultWriter {
    /// Create a writer that suffixes every run tag with `_<description>`.
    ///
    /// # Errors
    ///
    /// `Error::InvalidArgument` if `description` is empty or contains
    /// whitespace.
    pub fn new(description: impl Into<String>) -> Result<Self> {
        let description = description.into();
        if description.is_empty() || description.contains(char::is_whitespace) {
            return Err(Error::InvalidArgument(format!(
                "run description {:?} must be a single non-empty word",
                description
            )));
        }
        Ok(ResultWriter { description })
    }

    /// Write `results` to `path`, truncating any existing file.
    ///
    /// Returns the number of lines written. A failure mid-way leaves the
    /// lines written so far in place.
    ///
    /// # Errors
    ///
    /// `Error::OutputWrite` if the file cannot be created or written.
    pub fn write(&self, path: &Path, results: &ResultSet<'_>) -> Result<usize> {
        let output_error = |source: io::Error| Error::OutputWrite {
            path: path.to_path_buf(),
            source,
        };
        let file = File::create(path).map_err(output_error)?;
        let mut out = BufWriter::new(file);
        let lines = self.write_lines(&mut out, results).map_err(output_error)?;
        out.flush().map_err(output_error)?;

        tracing::info!(
            target: "trecrun::search",
            path = %path.display(),
            lines,
            "Run file written"
        );
        Ok(lines)
    }

    /// Write `results` to any sink, e.g. stdout.
    ///
    /// # Errors
    ///
    /// `Error::OutputWrite` (with path `-`) if the sink fails.
    pub fn write_to<W: Write>(&self, out: &mut W, results: &ResultSet<'_>) -> Result<usize> {
        let output_error = |source: io::Error| Error::OutputWrite {
            path: "-".into(),
            source,
        };
        let lines = self.write_lines(out, results).map_err(output_error)?;
        out.flush().map_err(output_error)?;
        Ok(lines)
    }

    fn write_lines<W: Write>(&self, out: &mut W, results: &ResultSet<'_>) -> io::Result<usize> {
        let mut lines = 0;
        for hits in results {
            for hit in hits {
                writeln!(out, "{}", hit.persisted_line(&self.description))?;
                lines += 1;
            }
        }
        Ok(lines)
    }
}
