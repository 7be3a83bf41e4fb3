//! Corpus indexing
//!
//! Walks the immediate children of a document root in file-name order and
//! submits every file that follows the corpus naming convention
//! (`cacm-NNNN.html.txt` by default) to the engine writer. A file that cannot
//! be read, carries no derivable id, repeats an id already indexed or is
//! rejected by the engine is logged and skipped; the pass always runs to the
//! end and then finalizes the index.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use trecrun_core::{AnalyzerConfig, CorpusConvention, Error, Result};
use trecrun_engine::{DocumentFields, IndexWriterHandle, TextIndexEngine};

pub use trecrun_core::ID_SUFFIX;

type ReadFn = fn(&Path) -> io::Result<Vec<u8>>;

/// Outcome of one indexing pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexSummary {
    /// Documents accepted by the engine
    pub indexed: u64,
    /// Entries that do not follow the naming convention
    pub skipped: u64,
    /// Qualifying files that could not be read, identified or written, or
    /// whose id was already taken
    pub failed: u64,
}

/// Builds an index from a corpus directory
pub struct CorpusIndexer<E> {
    engine: E,
    analyzer: AnalyzerConfig,
    convention: CorpusConvention,
    read: ReadFn,
}

impl<E: TextIndexEngine> CorpusIndexer<E> {
    /// Create an indexer using `engine`, analyzing content with `analyzer`
    pub fn new(engine: E, analyzer: AnalyzerConfig, convention: CorpusConvention) -> Self {
        CorpusIndexer {
            engine,
            analyzer,
            convention,
            read: |path| std::fs::read(path),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_reader(mut self, read: ReadFn) -> Self {
        self.read = read;
        self
    }

    /// Index every qualifying file under `root` into a new index at
    /// `destination`.
    ///
    /// # Errors
    ///
    /// - `Error::CorpusNotFound` if `root` is not a directory
    /// - `Error::IndexAlreadyExists` if `destination` exists
    /// - `Error::Io` if `root` cannot be listed
    /// - `Error::EngineWrite` if the index cannot be created or finalized
    pub fn index(&self, root: &Path, destination: &Path) -> Result<IndexSummary> {
        if !root.is_dir() {
            return Err(Error::CorpusNotFound(root.to_path_buf()));
        }
        if destination.exists() {
            return Err(Error::IndexAlreadyExists(destination.to_path_buf()));
        }

        let entries = sorted_entries(root)?;
        let mut writer = self.engine.build_index(destination, &self.analyzer)?;
        let mut summary = IndexSummary::default();
        let mut taken: BTreeMap<u32, String> = BTreeMap::new();

        tracing::info!(
            target: "trecrun::index",
            root = %root.display(),
            destination = %destination.display(),
            entries = entries.len(),
            analyzer = %self.analyzer.label(),
            "Indexing corpus"
        );

        for (path, name) in entries {
            if !path.is_file() || !self.qualifies(&name) {
                tracing::debug!(
                    target: "trecrun::index",
                    name = %name,
                    "Skipping entry outside the corpus convention"
                );
                summary.skipped += 1;
                continue;
            }

            match self.load_document(&path, &name, &taken) {
                Ok(doc) => match writer.add_document(&doc) {
                    Ok(()) => {
                        tracing::debug!(
                            target: "trecrun::index",
                            name = %name,
                            doc_id = doc.external_doc_id,
                            "Indexed document"
                        );
                        taken.insert(doc.external_doc_id, name);
                        summary.indexed += 1;
                    }
                    Err(e) => {
                        tracing::warn!(target: "trecrun::index", name = %name, error = %e, "Engine rejected document");
                        summary.failed += 1;
                    }
                },
                Err(e) => {
                    tracing::warn!(target: "trecrun::index", name = %name, error = %e, "Skipping document");
                    summary.failed += 1;
                }
            }
        }

        let submitted = writer.num_docs();
        writer.close()?;

        tracing::info!(
            target: "trecrun::index",
            num_docs = submitted,
            indexed = summary.indexed,
            skipped = summary.skipped,
            failed = summary.failed,
            "Indexing finished"
        );
        Ok(summary)
    }

    fn qualifies(&self, name: &str) -> bool {
        let lower = name.to_ascii_lowercase();
        let prefix = format!("{}-", self.convention.prefix.to_ascii_lowercase());
        lower.starts_with(&prefix)
            && lower.ends_with(&self.convention.extension.to_ascii_lowercase())
    }

    fn load_document(
        &self,
        path: &Path,
        name: &str,
        taken: &BTreeMap<u32, String>,
    ) -> Result<DocumentFields> {
        let external_doc_id = external_doc_id(name, &self.convention)?;
        if let Some(first) = taken.get(&external_doc_id) {
            return Err(Error::malformed_filename(
                name,
                format!(
                    "duplicate id {}, already indexed from {}",
                    external_doc_id, first
                ),
            ));
        }
        let bytes = (self.read)(path)?;
        Ok(DocumentFields {
            external_doc_id,
            path: path.to_string_lossy().into_owned(),
            name: name.to_string(),
            content: String::from_utf8_lossy(&bytes).into_owned(),
        })
    }
}

fn sorted_entries(root: &Path) -> Result<Vec<(PathBuf, String)>> {
    let mut entries = Vec::new();
    for entry in std::fs::read_dir(root)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        entries.push((entry.path(), name));
    }
    entries.sort_by(|a, b| a.1.cmp(&b.1));
    Ok(entries)
}

/// Derive the external document id from a corpus file name.
///
/// The name is split on its first `-`: the left part must be the corpus
/// prefix and the right part `<digits>.html.txt`, both case-insensitive.
///
/// # Example
///
/// ```
/// use trecrun_core::CorpusConvention;
/// use trecrun_search::external_doc_id;
///
/// let cacm = CorpusConvention::default();
/// assert_eq!(external_doc_id("cacm-0042.html.txt", &cacm).unwrap(), 42);
/// assert!(external_doc_id("cacm-x.html.txt", &cacm).is_err());
/// ```
///
/// # Errors
///
/// `Error::MalformedFilename` if the name does not follow the pattern or the
/// id does not fit in a `u32`.
pub fn external_doc_id(name: &str, convention: &CorpusConvention) -> Result<u32> {
    let (prefix, rest) = name
        .split_once('-')
        .ok_or_else(|| Error::malformed_filename(name, "no '-' separator"))?;
    if !prefix.eq_ignore_ascii_case(&convention.prefix) {
        return Err(Error::malformed_filename(
            name,
            format!("expected prefix {:?}", convention.prefix),
        ));
    }

    let split = rest.len().checked_sub(ID_SUFFIX.len()).filter(|&at| {
        rest.is_char_boundary(at) && rest[at..].eq_ignore_ascii_case(ID_SUFFIX)
    });
    let digits = match split {
        Some(at) => &rest[..at],
        None => {
            return Err(Error::malformed_filename(
                name,
                format!("expected '<digits>{}' after the prefix", ID_SUFFIX),
            ))
        }
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::malformed_filename(
            name,
            "document id is not numeric",
        ));
    }
    digits
        .parse()
        .map_err(|_| Error::malformed_filename(name, "document id out of range"))
}

/// Delete the index at `path`.
///
/// Returns `true` if something was removed, `false` if nothing existed.
///
/// # Errors
///
/// `Error::Io` if the directory exists but cannot be removed.
pub fn reset_index(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(false);
    }
    if path.is_dir() {
        std::fs::remove_dir_all(path)?;
    } else {
        std::fs::remove_file(path)?;
    }
    tracing::info!(target: "trecrun::index", path = %path.display(), "Index reset");
    Ok(true)
}
