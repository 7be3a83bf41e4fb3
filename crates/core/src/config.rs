//! Harness configuration via `trecrun.toml`
//!
//! Every field has a default, so an empty or missing file yields the CACM
//! setup: `cacm-*.txt` corpus files, 100 hits per query, plain analyzer.
//! Command-line flags override whatever the file says.

use crate::analyzer::AnalyzerConfig;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory when none is given.
pub const CONFIG_FILE_NAME: &str = "trecrun.toml";

/// Default number of hits kept per query.
pub const DEFAULT_TOP_K: usize = 100;

/// Default run tag written into every result line.
pub const DEFAULT_RUN_TAG: &str = "tantivy";

/// Suffix every corpus file name carries after its numeric id.
pub const ID_SUFFIX: &str = ".html.txt";

/// Naming convention that selects and identifies corpus files.
///
/// A file qualifies when its name starts with `<prefix>-` and ends with
/// `extension`, both compared case-insensitively. The extension selects
/// files only; ids are always read from `<digits>.html.txt`, so the
/// extension must be a tail of that suffix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusConvention {
    /// Corpus name token before the first `-` (e.g. `cacm`)
    #[serde(default = "default_prefix")]
    pub prefix: String,
    /// Required file extension, including the dot
    #[serde(default = "default_extension")]
    pub extension: String,
}

fn default_prefix() -> String {
    "cacm".to_string()
}

fn default_extension() -> String {
    ".txt".to_string()
}

impl Default for CorpusConvention {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            extension: default_extension(),
        }
    }
}

/// `[analyzer]` section of the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzerSection {
    /// Enable English stemming
    #[serde(default)]
    pub stem: bool,
    /// Stopword file, one word per line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stopwords_file: Option<PathBuf>,
}

/// Harness configuration loaded from `trecrun.toml`.
///
/// # Example
///
/// ```toml
/// top_k = 100
/// run_tag = "tantivy"
///
/// [corpus]
/// prefix = "cacm"
/// extension = ".txt"
///
/// [analyzer]
/// stem = false
/// # stopwords_file = "common_words"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarnessConfig {
    /// Maximum hits per query
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    /// Run tag identifying the retrieval method
    #[serde(default = "default_run_tag")]
    pub run_tag: String,
    /// Corpus file naming convention
    #[serde(default)]
    pub corpus: CorpusConvention,
    /// Analyzer settings
    #[serde(default)]
    pub analyzer: AnalyzerSection,
}

fn default_top_k() -> usize {
    DEFAULT_TOP_K
}

fn default_run_tag() -> String {
    DEFAULT_RUN_TAG.to_string()
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
            run_tag: default_run_tag(),
            corpus: CorpusConvention::default(),
            analyzer: AnalyzerSection::default(),
        }
    }
}

impl HarnessConfig {
    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the file cannot be read, parsed or
    /// validated.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let config: HarnessConfig = toml::from_str(&content).map_err(|e| {
            Error::Config(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load an explicit config file, or `trecrun.toml` from `cwd` when it
    /// exists, or fall back to defaults.
    pub fn load(explicit: Option<&Path>, cwd: &Path) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let implicit = cwd.join(CONFIG_FILE_NAME);
                if implicit.is_file() {
                    Self::from_file(&implicit)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Check field values that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.top_k == 0 {
            return Err(Error::Config("top_k must be positive".to_string()));
        }
        if self.run_tag.is_empty() || self.run_tag.contains(char::is_whitespace) {
            return Err(Error::Config(format!(
                "run_tag {:?} must be a single non-empty word",
                self.run_tag
            )));
        }
        if self.corpus.prefix.is_empty() || self.corpus.prefix.contains('-') {
            return Err(Error::Config(format!(
                "corpus prefix {:?} must be non-empty and contain no '-'",
                self.corpus.prefix
            )));
        }
        let extension = self.corpus.extension.to_ascii_lowercase();
        if extension.is_empty() || !ID_SUFFIX.ends_with(&extension) {
            return Err(Error::Config(format!(
                "corpus extension {:?} must be a non-empty tail of {:?}",
                self.corpus.extension, ID_SUFFIX
            )));
        }
        Ok(())
    }

    /// Build the analyzer described by the `[analyzer]` section.
    pub fn analyzer_config(&self) -> Result<AnalyzerConfig> {
        let config = AnalyzerConfig::simple().with_stemming(self.analyzer.stem);
        match &self.analyzer.stopwords_file {
            Some(path) => config.with_stopwords_file(path),
            None => Ok(config),
        }
    }
}
