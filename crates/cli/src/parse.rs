//! ArgMatches → CliAction conversion.
//!
//! Also folds the global flags over the loaded `HarnessConfig`, so the rest
//! of the binary sees one resolved set of settings.

use std::path::{Path, PathBuf};

use clap::ArgMatches;
use trecrun_core::{Error, HarnessConfig, Result};
use trecrun_search::DEFAULT_SNIPPET_WORDS;

use crate::format::OutputMode;

/// Query file layout selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryFormat {
    /// `<id> <text>` per line
    Simple,
    /// Legacy CACM `<DOC>` records
    Cacm,
}

/// Where the run file goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    File(PathBuf),
}

/// The action requested on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliAction {
    Index {
        corpus: PathBuf,
        index: PathBuf,
        force: bool,
    },
    Search {
        index: PathBuf,
        queries: PathBuf,
        format: QueryFormat,
        output: OutputTarget,
        desc: String,
    },
    Reset {
        index: PathBuf,
    },
    Evaluate {
        qrels: PathBuf,
        run: PathBuf,
        per_query: bool,
    },
    Snippet {
        index: PathBuf,
        queries: PathBuf,
        run: PathBuf,
        format: QueryFormat,
        words: usize,
    },
}

/// Settings shared by every subcommand.
#[derive(Debug, Clone)]
pub struct Settings {
    pub config: HarnessConfig,
    /// `--stem` or `--stopwords` given on the command line
    pub analyzer_from_flags: bool,
    pub verbose: bool,
    pub mode: OutputMode,
}

/// Resolve global flags and config file into `Settings`.
pub fn matches_to_settings(matches: &ArgMatches, cwd: &Path) -> Result<Settings> {
    let explicit = matches.get_one::<String>("config").map(PathBuf::from);
    let mut config = HarnessConfig::load(explicit.as_deref(), cwd)?;

    let mut analyzer_from_flags = false;
    if matches.get_flag("stem") {
        config.analyzer.stem = true;
        analyzer_from_flags = true;
    }
    if let Some(path) = matches.get_one::<String>("stopwords") {
        config.analyzer.stopwords_file = Some(PathBuf::from(path));
        analyzer_from_flags = true;
    }

    if let Some(("search", sub)) = matches.subcommand() {
        if let Some(raw) = sub.get_one::<String>("top-k") {
            config.top_k = parse_top_k(raw)?;
        }
        if let Some(tag) = sub.get_one::<String>("run-tag") {
            config.run_tag = tag.clone();
        }
    }
    config
        .validate()
        .map_err(|e| Error::InvalidArgument(e.to_string()))?;

    let mode = if matches.get_flag("json") {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    Ok(Settings {
        config,
        analyzer_from_flags,
        verbose: matches.get_flag("verbose"),
        mode,
    })
}

/// Convert the selected subcommand into a `CliAction`.
pub fn matches_to_action(matches: &ArgMatches) -> Result<CliAction> {
    match matches.subcommand() {
        Some(("index", sub)) => Ok(CliAction::Index {
            corpus: required_path(sub, "corpus")?,
            index: required_path(sub, "index")?,
            force: sub.get_flag("force"),
        }),
        Some(("search", sub)) => {
            let desc = required(sub, "desc")?;
            if desc.is_empty() || desc.contains(char::is_whitespace) {
                return Err(Error::InvalidArgument(format!(
                    "--desc {:?} must be a single non-empty word",
                    desc
                )));
            }
            let output = match required(sub, "output")?.as_str() {
                "-" => OutputTarget::Stdout,
                path => OutputTarget::File(PathBuf::from(path)),
            };
            Ok(CliAction::Search {
                index: required_path(sub, "index")?,
                queries: required_path(sub, "queries")?,
                format: parse_format(sub.get_one::<String>("format").map(String::as_str))?,
                output,
                desc,
            })
        }
        Some(("reset", sub)) => Ok(CliAction::Reset {
            index: required_path(sub, "index")?,
        }),
        Some(("evaluate", sub)) => Ok(CliAction::Evaluate {
            qrels: required_path(sub, "qrels")?,
            run: required_path(sub, "run")?,
            per_query: sub.get_flag("per-query"),
        }),
        Some(("snippet", sub)) => Ok(CliAction::Snippet {
            index: required_path(sub, "index")?,
            queries: required_path(sub, "queries")?,
            run: required_path(sub, "run")?,
            format: parse_format(sub.get_one::<String>("format").map(String::as_str))?,
            words: match sub.get_one::<String>("words") {
                Some(raw) => parse_positive(raw, "--words")?,
                None => DEFAULT_SNIPPET_WORDS,
            },
        }),
        Some((other, _)) => Err(Error::InvalidArgument(format!(
            "unknown subcommand '{}'",
            other
        ))),
        None => Err(Error::InvalidArgument("no subcommand given".to_string())),
    }
}

fn required(matches: &ArgMatches, name: &str) -> Result<String> {
    matches
        .get_one::<String>(name)
        .cloned()
        .ok_or_else(|| Error::InvalidArgument(format!("--{} is required", name)))
}

fn required_path(matches: &ArgMatches, name: &str) -> Result<PathBuf> {
    required(matches, name).map(PathBuf::from)
}

fn parse_top_k(raw: &str) -> Result<usize> {
    parse_positive(raw, "--top-k")
}

fn parse_positive(raw: &str, flag: &str) -> Result<usize> {
    match raw.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(Error::InvalidArgument(format!(
            "{} {:?} must be a positive integer",
            flag, raw
        ))),
    }
}

fn parse_format(raw: Option<&str>) -> Result<QueryFormat> {
    match raw.map(str::to_ascii_lowercase).as_deref() {
        None | Some("simple") => Ok(QueryFormat::Simple),
        Some("cacm") | Some("legacy") | Some("xml") => Ok(QueryFormat::Cacm),
        Some(other) => Err(Error::InvalidArgument(format!(
            "unknown query format '{}': expected simple or cacm",
            other
        ))),
    }
}
