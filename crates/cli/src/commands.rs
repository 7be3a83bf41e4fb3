//! Clap command tree definition.

use clap::{Arg, ArgAction, Command};

/// Build the complete CLI command tree.
pub fn build_cli() -> Command {
    Command::new("trecrun")
        .about("Index a test collection and write TREC run files")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .help("Config file (default: ./trecrun.toml if present)")
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log per-document and per-query detail")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("stem")
                .long("stem")
                .help("Apply English stemming when indexing (searches follow the index)")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("stopwords")
                .long("stopwords")
                .help("Stopword file, one word per line")
                .global(true),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("JSON output for summaries")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(build_index())
        .subcommand(build_search())
        .subcommand(build_reset())
        .subcommand(build_evaluate())
        .subcommand(build_snippet())
}

// =========================================================================
// Index
// =========================================================================

fn build_index() -> Command {
    Command::new("index")
        .about("Build an index from a corpus directory")
        .arg(
            Arg::new("corpus")
                .long("corpus")
                .required(true)
                .help("Directory holding the corpus files"),
        )
        .arg(
            Arg::new("index")
                .long("index")
                .required(true)
                .help("Index directory to create"),
        )
        .arg(
            Arg::new("force")
                .long("force")
                .help("Delete an existing index at the destination first")
                .action(ArgAction::SetTrue),
        )
}

// =========================================================================
// Search
// =========================================================================

fn build_search() -> Command {
    Command::new("search")
        .about("Run a query file against an index and write a run file")
        .arg(
            Arg::new("index")
                .long("index")
                .required(true)
                .help("Index directory"),
        )
        .arg(
            Arg::new("queries")
                .long("queries")
                .required(true)
                .help("Query file"),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .required(true)
                .help("Run file to write, or - for stdout"),
        )
        .arg(
            Arg::new("desc")
                .long("desc")
                .required(true)
                .help("Run description appended to the run tag (e.g. STOPPED)"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .help("Query file format: simple, cacm (default: simple)"),
        )
        .arg(
            Arg::new("top-k")
                .long("top-k")
                .short('k')
                .help("Hits per query (default: 100)"),
        )
        .arg(
            Arg::new("run-tag")
                .long("run-tag")
                .help("Run tag identifying the retrieval method (default: tantivy)"),
        )
}

// =========================================================================
// Reset
// =========================================================================

fn build_reset() -> Command {
    Command::new("reset")
        .about("Delete an index directory")
        .arg(
            Arg::new("index")
                .long("index")
                .required(true)
                .help("Index directory to delete"),
        )
}

// =========================================================================
// Evaluate
// =========================================================================

fn build_evaluate() -> Command {
    Command::new("evaluate")
        .about("Score a run file against relevance judgments")
        .arg(
            Arg::new("qrels")
                .long("qrels")
                .required(true)
                .help("Relevance judgments (qid Q0 CACM-NNNN rel)"),
        )
        .arg(
            Arg::new("run")
                .long("run")
                .required(true)
                .help("Run file produced by `trecrun search`"),
        )
        .arg(
            Arg::new("per-query")
                .long("per-query")
                .help("Also print metrics and a per-rank precision/recall table for each query")
                .action(ArgAction::SetTrue),
        )
}

// =========================================================================
// Snippet
// =========================================================================

fn build_snippet() -> Command {
    Command::new("snippet")
        .about("Print query-biased snippets for the documents of a run file")
        .arg(
            Arg::new("index")
                .long("index")
                .required(true)
                .help("Index the run was produced from"),
        )
        .arg(
            Arg::new("queries")
                .long("queries")
                .required(true)
                .help("Query file the run was produced from"),
        )
        .arg(
            Arg::new("run")
                .long("run")
                .required(true)
                .help("Run file produced by `trecrun search`"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .help("Query file format: simple, cacm (default: simple)"),
        )
        .arg(
            Arg::new("words")
                .long("words")
                .help("Word budget per snippet (default: 50)"),
        )
}
