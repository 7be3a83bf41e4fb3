//! Execution of parsed CLI actions against the tantivy engine.

use std::io;
use std::path::Path;

use trecrun_core::{AnalyzerConfig, Error, Query, Result};
use trecrun_engine::{TantivyEngine, TantivyIndexReader, TextIndexEngine};
use trecrun_search::{
    ensure_aligned, evaluate, reset_index, CorpusIndexer, QueryLoader, Qrels, ResultWriter,
    Retriever, RunRankings, SnippetGenerator,
};

use crate::format::{
    format_evaluation, format_index_summary, format_reset, format_search_summary,
    format_snippets,
};
use crate::parse::{CliAction, OutputTarget, QueryFormat, Settings};

/// Run `action` and return the text to print on stdout, if any.
pub fn execute(action: CliAction, settings: &Settings) -> Result<Option<String>> {
    match action {
        CliAction::Index {
            corpus,
            index,
            force,
        } => run_index(&corpus, &index, force, settings).map(Some),
        CliAction::Search {
            index,
            queries,
            format,
            output,
            desc,
        } => run_search(&index, &queries, format, &output, &desc, settings),
        CliAction::Reset { index } => {
            let removed = reset_index(&index)?;
            Ok(Some(format_reset(&index, removed, settings.mode)))
        }
        CliAction::Evaluate {
            qrels,
            run,
            per_query,
        } => {
            let qrels = Qrels::load(&qrels)?;
            let run = RunRankings::load(&run)?;
            let summary = evaluate(&qrels, &run);
            Ok(Some(format_evaluation(&summary, per_query, settings.mode)))
        }
        CliAction::Snippet {
            index,
            queries,
            run,
            format,
            words,
        } => {
            let queries = load_queries(&queries, format)?;
            let run = RunRankings::load(&run)?;
            let reader = TantivyEngine::new().open_index(&index)?;
            let analyzer = search_analyzer(&reader, settings)?;
            let snippets = SnippetGenerator::new(reader, analyzer)
                .with_max_words(words)
                .generate(&queries, &run);
            Ok(Some(format_snippets(&queries, &snippets, settings.mode)))
        }
    }
}

fn analyzer(settings: &Settings) -> Result<AnalyzerConfig> {
    settings
        .config
        .analyzer_config()
        .map_err(|e| Error::InvalidArgument(e.to_string()))
}

/// Analyzer for querying `reader`: the one recorded with the index.
///
/// `--stem`/`--stopwords` must agree with the record; an index without a
/// record falls back to the configured analyzer.
fn search_analyzer(reader: &TantivyIndexReader, settings: &Settings) -> Result<AnalyzerConfig> {
    let recorded = match reader.indexed_with() {
        Some(recorded) => recorded,
        None => return analyzer(settings),
    };
    if settings.analyzer_from_flags {
        let requested = analyzer(settings)?;
        if &requested != recorded {
            return Err(Error::InvalidArgument(format!(
                "analyzer flags ask for {} but {} was built with {}",
                requested.label(),
                reader.path().display(),
                recorded.label()
            )));
        }
    }
    tracing::debug!(
        target: "trecrun::search",
        analyzer = %recorded.label(),
        "Using the analyzer recorded with the index"
    );
    Ok(recorded.clone())
}

fn run_index(corpus: &Path, index: &Path, force: bool, settings: &Settings) -> Result<String> {
    if force && reset_index(index)? {
        tracing::info!(target: "trecrun::index", path = %index.display(), "Replacing existing index");
    }
    let indexer = CorpusIndexer::new(
        TantivyEngine::new(),
        analyzer(settings)?,
        settings.config.corpus.clone(),
    );
    let summary = indexer.index(corpus, index)?;
    Ok(format_index_summary(&summary, index, settings.mode))
}

fn load_queries(path: &Path, format: QueryFormat) -> Result<Vec<Query>> {
    match format {
        QueryFormat::Simple => QueryLoader::load_simple(path),
        QueryFormat::Cacm => QueryLoader::load_legacy_xml(path),
    }
}

fn run_search(
    index: &Path,
    queries: &Path,
    format: QueryFormat,
    output: &OutputTarget,
    desc: &str,
    settings: &Settings,
) -> Result<Option<String>> {
    let writer = ResultWriter::new(desc)?;
    let queries = load_queries(queries, format)?;
    let reader = TantivyEngine::new().open_index(index)?;
    let analyzer = search_analyzer(&reader, settings)?;
    let retriever = Retriever::new(
        reader,
        analyzer,
        settings.config.top_k,
        settings.config.run_tag.as_str(),
    )?;

    let results = retriever.retrieve_all(&queries);
    ensure_aligned(&queries, &results, retriever.top_k())?;
    let empty = results.iter().filter(|hits| hits.is_empty()).count();

    match output {
        OutputTarget::Stdout => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            writer.write_to(&mut lock, &results)?;
            Ok(None)
        }
        OutputTarget::File(path) => {
            let lines = writer.write(path, &results)?;
            Ok(Some(format_search_summary(
                queries.len(),
                empty,
                lines,
                path,
                settings.mode,
            )))
        }
    }
}
