//! Outcome → human/json string formatting.
//!
//! Two modes:
//! - **Human** (default): short aligned summaries
//! - **JSON** (`--json`): `serde_json::to_string_pretty`

use std::path::Path;

use serde_json::json;
use trecrun_core::{Error, Query};
use trecrun_search::{EvaluationSummary, IndexSummary, Snippet};

/// Output formatting mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

fn pretty(value: serde_json::Value) -> String {
    serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string())
}

/// Format the result of an indexing pass.
pub fn format_index_summary(summary: &IndexSummary, destination: &Path, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => pretty(json!({
            "index": destination.display().to_string(),
            "indexed": summary.indexed,
            "skipped": summary.skipped,
            "failed": summary.failed,
        })),
        OutputMode::Human => format!(
            "Indexed {} document(s) into {} ({} skipped, {} failed)",
            summary.indexed,
            destination.display(),
            summary.skipped,
            summary.failed
        ),
    }
}

/// Format the result of a reset.
pub fn format_reset(path: &Path, removed: bool, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => pretty(json!({
            "index": path.display().to_string(),
            "removed": removed,
        })),
        OutputMode::Human if removed => format!("Removed {}", path.display()),
        OutputMode::Human => format!("Nothing to remove at {}", path.display()),
    }
}

/// Format the result of a search batch written to a file.
pub fn format_search_summary(
    queries: usize,
    empty: usize,
    lines: usize,
    output: &Path,
    mode: OutputMode,
) -> String {
    match mode {
        OutputMode::Json => pretty(json!({
            "queries": queries,
            "empty": empty,
            "lines": lines,
            "output": output.display().to_string(),
        })),
        OutputMode::Human => format!(
            "Wrote {} line(s) for {} quer{} to {} ({} without results)",
            lines,
            queries,
            if queries == 1 { "y" } else { "ies" },
            output.display(),
            empty
        ),
    }
}

/// Format evaluation metrics.
pub fn format_evaluation(summary: &EvaluationSummary, per_query: bool, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => {
            let mut value = json!({
                "queries": summary.queries,
                "map": summary.map,
                "mrr": summary.mrr,
                "p@5": summary.mean_precision_at_5,
                "p@20": summary.mean_precision_at_20,
            });
            if per_query {
                value["per_query"] =
                    serde_json::to_value(&summary.per_query).unwrap_or(serde_json::Value::Null);
            }
            pretty(value)
        }
        OutputMode::Human => {
            let mut out = String::new();
            if per_query {
                out.push_str("query    AP      RR      P@5     P@20    recall\n");
                for m in &summary.per_query {
                    out.push_str(&format!(
                        "{:<8} {:.4}  {:.4}  {:.4}  {:.4}  {:.4}\n",
                        m.query_id,
                        m.average_precision,
                        m.reciprocal_rank,
                        m.precision_at_5,
                        m.precision_at_20,
                        m.recall
                    ));
                }
                out.push('\n');
                for m in &summary.per_query {
                    out.push_str(&format!("Query {}\n", m.query_id));
                    out.push_str("Rank Document_Id Precision Recall\n");
                    for p in &m.ranks {
                        out.push_str(&format!(
                            "{:<4} {:<11} {:.4}    {:.4}\n",
                            p.rank, p.doc_id, p.precision, p.recall
                        ));
                    }
                    out.push('\n');
                }
            }
            out.push_str(&format!("queries  {}\n", summary.queries));
            out.push_str(&format!("MAP      {:.4}\n", summary.map));
            out.push_str(&format!("MRR      {:.4}\n", summary.mrr));
            out.push_str(&format!("P@5      {:.4}\n", summary.mean_precision_at_5));
            out.push_str(&format!("P@20     {:.4}", summary.mean_precision_at_20));
            out
        }
    }
}

/// Format snippets grouped under their queries, in query-file order.
pub fn format_snippets(queries: &[Query], snippets: &[Snippet], mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => {
            pretty(serde_json::to_value(snippets).unwrap_or(serde_json::Value::Null))
        }
        OutputMode::Human => {
            let mut out = String::new();
            for query in queries {
                let mut hits = snippets
                    .iter()
                    .filter(|s| s.query_id == query.id())
                    .peekable();
                if hits.peek().is_none() {
                    continue;
                }
                out.push_str(&format!("Query {}: {}\n", query.id(), query.text()));
                for snippet in hits {
                    out.push_str(&format!(
                        "{:>4}. {} ({})\n      {}\n",
                        snippet.rank, snippet.name, snippet.doc_id, snippet.text
                    ));
                }
                out.push('\n');
            }
            out.trim_end().to_string()
        }
    }
}

/// Format an error.
pub fn format_error(err: &Error, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => pretty(json!({
            "error": err.to_string(),
            "exit_code": err.exit_code(),
        })),
        OutputMode::Human => format!("error: {}", err),
    }
}
