//! trecrun CLI: batch indexing, retrieval and evaluation for IR test
//! collections.
//!
//! ```text
//! trecrun index    --corpus cacm/ --index cacm.index
//! trecrun search   --index cacm.index --queries cacm.query.txt --format cacm \
//!                  --output run.txt --desc BASE
//! trecrun evaluate --qrels cacm.rel.txt --run run.txt --per-query
//! trecrun snippet  --index cacm.index --queries cacm.query.txt --run run.txt
//! trecrun reset    --index cacm.index
//! ```
//!
//! Exit codes: 0 on success, 1 for bad arguments or configuration, 2 for
//! I/O and engine failures.

mod commands;
mod format;
mod parse;
mod pipeline;

use std::process;

use tracing_subscriber::EnvFilter;

use commands::build_cli;
use format::{format_error, OutputMode};
use parse::{matches_to_action, matches_to_settings};

fn main() {
    let matches = match build_cli().try_get_matches() {
        Ok(matches) => matches,
        Err(e) => {
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            process::exit(code);
        }
    };

    let cwd = std::env::current_dir().unwrap_or_default();
    let settings = match matches_to_settings(&matches, &cwd) {
        Ok(settings) => settings,
        Err(e) => {
            init_logging(matches.get_flag("verbose"));
            eprintln!("{}", format_error(&e, OutputMode::Human));
            process::exit(e.exit_code());
        }
    };
    init_logging(settings.verbose);

    let exit_code = match matches_to_action(&matches)
        .and_then(|action| pipeline::execute(action, &settings))
    {
        Ok(Some(output)) => {
            if !output.is_empty() {
                println!("{}", output);
            }
            0
        }
        Ok(None) => 0,
        Err(e) => {
            eprintln!("{}", format_error(&e, settings.mode));
            e.exit_code()
        }
    };
    process::exit(exit_code);
}

/// Install the stderr log subscriber. `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let default = if verbose {
        "warn,trecrun=debug"
    } else {
        "warn,trecrun=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
