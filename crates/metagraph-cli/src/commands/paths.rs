//! Meta-path enumeration command.

use std::path::Path;

use anyhow::Result;
use comfy_table::Cell;
use metagraph_engine::MetaPathEngine;
use serde::Serialize;

use super::SearchArgs;
use crate::dump::DirectorySink;
use crate::output::{self, Format};
use crate::{Global, loader};

/// Enumeration output.
#[derive(Serialize)]
struct PathsOutput {
    meta_paths: Vec<String>,
    trace_count: u64,
    pairs_processed: usize,
    truncated: bool,
}

/// Run the paths command.
pub fn run(
    path: &Path,
    search: &SearchArgs,
    limit: Option<usize>,
    names: bool,
    dump_dir: Option<&Path>,
    global: &Global,
) -> Result<()> {
    let graph = loader::load(path)?;
    let engine = MetaPathEngine::new(&graph, global.config.clone())?;
    let request = search.request(&graph)?;
    let mut config = search.config();
    if let Some(limit) = limit {
        config = config.with_limit(limit);
    }

    let result = match dump_dir {
        Some(dir) => {
            let sink = DirectorySink::create(dir)?;
            engine.enumerate_with_sink(&request, &config, &sink)?
        }
        None => engine.enumerate(&request, &config)?,
    };

    let output = PathsOutput {
        meta_paths: result
            .meta_paths
            .iter()
            .map(|path| {
                if names {
                    path.render(graph.label_dictionary(), graph.edge_type_dictionary())
                } else {
                    path.to_string()
                }
            })
            .collect(),
        trace_count: result.trace_count,
        pairs_processed: result.pairs_processed,
        truncated: result.truncated,
    };

    let quiet = global.quiet;
    match Format::from(global.format) {
        Format::Json => output::print_json(&output, quiet)?,
        Format::Table => {
            let mut table = output::create_table();
            output::add_header(&mut table, &["Meta-Path", "Hops"]);
            for (key, path) in output.meta_paths.iter().zip(&result.meta_paths) {
                table.add_row(vec![Cell::new(key), Cell::new(path.hops())]);
            }
            if !quiet {
                println!("{table}");
            }
            output::print_key_value_table(
                &[
                    ("Meta-paths", output.meta_paths.len().to_string()),
                    ("Traces", output.trace_count.to_string()),
                    ("Pairs", output.pairs_processed.to_string()),
                    ("Truncated", output.truncated.to_string()),
                ],
                quiet,
            );
        }
    }

    if let Some(dir) = dump_dir {
        output::success(&format!("Trace dumps written to {}", dir.display()), quiet);
    }
    Ok(())
}
