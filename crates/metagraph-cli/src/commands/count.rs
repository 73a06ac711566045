//! Meta-path counting command.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Result;
use comfy_table::Cell;
use metagraph_engine::{Counts, MetaPath, MetaPathEngine};
use serde::Serialize;

use super::SearchArgs;
use crate::output::{self, Format};
use crate::{Global, loader};

/// Counting output.
#[derive(Serialize)]
#[serde(tag = "mode", content = "counts", rename_all = "lowercase")]
enum CountsOutput {
    Exact(BTreeMap<String, u64>),
    Approximate(BTreeMap<String, f64>),
}

/// Run the count command.
pub fn run(path: &Path, search: &SearchArgs, targets: &[String], global: &Global) -> Result<()> {
    let targets = MetaPath::parse_all(targets.iter().map(String::as_str))?;
    let graph = loader::load(path)?;
    let engine = MetaPathEngine::new(&graph, global.config.clone())?;
    let request = search.request(&graph)?;

    let counts = engine.count(&request, &search.config(), &targets)?;
    let output = match counts {
        Counts::Exact(counts) => CountsOutput::Exact(
            counts
                .into_iter()
                .map(|(path, count)| (path.to_string(), count))
                .collect(),
        ),
        Counts::Approximate(counts) => CountsOutput::Approximate(
            counts
                .into_iter()
                .map(|(path, estimate)| (path.to_string(), estimate))
                .collect(),
        ),
    };

    let quiet = global.quiet;
    match Format::from(global.format) {
        Format::Json => output::print_json(&output, quiet)?,
        Format::Table => {
            if quiet {
                return Ok(());
            }
            let mut table = output::create_table();
            match &output {
                CountsOutput::Exact(counts) => {
                    output::add_header(&mut table, &["Meta-Path", "Count"]);
                    for (key, count) in counts {
                        table.add_row(vec![Cell::new(key), Cell::new(count)]);
                    }
                }
                CountsOutput::Approximate(counts) => {
                    output::add_header(&mut table, &["Meta-Path", "Estimated Count"]);
                    for (key, estimate) in counts {
                        table.add_row(vec![Cell::new(key), Cell::new(format!("{estimate:.2}"))]);
                    }
                }
            }
            println!("{table}");
        }
    }
    Ok(())
}
