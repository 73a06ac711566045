//! Graph schema command.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Result;
use comfy_table::Cell;
use metagraph_core::graph::HeterogeneousGraph;
use metagraph_core::schema::SchemaRecord;
use metagraph_engine::{LengthMode, MetaPathEngine};
use serde::Serialize;

use crate::output::{self, Format};
use crate::{Global, loader};

/// Schema output.
#[derive(Serialize)]
struct SchemaOutput {
    nodes: usize,
    labels: BTreeMap<u32, String>,
    edge_types: BTreeMap<u32, String>,
    schema: SchemaRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    meta_paths: Option<Vec<String>>,
}

/// Run the schema command.
pub fn run(path: &Path, max_paths_length: Option<usize>, global: &Global) -> Result<()> {
    let graph = loader::load(path)?;
    let engine = MetaPathEngine::new(&graph, global.config.clone())?;
    let schema = engine.schema()?;

    let labels = graph.label_dictionary();
    let edge_types = graph.edge_type_dictionary();
    let meta_paths = max_paths_length
        .map(|k| engine.schema_meta_paths(k, LengthMode::UpTo))
        .transpose()?
        .map(|paths| {
            paths
                .iter()
                .map(|path| path.render(labels, edge_types))
                .collect::<Vec<_>>()
        });

    let output = SchemaOutput {
        nodes: graph.node_count(),
        labels: labels.to_record(),
        edge_types: edge_types.to_record(),
        schema: schema.to_record(),
        meta_paths,
    };

    let quiet = global.quiet;
    match Format::from(global.format) {
        Format::Json => output::print_json(&output, quiet)?,
        Format::Table => {
            if quiet {
                return Ok(());
            }
            let name = |names: &BTreeMap<u32, String>, id: u32| {
                names.get(&id).cloned().unwrap_or_else(|| id.to_string())
            };

            let mut table = output::create_table();
            output::add_header(&mut table, &["Label", "Neighbor Label", "Edge Type"]);
            for (label, row) in output.schema.rows.iter().enumerate() {
                for &(neighbor, edge) in row {
                    table.add_row(vec![
                        Cell::new(name(&output.labels, label as u32)),
                        Cell::new(name(&output.labels, neighbor)),
                        Cell::new(name(&output.edge_types, edge)),
                    ]);
                }
            }
            println!("{table}");

            if let Some(paths) = &output.meta_paths {
                println!();
                let mut table = output::create_table();
                output::add_header(&mut table, &["Schema Meta-Path"]);
                for path in paths {
                    table.add_row(vec![Cell::new(path)]);
                }
                println!("{table}");
            }
            output::status(
                &format!(
                    "{} nodes, {} labels, {} schema pairs",
                    output.nodes,
                    output.labels.len(),
                    schema.pair_count()
                ),
                quiet,
            );
        }
    }

    Ok(())
}
