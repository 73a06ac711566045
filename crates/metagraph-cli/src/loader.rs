//! Plain-text graph loader.
//!
//! ```text
//! # comment
//! node <original_id> <label>[,<label>...]
//! edge <src_original_id> <dst_original_id> <edge_type>
//! ```
//!
//! Blank lines and `#` comments are ignored. Nodes must be declared before
//! the edges that use them.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use metagraph_core::graph::{HeterogeneousGraph, HinGraph, HinGraphBuilder};

/// Loads a graph file.
pub fn load(path: &Path) -> Result<HinGraph> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let graph = parse(&text).with_context(|| format!("loading {}", path.display()))?;
    tracing::info!(
        path = %path.display(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "graph loaded"
    );
    Ok(graph)
}

/// Parses graph text.
pub fn parse(text: &str) -> Result<HinGraph> {
    let mut builder = HinGraphBuilder::new();
    for (index, raw) in text.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let fields: Vec<&str> = line.split_whitespace().collect();
        match fields.as_slice() {
            ["node", id, labels] => {
                let id = parse_id(id, line_no)?;
                let labels: Vec<&str> = labels.split(',').filter(|l| !l.is_empty()).collect();
                builder
                    .add_node(id, &labels)
                    .with_context(|| format!("line {line_no}"))?;
            }
            ["edge", src, dst, edge_type] => {
                let (src, dst) = (parse_id(src, line_no)?, parse_id(dst, line_no)?);
                builder
                    .add_edge(src, dst, edge_type)
                    .with_context(|| format!("line {line_no}"))?;
            }
            _ => bail!("line {line_no}: expected `node <id> <labels>` or `edge <src> <dst> <type>`"),
        }
    }
    Ok(builder.build())
}

/// Parses an edge-list file of `<start> <end>` original-id pairs.
pub fn parse_pairs(text: &str) -> Result<Vec<(u64, u64)>> {
    let mut pairs = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let fields: Vec<&str> = line.split_whitespace().collect();
        let [start, end] = fields.as_slice() else {
            bail!("line {line_no}: expected `<start> <end>`");
        };
        pairs.push((parse_id(start, line_no)?, parse_id(end, line_no)?));
    }
    Ok(pairs)
}

fn parse_id(token: &str, line_no: usize) -> Result<u64> {
    token
        .parse()
        .with_context(|| format!("line {line_no}: `{token}` is not a node id"))
}
