//! CLI command implementations.

pub mod count;
pub mod paths;
pub mod schema;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Args;
use metagraph_common::types::{NodeId, OriginalNodeId};
use metagraph_core::graph::HinGraph;
use metagraph_engine::{EnumerationConfig, EnumerationRequest, LengthMode};

use crate::loader;

/// Search options shared by `paths` and `count`.
#[derive(Args)]
pub struct SearchArgs {
    /// Maximum walk length in hops
    #[arg(long, short = 'k', default_value_t = 3)]
    max_length: usize,

    /// Original id of the start node (omit for the whole graph)
    #[arg(long)]
    start: Option<u64>,

    /// Original id of the end node
    #[arg(long, requires = "start")]
    end: Option<u64>,

    /// File of `<start> <end>` original-id pairs to search
    #[arg(long, conflicts_with_all = ["start", "end"])]
    pairs: Option<PathBuf>,

    /// Restrict whole-graph search to start nodes with dense ids in `[from, to)`
    #[arg(long, num_args = 2, value_names = ["FROM", "TO"], conflicts_with_all = ["start", "pairs"])]
    node_range: Option<Vec<u32>>,

    /// Probability of discarding each edge during the search
    #[arg(long, default_value_t = 0.0)]
    edge_skip: f64,

    /// Probability of discarding a whole start/end pair (whole-graph and pair-file modes)
    #[arg(long, default_value_t = 0.0)]
    node_skip: f64,

    /// Record only walks of exactly `max_length` hops
    #[arg(long)]
    exact_length: bool,
}

impl SearchArgs {
    /// Per-request engine configuration.
    pub fn config(&self) -> EnumerationConfig {
        let mode = if self.exact_length {
            LengthMode::Exact
        } else {
            LengthMode::UpTo
        };
        EnumerationConfig::new(self.max_length)
            .with_edge_skip_probability(self.edge_skip)
            .with_node_skip_probability(self.node_skip)
            .with_length_mode(mode)
    }

    /// Translates original ids into an enumeration request.
    pub fn request(&self, graph: &HinGraph) -> Result<EnumerationRequest> {
        if let Some(path) = &self.pairs {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            let pairs = loader::parse_pairs(&text)?
                .into_iter()
                .map(|(start, end)| Ok((mapped(graph, start)?, mapped(graph, end)?)))
                .collect::<Result<Vec<_>>>()?;
            return Ok(EnumerationRequest::Pairs(pairs));
        }

        if let Some(range) = &self.node_range {
            let [from, to] = range.as_slice() else {
                bail!("--node-range takes two node ids");
            };
            return Ok(EnumerationRequest::WholeGraph {
                range: Some(NodeId::new(*from)..NodeId::new(*to)),
            });
        }

        let start = self.start.map(|id| mapped(graph, id)).transpose()?;
        let end = self.end.map(|id| mapped(graph, id)).transpose()?;
        Ok(EnumerationRequest::from_bounds(start, end)?)
    }
}

fn mapped(graph: &HinGraph, original: u64) -> Result<NodeId> {
    Ok(graph.to_mapped(OriginalNodeId::new(original))?)
}
