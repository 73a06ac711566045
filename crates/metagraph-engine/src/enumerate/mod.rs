//! Instance-level meta-path enumeration.
//!
//! A depth-bounded search walks the graph from a start node, recording a
//! trace of per-step label sets. Each recorded trace is expanded into one
//! meta-path per choice of label at every step.
//!
//! Four request shapes are supported:
//!
//! | Request | Walks recorded |
//! |---------|----------------|
//! | [`EnumerationRequest::Pair`] | from `start`, ending on `end` |
//! | [`EnumerationRequest::From`] | every walk from `start` |
//! | [`EnumerationRequest::WholeGraph`] | from each start node to each of its neighbors |
//! | [`EnumerationRequest::Pairs`] | for each listed `(start, end)` pair |
//!
//! The last two run one task per start node (or pair) on the worker pool.

mod collect;

use std::fmt;
use std::ops::Range;

use tracing::{debug, info};

pub use collect::{OccurrenceCollector, PathCollector, PathSetCollector};

use crate::config::{DEFAULT_SEED, EnumerationConfig, LengthMode};
use crate::count::Occurrences;
use crate::metapath::MetaPathSet;
use crate::metapath::trace::TraceBuffer;
use crate::sampling::{EdgeSampler, keep_pair, pair_seed};
use crate::sink::{PairTraceDump, TraceSink};
use metagraph_common::types::NodeId;
use metagraph_common::utils::error::{Error, Result};
use metagraph_core::execution::WorkerPool;
use metagraph_core::graph::{Direction, HeterogeneousGraph};

/// What to enumerate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnumerationRequest {
    /// Walks from `start` that end on `end`.
    Pair {
        /// First node of every walk.
        start: NodeId,
        /// Last node of every walk.
        end: NodeId,
    },
    /// Every walk from `start`, wherever it ends.
    From {
        /// First node of every walk.
        start: NodeId,
    },
    /// Every adjacent pair, optionally restricted to start nodes in `range`.
    WholeGraph {
        /// Half-open range of start nodes, clamped to the graph. A range lying
        /// entirely past the last node selects nothing; an inverted range is
        /// rejected.
        range: Option<Range<NodeId>>,
    },
    /// An explicit list of start/end pairs.
    Pairs(Vec<(NodeId, NodeId)>),
}

impl EnumerationRequest {
    /// Chooses the mode from optional start and end nodes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] for an end node without a start node.
    pub fn from_bounds(start: Option<NodeId>, end: Option<NodeId>) -> Result<Self> {
        match (start, end) {
            (Some(start), Some(end)) => Ok(Self::Pair { start, end }),
            (Some(start), None) => Ok(Self::From { start }),
            (None, None) => Ok(Self::WholeGraph { range: None }),
            (None, Some(_)) => Err(Error::invalid("start", "an end node requires a start node")),
        }
    }

    /// Whether pair-level sampling applies to this request.
    #[must_use]
    pub fn samples_pairs(&self) -> bool {
        matches!(self, Self::WholeGraph { .. } | Self::Pairs(_))
    }
}

impl fmt::Display for EnumerationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pair { start, end } => write!(f, "pair {start}->{end}"),
            Self::From { start } => write!(f, "from {start}"),
            Self::WholeGraph { range: None } => write!(f, "whole graph"),
            Self::WholeGraph { range: Some(range) } => {
                write!(f, "whole graph [{}, {})", range.start, range.end)
            }
            Self::Pairs(pairs) => write!(f, "{} pairs", pairs.len()),
        }
    }
}

/// Outcome of [`MetaPathEnumerator::enumerate`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnumerationResult {
    /// Distinct meta-paths, possibly truncated by the request's limit.
    pub meta_paths: MetaPathSet,
    /// Raw traces recorded before expansion.
    pub trace_count: u64,
    /// Start/end pairs searched (after pair sampling).
    pub pairs_processed: usize,
    /// Whether the limit dropped any meta-path.
    pub truncated: bool,
}

/// Merged output of every task.
#[derive(Debug, Default)]
struct Outcome<C> {
    collector: C,
    traces: u64,
    instances: u64,
    pairs: usize,
}

impl<C: PathCollector> Outcome<C> {
    fn absorb(&mut self, other: Outcome<C>) {
        self.collector.merge(other.collector);
        self.traces += other.traces;
        self.instances += other.instances;
        self.pairs += other.pairs;
    }
}

/// Enumerates meta-paths over any [`HeterogeneousGraph`].
pub struct MetaPathEnumerator<'a, G: HeterogeneousGraph> {
    graph: &'a G,
    pool: &'a WorkerPool,
    direction: Direction,
    seed: u64,
    sink: Option<&'a dyn TraceSink>,
}

impl<'a, G: HeterogeneousGraph> MetaPathEnumerator<'a, G> {
    /// Creates an enumerator walking `graph` as undirected.
    #[must_use]
    pub fn new(graph: &'a G, pool: &'a WorkerPool) -> Self {
        Self {
            graph,
            pool,
            direction: Direction::Both,
            seed: DEFAULT_SEED,
            sink: None,
        }
    }

    /// Sets the adjacency view walked by the search.
    #[must_use]
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Sets the sampling seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sends every searched pair's meta-paths to `sink`.
    #[must_use]
    pub fn with_sink(mut self, sink: &'a dyn TraceSink) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Enumerates the distinct meta-paths of `request`.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidParameter`] if `config` is invalid.
    /// - [`Error::UnknownNode`] if a requested start or end node is not in the graph.
    /// - [`Error::PartialWorkerFailure`] if any task fails; no partial result is returned.
    pub fn enumerate(
        &self,
        request: &EnumerationRequest,
        config: &EnumerationConfig,
    ) -> Result<EnumerationResult> {
        let outcome = self.collect::<PathSetCollector>(request, config)?;
        let mut meta_paths = outcome.collector.into_paths();

        let mut truncated = false;
        if let Some(limit) = config.limit
            && meta_paths.len() > limit
        {
            meta_paths = meta_paths.into_iter().take(limit).collect();
            truncated = true;
        }

        info!(
            paths = meta_paths.len(),
            traces = outcome.traces,
            instances = outcome.instances,
            pairs = outcome.pairs,
            truncated,
            "enumeration finished"
        );
        Ok(EnumerationResult {
            meta_paths,
            trace_count: outcome.traces,
            pairs_processed: outcome.pairs,
            truncated,
        })
    }

    /// Enumerates `request`, counting every expanded instance per meta-path.
    ///
    /// The limit does not apply; counting needs every observation.
    ///
    /// # Errors
    ///
    /// Same as [`Self::enumerate`].
    pub fn occurrences(
        &self,
        request: &EnumerationRequest,
        config: &EnumerationConfig,
    ) -> Result<Occurrences> {
        let outcome = self.collect::<OccurrenceCollector>(request, config)?;
        info!(
            traces = outcome.traces,
            instances = outcome.instances,
            pairs = outcome.pairs,
            "occurrence enumeration finished"
        );
        let node_skip = if request.samples_pairs() {
            config.node_skip_probability
        } else {
            0.0
        };
        Ok(Occurrences::new(
            outcome.collector.into_counts(),
            config.edge_skip_probability,
            node_skip,
        )
        .with_trace_count(outcome.traces))
    }

    fn collect<C: PathCollector>(
        &self,
        request: &EnumerationRequest,
        config: &EnumerationConfig,
    ) -> Result<Outcome<C>> {
        config.validate()?;
        info!(
            request = %request,
            max_length = config.max_length,
            edge_skip = config.edge_skip_probability,
            node_skip = config.node_skip_probability,
            mode = %config.length_mode,
            "enumerating meta-paths"
        );

        match request {
            EnumerationRequest::Pair { start, end } => {
                self.graph.check_node(*start)?;
                self.graph.check_node(*end)?;
                self.search(*start, Some(*end), config)
            }
            EnumerationRequest::From { start } => {
                self.graph.check_node(*start)?;
                self.search(*start, None, config)
            }
            EnumerationRequest::WholeGraph { range } => {
                let starts = self.start_nodes(range.as_ref())?;
                let outcomes = self.pool.run(starts, |_, start| {
                    let mut outcome = Outcome::<C>::default();
                    for &end in self.graph.neighbors(start, self.direction) {
                        if keep_pair(self.seed, start, end, config.node_skip_probability) {
                            outcome.absorb(self.search(start, Some(end), config)?);
                        }
                    }
                    debug!(
                        start = %start,
                        pairs = outcome.pairs,
                        traces = outcome.traces,
                        instances = outcome.instances,
                        "start node done"
                    );
                    Ok(outcome)
                })?;
                Ok(merge(outcomes))
            }
            EnumerationRequest::Pairs(pairs) => {
                for &(start, end) in pairs {
                    self.graph.check_node(start)?;
                    self.graph.check_node(end)?;
                }
                let outcomes = self.pool.run(pairs.clone(), |_, (start, end)| {
                    if keep_pair(self.seed, start, end, config.node_skip_probability) {
                        self.search::<C>(start, Some(end), config)
                    } else {
                        Ok(Outcome::default())
                    }
                })?;
                Ok(merge(outcomes))
            }
        }
    }

    /// Searches from `start`, recording walks that end on `end` (or any walk).
    fn search<C: PathCollector>(
        &self,
        start: NodeId,
        end: Option<NodeId>,
        config: &EnumerationConfig,
    ) -> Result<Outcome<C>> {
        let mut search = Search {
            graph: self.graph,
            direction: self.direction,
            sampler: EdgeSampler::new(config.edge_skip_probability),
            end,
            max_length: config.max_length,
            length_mode: config.length_mode,
            trace: TraceBuffer::with_capacity(config.max_length),
            collector: C::default(),
            traces: 0,
            instances: 0,
        };
        search.trace.start(self.graph.labels(start));
        search.visit(start, config.max_length, pair_seed(self.seed, start, end.unwrap_or(start)))?;

        if let (Some(sink), Some(end)) = (self.sink, end) {
            let paths = search.collector.path_set();
            sink.write_pair(&PairTraceDump {
                max_length: config.max_length,
                edge_skip_probability: config.edge_skip_probability,
                start: self.graph.original_id(start),
                end: self.graph.original_id(end),
                paths: &paths,
            })?;
        }

        Ok(Outcome {
            collector: search.collector,
            traces: search.traces,
            instances: search.instances,
            pairs: 1,
        })
    }

    fn start_nodes(&self, range: Option<&Range<NodeId>>) -> Result<Vec<NodeId>> {
        let node_count = self.graph.node_count();
        let (first, last) = match range {
            None => (0, node_count),
            Some(range) => {
                if range.start > range.end {
                    return Err(Error::invalid(
                        "range",
                        format!("start {} is past end {}", range.start, range.end),
                    ));
                }
                (
                    range.start.index().min(node_count),
                    range.end.index().min(node_count),
                )
            }
        };
        Ok((first..last).map(|index| NodeId::new(index as u32)).collect())
    }
}

fn merge<C: PathCollector>(outcomes: Vec<Outcome<C>>) -> Outcome<C> {
    let mut merged = Outcome::default();
    for outcome in outcomes {
        merged.absorb(outcome);
    }
    merged
}

/// State of one depth-bounded search.
struct Search<'g, G, C> {
    graph: &'g G,
    direction: Direction,
    sampler: EdgeSampler,
    end: Option<NodeId>,
    max_length: usize,
    length_mode: LengthMode,
    trace: TraceBuffer<'g>,
    collector: C,
    traces: u64,
    instances: u64,
}

impl<'g, G: HeterogeneousGraph, C: PathCollector> Search<'g, G, C> {
    fn visit(&mut self, node: NodeId, remaining: usize, seed: u64) -> Result<()> {
        let graph = self.graph;
        let mut branch = self.sampler.branch(seed);
        for &next in graph.neighbors(node, self.direction) {
            let (keep, child_seed) = branch.next_edge();
            if !keep {
                continue;
            }

            let edge = graph.edge_label(node, next)?;
            self.trace.push(edge, graph.labels(next));

            let arrived = self.end.is_none_or(|end| end == next);
            if arrived && self.length_mode.accepts(self.trace.hops(), self.max_length) {
                self.record();
            }
            // In pair mode a branch stops at the end node.
            if self.end != Some(next) && remaining > 1 {
                self.visit(next, remaining - 1, child_seed)?;
            }

            self.trace.pop();
        }
        Ok(())
    }

    fn record(&mut self) {
        self.traces += 1;
        self.instances += self.trace.combinations() as u64;
        let collector = &mut self.collector;
        self.trace.expand(|path| collector.record(path));
    }
}
