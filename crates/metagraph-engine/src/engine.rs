//! The engine facade.

use tracing::info;

use crate::config::{Config, EnumerationConfig, LengthMode};
use crate::count::{Counts, MetaPathCounter, Occurrences};
use crate::enumerate::{EnumerationRequest, EnumerationResult, MetaPathEnumerator};
use crate::metapath::MetaPathSet;
use crate::schema_paths::SchemaPathEnumerator;
use crate::sink::TraceSink;
use metagraph_common::utils::error::Result;
use metagraph_core::execution::WorkerPool;
use metagraph_core::graph::HeterogeneousGraph;
use metagraph_core::schema::{Schema, SchemaExtractor};

/// Runs schema extraction, enumeration and counting over a borrowed graph.
///
/// The engine owns its worker pools but never the graph: the caller builds
/// the graph, lends it for the engine's lifetime, and tears it down.
///
/// # Examples
///
/// ```no_run
/// use metagraph_core::graph::HinGraphBuilder;
/// use metagraph_engine::{Config, EnumerationConfig, EnumerationRequest, MetaPathEngine};
///
/// # fn main() -> metagraph_common::Result<()> {
/// let mut builder = HinGraphBuilder::new();
/// let author = builder.add_node(1, &["Author"])?;
/// let paper = builder.add_node(2, &["Paper"])?;
/// builder.add_edge(1, 2, "WROTE")?;
/// let graph = builder.build();
///
/// let engine = MetaPathEngine::new(&graph, Config::default())?;
/// let request = EnumerationRequest::Pair { start: author, end: paper };
/// let result = engine.enumerate(&request, &EnumerationConfig::new(3))?;
/// assert_eq!(result.meta_paths.len(), 1);
/// # Ok(())
/// # }
/// ```
pub struct MetaPathEngine<'g, G: HeterogeneousGraph> {
    graph: &'g G,
    config: Config,
    pool: WorkerPool,
    schema_pool: WorkerPool,
}

impl<'g, G: HeterogeneousGraph> MetaPathEngine<'g, G> {
    /// Creates an engine over `graph`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`](metagraph_common::Error::InvalidParameter)
    /// if the configuration is invalid, or an internal error if a worker pool
    /// cannot be started.
    pub fn new(graph: &'g G, config: Config) -> Result<Self> {
        config.validate()?;
        let pool = WorkerPool::new(config.threads)?;
        let schema_pool = WorkerPool::new(config.schema_threads)?;
        info!(
            nodes = graph.node_count(),
            labels = graph.label_count(),
            threads = config.threads,
            "engine ready"
        );
        Ok(Self {
            graph,
            config,
            pool,
            schema_pool,
        })
    }

    /// The borrowed graph.
    #[must_use]
    pub fn graph(&self) -> &'g G {
        self.graph
    }

    /// The engine configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Extracts the label-level schema of the whole graph.
    pub fn schema(&self) -> Result<Schema> {
        SchemaExtractor::new(&self.schema_pool)
            .with_partitions(self.config.schema_partitions)
            .extract(self.graph)
    }

    /// Infers every meta-path the schema permits, without visiting nodes.
    pub fn schema_meta_paths(&self, max_length: usize, mode: LengthMode) -> Result<MetaPathSet> {
        let schema = self.schema()?;
        SchemaPathEnumerator::new(&schema).enumerate(max_length, mode)
    }

    /// Enumerates the distinct meta-paths of `request`.
    pub fn enumerate(
        &self,
        request: &EnumerationRequest,
        config: &EnumerationConfig,
    ) -> Result<EnumerationResult> {
        self.enumerator().enumerate(request, config)
    }

    /// Like [`Self::enumerate`], also handing each searched pair to `sink`.
    pub fn enumerate_with_sink(
        &self,
        request: &EnumerationRequest,
        config: &EnumerationConfig,
        sink: &dyn TraceSink,
    ) -> Result<EnumerationResult> {
        self.enumerator().with_sink(sink).enumerate(request, config)
    }

    /// Enumerates `request`, keeping per-meta-path instance counts.
    pub fn occurrences(
        &self,
        request: &EnumerationRequest,
        config: &EnumerationConfig,
    ) -> Result<Occurrences> {
        self.enumerator().occurrences(request, config)
    }

    /// Counts `targets` over the enumeration of `request`.
    ///
    /// Sampled requests yield [`Counts::Approximate`], others [`Counts::Exact`].
    pub fn count(
        &self,
        request: &EnumerationRequest,
        config: &EnumerationConfig,
        targets: &MetaPathSet,
    ) -> Result<Counts> {
        let occurrences = self.occurrences(request, config)?;
        Ok(MetaPathCounter::new(&occurrences).count(targets))
    }

    fn enumerator(&self) -> MetaPathEnumerator<'_, G> {
        MetaPathEnumerator::new(self.graph, &self.pool)
            .with_direction(self.config.direction)
            .with_seed(self.config.seed)
    }
}

impl<G: HeterogeneousGraph> std::fmt::Debug for MetaPathEngine<'_, G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetaPathEngine")
            .field("nodes", &self.graph.node_count())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metapath::MetaPath;
    use metagraph_common::types::OriginalNodeId;
    use metagraph_core::graph::{HinGraph, HinGraphBuilder};

    fn bibliography() -> HinGraph {
        let mut builder = HinGraphBuilder::new();
        builder.add_node(1, &["Author"]).unwrap();
        builder.add_node(2, &["Author"]).unwrap();
        builder.add_node(3, &["Paper"]).unwrap();
        builder.add_node(4, &["Venue"]).unwrap();
        builder.add_edge(1, 3, "WROTE").unwrap();
        builder.add_edge(2, 3, "WROTE").unwrap();
        builder.add_edge(3, 4, "PUBLISHED_IN").unwrap();
        builder.build()
    }

    #[test]
    fn test_invalid_config_rejected() {
        let graph = bibliography();
        assert!(MetaPathEngine::new(&graph, Config::default().with_threads(0)).is_err());
    }

    #[test]
    fn test_schema_and_schema_paths() {
        let graph = bibliography();
        let engine = MetaPathEngine::new(&graph, Config::single_threaded()).unwrap();

        let schema = engine.schema().unwrap();
        assert_eq!(schema.pair_count(), 4);

        let paths = engine.schema_meta_paths(1, LengthMode::UpTo).unwrap();
        let rendered: Vec<String> = paths
            .iter()
            .map(|path| path.render(graph.label_dictionary(), graph.edge_type_dictionary()))
            .collect();
        assert!(rendered.contains(&"Author|WROTE|Paper".to_string()));
        assert!(rendered.contains(&"Venue|PUBLISHED_IN|Paper".to_string()));
    }

    #[test]
    fn test_co_author_count() {
        let graph = bibliography();
        let engine = MetaPathEngine::new(&graph, Config::default().with_threads(2)).unwrap();
        let request = EnumerationRequest::Pair {
            start: graph.to_mapped(OriginalNodeId::new(1)).unwrap(),
            end: graph.to_mapped(OriginalNodeId::new(2)).unwrap(),
        };
        let targets = MetaPath::parse_all(["0|0|1|0|0", "0|0|2"]).unwrap();

        let counts = engine
            .count(&request, &EnumerationConfig::new(2), &targets)
            .unwrap();
        match counts {
            Counts::Exact(counts) => {
                assert_eq!(counts[&MetaPath::parse("0|0|1|0|0").unwrap()], 1);
                assert_eq!(counts[&MetaPath::parse("0|0|2").unwrap()], 0);
            }
            Counts::Approximate(_) => panic!("unsampled request should count exactly"),
        }
    }
}
