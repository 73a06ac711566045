//! Concurrent schema extraction over node partitions.

use std::ops::Range;

use tracing::{debug, info};

use super::Schema;
use crate::execution::pool::{WorkerPool, partition_ranges};
use crate::graph::{Direction, HeterogeneousGraph};
use metagraph_common::types::NodeId;
use metagraph_common::utils::error::{Error, Result};

/// Builds the [`Schema`] of a whole graph.
///
/// The node-id space is cut into contiguous partitions; each worker scans the
/// outgoing edges of its own nodes into a private schema, and the partial
/// schemas are unioned after every worker has joined. Each node's outgoing
/// edges are scanned by exactly one partition, and set union is idempotent
/// and commutative, so the result does not depend on the partition count or
/// on scheduling.
#[derive(Debug)]
pub struct SchemaExtractor<'p> {
    pool: &'p WorkerPool,
    partitions: usize,
}

impl<'p> SchemaExtractor<'p> {
    /// Creates an extractor with one partition per pool worker.
    #[must_use]
    pub fn new(pool: &'p WorkerPool) -> Self {
        Self {
            pool,
            partitions: pool.threads(),
        }
    }

    /// Overrides the number of partitions, independently of the pool size.
    #[must_use]
    pub fn with_partitions(mut self, partitions: usize) -> Self {
        self.partitions = partitions;
        self
    }

    /// Extracts the schema of `graph`. An empty graph yields an all-empty schema.
    pub fn extract<G: HeterogeneousGraph>(&self, graph: &G) -> Result<Schema> {
        if self.partitions == 0 {
            return Err(Error::invalid("partitions", "must be greater than zero"));
        }

        let node_count = graph.node_count();
        let label_count = graph.label_count();
        info!(
            nodes = node_count,
            labels = label_count,
            partitions = self.partitions,
            threads = self.pool.threads(),
            "extracting schema"
        );

        let ranges = partition_ranges(node_count, self.partitions);
        let partials = self.pool.run(ranges, |partition, range| {
            debug!(partition, start = range.start, end = range.end, "scanning partition");
            scan_partition(graph, label_count, range)
        })?;

        let mut schema = Schema::empty(label_count);
        for partial in partials {
            schema.merge(partial);
        }

        info!(pairs = schema.pair_count(), "schema extracted");
        Ok(schema)
    }
}

/// Records every outgoing edge of the nodes in `range`.
fn scan_partition<G: HeterogeneousGraph>(
    graph: &G,
    label_count: usize,
    range: Range<usize>,
) -> Result<Schema> {
    let mut schema = Schema::empty(label_count);
    for index in range {
        let node = NodeId::new(index as u32);
        let labels = graph.labels(node);
        for &neighbor in graph.neighbors(node, Direction::Outgoing) {
            let edge = graph.edge_label(node, neighbor)?;
            for &neighbor_label in graph.labels(neighbor) {
                for &label in labels {
                    schema.record(label, neighbor_label, edge)?;
                }
            }
        }
    }
    Ok(schema)
}
