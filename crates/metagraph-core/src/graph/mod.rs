//! Graph model for heterogeneous information networks.
//!
//! The algorithms depend only on the [`HeterogeneousGraph`] capability trait:
//! adjacency, label sets, and edge labels. [`hin::HinGraph`] is the CSR-backed
//! implementation; lighter in-memory fixtures can implement the same trait.

pub mod dictionary;
pub mod hin;

use metagraph_common::types::{EdgeTypeId, LabelId, NodeId, OriginalNodeId};
use metagraph_common::utils::error::{Error, Result};

pub use dictionary::{DenseId, Dictionary, EdgeTypeDictionary, LabelDictionary, NodeIdMap};
pub use hin::{HinGraph, HinGraphBuilder};

/// Direction for adjacency queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Edges leaving the node.
    Outgoing,
    /// Edges entering the node.
    Incoming,
    /// Both directions, each neighbor reported once (the graph seen as undirected).
    Both,
}

/// Read-only capabilities the meta-path algorithms need from a graph.
///
/// Every method must be pure and safe to call from many threads at once.
pub trait HeterogeneousGraph: Sync {
    /// Number of nodes; node ids are dense in `[0, node_count)`.
    fn node_count(&self) -> usize;

    /// Size of the node-label vocabulary; label ids are dense in `[0, label_count)`.
    fn label_count(&self) -> usize;

    /// Size of the edge-label vocabulary.
    fn edge_type_count(&self) -> usize;

    /// Neighbors of `node` in the given direction.
    fn neighbors(&self, node: NodeId, direction: Direction) -> &[NodeId];

    /// The non-empty label set of `node`, sorted and deduplicated.
    fn labels(&self, node: NodeId) -> &[LabelId];

    /// Edge label between two adjacent nodes, trying both orientations.
    ///
    /// Fails with [`Error::EdgeNotFound`] for a non-adjacent pair.
    fn edge_label(&self, src: NodeId, dst: NodeId) -> Result<EdgeTypeId>;

    /// Storage-layer identity of `node`. Defaults to the dense id itself.
    fn original_id(&self, node: NodeId) -> OriginalNodeId {
        OriginalNodeId::new(u64::from(node.as_u32()))
    }

    /// Whether `node` is a valid id for this graph.
    fn contains(&self, node: NodeId) -> bool {
        node.index() < self.node_count()
    }

    /// Fails with [`Error::UnknownNode`] unless `node` is in the graph.
    fn check_node(&self, node: NodeId) -> Result<()> {
        if self.contains(node) {
            Ok(())
        } else {
            Err(Error::UnknownNode(node))
        }
    }
}
