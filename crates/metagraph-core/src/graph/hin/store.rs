//! Frozen HIN graph store.

use crate::graph::dictionary::{EdgeTypeDictionary, LabelDictionary, NodeIdMap};
use crate::graph::{Direction, HeterogeneousGraph};
use crate::index::adjacency::{CompressedRows, CsrAdjacency};
use metagraph_common::types::{EdgeTypeId, LabelId, NodeId, OriginalNodeId};
use metagraph_common::utils::error::{Error, Result};
use metagraph_common::utils::hash::FxHashMap;

/// The dense-id, multi-label graph store.
///
/// Immutable after construction: every query borrows, nothing locks. Build
/// one with [`HinGraphBuilder`](super::HinGraphBuilder).
#[derive(Debug, Clone)]
pub struct HinGraph {
    /// Per-node label sets, sorted and deduplicated.
    pub(super) node_labels: CompressedRows<LabelId>,

    /// Forward adjacency lists (outgoing edges).
    pub(super) outgoing: CsrAdjacency,

    /// Backward adjacency lists (incoming edges).
    pub(super) incoming: CsrAdjacency,

    /// Union of both directions, each neighbor once.
    pub(super) undirected: CsrAdjacency,

    /// Edge label keyed by the `(src, dst)` pair as inserted.
    pub(super) edge_labels: FxHashMap<(NodeId, NodeId), EdgeTypeId>,

    /// Node label names.
    pub(super) labels: LabelDictionary,

    /// Edge label names.
    pub(super) edge_types: EdgeTypeDictionary,

    /// Dense id ↔ original id.
    pub(super) ids: NodeIdMap,

    /// Node-label vocabulary size.
    pub(super) label_count: usize,

    /// Edge-label vocabulary size.
    pub(super) edge_type_count: usize,
}

impl HinGraph {
    /// Returns the number of distinct directed edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.outgoing.edge_count()
    }

    /// Node label dictionary.
    #[must_use]
    pub fn label_dictionary(&self) -> &LabelDictionary {
        &self.labels
    }

    /// Edge label dictionary.
    #[must_use]
    pub fn edge_type_dictionary(&self) -> &EdgeTypeDictionary {
        &self.edge_types
    }

    /// Dense id ↔ original id mapping.
    #[must_use]
    pub fn id_map(&self) -> &NodeIdMap {
        &self.ids
    }

    /// Dense id of an original node id.
    ///
    /// Fails with [`Error::UnknownOriginalNode`] when the original id was never loaded.
    pub fn to_mapped(&self, original: OriginalNodeId) -> Result<NodeId> {
        self.ids
            .to_mapped(original)
            .ok_or(Error::UnknownOriginalNode(original))
    }

    /// Iterates every stored edge as `(src, dst, edge_label)`.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId, EdgeTypeId)> + '_ {
        (0..self.node_count() as u32).map(NodeId::new).flat_map(move |src| {
            self.outgoing.neighbors(src).iter().filter_map(move |&dst| {
                self.edge_labels
                    .get(&(src, dst))
                    .map(|&edge_type| (src, dst, edge_type))
            })
        })
    }

    /// Returns nodes carrying a specific label.
    #[must_use]
    pub fn nodes_with_label(&self, label: LabelId) -> Vec<NodeId> {
        (0..self.node_count() as u32)
            .map(NodeId::new)
            .filter(|&node| self.labels(node).binary_search(&label).is_ok())
            .collect()
    }
}

impl HeterogeneousGraph for HinGraph {
    fn node_count(&self) -> usize {
        self.node_labels.row_count()
    }

    fn label_count(&self) -> usize {
        self.label_count
    }

    fn edge_type_count(&self) -> usize {
        self.edge_type_count
    }

    fn neighbors(&self, node: NodeId, direction: Direction) -> &[NodeId] {
        match direction {
            Direction::Outgoing => self.outgoing.neighbors(node),
            Direction::Incoming => self.incoming.neighbors(node),
            Direction::Both => self.undirected.neighbors(node),
        }
    }

    fn labels(&self, node: NodeId) -> &[LabelId] {
        self.node_labels.row(node.index())
    }

    fn edge_label(&self, src: NodeId, dst: NodeId) -> Result<EdgeTypeId> {
        self.edge_labels
            .get(&(src, dst))
            .or_else(|| self.edge_labels.get(&(dst, src)))
            .copied()
            .ok_or(Error::EdgeNotFound { src, dst })
    }

    fn original_id(&self, node: NodeId) -> OriginalNodeId {
        self.ids
            .to_original(node)
            .unwrap_or(OriginalNodeId::new(u64::from(node.as_u32())))
    }
}
