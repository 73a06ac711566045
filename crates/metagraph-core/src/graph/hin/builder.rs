//! Construction phase of the HIN store.

use smallvec::SmallVec;

use super::HinGraph;
use crate::graph::dictionary::{EdgeTypeDictionary, LabelDictionary, NodeIdMap};
use crate::index::adjacency::{CompressedRows, CsrAdjacency};
use metagraph_common::types::{EdgeTypeId, LabelId, NodeId, OriginalNodeId};
use metagraph_common::utils::error::{Error, Result};
use metagraph_common::utils::hash::FxHashMap;

/// Label set of a single node; most nodes carry very few labels.
type LabelSet = SmallVec<[LabelId; 4]>;

/// Collects nodes and edges, then freezes them into a [`HinGraph`].
///
/// Labels can be given either by name (interned through the builder's
/// dictionaries) or as dense ids supplied by a caller that already owns its
/// own dictionary. Pick one style per vocabulary.
#[derive(Debug, Default)]
pub struct HinGraphBuilder {
    labels: LabelDictionary,
    edge_types: EdgeTypeDictionary,
    ids: NodeIdMap,
    node_labels: Vec<LabelSet>,
    edges: Vec<(NodeId, NodeId)>,
    edge_labels: FxHashMap<(NodeId, NodeId), EdgeTypeId>,
    label_count: usize,
    edge_type_count: usize,
}

impl HinGraphBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node with named labels and returns its dense id.
    pub fn add_node(&mut self, original: u64, labels: &[&str]) -> Result<NodeId> {
        let ids: LabelSet = labels
            .iter()
            .map(|name| self.labels.get_or_insert(name))
            .collect();
        self.insert_node(original, ids)
    }

    /// Adds a node whose labels are already dense ids.
    pub fn add_node_with_label_ids(&mut self, original: u64, labels: &[LabelId]) -> Result<NodeId> {
        self.insert_node(original, labels.iter().copied().collect())
    }

    /// Adds a directed edge with a named edge label between two original ids.
    pub fn add_edge(&mut self, src: u64, dst: u64, edge_type: &str) -> Result<()> {
        let (src, dst) = (self.resolve(src)?, self.resolve(dst)?);
        let edge_type = self.edge_types.get_or_insert(edge_type);
        self.insert_edge(src, dst, edge_type)
    }

    /// Adds a directed edge whose edge label is already a dense id.
    pub fn add_edge_with_type(&mut self, src: u64, dst: u64, edge_type: EdgeTypeId) -> Result<()> {
        let (src, dst) = (self.resolve(src)?, self.resolve(dst)?);
        self.insert_edge(src, dst, edge_type)
    }

    /// Number of nodes added so far.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.node_labels.len()
    }

    /// Freezes the graph.
    #[must_use]
    pub fn build(self) -> HinGraph {
        let node_count = self.node_labels.len();

        let outgoing = CsrAdjacency::from_edges(node_count, self.edges.iter().copied());
        let incoming =
            CsrAdjacency::from_edges(node_count, self.edges.iter().map(|&(src, dst)| (dst, src)));
        let undirected = CsrAdjacency::from_edges(
            node_count,
            self.edges
                .iter()
                .flat_map(|&(src, dst)| [(src, dst), (dst, src)]),
        );

        HinGraph {
            node_labels: CompressedRows::from_rows(&self.node_labels),
            outgoing,
            incoming,
            undirected,
            edge_labels: self.edge_labels,
            label_count: self.label_count.max(self.labels.len()),
            edge_type_count: self.edge_type_count.max(self.edge_types.len()),
            labels: self.labels,
            edge_types: self.edge_types,
            ids: self.ids,
        }
    }

    // === Internal Helpers ===

    fn insert_node(&mut self, original: u64, mut labels: LabelSet) -> Result<NodeId> {
        if labels.is_empty() {
            return Err(Error::EmptyLabelSet(original));
        }
        labels.sort_unstable();
        labels.dedup();

        let id = self.ids.insert(OriginalNodeId::new(original))?;
        if let Some(max) = labels.last() {
            self.label_count = self.label_count.max(max.index() + 1);
        }
        self.node_labels.push(labels);
        Ok(id)
    }

    fn insert_edge(&mut self, src: NodeId, dst: NodeId, edge_type: EdgeTypeId) -> Result<()> {
        // One edge label per unordered pair, so lookups can try both orientations.
        let existing = self
            .edge_labels
            .get(&(src, dst))
            .or_else(|| self.edge_labels.get(&(dst, src)))
            .copied();
        match existing {
            Some(label) if label != edge_type => {
                return Err(Error::ConflictingEdgeLabel { src, dst });
            }
            _ => {}
        }

        if self.edge_labels.insert((src, dst), edge_type).is_none() {
            self.edges.push((src, dst));
        }
        self.edge_type_count = self.edge_type_count.max(edge_type.index() + 1);
        Ok(())
    }

    fn resolve(&self, original: u64) -> Result<NodeId> {
        self.ids
            .to_mapped(OriginalNodeId::new(original))
            .ok_or(Error::UnknownOriginalNode(OriginalNodeId::new(original)))
    }
}
