//! In-memory graph fixture for integration tests.
//!
//! Implements the capability trait with plain adjacency lists, without the
//! CSR store, so the engine is exercised against a second backend.

#![allow(dead_code)]

use metagraph_common::types::{EdgeTypeId, LabelId, NodeId};
use metagraph_common::utils::error::{Error, Result};
use metagraph_common::utils::hash::FxHashMap;
use metagraph_core::graph::{Direction, HeterogeneousGraph};

#[derive(Debug, Default, Clone)]
pub struct AdjacencyListGraph {
    labels: Vec<Vec<LabelId>>,
    outgoing: Vec<Vec<NodeId>>,
    incoming: Vec<Vec<NodeId>>,
    undirected: Vec<Vec<NodeId>>,
    edge_labels: FxHashMap<(NodeId, NodeId), EdgeTypeId>,
    label_count: usize,
    edge_type_count: usize,
}

impl AdjacencyListGraph {
    /// One node per entry, with the given label ids.
    pub fn with_nodes(labels: &[&[u32]]) -> Self {
        let mut graph = Self::default();
        for node_labels in labels {
            let mut ids: Vec<LabelId> = node_labels.iter().copied().map(LabelId::new).collect();
            ids.sort_unstable();
            ids.dedup();
            if let Some(max) = ids.last() {
                graph.label_count = graph.label_count.max(max.index() + 1);
            }
            graph.labels.push(ids);
        }
        let n = graph.labels.len();
        graph.outgoing = vec![Vec::new(); n];
        graph.incoming = vec![Vec::new(); n];
        graph.undirected = vec![Vec::new(); n];
        graph
    }

    pub fn edge(mut self, src: u32, dst: u32, edge: u32) -> Self {
        let (s, d) = (NodeId::new(src), NodeId::new(dst));
        if self.edge_labels.contains_key(&(s, d)) || self.edge_labels.contains_key(&(d, s)) {
            return self;
        }
        self.edge_labels.insert((s, d), EdgeTypeId::new(edge));
        self.edge_type_count = self.edge_type_count.max(edge as usize + 1);
        insert_sorted(&mut self.outgoing[s.index()], d);
        insert_sorted(&mut self.incoming[d.index()], s);
        insert_sorted(&mut self.undirected[s.index()], d);
        insert_sorted(&mut self.undirected[d.index()], s);
        self
    }
}

fn insert_sorted(list: &mut Vec<NodeId>, node: NodeId) {
    if let Err(position) = list.binary_search(&node) {
        list.insert(position, node);
    }
}

impl HeterogeneousGraph for AdjacencyListGraph {
    fn node_count(&self) -> usize {
        self.labels.len()
    }

    fn label_count(&self) -> usize {
        self.label_count
    }

    fn edge_type_count(&self) -> usize {
        self.edge_type_count
    }

    fn neighbors(&self, node: NodeId, direction: Direction) -> &[NodeId] {
        let lists = match direction {
            Direction::Outgoing => &self.outgoing,
            Direction::Incoming => &self.incoming,
            Direction::Both => &self.undirected,
        };
        lists.get(node.index()).map_or(&[][..], Vec::as_slice)
    }

    fn labels(&self, node: NodeId) -> &[LabelId] {
        self.labels.get(node.index()).map_or(&[][..], Vec::as_slice)
    }

    fn edge_label(&self, src: NodeId, dst: NodeId) -> Result<EdgeTypeId> {
        self.edge_labels
            .get(&(src, dst))
            .or_else(|| self.edge_labels.get(&(dst, src)))
            .copied()
            .ok_or(Error::EdgeNotFound { src, dst })
    }
}

/// X{1} -0-> Y{y_labels} -0-> Z{1}
pub fn three_node_path(y_labels: &[u32]) -> AdjacencyListGraph {
    AdjacencyListGraph::with_nodes(&[&[1], y_labels, &[1]])
        .edge(0, 1, 0)
        .edge(1, 2, 0)
}

/// A small bibliography-shaped graph with multi-label nodes and a cycle.
///
/// Labels: 0 Author, 1 Paper, 2 Venue, 3 Reviewer.
/// Edges: 0 WROTE, 1 PUBLISHED_IN, 2 CITES, 3 REVIEWED.
pub fn bibliography() -> AdjacencyListGraph {
    AdjacencyListGraph::with_nodes(&[
        &[0],
        &[0, 3],
        &[0],
        &[1],
        &[1],
        &[1],
        &[2],
        &[2],
    ])
    .edge(0, 3, 0)
    .edge(1, 3, 0)
    .edge(1, 4, 0)
    .edge(2, 5, 0)
    .edge(3, 6, 1)
    .edge(4, 6, 1)
    .edge(5, 7, 1)
    .edge(4, 3, 2)
    .edge(5, 4, 2)
    .edge(1, 5, 3)
}
