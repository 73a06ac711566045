//! Compressed sparse row (CSR) adjacency.
//!
//! The graph is frozen after construction, so adjacency is stored as one
//! contiguous value array plus per-row offsets:
//! - O(1) row lookup returning a borrowed slice
//! - Cache-friendly sequential scans
//! - Rows sorted and deduplicated at build time
//!
//! The same layout stores per-node label sets ([`CompressedRows<LabelId>`]).
//!
//! [`CompressedRows<LabelId>`]: CompressedRows

use metagraph_common::types::NodeId;

/// Immutable rows of values, indexed by a dense row id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedRows<T> {
    /// `offsets[r]..offsets[r + 1]` is the value range of row `r`.
    offsets: Vec<usize>,
    /// Row values, concatenated.
    values: Vec<T>,
}

impl<T: Copy + Ord> CompressedRows<T> {
    /// Builds rows from `(row, value)` pairs.
    ///
    /// Each row is sorted and deduplicated. Pairs whose row is outside
    /// `0..row_count` are ignored.
    #[must_use]
    pub fn from_pairs(row_count: usize, pairs: impl IntoIterator<Item = (usize, T)>) -> Self {
        let mut pairs: Vec<(usize, T)> = pairs
            .into_iter()
            .filter(|(row, _)| *row < row_count)
            .collect();
        pairs.sort_unstable();
        pairs.dedup();

        let mut offsets = vec![0usize; row_count + 1];
        for (row, _) in &pairs {
            offsets[row + 1] += 1;
        }
        for r in 0..row_count {
            offsets[r + 1] += offsets[r];
        }

        let values = pairs.into_iter().map(|(_, value)| value).collect();
        Self { offsets, values }
    }

    /// Builds rows from already materialized per-row vectors, keeping their order.
    #[must_use]
    pub fn from_rows<R: AsRef<[T]>>(rows: &[R]) -> Self {
        let mut offsets = Vec::with_capacity(rows.len() + 1);
        let mut values = Vec::new();
        offsets.push(0);
        for row in rows {
            values.extend_from_slice(row.as_ref());
            offsets.push(values.len());
        }
        Self { offsets, values }
    }
}

impl<T> CompressedRows<T> {
    /// Returns the values of a row, or an empty slice for an unknown row.
    #[inline]
    #[must_use]
    pub fn row(&self, row: usize) -> &[T] {
        match (self.offsets.get(row), self.offsets.get(row + 1)) {
            (Some(&start), Some(&end)) => &self.values[start..end],
            _ => &[],
        }
    }

    /// Returns the number of values in a row.
    #[inline]
    #[must_use]
    pub fn row_len(&self, row: usize) -> usize {
        self.row(row).len()
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.offsets.len().saturating_sub(1)
    }

    /// Returns the total number of values across all rows.
    #[must_use]
    pub fn value_count(&self) -> usize {
        self.values.len()
    }
}

impl<T> Default for CompressedRows<T> {
    fn default() -> Self {
        Self {
            offsets: vec![0],
            values: Vec::new(),
        }
    }
}

/// CSR adjacency lists: row = source node, values = neighbor nodes.
pub type CsrAdjacency = CompressedRows<NodeId>;

impl CsrAdjacency {
    /// Builds adjacency from `(src, dst)` edges.
    #[must_use]
    pub fn from_edges(node_count: usize, edges: impl IntoIterator<Item = (NodeId, NodeId)>) -> Self {
        Self::from_pairs(
            node_count,
            edges.into_iter().map(|(src, dst)| (src.index(), dst)),
        )
    }

    /// Returns the neighbors of a node.
    #[inline]
    #[must_use]
    pub fn neighbors(&self, node: NodeId) -> &[NodeId] {
        self.row(node.index())
    }

    /// Returns the degree of a node.
    #[inline]
    #[must_use]
    pub fn degree(&self, node: NodeId) -> usize {
        self.row_len(node.index())
    }

    /// Returns the number of stored adjacency entries.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.value_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(id: u32) -> NodeId {
        NodeId::new(id)
    }

    #[test]
    fn test_basic_adjacency() {
        let adj = CsrAdjacency::from_edges(4, [(n(0), n(1)), (n(0), n(3)), (n(0), n(2))]);

        assert_eq!(adj.neighbors(n(0)), &[n(1), n(2), n(3)]);
        assert!(adj.neighbors(n(1)).is_empty());
    }

    #[test]
    fn test_degree() {
        let adj = CsrAdjacency::from_edges(3, [(n(0), n(1)), (n(0), n(2)), (n(2), n(0))]);

        assert_eq!(adj.degree(n(0)), 2);
        assert_eq!(adj.degree(n(1)), 0);
        assert_eq!(adj.degree(n(2)), 1);
        assert_eq!(adj.edge_count(), 3);
    }

    #[test]
    fn test_duplicates_collapse() {
        let adj = CsrAdjacency::from_edges(2, [(n(0), n(1)), (n(0), n(1))]);
        assert_eq!(adj.neighbors(n(0)), &[n(1)]);
        assert_eq!(adj.edge_count(), 1);
    }

    #[test]
    fn test_out_of_range_row() {
        let adj = CsrAdjacency::from_edges(2, [(n(0), n(1)), (n(5), n(1))]);
        assert!(adj.neighbors(n(5)).is_empty());
        assert_eq!(adj.edge_count(), 1);
        assert_eq!(adj.row_count(), 2);
    }

    #[test]
    fn test_from_rows_keeps_order() {
        let rows = CompressedRows::from_rows(&[vec![3u32, 1], vec![], vec![2]]);
        assert_eq!(rows.row(0), &[3, 1]);
        assert!(rows.row(1).is_empty());
        assert_eq!(rows.row(2), &[2]);
        assert_eq!(rows.value_count(), 3);
    }

    #[test]
    fn test_empty() {
        let adj = CsrAdjacency::default();
        assert_eq!(adj.row_count(), 0);
        assert!(adj.neighbors(n(0)).is_empty());
    }
}
