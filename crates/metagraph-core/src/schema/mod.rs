//! Label-level adjacency schema of a heterogeneous graph.
//!
//! For every label `A`, the schema holds the set of `(neighbor label, edge
//! label)` pairs observed anywhere in the graph, aggregated over both edge
//! directions. It is instance-free: it says which label types connect, not
//! which nodes.

mod extractor;

use std::collections::BTreeSet;

use metagraph_common::types::{EdgeTypeId, LabelId};
use metagraph_common::utils::error::{Error, Result};
use metagraph_common::utils::hash::FxHashSet;
use serde::{Deserialize, Serialize};

pub use extractor::SchemaExtractor;

/// Version tag of [`SchemaRecord`].
pub const SCHEMA_RECORD_VERSION: u32 = 1;

/// Per-label set of `(neighbor label, edge label)` pairs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Schema {
    rows: Vec<FxHashSet<(LabelId, EdgeTypeId)>>,
}

impl Schema {
    /// Creates an all-empty schema for a vocabulary of `label_count` labels.
    #[must_use]
    pub fn empty(label_count: usize) -> Self {
        Self {
            rows: vec![FxHashSet::default(); label_count],
        }
    }

    /// Size of the label vocabulary.
    #[must_use]
    pub fn label_count(&self) -> usize {
        self.rows.len()
    }

    /// Records an `a -[edge]- b` adjacency in both directions.
    ///
    /// Fails with [`Error::Internal`] if either label is outside the vocabulary.
    pub fn record(&mut self, a: LabelId, b: LabelId, edge: EdgeTypeId) -> Result<()> {
        let label_count = self.rows.len();
        for label in [a, b] {
            if label.index() >= label_count {
                return Err(Error::Internal(format!(
                    "label {label} outside a vocabulary of {label_count} labels"
                )));
            }
        }
        self.rows[a.index()].insert((b, edge));
        self.rows[b.index()].insert((a, edge));
        Ok(())
    }

    /// Pairs adjacent to `label`, in unspecified order.
    pub fn neighbors(&self, label: LabelId) -> impl Iterator<Item = (LabelId, EdgeTypeId)> + '_ {
        self.rows
            .get(label.index())
            .into_iter()
            .flat_map(|row| row.iter().copied())
    }

    /// Pairs adjacent to `label`, sorted.
    #[must_use]
    pub fn sorted_neighbors(&self, label: LabelId) -> Vec<(LabelId, EdgeTypeId)> {
        let set: BTreeSet<_> = self.neighbors(label).collect();
        set.into_iter().collect()
    }

    /// Whether `(to, edge)` was recorded for `from`.
    #[must_use]
    pub fn contains(&self, from: LabelId, to: LabelId, edge: EdgeTypeId) -> bool {
        self.rows
            .get(from.index())
            .is_some_and(|row| row.contains(&(to, edge)))
    }

    /// Total number of recorded pairs over all labels.
    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.rows.iter().map(|row| row.len()).sum()
    }

    /// Whether no pair was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(|row| row.is_empty())
    }

    /// Unions `other` into `self`, row by row.
    pub fn merge(&mut self, other: Schema) {
        if other.rows.len() > self.rows.len() {
            self.rows.resize_with(other.rows.len(), FxHashSet::default);
        }
        for (row, other_row) in self.rows.iter_mut().zip(other.rows) {
            row.extend(other_row);
        }
    }

    /// Plain structural record handed to serialization collaborators.
    #[must_use]
    pub fn to_record(&self) -> SchemaRecord {
        SchemaRecord {
            version: SCHEMA_RECORD_VERSION,
            rows: (0..self.rows.len() as u32)
                .map(|label| {
                    self.sorted_neighbors(LabelId::new(label))
                        .into_iter()
                        .map(|(to, edge)| (to.as_u32(), edge.as_u32()))
                        .collect()
                })
                .collect(),
        }
    }
}

/// Versioned, format-agnostic form of a [`Schema`].
///
/// `rows[label]` lists `(neighbor label, edge label)` pairs in sorted order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaRecord {
    /// Record layout version.
    pub version: u32,
    /// Sorted adjacency rows indexed by label id.
    pub rows: Vec<Vec<(u32, u32)>>,
}
