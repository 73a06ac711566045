//! Schema-level meta-path inference.
//!
//! Walks the label-level [`Schema`] instead of the graph: every sequence of
//! labels and edge labels allowed by the schema is a meta-path that *may*
//! have instances. No node is visited, so the cost depends only on the label
//! vocabulary and the length bound.

use tracing::info;

use crate::config::LengthMode;
use crate::metapath::{MetaPath, MetaPathSet};
use metagraph_common::types::{EdgeTypeId, LabelId};
use metagraph_common::utils::error::{Error, Result};
use metagraph_core::schema::Schema;

/// Enumerates the meta-paths a [`Schema`] permits.
#[derive(Debug, Clone, Copy)]
pub struct SchemaPathEnumerator<'s> {
    schema: &'s Schema,
}

impl<'s> SchemaPathEnumerator<'s> {
    /// Creates an enumerator over `schema`.
    #[must_use]
    pub fn new(schema: &'s Schema) -> Self {
        Self { schema }
    }

    /// Every schema path of up to (or exactly) `max_length` hops.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] when `max_length` is zero.
    pub fn enumerate(&self, max_length: usize, mode: LengthMode) -> Result<MetaPathSet> {
        if max_length == 0 {
            return Err(Error::invalid("max_length", "must be at least one hop"));
        }

        let mut paths = MetaPathSet::new();
        let mut labels = Vec::with_capacity(max_length + 1);
        let mut edges = Vec::with_capacity(max_length);
        for start in 0..self.schema.label_count() as u32 {
            labels.push(LabelId::new(start));
            self.extend(&mut labels, &mut edges, max_length, mode, &mut paths)?;
            labels.pop();
        }

        info!(
            labels = self.schema.label_count(),
            max_length,
            paths = paths.len(),
            "schema meta-paths enumerated"
        );
        Ok(paths)
    }

    fn extend(
        &self,
        labels: &mut Vec<LabelId>,
        edges: &mut Vec<EdgeTypeId>,
        max_length: usize,
        mode: LengthMode,
        out: &mut MetaPathSet,
    ) -> Result<()> {
        let Some(&last) = labels.last() else {
            return Ok(());
        };
        for (next, edge) in self.schema.sorted_neighbors(last) {
            labels.push(next);
            edges.push(edge);
            if mode.accepts(edges.len(), max_length) {
                out.insert(MetaPath::from_parts(labels, edges)?);
            }
            if edges.len() < max_length {
                self.extend(labels, edges, max_length, mode, out)?;
            }
            labels.pop();
            edges.pop();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(set: &MetaPathSet) -> Vec<&str> {
        set.iter().map(MetaPath::as_str).collect()
    }

    /// Author(0) -WROTE(0)- Paper(1) -IN(1)- Venue(2)
    fn bibliography_schema() -> Schema {
        let mut schema = Schema::empty(3);
        schema
            .record(LabelId::new(0), LabelId::new(1), EdgeTypeId::new(0))
            .unwrap();
        schema
            .record(LabelId::new(1), LabelId::new(2), EdgeTypeId::new(1))
            .unwrap();
        schema
    }

    #[test]
    fn test_one_hop_paths() {
        let schema = bibliography_schema();
        let paths = SchemaPathEnumerator::new(&schema)
            .enumerate(1, LengthMode::UpTo)
            .unwrap();
        assert_eq!(keys(&paths), vec!["0|0|1", "1|0|0", "1|1|2", "2|1|1"]);
    }

    #[test]
    fn test_exact_two_hops() {
        let schema = bibliography_schema();
        let paths = SchemaPathEnumerator::new(&schema)
            .enumerate(2, LengthMode::Exact)
            .unwrap();
        assert!(paths.contains(&MetaPath::parse("0|0|1|1|2").unwrap()));
        assert!(paths.contains(&MetaPath::parse("0|0|1|0|0").unwrap()));
        assert!(paths.iter().all(|path| path.hops() == 2));
    }

    #[test]
    fn test_empty_schema() {
        let schema = Schema::empty(0);
        let paths = SchemaPathEnumerator::new(&schema)
            .enumerate(3, LengthMode::UpTo)
            .unwrap();
        assert!(paths.is_empty());
    }

    #[test]
    fn test_zero_length_rejected() {
        let schema = bibliography_schema();
        assert!(
            SchemaPathEnumerator::new(&schema)
                .enumerate(0, LengthMode::UpTo)
                .is_err()
        );
    }
}
