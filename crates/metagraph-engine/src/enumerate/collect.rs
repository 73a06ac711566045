//! Per-task result accumulators.
//!
//! Each worker fills a private collector; collectors are merged on the
//! coordinating thread after every task has joined.

use crate::metapath::{MetaPath, MetaPathSet};
use metagraph_common::utils::hash::FxHashMap;

/// Accumulates the meta-paths expanded from recorded traces.
pub trait PathCollector: Default + Send {
    /// Records one expanded meta-path instance.
    fn record(&mut self, path: MetaPath);

    /// Absorbs another collector's results.
    fn merge(&mut self, other: Self);

    /// The distinct meta-paths seen so far.
    fn path_set(&self) -> MetaPathSet;
}

/// Keeps the set of distinct meta-paths.
#[derive(Debug, Default)]
pub struct PathSetCollector {
    paths: MetaPathSet,
}

impl PathSetCollector {
    /// Consumes the collector.
    #[must_use]
    pub fn into_paths(self) -> MetaPathSet {
        self.paths
    }
}

impl PathCollector for PathSetCollector {
    fn record(&mut self, path: MetaPath) {
        self.paths.insert(path);
    }

    fn merge(&mut self, other: Self) {
        if self.paths.len() < other.paths.len() {
            let mut larger = other.paths;
            larger.append(&mut self.paths);
            self.paths = larger;
        } else {
            let mut other = other.paths;
            self.paths.append(&mut other);
        }
    }

    fn path_set(&self) -> MetaPathSet {
        self.paths.clone()
    }
}

/// Counts every expanded instance per meta-path.
#[derive(Debug, Default)]
pub struct OccurrenceCollector {
    counts: FxHashMap<MetaPath, u64>,
}

impl OccurrenceCollector {
    /// Consumes the collector.
    #[must_use]
    pub fn into_counts(self) -> FxHashMap<MetaPath, u64> {
        self.counts
    }
}

impl PathCollector for OccurrenceCollector {
    fn record(&mut self, path: MetaPath) {
        *self.counts.entry(path).or_insert(0) += 1;
    }

    fn merge(&mut self, other: Self) {
        for (path, count) in other.counts {
            *self.counts.entry(path).or_insert(0) += count;
        }
    }

    fn path_set(&self) -> MetaPathSet {
        self.counts.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(key: &str) -> MetaPath {
        MetaPath::parse(key).unwrap()
    }

    #[test]
    fn test_path_set_merge_is_union() {
        let mut left = PathSetCollector::default();
        left.record(path("1|0|2"));
        let mut right = PathSetCollector::default();
        right.record(path("1|0|2"));
        right.record(path("2|0|1"));
        right.record(path("2|1|2"));

        left.merge(right);
        assert_eq!(left.into_paths().len(), 3);
    }

    #[test]
    fn test_occurrences_merge_adds() {
        let mut left = OccurrenceCollector::default();
        left.record(path("1|0|2"));
        left.record(path("1|0|2"));
        let mut right = OccurrenceCollector::default();
        right.record(path("1|0|2"));
        right.record(path("2|0|1"));

        left.merge(right);
        assert_eq!(left.path_set().len(), 2);
        let counts = left.into_counts();
        assert_eq!(counts[&path("1|0|2")], 3);
        assert_eq!(counts[&path("2|0|1")], 1);
    }
}
