//! Meta-path counting.
//!
//! Exact counts are literal matches against an unsampled enumeration.
//! Approximate counts correct a sampled enumeration with the
//! Horvitz–Thompson estimator: a walk of `h` hops survives edge sampling with
//! probability `(1 - edge_skip)^h`, and its pair survives pair sampling with
//! probability `1 - node_skip`, so
//!
//! ```text
//! estimate = observed / ((1 - edge_skip)^h * (1 - node_skip))
//! ```
//!
//! is unbiased for the unsampled count. Zero observations or zero retention
//! give an estimate of `0.0`.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::metapath::{MetaPath, MetaPathSet};
use metagraph_common::utils::hash::FxHashMap;

/// Exact count per target meta-path.
pub type CountsDictionary = BTreeMap<MetaPath, u64>;

/// Extrapolated count per target meta-path.
pub type EstimatedCounts = BTreeMap<MetaPath, f64>;

/// Observed instance counts of an enumeration, with the sampling it ran under.
#[derive(Debug, Clone, Default)]
pub struct Occurrences {
    counts: FxHashMap<MetaPath, u64>,
    edge_skip_probability: f64,
    node_skip_probability: f64,
    trace_count: u64,
}

impl Occurrences {
    /// Wraps observed counts.
    ///
    /// `node_skip_probability` is the pair skip that was actually applied;
    /// pass `0.0` when the request did not sample pairs.
    #[must_use]
    pub fn new(
        counts: FxHashMap<MetaPath, u64>,
        edge_skip_probability: f64,
        node_skip_probability: f64,
    ) -> Self {
        Self {
            counts,
            edge_skip_probability,
            node_skip_probability,
            trace_count: 0,
        }
    }

    /// Builds occurrences from `(meta-path, count)` pairs, summing repeats.
    #[must_use]
    pub fn from_counts(
        counts: impl IntoIterator<Item = (MetaPath, u64)>,
        edge_skip_probability: f64,
        node_skip_probability: f64,
    ) -> Self {
        let mut merged = FxHashMap::default();
        for (path, count) in counts {
            *merged.entry(path).or_insert(0) += count;
        }
        Self::new(merged, edge_skip_probability, node_skip_probability)
    }

    /// Sets the number of raw traces behind these counts.
    #[must_use]
    pub fn with_trace_count(mut self, traces: u64) -> Self {
        self.trace_count = traces;
        self
    }

    /// Instances observed for `path`.
    #[must_use]
    pub fn observed(&self, path: &MetaPath) -> u64 {
        self.counts.get(path).copied().unwrap_or(0)
    }

    /// Number of distinct meta-paths observed.
    #[must_use]
    pub fn distinct_paths(&self) -> usize {
        self.counts.len()
    }

    /// Every observed meta-path.
    #[must_use]
    pub fn path_set(&self) -> MetaPathSet {
        self.counts.keys().cloned().collect()
    }

    /// Raw traces recorded by the enumeration.
    #[must_use]
    pub fn trace_count(&self) -> u64 {
        self.trace_count
    }

    /// Edge skip probability of the enumeration.
    #[must_use]
    pub fn edge_skip_probability(&self) -> f64 {
        self.edge_skip_probability
    }

    /// Pair skip probability applied by the enumeration.
    #[must_use]
    pub fn node_skip_probability(&self) -> f64 {
        self.node_skip_probability
    }

    /// Whether any sampling discarded exploration.
    #[must_use]
    pub fn is_sampled(&self) -> bool {
        self.edge_skip_probability > 0.0 || self.node_skip_probability > 0.0
    }

    /// Probability that a given walk of `hops` hops was recorded.
    #[must_use]
    pub fn retention(&self, hops: usize) -> f64 {
        let hops = i32::try_from(hops).unwrap_or(i32::MAX);
        let edge = (1.0 - self.edge_skip_probability).clamp(0.0, 1.0).powi(hops);
        let pair = (1.0 - self.node_skip_probability).clamp(0.0, 1.0);
        edge * pair
    }
}

/// Result of [`MetaPathCounter::count`].
#[derive(Debug, Clone, PartialEq)]
pub enum Counts {
    /// Literal matches of an unsampled enumeration.
    Exact(CountsDictionary),
    /// Extrapolated from a sampled enumeration.
    Approximate(EstimatedCounts),
}

impl Counts {
    /// Count of `path` as a float, whichever mode produced it.
    #[must_use]
    pub fn get(&self, path: &MetaPath) -> Option<f64> {
        match self {
            #[allow(clippy::cast_precision_loss)]
            Self::Exact(counts) => counts.get(path).map(|&count| count as f64),
            Self::Approximate(counts) => counts.get(path).copied(),
        }
    }

    /// Number of target keys.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Exact(counts) => counts.len(),
            Self::Approximate(counts) => counts.len(),
        }
    }

    /// Whether there are no target keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Counts target meta-paths against observed occurrences.
///
/// Every target is present in the output; unseen targets count 0. Inputs are
/// never mutated.
#[derive(Debug, Clone, Copy)]
pub struct MetaPathCounter<'o> {
    occurrences: &'o Occurrences,
}

impl<'o> MetaPathCounter<'o> {
    /// Creates a counter over `occurrences`.
    #[must_use]
    pub fn new(occurrences: &'o Occurrences) -> Self {
        Self { occurrences }
    }

    /// Exact counts when the enumeration was unsampled, estimates otherwise.
    #[must_use]
    pub fn count(&self, targets: &MetaPathSet) -> Counts {
        if self.occurrences.is_sampled() {
            Counts::Approximate(self.approximate(targets))
        } else {
            Counts::Exact(self.exact(targets))
        }
    }

    /// Literal instance counts.
    #[must_use]
    pub fn exact(&self, targets: &MetaPathSet) -> CountsDictionary {
        if self.occurrences.is_sampled() {
            warn!(
                edge_skip = self.occurrences.edge_skip_probability(),
                node_skip = self.occurrences.node_skip_probability(),
                "exact counts over a sampled enumeration are undercounts"
            );
        }
        let counts: CountsDictionary = targets
            .iter()
            .map(|path| (path.clone(), self.occurrences.observed(path)))
            .collect();
        debug!(
            targets = counts.len(),
            matched = counts.values().filter(|&&count| count > 0).count(),
            "exact counting done"
        );
        counts
    }

    /// Horvitz–Thompson estimates. Never negative, never NaN.
    #[must_use]
    pub fn approximate(&self, targets: &MetaPathSet) -> EstimatedCounts {
        targets
            .iter()
            .map(|path| (path.clone(), self.estimate(path)))
            .collect()
    }

    /// Estimated true count of a single meta-path.
    #[must_use]
    pub fn estimate(&self, path: &MetaPath) -> f64 {
        let observed = self.occurrences.observed(path);
        let retention = self.occurrences.retention(path.hops());
        if observed == 0 || retention <= 0.0 {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let estimate = observed as f64 / retention;
        if estimate.is_finite() { estimate } else { 0.0 }
    }
}
