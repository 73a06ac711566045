//! Walk traces and their cartesian expansion into meta-paths.

use std::fmt::Write;

use smallvec::SmallVec;

use super::{MetaPath, SEPARATOR};
use metagraph_common::types::{EdgeTypeId, LabelId};

/// One visited node: its label set and the edge label used to reach it.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TraceStep<'g> {
    labels: &'g [LabelId],
    edge: Option<EdgeTypeId>,
}

/// The walk currently being explored.
///
/// Steps are pushed on descent and popped on backtrack, so one buffer serves
/// a whole search. Label sets are borrowed from the graph.
#[derive(Debug, Default)]
pub(crate) struct TraceBuffer<'g> {
    steps: Vec<TraceStep<'g>>,
}

impl<'g> TraceBuffer<'g> {
    pub(crate) fn with_capacity(max_hops: usize) -> Self {
        Self {
            steps: Vec::with_capacity(max_hops + 1),
        }
    }

    /// Resets the buffer to a walk starting at a node with `labels`.
    pub(crate) fn start(&mut self, labels: &'g [LabelId]) {
        self.steps.clear();
        self.steps.push(TraceStep { labels, edge: None });
    }

    pub(crate) fn push(&mut self, edge: EdgeTypeId, labels: &'g [LabelId]) {
        self.steps.push(TraceStep {
            labels,
            edge: Some(edge),
        });
    }

    pub(crate) fn pop(&mut self) {
        self.steps.pop();
    }

    pub(crate) fn hops(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    /// Number of meta-paths this trace expands to.
    pub(crate) fn combinations(&self) -> usize {
        self.steps
            .iter()
            .map(|step| step.labels.len())
            .product()
    }

    /// Calls `emit` once for every choice of one label per step.
    ///
    /// Label sets are deduplicated, so every emitted key is distinct. A step
    /// with an empty label set yields nothing.
    pub(crate) fn expand(&self, mut emit: impl FnMut(MetaPath)) {
        if self.steps.is_empty() || self.steps.iter().any(|step| step.labels.is_empty()) {
            return;
        }

        let mut choice: SmallVec<[usize; 8]> = SmallVec::from_elem(0, self.steps.len());
        let mut key = String::with_capacity(self.steps.len() * 6);
        loop {
            key.clear();
            for (step, &index) in self.steps.iter().zip(&choice) {
                if let Some(edge) = step.edge {
                    let _ = write!(key, "{SEPARATOR}{edge}{SEPARATOR}");
                }
                let _ = write!(key, "{}", step.labels[index]);
            }
            emit(MetaPath::from_key(key.clone()));

            // Advance the odometer, last step fastest.
            let mut position = self.steps.len();
            loop {
                if position == 0 {
                    return;
                }
                position -= 1;
                choice[position] += 1;
                if choice[position] < self.steps[position].labels.len() {
                    break;
                }
                choice[position] = 0;
            }
        }
    }
}
