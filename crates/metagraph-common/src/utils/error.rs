//! Error types shared by every Metagraph crate.
//!
//! Nothing in the engine retries internally: the operations are deterministic
//! for a given seed and input, so recomputing reproduces the same failure.

use crate::types::{NodeId, OriginalNodeId};
use thiserror::Error;

/// Errors surfaced by graph construction, schema extraction, enumeration and
/// counting.
#[derive(Error, Debug)]
pub enum Error {
    /// A dense node id is not present in the graph.
    #[error("unknown node {0}")]
    UnknownNode(NodeId),

    /// An original (storage-layer) node id was never loaded into the graph.
    #[error("unknown original node id {0}")]
    UnknownOriginalNode(OriginalNodeId),

    /// Edge-label lookup for a pair that is not adjacent.
    ///
    /// This is a contract violation: callers must check adjacency first.
    #[error("no edge between nodes {src} and {dst}")]
    EdgeNotFound {
        /// Source of the requested edge.
        src: NodeId,
        /// Destination of the requested edge.
        dst: NodeId,
    },

    /// A parameter was rejected before any work began.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        /// Name of the offending parameter.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// A partition or task of a concurrent operation failed, failing the
    /// whole operation.
    #[error("worker task {task} failed: {source}")]
    PartialWorkerFailure {
        /// Index of the failed task.
        task: usize,
        /// The task's own failure.
        #[source]
        source: Box<Error>,
    },

    /// The same original node id was added twice while building a graph.
    #[error("node with original id {0} already exists")]
    DuplicateNode(u64),

    /// A node was added without any label.
    #[error("node with original id {0} has no labels")]
    EmptyLabelSet(u64),

    /// Two edges between the same pair of nodes carry different edge labels.
    #[error("conflicting edge labels between nodes {src} and {dst}")]
    ConflictingEdgeLabel {
        /// One endpoint.
        src: NodeId,
        /// The other endpoint.
        dst: NodeId,
    },

    /// A meta-path key did not match `L0|E0|L1|...|Lk`.
    #[error("malformed meta-path `{0}`")]
    MalformedMetaPath(String),

    /// An internal invariant failed (e.g. a worker panicked).
    #[error("internal error: {0}")]
    Internal(String),

    /// I/O failure in a result sink.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Shorthand for [`Error::InvalidParameter`].
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// Returns the innermost error, looking through worker failures.
    #[must_use]
    pub fn root_cause(&self) -> &Error {
        match self {
            Self::PartialWorkerFailure { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

/// Result type alias for Metagraph operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = Error::EdgeNotFound {
            src: NodeId::new(1),
            dst: NodeId::new(2),
        };
        assert_eq!(err.to_string(), "no edge between nodes 1 and 2");

        let err = Error::invalid("max_length", "must be positive");
        assert_eq!(
            err.to_string(),
            "invalid parameter `max_length`: must be positive"
        );
    }

    #[test]
    fn test_root_cause() {
        let err = Error::PartialWorkerFailure {
            task: 3,
            source: Box::new(Error::PartialWorkerFailure {
                task: 0,
                source: Box::new(Error::UnknownNode(NodeId::new(9))),
            }),
        };
        assert!(matches!(err.root_cause(), Error::UnknownNode(NodeId(9))));
    }

    #[test]
    fn test_unknown_node_id_spaces_are_distinct() {
        let dense = Error::UnknownNode(NodeId::new(4));
        let original = Error::UnknownOriginalNode(OriginalNodeId::new(4));
        assert_eq!(dense.to_string(), "unknown node 4");
        assert_eq!(original.to_string(), "unknown original node id 4");
    }
}
