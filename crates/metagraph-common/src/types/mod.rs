//! Core type definitions for Metagraph.
//!
//! All graph-facing identifiers are dense integers so they can index
//! fixed-size arrays directly:
//! - Node identifiers ([`NodeId`], [`OriginalNodeId`])
//! - Type identifiers ([`LabelId`], [`EdgeTypeId`])

mod id;

pub use id::{EdgeTypeId, LabelId, NodeId, OriginalNodeId};
