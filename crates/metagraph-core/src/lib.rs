//! # metagraph-core
//!
//! Core layer for Metagraph: the heterogeneous graph store, the worker pool,
//! and concurrent schema extraction.
//!
//! This crate depends only on `metagraph-common`.
//!
//! ## Modules
//!
//! - [`graph`] - Capability trait, dictionaries, and the CSR-backed HIN store
//! - [`index`] - Compressed row storage used for adjacency and label sets
//! - [`execution`] - Fixed-size worker pool and partitioning helpers
//! - [`schema`] - Label-level schema and its partitioned extractor

pub mod execution;
pub mod graph;
pub mod index;
pub mod schema;

// Re-export commonly used types
pub use execution::{WorkerPool, available_parallelism, partition_ranges};
pub use graph::{
    Direction, EdgeTypeDictionary, HeterogeneousGraph, HinGraph, HinGraphBuilder,
    LabelDictionary, NodeIdMap,
};
pub use index::CsrAdjacency;
pub use schema::{Schema, SchemaExtractor, SchemaRecord};
