//! Index structures.
//!
//! - [`adjacency`] - Frozen CSR rows for adjacency and per-node label sets

pub mod adjacency;

pub use adjacency::{CompressedRows, CsrAdjacency};
