//! Execution primitives.
//!
//! - [`pool`] - Fixed-size worker pool with join-on-completion semantics

pub mod pool;

pub use pool::{WorkerPool, available_parallelism, partition_ranges};
