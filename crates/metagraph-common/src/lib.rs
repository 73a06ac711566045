//! # metagraph-common
//!
//! Foundation layer for Metagraph: identifier types, the error taxonomy, and
//! hashing utilities.
//!
//! This crate has no internal dependencies and should be kept minimal.
//!
//! ## Modules
//!
//! - [`types`] - Dense identifier types (NodeId, LabelId, EdgeTypeId, ...)
//! - [`utils`] - Utility functions and helpers (hashing, errors)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod types;
pub mod utils;

// Re-export commonly used types at crate root
pub use types::{EdgeTypeId, LabelId, NodeId, OriginalNodeId};
pub use utils::error::{Error, Result};
