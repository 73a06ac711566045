//! # metagraph-engine
//!
//! Meta-path discovery over heterogeneous information networks: instance
//! enumeration with cartesian expansion over multi-label nodes, seeded
//! sampling, exact and approximate counting, and schema-level inference.
//!
//! ## Modules
//!
//! - [`engine`] - `MetaPathEngine` facade over a borrowed graph
//! - [`config`] - Engine and per-request configuration
//! - [`metapath`] - Meta-path keys and rendering
//! - [`enumerate`] - Instance-level enumerator and its request modes
//! - [`count`] - Exact and Horvitz–Thompson counting
//! - [`schema_paths`] - Meta-paths permitted by the label schema
//! - [`sampling`] - Seeded edge and pair sampling
//! - [`sink`] - Per-pair trace dumps

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod count;
pub mod engine;
pub mod enumerate;
pub mod metapath;
pub mod sampling;
pub mod schema_paths;
pub mod sink;

pub use config::{Config, EnumerationConfig, LengthMode};
pub use count::{Counts, CountsDictionary, EstimatedCounts, MetaPathCounter, Occurrences};
pub use engine::MetaPathEngine;
pub use enumerate::{EnumerationRequest, EnumerationResult, MetaPathEnumerator};
pub use metapath::{MetaPath, MetaPathSet};
pub use schema_paths::SchemaPathEnumerator;
pub use sink::{MemorySink, PairTraceDump, TraceSink};
