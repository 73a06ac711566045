//! Heterogeneous information network (HIN) store.
//!
//! [`HinGraphBuilder`] is the only mutating phase; [`HinGraphBuilder::build`]
//! freezes everything into a [`HinGraph`] that is shared read-only across
//! worker threads.

mod builder;
mod store;

pub use builder::HinGraphBuilder;
pub use store::HinGraph;
