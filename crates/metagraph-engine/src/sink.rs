//! Result sinks for per-pair trace dumps.
//!
//! The enumerator hands each processed start/end pair's meta-path set to a
//! [`TraceSink`]. Where and how the dump is stored belongs to the sink.

use std::collections::BTreeMap;
use std::io::{self, Write};

use parking_lot::Mutex;

use crate::metapath::MetaPathSet;
use metagraph_common::types::OriginalNodeId;
use metagraph_common::utils::error::Result;

/// The meta-paths found for one start/end pair.
#[derive(Debug, Clone, Copy)]
pub struct PairTraceDump<'a> {
    /// Maximum walk length of the request.
    pub max_length: usize,
    /// Edge skip probability of the request.
    pub edge_skip_probability: f64,
    /// Original id of the start node.
    pub start: OriginalNodeId,
    /// Original id of the end node.
    pub end: OriginalNodeId,
    /// Meta-paths found between the two nodes.
    pub paths: &'a MetaPathSet,
}

impl PairTraceDump<'_> {
    /// Deterministic file name, e.g. `MetaPaths-3-0.0_10_20.txt`.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!(
            "MetaPaths-{}-{:?}_{}_{}.txt",
            self.max_length, self.edge_skip_probability, self.start, self.end
        )
    }

    /// Writes one meta-path per line.
    pub fn write_lines<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        for path in self.paths {
            writeln!(writer, "{path}")?;
        }
        Ok(())
    }
}

/// Receives per-pair dumps, possibly from many worker threads at once.
pub trait TraceSink: Send + Sync {
    /// Stores one pair's dump.
    fn write_pair(&self, dump: &PairTraceDump<'_>) -> Result<()>;
}

/// Keeps dumps in memory, keyed by file name.
#[derive(Debug, Default)]
pub struct MemorySink {
    dumps: Mutex<BTreeMap<String, MetaPathSet>>,
}

impl MemorySink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored dumps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dumps.lock().len()
    }

    /// Whether nothing was stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dumps.lock().is_empty()
    }

    /// The dump stored under `file_name`.
    #[must_use]
    pub fn get(&self, file_name: &str) -> Option<MetaPathSet> {
        self.dumps.lock().get(file_name).cloned()
    }

    /// Consumes the sink, returning every dump.
    #[must_use]
    pub fn into_inner(self) -> BTreeMap<String, MetaPathSet> {
        self.dumps.into_inner()
    }
}

impl TraceSink for MemorySink {
    fn write_pair(&self, dump: &PairTraceDump<'_>) -> Result<()> {
        self.dumps
            .lock()
            .insert(dump.file_name(), dump.paths.clone());
        Ok(())
    }
}
