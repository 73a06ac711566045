//! Meta-path keys.
//!
//! A meta-path is rendered as `L0|E0|L1|...|Lk`: node labels and edge labels
//! as decimal ids, alternating, pipe-delimited, with no leading or trailing
//! delimiter. A key of `h` hops has `2h + 1` tokens.

pub(crate) mod trace;

use std::collections::BTreeSet;
use std::fmt;

use metagraph_common::types::{EdgeTypeId, LabelId};
use metagraph_common::utils::error::{Error, Result};
use metagraph_core::graph::{EdgeTypeDictionary, LabelDictionary};
use serde::{Deserialize, Serialize};

/// Token separator inside a meta-path key.
pub const SEPARATOR: char = '|';

/// Sorted, deduplicated set of meta-paths.
pub type MetaPathSet = BTreeSet<MetaPath>;

/// A concrete meta-path key.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetaPath(String);

impl MetaPath {
    /// Parses a key, checking its shape.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedMetaPath`] unless the key is an odd number of
    /// pipe-separated ids in canonical decimal form: no sign, no leading
    /// zeros.
    pub fn parse(key: &str) -> Result<Self> {
        let tokens = key.split(SEPARATOR).count();
        let canonical = key
            .split(SEPARATOR)
            .all(|token| token.parse::<u32>().is_ok_and(|id| id.to_string() == token));
        if !canonical || tokens % 2 == 0 {
            return Err(Error::MalformedMetaPath(key.to_string()));
        }
        Ok(Self(key.to_string()))
    }

    /// Parses every key, stopping at the first malformed one.
    pub fn parse_all<'a>(keys: impl IntoIterator<Item = &'a str>) -> Result<MetaPathSet> {
        keys.into_iter().map(Self::parse).collect()
    }

    /// Builds a key from its node labels and the edge labels between them.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedMetaPath`] unless there is exactly one edge
    /// label fewer than node labels.
    pub fn from_parts(labels: &[LabelId], edges: &[EdgeTypeId]) -> Result<Self> {
        if labels.is_empty() || labels.len() != edges.len() + 1 {
            return Err(Error::MalformedMetaPath(format!(
                "{} node labels with {} edge labels",
                labels.len(),
                edges.len()
            )));
        }
        let mut key = labels[0].to_string();
        for (edge, label) in edges.iter().zip(&labels[1..]) {
            key.push(SEPARATOR);
            key.push_str(&edge.to_string());
            key.push(SEPARATOR);
            key.push_str(&label.to_string());
        }
        Ok(Self(key))
    }

    /// Wraps a key built by the expansion code, which only writes valid keys.
    pub(crate) fn from_key(key: String) -> Self {
        Self(key)
    }

    /// The key string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of pipe-delimited tokens.
    #[must_use]
    pub fn token_count(&self) -> usize {
        self.0.split(SEPARATOR).count()
    }

    /// Number of hops (edge labels).
    #[must_use]
    pub fn hops(&self) -> usize {
        self.token_count() / 2
    }

    /// Node labels along the path.
    pub fn labels(&self) -> impl Iterator<Item = LabelId> + '_ {
        self.tokens().step_by(2).map(LabelId::new)
    }

    /// Edge labels along the path.
    pub fn edges(&self) -> impl Iterator<Item = EdgeTypeId> + '_ {
        self.tokens().skip(1).step_by(2).map(EdgeTypeId::new)
    }

    /// Renders the path with dictionary names, e.g. `Author|WROTE|Paper`.
    ///
    /// Ids without a name render as their decimal value.
    #[must_use]
    pub fn render(&self, labels: &LabelDictionary, edge_types: &EdgeTypeDictionary) -> String {
        self.0
            .split(SEPARATOR)
            .enumerate()
            .map(|(position, token)| {
                let name = token.parse::<u32>().ok().and_then(|id| {
                    if position % 2 == 0 {
                        labels.name_of(LabelId::new(id))
                    } else {
                        edge_types.name_of(EdgeTypeId::new(id))
                    }
                });
                name.unwrap_or(token)
            })
            .collect::<Vec<_>>()
            .join("|")
    }

    fn tokens(&self) -> impl Iterator<Item = u32> + '_ {
        self.0
            .split(SEPARATOR)
            .filter_map(|token| token.parse::<u32>().ok())
    }
}

impl fmt::Debug for MetaPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MetaPath({})", self.0)
    }
}

impl fmt::Display for MetaPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for MetaPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for MetaPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
