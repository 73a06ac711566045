//! Engine and request configuration.

use std::fmt;

use metagraph_common::utils::error::{Error, Result};
use metagraph_core::execution::available_parallelism;
use metagraph_core::graph::Direction;

/// Seed used when none is configured.
pub const DEFAULT_SEED: u64 = 42;

/// Which walk lengths an enumeration records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LengthMode {
    /// Walks of `1..=max_length` hops (default).
    #[default]
    UpTo,
    /// Only walks of exactly `max_length` hops.
    Exact,
}

impl LengthMode {
    /// Whether a walk of `hops` hops is recorded under a bound of `max_length`.
    #[must_use]
    pub fn accepts(self, hops: usize, max_length: usize) -> bool {
        match self {
            Self::UpTo => hops >= 1 && hops <= max_length,
            Self::Exact => hops == max_length,
        }
    }
}

impl fmt::Display for LengthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UpTo => write!(f, "up-to"),
            Self::Exact => write!(f, "exact"),
        }
    }
}

/// Engine-wide configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Worker threads for whole-graph and edge-list enumeration.
    pub threads: usize,

    /// Number of node-range partitions for schema extraction.
    pub schema_partitions: usize,

    /// Worker threads for schema extraction.
    pub schema_threads: usize,

    /// Seed for every sampling decision.
    pub seed: u64,

    /// Adjacency view used by enumeration. `Both` treats the graph as undirected.
    pub direction: Direction,
}

impl Default for Config {
    fn default() -> Self {
        let cores = available_parallelism();
        Self {
            threads: cores * 4,
            schema_partitions: cores,
            schema_threads: cores,
            seed: DEFAULT_SEED,
            direction: Direction::Both,
        }
    }
}

impl Config {
    /// A configuration where every pool has exactly one worker.
    ///
    /// Results are identical to any other thread count.
    #[must_use]
    pub fn single_threaded() -> Self {
        Self {
            threads: 1,
            schema_partitions: 1,
            schema_threads: 1,
            ..Default::default()
        }
    }

    /// Sets the enumeration thread count.
    #[must_use]
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Sets the number of schema partitions.
    #[must_use]
    pub fn with_schema_partitions(mut self, partitions: usize) -> Self {
        self.schema_partitions = partitions;
        self
    }

    /// Sets the schema extraction thread count.
    #[must_use]
    pub fn with_schema_threads(mut self, threads: usize) -> Self {
        self.schema_threads = threads;
        self
    }

    /// Sets the sampling seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the enumeration direction.
    #[must_use]
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] for a zero thread or partition count.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("threads", self.threads),
            ("schema_partitions", self.schema_partitions),
            ("schema_threads", self.schema_threads),
        ] {
            if value == 0 {
                return Err(Error::invalid(name, "must be greater than zero"));
            }
        }
        Ok(())
    }
}

/// Parameters of one enumeration or counting request.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumerationConfig {
    /// Maximum walk length in hops.
    pub max_length: usize,

    /// Probability of discarding a whole start/end pair (whole-graph and
    /// edge-list modes only).
    pub node_skip_probability: f64,

    /// Probability of discarding each candidate edge during the search.
    pub edge_skip_probability: f64,

    /// Keep only the first `limit` meta-paths in sorted order.
    pub limit: Option<usize>,

    /// Which walk lengths are recorded.
    pub length_mode: LengthMode,
}

impl EnumerationConfig {
    /// An unsampled, unlimited request for walks of up to `max_length` hops.
    #[must_use]
    pub fn new(max_length: usize) -> Self {
        Self {
            max_length,
            node_skip_probability: 0.0,
            edge_skip_probability: 0.0,
            limit: None,
            length_mode: LengthMode::UpTo,
        }
    }

    /// Sets the pair skip probability.
    #[must_use]
    pub fn with_node_skip_probability(mut self, probability: f64) -> Self {
        self.node_skip_probability = probability;
        self
    }

    /// Sets the edge skip probability.
    #[must_use]
    pub fn with_edge_skip_probability(mut self, probability: f64) -> Self {
        self.edge_skip_probability = probability;
        self
    }

    /// Caps the number of returned meta-paths.
    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sets the length mode.
    #[must_use]
    pub fn with_length_mode(mut self, mode: LengthMode) -> Self {
        self.length_mode = mode;
        self
    }

    /// Whether any sampling is enabled.
    #[must_use]
    pub fn is_sampled(&self) -> bool {
        self.node_skip_probability > 0.0 || self.edge_skip_probability > 0.0
    }

    /// Rejects invalid parameters before any work begins.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] when `max_length` is zero or a
    /// probability lies outside `[0, 1]` (NaN included).
    pub fn validate(&self) -> Result<()> {
        if self.max_length == 0 {
            return Err(Error::invalid("max_length", "must be at least one hop"));
        }
        check_probability("node_skip_probability", self.node_skip_probability)?;
        check_probability("edge_skip_probability", self.edge_skip_probability)
    }
}

fn check_probability(name: &'static str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(Error::invalid(name, format!("{value} is not in [0, 1]")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.threads >= 4);
        assert_eq!(config.seed, DEFAULT_SEED);
        assert_eq!(config.direction, Direction::Both);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_threads_rejected() {
        let err = Config::single_threaded().with_threads(0).validate().unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { name: "threads", .. }));

        let err = Config::default()
            .with_schema_partitions(0)
            .validate()
            .unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidParameter {
                name: "schema_partitions",
                ..
            }
        ));
    }

    #[test]
    fn test_enumeration_config_validation() {
        assert!(EnumerationConfig::new(2).validate().is_ok());
        assert!(matches!(
            EnumerationConfig::new(0).validate(),
            Err(Error::InvalidParameter { name: "max_length", .. })
        ));
        assert!(
            EnumerationConfig::new(2)
                .with_edge_skip_probability(1.5)
                .validate()
                .is_err()
        );
        assert!(
            EnumerationConfig::new(2)
                .with_node_skip_probability(-0.1)
                .validate()
                .is_err()
        );
        assert!(
            EnumerationConfig::new(2)
                .with_edge_skip_probability(f64::NAN)
                .validate()
                .is_err()
        );
        assert!(
            EnumerationConfig::new(2)
                .with_edge_skip_probability(1.0)
                .validate()
                .is_ok()
        );
    }

    #[test]
    fn test_length_mode() {
        assert!(LengthMode::UpTo.accepts(1, 3));
        assert!(LengthMode::UpTo.accepts(3, 3));
        assert!(!LengthMode::UpTo.accepts(0, 3));
        assert!(!LengthMode::UpTo.accepts(4, 3));
        assert!(LengthMode::Exact.accepts(3, 3));
        assert!(!LengthMode::Exact.accepts(2, 3));
    }

    #[test]
    fn test_is_sampled() {
        assert!(!EnumerationConfig::new(3).is_sampled());
        assert!(EnumerationConfig::new(3).with_edge_skip_probability(0.2).is_sampled());
    }
}
