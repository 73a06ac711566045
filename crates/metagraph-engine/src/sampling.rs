//! Seeded Monte-Carlo sampling of edges and start/end pairs.
//!
//! Every node visit seeds its own generator from a branch seed and draws, for
//! each neighbor in adjacency order, a uniform `u` and the child's branch
//! seed. The draws happen whether or not the edge is kept, so they never
//! depend on the skip probability: raising it can only turn kept edges into
//! skipped ones. Results are reproducible under any thread schedule.

use metagraph_common::types::NodeId;
use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;

/// Decides which edges a search explores.
#[derive(Debug, Clone, Copy)]
pub struct EdgeSampler {
    skip_probability: f64,
}

impl EdgeSampler {
    /// Creates a sampler discarding each edge with `skip_probability`.
    #[must_use]
    pub fn new(skip_probability: f64) -> Self {
        Self { skip_probability }
    }

    /// Starts the draws for one node visit.
    #[must_use]
    pub fn branch(&self, seed: u64) -> Branch {
        Branch {
            rng: XorShiftRng::seed_from_u64(seed),
            skip_probability: self.skip_probability,
        }
    }
}

/// Draw sequence of a single node visit.
#[derive(Debug)]
pub struct Branch {
    rng: XorShiftRng,
    skip_probability: f64,
}

impl Branch {
    /// Draws for the next neighbor: whether to keep the edge, and the seed
    /// for the visit below it.
    pub fn next_edge(&mut self) -> (bool, u64) {
        let u: f64 = self.rng.random();
        let child_seed: u64 = self.rng.random();
        (u >= self.skip_probability, child_seed)
    }
}

/// Seed of the search for one start/end pair.
#[must_use]
pub fn pair_seed(seed: u64, start: NodeId, end: NodeId) -> u64 {
    let pair = (u64::from(start.as_u32()) << 32) | u64::from(end.as_u32());
    mix(seed ^ mix(pair))
}

/// Whether the pair `(start, end)` survives a pair skip of `probability`.
#[must_use]
pub fn keep_pair(seed: u64, start: NodeId, end: NodeId, probability: f64) -> bool {
    if probability <= 0.0 {
        return true;
    }
    // Offset so pair draws are independent of the pair's own search seed.
    let mut rng = XorShiftRng::seed_from_u64(pair_seed(seed, start, end) ^ 0xA5A5_A5A5_A5A5_A5A5);
    rng.random::<f64>() >= probability
}

/// SplitMix64 finalizer.
fn mix(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
