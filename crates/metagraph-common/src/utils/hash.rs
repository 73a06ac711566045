//! Fast hash-based collections.
//!
//! The hasher is fixed-key, so iteration order is stable across runs for the
//! same insertion sequence. It is not DoS resistant; never key these maps with
//! untrusted input on a network boundary.

use std::hash::BuildHasherDefault;

/// Fast non-cryptographic hasher.
pub type FxHasher = ahash::AHasher;

/// Build-hasher for [`FxHasher`].
pub type FxBuildHasher = BuildHasherDefault<FxHasher>;

/// HashMap using [`FxHasher`].
pub type FxHashMap<K, V> = hashbrown::HashMap<K, V, FxBuildHasher>;

/// HashSet using [`FxHasher`].
pub type FxHashSet<T> = hashbrown::HashSet<T, FxBuildHasher>;
