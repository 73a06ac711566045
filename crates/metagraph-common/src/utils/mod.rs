//! Common utilities used throughout Metagraph.
//!
//! - [`error`] - The [`Error`] taxonomy shared by every crate
//! - [`hash`] - Fast hashing aliases (non-cryptographic)

pub mod error;
pub mod hash;

pub use error::{Error, Result};
