//! Core primitives shared by the windowed PoRep encoder.
//!
//! This crate has no notion of windows, graphs or encoding — it only
//! provides the building blocks that `winporep-porep` composes: a SHA-256
//! hash primitive, an XOR utility, a deterministic PRNG, error types, and
//! the tunable encoding parameters.

pub mod error;
pub mod hash;
pub mod rng;
pub mod settings;
pub mod xor;

pub use error::{Error, Result};
pub use settings::Params;

/// Size in bytes of a single node (data, replica, or DRG label).
pub const NODE_SIZE: usize = 32;
