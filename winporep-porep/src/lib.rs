//! Windowed, DRG-based proof-of-replication encoder.
//!
//! `drg` materializes the per-window label graph, `window` computes which
//! DRGs cover which window and where in them a node's label lives, and
//! `encoder` drives both across a seekable data stream. `facade` exposes
//! the entry points external callers (the CLI, tests, embedders) use.
//!
//! Errors are `winporep_core::Error` throughout — the DRG and the
//! scheduler raise the same `InvalidRange`/`DomainAssertion`/`Io` kinds
//! the core primitives do, so there is no separate error type to
//! reconcile with them.

pub mod drg;
pub mod encoder;
pub mod facade;
pub mod window;

pub use encoder::Encoder;
pub use facade::{decode_files, decode_full, encode_files, encode_full};
pub use winporep_core::settings::Params;
pub use winporep_core::{Error, Result};
