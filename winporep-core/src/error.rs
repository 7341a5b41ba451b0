use thiserror::Error;

/// Errors produced by the core primitives and, by extension, the encoder
/// built on top of them.
///
/// `DomainAssertion` is reserved for internal invariant violations (an out
/// of bounds DRG index, a parent list of the wrong length); callers should
/// treat it as a programming bug rather than a recoverable condition.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid range: start={start}, end={end}, num_nodes={num_nodes}")]
    InvalidRange {
        start: usize,
        end: usize,
        num_nodes: usize,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("domain assertion failed: {0}")]
    DomainAssertion(String),
}

pub type Result<T> = std::result::Result<T, Error>;
