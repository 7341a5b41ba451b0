//! SHA-256 over an ordered list of byte slices.
//!
//! The DRG (`winporep_porep::drg`) calls this once per node, passing the
//! node's seed or its parents' labels in order. A naive digest writer that
//! appends to its output buffer rather than overwriting it is unsafe here:
//! the destination is frequently a 32-byte slice straight out of the DRG's
//! label table, and an append would silently run past it into the next
//! label. `hash_into` guards against that by finishing into a temporary
//! buffer and copying only the first 32 bytes out, mirroring the
//! work-around in the original Go implementation.

use std::sync::atomic::{AtomicU64, Ordering};

use sha2::{Digest, Sha256};

/// Optional, observational call counter. Not part of any correctness
/// invariant — an external harness can attach one to watch how much
/// hashing an encode performed without the core depending on a process-
/// global.
#[derive(Debug, Default)]
pub struct Telemetry {
    slices_hashed: AtomicU64,
}

impl Telemetry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slices_hashed(&self) -> u64 {
        self.slices_hashed.load(Ordering::Relaxed)
    }

    fn record(&self, parts: usize) {
        self.slices_hashed.fetch_add(parts as u64, Ordering::Relaxed);
    }
}

/// Hashes the concatenation of `parts` and returns the 32-byte digest.
pub fn hash(parts: &[&[u8]]) -> [u8; 32] {
    hash_with(None, parts)
}

/// Same as [`hash`], additionally recording one tick per slice on `telemetry`.
pub fn hash_with(telemetry: Option<&Telemetry>, parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    if let Some(t) = telemetry {
        t.record(parts.len());
    }

    let digest = hasher.finalize();
    let mut out = [0u8; 32];
    out.copy_from_slice(&digest);
    out
}

/// Hashes the concatenation of `parts` into `dst[..32]`, leaving the rest
/// of `dst` untouched. `dst` may alias one of the label slices `parts`
/// reads from (the DRG relies on this), so the digest is finished into a
/// stack-local buffer before being copied in.
pub fn hash_into(dst: &mut [u8], parts: &[&[u8]]) {
    hash_into_with(None, dst, parts)
}

pub fn hash_into_with(telemetry: Option<&Telemetry>, dst: &mut [u8], parts: &[&[u8]]) {
    let digest = hash_with(telemetry, parts);
    dst[..32].copy_from_slice(&digest);
}
