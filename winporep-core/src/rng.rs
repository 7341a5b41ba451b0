//! Deterministic, portable pseudo-random generator used for DRG parent
//! selection.
//!
//! The original Go implementation seeded `math/rand` with the node index
//! and drew `next_int() mod i`. `math/rand`'s algorithm is not specified to
//! be stable across language ecosystems, so a reimplementation that wants
//! the same replica bytes on every platform needs its own fixed generator.
//! This is SplitMix64 (Vigna's 2015 mixer), seeded once per node with that
//! node's index: cheap, well-studied, and trivially portable because every
//! step is fixed-width integer arithmetic with no hidden state beyond one
//! `u64`.

/// A SplitMix64 stream, seeded from a single `u64`.
pub struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    pub fn new(seed: u64) -> Self {
        SplitMix64 { state: seed }
    }

    /// Returns the next pseudo-random `u64` in the stream.
    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Returns a value in `[0, bound)`. `bound` must be non-zero.
    pub fn next_below(&mut self, bound: u64) -> u64 {
        assert!(bound > 0, "next_below requires a positive bound");
        self.next_u64() % bound
    }
}

/// Draws `count` values in `[0, bound)`, deterministically, from a stream
/// seeded solely with `seed`.
pub fn draw_below(seed: u64, bound: u64, count: usize) -> Vec<u64> {
    let mut rng = SplitMix64::new(seed);
    (0..count).map(|_| rng.next_below(bound)).collect()
}
