//! Depth-robust graph: a deterministic, lazily-materialized label table.
//!
//! Every node's label is the hash of its parents' labels; parent 0 is
//! always the immediate predecessor, the rest are drawn from a PRNG seeded
//! with the node's own index (`winporep_core::rng::SplitMix64`). Because a
//! node's parents always precede it, the whole table can be built strictly
//! forward or on demand from any single node, and both orders must agree
//! (tested below).

use log::trace;

use winporep_core::hash::{hash_into_with, Telemetry};
use winporep_core::rng::SplitMix64;
use winporep_core::NODE_SIZE;

/// A single DRG instance: `size` nodes, each with `parents` parent edges,
/// seeded from a 32-byte value derived by the windowed scheduler.
pub struct Drg {
    size: usize,
    parents: usize,
    seed: [u8; 32],
    labels: Vec<u8>,
    generated: Vec<bool>,
}

impl Drg {
    pub fn new(size: usize, parents: usize, seed: [u8; 32]) -> Self {
        Drg {
            size,
            parents,
            seed,
            labels: vec![0u8; size * NODE_SIZE],
            generated: vec![false; size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// The parent indices of node `i`, in the order labels are hashed over.
    /// `parents_of(0)` is empty; `parents_of(i > 0)[0] == i - 1`.
    pub fn parents_of(&self, i: usize) -> Vec<usize> {
        if i == 0 {
            return Vec::new();
        }
        let mut out = Vec::with_capacity(self.parents);
        out.push(i - 1);
        if self.parents > 1 {
            let mut rng = SplitMix64::new(i as u64);
            for _ in 0..self.parents - 1 {
                out.push(rng.next_below(i as u64) as usize);
            }
        }
        out
    }

    fn slot(&self, i: usize) -> &[u8] {
        &self.labels[i * NODE_SIZE..(i + 1) * NODE_SIZE]
    }

    /// Returns the 32-byte label of node `i`, computing and caching it (and
    /// every ancestor it needs) if this is the first request.
    ///
    /// Recursion depth here would be bounded only by `size`, which the
    /// caller may set in the tens of millions; this walks an explicit work
    /// stack instead of recursing so there's no risk of blowing the native
    /// call stack on a deep, sparsely-materialized graph.
    pub fn node(&mut self, i: usize) -> &[u8] {
        self.node_with(None, i)
    }

    pub fn node_with(&mut self, telemetry: Option<&Telemetry>, i: usize) -> &[u8] {
        assert!(i < self.size, "drg node index {} out of bounds ({})", i, self.size);

        if !self.generated[i] {
            let mut pending = vec![i];
            while let Some(&idx) = pending.last() {
                if self.generated[idx] {
                    pending.pop();
                    continue;
                }
                let parents = self.parents_of(idx);
                let missing: Vec<usize> = parents
                    .iter()
                    .copied()
                    .filter(|&p| !self.generated[p])
                    .collect();
                if !missing.is_empty() {
                    pending.extend(missing);
                    continue;
                }

                trace!("materializing drg node {}", idx);
                if idx == 0 {
                    let seed = self.seed;
                    hash_into_with(telemetry, &mut self.labels[0..NODE_SIZE], &[&seed[..]]);
                } else {
                    let parent_labels: Vec<[u8; NODE_SIZE]> = parents
                        .iter()
                        .map(|&p| {
                            let mut buf = [0u8; NODE_SIZE];
                            buf.copy_from_slice(self.slot(p));
                            buf
                        })
                        .collect();
                    let refs: Vec<&[u8]> = parent_labels.iter().map(|b| &b[..]).collect();
                    let start = idx * NODE_SIZE;
                    hash_into_with(telemetry, &mut self.labels[start..start + NODE_SIZE], &refs);
                }
                self.generated[idx] = true;
                pending.pop();
            }
        }

        self.slot(i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed(byte: u8) -> [u8; 32] {
        [byte; 32]
    }

    #[test]
    fn forward_and_backward_materialization_agree() {
        let mut forward = Drg::new(1024, 5, seed(9));
        for i in 0..1024 {
            forward.node(i);
        }

        let mut backward = Drg::new(1024, 5, seed(9));
        backward.node(1023);

        assert_eq!(forward.labels, backward.labels);
        assert_eq!(forward.generated, backward.generated);
    }

    #[test]
    fn parent_structure_matches_contract() {
        let drg = Drg::new(100, 4, seed(3));
        assert!(drg.parents_of(0).is_empty());
        for i in 1..100 {
            let parents = drg.parents_of(i);
            assert_eq!(parents.len(), 4);
            assert_eq!(parents[0], i - 1);
            for &p in &parents {
                assert!(p < i);
            }
        }
    }

    #[test]
    fn node_zero_is_hash_of_seed() {
        let mut drg = Drg::new(4, 2, seed(1));
        let got = drg.node(0).to_vec();
        let want = winporep_core::hash::hash(&[&seed(1)[..]]);
        assert_eq!(got, want.to_vec());
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn rejects_out_of_bounds_index() {
        let mut drg = Drg::new(4, 2, seed(1));
        drg.node(4);
    }

    #[test]
    fn telemetry_advances_on_materialization() {
        let t = Telemetry::new();
        let mut drg = Drg::new(8, 2, seed(5));
        drg.node_with(Some(&t), 7);
        assert!(t.slices_hashed() > 0);
    }
}
