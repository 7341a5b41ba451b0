//! Drives the windowed scheduler over a seekable data stream and writes the
//! encoded replica to a seekable sink.

use std::collections::HashMap;
use std::io::{Read, Seek, SeekFrom, Write};

use log::{debug, trace};

use winporep_core::hash::{hash, Telemetry};
use winporep_core::settings::Params;
use winporep_core::xor::xor_into;
use winporep_core::{Error, Result, NODE_SIZE};

use crate::drg::Drg;
use crate::window::{drg_index, num_windows as windows_for, window_drgs};

/// Reads one 32-byte node at absolute node index `i` from `stream`.
fn seek_node<S: Read + Seek>(stream: &mut S, i: usize) -> std::io::Result<[u8; NODE_SIZE]> {
    stream.seek(SeekFrom::Start((i * NODE_SIZE) as u64))?;
    let mut buf = [0u8; NODE_SIZE];
    stream.read_exact(&mut buf)?;
    Ok(buf)
}

/// Writes one 32-byte node at absolute node index `i` into `stream`.
fn write_node<S: Write + Seek>(stream: &mut S, i: usize, buf: &[u8; NODE_SIZE]) -> std::io::Result<()> {
    stream.seek(SeekFrom::Start((i * NODE_SIZE) as u64))?;
    stream.write_all(buf)
}

/// Drives DRG construction and the per-node XOR transform over a data
/// stream. A fresh `Encoder` has no DRGs memoized; every `encode` call may
/// build DRGs it hasn't seen yet and reuses any it has, so overlapping or
/// repeated ranges on the same instance share that work.
pub struct Encoder {
    params: Params,
    seed: [u8; NODE_SIZE],
    num_nodes: usize,
    num_windows: usize,
    drgs: HashMap<usize, Drg>,
    telemetry: Option<Telemetry>,
}

impl Encoder {
    /// `data_size` is the input length in bytes; `num_nodes` is derived via
    /// `floor(data_size / 32)`.
    pub fn new(seed: [u8; NODE_SIZE], data_size: u64, params: Params) -> Result<Self> {
        params.validate()?;
        let num_nodes = (data_size / NODE_SIZE as u64) as usize;
        let num_windows = windows_for(num_nodes, params.window_size);
        Ok(Encoder {
            params,
            seed,
            num_nodes,
            num_windows,
            drgs: HashMap::new(),
            telemetry: None,
        })
    }

    pub fn with_telemetry(mut self, telemetry: Telemetry) -> Self {
        self.telemetry = Some(telemetry);
        self
    }

    pub fn telemetry(&self) -> Option<&Telemetry> {
        self.telemetry.as_ref()
    }

    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    pub fn num_windows(&self) -> usize {
        self.num_windows
    }

    /// Builds the DRG for window `w` if it hasn't been built yet. The seed
    /// is `SHA256(outer_seed || key_node_bytes_of_w)`.
    fn ensure_drg<S: Read + Seek>(&mut self, data: &mut S, w: usize) -> Result<()> {
        if self.drgs.contains_key(&w) {
            return Ok(());
        }
        let key_node = seek_node(data, w * self.params.window_size)?;
        let drg_seed = hash(&[&self.seed[..], &key_node[..]]);
        let size = self.params.window_size * self.params.drg_stagger;
        debug!("building drg for window {} ({} nodes)", w, size);
        self.drgs
            .insert(w, Drg::new(size, self.params.drg_parents, drg_seed));
        Ok(())
    }

    /// Equivalent to `encode(0, num_nodes())`.
    pub fn encode_full<R: Read + Seek, W: Write + Seek>(
        &mut self,
        data: &mut R,
        replica: &mut W,
    ) -> Result<()> {
        let num_nodes = self.num_nodes;
        self.encode(data, replica, 0, num_nodes)
    }

    /// Encodes nodes `[start, end)`. Requires `0 <= start <= end <=
    /// num_nodes()`.
    pub fn encode<R: Read + Seek, W: Write + Seek>(
        &mut self,
        data: &mut R,
        replica: &mut W,
        start: usize,
        end: usize,
    ) -> Result<()> {
        if start > end || end > self.num_nodes {
            return Err(Error::InvalidRange {
                start,
                end,
                num_nodes: self.num_nodes,
            });
        }
        if start == end {
            return Ok(());
        }

        let window_size = self.params.window_size;
        let first_window = start / window_size;
        let last_window = (end - 1) / window_size;

        for w in first_window..=last_window {
            let drgs = window_drgs(w, self.num_windows, self.params.drg_stagger);
            for &drg_w in &drgs {
                self.ensure_drg(data, drg_w)?;
            }

            let window_start = w * window_size;
            let window_end = ((w + 1) * window_size).min(self.num_nodes);
            let lo = start.max(window_start);
            let hi = end.min(window_end);

            for i in lo..hi {
                if i % window_size == 0 {
                    trace!("key node {}", i);
                    let buf = seek_node(data, i)?;
                    write_node(replica, i, &buf)?;
                    continue;
                }

                let mut buf = seek_node(data, i)?;
                for &drg_w in &drgs {
                    let drg = self
                        .drgs
                        .get_mut(&drg_w)
                        .expect("drg for stagger window must already be built");
                    let idx = drg_index(i, drg_w, window_size, self.num_windows);
                    if idx >= drg.size() {
                        return Err(Error::DomainAssertion(format!(
                            "drg_index {} out of bounds for drg of size {}",
                            idx,
                            drg.size()
                        )));
                    }
                    let label = drg.node_with(self.telemetry.as_ref(), idx).to_vec();
                    xor_into(&mut buf, &[&label]);
                }
                write_node(replica, i, &buf)?;
            }
        }

        Ok(())
    }

    /// Inverts `encode`: XORs the same staggered DRG labels back out of a
    /// replica, recovering the original data. Key nodes are passed through
    /// unchanged, exactly as encoding left them.
    pub fn decode<R: Read + Seek, W: Write + Seek>(
        &mut self,
        replica: &mut R,
        data: &mut W,
        start: usize,
        end: usize,
    ) -> Result<()> {
        // XOR is its own inverse, so decoding is structurally identical to
        // encoding with the replica as the input stream.
        self.encode(replica, data, start, end)
    }

    pub fn decode_full<R: Read + Seek, W: Write + Seek>(
        &mut self,
        replica: &mut R,
        data: &mut W,
    ) -> Result<()> {
        let num_nodes = self.num_nodes;
        self.decode(replica, data, 0, num_nodes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn params(window_size: usize, drg_parents: usize, drg_stagger: usize) -> Params {
        Params {
            window_size,
            drg_parents,
            drg_stagger,
        }
    }

    #[test]
    fn minimal_scenario_key_nodes_pass_through() {
        // window_size=4, parents=2, stagger=1, 128 bytes of zeros -> 4 nodes.
        let seed = hash(&[b"abcdefghijklmnopqrstuvwxyz012345"]);
        let mut enc = Encoder::new(seed, 128, params(4, 2, 1)).unwrap();

        let mut data = Cursor::new(vec![0u8; 128]);
        let mut replica = Cursor::new(vec![0u8; 128]);
        enc.encode_full(&mut data, &mut replica).unwrap();

        let out = replica.into_inner();
        // only one window (4 nodes), node 0 is the key node.
        assert_eq!(&out[0..32], &[0u8; 32][..]);
    }

    #[test]
    fn determinism_same_seed_same_replica() {
        let seed = [7u8; 32];
        let input: Vec<u8> = (0..2048u32).flat_map(|i| i.to_le_bytes()).collect();

        let mut enc1 = Encoder::new(seed, input.len() as u64, params(16, 2, 2)).unwrap();
        let mut d1 = Cursor::new(input.clone());
        let mut r1 = Cursor::new(vec![0u8; input.len()]);
        enc1.encode_full(&mut d1, &mut r1).unwrap();

        let mut enc2 = Encoder::new(seed, input.len() as u64, params(16, 2, 2)).unwrap();
        let mut d2 = Cursor::new(input.clone());
        let mut r2 = Cursor::new(vec![0u8; input.len()]);
        enc2.encode_full(&mut d2, &mut r2).unwrap();

        assert_eq!(r1.into_inner(), r2.into_inner());
    }

    #[test]
    fn round_trip_recovers_original() {
        let seed = [3u8; 32];
        let input: Vec<u8> = (0..4096u32).map(|i| (i % 251) as u8).collect();

        let mut enc = Encoder::new(seed, input.len() as u64, params(32, 3, 2)).unwrap();
        let mut data = Cursor::new(input.clone());
        let mut replica = Cursor::new(vec![0u8; input.len()]);
        enc.encode_full(&mut data, &mut replica).unwrap();

        let mut dec = Encoder::new(seed, input.len() as u64, params(32, 3, 2)).unwrap();
        let mut replica_in = Cursor::new(replica.into_inner());
        let mut recovered = Cursor::new(vec![0u8; input.len()]);
        dec.decode_full(&mut replica_in, &mut recovered).unwrap();

        assert_eq!(recovered.into_inner(), input);
    }

    #[test]
    fn range_encode_matches_full_encode_at_window_boundary() {
        let seed = [9u8; 32];
        let input: Vec<u8> = (0..2048u32).map(|i| (i % 199) as u8).collect();
        let p = params(16, 2, 2);

        let mut full_enc = Encoder::new(seed, input.len() as u64, p).unwrap();
        let mut d = Cursor::new(input.clone());
        let mut full_replica = Cursor::new(vec![0u8; input.len()]);
        full_enc.encode_full(&mut d, &mut full_replica).unwrap();

        let mut split_enc = Encoder::new(seed, input.len() as u64, p).unwrap();
        let num_nodes = split_enc.num_nodes();
        let mid = 16 * 2; // a window boundary (64 nodes total, 4 windows)
        let mut d1 = Cursor::new(input.clone());
        let mut split_replica = Cursor::new(vec![0u8; input.len()]);
        split_enc.encode(&mut d1, &mut split_replica, 0, mid).unwrap();
        let mut d2 = Cursor::new(input.clone());
        split_enc
            .encode(&mut d2, &mut split_replica, mid, num_nodes)
            .unwrap();

        assert_eq!(full_replica.into_inner(), split_replica.into_inner());
    }

    #[test]
    fn invalid_range_is_rejected() {
        let seed = [1u8; 32];
        let mut enc = Encoder::new(seed, 1024, params(16, 2, 2)).unwrap();
        let mut data = Cursor::new(vec![0u8; 1024]);
        let mut replica = Cursor::new(vec![0u8; 1024]);

        let err = enc.encode(&mut data, &mut replica, 5, 3).unwrap_err();
        assert!(matches!(err, Error::InvalidRange { .. }));

        let num_nodes = enc.num_nodes();
        let err = enc
            .encode(&mut data, &mut replica, 0, num_nodes + 1)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidRange { .. }));
    }
}
