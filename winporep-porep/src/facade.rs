//! Entry points for external callers: encode/decode over arbitrary
//! `Read + Write + Seek` streams, and file-path convenience wrappers.

use std::fs::OpenOptions;
use std::io::{Read, Seek, Write};
use std::path::Path;

#[cfg(unix)]
use std::os::unix::fs::OpenOptionsExt;

use winporep_core::hash::hash;
use winporep_core::settings::Params;
use winporep_core::Result;

use crate::encoder::Encoder;

fn create_output_options() -> OpenOptions {
    let mut opts = OpenOptions::new();
    opts.read(true).write(true).create(true).truncate(true);
    #[cfg(unix)]
    opts.mode(0o755);
    opts
}

/// Encodes `data_size` bytes from `reader` into `writer` with default
/// parameters, deriving the DRG seed as `SHA256(seed)`.
pub fn encode_full<R: Read + Seek, W: Write + Seek>(
    seed: &[u8],
    data_size: u64,
    reader: &mut R,
    writer: &mut W,
) -> Result<()> {
    encode_full_with_params(seed, data_size, reader, writer, Params::default())
}

pub fn encode_full_with_params<R: Read + Seek, W: Write + Seek>(
    seed: &[u8],
    data_size: u64,
    reader: &mut R,
    writer: &mut W,
    params: Params,
) -> Result<()> {
    let drg_seed = hash(&[seed]);
    let mut encoder = Encoder::new(drg_seed, data_size, params)?;
    encoder.encode_full(reader, writer)
}

/// Opens `input` read-only and `output` read-write (creating it if it
/// doesn't exist, truncated to the input's length), stats the input for
/// its byte size, and forwards to [`encode_full`].
pub fn encode_files(seed: &[u8], input: &Path, output: &Path) -> Result<()> {
    encode_files_with_params(seed, input, output, Params::default())
}

pub fn encode_files_with_params(
    seed: &[u8],
    input: &Path,
    output: &Path,
    params: Params,
) -> Result<()> {
    let mut reader = OpenOptions::new().read(true).open(input)?;
    let data_size = reader.metadata()?.len();

    let mut writer = create_output_options().open(output)?;
    writer.set_len(data_size)?;

    encode_full_with_params(seed, data_size, &mut reader, &mut writer, params)
}

/// Inverse of [`encode_full`]: XORs the staggered DRG labels back out of a
/// replica, recovering the original data.
pub fn decode_full<R: Read + Seek, W: Write + Seek>(
    seed: &[u8],
    data_size: u64,
    replica: &mut R,
    data: &mut W,
) -> Result<()> {
    decode_full_with_params(seed, data_size, replica, data, Params::default())
}

pub fn decode_full_with_params<R: Read + Seek, W: Write + Seek>(
    seed: &[u8],
    data_size: u64,
    replica: &mut R,
    data: &mut W,
    params: Params,
) -> Result<()> {
    let drg_seed = hash(&[seed]);
    let mut encoder = Encoder::new(drg_seed, data_size, params)?;
    encoder.decode_full(replica, data)
}

pub fn decode_files(seed: &[u8], input: &Path, output: &Path) -> Result<()> {
    decode_files_with_params(seed, input, output, Params::default())
}

pub fn decode_files_with_params(
    seed: &[u8],
    input: &Path,
    output: &Path,
    params: Params,
) -> Result<()> {
    let mut reader = OpenOptions::new().read(true).open(input)?;
    let data_size = reader.metadata()?.len();

    let mut writer = create_output_options().open(output)?;
    writer.set_len(data_size)?;

    decode_full_with_params(seed, data_size, &mut reader, &mut writer, params)
}
