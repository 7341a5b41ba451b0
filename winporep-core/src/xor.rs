//! In-place XOR of one or more equal-or-shorter byte slices into a
//! destination buffer.
//!
//! The encoder (`winporep_porep::encoder`) uses this to combine a data
//! node with the `drg_stagger` DRG labels that cover it; every source it
//! passes is exactly 32 bytes, so in practice `dst` and every `src` are
//! the same length. The contract is documented more generally: XOR up to
//! `src.len()` bytes into `dst`, requiring `src.len() <= dst.len()`.

/// XORs `src` into the prefix of `dst`, in place.
///
/// # Panics
///
/// Panics if `src` is longer than `dst` — xoring only a truncated prefix
/// of a too-long source would silently corrupt half the input, so this is
/// treated as a caller bug rather than swallowed.
pub fn xor_into_one(dst: &mut [u8], src: &[u8]) {
    assert!(
        src.len() <= dst.len(),
        "xor source ({} bytes) longer than destination ({} bytes)",
        src.len(),
        dst.len()
    );
    for (d, s) in dst.iter_mut().zip(src.iter()) {
        *d ^= s;
    }
}

/// XORs each of `sources` into `dst`, in order.
pub fn xor_into(dst: &mut [u8], sources: &[&[u8]]) {
    for src in sources {
        xor_into_one(dst, src);
    }
}
