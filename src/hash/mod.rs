//! Non-cryptographic hash functions used to derive stable key identities.
//!
//! Two independent, swappable algorithms:
//!
//! - [`Murmur3`]: the reference MurmurHash3 x64-128 finalized mix, 128-bit
//!   output. The default for [`Key`](crate::key::Key) construction.
//! - [`Xxh`]: a custom 64-bit XXH-inspired derivative. Its constants and
//!   fold steps are an internal implementation detail reproduced from the
//!   engine's test vectors; it is *not* bit-compatible with public XXH3.
//!
//! Both are deterministic, allocation-light, memoized per instance, and safe
//! on empty input. They provide identity and bucketing, not security.

mod murmur3;
mod xxh;

pub use murmur3::Murmur3;
pub use xxh::Xxh;

/// A fixed-width digest over a byte representation.
///
/// `value` is a pure function of the input bytes (and seed, where
/// applicable), computed at most once per instance.
pub trait Digest {
    /// Raw digest type.
    type Output;

    /// The raw digest.
    fn value(&self) -> Self::Output;

    /// Lower-case, zero-padded hex rendering of the digest.
    fn as_hex(&self) -> String;

    /// 32-bit digest derived by avalanche-mixing the raw digest, suitable
    /// as a native hash code.
    fn as_int(&self) -> u32;
}

/// Little-endian u64 load, shared by both algorithms.
pub(crate) fn read_u64_le(data: &[u8], offset: usize) -> u64 {
    let mut word = [0u8; 8];
    word.copy_from_slice(&data[offset..offset + 8]);
    u64::from_le_bytes(word)
}
