//! MurmurHash3 x64-128.
//!
//! Two interleaved 64-bit lanes over 16-byte blocks, a byte-at-a-time tail
//! fold, and a final xor-shift-multiply avalanche on each lane. The seed
//! defaults to 0 and is caller-overridable.

use std::fmt::Write as _;

use once_cell::sync::OnceCell;

use crate::bytes::ToBytes;
use crate::hash::{read_u64_le, Digest};

const C1: u64 = 0x87c3_7b91_1142_53d5;
const C2: u64 = 0x4cf5_ad43_2745_937f;

/// 128-bit MurmurHash3 digest of a byte representation.
///
/// The digest is memoized: the first call to [`Digest::value`] (or either
/// derived form) computes it, later calls return the cached pair.
///
/// # Example
///
/// ```
/// use tagcache::hash::{Digest, Murmur3};
///
/// let hash = Murmur3::new(&"The quick brown fox jumps over the lazy dog");
/// assert_eq!(hash.as_hex(), "6c1b07bc7bbc4be347939ac4a93c437a");
/// ```
#[derive(Debug)]
pub struct Murmur3 {
    bytes: Vec<u8>,
    seed: u32,
    cached: OnceCell<[u64; 2]>,
}

impl Murmur3 {
    /// Digest with the default seed of 0.
    pub fn new(input: &(impl ToBytes + ?Sized)) -> Self {
        Self::with_seed(input, 0)
    }

    /// Digest with an explicit seed.
    pub fn with_seed(input: &(impl ToBytes + ?Sized), seed: u32) -> Self {
        Self {
            bytes: input.to_bytes().into_owned(),
            seed,
            cached: OnceCell::new(),
        }
    }

    fn compute(&self) -> [u64; 2] {
        let data = &self.bytes;
        let len = data.len();
        let mut h1 = u64::from(self.seed);
        let mut h2 = u64::from(self.seed);

        let blocks = len / 16;
        for block in 0..blocks {
            let offset = block * 16;
            let mut k1 = read_u64_le(data, offset);
            let mut k2 = read_u64_le(data, offset + 8);

            k1 = k1.wrapping_mul(C1).rotate_left(31).wrapping_mul(C2);
            h1 ^= k1;
            h1 = h1.rotate_left(27).wrapping_add(h2);
            h1 = h1.wrapping_mul(5).wrapping_add(0x52dc_e729);

            k2 = k2.wrapping_mul(C2).rotate_left(33).wrapping_mul(C1);
            h2 ^= k2;
            h2 = h2.rotate_left(31).wrapping_add(h1);
            h2 = h2.wrapping_mul(5).wrapping_add(0x3849_5ab5);
        }

        // Fold the remaining 0-15 bytes: bytes 8.. feed lane two, bytes 0..8
        // feed lane one, each mixed once before entering its lane.
        let tail = &data[blocks * 16..];
        if tail.len() > 8 {
            let mut k2 = 0u64;
            for (shift, &byte) in tail[8..].iter().enumerate() {
                k2 ^= u64::from(byte) << (shift * 8);
            }
            k2 = k2.wrapping_mul(C2).rotate_left(33).wrapping_mul(C1);
            h2 ^= k2;
        }
        if !tail.is_empty() {
            let mut k1 = 0u64;
            for (shift, &byte) in tail.iter().take(8).enumerate() {
                k1 ^= u64::from(byte) << (shift * 8);
            }
            k1 = k1.wrapping_mul(C1).rotate_left(31).wrapping_mul(C2);
            h1 ^= k1;
        }

        h1 ^= len as u64;
        h2 ^= len as u64;
        h1 = h1.wrapping_add(h2);
        h2 = h2.wrapping_add(h1);
        h1 = fmix(h1);
        h2 = fmix(h2);
        h1 = h1.wrapping_add(h2);
        h2 = h2.wrapping_add(h1);
        [h1, h2]
    }
}

impl Digest for Murmur3 {
    type Output = [u64; 2];

    fn value(&self) -> [u64; 2] {
        *self.cached.get_or_init(|| self.compute())
    }

    fn as_hex(&self) -> String {
        let [h1, h2] = self.value();
        let mut hex = String::with_capacity(32);
        for byte in h1.to_le_bytes().iter().chain(h2.to_le_bytes().iter()) {
            let _ = write!(hex, "{byte:02x}");
        }
        hex
    }

    fn as_int(&self) -> u32 {
        let [h1, h2] = self.value();
        let mut mixed = h1 ^ h2;
        mixed ^= mixed >> 33;
        mixed = mixed.wrapping_mul(0xff51_afd7_ed55_8ccd);
        mixed as u32
    }
}

fn fmix(value: u64) -> u64 {
    let mut result = value;
    result ^= result >> 33;
    result = result.wrapping_mul(0xff51_afd7_ed55_8ccd);
    result ^= result >> 33;
    result = result.wrapping_mul(0xc4ce_b9fe_1a85_ec53);
    result ^= result >> 33;
    result
}
