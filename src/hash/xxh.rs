//! Custom 64-bit XXH-inspired hash.
//!
//! Processes 32-byte stripes, each lane XORed against a fixed secret
//! constant and folded through a multiply-high/multiply-low XOR fold into a
//! single accumulator; 8-byte and sub-8-byte tails fold similarly. The
//! constants below are the conformance target themselves (taken from the
//! engine's test vectors); this is not public XXH3.

use once_cell::sync::OnceCell;

use crate::bytes::ToBytes;
use crate::hash::{read_u64_le, Digest};

const PRIME1: u64 = 0x9e37_79b1_85eb_ca87;
const PRIME2: u64 = 0xc2b2_ae3d_27d4_eb4f;
const PRIME3: u64 = 0x1656_67b1_9e37_79f9;
const PRIME4: u64 = 0x85eb_ca77_c2b2_ae63;
const PRIME5: u64 = 0x1656_6791_9e37_79f9;

const SECRET: [u64; 8] = [
    0x9e37_79b1_85eb_ca87,
    0xc2b2_ae3d_27d4_eb4f,
    0x1656_67b1_9e37_79f9,
    0x85eb_ca77_c2b2_ae63,
    0x27d4_eb2f_1656_67c5,
    0x9fb2_1c65_1e98_df25,
    0xa5a3_5625_e0c3_f21d,
    0xc3f2_1d9f_b21c_651e,
];

/// 64-bit digest of a byte representation, memoized per instance.
///
/// # Example
///
/// ```
/// use tagcache::hash::{Digest, Xxh};
///
/// let hash = Xxh::new(&"The quick brown fox jumps over the lazy dog");
/// assert_eq!(hash.as_hex(), "6323a0462eb44ae4");
/// ```
#[derive(Debug)]
pub struct Xxh {
    bytes: Vec<u8>,
    cached: OnceCell<u64>,
}

impl Xxh {
    pub fn new(input: &(impl ToBytes + ?Sized)) -> Self {
        Self {
            bytes: input.to_bytes().into_owned(),
            cached: OnceCell::new(),
        }
    }

    fn compute(&self) -> u64 {
        let data = &self.bytes;
        let len = data.len();
        let mut hash = (len as u64).wrapping_mul(PRIME1);
        let mut idx = 0;

        while idx + 32 <= len {
            let first = read_u64_le(data, idx) ^ SECRET[0];
            let second = read_u64_le(data, idx + 8) ^ SECRET[1];
            let third = read_u64_le(data, idx + 16) ^ SECRET[2];
            let fourth = read_u64_le(data, idx + 24) ^ SECRET[3];
            hash = hash.wrapping_add(mul_fold(first, PRIME1));
            hash ^= mul_fold(second, PRIME2);
            hash = hash.wrapping_add(mul_fold(third, PRIME3));
            hash ^= mul_fold(fourth, PRIME4);
            hash = hash.rotate_left(27).wrapping_mul(PRIME1).wrapping_add(PRIME4);
            idx += 32;
        }

        while idx + 8 <= len {
            let word = read_u64_le(data, idx) ^ SECRET[(idx >> 3) & 7];
            hash ^= mul_fold(word, PRIME2);
            hash = hash.rotate_left(23).wrapping_mul(PRIME3).wrapping_add(PRIME1);
            idx += 8;
        }

        let mut last = 0u64;
        let mut shift = 0;
        while idx < len {
            last |= u64::from(data[idx]) << shift;
            idx += 1;
            shift += 8;
        }
        hash ^= mul_fold(last ^ SECRET[7], PRIME4);

        avalanche(hash)
    }
}

impl Digest for Xxh {
    type Output = u64;

    fn value(&self) -> u64 {
        *self.cached.get_or_init(|| self.compute())
    }

    fn as_hex(&self) -> String {
        format!("{:016x}", self.value())
    }

    fn as_int(&self) -> u32 {
        let value = self.value();
        (value ^ (value >> 32)) as u32
    }
}

/// Multiply-high/multiply-low XOR fold. The high half uses *signed* 64-bit
/// multiplication, matching the reference behavior exactly; changing this to
/// an unsigned widening multiply changes every digest.
fn mul_fold(first: u64, second: u64) -> u64 {
    let wide = i128::from(first as i64).wrapping_mul(i128::from(second as i64));
    let high = (wide >> 64) as u64;
    let low = first.wrapping_mul(second);
    high ^ low
}

fn avalanche(value: u64) -> u64 {
    let mut hash = value;
    hash ^= hash >> 37;
    hash = hash.wrapping_mul(PRIME5);
    hash ^= hash >> 32;
    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    const FOX: &str = "The quick brown fox jumps over the lazy dog";

    #[test]
    fn known_vector_value() {
        assert_eq!(Xxh::new(&FOX).value(), 0x6323_a046_2eb4_4ae4);
    }

    #[test]
    fn known_vector_hex() {
        assert_eq!(Xxh::new(&FOX).as_hex(), "6323a0462eb44ae4");
    }

    #[test]
    fn empty_input_is_safe() {
        let hash = Xxh::new(&"");
        assert_eq!(hash.as_hex().len(), 16);
        assert_eq!(hash.value(), Xxh::new(&"").value());
    }

    #[test]
    fn deterministic_across_instances() {
        let first = Xxh::new(&"tagcache");
        let second = Xxh::new(&"tagcache");
        assert_eq!(first.value(), second.value());
        assert_eq!(first.as_int(), second.as_int());
    }

    #[test]
    fn stripe_and_tail_lengths_differ() {
        // 32-byte stripes, 8-byte words and sub-8 tails all feed the fold.
        let inputs: Vec<String> = [7, 8, 9, 31, 32, 33, 40, 64].iter().map(|&n| "y".repeat(n)).collect();
        for (i, a) in inputs.iter().enumerate() {
            for b in &inputs[i + 1..] {
                assert_ne!(Xxh::new(a).value(), Xxh::new(b).value());
            }
        }
    }
}
