//! Byte-representation seam for keys and values.
//!
//! Hashing and size accounting never look at a value's structure, only at
//! its byte representation. `ToBytes` is implemented for the usual key and
//! value shapes; integers use their little-endian encoding so the digest is
//! stable across platforms.

use std::borrow::Cow;

/// Stable byte view of a value, consumed by the hash functions and by
/// `Entry::size` / `Key::size`.
pub trait ToBytes {
    /// Byte representation of the value.
    fn to_bytes(&self) -> Cow<'_, [u8]>;
}

impl ToBytes for String {
    fn to_bytes(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self.as_bytes())
    }
}

impl ToBytes for &str {
    fn to_bytes(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self.as_bytes())
    }
}

impl ToBytes for str {
    fn to_bytes(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self.as_bytes())
    }
}

impl ToBytes for Vec<u8> {
    fn to_bytes(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self.as_slice())
    }
}

impl ToBytes for [u8] {
    fn to_bytes(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self)
    }
}

impl ToBytes for &[u8] {
    fn to_bytes(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self)
    }
}

macro_rules! int_to_bytes {
    ($($ty:ty),*) => {
        $(
            impl ToBytes for $ty {
                fn to_bytes(&self) -> Cow<'_, [u8]> {
                    Cow::Owned(self.to_le_bytes().to_vec())
                }
            }
        )*
    };
}

int_to_bytes!(u8, u16, u32, u64, u128, i8, i16, i32, i64, i128, usize, isize);
