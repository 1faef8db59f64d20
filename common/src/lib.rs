//! Byte-level building blocks shared by the facet codecs.
//!
//! Fixed width numbers are written big-endian, lengths and counts as
//! [`VInt`]s.

pub use byteorder::BigEndian as Endianness;

mod serialize;
mod vint;

pub use serialize::{BinarySerializable, FixedSize};
pub use vint::{VInt, MAX_VINT_NUM_BYTES};

const HIGHEST_BIT_64: u64 = 1 << 63;
const HIGHEST_BIT_32: u32 = 1 << 31;

/// Maps a `i64` to `u64`
///
/// Maps `i64` to `u64` so that
/// `-2^63 .. 2^63-1` is mapped
///     to
/// `0 .. 2^64-1`
/// in that order.
///
/// # See also
/// The reverse mapping is [`u64_to_i64()`].
#[inline]
pub fn i64_to_u64(val: i64) -> u64 {
    (val as u64) ^ HIGHEST_BIT_64
}

/// Reverse the mapping given by [`i64_to_u64()`].
#[inline]
pub fn u64_to_i64(val: u64) -> i64 {
    (val ^ HIGHEST_BIT_64) as i64
}

/// Maps a `i32` to `u64`, preserving order. Only the low 32 bits are used.
#[inline]
pub fn i32_to_u64(val: i32) -> u64 {
    ((val as u32) ^ HIGHEST_BIT_32) as u64
}

/// Reverse the mapping given by [`i32_to_u64()`].
#[inline]
pub fn u64_to_i32(val: u64) -> i32 {
    debug_assert!(val <= u32::MAX as u64);
    ((val as u32) ^ HIGHEST_BIT_32) as i32
}

/// Maps a `f64` to `u64`
///
/// Maps `f64` to `u64` in a monotonic manner, so that bytes lexical order is preserved.
/// The mapping is a bijection over bit patterns: two values map to the same `u64`
/// iff they are bit-for-bit equal. `-0.0` and `0.0` stay distinct, and NaNs are
/// ordered by sign and payload, as in [`f64::total_cmp`].
///
/// # Reference
///
/// Daniel Lemire's [blog post](https://lemire.me/blog/2020/12/14/converting-floating-point-numbers-to-integers-while-preserving-order/)
/// explains the mapping in a clear manner.
///
/// # See also
/// The reverse mapping is [`u64_to_f64()`].
#[inline]
pub fn f64_to_u64(val: f64) -> u64 {
    let bits = val.to_bits();
    if bits & HIGHEST_BIT_64 == 0 {
        bits ^ HIGHEST_BIT_64
    } else {
        !bits
    }
}

/// Reverse the mapping given by [`f64_to_u64()`].
#[inline]
pub fn u64_to_f64(val: u64) -> f64 {
    f64::from_bits(if val & HIGHEST_BIT_64 != 0 {
        val ^ HIGHEST_BIT_64
    } else {
        !val
    })
}

/// Maps a `f32` to `u64`
///
/// # See also
/// Similar mapping for f64 [`f64_to_u64()`].
#[inline]
pub fn f32_to_u64(val: f32) -> u64 {
    let bits = val.to_bits();
    let res32 = if bits & HIGHEST_BIT_32 == 0 {
        bits ^ HIGHEST_BIT_32
    } else {
        !bits
    };
    res32 as u64
}

/// Reverse the mapping given by [`f32_to_u64()`].
#[inline]
pub fn u64_to_f32(val: u64) -> f32 {
    debug_assert!(val <= u32::MAX as u64);
    let val = val as u32;
    f32::from_bits(if val & HIGHEST_BIT_32 != 0 {
        val ^ HIGHEST_BIT_32
    } else {
        !val
    })
}
