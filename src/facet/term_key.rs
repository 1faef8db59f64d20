use std::cmp::Ordering;
use std::fmt;

use common::{
    f32_to_u64, f64_to_u64, i32_to_u64, i64_to_u64, u64_to_f32, u64_to_f64, u64_to_i32,
    u64_to_i64, BinarySerializable, FixedSize,
};
use serde::Serialize;

/// Stream type of a terms facet over `f32` values.
pub const FLOAT_TERMS_STREAM: &str = "fTerms";
/// Stream type of a terms facet over `f64` values.
pub const DOUBLE_TERMS_STREAM: &str = "dTerms";
/// Stream type of a terms facet over `i32` values.
pub const INT_TERMS_STREAM: &str = "iTerms";
/// Stream type of a terms facet over `i64` values.
pub const LONG_TERMS_STREAM: &str = "lTerms";

/// A value type a terms facet can count.
///
/// Every key kind is mapped onto a `u64` with a monotonic bijection.
/// The mapped value is used both as the aggregation bucket key, so that two
/// terms share a bucket iff they are bit-for-bit equal, and as the natural
/// order of terms.
pub trait TermKey:
    Copy
    + fmt::Debug
    + PartialEq
    + Send
    + Sync
    + Serialize
    + BinarySerializable
    + FixedSize
    + 'static
{
    /// Tag identifying facets of this key kind on the wire.
    const STREAM_TYPE: &'static str;

    /// Order-preserving mapping to `u64`.
    fn to_u64(self) -> u64;

    /// Reverse of [`TermKey::to_u64`].
    fn from_u64(val: u64) -> Self;

    /// Natural order of terms. Total, even for floats.
    #[inline]
    fn cmp_term(&self, other: &Self) -> Ordering {
        self.to_u64().cmp(&other.to_u64())
    }
}

macro_rules! impl_term_key {
    ($ty:ty, $stream_type:expr, $to_u64:ident, $from_u64:ident) => {
        impl TermKey for $ty {
            const STREAM_TYPE: &'static str = $stream_type;

            #[inline]
            fn to_u64(self) -> u64 {
                $to_u64(self)
            }

            #[inline]
            fn from_u64(val: u64) -> Self {
                $from_u64(val)
            }
        }
    };
}

impl_term_key!(f32, FLOAT_TERMS_STREAM, f32_to_u64, u64_to_f32);
impl_term_key!(f64, DOUBLE_TERMS_STREAM, f64_to_u64, u64_to_f64);
impl_term_key!(i32, INT_TERMS_STREAM, i32_to_u64, u64_to_i32);
impl_term_key!(i64, LONG_TERMS_STREAM, i64_to_u64, u64_to_i64);
