//! Terms facets and their reduction.
//!
//! Each shard computes an [`InternalTermsFacet`]: the count of every distinct
//! value of a numeric field among the documents matching a query, the number of
//! documents missing the field, and the total number of values scanned.
//! These partial results travel to the coordinating node through the
//! [`codec`], where a [`TermsFacetReducer`] merges them into the final facet,
//! keeping only the `required_size` best ranked terms under the facet's
//! [`ComparatorType`].
//!
//! ```text
//! shard facets --encode/decode--> reduce --BoundedRankedSelector--> final facet
//! ```
//!
//! The reduction is generic over the key kind ([`TermKey`]), and implemented
//! for `f32`, `f64`, `i32` and `i64` terms. [`TermsFacet`] wraps a facet whose
//! key kind is only known at runtime.

mod bounded_selector;
pub mod codec;
mod comparator;
mod entry;
mod recycler;
mod reducer;
mod render;
mod stream;
mod term_key;
mod terms_facet;

pub use self::bounded_selector::BoundedRankedSelector;
pub use self::codec::{decode, decode_from, encode, encode_into, encoded_len};
pub use self::comparator::ComparatorType;
pub use self::entry::TermEntry;
pub use self::recycler::{LeasedScratchMap, ScratchMapRecycler, TermCountMap};
pub use self::reducer::{reduce, TermsFacetReducer};
pub use self::render::FacetResponse;
pub use self::stream::{StreamKey, TermsFacet};
pub use self::term_key::{
    TermKey, DOUBLE_TERMS_STREAM, FLOAT_TERMS_STREAM, INT_TERMS_STREAM, LONG_TERMS_STREAM,
};
pub use self::terms_facet::{InternalTermsFacet, TERMS_FACET_TYPE};
