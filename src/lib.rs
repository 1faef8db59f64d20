#![doc(test(attr(allow(unused_variables), deny(warnings))))]
#![warn(missing_debug_implementations)]

//! # `termfacet`
//!
//! Coordinator-side reduction of distributed terms facets.
//!
//! Every shard of an index counts, for a query, how many documents carry each
//! distinct value of a numeric field. The coordinating node decodes these
//! partial histograms and merges them into one facet holding the top-N terms,
//! along with exact `missing`, `total` and `other` counts.
//!
//! ```rust
//! use termfacet::facet::{self, ComparatorType, InternalTermsFacet, TermEntry};
//!
//! # fn main() -> termfacet::Result<()> {
//! // What the shards send over the wire.
//! let shard_bytes: Vec<Vec<u8>> = vec![
//!     facet::encode(&InternalTermsFacet::new(
//!         "price",
//!         ComparatorType::Count,
//!         2,
//!         vec![TermEntry::new(1.0f32, 5), TermEntry::new(2.0f32, 3)],
//!         1,
//!         10,
//!     ))?,
//!     facet::encode(&InternalTermsFacet::new(
//!         "price",
//!         ComparatorType::Count,
//!         2,
//!         vec![TermEntry::new(1.0f32, 2), TermEntry::new(3.0f32, 4)],
//!         0,
//!         8,
//!     ))?,
//! ];
//!
//! let shard_facets = shard_bytes
//!     .iter()
//!     .map(|bytes| facet::decode::<f32>(bytes))
//!     .collect::<termfacet::Result<Vec<_>>>()?;
//! let price = facet::reduce(shard_facets)?;
//!
//! assert_eq!(price.entries(), &[TermEntry::new(1.0, 7), TermEntry::new(3.0, 4)]);
//! assert_eq!(price.other_count(), 7);
//! # Ok(())
//! # }
//! ```

mod error;
pub mod facet;
mod settings;

pub use crate::error::FacetError;
pub use crate::settings::{
    ReducerSettings, DEFAULT_MAX_RECYCLED_CAPACITY, DEFAULT_MAX_RECYCLED_MAPS,
};

/// termfacet result.
pub type Result<T> = std::result::Result<T, FacetError>;
