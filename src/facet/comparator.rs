use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::{TermEntry, TermKey};
use crate::FacetError;

/// Ranking policy of a terms facet.
///
/// [`ComparatorType::compare`] returns `Ordering::Less` when the left entry
/// ranks higher, i.e. should appear first in the result.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparatorType {
    /// Highest counts first, ties broken by term ascending.
    #[default]
    Count,
    /// Lowest counts first, ties broken by term descending.
    ReverseCount,
    /// Terms ascending.
    Term,
    /// Terms descending.
    ReverseTerm,
}

impl ComparatorType {
    /// Ordinal used on the wire.
    pub fn id(self) -> u8 {
        match self {
            ComparatorType::Count => 0,
            ComparatorType::ReverseCount => 1,
            ComparatorType::Term => 2,
            ComparatorType::ReverseTerm => 3,
        }
    }

    /// Resolves a wire ordinal.
    pub fn from_id(id: u8) -> crate::Result<ComparatorType> {
        match id {
            0 => Ok(ComparatorType::Count),
            1 => Ok(ComparatorType::ReverseCount),
            2 => Ok(ComparatorType::Term),
            3 => Ok(ComparatorType::ReverseTerm),
            _ => Err(FacetError::MalformedStream(format!(
                "no terms facet comparator matches id [{id}]"
            ))),
        }
    }

    /// Name used in requests and settings.
    pub fn name(self) -> &'static str {
        match self {
            ComparatorType::Count => "count",
            ComparatorType::ReverseCount => "reverse_count",
            ComparatorType::Term => "term",
            ComparatorType::ReverseTerm => "reverse_term",
        }
    }

    /// Compares two entries under this policy.
    #[inline]
    pub fn compare<K: TermKey>(self, left: &TermEntry<K>, right: &TermEntry<K>) -> Ordering {
        match self {
            ComparatorType::Count => right
                .count
                .cmp(&left.count)
                .then_with(|| left.natural_cmp(right)),
            ComparatorType::ReverseCount => ComparatorType::Count.compare(right, left),
            ComparatorType::Term => left.natural_cmp(right),
            ComparatorType::ReverseTerm => right.natural_cmp(left),
        }
    }
}

impl fmt::Display for ComparatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
