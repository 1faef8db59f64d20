use std::cmp::Ordering;

use serde::Serialize;

use super::TermKey;

/// One distinct term of a facet and the number of documents carrying it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TermEntry<K: TermKey> {
    pub(crate) term: K,
    pub(crate) count: u64,
}

impl<K: TermKey> TermEntry<K> {
    /// Creates a new entry.
    pub fn new(term: K, count: u64) -> TermEntry<K> {
        TermEntry { term, count }
    }

    /// The counted term.
    #[inline]
    pub fn term(&self) -> K {
        self.term
    }

    /// Number of documents carrying the term.
    #[inline]
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Term ascending, then count ascending.
    #[inline]
    pub(crate) fn natural_cmp(&self, other: &TermEntry<K>) -> Ordering {
        self.term
            .cmp_term(&other.term)
            .then(self.count.cmp(&other.count))
    }
}

impl<K: TermKey> From<(K, u64)> for TermEntry<K> {
    fn from((term, count): (K, u64)) -> TermEntry<K> {
        TermEntry::new(term, count)
    }
}
