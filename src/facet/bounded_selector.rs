use std::cmp::Ordering;
use std::collections::BinaryHeap;

use super::{ComparatorType, TermEntry, TermKey};

// Rust heap is a max-heap: the greatest `RankedEntry` is the worst ranked one,
// and sits at the top, ready to be evicted.
// `Ord` cannot reach the selector, so each entry carries a copy of the comparator.
#[derive(Debug)]
struct RankedEntry<K: TermKey> {
    entry: TermEntry<K>,
    seq: u64,
    comparator: ComparatorType,
}

impl<K: TermKey> PartialOrd for RankedEntry<K> {
    fn partial_cmp(&self, other: &RankedEntry<K>) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: TermKey> Ord for RankedEntry<K> {
    #[inline]
    fn cmp(&self, other: &RankedEntry<K>) -> Ordering {
        self.comparator
            .compare(&self.entry, &other.entry)
            .then(self.seq.cmp(&other.seq))
    }
}

impl<K: TermKey> PartialEq for RankedEntry<K> {
    fn eq(&self, other: &RankedEntry<K>) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<K: TermKey> Eq for RankedEntry<K> {}

/// Keeps the `limit` best ranked entries it is fed, under a comparator.
///
/// Entries are totally ordered: by the comparator first, then by insertion
/// order, the earlier entry ranking higher. Membership is therefore a pure
/// function of the inserted sequence.
///
/// The implementation is based on a `BinaryHeap`.
/// Collecting the top `K` out of `n` entries is `O(n log K)`.
#[derive(Debug)]
pub struct BoundedRankedSelector<K: TermKey> {
    comparator: ComparatorType,
    limit: usize,
    heap: BinaryHeap<RankedEntry<K>>,
    next_seq: u64,
}

impl<K: TermKey> BoundedRankedSelector<K> {
    /// Creates a selector keeping at most `limit` entries.
    ///
    /// A limit of 0 is accepted: such a selector keeps nothing.
    pub fn with_limit(comparator: ComparatorType, limit: usize) -> BoundedRankedSelector<K> {
        BoundedRankedSelector {
            comparator,
            limit,
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    /// Reserves room for `num_candidates` insertions, within the limit.
    pub fn reserve(&mut self, num_candidates: usize) {
        let target = num_candidates.min(self.limit);
        self.heap.reserve(target.saturating_sub(self.heap.len()));
    }

    pub fn comparator(&self) -> ComparatorType {
        self.comparator
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Return true iff `limit` entries are kept.
    #[inline]
    pub fn at_capacity(&self) -> bool {
        self.heap.len() >= self.limit
    }

    /// The entry the next better ranked insertion would evict.
    pub fn worst(&self) -> Option<&TermEntry<K>> {
        self.heap.peek().map(|ranked| &ranked.entry)
    }

    /// Offers an entry to the selector.
    ///
    /// At capacity, the entry replaces the worst kept one if it ranks strictly
    /// higher, and is dropped otherwise.
    pub fn insert(&mut self, entry: TermEntry<K>) {
        if self.limit == 0 {
            return;
        }
        let candidate = RankedEntry {
            entry,
            seq: self.next_seq,
            comparator: self.comparator,
        };
        self.next_seq += 1;
        if !self.at_capacity() {
            self.heap.push(candidate);
            return;
        }
        if let Some(mut worst) = self.heap.peek_mut() {
            if candidate < *worst {
                *worst = candidate;
            }
        }
    }

    /// Returns the kept entries, best ranked first.
    pub fn into_sorted_vec(self) -> Vec<TermEntry<K>> {
        self.heap
            .into_sorted_vec()
            .into_iter()
            .map(|ranked| ranked.entry)
            .collect()
    }
}

impl<K: TermKey> Extend<TermEntry<K>> for BoundedRankedSelector<K> {
    fn extend<I: IntoIterator<Item = TermEntry<K>>>(&mut self, entries: I) {
        for entry in entries {
            self.insert(entry);
        }
    }
}
