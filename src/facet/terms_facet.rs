use std::slice;

use super::{ComparatorType, TermEntry, TermKey};

/// Type tag of every terms facet, whatever its key kind.
pub const TERMS_FACET_TYPE: &str = "terms";

/// The terms facet of one shard, or the reduction of several of them.
///
/// `total` counts every value scanned, including the ones that did not make it
/// into `entries`. `missing` counts the documents without a value and is kept
/// as reported by the shards.
#[derive(Clone, Debug, PartialEq)]
pub struct InternalTermsFacet<K: TermKey> {
    pub(crate) name: String,
    pub(crate) comparator_type: ComparatorType,
    pub(crate) required_size: u32,
    pub(crate) entries: Vec<TermEntry<K>>,
    pub(crate) missing: u64,
    pub(crate) total: u64,
}

impl<K: TermKey> InternalTermsFacet<K> {
    /// Creates a facet as computed by a shard.
    pub fn new(
        name: impl Into<String>,
        comparator_type: ComparatorType,
        required_size: u32,
        entries: Vec<TermEntry<K>>,
        missing: u64,
        total: u64,
    ) -> InternalTermsFacet<K> {
        InternalTermsFacet {
            name: name.into(),
            comparator_type,
            required_size,
            entries,
            missing,
            total,
        }
    }

    /// Name of the facet in the request.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Always [`TERMS_FACET_TYPE`].
    pub fn facet_type(&self) -> &'static str {
        TERMS_FACET_TYPE
    }

    /// Tag of the key kind on the wire, for instance `fTerms`.
    pub fn stream_type(&self) -> &'static str {
        K::STREAM_TYPE
    }

    pub fn comparator_type(&self) -> ComparatorType {
        self.comparator_type
    }

    /// Number of entries requested. Reduced facets never hold more.
    pub fn required_size(&self) -> u32 {
        self.required_size
    }

    /// The entries, ranked by the comparator once reduced.
    pub fn entries(&self) -> &[TermEntry<K>] {
        &self.entries
    }

    pub fn iter(&self) -> slice::Iter<'_, TermEntry<K>> {
        self.entries.iter()
    }

    /// Documents that had no value for the field.
    pub fn missing_count(&self) -> u64 {
        self.missing
    }

    /// Values counted, kept or not.
    pub fn total_count(&self) -> u64 {
        self.total
    }

    /// Values counted in `total` whose term is not part of the entries.
    ///
    /// Saturates at 0 if a shard reported fewer values than its entries hold.
    pub fn other_count(&self) -> u64 {
        let kept = self
            .entries
            .iter()
            .fold(0u64, |kept, entry| kept.saturating_add(entry.count));
        self.total.saturating_sub(kept)
    }
}

impl<'a, K: TermKey> IntoIterator for &'a InternalTermsFacet<K> {
    type Item = &'a TermEntry<K>;
    type IntoIter = slice::Iter<'a, TermEntry<K>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
