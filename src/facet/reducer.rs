use std::vec;

use log::debug;

use super::recycler::{LeasedScratchMap, ScratchMapRecycler};
use super::{BoundedRankedSelector, InternalTermsFacet, TermEntry, TermKey};
use crate::{FacetError, ReducerSettings};

/// Merges the facets computed by each shard into their final, global value.
///
/// The reducer owns a [`ScratchMapRecycler`]: it can be shared between threads
/// and used for concurrent reductions.
///
/// ```rust
/// use termfacet::facet::{ComparatorType, InternalTermsFacet, TermEntry, TermsFacetReducer};
///
/// # fn main() -> termfacet::Result<()> {
/// let shard_a = InternalTermsFacet::new(
///     "price",
///     ComparatorType::Count,
///     2,
///     vec![TermEntry::new(1.0f32, 5), TermEntry::new(2.0f32, 3)],
///     1,
///     10,
/// );
/// let shard_b = InternalTermsFacet::new(
///     "price",
///     ComparatorType::Count,
///     2,
///     vec![TermEntry::new(1.0f32, 2), TermEntry::new(3.0f32, 4)],
///     0,
///     8,
/// );
/// let reducer = TermsFacetReducer::default();
/// let facet = reducer.reduce(vec![shard_a, shard_b])?;
/// assert_eq!(
///     facet.entries(),
///     &[TermEntry::new(1.0f32, 7), TermEntry::new(3.0f32, 4)]
/// );
/// assert_eq!(facet.missing_count(), 1);
/// assert_eq!(facet.total_count(), 18);
/// assert_eq!(facet.other_count(), 7);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct TermsFacetReducer {
    recycler: ScratchMapRecycler,
}

impl TermsFacetReducer {
    pub fn new(settings: &ReducerSettings) -> TermsFacetReducer {
        TermsFacetReducer {
            recycler: ScratchMapRecycler::from_settings(settings),
        }
    }

    pub fn recycler(&self) -> &ScratchMapRecycler {
        &self.recycler
    }

    /// Reduces the facets of all shards into one.
    ///
    /// See [`reduce`] for the semantics. The aggregation map is checked out of
    /// the reducer's recycler.
    pub fn reduce<K: TermKey>(
        &self,
        facets: Vec<InternalTermsFacet<K>>,
    ) -> crate::Result<InternalTermsFacet<K>> {
        reduce_with(facets, || self.recycler.acquire())
    }
}

/// Reduces the facets of all shards into one.
///
/// - A single facet is returned as is.
/// - Otherwise counts are summed per term, `missing` and `total` are summed,
///   and only the `required_size` best ranked terms are kept. Name,
///   comparator and required size are taken from the first facet.
///
/// Fails with [`FacetError::InvalidReduceInput`] if `facets` is empty or if
/// the facets do not all use the same comparator.
pub fn reduce<K: TermKey>(
    facets: Vec<InternalTermsFacet<K>>,
) -> crate::Result<InternalTermsFacet<K>> {
    reduce_with(facets, LeasedScratchMap::detached)
}

fn check_same_comparator<K: TermKey>(
    first: &InternalTermsFacet<K>,
    others: &[InternalTermsFacet<K>],
) -> crate::Result<()> {
    if let Some(facet) = others
        .iter()
        .find(|facet| facet.comparator_type != first.comparator_type)
    {
        return Err(FacetError::InvalidReduceInput(format!(
            "facet `{}` is ordered by `{}`, but facet `{}` is ordered by `{}`",
            first.name, first.comparator_type, facet.name, facet.comparator_type
        )));
    }
    Ok(())
}

fn reduce_with<'a, K: TermKey>(
    facets: Vec<InternalTermsFacet<K>>,
    acquire_scratch_map: impl FnOnce() -> LeasedScratchMap<'a>,
) -> crate::Result<InternalTermsFacet<K>> {
    let mut facets_it = facets.into_iter();
    let Some(first) = facets_it.next() else {
        return Err(FacetError::InvalidReduceInput(
            "cannot reduce an empty list of facets".to_string(),
        ));
    };
    check_same_comparator(&first, facets_it.as_slice())?;
    if facets_it.len() == 0 {
        return Ok(first);
    }
    let mut aggregated = acquire_scratch_map();
    let facet = merge_into_first(first, facets_it, &mut aggregated);
    Ok(facet)
}

fn merge_into_first<K: TermKey>(
    mut first: InternalTermsFacet<K>,
    others: vec::IntoIter<InternalTermsFacet<K>>,
    aggregated: &mut LeasedScratchMap<'_>,
) -> InternalTermsFacet<K> {
    let num_facets = others.len() + 1;
    let mut missing = first.missing;
    let mut total = first.total;
    let mut num_shard_entries = first.entries.len();
    add_entries(aggregated, first.entries.drain(..));
    for facet in others {
        missing = missing.saturating_add(facet.missing);
        total = total.saturating_add(facet.total);
        num_shard_entries += facet.entries.len();
        add_entries(aggregated, facet.entries);
    }

    let mut selector =
        BoundedRankedSelector::with_limit(first.comparator_type, first.required_size as usize);
    selector.reserve(aggregated.len());
    let num_distinct_terms = aggregated.len();
    selector.extend(
        aggregated
            .drain()
            .map(|(term, count)| TermEntry::new(K::from_u64(term), count)),
    );

    first.entries = selector.into_sorted_vec();
    first.missing = missing;
    first.total = total;
    debug!(
        "reduced {num_facets} `{}` facets: {num_shard_entries} shard entries, \
         {num_distinct_terms} distinct terms, {} kept",
        first.name,
        first.entries.len()
    );
    first
}

fn add_entries<K: TermKey>(
    aggregated: &mut LeasedScratchMap<'_>,
    entries: impl IntoIterator<Item = TermEntry<K>>,
) {
    for entry in entries {
        let count = aggregated.entry(entry.term.to_u64()).or_insert(0);
        *count = count.saturating_add(entry.count);
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::{reduce, TermsFacetReducer};
    use crate::facet::{ComparatorType, InternalTermsFacet, TermEntry};
    use crate::{FacetError, ReducerSettings};

    fn facet(
        comparator_type: ComparatorType,
        required_size: u32,
        entries: &[(f32, u64)],
        missing: u64,
        total: u64,
    ) -> InternalTermsFacet<f32> {
        InternalTermsFacet::new(
            "price",
            comparator_type,
            required_size,
            entries.iter().copied().map(TermEntry::from).collect(),
            missing,
            total,
        )
    }

    #[test]
    fn test_reduce_two_shards() {
        let shard_a = facet(ComparatorType::Count, 2, &[(1.0, 5), (2.0, 3)], 1, 10);
        let shard_b = facet(ComparatorType::Count, 2, &[(1.0, 2), (3.0, 4)], 0, 8);
        let reduced = reduce(vec![shard_a, shard_b]).unwrap();
        assert_eq!(reduced.name(), "price");
        assert_eq!(reduced.comparator_type(), ComparatorType::Count);
        assert_eq!(reduced.required_size(), 2);
        assert_eq!(
            reduced.entries(),
            &[TermEntry::new(1.0, 7), TermEntry::new(3.0, 4)]
        );
        assert_eq!(reduced.missing_count(), 1);
        assert_eq!(reduced.total_count(), 18);
        assert_eq!(reduced.other_count(), 7);
    }

    #[test]
    fn test_reduce_single_facet_is_noop() {
        // not even sorted nor cut: a single facet is returned untouched
        let single = facet(
            ComparatorType::Term,
            1,
            &[(3.0, 1), (1.0, 2), (1.0, 2)],
            4,
            9,
        );
        let reduced = reduce(vec![single.clone()]).unwrap();
        assert_eq!(reduced, single);
    }

    #[test]
    fn test_reduce_empty_input() {
        let res = reduce::<f32>(Vec::new());
        assert!(matches!(res, Err(FacetError::InvalidReduceInput(_))));
    }

    #[test]
    fn test_reduce_mixed_comparators() {
        let shard_a = facet(ComparatorType::Count, 2, &[(1.0, 5)], 0, 5);
        let shard_b = facet(ComparatorType::Term, 2, &[(1.0, 2)], 0, 2);
        let err = reduce(vec![shard_a, shard_b]).unwrap_err();
        assert!(matches!(err, FacetError::InvalidReduceInput(_)));
        assert!(err.to_string().contains("`count`"));
        assert!(err.to_string().contains("`term`"));
    }

    #[test]
    fn test_reduce_buckets_are_bit_exact() {
        let shard_a = facet(ComparatorType::Term, 10, &[(0.0, 1), (f32::NAN, 2)], 0, 3);
        let shard_b = facet(ComparatorType::Term, 10, &[(-0.0, 4), (f32::NAN, 1)], 0, 5);
        let reduced = reduce(vec![shard_a, shard_b]).unwrap();
        let entries: Vec<(u32, u64)> = reduced
            .iter()
            .map(|entry| (entry.term().to_bits(), entry.count()))
            .collect();
        assert_eq!(
            entries,
            vec![
                ((-0.0f32).to_bits(), 4),
                (0.0f32.to_bits(), 1),
                (f32::NAN.to_bits(), 3),
            ]
        );
    }

    #[test]
    fn test_reduce_saturates_huge_counts() {
        let shard_a = facet(ComparatorType::Count, 2, &[(1.0, u64::MAX)], u64::MAX, u64::MAX);
        let shard_b = facet(ComparatorType::Count, 2, &[(1.0, 1), (2.0, 3)], 1, 4);
        let reduced = reduce(vec![shard_a, shard_b]).unwrap();
        assert_eq!(
            reduced.entries(),
            &[TermEntry::new(1.0, u64::MAX), TermEntry::new(2.0, 3)]
        );
        assert_eq!(reduced.missing_count(), u64::MAX);
        assert_eq!(reduced.total_count(), u64::MAX);
        assert_eq!(reduced.other_count(), 0);
    }

    #[test]
    fn test_reduce_decoded_shard_with_max_total() {
        let huge = facet(ComparatorType::Term, 2, &[(5.0, 2)], 0, u64::MAX);
        let huge = crate::facet::decode(&crate::facet::encode(&huge).unwrap()).unwrap();
        let small = facet(ComparatorType::Term, 2, &[(5.0, 1)], 0, 1);
        let reduced = reduce(vec![huge, small]).unwrap();
        assert_eq!(reduced.entries(), &[TermEntry::new(5.0, 3)]);
        assert_eq!(reduced.total_count(), u64::MAX);
        assert_eq!(reduced.other_count(), u64::MAX - 3);
    }

    #[test]
    fn test_reduce_required_size_zero() {
        let shard_a = facet(ComparatorType::Count, 0, &[(1.0, 5)], 2, 5);
        let shard_b = facet(ComparatorType::Count, 0, &[(2.0, 2)], 1, 2);
        let reduced = reduce(vec![shard_a, shard_b]).unwrap();
        assert!(reduced.entries().is_empty());
        assert_eq!(reduced.missing_count(), 3);
        assert_eq!(reduced.other_count(), 7);
    }

    #[test]
    fn test_reduce_empty_shards() {
        let shard_a = facet(ComparatorType::Count, 3, &[], 0, 0);
        let shard_b = facet(ComparatorType::Count, 3, &[], 2, 0);
        let reduced = reduce(vec![shard_a, shard_b]).unwrap();
        assert!(reduced.entries().is_empty());
        assert_eq!(reduced.missing_count(), 2);
        assert_eq!(reduced.total_count(), 0);
    }

    #[test]
    fn test_reducer_recycles_scratch_map() {
        let reducer = TermsFacetReducer::new(&ReducerSettings {
            max_recycled_maps: 2,
            max_recycled_capacity: 1_000,
        });
        let shards = || {
            vec![
                facet(ComparatorType::Count, 2, &[(1.0, 5), (2.0, 3)], 1, 10),
                facet(ComparatorType::Count, 2, &[(1.0, 2), (3.0, 4)], 0, 8),
            ]
        };
        let first = reducer.reduce(shards()).unwrap();
        assert_eq!(reducer.recycler().num_idle(), 1);
        let second = reducer.reduce(shards()).unwrap();
        assert_eq!(first, second);
        assert_eq!(reducer.recycler().num_idle(), 1);
    }

    #[test]
    fn test_reducer_fails_before_checking_out_a_map() {
        let reducer = TermsFacetReducer::default();
        let shard_a = facet(ComparatorType::Count, 2, &[(1.0, 5)], 0, 5);
        let shard_b = facet(ComparatorType::ReverseTerm, 2, &[(1.0, 2)], 0, 2);
        assert!(reducer.reduce(vec![shard_a, shard_b]).is_err());
        assert_eq!(reducer.recycler().num_idle(), 0);
    }

    #[test]
    fn test_reducer_is_shareable_across_threads() {
        let reducer = TermsFacetReducer::default();
        std::thread::scope(|scope| {
            for thread_id in 0..4u64 {
                let reducer = &reducer;
                scope.spawn(move || {
                    for _ in 0..50 {
                        let shards = vec![
                            facet(ComparatorType::Count, 1, &[(1.0, thread_id)], 0, thread_id),
                            facet(ComparatorType::Count, 1, &[(1.0, 1)], 0, 1),
                        ];
                        let reduced = reducer.reduce(shards).unwrap();
                        assert_eq!(reduced.entries(), &[TermEntry::new(1.0, thread_id + 1)]);
                    }
                });
            }
        });
    }

    fn shard_facets() -> impl Strategy<Value = Vec<InternalTermsFacet<i64>>> {
        let shard = (
            proptest::collection::vec((-20i64..20, 1u64..10), 0..30),
            0u64..5,
            0u64..5,
        )
            .prop_map(|(pairs, missing, extra)| {
                // one entry per term within a shard, as a shard would compute it
                let mut pairs = pairs;
                pairs.sort_by_key(|(term, _)| *term);
                pairs.dedup_by_key(|(term, _)| *term);
                let total = pairs.iter().map(|(_, count)| count).sum::<u64>() + extra;
                InternalTermsFacet::new(
                    "score",
                    ComparatorType::Count,
                    5,
                    pairs.into_iter().map(TermEntry::from).collect(),
                    missing,
                    total,
                )
            });
        proptest::collection::vec(shard, 2..8)
    }

    proptest! {
        #[test]
        fn test_reduce_keeps_top_counts(shards in shard_facets()) {
            let mut expected_counts = std::collections::BTreeMap::new();
            for shard in &shards {
                for entry in shard {
                    *expected_counts.entry(entry.term()).or_insert(0u64) += entry.count();
                }
            }
            let expected_total: u64 = shards.iter().map(|shard| shard.total_count()).sum();
            let reduced = reduce(shards).unwrap();

            let mut expected: Vec<TermEntry<i64>> = expected_counts
                .into_iter()
                .map(TermEntry::from)
                .collect();
            expected.sort_by(|left, right| ComparatorType::Count.compare(left, right));
            expected.truncate(5);

            prop_assert!(reduced.entries().len() <= 5);
            prop_assert_eq!(reduced.entries(), &expected[..]);
            prop_assert_eq!(reduced.total_count(), expected_total);
            let kept: u64 = expected.iter().map(|entry| entry.count()).sum();
            prop_assert_eq!(reduced.other_count(), expected_total - kept);
        }
    }
}
