use std::mem;
use std::ops::{Deref, DerefMut};

use crossbeam_queue::ArrayQueue;
use log::trace;
use rustc_hash::FxHashMap;

use crate::ReducerSettings;

/// Aggregated count per term, keyed on [`TermKey::to_u64`](super::TermKey::to_u64).
pub type TermCountMap = FxHashMap<u64, u64>;

/// Pool of scratch maps used to aggregate term counts during a reduction.
///
/// A map is checked out with [`ScratchMapRecycler::acquire`] and handed back
/// when the returned [`LeasedScratchMap`] is dropped, whatever the exit path of
/// the reduction. Two concurrent reductions never share a map.
#[derive(Debug)]
pub struct ScratchMapRecycler {
    // `None` when recycling is disabled.
    queue: Option<ArrayQueue<TermCountMap>>,
    max_recycled_capacity: usize,
}

impl ScratchMapRecycler {
    /// Creates a recycler keeping at most `max_recycled_maps` idle maps,
    /// each holding room for at most `max_recycled_capacity` terms.
    pub fn new(max_recycled_maps: usize, max_recycled_capacity: usize) -> ScratchMapRecycler {
        let queue = if max_recycled_maps == 0 {
            None
        } else {
            Some(ArrayQueue::new(max_recycled_maps))
        };
        ScratchMapRecycler {
            queue,
            max_recycled_capacity,
        }
    }

    pub fn from_settings(settings: &ReducerSettings) -> ScratchMapRecycler {
        ScratchMapRecycler::new(settings.max_recycled_maps, settings.max_recycled_capacity)
    }

    /// A recycler that never keeps anything.
    pub fn disabled() -> ScratchMapRecycler {
        ScratchMapRecycler::new(0, 0)
    }

    /// Checks out an empty map, recycled if one is available.
    pub fn acquire(&self) -> LeasedScratchMap<'_> {
        let map = self
            .queue
            .as_ref()
            .and_then(ArrayQueue::pop)
            .unwrap_or_default();
        LeasedScratchMap {
            map,
            recycler: Some(self),
        }
    }

    /// Number of idle maps waiting to be reused.
    pub fn num_idle(&self) -> usize {
        self.queue.as_ref().map(ArrayQueue::len).unwrap_or(0)
    }

    fn recycle(&self, mut map: TermCountMap) {
        let Some(queue) = self.queue.as_ref() else {
            return;
        };
        if map.capacity() > self.max_recycled_capacity {
            trace!(
                "releasing scratch map with capacity {} (max {})",
                map.capacity(),
                self.max_recycled_capacity
            );
            return;
        }
        map.clear();
        if queue.push(map).is_err() {
            trace!("scratch map pool is full, releasing map");
        }
    }
}

impl Default for ScratchMapRecycler {
    fn default() -> ScratchMapRecycler {
        ScratchMapRecycler::from_settings(&ReducerSettings::default())
    }
}

/// A scratch map checked out of a [`ScratchMapRecycler`].
///
/// The map is cleared and returned to its recycler on drop.
#[derive(Debug)]
pub struct LeasedScratchMap<'a> {
    map: TermCountMap,
    recycler: Option<&'a ScratchMapRecycler>,
}

impl LeasedScratchMap<'static> {
    /// A fresh map that does not belong to any recycler.
    pub fn detached() -> LeasedScratchMap<'static> {
        LeasedScratchMap {
            map: TermCountMap::default(),
            recycler: None,
        }
    }
}

impl<'a> Deref for LeasedScratchMap<'a> {
    type Target = TermCountMap;

    fn deref(&self) -> &TermCountMap {
        &self.map
    }
}

impl<'a> DerefMut for LeasedScratchMap<'a> {
    fn deref_mut(&mut self) -> &mut TermCountMap {
        &mut self.map
    }
}

impl<'a> Drop for LeasedScratchMap<'a> {
    fn drop(&mut self) {
        if let Some(recycler) = self.recycler {
            recycler.recycle(mem::take(&mut self.map));
        }
    }
}
