//! Replacement policies (replacers).
//!
//! A replacer picks the victim slot when the pool is full and a new page
//! must be loaded. It is told about every load and every access, and keeps
//! whatever per-slot bookkeeping it needs.
//!
//! Implemented policies:
//! - [`RandomReplacer`] - uniform choice among unfixed pages
//! - [`FifoReplacer`] - earliest loaded unfixed page
//! - [`LruReplacer`] - least recently accessed unfixed page
//!
//! The policy is chosen once, when the manager is built. Switching later
//! would discard the bookkeeping of the pages already resident.

mod fifo;
mod lru;
mod random;

use std::fmt;
use std::str::FromStr;

pub use fifo::FifoReplacer;
pub use lru::LruReplacer;
pub use random::RandomReplacer;

use crate::buffer::BufferPool;
use crate::common::{Error, Result, SlotId};

/// Victim selection strategy.
///
/// Implementations must only return slots whose frame is occupied and not
/// fixed. The manager consults the replacer only when the pool has no
/// empty frame.
pub trait Replacer: Send + fmt::Debug {
    /// The policy this replacer implements.
    fn policy(&self) -> ReplacementPolicy;

    /// A page was installed into `slot`.
    fn notify_load(&mut self, slot: SlotId);

    /// A request was served from `slot` (hit, or miss followed by install).
    fn notify_access(&mut self, slot: SlotId);

    /// Choose the slot to evict.
    ///
    /// # Errors
    /// Returns `Error::NoVictimAvailable` if every occupied frame is fixed.
    fn select_victim(&mut self, pool: &BufferPool) -> Result<SlotId>;
}

/// The available replacement policies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ReplacementPolicy {
    #[default]
    Random,
    Fifo,
    Lru,
}

impl ReplacementPolicy {
    pub const ALL: [ReplacementPolicy; 3] = [
        ReplacementPolicy::Random,
        ReplacementPolicy::Fifo,
        ReplacementPolicy::Lru,
    ];

    /// Build a replacer for a pool of `capacity` slots.
    ///
    /// `seed` makes the random policy reproducible; other policies ignore it.
    pub fn build(self, capacity: usize, seed: Option<u64>) -> Box<dyn Replacer> {
        match self {
            ReplacementPolicy::Random => Box::new(match seed {
                Some(seed) => RandomReplacer::with_seed(seed),
                None => RandomReplacer::new(),
            }),
            ReplacementPolicy::Fifo => Box::new(FifoReplacer::new(capacity)),
            ReplacementPolicy::Lru => Box::new(LruReplacer::new(capacity)),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ReplacementPolicy::Random => "random",
            ReplacementPolicy::Fifo => "fifo",
            ReplacementPolicy::Lru => "lru",
        }
    }
}

impl FromStr for ReplacementPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        ReplacementPolicy::ALL
            .into_iter()
            .find(|policy| policy.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnsupportedPolicy(s.to_string()))
    }
}

impl fmt::Display for ReplacementPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-slot logical timestamps, shared by the FIFO and LRU replacers.
///
/// Stamps come from a counter that increases by one on every `stamp`, so
/// later events always compare greater. Slots never stamped read as 0.
#[derive(Debug, Default)]
pub(crate) struct SlotStamps {
    clock: u64,
    stamps: Vec<u64>,
}

impl SlotStamps {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            clock: 0,
            stamps: vec![0; capacity],
        }
    }

    pub(crate) fn stamp(&mut self, slot: SlotId) {
        self.clock += 1;
        if slot.0 >= self.stamps.len() {
            self.stamps.resize(slot.0 + 1, 0);
        }
        self.stamps[slot.0] = self.clock;
    }

    pub(crate) fn get(&self, slot: SlotId) -> u64 {
        self.stamps.get(slot.0).copied().unwrap_or(0)
    }

    /// Evictable slot with the smallest stamp; ties go to the lowest slot.
    pub(crate) fn oldest_evictable(&self, pool: &BufferPool) -> Result<SlotId> {
        pool.evictable_slots()
            .min_by_key(|&slot| (self.get(slot), slot))
            .ok_or(Error::NoVictimAvailable)
    }
}

#[cfg(test)]
pub(crate) mod test_util {
    use crate::buffer::BufferPool;
    use crate::common::{PageNo, SlotId};
    use crate::storage::Page;

    /// A pool of `capacity` frames, all occupied, slot `i` holding page `i`.
    pub(crate) fn full_pool(capacity: usize) -> BufferPool {
        let mut pool = BufferPool::new(capacity).unwrap();
        for i in 0..capacity {
            pool.get_mut(SlotId::new(i))
                .install(PageNo::new(i as u32), Page::boxed());
        }
        pool
    }
}
