//! FIFO (First-In-First-Out) replacement policy.

use crate::buffer::BufferPool;
use crate::common::{Result, SlotId};

use super::{ReplacementPolicy, Replacer, SlotStamps};

/// Evicts pages in the order they were loaded.
///
/// Only loads move a slot in the queue; hits do not. A fixed page keeps its
/// place, so once unfixed it is again the first candidate if it is still
/// the oldest.
#[derive(Debug, Default)]
pub struct FifoReplacer {
    loaded_at: SlotStamps,
}

impl FifoReplacer {
    pub fn new(capacity: usize) -> Self {
        Self {
            loaded_at: SlotStamps::new(capacity),
        }
    }
}

impl Replacer for FifoReplacer {
    fn policy(&self) -> ReplacementPolicy {
        ReplacementPolicy::Fifo
    }

    fn notify_load(&mut self, slot: SlotId) {
        self.loaded_at.stamp(slot);
    }

    fn notify_access(&mut self, _slot: SlotId) {}

    fn select_victim(&mut self, pool: &BufferPool) -> Result<SlotId> {
        self.loaded_at.oldest_evictable(pool)
    }
}
