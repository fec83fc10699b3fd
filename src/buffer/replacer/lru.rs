//! LRU (Least Recently Used) replacement policy.

use crate::buffer::BufferPool;
use crate::common::{Result, SlotId};

use super::{ReplacementPolicy, Replacer, SlotStamps};

/// Evicts the page whose last access is oldest.
///
/// Both the initial load and every later hit count as an access.
#[derive(Debug, Default)]
pub struct LruReplacer {
    touched_at: SlotStamps,
}

impl LruReplacer {
    pub fn new(capacity: usize) -> Self {
        Self {
            touched_at: SlotStamps::new(capacity),
        }
    }
}

impl Replacer for LruReplacer {
    fn policy(&self) -> ReplacementPolicy {
        ReplacementPolicy::Lru
    }

    fn notify_load(&mut self, slot: SlotId) {
        self.touched_at.stamp(slot);
    }

    fn notify_access(&mut self, slot: SlotId) {
        self.touched_at.stamp(slot);
    }

    fn select_victim(&mut self, pool: &BufferPool) -> Result<SlotId> {
        self.touched_at.oldest_evictable(pool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::replacer::test_util::full_pool;
    use crate::common::Error;

    fn s(n: usize) -> SlotId {
        SlotId::new(n)
    }

    #[test]
    fn test_lru_evicts_least_recent() {
        let pool = full_pool(3);
        let mut replacer = LruReplacer::new(3);
        for i in 0..3 {
            replacer.notify_load(s(i));
        }

        replacer.notify_access(s(0));
        assert_eq!(replacer.select_victim(&pool).unwrap(), s(1));

        replacer.notify_access(s(1));
        assert_eq!(replacer.select_victim(&pool).unwrap(), s(2));
    }

    #[test]
    fn test_lru_skips_fixed() {
        let mut pool = full_pool(3);
        let mut replacer = LruReplacer::new(3);
        for i in 0..3 {
            replacer.notify_load(s(i));
        }

        pool.get_mut(s(0)).fix();
        pool.get_mut(s(1)).fix();
        assert_eq!(replacer.select_victim(&pool).unwrap(), s(2));

        pool.get_mut(s(2)).fix();
        assert!(matches!(
            replacer.select_victim(&pool),
            Err(Error::NoVictimAvailable)
        ));
    }

    #[test]
    fn test_lru_ignores_empty_frames() {
        let mut pool = full_pool(2);
        let mut replacer = LruReplacer::new(2);
        replacer.notify_load(s(0));
        replacer.notify_load(s(1));

        pool.get_mut(s(0)).reset();
        assert_eq!(replacer.select_victim(&pool).unwrap(), s(1));
    }
}
