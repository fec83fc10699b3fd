//! Random replacement policy.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::buffer::BufferPool;
use crate::common::{Error, Result, SlotId};

use super::{ReplacementPolicy, Replacer};

/// Evicts a page chosen uniformly among the unfixed resident pages.
///
/// The candidate set is recomputed on every call, so fixed and empty
/// frames are never returned.
#[derive(Debug)]
pub struct RandomReplacer {
    rng: StdRng,
}

impl RandomReplacer {
    /// A replacer seeded from the operating system.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// A reproducible replacer.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomReplacer {
    fn default() -> Self {
        Self::new()
    }
}

impl Replacer for RandomReplacer {
    fn policy(&self) -> ReplacementPolicy {
        ReplacementPolicy::Random
    }

    fn notify_load(&mut self, _slot: SlotId) {}

    fn notify_access(&mut self, _slot: SlotId) {}

    fn select_victim(&mut self, pool: &BufferPool) -> Result<SlotId> {
        let candidates: Vec<SlotId> = pool.evictable_slots().collect();
        if candidates.is_empty() {
            return Err(Error::NoVictimAvailable);
        }
        Ok(candidates[self.rng.random_range(0..candidates.len())])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::replacer::test_util::full_pool;
    use std::collections::HashSet;

    #[test]
    fn test_random_only_picks_unfixed() {
        let mut pool = full_pool(8);
        for i in [0, 2, 3, 5, 7] {
            pool.get_mut(SlotId::new(i)).fix();
        }
        let allowed: HashSet<SlotId> = [1, 4, 6].into_iter().map(SlotId::new).collect();

        let mut replacer = RandomReplacer::with_seed(42);
        let mut seen = HashSet::new();
        for _ in 0..200 {
            let victim = replacer.select_victim(&pool).unwrap();
            assert!(allowed.contains(&victim), "picked {victim}");
            seen.insert(victim);
        }
        // 200 draws over 3 candidates reach all of them
        assert_eq!(seen, allowed);
    }

    #[test]
    fn test_random_never_picks_empty() {
        let mut pool = full_pool(3);
        pool.get_mut(SlotId::new(0)).reset();
        pool.get_mut(SlotId::new(2)).reset();

        let mut replacer = RandomReplacer::with_seed(7);
        for _ in 0..50 {
            assert_eq!(replacer.select_victim(&pool).unwrap(), SlotId::new(1));
        }
    }

    #[test]
    fn test_random_all_fixed() {
        let mut pool = full_pool(2);
        pool.get_mut(SlotId::new(0)).fix();
        pool.get_mut(SlotId::new(1)).fix();

        let mut replacer = RandomReplacer::new();
        assert!(matches!(
            replacer.select_victim(&pool),
            Err(Error::NoVictimAvailable)
        ));
    }

    #[test]
    fn test_same_seed_same_choices() {
        let pool = full_pool(16);
        let mut a = RandomReplacer::with_seed(3);
        let mut b = RandomReplacer::with_seed(3);
        for _ in 0..20 {
            assert_eq!(
                a.select_victim(&pool).unwrap(),
                b.select_victim(&pool).unwrap()
            );
        }
    }
}
