//! Thread-safe wrapper around the buffer pool manager.

use parking_lot::{Mutex, MutexGuard};

use crate::buffer::{BufferPoolManager, StatsSnapshot};
use crate::common::{PageNo, Result};
use crate::storage::{BlockStore, FileBlockStore, Page};

/// A [`BufferPoolManager`] behind a single mutex.
///
/// Each call is one critical section covering the page table, the pool and
/// the replacer together, so no caller ever sees an eviction half done.
/// Page contents are only reachable inside the closures passed to
/// [`with_page`](Self::with_page) and [`with_page_mut`](Self::with_page_mut),
/// which run while the lock is held.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use std::thread;
/// use pagecache::{BufferPoolManager, MemoryBlockStore, PageNo, ReplacementPolicy, SharedBufferPool};
///
/// let bpm = BufferPoolManager::new(8, ReplacementPolicy::Lru, MemoryBlockStore::new()).unwrap();
/// let shared = Arc::new(SharedBufferPool::new(bpm));
///
/// let handles: Vec<_> = (0..4u32)
///     .map(|i| {
///         let shared = Arc::clone(&shared);
///         thread::spawn(move || {
///             shared.with_page_mut(PageNo::new(i), |page| page.as_mut_slice()[0] = i as u8).unwrap();
///         })
///     })
///     .collect();
/// for h in handles {
///     h.join().unwrap();
/// }
///
/// let byte = shared.with_page(PageNo::new(3), |page| page.as_slice()[0]).unwrap();
/// assert_eq!(byte, 3);
/// ```
pub struct SharedBufferPool<S: BlockStore = FileBlockStore> {
    inner: Mutex<BufferPoolManager<S>>,
}

impl<S: BlockStore> SharedBufferPool<S> {
    pub fn new(bpm: BufferPoolManager<S>) -> Self {
        Self {
            inner: Mutex::new(bpm),
        }
    }

    /// Request `page_no` and run `f` on it while holding the lock.
    pub fn with_page<R>(&self, page_no: PageNo, f: impl FnOnce(&Page) -> R) -> Result<R> {
        let mut bpm = self.inner.lock();
        let page = bpm.request(page_no)?;
        Ok(f(&*page))
    }

    /// Request `page_no`, run `f` on it and mark the page dirty.
    pub fn with_page_mut<R>(&self, page_no: PageNo, f: impl FnOnce(&mut Page) -> R) -> Result<R> {
        let mut bpm = self.inner.lock();
        let result = f(bpm.request(page_no)?);
        bpm.update(page_no)?;
        Ok(result)
    }

    pub fn fix(&self, page_no: PageNo) -> Result<()> {
        self.inner.lock().fix(page_no)
    }

    pub fn unfix(&self, page_no: PageNo) -> Result<()> {
        self.inner.lock().unfix(page_no)
    }

    pub fn update(&self, page_no: PageNo) -> Result<()> {
        self.inner.lock().update(page_no)
    }

    pub fn write(&self, page_no: PageNo) -> Result<()> {
        self.inner.lock().write(page_no)
    }

    pub fn flush_all(&self) -> Result<()> {
        self.inner.lock().flush_all()
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.inner.lock().stats().snapshot()
    }

    pub fn reset_stats(&self) {
        self.inner.lock().reset_stats();
    }

    /// Hold the lock across several operations.
    pub fn lock(&self) -> MutexGuard<'_, BufferPoolManager<S>> {
        self.inner.lock()
    }

    pub fn into_inner(self) -> BufferPoolManager<S> {
        self.inner.into_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::replacer::ReplacementPolicy;
    use crate::storage::MemoryBlockStore;
    use std::sync::Arc;
    use std::thread;

    fn shared(pool_size: usize) -> SharedBufferPool<MemoryBlockStore> {
        let bpm =
            BufferPoolManager::new(pool_size, ReplacementPolicy::Lru, MemoryBlockStore::new())
                .unwrap();
        SharedBufferPool::new(bpm)
    }

    #[test]
    fn test_with_page_mut_marks_dirty() {
        let pool = shared(2);
        pool.with_page_mut(PageNo::new(0), |page| page.as_mut_slice()[0] = 5)
            .unwrap();

        assert_eq!(pool.lock().is_dirty(PageNo::new(0)), Some(true));
        pool.flush_all().unwrap();
        assert_eq!(pool.lock().is_dirty(PageNo::new(0)), Some(false));
    }

    #[test]
    fn test_concurrent_writers_with_eviction() {
        let pool = Arc::new(shared(3));
        let mut handles = vec![];

        for t in 0..4u32 {
            let pool = Arc::clone(&pool);
            handles.push(thread::spawn(move || {
                for round in 0..25u32 {
                    let page_no = PageNo::new(t * 10 + round % 5);
                    pool.with_page_mut(page_no, |page| {
                        page.as_mut_slice()[0] = (t * 10 + round % 5) as u8;
                    })
                    .unwrap();
                }
            }));
        }
        for h in handles {
            h.join().unwrap();
        }

        // every page written survived eviction cycles
        for t in 0..4u32 {
            for k in 0..5u32 {
                let n = t * 10 + k;
                let byte = pool.with_page(PageNo::new(n), |page| page.as_slice()[0]).unwrap();
                assert_eq!(byte, n as u8);
            }
        }
    }

    #[test]
    fn test_stats_through_wrapper() {
        let pool = shared(2);
        pool.with_page(PageNo::new(1), |_| ()).unwrap();
        pool.with_page(PageNo::new(1), |_| ()).unwrap();

        let stats = pool.stats();
        assert_eq!(stats.cache_misses, 1);
        assert_eq!(stats.cache_hits, 1);

        pool.reset_stats();
        assert_eq!(pool.stats().requests(), 0);
    }

    #[test]
    fn test_fix_through_wrapper() {
        let pool = shared(1);
        pool.with_page(PageNo::new(0), |_| ()).unwrap();
        pool.fix(PageNo::new(0)).unwrap();

        assert!(pool.with_page(PageNo::new(1), |_| ()).is_err());

        pool.unfix(PageNo::new(0)).unwrap();
        pool.with_page(PageNo::new(1), |_| ()).unwrap();

        let bpm = pool.into_inner();
        assert_eq!(bpm.buffered_pages(), vec![PageNo::new(1)]);
    }
}
