//! Buffer Pool Manager - the core page caching layer.
//!
//! The [`BufferPoolManager`] provides:
//! - Page caching between the block store and memory
//! - The fix/unfix protocol that keeps pages resident
//! - Dirty page tracking and write-back before reuse
//! - A replacement policy chosen at construction

use log::{debug, info, trace, warn};

use crate::buffer::replacer::{ReplacementPolicy, Replacer};
use crate::buffer::{BufferPool, BufferPoolStats, PageTable};
use crate::common::config::{BufferPoolConfig, BLOCKS_PER_PAGE, BLOCK_SIZE};
use crate::common::{Error, PageNo, Result, SlotId};
use crate::storage::{BlockStore, FileBlockStore, Page};

/// Caches fixed-size pages of a block store in a bounded pool of frames.
///
/// # Architecture
/// ```text
/// ┌─────────────────────────────────────────────────────────────┐
/// │                    BufferPoolManager                        │
/// │  ┌──────────────┐  ┌───────────────────────────────────┐   │
/// │  │ page_table   │  │      pool: BufferPool             │   │
/// │  │PageNo ⇄ Slot │─▶│  [Frame0] [Frame1] [Frame2] ...   │   │
/// │  └──────────────┘  └───────────────────────────────────┘   │
/// │  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐      │
/// │  │   replacer   │  │    store     │  │    stats     │      │
/// │  │ dyn Replacer │  │ BlockStore   │  │  counters    │      │
/// │  └──────────────┘  └──────────────┘  └──────────────┘      │
/// └─────────────────────────────────────────────────────────────┘
/// ```
///
/// # Ownership
/// The manager is single-threaded: every operation takes `&mut self`, and
/// the page returned by [`request`](Self::request) borrows the manager, so
/// no page reference can outlive a call that might evict it. Wrap the
/// manager in a [`SharedBufferPool`](crate::SharedBufferPool) to share it
/// between threads.
///
/// Fixing a page keeps it resident across calls; the replacer never picks
/// a fixed page.
///
/// # Usage
/// ```
/// use pagecache::{BufferPoolManager, MemoryBlockStore, PageNo, ReplacementPolicy};
///
/// let store = MemoryBlockStore::new();
/// let mut bpm = BufferPoolManager::new(4, ReplacementPolicy::Lru, store).unwrap();
///
/// let page = bpm.request(PageNo::new(0)).unwrap();
/// page.as_mut_slice()[0] = 0xAB;
/// bpm.update(PageNo::new(0)).unwrap();
///
/// bpm.flush_all().unwrap();
/// assert_eq!(bpm.store().block(0).unwrap()[0], 0xAB);
/// ```
pub struct BufferPoolManager<S: BlockStore = FileBlockStore> {
    pool: BufferPool,
    page_table: PageTable,
    replacer: Box<dyn Replacer>,
    store: S,
    stats: BufferPoolStats,
    closed: bool,
}

impl BufferPoolManager<FileBlockStore> {
    /// Open (or create) the database file named in `config` and build a
    /// manager over it.
    ///
    /// # Errors
    /// - `Error::EmptyPool` if `config.pool_size` is 0
    /// - `Error::BackingStore` if the file cannot be opened or created
    pub fn open(config: &BufferPoolConfig) -> Result<Self> {
        let store = FileBlockStore::open_or_create(&config.db_path)?;
        Self::from_config(config, store)
    }
}

impl<S: BlockStore> BufferPoolManager<S> {
    /// Create a manager with `pool_size` frames over `store`.
    ///
    /// # Errors
    /// Returns `Error::EmptyPool` if `pool_size` is 0.
    pub fn new(pool_size: usize, policy: ReplacementPolicy, store: S) -> Result<Self> {
        let replacer = policy.build(pool_size, None);
        Self::with_replacer(pool_size, replacer, store)
    }

    /// Create a manager from a configuration. `config.db_path` is ignored;
    /// the caller supplies the store.
    pub fn from_config(config: &BufferPoolConfig, store: S) -> Result<Self> {
        let replacer = config.policy.build(config.pool_size, config.seed);
        Self::with_replacer(config.pool_size, replacer, store)
    }

    /// Create a manager with a caller-supplied replacer.
    pub fn with_replacer(pool_size: usize, replacer: Box<dyn Replacer>, store: S) -> Result<Self> {
        let pool = BufferPool::new(pool_size)?;
        info!(
            "buffer pool ready: {} frames, {} policy",
            pool_size,
            replacer.policy()
        );

        Ok(Self {
            pool,
            page_table: PageTable::with_capacity(pool_size),
            replacer,
            store,
            stats: BufferPoolStats::new(),
            closed: false,
        })
    }

    // ========================================================================
    // Public API: request and the fix/update protocol
    // ========================================================================

    /// Return the page `page_no`, loading or creating it first if needed.
    ///
    /// A page below the current extent of the store is read from it; a page
    /// at or past the extent is created: the store is extended with zero
    /// blocks up to and including the page, and the page starts zeroed.
    ///
    /// The returned reference is only valid until the next call on the
    /// manager. Call [`update`](Self::update) after modifying the page.
    ///
    /// # Errors
    /// - `Error::NoVictimAvailable` if the pool is full and every page is fixed
    /// - `Error::BackingStore` if reading, extending or writing back a victim
    ///   fails; the pool and page table are then unchanged
    pub fn request(&mut self, page_no: PageNo) -> Result<&mut Page> {
        let slot = match self.page_table.lookup(page_no) {
            Some(slot) => {
                self.stats.record_hit();
                self.replacer.notify_access(slot);
                trace!("hit: {} in {}", page_no, slot);
                slot
            }
            None => {
                self.stats.record_miss();
                trace!("miss: {}", page_no);
                self.load(page_no)?
            }
        };
        Ok(self.pool.get_mut(slot).page_mut())
    }

    /// Mark page `page_no` as fixed: it will not be evicted until unfixed.
    ///
    /// Fixing a fixed page is a no-op; there is no fix count.
    pub fn fix(&mut self, page_no: PageNo) -> Result<()> {
        let slot = self.slot_of(page_no)?;
        self.pool.get_mut(slot).fix();
        Ok(())
    }

    /// Allow page `page_no` to be evicted again. Unfixing a page that is not
    /// fixed is a no-op.
    pub fn unfix(&mut self, page_no: PageNo) -> Result<()> {
        let slot = self.slot_of(page_no)?;
        self.pool.get_mut(slot).unfix();
        Ok(())
    }

    /// Mark page `page_no` as modified. It will be written back before its
    /// frame is reused. No I/O happens here.
    pub fn update(&mut self, page_no: PageNo) -> Result<()> {
        let slot = self.slot_of(page_no)?;
        self.pool.get_mut(slot).mark_dirty();
        Ok(())
    }

    /// Write page `page_no` to the store now, dirty or not.
    ///
    /// The page stays resident at the same address and is clean afterwards.
    ///
    /// # Errors
    /// - `Error::PageNotBuffered` if the page is not resident
    /// - `Error::BackingStore` if a block write fails; the page stays dirty
    pub fn write(&mut self, page_no: PageNo) -> Result<()> {
        let slot = self.slot_of(page_no)?;
        self.write_back(slot)
    }

    /// Write back every dirty page, then sync the store.
    ///
    /// Stops at the first failure; pages already written are clean.
    pub fn flush_all(&mut self) -> Result<()> {
        let dirty: Vec<SlotId> = self
            .pool
            .iter()
            .filter(|(_, frame)| frame.is_occupied() && frame.is_dirty())
            .map(|(slot, _)| slot)
            .collect();

        for &slot in &dirty {
            self.write_back(slot)?;
        }
        self.store.sync()?;

        debug!("flushed {} dirty pages", dirty.len());
        Ok(())
    }

    /// Flush every dirty page and close the store.
    pub fn close(mut self) -> Result<()> {
        self.closed = true;
        self.flush_all()?;
        self.store.close()?;
        info!("buffer pool closed: {}", self.stats.snapshot());
        Ok(())
    }

    // ========================================================================
    // Public API: Stats and info
    // ========================================================================

    pub fn stats(&self) -> &BufferPoolStats {
        &self.stats
    }

    pub fn reset_stats(&self) {
        self.stats.reset();
    }

    pub fn pool_size(&self) -> usize {
        self.pool.capacity()
    }

    pub fn policy(&self) -> ReplacementPolicy {
        self.replacer.policy()
    }

    /// Borrow a resident page without counting a request.
    pub fn page(&self, page_no: PageNo) -> Result<&Page> {
        let slot = self.slot_of(page_no)?;
        Ok(self.pool.get(slot).page())
    }

    pub fn is_buffered(&self, page_no: PageNo) -> bool {
        self.page_table.lookup(page_no).is_some()
    }

    /// Whether the page is fixed, or `None` if it is not resident.
    pub fn is_fixed(&self, page_no: PageNo) -> Option<bool> {
        let slot = self.page_table.lookup(page_no)?;
        Some(self.pool.get(slot).is_fixed())
    }

    /// Whether the page is dirty, or `None` if it is not resident.
    pub fn is_dirty(&self, page_no: PageNo) -> Option<bool> {
        let slot = self.page_table.lookup(page_no)?;
        Some(self.pool.get(slot).is_dirty())
    }

    /// Resident page numbers, in ascending order.
    pub fn buffered_pages(&self) -> Vec<PageNo> {
        let mut pages: Vec<PageNo> = self.page_table.iter().map(|(p, _)| p).collect();
        pages.sort_unstable();
        pages
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    // ========================================================================
    // Internal: miss handling
    // ========================================================================

    fn slot_of(&self, page_no: PageNo) -> Result<SlotId> {
        self.page_table
            .lookup(page_no)
            .ok_or(Error::PageNotBuffered(page_no))
    }

    /// Bring `page_no` into the pool and return its slot.
    ///
    /// All I/O happens before any pool or table state changes, so a failure
    /// leaves both as they were.
    fn load(&mut self, page_no: PageNo) -> Result<SlotId> {
        let slot = self.acquire_slot()?;
        let page = self.read_or_create(page_no)?;

        let frame = self.pool.get(slot);
        if let Some(victim) = frame.page_no() {
            if frame.is_dirty() {
                self.write_back(slot)?;
            }
            self.stats.record_eviction();
            debug!("evicted {} from {} for {}", victim, slot, page_no);
        }

        self.page_table.insert(page_no, slot)?;
        self.pool.get_mut(slot).install(page_no, page);
        self.replacer.notify_load(slot);
        self.replacer.notify_access(slot);
        Ok(slot)
    }

    /// An empty slot if there is one, otherwise the replacer's victim.
    fn acquire_slot(&mut self) -> Result<SlotId> {
        if let Some(slot) = self.pool.first_empty() {
            return Ok(slot);
        }

        let victim = self.replacer.select_victim(&self.pool).inspect_err(|_| {
            warn!(
                "no victim available: all {} frames fixed",
                self.pool.capacity()
            )
        })?;
        debug_assert!(self.pool.get(victim).is_evictable());
        Ok(victim)
    }

    /// Read `page_no` from the store, or extend the store and return a
    /// zeroed page if it lies past the current extent.
    fn read_or_create(&mut self, page_no: PageNo) -> Result<Box<Page>> {
        let mut page = Page::boxed();
        let block_count = self.store.length()?;
        let extent = block_count / BLOCKS_PER_PAGE as u64;

        if u64::from(page_no.0) < extent {
            let first = page_no.first_block();
            for i in 0..BLOCKS_PER_PAGE {
                self.store.read_block(first + i as u64, page.block_mut(i))?;
            }
            self.stats.record_page_read();
        } else {
            self.extend(block_count, page_no.end_block())?;
        }
        Ok(page)
    }

    /// Append zero blocks from `from` up to (excluding) `to`.
    fn extend(&mut self, from: u64, to: u64) -> Result<()> {
        let zero = [0u8; BLOCK_SIZE];
        for index in from..to {
            self.store.write_block(index, &zero)?;
        }
        info!("extended store from {} to {} blocks", from, to);
        Ok(())
    }

    /// Write the page in `slot` to its blocks and mark it clean.
    fn write_back(&mut self, slot: SlotId) -> Result<()> {
        let frame = self.pool.get(slot);
        let Some(page_no) = frame.page_no() else {
            return Ok(());
        };

        let first = page_no.first_block();
        for (i, block) in frame.page().blocks().enumerate() {
            self.store.write_block(first + i as u64, block)?;
        }

        self.pool.get_mut(slot).clear_dirty();
        self.stats.record_page_written();
        debug!("wrote back {} from {}", page_no, slot);
        Ok(())
    }
}

impl<S: BlockStore> Drop for BufferPoolManager<S> {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        if let Err(e) = self.flush_all() {
            warn!("failed to flush buffer pool on drop: {}", e);
        }
    }
}

impl<S: BlockStore> std::fmt::Debug for BufferPoolManager<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BufferPoolManager")
            .field("pool_size", &self.pool.capacity())
            .field("policy", &self.replacer.policy())
            .field("buffered", &self.page_table.len())
            .field("stats", &self.stats.snapshot())
            .finish()
    }
}
