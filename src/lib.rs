//! pagecache - a block-backed buffer pool manager with pluggable page
//! replacement policies.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │            upper layers (records, queries - not here)           │
//! └─────────────────────────────────────────────────────────────────┘
//!                  request / fix / unfix / update / write
//!                                 ↓
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  Buffer Pool (buffer/)                                          │
//! │   BufferPoolManager ── PageTable ── BufferPool (frames)         │
//! │            │                                                    │
//! │            └── Replacer: Random | FIFO | LRU  (fixed at build)  │
//! └─────────────────────────────────────────────────────────────────┘
//!                    read_block / write_block / length
//!                                 ↓
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  Storage (storage/)                                             │
//! │   BlockStore: FileBlockStore | MemoryBlockStore                 │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//! - [`common`] - Shared primitives (PageNo, SlotId, Error, config)
//! - [`buffer`] - Buffer pool management and replacement policies
//! - [`storage`] - Block I/O and the page format
//!
//! # Quick Start
//! ```no_run
//! use pagecache::{BufferPoolConfig, BufferPoolManager, PageNo};
//!
//! let config = BufferPoolConfig::default().with_policy_name("lru").unwrap();
//! let mut bpm = BufferPoolManager::open(&config).unwrap();
//!
//! let page = bpm.request(PageNo::new(0)).unwrap();
//! page.as_mut_slice()[0] = 0xE5;
//! bpm.update(PageNo::new(0)).unwrap();
//!
//! bpm.close().unwrap();
//! ```

pub mod buffer;
pub mod common;
pub mod storage;

pub use common::config::{BufferPoolConfig, BLOCKS_PER_PAGE, BLOCK_SIZE, PAGE_SIZE};
pub use common::{Error, PageNo, Result, SlotId};

pub use buffer::replacer::{ReplacementPolicy, Replacer};
pub use buffer::{BufferPoolManager, BufferPoolStats, SharedBufferPool, StatsSnapshot};
pub use storage::{Block, BlockStore, FileBlockStore, MemoryBlockStore, Page, StoreError};
