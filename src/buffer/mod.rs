//! Buffer pool management.
//!
//! The buffer pool is the in-memory cache between upper layers and the
//! block store. It manages a fixed pool of frames, each holding one page.
//!
//! # Components
//! - [`BufferPoolManager`] - The page cache façade
//! - [`SharedBufferPool`] - The manager behind one mutex, for threads
//! - [`PageTable`] - Page number ⇄ slot mapping
//! - [`BufferPool`] / [`Frame`] - Frame storage and per-frame state
//! - [`BufferPoolStats`] - Hit/miss and I/O counters
//! - [`replacer`] - Replacement policies

mod buffer_pool_manager;
mod frame;
mod page_table;
mod pool;
pub mod replacer;
mod shared;
mod stats;

pub use buffer_pool_manager::BufferPoolManager;
pub use frame::Frame;
pub use page_table::PageTable;
pub use pool::BufferPool;
pub use shared::SharedBufferPool;
pub use stats::{BufferPoolStats, StatsSnapshot};
