//! Storage layer - block I/O and the page format.
//!
//! - [`BlockStore`] - The block I/O interface the buffer pool consumes
//! - [`FileBlockStore`] - Block store over a single database file
//! - [`MemoryBlockStore`] - In-memory block store with fault injection
//! - [`Page`] / [`Block`] - Units of caching and of I/O

mod block_store;
mod error;
mod file_store;
mod memory_store;
mod page;

pub use block_store::BlockStore;
pub use error::{StoreError, StoreResult};
pub use file_store::FileBlockStore;
pub use memory_store::MemoryBlockStore;
pub use page::{Block, Page};
