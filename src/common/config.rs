//! Configuration for the page cache.
//!
//! Compile-time geometry (block and page sizes) lives here as constants.
//! Runtime knobs (pool size, replacement policy, database path) are grouped
//! in [`BufferPoolConfig`].

use std::path::PathBuf;

use crate::buffer::replacer::ReplacementPolicy;
use crate::common::Result;

/// Size of a block in bytes (4KB).
///
/// A block is the unit of I/O with the backing store. Every file uses the
/// same block size.
pub const BLOCK_SIZE: usize = 4096;

/// Number of blocks that make up one page.
///
/// Page `p` occupies blocks `[p * BLOCKS_PER_PAGE, (p + 1) * BLOCKS_PER_PAGE)`.
pub const BLOCKS_PER_PAGE: usize = 1;

/// Size of a page in bytes.
pub const PAGE_SIZE: usize = BLOCK_SIZE * BLOCKS_PER_PAGE;

/// Default number of frames in the buffer pool.
pub const DEFAULT_POOL_SIZE: usize = 128;

/// Well-known name of the database file.
pub const DEFAULT_DB_FILE: &str = "simple.db";

/// Runtime configuration for a [`BufferPoolManager`](crate::BufferPoolManager).
///
/// # Example
/// ```
/// use pagecache::{BufferPoolConfig, ReplacementPolicy};
///
/// let config = BufferPoolConfig::default()
///     .with_pool_size(16)
///     .with_policy_name("lru")
///     .unwrap();
/// assert_eq!(config.policy, ReplacementPolicy::Lru);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferPoolConfig {
    /// Number of frames in the pool.
    pub pool_size: usize,
    /// Victim selection strategy.
    pub policy: ReplacementPolicy,
    /// Location of the database file.
    pub db_path: PathBuf,
    /// Seed for the random policy. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl BufferPoolConfig {
    pub fn with_pool_size(mut self, pool_size: usize) -> Self {
        self.pool_size = pool_size;
        self
    }

    pub fn with_policy(mut self, policy: ReplacementPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Select the policy by name (`"random"`, `"fifo"`, `"lru"`).
    ///
    /// # Errors
    /// Returns `Error::UnsupportedPolicy` for any other name.
    pub fn with_policy_name(self, name: &str) -> Result<Self> {
        let policy = name.parse()?;
        Ok(self.with_policy(policy))
    }

    pub fn with_db_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.db_path = path.into();
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Default for BufferPoolConfig {
    fn default() -> Self {
        Self {
            pool_size: DEFAULT_POOL_SIZE,
            policy: ReplacementPolicy::default(),
            db_path: PathBuf::from(DEFAULT_DB_FILE),
            seed: None,
        }
    }
}
