//! Block store errors.

use thiserror::Error;

/// Convenient Result alias for block store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Failures reported by a [`BlockStore`](super::BlockStore).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The store has been closed.
    #[error("file is not open")]
    FileNotOpen,

    /// Read of a block at or past the end of the file.
    #[error("block {index} out of range (length {length})")]
    BlockOutOfRange { index: u64, length: u64 },

    /// Write that would leave a gap after the current end of the file.
    #[error("write to block {index} would leave a gap (length {length})")]
    NonContiguousWrite { index: u64, length: u64 },

    /// Failure injected by a test store.
    #[error("injected {op} failure")]
    Injected { op: &'static str },
}
