//! The block store interface consumed by the buffer pool.

use super::error::StoreResult;
use super::page::Block;

/// Fixed-size block I/O over a single file.
///
/// Blocks are numbered from 0. A store is `length()` blocks long; reads
/// must stay below the length, and a write may extend the store only by
/// targeting block `length()`.
///
/// Implementations are synchronous and blocking. Once `close` has
/// succeeded every other operation fails with `StoreError::FileNotOpen`.
pub trait BlockStore {
    /// Number of whole blocks currently in the store.
    fn length(&self) -> StoreResult<u64>;

    /// Read block `index` into `block`.
    fn read_block(&mut self, index: u64, block: &mut Block) -> StoreResult<()>;

    /// Write exactly one block at `index`.
    fn write_block(&mut self, index: u64, block: &Block) -> StoreResult<()>;

    /// Make previous writes durable.
    fn sync(&mut self) -> StoreResult<()> {
        Ok(())
    }

    /// Release the underlying file.
    fn close(&mut self) -> StoreResult<()>;
}

impl<S: BlockStore + ?Sized> BlockStore for Box<S> {
    fn length(&self) -> StoreResult<u64> {
        (**self).length()
    }

    fn read_block(&mut self, index: u64, block: &mut Block) -> StoreResult<()> {
        (**self).read_block(index, block)
    }

    fn write_block(&mut self, index: u64, block: &Block) -> StoreResult<()> {
        (**self).write_block(index, block)
    }

    fn sync(&mut self) -> StoreResult<()> {
        (**self).sync()
    }

    fn close(&mut self) -> StoreResult<()> {
        (**self).close()
    }
}
