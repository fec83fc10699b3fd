//! In-memory block store with fault injection.

use crate::common::config::BLOCK_SIZE;

use super::block_store::BlockStore;
use super::error::{StoreError, StoreResult};
use super::page::Block;

/// A [`BlockStore`] kept entirely in memory.
///
/// Follows the same rules as the file store (contiguous extension,
/// out-of-range reads fail, closed store rejects everything). Reads and
/// writes can be made to fail on demand, which lets callers exercise their
/// error paths.
#[derive(Debug, Default)]
pub struct MemoryBlockStore {
    blocks: Vec<Box<Block>>,
    closed: bool,
    fail_reads: bool,
    fail_writes: bool,
    reads: u64,
    writes: u64,
}

impl MemoryBlockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `count` zeroed blocks.
    pub fn with_blocks(count: u64) -> Self {
        let mut store = Self::new();
        store.blocks = (0..count).map(|_| Box::new([0u8; BLOCK_SIZE])).collect();
        store
    }

    /// Make every subsequent read fail (or succeed again).
    pub fn set_fail_reads(&mut self, fail: bool) {
        self.fail_reads = fail;
    }

    /// Make every subsequent write fail (or succeed again).
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Borrow a stored block directly, bypassing the read counter.
    pub fn block(&self, index: u64) -> Option<&Block> {
        self.blocks.get(index as usize).map(|b| &**b)
    }

    /// Successful block reads so far.
    pub fn read_count(&self) -> u64 {
        self.reads
    }

    /// Successful block writes so far.
    pub fn write_count(&self) -> u64 {
        self.writes
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn check_open(&self) -> StoreResult<()> {
        if self.closed {
            Err(StoreError::FileNotOpen)
        } else {
            Ok(())
        }
    }
}

impl BlockStore for MemoryBlockStore {
    fn length(&self) -> StoreResult<u64> {
        self.check_open()?;
        Ok(self.blocks.len() as u64)
    }

    fn read_block(&mut self, index: u64, block: &mut Block) -> StoreResult<()> {
        self.check_open()?;
        if self.fail_reads {
            return Err(StoreError::Injected { op: "read" });
        }
        let length = self.blocks.len() as u64;
        let stored = self
            .blocks
            .get(index as usize)
            .ok_or(StoreError::BlockOutOfRange { index, length })?;

        block.copy_from_slice(&stored[..]);
        self.reads += 1;
        Ok(())
    }

    fn write_block(&mut self, index: u64, block: &Block) -> StoreResult<()> {
        self.check_open()?;
        if self.fail_writes {
            return Err(StoreError::Injected { op: "write" });
        }
        let length = self.blocks.len() as u64;
        match index.cmp(&length) {
            std::cmp::Ordering::Less => self.blocks[index as usize].copy_from_slice(block),
            std::cmp::Ordering::Equal => self.blocks.push(Box::new(*block)),
            std::cmp::Ordering::Greater => {
                return Err(StoreError::NonContiguousWrite { index, length })
            }
        }
        self.writes += 1;
        Ok(())
    }

    fn close(&mut self) -> StoreResult<()> {
        self.check_open()?;
        self.closed = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_blocks() {
        let store = MemoryBlockStore::with_blocks(3);
        assert_eq!(store.length().unwrap(), 3);
        assert_eq!(store.block(2).unwrap()[0], 0);
        assert!(store.block(3).is_none());
    }

    #[test]
    fn test_write_extend_and_read() {
        let mut store = MemoryBlockStore::new();
        store.write_block(0, &[9u8; BLOCK_SIZE]).unwrap();
        assert_eq!(store.length().unwrap(), 1);

        let mut block = [0u8; BLOCK_SIZE];
        store.read_block(0, &mut block).unwrap();
        assert_eq!(block[BLOCK_SIZE - 1], 9);
        assert_eq!(store.read_count(), 1);
        assert_eq!(store.write_count(), 1);
    }

    #[test]
    fn test_gap_and_out_of_range() {
        let mut store = MemoryBlockStore::new();
        assert!(matches!(
            store.write_block(1, &[0u8; BLOCK_SIZE]),
            Err(StoreError::NonContiguousWrite { index: 1, length: 0 })
        ));

        let mut block = [0u8; BLOCK_SIZE];
        assert!(matches!(
            store.read_block(0, &mut block),
            Err(StoreError::BlockOutOfRange { index: 0, length: 0 })
        ));
    }

    #[test]
    fn test_injected_failures() {
        let mut store = MemoryBlockStore::with_blocks(1);
        store.set_fail_writes(true);
        assert!(matches!(
            store.write_block(0, &[1u8; BLOCK_SIZE]),
            Err(StoreError::Injected { op: "write" })
        ));
        assert_eq!(store.block(0).unwrap()[0], 0);

        store.set_fail_reads(true);
        let mut block = [0u8; BLOCK_SIZE];
        assert!(matches!(
            store.read_block(0, &mut block),
            Err(StoreError::Injected { op: "read" })
        ));

        store.set_fail_writes(false);
        store.write_block(0, &[1u8; BLOCK_SIZE]).unwrap();
        assert_eq!(store.block(0).unwrap()[0], 1);
    }

    #[test]
    fn test_close() {
        let mut store = MemoryBlockStore::new();
        store.close().unwrap();
        assert!(store.is_closed());
        assert!(matches!(store.length(), Err(StoreError::FileNotOpen)));
        assert!(matches!(store.close(), Err(StoreError::FileNotOpen)));
    }
}
