//! File-backed block store.
//!
//! [`FileBlockStore`] handles all direct file operations for the database
//! file: reading and writing blocks, extending the file, and closing it.

use std::fs::{self, File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use log::info;

use crate::common::config::BLOCK_SIZE;

use super::block_store::BlockStore;
use super::error::{StoreError, StoreResult};
use super::page::Block;

/// Block I/O for a single database file.
///
/// # File Layout
/// Blocks are laid out sequentially:
/// ```text
/// ┌─────────┬─────────┬─────────┬─────────┬─────────┐
/// │ Block 0 │ Block 1 │ Block 2 │  ...    │ Block N │
/// │ (4KB)   │ (4KB)   │ (4KB)   │         │ (4KB)   │
/// └─────────┴─────────┴─────────┴─────────┴─────────┘
/// Offset:  0      4096     8192    ...    N×4096
/// ```
///
/// A trailing partial block (a file whose size is not a multiple of
/// `BLOCK_SIZE`) does not count towards the length.
///
/// # Durability
/// Writes go to the OS page cache; `sync` and `close` call `fsync()`.
#[derive(Debug)]
pub struct FileBlockStore {
    file: Option<File>,
    path: PathBuf,
    /// Number of whole blocks in the file.
    block_count: u64,
}

impl FileBlockStore {
    /// Create a new, empty database file.
    ///
    /// # Errors
    /// Returns an error if the file already exists or cannot be created.
    pub fn create<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create_new(true)
            .open(path)?;

        info!("created database file {}", path.display());
        Ok(Self {
            file: Some(file),
            path: path.to_path_buf(),
            block_count: 0,
        })
    }

    /// Open an existing database file for reading and writing.
    ///
    /// # Errors
    /// Returns an error if the file doesn't exist or cannot be opened.
    pub fn open<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new().read(true).write(true).open(path)?;
        let block_count = file.metadata()?.len() / BLOCK_SIZE as u64;

        info!(
            "opened database file {} ({} blocks)",
            path.display(),
            block_count
        );
        Ok(Self {
            file: Some(file),
            path: path.to_path_buf(),
            block_count,
        })
    }

    /// Open the database file, creating it first if it doesn't exist.
    pub fn open_or_create<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        if path.as_ref().exists() {
            Self::open(path)
        } else {
            Self::create(path)
        }
    }

    /// Remove a database file from the file system.
    pub fn delete<P: AsRef<Path>>(path: P) -> StoreResult<()> {
        fs::remove_file(path.as_ref())?;
        info!("deleted database file {}", path.as_ref().display());
        Ok(())
    }

    /// Path of the underlying file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the file is still open.
    pub fn is_open(&self) -> bool {
        self.file.is_some()
    }

    fn file_mut(&mut self) -> StoreResult<&mut File> {
        self.file.as_mut().ok_or(StoreError::FileNotOpen)
    }

    fn offset(index: u64) -> u64 {
        index * BLOCK_SIZE as u64
    }
}

impl BlockStore for FileBlockStore {
    fn length(&self) -> StoreResult<u64> {
        if self.file.is_none() {
            return Err(StoreError::FileNotOpen);
        }
        Ok(self.block_count)
    }

    fn read_block(&mut self, index: u64, block: &mut Block) -> StoreResult<()> {
        let length = self.block_count;
        let file = self.file_mut()?;
        if index >= length {
            return Err(StoreError::BlockOutOfRange { index, length });
        }

        file.seek(SeekFrom::Start(Self::offset(index)))?;
        file.read_exact(block)?;
        Ok(())
    }

    fn write_block(&mut self, index: u64, block: &Block) -> StoreResult<()> {
        let length = self.block_count;
        let file = self.file_mut()?;
        if index > length {
            return Err(StoreError::NonContiguousWrite { index, length });
        }

        file.seek(SeekFrom::Start(Self::offset(index)))?;
        file.write_all(block)?;

        if index == length {
            self.block_count += 1;
        }
        Ok(())
    }

    fn sync(&mut self) -> StoreResult<()> {
        self.file_mut()?.sync_all()?;
        Ok(())
    }

    fn close(&mut self) -> StoreResult<()> {
        let file = self.file.take().ok_or(StoreError::FileNotOpen)?;
        file.sync_all()?;
        info!("closed database file {}", self.path.display());
        Ok(())
    }
}
