//! Page - the fixed-size unit exchanged with upper layers.
//!
//! A [`Page`] is `BLOCKS_PER_PAGE` consecutive blocks. It is the unit of
//! caching; the [`Block`] is the unit of I/O with the backing store.

use crate::common::config::{BLOCKS_PER_PAGE, BLOCK_SIZE, PAGE_SIZE};

/// A block of raw bytes, the unit of I/O with a block store.
pub type Block = [u8; BLOCK_SIZE];

/// A page of data, stored as whole blocks.
///
/// # Memory Layout
/// - Size: `PAGE_SIZE` bytes
/// - Alignment: 4096 bytes, so each block starts on a 4KB boundary
///
/// Block `i` of the page covers bytes `[i * BLOCK_SIZE, (i + 1) * BLOCK_SIZE)`.
///
/// `Page` does not implement `Clone` outside of tests; copying a page should
/// be explicit.
///
/// # Example
/// ```
/// use pagecache::Page;
///
/// let mut page = Page::new();
/// page.as_mut_slice()[0] = 0xFF;
/// assert_eq!(page.as_slice()[0], 0xFF);
/// assert_eq!(page.block(0)[0], 0xFF);
/// ```
#[repr(C, align(4096))]
pub struct Page {
    blocks: [Block; BLOCKS_PER_PAGE],
}

impl Page {
    /// Create a new zeroed page.
    #[inline]
    pub fn new() -> Self {
        Self {
            blocks: [[0u8; BLOCK_SIZE]; BLOCKS_PER_PAGE],
        }
    }

    /// Create a new zeroed page on the heap.
    #[inline]
    pub fn boxed() -> Box<Self> {
        Box::new(Self::new())
    }

    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        self.blocks.as_flattened()
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        self.blocks.as_flattened_mut()
    }

    /// Borrow block `index` of this page.
    ///
    /// # Panics
    /// Panics if `index >= BLOCKS_PER_PAGE`.
    #[inline]
    pub fn block(&self, index: usize) -> &Block {
        &self.blocks[index]
    }

    /// Mutably borrow block `index` of this page.
    ///
    /// # Panics
    /// Panics if `index >= BLOCKS_PER_PAGE`.
    #[inline]
    pub fn block_mut(&mut self, index: usize) -> &mut Block {
        &mut self.blocks[index]
    }

    /// Iterate over the blocks of this page in order.
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter()
    }

    /// Zero out the entire page.
    pub fn reset(&mut self) {
        self.as_mut_slice().fill(0);
    }

    /// Copy the content of `other` into this page.
    pub fn copy_from(&mut self, other: &Page) {
        self.as_mut_slice().copy_from_slice(other.as_slice());
    }

    #[inline]
    pub const fn size() -> usize {
        PAGE_SIZE
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let used = self.as_slice().iter().filter(|&&b| b != 0).count();
        f.debug_struct("Page")
            .field("size", &PAGE_SIZE)
            .field("non_zero_bytes", &used)
            .finish()
    }
}

#[cfg(test)]
impl Clone for Page {
    fn clone(&self) -> Self {
        let mut new_page = Page::new();
        new_page.copy_from(self);
        new_page
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_size_and_alignment() {
        assert_eq!(std::mem::size_of::<Page>(), PAGE_SIZE);
        assert_eq!(std::mem::align_of::<Page>(), 4096);
        assert_eq!(Page::size(), PAGE_SIZE);
    }

    #[test]
    fn test_page_new_is_zeroed() {
        let page = Page::new();
        assert!(page.as_slice().iter().all(|&b| b == 0));
        assert_eq!(page.as_slice().len(), PAGE_SIZE);
    }

    #[test]
    fn test_blocks_cover_page() {
        let mut page = Page::new();
        let last = BLOCKS_PER_PAGE - 1;
        page.block_mut(last)[BLOCK_SIZE - 1] = 0xCD;
        page.block_mut(0)[0] = 0xAB;

        assert_eq!(page.as_slice()[0], 0xAB);
        assert_eq!(page.as_slice()[PAGE_SIZE - 1], 0xCD);
        assert_eq!(page.blocks().count(), BLOCKS_PER_PAGE);
    }

    #[test]
    fn test_page_reset() {
        let mut page = Page::new();
        page.as_mut_slice()[0] = 0xFF;
        page.as_mut_slice()[100] = 0xAB;

        page.reset();

        assert_eq!(page.as_slice()[0], 0);
        assert_eq!(page.as_slice()[100], 0);
    }

    #[test]
    fn test_copy_from() {
        let mut src = Page::new();
        src.as_mut_slice()[7] = 0x11;

        let mut dst = Page::boxed();
        dst.copy_from(&src);
        assert_eq!(dst.as_slice()[7], 0x11);
        assert_eq!(dst.clone().as_slice()[7], 0x11);
    }
}
