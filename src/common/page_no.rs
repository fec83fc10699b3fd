//! Page number type.

use std::fmt;

use crate::common::config::BLOCKS_PER_PAGE;

/// Logical number of a page in the database file.
///
/// Page `p` is stored in blocks `[p * BLOCKS_PER_PAGE, (p + 1) * BLOCKS_PER_PAGE)`.
/// Every value is valid, including 0; absence is expressed with `Option`.
///
/// # Example
/// ```
/// use pagecache::PageNo;
///
/// let page_no = PageNo::new(42);
/// assert_eq!(page_no.0, 42);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageNo(pub u32);

impl PageNo {
    #[inline]
    pub fn new(no: u32) -> Self {
        PageNo(no)
    }

    /// Index of the first block this page occupies.
    #[inline]
    pub fn first_block(self) -> u64 {
        self.0 as u64 * BLOCKS_PER_PAGE as u64
    }

    /// One past the index of the last block this page occupies.
    #[inline]
    pub fn end_block(self) -> u64 {
        self.first_block() + BLOCKS_PER_PAGE as u64
    }
}

impl From<u32> for PageNo {
    fn from(no: u32) -> Self {
        PageNo(no)
    }
}

impl fmt::Display for PageNo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Page({})", self.0)
    }
}
