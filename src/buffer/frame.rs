//! Frame - a slot in the buffer pool.
//!
//! A [`Frame`] holds a [`Page`] plus the state the manager needs:
//! - Which page is loaded (if any)
//! - Whether the page is fixed (pinned)
//! - Whether the page is dirty

use crate::common::PageNo;
use crate::storage::Page;

/// One slot of the buffer pool.
///
/// # States
/// ```text
///   empty ──install──▶ occupied ──fix──▶ fixed
///     ▲                 │  ▲               │
///     │              update └────unfix─────┘
///     │                 ▼
///     └───(eviction)── dirty
/// ```
/// A frame only goes back to empty as part of eviction, when it is
/// immediately reused for another page.
///
/// Fixing is a flag, not a count: fixing twice and unfixing once leaves
/// the frame unfixed.
pub struct Frame {
    page: Box<Page>,
    page_no: Option<PageNo>,
    fixed: bool,
    dirty: bool,
}

impl Frame {
    /// Create a new empty frame.
    pub fn new() -> Self {
        Self {
            page: Page::boxed(),
            page_no: None,
            fixed: false,
            dirty: false,
        }
    }

    #[inline]
    pub fn page(&self) -> &Page {
        &self.page
    }

    #[inline]
    pub fn page_mut(&mut self) -> &mut Page {
        &mut self.page
    }

    /// Page currently held, or `None` if the frame is empty.
    #[inline]
    pub fn page_no(&self) -> Option<PageNo> {
        self.page_no
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.page_no.is_none()
    }

    #[inline]
    pub fn is_occupied(&self) -> bool {
        self.page_no.is_some()
    }

    #[inline]
    pub fn is_fixed(&self) -> bool {
        self.fixed
    }

    #[inline]
    pub fn fix(&mut self) {
        self.fixed = true;
    }

    #[inline]
    pub fn unfix(&mut self) {
        self.fixed = false;
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    #[inline]
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    #[inline]
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    /// Occupied and not fixed: a candidate victim.
    #[inline]
    pub fn is_evictable(&self) -> bool {
        self.is_occupied() && !self.fixed
    }

    /// Load `page` as page `page_no`, clean and unfixed.
    ///
    /// Returns the buffer previously held by the frame.
    pub fn install(&mut self, page_no: PageNo, page: Box<Page>) -> Box<Page> {
        self.page_no = Some(page_no);
        self.fixed = false;
        self.dirty = false;
        std::mem::replace(&mut self.page, page)
    }

    /// Reset the frame to the empty state with a zeroed page.
    pub fn reset(&mut self) {
        self.page.reset();
        self.page_no = None;
        self.fixed = false;
        self.dirty = false;
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Frame")
            .field("page_no", &self.page_no)
            .field("fixed", &self.fixed)
            .field("dirty", &self.dirty)
            .finish()
    }
}
