//! Slot identifier type.

use std::fmt;

/// Index of a frame slot in the buffer pool.
///
/// Wraps a `usize` so it can index the frame vector directly:
/// `frames[slot.0]`. Slot 0 is an ordinary slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotId(pub usize);

impl SlotId {
    #[inline]
    pub fn new(id: usize) -> Self {
        SlotId(id)
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Slot({})", self.0)
    }
}
