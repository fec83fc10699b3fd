//! Buffer pool - the fixed array of frames.

use crate::buffer::Frame;
use crate::common::{Error, Result, SlotId};

/// Fixed-capacity sequence of frames.
///
/// The capacity is set at construction and never changes. The pool only
/// stores frames and answers questions about them; it never decides which
/// frame to evict.
///
/// # Panics
/// Indexing methods panic on a slot outside `0..capacity()`. Slots handed
/// out by the pool itself are always in range.
#[derive(Debug)]
pub struct BufferPool {
    frames: Vec<Frame>,
}

impl BufferPool {
    /// Create a pool of `capacity` empty frames.
    ///
    /// # Errors
    /// Returns `Error::EmptyPool` if `capacity` is 0.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::EmptyPool);
        }
        let frames = (0..capacity).map(|_| Frame::new()).collect();
        Ok(Self { frames })
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn get(&self, slot: SlotId) -> &Frame {
        &self.frames[slot.0]
    }

    #[inline]
    pub fn get_mut(&mut self, slot: SlotId) -> &mut Frame {
        &mut self.frames[slot.0]
    }

    /// Replace the frame at `slot`, returning the previous one.
    pub fn set(&mut self, slot: SlotId, frame: Frame) -> Frame {
        std::mem::replace(&mut self.frames[slot.0], frame)
    }

    /// Lowest-numbered empty slot, if any.
    pub fn first_empty(&self) -> Option<SlotId> {
        self.frames
            .iter()
            .position(Frame::is_empty)
            .map(SlotId::new)
    }

    /// Slots holding a page that is not fixed, in slot order.
    pub fn evictable_slots(&self) -> impl Iterator<Item = SlotId> + '_ {
        self.iter()
            .filter(|(_, frame)| frame.is_evictable())
            .map(|(slot, _)| slot)
    }

    /// All frames with their slot, in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (SlotId, &Frame)> {
        self.frames
            .iter()
            .enumerate()
            .map(|(i, frame)| (SlotId::new(i), frame))
    }

    pub fn occupied_count(&self) -> usize {
        self.frames.iter().filter(|f| f.is_occupied()).count()
    }

    pub fn is_full(&self) -> bool {
        self.occupied_count() == self.capacity()
    }
}
