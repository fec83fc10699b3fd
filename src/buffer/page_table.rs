//! Page table - which page lives in which slot.

use std::collections::HashMap;

use crate::common::{Error, PageNo, Result, SlotId};

/// Bidirectional mapping between page numbers and pool slots.
///
/// A page number is present iff the frame at its slot currently holds that
/// page. Lookups return `Option`, so page 0 and slot 0 need no special
/// casing.
#[derive(Debug, Default)]
pub struct PageTable {
    slots_by_page: HashMap<PageNo, SlotId>,
    pages_by_slot: HashMap<SlotId, PageNo>,
}

impl PageTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots_by_page: HashMap::with_capacity(capacity),
            pages_by_slot: HashMap::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn lookup(&self, page_no: PageNo) -> Option<SlotId> {
        self.slots_by_page.get(&page_no).copied()
    }

    /// Page currently mapped to `slot`.
    #[inline]
    pub fn page_at(&self, slot: SlotId) -> Option<PageNo> {
        self.pages_by_slot.get(&slot).copied()
    }

    /// Map `page_no` to `slot`, dropping whatever page `slot` mapped before.
    ///
    /// Re-inserting an existing mapping is a no-op.
    ///
    /// # Errors
    /// Returns `Error::DuplicateMapping` if `page_no` is already mapped to a
    /// different slot. The table is unchanged in that case.
    pub fn insert(&mut self, page_no: PageNo, slot: SlotId) -> Result<()> {
        if let Some(existing) = self.lookup(page_no) {
            if existing == slot {
                return Ok(());
            }
            return Err(Error::DuplicateMapping {
                page: page_no,
                existing,
                requested: slot,
            });
        }

        if let Some(stale) = self.pages_by_slot.insert(slot, page_no) {
            self.slots_by_page.remove(&stale);
        }
        self.slots_by_page.insert(page_no, slot);
        Ok(())
    }

    /// Remove the mapping for `page_no`; no-op if absent.
    pub fn remove(&mut self, page_no: PageNo) -> Option<SlotId> {
        let slot = self.slots_by_page.remove(&page_no)?;
        self.pages_by_slot.remove(&slot);
        Some(slot)
    }

    pub fn len(&self) -> usize {
        self.slots_by_page.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots_by_page.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PageNo, SlotId)> + '_ {
        self.slots_by_page.iter().map(|(&p, &s)| (p, s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(n: u32) -> PageNo {
        PageNo::new(n)
    }

    fn s(n: usize) -> SlotId {
        SlotId::new(n)
    }

    #[test]
    fn test_page_zero_slot_zero() {
        let mut table = PageTable::new();
        assert_eq!(table.lookup(p(0)), None);

        table.insert(p(0), s(0)).unwrap();
        assert_eq!(table.lookup(p(0)), Some(s(0)));
        assert_eq!(table.page_at(s(0)), Some(p(0)));
    }

    #[test]
    fn test_insert_replaces_stale_slot_mapping() {
        let mut table = PageTable::new();
        table.insert(p(1), s(2)).unwrap();
        table.insert(p(9), s(2)).unwrap();

        assert_eq!(table.lookup(p(1)), None);
        assert_eq!(table.lookup(p(9)), Some(s(2)));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_duplicate_mapping_rejected() {
        let mut table = PageTable::new();
        table.insert(p(4), s(0)).unwrap();

        let err = table.insert(p(4), s(1)).unwrap_err();
        assert!(matches!(
            err,
            Error::DuplicateMapping { page, existing, requested }
                if page == p(4) && existing == s(0) && requested == s(1)
        ));
        assert_eq!(table.lookup(p(4)), Some(s(0)));
        assert_eq!(table.page_at(s(1)), None);
    }

    #[test]
    fn test_reinsert_same_mapping() {
        let mut table = PageTable::new();
        table.insert(p(4), s(3)).unwrap();
        table.insert(p(4), s(3)).unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_remove() {
        let mut table = PageTable::with_capacity(4);
        table.insert(p(3), s(1)).unwrap();

        assert_eq!(table.remove(p(3)), Some(s(1)));
        assert_eq!(table.page_at(s(1)), None);
        assert!(table.is_empty());

        // absent page: no-op
        assert_eq!(table.remove(p(3)), None);
    }

    #[test]
    fn test_iter() {
        let mut table = PageTable::new();
        table.insert(p(1), s(0)).unwrap();
        table.insert(p(2), s(1)).unwrap();

        let mut entries: Vec<_> = table.iter().collect();
        entries.sort();
        assert_eq!(entries, vec![(p(1), s(0)), (p(2), s(1))]);
    }
}
