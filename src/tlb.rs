use log::trace;

use crate::constants::TLB_ENTRIES;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TlbEntry {
    pub page: u8,
    pub frame: usize,
}

/// Fully associative translation cache.
///
/// Slots are filled through a circular write cursor, so replacement is
/// strict FIFO over slots regardless of the frame replacement policy.
pub struct Tlb {
    slots: Vec<Option<TlbEntry>>,
    cursor: usize,
}

impl Tlb {
    /// # Panics
    ///
    /// Panics if `entries` is zero.
    pub fn new(entries: usize) -> Self {
        assert!(entries > 0, "tlb needs at least one slot");
        Tlb {
            slots: vec![None; entries],
            cursor: 0,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Look up `page`, returning the matching slot index and frame
    pub fn lookup(&self, page: u8) -> Option<(usize, usize)> {
        self.slots.iter().enumerate().find_map(|(slot, entry)| match entry {
            Some(e) if e.page == page => Some((slot, e.frame)),
            _ => None,
        })
    }

    /// Slot the next insert will overwrite
    #[inline]
    pub fn next_slot(&self) -> usize {
        self.cursor
    }

    /// Write `(page, frame)` into the slot under the cursor and advance it.
    /// Returns the slot written.
    pub fn insert(&mut self, page: u8, frame: usize) -> usize {
        let slot = self.cursor;
        if let Some(old) = self.slots[slot] {
            trace!("tlb slot {} overwrites page {}", slot, old.page);
        }
        self.slots[slot] = Some(TlbEntry { page, frame });
        self.cursor = (self.cursor + 1) % self.slots.len();
        slot
    }

    /// Clear every slot caching `page`. The write cursor does not move.
    pub fn invalidate_page(&mut self, page: u8) -> usize {
        let mut cleared = 0;
        for slot in self.slots.iter_mut() {
            if matches!(slot, Some(e) if e.page == page) {
                *slot = None;
                cleared += 1;
            }
        }
        cleared
    }

    pub fn entry(&self, slot: usize) -> Option<TlbEntry> {
        self.slots[slot]
    }
}

impl Default for Tlb {
    fn default() -> Self {
        Self::new(TLB_ENTRIES)
    }
}
