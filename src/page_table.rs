use log::debug;

use crate::constants::NUM_PAGES;

/// Single-level page table mapping page numbers to frame numbers.
///
/// Keeps a frame -> page back-reference so that reassigning a frame
/// invalidates the previous owner without scanning every entry.
pub struct PageTable {
    entries: [Option<usize>; NUM_PAGES],
    owners: Vec<Option<u8>>,
}

impl PageTable {
    /// Create an empty table for a pool of `frames` frames
    pub fn new(frames: usize) -> Self {
        PageTable {
            entries: [None; NUM_PAGES],
            owners: vec![None; frames],
        }
    }

    /// Frame currently holding `page`, if any
    #[inline]
    pub fn lookup(&self, page: u8) -> Option<usize> {
        self.entries[page as usize]
    }

    /// Page currently mapped to `frame`, if any
    #[inline]
    pub fn owner(&self, frame: usize) -> Option<u8> {
        self.owners[frame]
    }

    /// Map `page` to `frame`.
    ///
    /// Any other page mapped to `frame` is set to unmapped first. Returns the
    /// page that lost its mapping.
    pub fn map(&mut self, page: u8, frame: usize) -> Option<u8> {
        let evicted = self.owners[frame].filter(|&prev| prev != page);
        if let Some(prev) = evicted {
            debug!("unmapping page {} from frame {}", prev, frame);
            self.entries[prev as usize] = None;
        }

        // a page never owns two frames
        if let Some(old_frame) = self.entries[page as usize] {
            if old_frame != frame {
                self.owners[old_frame] = None;
            }
        }

        self.entries[page as usize] = Some(frame);
        self.owners[frame] = Some(page);
        evicted
    }

    /// Number of mapped pages
    pub fn mapped_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_some()).count()
    }
}
