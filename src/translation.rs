use std::fmt;

use log::{debug, trace};

use crate::backing_store::BackingStore;
use crate::config::Config;
use crate::constants::*;
use crate::error::{Error, Result};
use crate::memory::FramePool;
use crate::page_table::PageTable;
use crate::replacement::Replacer;
use crate::stats::{Stats, Summary};
use crate::tlb::Tlb;

/// Represents the decomposed components of a logical address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VirtualAddress {
    pub va: u16,
    pub page: u8,
    pub offset: u8,
}

impl VirtualAddress {
    /// Decompose a raw VA into page number and offset
    pub fn from_raw(va: u16) -> Self {
        let page = ((va >> PAGE_SHIFT) & PAGE_MASK) as u8;
        let offset = (va & OFFSET_MASK) as u8;

        VirtualAddress { va, page, offset }
    }

    /// Parse one decimal address from input line `line` (1-based)
    pub fn parse(line: usize, text: &str) -> Result<Self> {
        let invalid = || Error::InvalidAddress {
            line,
            content: text.to_string(),
        };

        let raw: u32 = text.trim().parse().map_err(|_| invalid())?;
        if raw > MAX_VIRTUAL_ADDRESS {
            return Err(invalid());
        }
        Ok(Self::from_raw(raw as u16))
    }

    /// Physical address of this offset within `frame`
    #[inline]
    pub fn physical(&self, frame: usize) -> u32 {
        ((frame as u32) << PAGE_SHIFT) | self.offset as u32
    }
}

impl fmt::Display for VirtualAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "VA({}) = (page={}, offset={})",
            self.va, self.page, self.offset
        )
    }
}

/// How an address was resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    TlbHit,
    /// TLB miss, page resident
    PageHit,
    /// TLB miss, page loaded from the backing store.
    /// `evicted` is the page that previously owned the frame.
    PageFault { evicted: Option<u8> },
}

impl Access {
    #[inline]
    pub fn is_fault(&self) -> bool {
        matches!(self, Access::PageFault { .. })
    }
}

/// Result of translating one address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Translation {
    pub address: VirtualAddress,
    pub access: Access,
    /// Slot hit on a TLB hit, slot written on a miss
    pub tlb_slot: usize,
    pub frame: usize,
    pub physical: u32,
    pub value: i8,
}

impl fmt::Display for Translation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Virtual address: {} TLB: {} Physical address: {} Value: {}",
            self.address.va, self.tlb_slot, self.physical, self.value
        )
    }
}

/// Owns every piece of simulated memory state and translates addresses
/// one at a time.
pub struct Translator<B> {
    config: Config,
    frames: FramePool,
    page_table: PageTable,
    tlb: Tlb,
    replacer: Replacer,
    store: B,
    stats: Stats,
}

impl<B: BackingStore> Translator<B> {
    pub fn new(config: Config, store: B) -> Result<Self> {
        config.validate()?;
        debug!(
            "translator: policy={} frames={} tlb={} invalidate_tlb={}",
            config.policy, config.frames, config.tlb_entries, config.invalidate_tlb
        );

        Ok(Translator {
            config,
            frames: FramePool::new(config.frames),
            page_table: PageTable::new(config.frames),
            tlb: Tlb::new(config.tlb_entries),
            replacer: Replacer::new(config.policy),
            store,
            stats: Stats::default(),
        })
    }

    /// Translate a single address, loading its page on a fault.
    ///
    /// Backing store failures are returned as-is and leave the simulated
    /// state unchanged.
    pub fn translate(&mut self, address: VirtualAddress) -> Result<Translation> {
        let page = address.page;

        let (access, tlb_slot, frame) = match self.tlb.lookup(page) {
            Some((slot, frame)) => {
                self.stats.tlb_hits += 1;
                (Access::TlbHit, slot, frame)
            }
            None => {
                let (access, frame) = match self.page_table.lookup(page) {
                    Some(frame) => (Access::PageHit, frame),
                    None => {
                        let (frame, evicted) = self.handle_page_fault(page)?;
                        (Access::PageFault { evicted }, frame)
                    }
                };
                let slot = self.tlb.insert(page, frame);
                (access, slot, frame)
            }
        };

        self.replacer.record_access(&mut self.frames, frame);

        let translation = Translation {
            address,
            access,
            tlb_slot,
            frame,
            physical: address.physical(frame),
            value: self.frames.read(frame, address.offset),
        };
        self.stats.translated += 1;

        trace!("{} -> {:?} frame {}", address, access, frame);
        Ok(translation)
    }

    fn handle_page_fault(&mut self, page: u8) -> Result<(usize, Option<u8>)> {
        // a failed load must leave counters and victim selection untouched
        let bytes = self.store.load(page)?;
        let victim = self.replacer.select_victim(&self.frames);
        self.stats.page_faults += 1;

        let evicted = self.page_table.map(page, victim);
        if let Some(old) = evicted {
            debug!("page {} evicted from frame {} for page {}", old, victim, page);
            if self.config.invalidate_tlb {
                self.tlb.invalidate_page(old);
            }
        }
        self.frames.write(victim, &bytes);

        Ok((victim, evicted))
    }

    /// Translate every address in order, stopping at the first error
    pub fn translate_all<I>(&mut self, addresses: I) -> Result<Vec<Translation>>
    where
        I: IntoIterator<Item = VirtualAddress>,
    {
        addresses
            .into_iter()
            .map(|address| self.translate(address))
            .collect()
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    /// Final rates; `EmptyInput` if nothing was translated
    pub fn summary(&self) -> Result<Summary> {
        self.stats.summary()
    }

    pub fn page_table(&self) -> &PageTable {
        &self.page_table
    }

    pub fn tlb(&self) -> &Tlb {
        &self.tlb
    }
}
