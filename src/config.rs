use crate::constants::{NUM_FRAMES, NUM_PAGES, TLB_ENTRIES};
use crate::error::{Error, Result};
use crate::replacement::Policy;

/// Simulation parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub policy: Policy,
    pub frames: usize,
    pub tlb_entries: usize,
    /// Clear TLB slots for a page when its frame is reassigned.
    /// Off by default, which leaves stale TLB entries in place.
    pub invalidate_tlb: bool,
}

impl Config {
    pub fn with_policy(policy: Policy) -> Self {
        Config {
            policy,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.frames == 0 || self.frames > NUM_PAGES {
            return Err(Error::InvalidConfig("frame count must be between 1 and 256"));
        }
        if self.tlb_entries == 0 {
            return Err(Error::InvalidConfig("tlb must have at least one entry"));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            policy: Policy::Fifo,
            frames: NUM_FRAMES,
            tlb_entries: TLB_ENTRIES,
            invalidate_tlb: false,
        }
    }
}
