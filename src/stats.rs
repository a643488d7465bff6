use crate::error::{Error, Result};

/// Running counters for one simulation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub translated: u64,
    pub page_faults: u64,
    pub tlb_hits: u64,
}

impl Stats {
    /// Compute rates; fails on an empty run instead of dividing by zero
    pub fn summary(&self) -> Result<Summary> {
        if self.translated == 0 {
            return Err(Error::EmptyInput);
        }
        let total = self.translated as f64;
        Ok(Summary {
            stats: *self,
            page_fault_rate: self.page_faults as f64 / total,
            tlb_hit_rate: self.tlb_hits as f64 / total,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub stats: Stats,
    pub page_fault_rate: f64,
    pub tlb_hit_rate: f64,
}
