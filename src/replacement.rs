//! Victim frame selection.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::memory::FramePool;

/// Replacement policy selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Policy {
    #[default]
    Fifo,
    Lru,
}

impl FromStr for Policy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "fifo" => Ok(Policy::Fifo),
            "lru" => Ok(Policy::Lru),
            _ => Err(Error::UnknownPolicy(s.to_string())),
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Policy::Fifo => f.write_str("fifo"),
            Policy::Lru => f.write_str("lru"),
        }
    }
}

/// Replacement state, chosen once from a `Policy`.
///
/// Both variants only pick frames; the caller owns page table updates.
#[derive(Debug, Clone)]
pub enum Replacer {
    /// Rotating cursor over frame numbers
    Fifo { next: usize },
    /// Logical clock stamped onto frames on every access
    Lru { clock: u64 },
}

impl Replacer {
    pub fn new(policy: Policy) -> Self {
        match policy {
            Policy::Fifo => Replacer::Fifo { next: 0 },
            Policy::Lru => Replacer::Lru { clock: 0 },
        }
    }

    /// Pick the frame to (re)use for an incoming page
    pub fn select_victim(&mut self, frames: &FramePool) -> usize {
        match self {
            Replacer::Fifo { next } => {
                if *next >= frames.len() {
                    *next = 0;
                }
                let victim = *next;
                *next += 1;
                victim
            }
            // min_by_key keeps the first minimum, i.e. the lowest frame number
            Replacer::Lru { .. } => frames
                .stamps()
                .min_by_key(|&(_, stamp)| stamp)
                .map(|(frame, _)| frame)
                .unwrap_or(0),
        }
    }

    /// Note that `frame` was just resolved by a translation
    pub fn record_access(&mut self, frames: &mut FramePool, frame: usize) {
        match self {
            Replacer::Fifo { .. } => {}
            Replacer::Lru { clock } => {
                *clock += 1;
                frames.touch(frame, *clock);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_parse() {
        assert_eq!("fifo".parse::<Policy>().unwrap(), Policy::Fifo);
        assert_eq!("LRU".parse::<Policy>().unwrap(), Policy::Lru);
        match "clock".parse::<Policy>() {
            Err(Error::UnknownPolicy(name)) => assert_eq!(name, "clock"),
            other => panic!("expected UnknownPolicy, got {:?}", other),
        }
        assert_eq!(Policy::Lru.to_string(), "lru");
        assert_eq!(Policy::default(), Policy::Fifo);
    }

    #[test]
    fn test_fifo_rotates() {
        let frames = FramePool::new(3);
        let mut r = Replacer::new(Policy::Fifo);
        let picks: Vec<_> = (0..7).map(|_| r.select_victim(&frames)).collect();
        assert_eq!(picks, vec![0, 1, 2, 0, 1, 2, 0]);
    }

    #[test]
    fn test_fifo_ignores_access_pattern() {
        let mut frames = FramePool::new(3);
        let mut r = Replacer::new(Policy::Fifo);
        assert_eq!(r.select_victim(&frames), 0);
        r.record_access(&mut frames, 0);
        r.record_access(&mut frames, 0);
        assert_eq!(frames.stamp(0), 0);
        assert_eq!(r.select_victim(&frames), 1);
    }

    #[test]
    fn test_lru_picks_lowest_frame_on_tie() {
        let frames = FramePool::new(4);
        let mut r = Replacer::new(Policy::Lru);
        assert_eq!(r.select_victim(&frames), 0);
    }

    #[test]
    fn test_lru_fills_then_evicts_least_recent() {
        let mut frames = FramePool::new(3);
        let mut r = Replacer::new(Policy::Lru);

        for expected in 0..3 {
            let v = r.select_victim(&frames);
            assert_eq!(v, expected);
            r.record_access(&mut frames, v);
        }

        // retouch frame 0; frame 1 is now least recently used
        r.record_access(&mut frames, 0);
        assert_eq!(r.select_victim(&frames), 1);

        r.record_access(&mut frames, 1);
        assert_eq!(r.select_victim(&frames), 2);
    }

    #[test]
    fn test_lru_is_deterministic() {
        let run = || {
            let mut frames = FramePool::new(4);
            let mut r = Replacer::new(Policy::Lru);
            let mut picks = Vec::new();
            for access in [0usize, 1, 2, 3, 1, 0, 3] {
                r.record_access(&mut frames, access);
                picks.push(r.select_victim(&frames));
            }
            picks
        };
        assert_eq!(run(), run());
    }
}
