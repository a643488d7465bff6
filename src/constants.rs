pub const PAGE_NUMBER_BITS: u32 = 8;
pub const OFFSET_BITS: u32 = 8;

pub const PAGE_SIZE: usize = 1 << OFFSET_BITS;
pub const FRAME_SIZE: usize = PAGE_SIZE;
pub const NUM_PAGES: usize = 1 << PAGE_NUMBER_BITS;

// physical memory is half the virtual space, so replacement kicks in
pub const NUM_FRAMES: usize = 128;
pub const TLB_ENTRIES: usize = 16;

pub const OFFSET_MASK: u16 = (1 << OFFSET_BITS) - 1;
pub const PAGE_MASK: u16 = (1 << PAGE_NUMBER_BITS) - 1;
pub const PAGE_SHIFT: u32 = OFFSET_BITS;

pub const MAX_VIRTUAL_ADDRESS: u32 = (1 << (PAGE_NUMBER_BITS + OFFSET_BITS)) - 1;

pub const DEFAULT_BACKING_STORE: &str = "BACKING_STORE.bin";
