use crate::constants::*;

/// One physical page frame
#[derive(Clone)]
pub struct Frame {
    data: Box<[u8; FRAME_SIZE]>,
    /// Logical tick of the last access, 0 if never touched
    stamp: u64,
}

impl Frame {
    fn new() -> Self {
        Frame {
            data: Box::new([0u8; FRAME_SIZE]),
            stamp: 0,
        }
    }
}

/// Fixed pool of physical frames, addressed by frame number.
///
/// Frames are allocated once and never added or removed; eviction only
/// overwrites a frame's contents and stamp.
pub struct FramePool {
    frames: Vec<Frame>,
}

impl FramePool {
    /// Create a pool of `count` zeroed frames
    pub fn new(count: usize) -> Self {
        FramePool {
            frames: vec![Frame::new(); count],
        }
    }

    /// Number of frames in the pool
    #[inline]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Read a byte from a frame as a signed value
    #[inline]
    pub fn read(&self, frame: usize, offset: u8) -> i8 {
        self.frames[frame].data[offset as usize] as i8
    }

    /// Overwrite the whole contents of a frame
    pub fn write(&mut self, frame: usize, bytes: &[u8; FRAME_SIZE]) {
        self.frames[frame].data.copy_from_slice(bytes);
    }

    /// Record an access to `frame` at logical time `tick`
    #[inline]
    pub fn touch(&mut self, frame: usize, tick: u64) {
        self.frames[frame].stamp = tick;
    }

    /// Tick of the last access to `frame`
    #[inline]
    pub fn stamp(&self, frame: usize) -> u64 {
        self.frames[frame].stamp
    }

    /// Iterate over `(frame_number, stamp)` in frame order
    pub fn stamps(&self) -> impl Iterator<Item = (usize, u64)> + '_ {
        self.frames.iter().enumerate().map(|(i, f)| (i, f.stamp))
    }
}

impl Default for FramePool {
    fn default() -> Self {
        Self::new(NUM_FRAMES)
    }
}
