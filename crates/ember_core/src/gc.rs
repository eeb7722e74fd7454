//! Handles into the collected heap and the scratch pool.

/// Handle to a heap-allocated value cell.
///
/// The generation is bumped every time the slot is reclaimed, so a handle that
/// outlived its cell no longer resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId {
    pub index: u32,
    pub generation: u32,
}

impl ObjectId {
    #[inline]
    pub fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    #[inline]
    pub fn slot(&self) -> usize {
        self.index as usize
    }
}

/// Handle to a cell in the scope-bound scratch pool.
///
/// `serial` is unique per allocation, so a handle from a scope that has since
/// been unwound does not alias whatever reuses the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScratchId {
    pub index: u32,
    pub serial: u32,
}

impl ScratchId {
    #[inline]
    pub fn new(index: u32, serial: u32) -> Self {
        Self { index, serial }
    }

    #[inline]
    pub fn slot(&self) -> usize {
        self.index as usize
    }
}
