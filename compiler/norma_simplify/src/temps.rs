//! Temporary allocator.
//!
//! Hands out `Name::Temp(1)`, `Name::Temp(2)`, ... in allocation order.
//! One allocator belongs to one pass; numbers are unique within it and
//! cannot collide with source names because they live in a separate
//! variant of [`Name`].

use norma_ir::Name;

#[derive(Debug, Default)]
pub(crate) struct TempAllocator {
    last: u32,
}

impl TempAllocator {
    pub(crate) fn new() -> Self {
        TempAllocator::default()
    }

    /// Next unused temporary.
    pub(crate) fn fresh(&mut self) -> Name {
        self.last += 1;
        Name::Temp(self.last)
    }

    /// How many temporaries have been handed out.
    pub(crate) fn allocated(&self) -> u32 {
        self.last
    }
}
