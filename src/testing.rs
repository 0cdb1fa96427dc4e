//! Instrumented element types and allocators shared by the unit tests.

use core::alloc::Layout;
use core::cell::Cell;
use core::ptr::NonNull;
use std::rc::Rc;

use crate::alloc::{AllocError, Global, RawAllocator};

/// Counts how many [`Tracked`] values handed out by it have been dropped.
#[derive(Clone, Default)]
pub(crate) struct DropCounter(Rc<Cell<usize>>);

impl DropCounter {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn track(&self, value: i32) -> Tracked {
        Tracked {
            value,
            drops: self.0.clone(),
        }
    }

    pub(crate) fn drops(&self) -> usize {
        self.0.get()
    }
}

/// An element with drop glue that reports to its [`DropCounter`].
#[derive(Clone, Debug)]
pub(crate) struct Tracked {
    pub(crate) value: i32,
    drops: Rc<Cell<usize>>,
}

impl PartialEq for Tracked {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.drops.set(self.drops.get() + 1);
    }
}

/// Clones fine until the configured number of clones has happened, then panics.
#[derive(Debug)]
pub(crate) struct PanicOnClone {
    pub(crate) value: i32,
    budget: Rc<Cell<usize>>,
    drops: Rc<Cell<usize>>,
}

impl PanicOnClone {
    pub(crate) fn new(value: i32, clones_allowed: usize, drops: &Rc<Cell<usize>>) -> Self {
        Self {
            value,
            budget: Rc::new(Cell::new(clones_allowed)),
            drops: drops.clone(),
        }
    }
}

impl Clone for PanicOnClone {
    fn clone(&self) -> Self {
        let left = self.budget.get();
        if left == 0 {
            panic!("clone budget exhausted");
        }
        self.budget.set(left - 1);
        Self {
            value: self.value,
            budget: self.budget.clone(),
            drops: self.drops.clone(),
        }
    }
}

impl Drop for PanicOnClone {
    fn drop(&mut self) {
        self.drops.set(self.drops.get() + 1);
    }
}

/// Global allocator wrapper that counts live blocks and can be told to fail.
#[derive(Clone, Default)]
pub(crate) struct TestAlloc {
    live: Rc<Cell<usize>>,
    allocations: Rc<Cell<usize>>,
    fail: Rc<Cell<bool>>,
}

impl TestAlloc {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Blocks currently allocated and not yet freed.
    pub(crate) fn live_blocks(&self) -> usize {
        self.live.get()
    }

    /// Successful allocations over the allocator's lifetime.
    pub(crate) fn allocations(&self) -> usize {
        self.allocations.get()
    }

    pub(crate) fn set_failing(&self, fail: bool) {
        self.fail.set(fail);
    }
}

unsafe impl RawAllocator for TestAlloc {
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        if self.fail.get() {
            return Err(AllocError);
        }
        let ptr = Global.allocate(layout)?;
        self.live.set(self.live.get() + 1);
        self.allocations.set(self.allocations.get() + 1);
        Ok(ptr)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        self.live.set(self.live.get() - 1);
        unsafe { Global.deallocate(ptr, layout) }
    }
}
