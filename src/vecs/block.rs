//! Storage block: one owned allocation plus the live sub-range inside it.
//!
//! ```text
//!   ......12345678901234567890.......
//!   ^     ^                   ^      ^
//!   0   begin                end    cap
//!
//!   <---- front capacity ---->
//!         <----- back capacity ----->
//! ```
//!
//! The head of the block is always slot `0` and the tail is slot `cap`, so the four
//! markers `head <= begin <= end <= tail` reduce to two indices. Every slot in
//! `begin..end` holds an initialized element and every other slot is uninitialized.
//! Dropping a [`RawBlock`] drops the live elements and releases the allocation.

use core::alloc::Layout;
use core::marker::PhantomData;
use core::mem;
use core::ptr::NonNull;
use core::slice;

use super::relocate;
use crate::alloc::{Global, RawAllocator};
use crate::error::SymVecError;

/// Owner of one allocation and of the initialized elements in `begin..end`.
pub(crate) struct RawBlock<T, A: RawAllocator = Global> {
    ptr: NonNull<T>,
    cap: usize,
    pub(crate) begin: usize,
    pub(crate) end: usize,
    alloc: A,
    _marker: PhantomData<T>,
}

impl<T, A: RawAllocator> RawBlock<T, A> {
    /// One growth step adds `capacity >> GROWTH_SHIFT`, i.e. 25%.
    const GROWTH_SHIFT: u32 = 2;
    /// Constant added by every growth step so that tiny blocks make progress.
    const GROWTH_PAD: usize = 2;

    /// Creates the null block: no allocation, all markers at zero.
    pub(crate) const fn new_in(alloc: A) -> Self {
        Self {
            ptr: NonNull::dangling(),
            cap: 0,
            begin: 0,
            end: 0,
            alloc,
            _marker: PhantomData,
        }
    }

    /// Allocates exactly `cap` slots with an empty live region at the head.
    pub(crate) fn with_capacity_in(cap: usize, alloc: A) -> Result<Self, SymVecError> {
        let ptr = Self::allocate_slots(&alloc, cap)?;
        Ok(Self {
            ptr,
            cap,
            begin: 0,
            end: 0,
            alloc,
            _marker: PhantomData,
        })
    }

    /// Largest element count a single block can describe.
    pub(crate) const fn max_size() -> usize {
        match mem::size_of::<T>() {
            0 => usize::MAX,
            size => isize::MAX as usize / size,
        }
    }

    #[inline(always)]
    pub(crate) fn len(&self) -> usize {
        self.end - self.begin
    }

    #[inline(always)]
    pub(crate) fn capacity(&self) -> usize {
        self.cap
    }

    /// Uninitialized slots before the live region.
    #[inline(always)]
    pub(crate) fn empty_front(&self) -> usize {
        self.begin
    }

    /// Uninitialized slots after the live region.
    #[inline(always)]
    pub(crate) fn empty_back(&self) -> usize {
        self.cap - self.end
    }

    /// Slots from the head up to `end`: room when only growing toward the front.
    #[inline(always)]
    pub(crate) fn front_capacity(&self) -> usize {
        self.end
    }

    /// Slots from `begin` up to the tail: room when only growing toward the back.
    #[inline(always)]
    pub(crate) fn back_capacity(&self) -> usize {
        self.cap - self.begin
    }

    #[inline(always)]
    pub(crate) fn allocator(&self) -> &A {
        &self.alloc
    }

    /// Raw pointer to slot `index` of the block (not relative to `begin`).
    #[inline(always)]
    pub(crate) fn slot(&self, index: usize) -> *mut T {
        self.ptr.as_ptr().wrapping_add(index)
    }

    #[inline(always)]
    pub(crate) fn live(&self) -> &[T] {
        unsafe { slice::from_raw_parts(self.slot(self.begin), self.len()) }
    }

    #[inline(always)]
    pub(crate) fn live_mut(&mut self) -> &mut [T] {
        unsafe { slice::from_raw_parts_mut(self.slot(self.begin), self.len()) }
    }

    /// Constructs `value` in the first empty back slot.
    ///
    /// # Safety
    /// `empty_back() > 0`.
    #[inline(always)]
    pub(crate) unsafe fn write_back(&mut self, value: T) -> &mut T {
        debug_assert!(self.end < self.cap);
        unsafe {
            let slot = self.slot(self.end);
            slot.write(value);
            self.end += 1;
            &mut *slot
        }
    }

    /// Constructs `value` in the last empty front slot.
    ///
    /// # Safety
    /// `empty_front() > 0`.
    #[inline(always)]
    pub(crate) unsafe fn write_front(&mut self, value: T) -> &mut T {
        debug_assert!(self.begin > 0);
        unsafe {
            self.begin -= 1;
            let slot = self.slot(self.begin);
            slot.write(value);
            &mut *slot
        }
    }

    /// Drops the last `count` live elements.
    pub(crate) fn destroy_back(&mut self, count: usize) {
        debug_assert!(count <= self.len());
        self.end -= count;
        unsafe { relocate::destroy(self.slot(self.end), count) }
    }

    /// Drops the first `count` live elements.
    pub(crate) fn destroy_front(&mut self, count: usize) {
        debug_assert!(count <= self.len());
        let first = self.begin;
        self.begin += count;
        unsafe { relocate::destroy(self.slot(first), count) }
    }

    /// Drops every live element, frees the allocation and returns to the null state.
    ///
    /// Safe to call on a block that is already null.
    pub(crate) fn deallocate(&mut self) {
        self.destroy_back(self.len());
        self.release_slots();
    }

    // ─── Growth formulas ─────────────────────────────────────────────────────

    /// One growth step applied to a one-sided capacity.
    fn grown_side(side: usize) -> Result<usize, SymVecError> {
        side.checked_add(side >> Self::GROWTH_SHIFT)
            .and_then(|c| c.checked_add(Self::GROWTH_PAD))
            .ok_or_else(|| Self::overflow(usize::MAX))
    }

    /// Repeats growth steps on `side` until it reaches at least `needed`. At least one
    /// step is always taken.
    fn grown_side_until(mut side: usize, needed: usize) -> Result<usize, SymVecError> {
        loop {
            side = Self::grown_side(side)?;
            if side >= needed {
                return Ok(side);
            }
        }
    }

    /// Total capacity after one front growth step: the back slack is kept as is.
    pub(crate) fn front_growth_target(&self) -> Result<usize, SymVecError> {
        Self::add_capacity(self.empty_back(), Self::grown_side(self.front_capacity())?)
    }

    /// Total capacity after one back growth step: the front slack is kept as is.
    pub(crate) fn back_growth_target(&self) -> Result<usize, SymVecError> {
        Self::add_capacity(self.empty_front(), Self::grown_side(self.back_capacity())?)
    }

    // ─── Reallocation ────────────────────────────────────────────────────────

    /// Reallocates to exactly `capacity` slots with the slack split evenly, the odd
    /// slot going to the back.
    pub(crate) fn grow(&mut self, capacity: usize) -> Result<(), SymVecError> {
        debug_assert!(capacity >= self.len());
        let begin = (capacity - self.len()) / 2;
        self.relocate(capacity, begin)
    }

    /// One front growth step.
    pub(crate) fn grow_front(&mut self) -> Result<(), SymVecError> {
        let capacity = self.front_growth_target()?;
        let begin = capacity - self.empty_back() - self.len();
        self.relocate(capacity, begin)
    }

    /// One back growth step.
    pub(crate) fn grow_back(&mut self) -> Result<(), SymVecError> {
        let capacity = self.back_growth_target()?;
        self.relocate(capacity, self.empty_front())
    }

    /// Front growth repeated until at least `additional` empty front slots exist.
    pub(crate) fn grow_front_for(&mut self, additional: usize) -> Result<(), SymVecError> {
        let needed = self.len().checked_add(additional).ok_or_else(|| Self::overflow(usize::MAX))?;
        let front = Self::grown_side_until(self.front_capacity(), needed)?;
        self.grow_front_to(front)
    }

    /// Back growth repeated until at least `additional` empty back slots exist.
    pub(crate) fn grow_back_for(&mut self, additional: usize) -> Result<(), SymVecError> {
        let needed = self.len().checked_add(additional).ok_or_else(|| Self::overflow(usize::MAX))?;
        let back = Self::grown_side_until(self.back_capacity(), needed)?;
        self.grow_back_to(back)
    }

    /// Reallocates so that `front_capacity() == front_capacity`, keeping the exact
    /// back slack.
    pub(crate) fn grow_front_to(&mut self, front_capacity: usize) -> Result<(), SymVecError> {
        debug_assert!(front_capacity >= self.len());
        let capacity = Self::add_capacity(self.empty_back(), front_capacity)?;
        self.relocate(capacity, front_capacity - self.len())
    }

    /// Reallocates so that `back_capacity() == back_capacity`, keeping the exact front
    /// slack.
    pub(crate) fn grow_back_to(&mut self, back_capacity: usize) -> Result<(), SymVecError> {
        debug_assert!(back_capacity >= self.len());
        let capacity = Self::add_capacity(self.empty_front(), back_capacity)?;
        self.relocate(capacity, self.empty_front())
    }

    /// Moves the live elements into a fresh block of `capacity` slots starting at
    /// `begin`, then frees the old block. Nothing is touched if allocation fails.
    fn relocate(&mut self, capacity: usize, begin: usize) -> Result<(), SymVecError> {
        let len = self.len();
        debug_assert!(begin + len <= capacity);
        let ptr = Self::allocate_slots(&self.alloc, capacity)?;
        unsafe { relocate::move_disjoint(self.slot(self.begin), ptr.as_ptr().add(begin), len) };

        let old_capacity = self.cap;
        self.release_slots();
        self.ptr = ptr;
        self.cap = capacity;
        self.begin = begin;
        self.end = begin + len;
        trace!(
            "reallocated {} -> {} slots (len {}, front slack {}, back slack {})",
            old_capacity,
            capacity,
            len,
            self.empty_front(),
            self.empty_back()
        );
        Ok(())
    }

    // ─── Raw storage ─────────────────────────────────────────────────────────

    fn overflow(requested: usize) -> SymVecError {
        SymVecError::CapacityOverflow {
            requested,
            max: Self::max_size(),
        }
    }

    fn add_capacity(a: usize, b: usize) -> Result<usize, SymVecError> {
        a.checked_add(b).ok_or_else(|| Self::overflow(usize::MAX))
    }

    fn layout_for(capacity: usize) -> Result<Layout, SymVecError> {
        if capacity > Self::max_size() {
            return Err(Self::overflow(capacity));
        }
        Layout::array::<T>(capacity).map_err(|_| Self::overflow(capacity))
    }

    fn allocate_slots(alloc: &A, capacity: usize) -> Result<NonNull<T>, SymVecError> {
        let layout = Self::layout_for(capacity)?;
        if layout.size() == 0 {
            return Ok(NonNull::dangling());
        }
        alloc
            .allocate(layout)
            .map(NonNull::cast)
            .map_err(|_| SymVecError::AllocError { layout })
    }

    /// Frees the allocation without touching any slot and resets to the null state.
    /// Live elements, if any, must already have been moved out or dropped.
    fn release_slots(&mut self) {
        if let Ok(layout) = Layout::array::<T>(self.cap) {
            if layout.size() != 0 {
                unsafe { self.alloc.deallocate(self.ptr.cast(), layout) };
            }
        }
        self.ptr = NonNull::dangling();
        self.cap = 0;
        self.begin = 0;
        self.end = 0;
    }
}

impl<T, A: RawAllocator> Drop for RawBlock<T, A> {
    fn drop(&mut self) {
        self.deallocate();
    }
}
