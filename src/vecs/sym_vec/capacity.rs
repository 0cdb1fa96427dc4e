//! Capacity management: reservation per side, shrinking, sliding the live range
//! inside the block, resizing from either end and wholesale assignment.

use super::{SymVec, handle_reserve};
use crate::alloc::RawAllocator;
use crate::error::SymVecError;
use crate::vecs::relocate;

impl<T, A: RawAllocator> SymVec<T, A> {
    // ─── Reserve ─────────────────────────────────────────────────────────────

    /// Ensures `capacity() >= capacity`. On reallocation the slack is split evenly
    /// between the two sides.
    ///
    /// # Panics
    /// If `capacity > max_size()`.
    #[track_caller]
    pub fn reserve(&mut self, capacity: usize) {
        handle_reserve(self.try_reserve(capacity));
    }

    pub fn try_reserve(&mut self, capacity: usize) -> Result<(), SymVecError> {
        if capacity > self.max_size() {
            return Err(self.capacity_overflow(capacity));
        }
        if capacity > self.capacity() {
            self.block.grow(capacity)?;
        }
        Ok(())
    }

    /// Ensures `front_capacity() >= front_capacity`, i.e. room for that many
    /// elements when growing only toward the front. Back slack is left untouched.
    #[track_caller]
    pub fn reserve_front(&mut self, front_capacity: usize) {
        handle_reserve(self.try_reserve_front(front_capacity));
    }

    pub fn try_reserve_front(&mut self, front_capacity: usize) -> Result<(), SymVecError> {
        self.check_side_request(front_capacity, self.empty_back_capacity())?;
        if front_capacity > self.front_capacity() {
            self.block.grow_front_to(front_capacity)?;
        }
        Ok(())
    }

    /// Ensures `back_capacity() >= back_capacity`, i.e. room for that many elements
    /// when growing only toward the back. Front slack is left untouched.
    #[track_caller]
    pub fn reserve_back(&mut self, back_capacity: usize) {
        handle_reserve(self.try_reserve_back(back_capacity));
    }

    pub fn try_reserve_back(&mut self, back_capacity: usize) -> Result<(), SymVecError> {
        self.check_side_request(back_capacity, self.empty_front_capacity())?;
        if back_capacity > self.back_capacity() {
            self.block.grow_back_to(back_capacity)?;
        }
        Ok(())
    }

    /// A one-sided request keeps the other side's slack, so both must fit.
    fn check_side_request(&self, side: usize, kept: usize) -> Result<(), SymVecError> {
        match side.checked_add(kept) {
            Some(total) if total <= self.max_size() => Ok(()),
            _ => Err(self.capacity_overflow(side.saturating_add(kept))),
        }
    }

    /// Makes sure at least `additional` empty back slots exist, growing the back side
    /// by whole steps.
    pub(super) fn reserve_back_slack(&mut self, additional: usize) {
        if self.block.empty_back() < additional {
            handle_reserve(self.block.grow_back_for(additional));
        }
    }

    // ─── Shrink & slide ──────────────────────────────────────────────────────

    /// Drops all slack. An empty array releases its block and returns to the null
    /// state.
    pub fn shrink_to_fit(&mut self) {
        if self.len() == self.capacity() {
            return;
        }
        if self.is_empty() {
            trace!("releasing empty block of {} slots", self.capacity());
            self.block.deallocate();
        } else {
            handle_reserve(self.block.grow(self.len()));
        }
    }

    /// Moves the live range so that exactly `empty_front` slots precede it. Works in
    /// both directions and never reallocates.
    ///
    /// # Panics
    /// If `empty_front > empty_capacity()`.
    #[track_caller]
    pub fn slide_to_front(&mut self, empty_front: usize) {
        let slack = self.empty_capacity();
        assert!(
            empty_front <= slack,
            "cannot leave {empty_front} empty front slots with only {slack} empty slots"
        );
        let begin = self.block.begin;
        let len = self.len();
        unsafe {
            if empty_front < begin {
                relocate::shift_toward_front(
                    self.block.slot(begin),
                    len,
                    self.block.slot(empty_front),
                );
            } else {
                relocate::shift_toward_back(
                    self.block.slot(begin),
                    len,
                    self.block.slot(empty_front),
                );
            }
        }
        self.block.begin = empty_front;
        self.block.end = empty_front + len;
    }

    /// Moves the live range so that exactly `empty_back` slots follow it.
    ///
    /// # Panics
    /// If `empty_back > empty_capacity()`.
    #[track_caller]
    pub fn slide_to_back(&mut self, empty_back: usize) {
        let slack = self.empty_capacity();
        assert!(
            empty_back <= slack,
            "cannot leave {empty_back} empty back slots with only {slack} empty slots"
        );
        self.slide_to_front(slack - empty_back);
    }

    // ─── Resize ──────────────────────────────────────────────────────────────

    /// Resizes to `len` by adding clones of `value` at, or dropping elements from,
    /// the back.
    pub fn resize_back(&mut self, len: usize, value: T)
    where
        T: Clone,
    {
        self.resize_back_with(len, || value.clone());
    }

    /// Resizes to `len` at the back, producing new elements with `f`.
    ///
    /// Growth reserves exactly `len` back capacity, like
    /// [`reserve_back`](Self::reserve_back), and is not amortized: growing one
    /// element per call reallocates every time.
    pub fn resize_back_with<F: FnMut() -> T>(&mut self, len: usize, mut f: F) {
        let current = self.len();
        if len <= current {
            self.block.destroy_back(current - len);
            return;
        }
        self.reserve_back(len);
        while self.len() < len {
            unsafe { self.block.write_back(f()) };
        }
    }

    /// Resizes to `len` by adding clones of `value` at, or dropping elements from,
    /// the front.
    pub fn resize_front(&mut self, len: usize, value: T)
    where
        T: Clone,
    {
        self.resize_front_with(len, || value.clone());
    }

    /// Resizes to `len` at the front, producing new elements with `f`.
    ///
    /// New elements are produced nearest-first: the first call to `f` yields the
    /// element that ends up directly before the old first element.
    ///
    /// Growth reserves exactly `len` front capacity and is not amortized.
    pub fn resize_front_with<F: FnMut() -> T>(&mut self, len: usize, mut f: F) {
        let current = self.len();
        if len <= current {
            self.block.destroy_front(current - len);
            return;
        }
        self.reserve_front(len);
        while self.len() < len {
            unsafe { self.block.write_front(f()) };
        }
    }

    // ─── Assign ──────────────────────────────────────────────────────────────

    /// Replaces the contents with `values`, reusing the block when it is large
    /// enough. The new elements are centred in the block.
    pub fn assign<I: IntoIterator<Item = T>>(&mut self, values: I) {
        let values = values.into_iter();
        let expected = values.size_hint().0;
        self.clear();
        self.reserve(expected);
        let begin = (self.capacity() - expected.min(self.capacity())) / 2;
        self.block.begin = begin;
        self.block.end = begin;
        self.extend(values);
    }

    /// Replaces the contents with `len` clones of `value`.
    pub fn assign_fill(&mut self, len: usize, value: T)
    where
        T: Clone,
    {
        self.assign(core::iter::repeat_n(value, len));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{DropCounter, TestAlloc};

    #[test]
    fn test_capacity_reserve_centers_and_never_shrinks() {
        let mut v: SymVec<i32> = (0..4).collect();
        v.reserve(12);
        assert_eq!(v.capacity(), 12);
        assert_eq!(v.empty_front_capacity(), 4);
        assert_eq!(v.empty_back_capacity(), 4);
        v.reserve(3);
        assert_eq!(v.capacity(), 12);
        assert_eq!(v, [0, 1, 2, 3]);
    }

    #[test]
    fn test_capacity_reserve_overflow() {
        let mut v: SymVec<u64> = SymVec::new();
        let max = v.max_size();
        assert_eq!(
            v.try_reserve(max + 1),
            Err(SymVecError::CapacityOverflow {
                requested: max + 1,
                max
            })
        );
        assert!(v.try_reserve_back(usize::MAX).is_err());
        assert_eq!(v.capacity(), 0);
    }

    #[test]
    #[should_panic(expected = "capacity overflow")]
    fn test_capacity_reserve_overflow_panics() {
        let mut v: SymVec<u64> = SymVec::new();
        v.reserve(usize::MAX);
    }

    #[test]
    fn test_capacity_reserve_front_keeps_back_slack() {
        let mut v: SymVec<i32> = SymVec::with_capacity(6);
        v.extend([1, 2]);
        let back = v.empty_back_capacity();
        v.reserve_front(20);
        assert_eq!(v.front_capacity(), 20);
        assert_eq!(v.empty_back_capacity(), back);
        assert_eq!(v.empty_front_capacity(), 18);
        let cap = v.capacity();
        v.reserve_front(10);
        assert_eq!(v.capacity(), cap);
    }

    #[test]
    fn test_capacity_reserve_back_keeps_front_slack() {
        let mut v: SymVec<i32> = SymVec::new();
        v.push_front(1);
        v.reserve_back(9);
        assert_eq!(v.back_capacity(), 9);
        assert_eq!(v.empty_front_capacity(), 1);
        for i in 0..8 {
            v.push_back(i);
        }
        assert_eq!(v.capacity(), 10);
    }

    #[test]
    fn test_capacity_shrink_to_fit() {
        let alloc = TestAlloc::new();
        let mut v = SymVec::new_in(alloc.clone());
        v.reserve(32);
        v.extend(0..5);
        v.shrink_to_fit();
        assert_eq!(v.capacity(), 5);
        assert_eq!(v.empty_capacity(), 0);
        assert_eq!(v, [0, 1, 2, 3, 4]);

        v.clear();
        v.shrink_to_fit();
        assert_eq!(v.capacity(), 0);
        assert_eq!(alloc.live_blocks(), 0);
        v.push_back(1);
        assert_eq!(v, [1]);
    }

    #[test]
    fn test_capacity_slide_both_directions() {
        let mut v: SymVec<String> = SymVec::with_capacity(10);
        v.extend(["a", "b", "c"].map(String::from));
        v.slide_to_front(0);
        assert_eq!(v.empty_front_capacity(), 0);
        assert_eq!(v.empty_back_capacity(), 7);
        v.slide_to_back(0);
        assert_eq!(v.empty_front_capacity(), 7);
        v.slide_to_front(5);
        assert_eq!(v.empty_back_capacity(), 2);
        v.slide_to_back(6);
        assert_eq!(v.empty_front_capacity(), 1);
        assert_eq!(v, ["a", "b", "c"].map(String::from));
        assert_eq!(v.capacity(), 10);
    }

    #[test]
    #[should_panic(expected = "empty slots")]
    fn test_capacity_slide_too_far_panics() {
        let mut v: SymVec<i32> = SymVec::with_capacity(4);
        v.push_back(1);
        v.slide_to_front(4);
    }

    #[test]
    fn test_capacity_resize_back() {
        let counter = DropCounter::new();
        let mut v: SymVec<_> = (0..3).map(|i| counter.track(i)).collect();
        v.resize_back(5, counter.track(9));
        // the template value is dropped after cloning
        assert_eq!(counter.drops(), 1);
        let values: Vec<i32> = v.iter().map(|t| t.value).collect();
        assert_eq!(values, vec![0, 1, 2, 9, 9]);
        v.resize_back(1, counter.track(0));
        assert_eq!(counter.drops(), 6);
        assert_eq!(v.len(), 1);
        assert_eq!(v[0].value, 0);
    }

    #[test]
    fn test_capacity_resize_reserves_exactly() {
        let alloc = TestAlloc::new();
        let mut v = SymVec::new_in(alloc.clone());
        for len in 1..=4 {
            v.resize_back(len, 0u8);
            assert_eq!(v.back_capacity(), len);
        }
        assert_eq!(alloc.allocations(), 4);
        v.resize_front(6, 1);
        assert_eq!(v.front_capacity(), 6);
        assert_eq!(v.empty_capacity(), 0);
        assert_eq!(alloc.allocations(), 5);
    }

    #[test]
    fn test_capacity_resize_front() {
        let mut v: SymVec<i32> = (0..3).collect();
        let mut next = 10;
        v.resize_front_with(6, || {
            next += 1;
            next
        });
        assert_eq!(v, [13, 12, 11, 0, 1, 2]);
        assert_eq!(v.empty_back_capacity(), 0);
        v.resize_front(2, -1);
        assert_eq!(v, [1, 2]);
        assert_eq!(v.empty_front_capacity(), 4);
        v.resize_front(4, 7);
        assert_eq!(v, [7, 7, 1, 2]);
    }

    #[test]
    fn test_capacity_assign_reuses_and_centers() {
        let mut v: SymVec<i32> = SymVec::with_capacity(11);
        v.push_back(100);
        v.assign([1, 2, 3]);
        assert_eq!(v, [1, 2, 3]);
        assert_eq!(v.capacity(), 11);
        assert_eq!(v.empty_front_capacity(), 4);
        v.assign_fill(20, 5);
        assert_eq!(v.len(), 20);
        assert!(v.iter().all(|&x| x == 5));
        assert_eq!(v.capacity(), 20);
        v.assign(core::iter::empty());
        assert!(v.is_empty());
    }

    #[test]
    fn test_capacity_assign_unsized_hint() {
        let mut v: SymVec<i32> = SymVec::new();
        v.assign((0..50).filter(|x| x % 2 == 0));
        assert_eq!(v.len(), 25);
        assert!(v.iter().copied().eq((0..50).step_by(2)));
    }
}
