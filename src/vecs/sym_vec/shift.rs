//! Positional mutations. Each one moves whichever side of the array holds fewer
//! elements: the prefix toward the front slack or the suffix toward the back slack.

use core::iter;
use core::ops::{Bound, Range, RangeBounds};

use super::{SymVec, handle_reserve};
use crate::alloc::RawAllocator;
use crate::vecs::block::RawBlock;
use crate::vecs::relocate;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Side {
    Front,
    Back,
}

/// A run of uninitialized slots inside `begin..end`.
///
/// Dropping it closes whatever is still unfilled by shifting the elements on `side`
/// over it, so a panic while filling (or while dropping erased elements) never leaves
/// holes in the live region.
struct Hole<'a, T, A: RawAllocator> {
    block: &'a mut RawBlock<T, A>,
    start: usize,
    len: usize,
    side: Side,
}

impl<T, A: RawAllocator> Hole<'_, T, A> {
    /// Writes at most `len` values from `values` into the hole, front to back.
    fn fill<I: Iterator<Item = T>>(&mut self, values: I) {
        for value in values.take(self.len) {
            unsafe { self.block.slot(self.start).write(value) };
            self.start += 1;
            self.len -= 1;
        }
    }
}

impl<T, A: RawAllocator> Drop for Hole<'_, T, A> {
    fn drop(&mut self) {
        if self.len == 0 {
            return;
        }
        let block = &mut *self.block;
        let after = self.start + self.len;
        unsafe {
            match self.side {
                Side::Back => {
                    relocate::shift_toward_front(
                        block.slot(after),
                        block.end - after,
                        block.slot(self.start),
                    );
                    block.end -= self.len;
                }
                Side::Front => {
                    relocate::shift_toward_back(
                        block.slot(block.begin),
                        self.start - block.begin,
                        block.slot(block.begin + self.len),
                    );
                    block.begin += self.len;
                }
            }
        }
    }
}

impl<T, A: RawAllocator> SymVec<T, A> {
    /// `true` when fewer elements follow `index` than precede it. Ties go to the front.
    #[inline(always)]
    fn back_is_shorter(&self, index: usize) -> bool {
        index > self.len() - index
    }

    #[inline(always)]
    fn shorter_side(&self, index: usize) -> Side {
        if self.back_is_shorter(index) {
            Side::Back
        } else {
            Side::Front
        }
    }

    #[inline(always)]
    fn slack(&self, side: Side) -> usize {
        match side {
            Side::Front => self.block.empty_front(),
            Side::Back => self.block.empty_back(),
        }
    }

    #[inline]
    #[track_caller]
    fn assert_position(&self, index: usize) {
        let len = self.len();
        assert!(
            index <= len,
            "insertion index (is {index}) should be <= len (is {len})"
        );
    }

    /// Picks the side to shift for an insertion at `index` and grows only that side
    /// when its slack cannot take `additional` elements.
    fn make_room(&mut self, index: usize, additional: usize) -> Side {
        let side = self.shorter_side(index);
        if self.slack(side) < additional {
            handle_reserve(match side {
                Side::Front => self.block.grow_front_for(additional),
                Side::Back => self.block.grow_back_for(additional),
            });
        }
        side
    }

    /// Shifts one side by `count` and returns the block slot where the gap starts.
    ///
    /// # Safety
    /// `side` must have at least `count` slack. The gap is uninitialized but counted
    /// as live; the caller must fill or close it before anything else reads the block.
    unsafe fn open_gap(&mut self, index: usize, count: usize, side: Side) -> usize {
        let begin = self.block.begin;
        match side {
            Side::Back => {
                debug_assert!(self.block.empty_back() >= count);
                let first = begin + index;
                unsafe {
                    relocate::shift_toward_back(
                        self.block.slot(first),
                        self.block.end - first,
                        self.block.slot(first + count),
                    )
                };
                self.block.end += count;
            }
            Side::Front => {
                debug_assert!(self.block.empty_front() >= count);
                unsafe {
                    relocate::shift_toward_front(
                        self.block.slot(begin),
                        index,
                        self.block.slot(begin - count),
                    )
                };
                self.block.begin -= count;
            }
        }
        self.block.begin + index
    }

    /// Opens a gap that uses up all of the front slack and takes the rest from the
    /// back: the prefix moves to slot 0 and the suffix moves up by what is missing.
    ///
    /// # Safety
    /// `count <= empty_capacity()`, same contract as [`open_gap`](Self::open_gap).
    unsafe fn open_split_gap(&mut self, index: usize, count: usize) -> usize {
        let begin = self.block.begin;
        let from_back = count - self.block.empty_front();
        debug_assert!(self.block.empty_back() >= from_back);
        let first = begin + index;
        unsafe {
            relocate::shift_toward_front(self.block.slot(begin), index, self.block.slot(0));
            relocate::shift_toward_back(
                self.block.slot(first),
                self.block.end - first,
                self.block.slot(first + from_back),
            );
        }
        self.block.begin = 0;
        self.block.end += from_back;
        index
    }

    /// Opens a gap of `count` slots at `index` without ever reallocating.
    ///
    /// Order of preference: the shorter side, then the back alone, then the front
    /// alone, then both sides together.
    #[track_caller]
    fn open_join_gap(&mut self, index: usize, count: usize) -> (usize, Side) {
        let slack = self.empty_capacity();
        assert!(
            count <= slack,
            "join of {count} elements needs more than the {slack} empty slots"
        );
        let shorter = self.shorter_side(index);
        let side = if self.slack(shorter) >= count {
            Some(shorter)
        } else if self.block.empty_back() >= count {
            Some(Side::Back)
        } else if self.block.empty_front() >= count {
            Some(Side::Front)
        } else {
            None
        };
        unsafe {
            match side {
                Some(side) => (self.open_gap(index, count, side), side),
                None => (self.open_split_gap(index, count), Side::Back),
            }
        }
    }

    /// Fills the gap at `start` from `values`; a short or panicking iterator closes
    /// the remainder.
    fn fill_gap<I: Iterator<Item = T>>(&mut self, start: usize, count: usize, side: Side, values: I) {
        let mut hole = Hole {
            block: &mut self.block,
            start,
            len: count,
            side,
        };
        hole.fill(values);
    }

    // ─── Insert: may grow ────────────────────────────────────────────────────

    /// Inserts `value` at `index`, shifting the shorter side. Grows that side alone
    /// when it has no slack.
    ///
    /// # Panics
    /// If `index > len()`.
    #[track_caller]
    pub fn insert(&mut self, index: usize, value: T) {
        self.emplace(index, value);
    }

    /// Like [`insert`](Self::insert), returning a reference to the new element.
    #[track_caller]
    pub fn emplace(&mut self, index: usize, value: T) -> &mut T {
        self.assert_position(index);
        let side = self.make_room(index, 1);
        unsafe {
            let start = self.open_gap(index, 1, side);
            let slot = self.block.slot(start);
            slot.write(value);
            &mut *slot
        }
    }

    /// Inserts `count` clones of `value` at `index`.
    #[track_caller]
    pub fn insert_n(&mut self, index: usize, count: usize, value: T)
    where
        T: Clone,
    {
        self.insert_iter(index, iter::repeat_n(value, count));
    }

    /// Inserts every element of `values` at `index`, in order.
    ///
    /// Room for all of them is made up front from the iterator's reported length. If
    /// the iterator yields fewer, the unfilled slots are closed again.
    #[track_caller]
    pub fn insert_iter<I>(&mut self, index: usize, values: I)
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        self.assert_position(index);
        let values = values.into_iter();
        let count = values.len();
        if count == 0 {
            return;
        }
        let side = self.make_room(index, count);
        let start = unsafe { self.open_gap(index, count, side) };
        self.fill_gap(start, count, side, values);
    }

    #[track_caller]
    pub fn insert_from_slice(&mut self, index: usize, values: &[T])
    where
        T: Clone,
    {
        self.insert_iter(index, values.iter().cloned());
    }

    // ─── Join: never grows ───────────────────────────────────────────────────

    /// Inserts `value` at `index` using only existing slack. Capacity never changes
    /// and element addresses stay inside the current block.
    ///
    /// # Panics
    /// If `index > len()` or there is no empty slot on either side.
    #[track_caller]
    pub fn join(&mut self, index: usize, value: T) {
        self.emjoin(index, value);
    }

    /// Like [`join`](Self::join), returning a reference to the new element.
    #[track_caller]
    pub fn emjoin(&mut self, index: usize, value: T) -> &mut T {
        self.assert_position(index);
        let (start, _) = self.open_join_gap(index, 1);
        unsafe {
            let slot = self.block.slot(start);
            slot.write(value);
            &mut *slot
        }
    }

    #[track_caller]
    pub fn join_n(&mut self, index: usize, count: usize, value: T)
    where
        T: Clone,
    {
        self.join_iter(index, iter::repeat_n(value, count));
    }

    /// Inserts every element of `values` at `index` using only existing slack.
    ///
    /// # Panics
    /// If `index > len()` or `values.len() > empty_capacity()`.
    #[track_caller]
    pub fn join_iter<I>(&mut self, index: usize, values: I)
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        self.assert_position(index);
        let values = values.into_iter();
        let count = values.len();
        if count == 0 {
            return;
        }
        let (start, side) = self.open_join_gap(index, count);
        self.fill_gap(start, count, side, values);
    }

    #[track_caller]
    pub fn join_from_slice(&mut self, index: usize, values: &[T])
    where
        T: Clone,
    {
        self.join_iter(index, values.iter().cloned());
    }

    // ─── Erase ───────────────────────────────────────────────────────────────

    /// Removes and returns the element at `index`, closing the gap from the shorter
    /// side. The freed slot becomes slack on that side.
    ///
    /// # Panics
    /// If `index >= len()`.
    #[track_caller]
    pub fn erase(&mut self, index: usize) -> T {
        let len = self.len();
        assert!(index < len, "erase index (is {index}) should be < len (is {len})");
        let at = self.block.begin + index;
        let value = unsafe { self.block.slot(at).read() };
        let side = if self.back_is_shorter(index) {
            Side::Back
        } else {
            Side::Front
        };
        drop(Hole {
            block: &mut self.block,
            start: at,
            len: 1,
            side,
        });
        value
    }

    /// Removes the elements in `range`, shifting whichever of the prefix or suffix is
    /// shorter. An empty range is a no-op.
    ///
    /// # Panics
    /// If the range is decreasing or extends past `len()`.
    #[track_caller]
    pub fn erase_range<R: RangeBounds<usize>>(&mut self, range: R) {
        let Range { start, end } = self.resolve_range(range);
        let count = end - start;
        if count == 0 {
            return;
        }
        let side = if start > self.len() - end {
            Side::Back
        } else {
            Side::Front
        };
        let start = self.block.begin + start;
        let hole = Hole {
            block: &mut self.block,
            start,
            len: count,
            side,
        };
        unsafe { relocate::destroy(hole.block.slot(start), count) };
        drop(hole);
    }

    #[track_caller]
    fn resolve_range<R: RangeBounds<usize>>(&self, range: R) -> Range<usize> {
        let len = self.len();
        let start = match range.start_bound() {
            Bound::Included(&start) => start,
            Bound::Excluded(&start) => start
                .checked_add(1)
                .unwrap_or_else(|| panic!("range start overflows usize")),
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(&end) => end
                .checked_add(1)
                .unwrap_or_else(|| panic!("range end overflows usize")),
            Bound::Excluded(&end) => end,
            Bound::Unbounded => len,
        };
        assert!(start <= end, "range starts at {start} but ends at {end}");
        assert!(end <= len, "range end {end} out of range for length {len}");
        start..end
    }
}
