//! Contiguous array with independent slack at both ends.
//!
//! [`SymVec`] keeps its elements in one contiguous allocation, like `Vec`, but leaves
//! unused capacity in front of the first element as well as after the last one. Pushes
//! and pops at either end are amortized O(1), and a positional insert or erase only
//! shifts the shorter side of the array. Because the elements stay contiguous, the
//! container `Deref`s to `[T]` and every slice method is available.
//!
//! | Module | Contents |
//! |--------|----------|
//! | `block` | the allocation, the live range, growth formulas |
//! | `relocate` | overlap-safe element moves |
//! | `shift` | insert / join / erase, choosing which side to shift |
//! | `capacity` | reserve, shrink, slide, resize, assign |

use core::borrow::{Borrow, BorrowMut};
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::mem;
use core::ops::{Deref, DerefMut, Index, IndexMut};
use core::slice::SliceIndex;
use std::alloc::handle_alloc_error;

use super::block::RawBlock;
use crate::alloc::{Global, RawAllocator};
use crate::error::SymVecError;

mod capacity;
mod iter;
mod shift;

pub use iter::IntoIter;

/// A resizable array with amortized O(1) growth at both ends.
///
/// ```text
///   ......12345678901234567890.......
///   ^     ^                   ^      ^
///   head  begin             end    tail
///   <-- empty front -->       <-- empty back -->
/// ```
///
/// # Capacity accounting
/// | Method | Meaning |
/// |--------|---------|
/// | [`capacity`](SymVec::capacity) | all slots, `tail - head` |
/// | [`front_capacity`](SymVec::front_capacity) | `end - head`, room when growing only toward the front |
/// | [`back_capacity`](SymVec::back_capacity) | `tail - begin`, room when growing only toward the back |
/// | [`empty_front_capacity`](SymVec::empty_front_capacity) | `begin - head` |
/// | [`empty_back_capacity`](SymVec::empty_back_capacity) | `tail - end` |
///
/// # Generic parameters
/// | Parameter | Meaning |
/// |-----------|---------|
/// | `T` | Element type |
/// | `A` | Allocator, [`Global`] by default |
pub struct SymVec<T, A: RawAllocator = Global> {
    block: RawBlock<T, A>,
}

unsafe impl<T: Send, A: RawAllocator + Send> Send for SymVec<T, A> {}
unsafe impl<T: Sync, A: RawAllocator + Sync> Sync for SymVec<T, A> {}

/// Aborts an infallible operation whose reservation failed.
#[cold]
#[inline(never)]
#[track_caller]
pub(crate) fn reserve_failed(err: SymVecError) -> ! {
    match err {
        SymVecError::AllocError { layout } => handle_alloc_error(layout),
        err => panic!("{err}"),
    }
}

#[inline]
#[track_caller]
pub(crate) fn handle_reserve(result: Result<(), SymVecError>) {
    if let Err(err) = result {
        reserve_failed(err);
    }
}

impl<T> SymVec<T> {
    /// Creates an empty array. Does not allocate.
    pub const fn new() -> Self {
        Self::new_in(Global)
    }

    /// Creates an empty array with room for `capacity` elements, split evenly between
    /// the front and the back.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_in(capacity, Global)
    }

    /// Creates an array of `len` clones of `value`, with no slack on either side.
    pub fn from_elem(len: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::from_elem_in(len, value, Global)
    }

    /// Creates an array of `len` default values, with no slack on either side.
    pub fn with_len(len: usize) -> Self
    where
        T: Default,
    {
        let mut vec = Self::exact_in(len, Global);
        vec.resize_back_with(len, T::default);
        vec
    }
}

impl<T, A: RawAllocator> SymVec<T, A> {
    /// Creates an empty array that will allocate from `alloc`.
    pub const fn new_in(alloc: A) -> Self {
        Self {
            block: RawBlock::new_in(alloc),
        }
    }

    pub fn with_capacity_in(capacity: usize, alloc: A) -> Self {
        let mut vec = Self::new_in(alloc);
        vec.reserve(capacity);
        vec
    }

    pub fn from_elem_in(len: usize, value: T, alloc: A) -> Self
    where
        T: Clone,
    {
        let mut vec = Self::exact_in(len, alloc);
        vec.extend(core::iter::repeat_n(value, len));
        vec
    }

    /// Collects `iter` into a block sized by its lower size hint, live region at the head.
    pub fn from_iter_in<I: IntoIterator<Item = T>>(iter: I, alloc: A) -> Self {
        let iter = iter.into_iter();
        let mut vec = Self::exact_in(iter.size_hint().0, alloc);
        vec.extend(iter);
        vec
    }

    /// Empty array over a block of exactly `capacity` slots, all of them back slack.
    fn exact_in(capacity: usize, alloc: A) -> Self {
        match RawBlock::with_capacity_in(capacity, alloc) {
            Ok(block) => Self { block },
            Err(err) => reserve_failed(err),
        }
    }

    /// Returns the allocator backing this array.
    #[inline(always)]
    pub fn allocator(&self) -> &A {
        self.block.allocator()
    }

    // ─── Size & capacity ─────────────────────────────────────────────────────

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.block.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.block.len() == 0
    }

    /// Total number of slots in the allocation.
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.block.capacity()
    }

    /// Slots from the start of the allocation through the last element.
    #[inline(always)]
    pub fn front_capacity(&self) -> usize {
        self.block.front_capacity()
    }

    /// Slots from the first element through the end of the allocation.
    #[inline(always)]
    pub fn back_capacity(&self) -> usize {
        self.block.back_capacity()
    }

    /// Unused slots before the first element.
    #[inline(always)]
    pub fn empty_front_capacity(&self) -> usize {
        self.block.empty_front()
    }

    /// Unused slots after the last element.
    #[inline(always)]
    pub fn empty_back_capacity(&self) -> usize {
        self.block.empty_back()
    }

    /// Unused slots on both sides together.
    #[inline(always)]
    pub fn empty_capacity(&self) -> usize {
        self.block.empty_front() + self.block.empty_back()
    }

    /// The largest number of elements an array of `T` can hold.
    #[inline(always)]
    pub fn max_size(&self) -> usize {
        RawBlock::<T, A>::max_size()
    }

    pub(crate) fn capacity_overflow(&self, requested: usize) -> SymVecError {
        SymVecError::CapacityOverflow {
            requested,
            max: self.max_size(),
        }
    }

    // ─── Element access ──────────────────────────────────────────────────────

    #[inline(always)]
    pub fn as_slice(&self) -> &[T] {
        self.block.live()
    }

    #[inline(always)]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.block.live_mut()
    }

    /// Pointer to the first element. Dangling (but aligned) when nothing is allocated.
    #[inline(always)]
    pub fn as_ptr(&self) -> *const T {
        self.block.slot(self.block.begin)
    }

    #[inline(always)]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.block.slot(self.block.begin)
    }

    /// Bounds-checked access.
    pub fn at(&self, index: usize) -> Result<&T, SymVecError> {
        let len = self.len();
        self.as_slice()
            .get(index)
            .ok_or(SymVecError::OutOfRange { index, len })
    }

    /// Bounds-checked mutable access.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, SymVecError> {
        let len = self.len();
        self.as_mut_slice()
            .get_mut(index)
            .ok_or(SymVecError::OutOfRange { index, len })
    }

    #[inline(always)]
    pub fn front(&self) -> Option<&T> {
        self.as_slice().first()
    }

    #[inline(always)]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().first_mut()
    }

    /// The last element (index `len() - 1`).
    #[inline(always)]
    pub fn back(&self) -> Option<&T> {
        self.as_slice().last()
    }

    #[inline(always)]
    pub fn back_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().last_mut()
    }

    // ─── Push & pop ──────────────────────────────────────────────────────────

    /// Appends `value`, growing the back side when it has no slack left.
    #[inline(always)]
    pub fn push_back(&mut self, value: T) {
        self.emplace_back(value);
    }

    /// Prepends `value`, growing the front side when it has no slack left.
    #[inline(always)]
    pub fn push_front(&mut self, value: T) {
        self.emplace_front(value);
    }

    /// Appends `value` and returns a reference to it.
    #[inline(always)]
    pub fn emplace_back(&mut self, value: T) -> &mut T {
        if self.block.empty_back() == 0 {
            self.grow_back_one();
        }
        unsafe { self.block.write_back(value) }
    }

    /// Prepends `value` and returns a reference to it.
    #[inline(always)]
    pub fn emplace_front(&mut self, value: T) -> &mut T {
        if self.block.empty_front() == 0 {
            self.grow_front_one();
        }
        unsafe { self.block.write_front(value) }
    }

    /// Cold path: one back growth step.
    #[inline(never)]
    fn grow_back_one(&mut self) {
        handle_reserve(self.block.grow_back());
    }

    /// Cold path: one front growth step.
    #[inline(never)]
    fn grow_front_one(&mut self) {
        handle_reserve(self.block.grow_front());
    }

    /// Removes the last element. The freed slot becomes back slack.
    #[inline(always)]
    pub fn pop_back(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        self.block.end -= 1;
        Some(unsafe { self.block.slot(self.block.end).read() })
    }

    /// Removes the first element. The freed slot becomes front slack.
    #[inline(always)]
    pub fn pop_front(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let value = unsafe { self.block.slot(self.block.begin).read() };
        self.block.begin += 1;
        Some(value)
    }

    /// Drops every element. Capacity and the position of the (now empty) live range
    /// are kept.
    pub fn clear(&mut self) {
        self.block.destroy_back(self.len());
    }

    /// Exchanges the contents, capacity and allocator of two arrays.
    pub fn swap_with(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }
}

// ─── Slice views ─────────────────────────────────────────────────────────────

impl<T, A: RawAllocator> Deref for SymVec<T, A> {
    type Target = [T];
    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<T, A: RawAllocator> DerefMut for SymVec<T, A> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.as_mut_slice()
    }
}

impl<T, A: RawAllocator> AsRef<[T]> for SymVec<T, A> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, A: RawAllocator> AsMut<[T]> for SymVec<T, A> {
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, A: RawAllocator> Borrow<[T]> for SymVec<T, A> {
    fn borrow(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, A: RawAllocator> BorrowMut<[T]> for SymVec<T, A> {
    fn borrow_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, I: SliceIndex<[T]>, A: RawAllocator> Index<I> for SymVec<T, A> {
    type Output = I::Output;
    #[inline(always)]
    fn index(&self, index: I) -> &Self::Output {
        Index::index(self.as_slice(), index)
    }
}

impl<T, I: SliceIndex<[T]>, A: RawAllocator> IndexMut<I> for SymVec<T, A> {
    #[inline(always)]
    fn index_mut(&mut self, index: I) -> &mut Self::Output {
        IndexMut::index_mut(self.as_mut_slice(), index)
    }
}

// ─── Standard traits ─────────────────────────────────────────────────────────

impl<T, A: RawAllocator + Default> Default for SymVec<T, A> {
    fn default() -> Self {
        Self::new_in(A::default())
    }
}

impl<T: Clone, A: RawAllocator + Clone> Clone for SymVec<T, A> {
    /// The copy gets exactly `len()` slots and no slack.
    fn clone(&self) -> Self {
        let mut vec = Self::exact_in(self.len(), self.allocator().clone());
        vec.extend(self.iter().cloned());
        vec
    }

    /// Reuses the existing allocation when it is large enough.
    fn clone_from(&mut self, source: &Self) {
        self.assign(source.iter().cloned());
    }
}

impl<T: fmt::Debug, A: RawAllocator> fmt::Debug for SymVec<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_slice(), f)
    }
}

impl<T: Hash, A: RawAllocator> Hash for SymVec<T, A> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl<T, U, A1, A2> PartialEq<SymVec<U, A2>> for SymVec<T, A1>
where
    T: PartialEq<U>,
    A1: RawAllocator,
    A2: RawAllocator,
{
    fn eq(&self, other: &SymVec<U, A2>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq, A: RawAllocator> Eq for SymVec<T, A> {}

impl<T: PartialEq<U>, U, A: RawAllocator> PartialEq<Vec<U>> for SymVec<T, A> {
    fn eq(&self, other: &Vec<U>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: PartialEq<U>, U, A: RawAllocator> PartialEq<[U]> for SymVec<T, A> {
    fn eq(&self, other: &[U]) -> bool {
        self.as_slice() == other
    }
}

impl<T: PartialEq<U>, U, A: RawAllocator> PartialEq<&[U]> for SymVec<T, A> {
    fn eq(&self, other: &&[U]) -> bool {
        self.as_slice() == *other
    }
}

impl<T: PartialEq<U>, U, A: RawAllocator, const N: usize> PartialEq<[U; N]> for SymVec<T, A> {
    fn eq(&self, other: &[U; N]) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: PartialOrd, A: RawAllocator> PartialOrd for SymVec<T, A> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.as_slice().partial_cmp(other.as_slice())
    }
}

impl<T: Ord, A: RawAllocator> Ord for SymVec<T, A> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

impl<T, A: RawAllocator> Extend<T> for SymVec<T, A> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve_back_slack(iter.size_hint().0);
        for item in iter {
            self.push_back(item);
        }
    }
}

impl<'a, T: Copy + 'a, A: RawAllocator> Extend<&'a T> for SymVec<T, A> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T> FromIterator<T> for SymVec<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_iter_in(iter, Global)
    }
}

impl<T> From<Vec<T>> for SymVec<T> {
    fn from(vec: Vec<T>) -> Self {
        vec.into_iter().collect()
    }
}

impl<T, const N: usize> From<[T; N]> for SymVec<T> {
    fn from(array: [T; N]) -> Self {
        array.into_iter().collect()
    }
}

impl<T: Clone> From<&[T]> for SymVec<T> {
    fn from(slice: &[T]) -> Self {
        slice.iter().cloned().collect()
    }
}

impl<T, A: RawAllocator> From<SymVec<T, A>> for Vec<T> {
    fn from(vec: SymVec<T, A>) -> Self {
        vec.into_iter().collect()
    }
}

impl<'a, T, A: RawAllocator> IntoIterator for &'a SymVec<T, A> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, A: RawAllocator> IntoIterator for &'a mut SymVec<T, A> {
    type Item = &'a mut T;
    type IntoIter = core::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
