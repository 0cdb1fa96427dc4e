//! Relocation primitives for the live region of a [`RawBlock`](super::block::RawBlock).
//!
//! A move in Rust is a bitwise copy: once an element has been moved out of a slot, that
//! slot is logically uninitialized and must be neither read nor dropped again. There is
//! therefore no separate "move-assign, then destroy the leftovers" step as in languages
//! with user-defined move constructors; the only work left to the caller is moving the
//! `begin`/`end` markers so that vacated slots fall outside the live region.
//!
//! Three modes are provided:
//!
//! | Function | Ranges | Used by |
//! |----------|--------|---------|
//! | [`move_disjoint`] | never overlap | reallocation, moving into a fresh block |
//! | [`shift_toward_front`] | may overlap, destination before source | erase, insert at the front side |
//! | [`shift_toward_back`] | may overlap, destination after source | erase, insert at the back side |

use core::mem;
use core::ptr;

/// Moves `count` elements from `src` into the uninitialized slots at `dst`.
///
/// # Safety
/// `src..src + count` must hold initialized elements, `dst..dst + count` must be valid
/// for writes, and the two ranges must not overlap. The source slots are uninitialized
/// afterwards.
#[inline]
pub(crate) unsafe fn move_disjoint<T>(src: *const T, dst: *mut T, count: usize) {
    unsafe { ptr::copy_nonoverlapping(src, dst, count) }
}

/// Moves `count` elements starting at `first` down to `dst`, where `dst <= first`.
///
/// With a shift distance `k = first - dst`, the first `k` elements land in slots that
/// lie outside the source range and are moved in one non-overlapping copy. The
/// remaining `count - k` elements land on top of the source range itself and are moved
/// front to back, which never overwrites an element that has not been moved yet. After
/// the call the last `min(k, count)` source slots are vacated.
///
/// Zero-sized elements occupy no memory, so there is nothing to move.
///
/// # Safety
/// `first..first + count` must be initialized, `dst..dst + count` must be valid for
/// writes, both inside one allocation, and `dst <= first`.
pub(crate) unsafe fn shift_toward_front<T>(first: *mut T, count: usize, dst: *mut T) {
    if mem::size_of::<T>() == 0 {
        return;
    }
    unsafe {
        let k = first.offset_from(dst) as usize;
        if k == 0 || count == 0 {
            return;
        }
        if k >= count {
            move_disjoint(first, dst, count);
        } else {
            move_disjoint(first, dst, k);
            ptr::copy(first.add(k), first, count - k);
        }
    }
}

/// Moves `count` elements starting at `first` up to `dst`, where `dst >= first`.
///
/// Mirror image of [`shift_toward_front`]: the trailing `k = dst - first` elements go
/// into the fresh slots past the source range first, then the overlapping head is moved
/// back to front. After the call the first `min(k, count)` source slots are vacated.
///
/// # Safety
/// `first..first + count` must be initialized, `dst..dst + count` must be valid for
/// writes, both inside one allocation, and `dst >= first`.
pub(crate) unsafe fn shift_toward_back<T>(first: *mut T, count: usize, dst: *mut T) {
    if mem::size_of::<T>() == 0 {
        return;
    }
    unsafe {
        let k = dst.offset_from(first) as usize;
        if k == 0 || count == 0 {
            return;
        }
        if k >= count {
            move_disjoint(first, dst, count);
        } else {
            let last = first.add(count);
            move_disjoint(last.sub(k), last, k);
            ptr::copy(first, dst, count - k);
        }
    }
}

/// Drops `count` initialized elements starting at `first`.
///
/// Types without drop glue skip the walk entirely. If one destructor panics the rest
/// of the range is still dropped before unwinding continues.
///
/// # Safety
/// `first..first + count` must be initialized and is uninitialized afterwards.
#[inline]
pub(crate) unsafe fn destroy<T>(first: *mut T, count: usize) {
    if mem::needs_drop::<T>() && count != 0 {
        unsafe { ptr::drop_in_place(ptr::slice_from_raw_parts_mut(first, count)) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{DropCounter, Tracked};
    use core::mem::MaybeUninit;

    /// Fills `slots[at..at + values.len()]` and returns the raw base pointer.
    fn stage<T>(slots: &mut [MaybeUninit<T>], at: usize, values: Vec<T>) -> *mut T {
        for (i, v) in values.into_iter().enumerate() {
            slots[at + i].write(v);
        }
        slots.as_mut_ptr() as *mut T
    }

    unsafe fn collect<T: Clone>(base: *mut T, range: core::ops::Range<usize>) -> Vec<T> {
        range.map(|i| unsafe { (*base.add(i)).clone() }).collect()
    }

    #[test]
    fn test_relocate_shift_front_overlapping() {
        let mut slots: [MaybeUninit<String>; 10] = [const { MaybeUninit::uninit() }; 10];
        let values: Vec<String> = (0..6).map(|i| i.to_string()).collect();
        let base = stage(&mut slots, 3, values);
        unsafe {
            // 6 elements down by 2: overlap of 4
            shift_toward_front(base.add(3), 6, base.add(1));
            assert_eq!(collect(base, 1..7), vec!["0", "1", "2", "3", "4", "5"]);
            destroy(base.add(1), 6);
        }
    }

    #[test]
    fn test_relocate_shift_front_disjoint() {
        let mut slots: [MaybeUninit<String>; 10] = [const { MaybeUninit::uninit() }; 10];
        let base = stage(&mut slots, 6, vec!["a".into(), "b".into()]);
        unsafe {
            shift_toward_front(base.add(6), 2, base);
            assert_eq!(collect(base, 0..2), vec!["a", "b"]);
            destroy(base, 2);
        }
    }

    #[test]
    fn test_relocate_shift_back_overlapping() {
        let mut slots: [MaybeUninit<String>; 10] = [const { MaybeUninit::uninit() }; 10];
        let values: Vec<String> = (0..7).map(|i| i.to_string()).collect();
        let base = stage(&mut slots, 0, values);
        unsafe {
            shift_toward_back(base, 7, base.add(3));
            assert_eq!(collect(base, 3..10), vec!["0", "1", "2", "3", "4", "5", "6"]);
            destroy(base.add(3), 7);
        }
    }

    #[test]
    fn test_relocate_shift_back_disjoint() {
        let mut slots: [MaybeUninit<u32>; 8] = [MaybeUninit::uninit(); 8];
        let base = stage(&mut slots, 0, vec![7, 8, 9]);
        unsafe {
            shift_toward_back(base, 3, base.add(5));
            assert_eq!(collect(base, 5..8), vec![7, 8, 9]);
        }
    }

    #[test]
    fn test_relocate_zero_distance_is_noop() {
        let mut slots: [MaybeUninit<u32>; 4] = [MaybeUninit::uninit(); 4];
        let base = stage(&mut slots, 0, vec![1, 2, 3, 4]);
        unsafe {
            shift_toward_front(base, 4, base);
            shift_toward_back(base, 4, base);
            assert_eq!(collect(base, 0..4), vec![1, 2, 3, 4]);
        }
    }

    #[test]
    fn test_relocate_moves_never_drop() {
        let counter = DropCounter::new();
        let mut slots: [MaybeUninit<Tracked>; 8] = [const { MaybeUninit::uninit() }; 8];
        let values: Vec<Tracked> = (0..4).map(|i| counter.track(i)).collect();
        let base = stage(&mut slots, 2, values);
        unsafe {
            shift_toward_back(base.add(2), 4, base.add(3));
            shift_toward_front(base.add(3), 4, base);
            let mut moved: [MaybeUninit<Tracked>; 4] = [const { MaybeUninit::uninit() }; 4];
            let moved = moved.as_mut_ptr() as *mut Tracked;
            move_disjoint(base, moved, 4);
            assert_eq!(counter.drops(), 0);
            destroy(moved, 4);
        }
        assert_eq!(counter.drops(), 4);
    }

    #[test]
    fn test_relocate_zero_sized_shifts_are_noops() {
        let base = core::ptr::NonNull::<()>::dangling().as_ptr();
        unsafe {
            // every slot of a zero-sized type shares one address
            shift_toward_front(base.wrapping_add(3), 4, base.wrapping_add(1));
            shift_toward_back(base, 4, base.wrapping_add(2));
            destroy(base, 4);
        }
    }
}
