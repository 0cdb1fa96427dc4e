//! By-value iteration.

use core::fmt;
use core::iter::FusedIterator;

use super::SymVec;
use crate::alloc::{Global, RawAllocator};
use crate::vecs::block::RawBlock;

/// Owning iterator over the elements of a [`SymVec`].
///
/// Takes over the array's block: elements are read out of `begin..end` from both
/// ends, and whatever has not been yielded is dropped together with the block.
pub struct IntoIter<T, A: RawAllocator = Global> {
    block: RawBlock<T, A>,
}

unsafe impl<T: Send, A: RawAllocator + Send> Send for IntoIter<T, A> {}
unsafe impl<T: Sync, A: RawAllocator + Sync> Sync for IntoIter<T, A> {}

impl<T, A: RawAllocator> IntoIter<T, A> {
    /// The elements not yet yielded.
    pub fn as_slice(&self) -> &[T] {
        self.block.live()
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.block.live_mut()
    }

    pub fn allocator(&self) -> &A {
        self.block.allocator()
    }
}

impl<T, A: RawAllocator> Iterator for IntoIter<T, A> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        if self.block.len() == 0 {
            return None;
        }
        let value = unsafe { self.block.slot(self.block.begin).read() };
        self.block.begin += 1;
        Some(value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.block.len();
        (len, Some(len))
    }

    #[inline]
    fn count(self) -> usize {
        self.block.len()
    }
}

impl<T, A: RawAllocator> DoubleEndedIterator for IntoIter<T, A> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        if self.block.len() == 0 {
            return None;
        }
        self.block.end -= 1;
        Some(unsafe { self.block.slot(self.block.end).read() })
    }
}

impl<T, A: RawAllocator> ExactSizeIterator for IntoIter<T, A> {}

impl<T, A: RawAllocator> FusedIterator for IntoIter<T, A> {}

impl<T: fmt::Debug, A: RawAllocator> fmt::Debug for IntoIter<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}

impl<T, A: RawAllocator> IntoIterator for SymVec<T, A> {
    type Item = T;
    type IntoIter = IntoIter<T, A>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { block: self.block }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{DropCounter, TestAlloc};

    #[test]
    fn test_into_iter_both_ends() {
        let mut v: SymVec<i32> = (1..=3).collect();
        v.push_front(0);
        let mut it = v.into_iter();
        assert_eq!(it.len(), 4);
        assert_eq!(it.next(), Some(0));
        assert_eq!(it.next_back(), Some(3));
        assert_eq!(it.as_slice(), &[1, 2]);
        assert_eq!(it.size_hint(), (2, Some(2)));
        assert_eq!(it.next(), Some(1));
        assert_eq!(it.next(), Some(2));
        assert_eq!(it.next(), None);
        assert_eq!(it.next_back(), None);
    }

    #[test]
    fn test_into_iter_collect_and_rev() {
        let v: SymVec<String> = ["a", "b", "c"].map(String::from).into();
        let reversed: Vec<String> = v.clone().into_iter().rev().collect();
        assert_eq!(reversed, vec!["c", "b", "a"]);
        let mut joined = String::new();
        for s in v {
            joined.push_str(&s);
        }
        assert_eq!(joined, "abc");
    }

    #[test]
    fn test_into_iter_partial_drops_rest() {
        let counter = DropCounter::new();
        let alloc = TestAlloc::new();
        let mut v = SymVec::new_in(alloc.clone());
        for i in 0..6 {
            v.push_back(counter.track(i));
        }
        let mut it = v.into_iter();
        let first = it.next().unwrap();
        let last = it.next_back().unwrap();
        assert_eq!((first.value, last.value), (0, 5));
        drop(it);
        assert_eq!(counter.drops(), 4);
        assert_eq!(alloc.live_blocks(), 0);
        drop((first, last));
        assert_eq!(counter.drops(), 6);
    }

    #[test]
    fn test_into_iter_debug() {
        let v: SymVec<i32> = (0..2).collect();
        let it = v.into_iter();
        assert_eq!(format!("{:?}", it), "IntoIter([0, 1])");
    }
}
