//! Memory allocation seam for [`SymVec`](crate::SymVec).
//!
//! The standard `Allocator` trait is still unstable, so the container is generic over
//! [`RawAllocator`] instead. Only raw storage is requested from the allocator; element
//! construction and destruction are done by the container itself with `ptr::write` and
//! `ptr::drop_in_place`.

use core::alloc::Layout;
use core::fmt;
use core::ptr::NonNull;

/// The allocator refused a request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AllocError;

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("memory allocation failed")
    }
}

impl std::error::Error for AllocError {}

/// A source of raw, uninitialized memory blocks.
///
/// # Safety
/// A pointer returned by `allocate` must be valid for reads and writes of
/// `layout.size()` bytes, aligned to `layout.align()`, and must stay valid until it is
/// passed back to `deallocate` with the same layout. `SymVec` never calls `allocate`
/// with a zero-sized layout.
pub unsafe trait RawAllocator {
    /// Acquires a block described by `layout`.
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError>;

    /// Releases a block previously returned by [`allocate`](RawAllocator::allocate).
    ///
    /// # Safety
    /// `ptr` must have been returned by `allocate` on this allocator with `layout`,
    /// and must not be used afterwards.
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout);
}

/// The global heap allocator (`std::alloc`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Global;

unsafe impl RawAllocator for Global {
    #[inline]
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        debug_assert!(layout.size() != 0);
        NonNull::new(unsafe { std::alloc::alloc(layout) }).ok_or(AllocError)
    }

    #[inline]
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        unsafe { std::alloc::dealloc(ptr.as_ptr(), layout) }
    }
}

unsafe impl<A: RawAllocator + ?Sized> RawAllocator for &A {
    #[inline]
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        (**self).allocate(layout)
    }

    #[inline]
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        unsafe { (**self).deallocate(ptr, layout) }
    }
}
