//! Error type shared by the fallible `SymVec` operations.

use core::alloc::Layout;

/// Errors reported by fallible `SymVec` operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SymVecError {
    /// A requested capacity does not fit in `max_size()` elements.
    #[error("capacity overflow: requested {requested} elements, maximum is {max}")]
    CapacityOverflow {
        /// Number of element slots that were requested.
        requested: usize,
        /// Largest representable element count for the element type.
        max: usize,
    },
    /// The allocator could not satisfy the request. The container is unchanged.
    #[error("memory allocation of {} bytes failed", .layout.size())]
    AllocError {
        /// Layout of the block that could not be allocated.
        layout: Layout,
    },
    /// Bounds-checked access past the live elements.
    #[error("index {index} out of range for length {len}")]
    OutOfRange {
        /// The index that was requested.
        index: usize,
        /// The length of the container at the time of access.
        len: usize,
    },
}
