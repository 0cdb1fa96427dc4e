//! # SymVec
//!
//! A contiguous dynamic array that keeps spare capacity at **both** ends.
//!
//! `Vec` can only grow toward the back, so inserting near the front moves almost every
//! element. `VecDeque` grows at both ends but wraps around a ring buffer and loses
//! contiguity. [`SymVec`] sits in between: elements are always one contiguous slice,
//! and a positional insert or erase shifts only the shorter of the two sides.
//!
//! ## Key Features
//!
//! * **Two-sided slack:** `push_front` / `push_back` are both amortized O(1).
//! * **Shorter-side shifting:** `insert` and `erase` move at most half the elements.
//! * **One-sided growth:** when one side runs out of room only that side is enlarged,
//!   the other side's slack is carried over unchanged.
//! * **Non-reallocating insertion:** the `join` family inserts using existing slack
//!   only, so capacity never changes.
//! * **Slice semantics:** `SymVec<T>` dereferences to `[T]`.
//!
//! ## Capacity accounting
//!
//! | Query | Meaning |
//! |-------|---------|
//! | `capacity()` | all slots |
//! | `front_capacity()` | slots from the start of the block through the last element |
//! | `back_capacity()` | slots from the first element through the end of the block |
//! | `empty_front_capacity()` | unused slots before the first element |
//! | `empty_back_capacity()` | unused slots after the last element |
//!
//! A growth step enlarges one side from `c` to `c + c / 4 + 2` slots.
//!
//! ## Examples
//!
//! ### Both ends
//!
//! ```rust
//! use symvec::SymVec;
//!
//! let mut v = SymVec::new();
//! v.push_back(2);
//! v.push_back(3);
//! v.push_front(1);
//!
//! assert_eq!(v, [1, 2, 3]);
//! assert_eq!(v.pop_front(), Some(1));
//! assert_eq!(v.back(), Some(&3));
//! ```
//!
//! ### Positional insert and erase
//!
//! ```rust
//! use symvec::SymVec;
//!
//! let mut v: SymVec<i32> = (0..10).collect();
//! v.insert(1, 100); // shifts the one element before it
//! v.insert(9, 200); // shifts the two elements after it
//! assert_eq!(v.erase(1), 100);
//! v.erase_range(3..6);
//! assert_eq!(v, [0, 1, 2, 6, 7, 200, 8, 9]);
//! ```
//!
//! ### Joining into reserved space
//!
//! ```rust
//! use symvec::SymVec;
//!
//! let mut v = SymVec::new();
//! v.reserve(4);
//! let capacity = v.capacity();
//!
//! v.join(0, 'b');
//! v.join(0, 'a');
//! v.join_from_slice(2, &['c', 'd']);
//!
//! assert_eq!(v, ['a', 'b', 'c', 'd']);
//! assert_eq!(v.capacity(), capacity);
//! ```
//!
//! ### Fallible reservation
//!
//! ```rust
//! use symvec::{SymVec, SymVecError};
//!
//! let mut v: SymVec<u64> = SymVec::new();
//! assert!(matches!(
//!     v.try_reserve_back(usize::MAX),
//!     Err(SymVecError::CapacityOverflow { .. })
//! ));
//! v.try_reserve_back(16).unwrap();
//! assert!(v.back_capacity() >= 16);
//! ```
//!
//! ## Features
//!
//! * `log` (default): emits `trace!` records under the `symvec` target whenever a block
//!   is reallocated or released.

#[macro_use]
mod macros;

// --- Module Declarations ---

pub mod alloc;
pub mod error;
pub mod vecs;

#[cfg(test)]
mod testing;

// --- Re-exports ---

pub use crate::alloc::{AllocError, Global, RawAllocator};
pub use crate::error::SymVecError;
pub use crate::vecs::sym_vec::{IntoIter, SymVec};
