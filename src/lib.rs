//! # lazyseq
//!
//! Lazily evaluated, memoized, immutable sequences that are safe to share
//! between threads.
//!
//! ## Overview
//!
//! A [`LazySequence`] is a singly-linked chain whose elements are computed on
//! first demand and then cached. Chains can be built from closures, fixed
//! values, iterators, or external pull sources, and derived with `filter` and
//! `transform` without evaluating anything. Any number of threads may walk
//! the same chain; every element is still computed exactly once.
//!
//! - **Construction**: `new`, `try_new`, `of`, `from_source`, `FromIterator`
//! - **Derivation**: `filter`, `transform`
//! - **Traversal**: `iter`, `aggregate`, `find_first`, `to_list`, `to_set`
//!
//! ## Feature Flags
//!
//! - `sequence`: The lazy sequence (enabled by default)
//! - `serde`: `Serialize` implementations
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use lazyseq::prelude::*;
//!
//! let halves = LazySequence::of(1..=10)
//!     .filter(|n| n % 2 == 0)
//!     .transform(|n| n / 2);
//!
//! assert_eq!(halves.to_list().unwrap(), vec![1, 2, 3, 4, 5]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```rust
/// use lazyseq::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::SequenceError;

    #[cfg(feature = "sequence")]
    pub use crate::sequence::{Iter, LazySequence, PullSource, SortedSet};
}

pub mod error;

#[cfg(feature = "sequence")]
pub mod sequence;

pub use error::SequenceError;

#[cfg(feature = "sequence")]
pub use sequence::{Iter, LazySequence, PullSource, SortedSet};
