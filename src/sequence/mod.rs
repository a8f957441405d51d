//! Lazy, memoized, thread-safe sequences.
//!
//! This module provides [`LazySequence`], an immutable singly-linked chain
//! whose elements and links are computed on first demand and cached.
//!
//! - **Laziness**: building a chain, or deriving one with
//!   [`filter`](LazySequence::filter) or [`transform`](LazySequence::transform),
//!   runs no user code. Work happens only when a traversal demands it.
//! - **Memoization**: each element and each link is produced at most once,
//!   however many clones, derived chains, or threads read it.
//! - **Thread safety**: chains are `Send + Sync`. Racing readers of one node
//!   block only on that node's slot; everyone else proceeds without locking.
//!
//! # Terminal node
//!
//! Every chain ends in the terminal node: its element is absent and its
//! successor is itself. There is one terminal per element type, obtained from
//! [`LazySequence::empty`].
//!
//! # Failures
//!
//! Producers, pull sources, and traversals report failures as
//! [`SequenceError`](crate::SequenceError). A failed realization is not
//! cached, so the next demand tries again.
//!
//! # Re-entrancy
//!
//! A producer must not demand the slot it is producing; doing so deadlocks.
//!
//! # Examples
//!
//! ```rust
//! use lazyseq::LazySequence;
//!
//! let numbers = LazySequence::of(1..=10);
//! let evens = numbers.filter(|n| n % 2 == 0);
//! let halves = evens.transform(|n| n / 2);
//!
//! assert_eq!(halves.aggregate(0, |sum, n| sum + n).unwrap(), 15);
//! assert_eq!(halves.find_first(|n| n % 3 == 0).unwrap(), Some(3));
//! ```

mod filter;
mod node;
mod slot;
mod sorted_set;
mod source;
mod terminal;
mod transform;
mod traversal;

pub use node::LazySequence;
pub use sorted_set::SortedSet;
pub use source::PullSource;
pub use traversal::Iter;
