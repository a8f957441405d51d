//! Building chains from values, iterators, and pull sources.
//!
//! All constructors share one mechanism: the source sits behind a single
//! mutex shared by every node of the chain. A node is only built once the
//! source reports another element, and that node's element takes exactly one
//! item. A node's successor first realizes that node's own element, so items
//! are taken in chain order even when a caller asks for a successor first,
//! and then asks the source whether more is available: if not, the chain ends
//! in the canonical terminal node.
//!
//! Pull sources are never read ahead. Plain iterators answer "more?" by
//! peeking, which pulls at most one item past the demanded position.

use std::iter::Peekable;
use std::sync::Arc;

use parking_lot::Mutex;

use super::node::{LazySequence, Step};
use crate::error::SequenceError;

/// An external source of elements pulled one at a time.
///
/// A chain built with [`LazySequence::from_source`] asks `has_more` before
/// every `take_next`, consumes each element at most once, and stops asking as
/// soon as traversal stops. `has_more` must not consume anything.
///
/// # Examples
///
/// ```rust
/// use lazyseq::{LazySequence, PullSource, SequenceError};
///
/// struct Countdown(u32);
///
/// impl PullSource for Countdown {
///     type Item = u32;
///
///     fn has_more(&mut self) -> bool {
///         self.0 > 0
///     }
///
///     fn take_next(&mut self) -> Result<u32, SequenceError> {
///         self.0 -= 1;
///         Ok(self.0 + 1)
///     }
/// }
///
/// let sequence = LazySequence::from_source(Countdown(3));
/// assert_eq!(sequence.to_list().unwrap(), vec![3, 2, 1]);
/// ```
pub trait PullSource: Send {
    /// The type of element the source yields.
    type Item;

    /// Returns whether another element is available.
    fn has_more(&mut self) -> bool;

    /// Takes the next element.
    ///
    /// # Errors
    ///
    /// Returns an error if the source fails to produce the element. The
    /// demanding node stays unrealized and asks again on its next demand.
    fn take_next(&mut self) -> Result<Self::Item, SequenceError>;
}

trait Pull<E>: Send {
    fn has_more(&mut self) -> bool;

    fn pull(&mut self) -> Result<E, SequenceError>;
}

struct IteratorPull<I: Iterator>(Peekable<I>);

impl<I> Pull<I::Item> for IteratorPull<I>
where
    I: Iterator + Send,
    I::Item: Send,
{
    fn has_more(&mut self) -> bool {
        self.0.peek().is_some()
    }

    fn pull(&mut self) -> Result<I::Item, SequenceError> {
        self.0.next().ok_or(SequenceError::Exhausted)
    }
}

struct SourcePull<S>(S);

impl<S: PullSource> Pull<S::Item> for SourcePull<S> {
    fn has_more(&mut self) -> bool {
        self.0.has_more()
    }

    fn pull(&mut self) -> Result<S::Item, SequenceError> {
        self.0.take_next()
    }
}

type SharedPull<E> = Arc<Mutex<Box<dyn Pull<E>>>>;

struct SourceStep<E> {
    source: SharedPull<E>,
}

impl<E: Send + Sync + 'static> Step<E> for SourceStep<E> {
    fn element(&self) -> Result<Option<E>, SequenceError> {
        self.source.lock().pull().map(Some)
    }

    fn successor(&self, node: &LazySequence<E>) -> Result<LazySequence<E>, SequenceError> {
        node.element()?;
        if !self.source.lock().has_more() {
            return Ok(LazySequence::empty());
        }
        Ok(LazySequence::from_step(Self {
            source: Arc::clone(&self.source),
        }))
    }
}

impl<E: Send + Sync + 'static> LazySequence<E> {
    /// Creates a chain over the given values, pulled lazily from their iterator.
    ///
    /// Accepts fixed lists (arrays, vectors) as well as arbitrary iterators;
    /// the iterator is advanced at most one item past the traversed prefix.
    /// No values at all yield [`LazySequence::empty`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyseq::LazySequence;
    ///
    /// let fixed = LazySequence::of([1, 2, 3]);
    /// assert_eq!(fixed.to_list().unwrap(), vec![1, 2, 3]);
    ///
    /// let unbounded = LazySequence::of(1_u64..);
    /// assert_eq!(unbounded.find_first(|n| n * n > 50).unwrap(), Some(8));
    /// ```
    pub fn of<I>(values: I) -> Self
    where
        I: IntoIterator<Item = E>,
        I::IntoIter: Send + 'static,
    {
        Self::pulling(Box::new(IteratorPull(values.into_iter().peekable())))
    }

    /// Creates a chain over an external [`PullSource`].
    ///
    /// Asks `has_more` once up front; an exhausted source yields
    /// [`LazySequence::empty`].
    pub fn from_source<S>(source: S) -> Self
    where
        S: PullSource<Item = E> + 'static,
    {
        Self::pulling(Box::new(SourcePull(source)))
    }

    fn pulling(mut source: Box<dyn Pull<E>>) -> Self {
        if !source.has_more() {
            return Self::empty();
        }
        Self::from_step(SourceStep {
            source: Arc::new(Mutex::new(source)),
        })
    }
}

impl<E: Send + Sync + 'static> From<Vec<E>> for LazySequence<E> {
    fn from(values: Vec<E>) -> Self {
        Self::of(values)
    }
}

impl<E: Send + Sync + 'static> FromIterator<E> for LazySequence<E> {
    /// Collects the iterator into a buffer first; use [`LazySequence::of`] to
    /// pull from an iterator lazily.
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        Self::of(iter.into_iter().collect::<Vec<_>>())
    }
}
