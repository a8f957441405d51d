//! The lazy node and its realization protocol.
//!
//! A [`LazySequence<E>`] is a shared handle to a node with two independently
//! realized slots: the node's element and its successor. Each slot is computed
//! at most once on success, by whichever thread demands it first, and is then
//! visible to every other thread without further synchronization.
//!
//! A node without a [`Step`] is the terminal node. Its element is always
//! absent and its successor is itself.

use std::fmt;
use std::sync::Arc;

use super::slot::OnceSlot;
use super::terminal;
use crate::error::SequenceError;

/// How a non-terminal node realizes its slots.
///
/// Implemented by the user-closure node, by pull-source nodes, and by the
/// nodes `filter` and `transform` build.
pub(crate) trait Step<E>: Send + Sync {
    /// Produces the node's element, or `None` to mark the end of the chain.
    fn element(&self) -> Result<Option<E>, SequenceError>;

    /// Produces the node's successor. `node` is the node owning this step.
    fn successor(&self, node: &LazySequence<E>) -> Result<LazySequence<E>, SequenceError>;
}

pub(crate) struct Node<E> {
    element: OnceSlot<Option<E>>,
    successor: OnceSlot<LazySequence<E>>,
    step: Option<Box<dyn Step<E>>>,
}

/// A lazily evaluated, memoized, immutable singly-linked sequence.
///
/// Cloning a `LazySequence` is cheap: it shares the underlying node, so every
/// clone observes the same realized elements. Chains derived with
/// [`filter`](LazySequence::filter) or [`transform`](LazySequence::transform)
/// read from the source chain and share its memoized work.
///
/// # Thread Safety
///
/// `LazySequence<E>` is `Send + Sync` when `E: Send + Sync`. Any number of
/// threads may traverse the same chain; each element and successor is
/// produced exactly once regardless of how many threads race to demand it.
///
/// # Absent elements
///
/// Producers return `E`, never an optional value, so a live element cannot be
/// confused with the end of the chain.
///
/// # Examples
///
/// ```rust
/// use lazyseq::LazySequence;
///
/// let numbers = LazySequence::of(1..=10);
/// let halves = numbers.filter(|n| n % 2 == 0).transform(|n| n / 2);
///
/// assert_eq!(halves.to_list().unwrap(), vec![1, 2, 3, 4, 5]);
/// ```
pub struct LazySequence<E> {
    node: Arc<Node<E>>,
}

impl<E> Clone for LazySequence<E> {
    fn clone(&self) -> Self {
        Self {
            node: Arc::clone(&self.node),
        }
    }
}

impl<E: Send + Sync + 'static> Default for LazySequence<E> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<E: Send + Sync + 'static> LazySequence<E> {
    /// Creates a node from an element producer and a successor producer.
    ///
    /// Neither producer runs until the corresponding slot is demanded, and
    /// each runs at most once.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyseq::LazySequence;
    ///
    /// let tail = LazySequence::new(|| 2, LazySequence::empty);
    /// let head = LazySequence::new(|| 1, move || tail.clone());
    ///
    /// assert_eq!(head.to_list().unwrap(), vec![1, 2]);
    /// ```
    pub fn new<P, S>(element: P, successor: S) -> Self
    where
        P: Fn() -> E + Send + Sync + 'static,
        S: Fn() -> Self + Send + Sync + 'static,
    {
        Self::try_new(move || Ok(element()), move || Ok(successor()))
    }

    /// Creates a node from fallible producers.
    ///
    /// A producer that returns `Err` leaves its slot unrealized; the error is
    /// returned to the caller that demanded the slot, and the next demand runs
    /// the producer again.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyseq::{LazySequence, SequenceError};
    ///
    /// let failing: LazySequence<i32> = LazySequence::try_new(
    ///     || Err(SequenceError::producer("not yet")),
    ///     || Ok(LazySequence::empty()),
    /// );
    ///
    /// assert!(failing.element().is_err());
    /// assert!(!failing.is_element_realized());
    /// ```
    pub fn try_new<P, S>(element: P, successor: S) -> Self
    where
        P: Fn() -> Result<E, SequenceError> + Send + Sync + 'static,
        S: Fn() -> Result<Self, SequenceError> + Send + Sync + 'static,
    {
        Self::from_step(ProducerStep { element, successor })
    }

    /// Returns the canonical empty sequence for `E`.
    ///
    /// Every call returns the same node; see [`LazySequence::ptr_eq`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyseq::LazySequence;
    ///
    /// let empty: LazySequence<u8> = LazySequence::empty();
    /// assert!(empty.is_terminal());
    /// assert!(LazySequence::ptr_eq(&empty, &LazySequence::empty()));
    /// ```
    pub fn empty() -> Self {
        terminal::canonical()
    }

    pub(crate) fn from_step(step: impl Step<E> + 'static) -> Self {
        Self {
            node: Arc::new(Node {
                element: OnceSlot::new(),
                successor: OnceSlot::new(),
                step: Some(Box::new(step)),
            }),
        }
    }

    /// Builds a fresh terminal node. Only the terminal registry calls this.
    pub(crate) fn terminal_node() -> Self {
        Self {
            node: Arc::new(Node {
                element: OnceSlot::new(),
                successor: OnceSlot::new(),
                step: None,
            }),
        }
    }

    /// Returns this node's element, realizing it on first demand.
    ///
    /// `Ok(None)` means the chain ends here.
    ///
    /// # Errors
    ///
    /// Returns the producer's error if realization fails. The slot stays
    /// unrealized and a later call retries.
    pub fn element(&self) -> Result<Option<&E>, SequenceError> {
        let Some(step) = &self.node.step else {
            return Ok(None);
        };
        let element = self
            .node
            .element
            .get_or_try_realize(|| traced("element", step.element()))?;
        Ok(element.as_ref())
    }

    /// Returns the next node, realizing it on first demand.
    ///
    /// The successor of the terminal node is the terminal node.
    ///
    /// # Errors
    ///
    /// Returns the producer's error if realization fails. The slot stays
    /// unrealized and a later call retries.
    pub fn successor(&self) -> Result<Self, SequenceError> {
        let Some(step) = &self.node.step else {
            return Ok(self.clone());
        };
        self.node
            .successor
            .get_or_try_realize(|| traced("successor", step.successor(self)))
            .cloned()
    }
}

impl<E> LazySequence<E> {
    /// Returns whether this is the terminal node.
    ///
    /// Note that a non-terminal node may still realize to the end of the
    /// chain, e.g. a filtered node whose search finds no further match.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.node.step.is_none()
    }

    /// Returns whether the element slot has been realized. Never forces.
    #[inline]
    pub fn is_element_realized(&self) -> bool {
        self.is_terminal() || self.node.element.is_realized()
    }

    /// Returns whether the successor slot has been realized. Never forces.
    #[inline]
    pub fn is_successor_realized(&self) -> bool {
        self.is_terminal() || self.node.successor.is_realized()
    }

    /// Returns whether both handles point at the same node.
    #[inline]
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        Arc::ptr_eq(&this.node, &other.node)
    }
}

fn traced<T>(slot: &'static str, result: Result<T, SequenceError>) -> Result<T, SequenceError> {
    match &result {
        Ok(_) => tracing::trace!(slot, "realized lazy sequence slot"),
        Err(error) => tracing::debug!(slot, %error, "producer failed, slot left unrealized"),
    }
    result
}

struct ProducerStep<P, S> {
    element: P,
    successor: S,
}

impl<E, P, S> Step<E> for ProducerStep<P, S>
where
    P: Fn() -> Result<E, SequenceError> + Send + Sync,
    S: Fn() -> Result<LazySequence<E>, SequenceError> + Send + Sync,
{
    fn element(&self) -> Result<Option<E>, SequenceError> {
        (self.element)().map(Some)
    }

    fn successor(&self, _node: &LazySequence<E>) -> Result<LazySequence<E>, SequenceError> {
        (self.successor)()
    }
}

impl<E> Drop for Node<E> {
    fn drop(&mut self) {
        // Unlink the realized successor chain iteratively; recursive drops
        // overflow the stack on long chains.
        let mut next = self.successor.take();
        while let Some(sequence) = next {
            match Arc::try_unwrap(sequence.node) {
                Ok(mut node) => next = node.successor.take(),
                Err(_) => break,
            }
        }
    }
}

impl<E: fmt::Debug> fmt::Debug for LazySequence<E> {
    /// Formats the realized prefix of the chain without forcing anything.
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = formatter.debug_list();
        let mut cursor = self.clone();

        while !cursor.is_terminal() {
            match cursor.node.element.get() {
                Some(Some(element)) => {
                    list.entry(element);
                }
                Some(None) => break,
                None => {
                    list.entry(&format_args!("<unrealized>"));
                    break;
                }
            }

            let Some(next) = cursor.node.successor.get().cloned() else {
                list.entry(&format_args!("<unrealized>"));
                break;
            };
            cursor = next;
        }

        list.finish()
    }
}
