//! Sequential traversal: the forward cursor and the folds built on it.
//!
//! Every traversal starts at a chain's head and repeats "take the element,
//! advance" until the end of the chain, forcing strictly left to right and no
//! further than it needs.

use std::iter::FusedIterator;

use super::node::LazySequence;
use crate::error::SequenceError;

/// A forward cursor over a [`LazySequence`].
///
/// Yields `Ok(element)` for each element and `Err` when realizing a slot
/// fails. After an error the cursor stays where it was, so calling `next`
/// again retries the failed realization.
///
/// The chain is safe to share between threads, but a single cursor is not
/// meant to be advanced by several threads; give each thread its own cursor
/// via [`LazySequence::iter`].
///
/// # Examples
///
/// ```rust
/// use lazyseq::LazySequence;
///
/// let sequence = LazySequence::of(["x", "y"]);
/// let mut cursor = sequence.iter();
///
/// assert_eq!(cursor.next().unwrap().unwrap(), "x");
/// assert_eq!(cursor.next().unwrap().unwrap(), "y");
/// assert!(cursor.next().is_none());
/// ```
#[derive(Clone)]
pub struct Iter<E> {
    cursor: LazySequence<E>,
    pending_advance: bool,
}

impl<E: Clone + Send + Sync + 'static> Iterator for Iter<E> {
    type Item = Result<E, SequenceError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pending_advance {
            match self.cursor.successor() {
                Ok(next) => {
                    self.cursor = next;
                    self.pending_advance = false;
                }
                Err(error) => return Some(Err(error)),
            }
        }

        match self.cursor.element() {
            Ok(Some(element)) => {
                let element = element.clone();
                self.pending_advance = true;
                Some(Ok(element))
            }
            Ok(None) => None,
            Err(error) => Some(Err(error)),
        }
    }
}

impl<E: Clone + Send + Sync + 'static> FusedIterator for Iter<E> {}

impl<E: Send + Sync + 'static> LazySequence<E> {
    /// Returns a forward cursor starting at this node.
    pub fn iter(&self) -> Iter<E> {
        Iter {
            cursor: self.clone(),
            pending_advance: false,
        }
    }

    /// Folds the chain from the left, starting from `initial`.
    ///
    /// Forces the whole chain. Returns `initial` untouched for an empty chain.
    ///
    /// # Errors
    ///
    /// Returns the first realization error encountered.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyseq::LazySequence;
    ///
    /// let sum = LazySequence::of(1..=4).aggregate(0, |total, n| total + n);
    /// assert_eq!(sum.unwrap(), 10);
    /// ```
    pub fn aggregate<A, F>(&self, initial: A, mut combiner: F) -> Result<A, SequenceError>
    where
        F: FnMut(A, &E) -> A,
    {
        let mut accumulator = initial;
        let mut cursor = self.clone();
        while let Some(element) = cursor.element()? {
            accumulator = combiner(accumulator, element);
            cursor = cursor.successor()?;
        }
        Ok(accumulator)
    }
}

impl<E: Clone + Send + Sync + 'static> LazySequence<E> {
    /// Returns the first element satisfying `predicate`, or `None`.
    ///
    /// Stops at the match: nothing past it is forced.
    ///
    /// # Errors
    ///
    /// Returns the first realization error encountered.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyseq::LazySequence;
    ///
    /// let sequence = LazySequence::of(1..);
    /// assert_eq!(sequence.find_first(|n| n % 7 == 0).unwrap(), Some(7));
    /// ```
    pub fn find_first<P>(&self, mut predicate: P) -> Result<Option<E>, SequenceError>
    where
        P: FnMut(&E) -> bool,
    {
        let mut cursor = self.clone();
        while let Some(element) = cursor.element()? {
            if predicate(element) {
                return Ok(Some(element.clone()));
            }
            cursor = cursor.successor()?;
        }
        Ok(None)
    }

    /// Realizes the whole chain into a vector, preserving order.
    ///
    /// # Errors
    ///
    /// Returns the first realization error encountered.
    pub fn to_list(&self) -> Result<Vec<E>, SequenceError> {
        self.iter().collect()
    }
}

impl<E: Clone + Send + Sync + 'static> IntoIterator for &LazySequence<E> {
    type Item = Result<E, SequenceError>;
    type IntoIter = Iter<E>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<E: Clone + Send + Sync + 'static> IntoIterator for LazySequence<E> {
    type Item = Result<E, SequenceError>;
    type IntoIter = Iter<E>;

    fn into_iter(self) -> Self::IntoIter {
        Iter {
            cursor: self,
            pending_advance: false,
        }
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<E> serde::Serialize for LazySequence<E>
where
    E: serde::Serialize + Send + Sync + 'static,
{
    /// Serializes the chain as a sequence, forcing every element.
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::{Error, SerializeSeq};
        let mut seq = serializer.serialize_seq(None)?;
        let mut cursor = self.clone();
        while let Some(element) = cursor.element().map_err(S::Error::custom)? {
            seq.serialize_element(element)?;
            cursor = cursor.successor().map_err(S::Error::custom)?;
        }
        seq.end()
    }
}
