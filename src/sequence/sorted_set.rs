//! Ordered, duplicate-free materialization of a chain.
//!
//! [`SortedSet`] keeps its elements in a sorted `Vec` under a caller-supplied
//! comparator. Elements the comparator considers equal are stored once; the
//! first one seen wins.
//!
//! # Building
//!
//! [`LazySequence::to_set`] compares each incoming element with the current
//! maximum first. Larger elements extend the sorted run, equal ones are
//! dropped, and smaller ones are set aside. The set-aside elements are
//! stably sorted and merged into the run once at the end, so building takes
//! `O(n log n)` time whatever the input order. For an already ascending chain
//! of `n` distinct elements the comparator is called exactly `n - 1` times.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use super::node::LazySequence;
use crate::error::SequenceError;

type Comparator<E> = Arc<dyn Fn(&E, &E) -> Ordering + Send + Sync>;

/// A sorted set ordered by a comparator.
///
/// # Examples
///
/// ```rust
/// use lazyseq::LazySequence;
///
/// let set = LazySequence::of([3, 1, 2, 3, 1])
///     .to_set(|left, right| left.cmp(right))
///     .unwrap();
///
/// assert_eq!(set.as_slice(), &[1, 2, 3]);
/// assert!(set.contains(&2));
/// ```
#[derive(Clone)]
pub struct SortedSet<E> {
    elements: Vec<E>,
    comparator: Comparator<E>,
}

/// Accumulates a chain into a sorted, duplicate-free vector.
struct SetBuilder<E> {
    run: Vec<E>,
    stragglers: Vec<E>,
    comparator: Comparator<E>,
}

impl<E> SetBuilder<E> {
    fn new(comparator: Comparator<E>) -> Self {
        Self {
            run: Vec::new(),
            stragglers: Vec::new(),
            comparator,
        }
    }

    fn push(&mut self, element: E) {
        let order = match self.run.last() {
            None => Ordering::Less,
            Some(last) => (self.comparator)(last, &element),
        };
        match order {
            Ordering::Less => self.run.push(element),
            Ordering::Equal => {}
            Ordering::Greater => self.stragglers.push(element),
        }
    }

    fn finish(self) -> SortedSet<E> {
        let Self {
            run,
            mut stragglers,
            comparator,
        } = self;
        if stragglers.is_empty() {
            return SortedSet {
                elements: run,
                comparator,
            };
        }

        // Stable, so the first of several equal stragglers is kept.
        stragglers.sort_by(|left, right| comparator(left, right));
        stragglers.dedup_by(|later, earlier| comparator(&*earlier, &*later) == Ordering::Equal);

        // An element in the run always arrived before any equal straggler.
        let mut elements = Vec::with_capacity(run.len() + stragglers.len());
        let mut run = run.into_iter().peekable();
        let mut stragglers = stragglers.into_iter().peekable();
        loop {
            let order = match (run.peek(), stragglers.peek()) {
                (Some(left), Some(right)) => comparator(left, right),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => break,
            };
            match order {
                Ordering::Less => elements.extend(run.next()),
                Ordering::Greater => elements.extend(stragglers.next()),
                Ordering::Equal => {
                    elements.extend(run.next());
                    stragglers.next();
                }
            }
        }

        SortedSet {
            elements,
            comparator,
        }
    }
}

impl<E> SortedSet<E> {
    /// Returns the number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns whether the set is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns whether an element comparator-equal to `element` is present.
    pub fn contains(&self, element: &E) -> bool {
        self.elements
            .binary_search_by(|candidate| (self.comparator)(candidate, element))
            .is_ok()
    }

    /// Returns the smallest element.
    #[inline]
    pub fn first(&self) -> Option<&E> {
        self.elements.first()
    }

    /// Returns the largest element.
    #[inline]
    pub fn last(&self) -> Option<&E> {
        self.elements.last()
    }

    /// Returns an iterator over the elements in ascending order.
    pub fn iter(&self) -> std::slice::Iter<'_, E> {
        self.elements.iter()
    }

    /// Returns the elements in ascending order.
    #[inline]
    pub fn as_slice(&self) -> &[E] {
        &self.elements
    }

    /// Consumes the set, returning its elements in ascending order.
    pub fn into_vec(self) -> Vec<E> {
        self.elements
    }
}

impl<E: Clone + Send + Sync + 'static> LazySequence<E> {
    /// Realizes the whole chain into a [`SortedSet`] ordered by `comparator`.
    ///
    /// # Errors
    ///
    /// Returns the first realization error encountered.
    pub fn to_set<C>(&self, comparator: C) -> Result<SortedSet<E>, SequenceError>
    where
        C: Fn(&E, &E) -> Ordering + Send + Sync + 'static,
    {
        let mut builder = SetBuilder::new(Arc::new(comparator));
        let mut cursor = self.clone();
        while let Some(element) = cursor.element()? {
            builder.push(element.clone());
            cursor = cursor.successor()?;
        }
        Ok(builder.finish())
    }
}

impl<'a, E> IntoIterator for &'a SortedSet<E> {
    type Item = &'a E;
    type IntoIter = std::slice::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<E> IntoIterator for SortedSet<E> {
    type Item = E;
    type IntoIter = std::vec::IntoIter<E>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.into_iter()
    }
}

impl<E: fmt::Debug> fmt::Debug for SortedSet<E> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_set().entries(self.elements.iter()).finish()
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<E: serde::Serialize> serde::Serialize for SortedSet<E> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for element in self {
            seq.serialize_element(element)?;
        }
        seq.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};

    fn natural(left: &i32, right: &i32) -> Ordering {
        left.cmp(right)
    }

    #[rstest]
    fn test_to_set_ascending_input_compares_once_per_insert() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let set = LazySequence::of(1..=10)
            .to_set(move |left: &i32, right: &i32| {
                counter.fetch_add(1, AtomicOrdering::SeqCst);
                left.cmp(right)
            })
            .unwrap();

        assert_eq!(calls.load(AtomicOrdering::SeqCst), 9);
        assert_eq!(set.into_vec(), (1..=10).collect::<Vec<_>>());
    }

    #[rstest]
    #[case(vec![], vec![])]
    #[case(vec![5, 3, 9, 1], vec![1, 3, 5, 9])]
    #[case(vec![2, 2, 2], vec![2])]
    #[case(vec![4, 1, 4, 3, 1, 2], vec![1, 2, 3, 4])]
    fn test_to_set_sorts_and_deduplicates(#[case] input: Vec<i32>, #[case] expected: Vec<i32>) {
        let set = LazySequence::of(input).to_set(natural).unwrap();
        assert_eq!(set.as_slice(), expected.as_slice());
    }

    #[rstest]
    fn test_to_set_keeps_first_of_equal_elements() {
        let set = LazySequence::of([("b", 1), ("a", 1), ("c", 2)])
            .to_set(|left, right| left.1.cmp(&right.1))
            .unwrap();
        assert_eq!(set.as_slice(), &[("b", 1), ("c", 2)]);
    }

    #[rstest]
    fn test_to_set_keeps_first_of_equal_out_of_order_elements() {
        let set = LazySequence::of([("a", 1), ("b", 3), ("c", 1), ("d", 2), ("e", 2)])
            .to_set(|left, right| left.1.cmp(&right.1))
            .unwrap();
        assert_eq!(set.as_slice(), &[("a", 1), ("d", 2), ("b", 3)]);
    }

    #[rstest]
    fn test_to_set_descending_input_is_linearithmic() {
        const SIZE: usize = 100_000;
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let set = LazySequence::of((0..SIZE).rev())
            .to_set(move |left: &usize, right: &usize| {
                counter.fetch_add(1, AtomicOrdering::Relaxed);
                left.cmp(right)
            })
            .unwrap();

        assert_eq!(set.len(), SIZE);
        assert_eq!(set.first(), Some(&0));
        assert_eq!(set.last(), Some(&(SIZE - 1)));
        assert!(calls.load(AtomicOrdering::Relaxed) <= 6 * SIZE);
    }

    #[rstest]
    fn test_to_set_scrambled_input() {
        const SIZE: usize = 1 << 14;
        let scrambled = (0..SIZE).map(|index| (index * 40_503) % SIZE);
        let set = LazySequence::of(scrambled.chain(0..SIZE))
            .to_set(|left: &usize, right: &usize| left.cmp(right))
            .unwrap();
        assert_eq!(set.into_vec(), (0..SIZE).collect::<Vec<_>>());
    }

    #[rstest]
    fn test_to_set_reverse_comparator() {
        let set = LazySequence::of(1..=4)
            .to_set(|left: &i32, right: &i32| right.cmp(left))
            .unwrap();
        assert_eq!(set.first(), Some(&4));
        assert_eq!(set.last(), Some(&1));
        assert!(set.contains(&3));
        assert!(!set.contains(&5));
    }

    #[rstest]
    fn test_sorted_set_debug_and_iteration() {
        let set = LazySequence::of([3, 1, 2]).to_set(natural).unwrap();
        assert_eq!(format!("{set:?}"), "{1, 2, 3}");
        assert_eq!(set.len(), 3);
        assert!(!set.is_empty());
        let doubled: Vec<i32> = set.iter().map(|n| n * 2).collect();
        assert_eq!(doubled, vec![2, 4, 6]);
    }
}
