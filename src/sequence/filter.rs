//! Lazy filtering.
//!
//! A filtered node owns a resume point: the source node where its search for
//! the next match begins. The search runs once, through a slot shared by the
//! node's element and successor producers, so each examined source element is
//! tested exactly once no matter which slot is demanded first. The successor
//! resumes right after the match.

use std::sync::Arc;

use super::node::{LazySequence, Step};
use super::slot::OnceSlot;
use crate::error::SequenceError;

type Predicate<E> = Arc<dyn Fn(&E) -> bool + Send + Sync>;

struct FilterStep<E> {
    resume: LazySequence<E>,
    predicate: Predicate<E>,
    /// The matching source node, or `None` once the source is exhausted.
    matched: OnceSlot<Option<LazySequence<E>>>,
}

impl<E: Clone + Send + Sync + 'static> FilterStep<E> {
    fn search(&self) -> Result<Option<&LazySequence<E>>, SequenceError> {
        let matched = self.matched.get_or_try_realize(|| {
            let mut cursor = self.resume.clone();
            loop {
                let accepted = match cursor.element()? {
                    Some(element) => (self.predicate)(element),
                    None => return Ok(None),
                };
                if accepted {
                    return Ok(Some(cursor));
                }
                cursor = cursor.successor()?;
            }
        })?;
        Ok(matched.as_ref())
    }
}

impl<E: Clone + Send + Sync + 'static> Step<E> for FilterStep<E> {
    fn element(&self) -> Result<Option<E>, SequenceError> {
        match self.search()? {
            Some(matched) => Ok(matched.element()?.cloned()),
            None => Ok(None),
        }
    }

    fn successor(&self, _node: &LazySequence<E>) -> Result<LazySequence<E>, SequenceError> {
        match self.search()? {
            Some(matched) => Ok(filtered(matched.successor()?, Arc::clone(&self.predicate))),
            None => Ok(LazySequence::empty()),
        }
    }
}

fn filtered<E: Clone + Send + Sync + 'static>(
    source: LazySequence<E>,
    predicate: Predicate<E>,
) -> LazySequence<E> {
    if source.is_terminal() {
        return source;
    }
    LazySequence::from_step(FilterStep {
        resume: source,
        predicate,
        matched: OnceSlot::new(),
    })
}

impl<E: Clone + Send + Sync + 'static> LazySequence<E> {
    /// Returns the chain of elements satisfying `predicate`, in order.
    ///
    /// Nothing is evaluated until an element of the filtered chain is
    /// demanded. Each source element is tested at most once, and only source
    /// elements up to the demanded match are forced.
    ///
    /// A filtered node memoizes its own copy of the match, cloned once from
    /// the source node when first demanded, so `E: Clone` is required and
    /// each matched element is held twice while both chains are alive. Wrap
    /// large elements in an `Arc` to make that copy cheap.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyseq::LazySequence;
    ///
    /// let evens = LazySequence::of(1..=10).filter(|n| n % 2 == 0);
    /// assert_eq!(evens.to_list().unwrap(), vec![2, 4, 6, 8, 10]);
    /// ```
    pub fn filter<P>(&self, predicate: P) -> Self
    where
        P: Fn(&E) -> bool + Send + Sync + 'static,
    {
        filtered(self.clone(), Arc::new(predicate))
    }
}
