//! Lazy element-wise transformation.

use std::sync::Arc;

use super::node::{LazySequence, Step};
use crate::error::SequenceError;

type Mapper<S, T> = Arc<dyn Fn(&S) -> T + Send + Sync>;

struct TransformStep<S, T> {
    source: LazySequence<S>,
    mapper: Mapper<S, T>,
}

impl<S, T> Step<T> for TransformStep<S, T>
where
    S: Send + Sync + 'static,
    T: Send + Sync + 'static,
{
    fn element(&self) -> Result<Option<T>, SequenceError> {
        Ok(self.source.element()?.map(|element| (self.mapper)(element)))
    }

    fn successor(&self, _node: &LazySequence<T>) -> Result<LazySequence<T>, SequenceError> {
        Ok(transformed(
            self.source.successor()?,
            Arc::clone(&self.mapper),
        ))
    }
}

fn transformed<S, T>(source: LazySequence<S>, mapper: Mapper<S, T>) -> LazySequence<T>
where
    S: Send + Sync + 'static,
    T: Send + Sync + 'static,
{
    if source.is_terminal() {
        return LazySequence::empty();
    }
    LazySequence::from_step(TransformStep { source, mapper })
}

impl<E: Send + Sync + 'static> LazySequence<E> {
    /// Returns the chain of `mapper` applied to each element, in order.
    ///
    /// The mapper for a position runs only when that position's transformed
    /// element is demanded, and at most once. The source's successor is not
    /// forced until the transformed successor is.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyseq::LazySequence;
    ///
    /// let halves = LazySequence::of(1..=10).transform(|n| n / 2);
    /// assert_eq!(halves.to_list().unwrap(), vec![0, 1, 1, 2, 2, 3, 3, 4, 4, 5]);
    /// ```
    pub fn transform<T, F>(&self, mapper: F) -> LazySequence<T>
    where
        T: Send + Sync + 'static,
        F: Fn(&E) -> T + Send + Sync + 'static,
    {
        transformed(self.clone(), Arc::new(mapper))
    }
}
