//! Error types for lazy sequences.
//!
//! Realizing a slot of a [`LazySequence`](crate::sequence::LazySequence) can
//! fail when a pull source or a user producer reports an error. The failure is
//! returned to whichever accessor triggered the realization; nothing is cached,
//! so a later access runs the producer again.

use std::error::Error;

/// Represents errors that can occur while realizing a lazy sequence.
///
/// # Examples
///
/// ```rust
/// use lazyseq::SequenceError;
///
/// let error = SequenceError::producer("disk unavailable");
/// assert_eq!(format!("{error}"), "producer failed: disk unavailable");
/// ```
#[derive(Debug, thiserror::Error)]
pub enum SequenceError {
    /// A pull source failed while producing its next element.
    #[error("pull source failed: {0}")]
    Source(#[source] Box<dyn Error + Send + Sync>),

    /// A user-supplied producer reported a failure.
    #[error("producer failed: {message}")]
    Producer {
        /// Human-readable reason reported by the producer.
        message: String,
    },

    /// A pull source was asked for an element after reporting that it had none.
    #[error("pull source has no more elements")]
    Exhausted,
}

impl SequenceError {
    /// Wraps an arbitrary error raised by a pull source.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyseq::SequenceError;
    ///
    /// let io = std::io::Error::other("connection reset");
    /// let error = SequenceError::source_failed(io);
    /// assert!(matches!(error, SequenceError::Source(_)));
    /// ```
    pub fn source_failed<E>(error: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Self::Source(Box::new(error))
    }

    /// Creates a producer failure with the given message.
    pub fn producer(message: impl Into<String>) -> Self {
        Self::Producer {
            message: message.into(),
        }
    }
}
