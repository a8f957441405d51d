//! Double-checked, retryable once-cell backing every realization slot.
//!
//! A [`OnceSlot`] is read without locking once published. Until then, callers
//! serialize on the slot's own mutex, re-check, and run the producer. Only a
//! successful result is published; an `Err` (or a panic, since `parking_lot`
//! mutexes do not poison) leaves the slot empty so that the next caller runs
//! the producer again.
//!
//! # Re-entry
//!
//! A producer must not realize the slot it is producing. Doing so on the same
//! thread deadlocks on the slot mutex.

use std::fmt;
use std::sync::OnceLock;

use parking_lot::Mutex;

use crate::error::SequenceError;

/// A lazily realized value that is published at most once.
pub(crate) struct OnceSlot<T> {
    value: OnceLock<T>,
    guard: Mutex<()>,
}

impl<T> OnceSlot<T> {
    /// Creates an unrealized slot.
    pub(crate) fn new() -> Self {
        Self {
            value: OnceLock::new(),
            guard: Mutex::new(()),
        }
    }

    /// Returns the published value, if any, without blocking.
    #[inline]
    pub(crate) fn get(&self) -> Option<&T> {
        self.value.get()
    }

    #[inline]
    pub(crate) fn is_realized(&self) -> bool {
        self.value.get().is_some()
    }

    /// Returns the published value, realizing it with `producer` first if needed.
    ///
    /// Concurrent callers on the same slot wait for the one running `producer`
    /// and then observe its result. Callers on other slots never wait.
    ///
    /// # Errors
    ///
    /// Returns the producer's error unchanged. Nothing is published in that case.
    pub(crate) fn get_or_try_realize<F>(&self, producer: F) -> Result<&T, SequenceError>
    where
        F: FnOnce() -> Result<T, SequenceError>,
    {
        if let Some(value) = self.value.get() {
            return Ok(value);
        }

        let _guard = self.guard.lock();
        if let Some(value) = self.value.get() {
            return Ok(value);
        }

        let value = producer()?;
        // Every writer holds `guard`, so the cell is still empty here.
        Ok(self.value.get_or_init(|| value))
    }

    /// Removes the published value. Used to unlink chains iteratively on drop.
    #[inline]
    pub(crate) fn take(&mut self) -> Option<T> {
        self.value.take()
    }
}

impl<T: fmt::Debug> fmt::Debug for OnceSlot<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value.get() {
            Some(value) => fmt::Debug::fmt(value, formatter),
            None => formatter.write_str("<unrealized>"),
        }
    }
}
