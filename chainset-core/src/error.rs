//! Error types.
//!
//! The core set operations report "nothing to do" through their boolean
//! result and never fail. Errors only come from the non-blocking `try_*`
//! variants, which give up instead of waiting for a lock.

use std::fmt;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A lock needed by the operation was held by another thread. No state
    /// was changed and every lock taken by the attempt has been released.
    #[error("{discipline} lock is held by another thread")]
    Contended { discipline: &'static str },
}

/// Returned by `try_add` when it backs off; carries the value back.
#[derive(Error)]
#[error("value was not added: {error}")]
pub struct TryAddError<T> {
    value: T,
    #[source]
    error: Error,
}

impl<T> TryAddError<T> {
    pub(crate) fn new(value: T, error: Error) -> Self {
        TryAddError { value, error }
    }

    pub fn error(&self) -> Error {
        self.error
    }

    pub fn into_value(self) -> T {
        self.value
    }
}

impl<T> fmt::Debug for TryAddError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TryAddError")
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}
