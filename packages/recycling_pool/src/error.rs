use thiserror::Error;

use crate::Key;

/// Errors that can occur when operating on a [`Pool`][crate::Pool].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The caller asked the pool to do something that is not valid for the current state of
    /// the instance identified by the key. The pool refused the operation and did not change.
    #[error("invalid state for pool instance {key}: {problem}")]
    InvalidState {
        /// The key that the operation was attempted with.
        key: Key,

        /// A human-readable description of the problem.
        problem: String,
    },
}

/// A specialized `Result` type for pool operations, returning the crate's
/// [`Error`] type as the error value.
pub type Result<T> = std::result::Result<T, Error>;
