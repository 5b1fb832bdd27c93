//! Error types for pdftickle.

use std::io;
use thiserror::Error;

/// Result type alias for pdftickle operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by document construction and serialization.
#[derive(Error, Debug)]
pub enum Error {
    /// A required value was missing or out of range.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The operation is not allowed in the document's current state.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Writing to a file or stream failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    pub(crate) fn invalid_argument(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }

    pub(crate) fn invalid_state(msg: impl Into<String>) -> Self {
        Error::InvalidState(msg.into())
    }
}
