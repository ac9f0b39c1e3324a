//! Core error types for scankit.
//!
//! Two layers of failure exist:
//!
//! - [`ReadFailure`] describes why a [`Source`](crate::Source) could not
//!   produce a value. Sources record it in their [`Status`](crate::Status)
//!   without raising anything.
//! - [`Error`] is what cursor operations return. A read failure only becomes
//!   an [`Error`] when a value is actually demanded (a *hard commit*).
//!
//! User-defined error types should implement `From<scankit::Error>` to
//! integrate with `?` in their own drivers.
//!
//! # Example
//!
//! ```ignore
//! use thiserror::Error;
//!
//! #[derive(Error, Debug)]
//! pub enum DriverError {
//!     #[error(transparent)]
//!     Scan(#[from] scankit::Error),
//!
//!     #[error("total overflowed after {count} values")]
//!     Overflow { count: usize },
//! }
//! ```

use thiserror::Error;

use crate::cursor::Shape;

/// Reason a source failed to produce a value.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReadFailure {
    /// End of input was reached before a token could be read.
    #[error("unexpected end of input")]
    EndOfInput,

    /// A token was read but could not be converted to the requested type.
    ///
    /// The offending token is left in the source.
    #[error("expected {expected}, found `{token}`")]
    Malformed {
        /// The raw token text.
        token: String,
        /// Human readable name of the requested type.
        expected: &'static str,
    },

    /// A token exceeded [`ScanConfig::max_token_len`](crate::ScanConfig::max_token_len).
    #[error("token too long: {len} bytes > limit {limit}")]
    TokenTooLong {
        /// Length of the rejected token in bytes.
        len: usize,
        /// Configured limit.
        limit: usize,
    },

    /// More tokens were requested than [`ScanConfig::max_tokens`](crate::ScanConfig::max_tokens) allows.
    #[error("token limit exceeded: limit {limit}")]
    TokenLimitExceeded {
        /// Configured limit.
        limit: usize,
    },

    /// The underlying reader failed (including invalid UTF-8).
    #[error("i/o failure: {0}")]
    Io(String),
}

impl ReadFailure {
    /// Returns `true` if this failure is a plain end-of-input condition.
    #[inline]
    pub fn is_end_of_input(&self) -> bool {
        matches!(self, ReadFailure::EndOfInput)
    }
}

impl From<std::io::Error> for ReadFailure {
    fn from(err: std::io::Error) -> Self {
        ReadFailure::Io(err.to_string())
    }
}

/// Core scankit error type.
///
/// Returned by dereference, advance and any comparison that needs a fully
/// validated value. Comparisons against [`Eof`](crate::Cursor::Eof) and
/// [`Count`](crate::Cursor::Count) markers never produce it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The source could not produce a valid value where one was required.
    ///
    /// Raised by a hard commit: [`Cursor::get`](crate::Cursor::get),
    /// [`Cursor::advance`](crate::Cursor::advance) and comparisons against a
    /// [`Sentinel`](crate::Cursor::Sentinel) marker.
    #[error("stream read failure: {0}")]
    StreamRead(#[from] ReadFailure),

    /// An operation that needs a live cursor was invoked on a stopping marker.
    ///
    /// This signals misuse, not an environment condition.
    #[error("cannot {op}: {shape} marker is not bound to a source")]
    InvalidOperation {
        /// The attempted operation, e.g. `"advance"`.
        op: &'static str,
        /// Shape of the cursor the operation was attempted on.
        shape: Shape,
    },

    /// A range algorithm that needs at least one element got none.
    #[error("range is empty")]
    EmptyRange,

    /// A checked sum overflowed while adding the element at `position`.
    #[error("sum overflowed at element {position}")]
    Overflow {
        /// Zero-based index of the element that did not fit.
        position: usize,
    },

    /// A slice cursor was dereferenced or stepped past its end.
    #[error("position {position} out of range for length {len}")]
    OutOfRange {
        /// Cursor position.
        position: usize,
        /// Length of the underlying slice.
        len: usize,
    },
}

impl Error {
    /// Returns the underlying read failure, if this is a stream error.
    #[inline]
    pub fn read_failure(&self) -> Option<&ReadFailure> {
        match self {
            Error::StreamRead(failure) => Some(failure),
            _ => None,
        }
    }

    /// Returns `true` for [`Error::InvalidOperation`].
    #[inline]
    pub fn is_invalid_operation(&self) -> bool {
        matches!(self, Error::InvalidOperation { .. })
    }
}
