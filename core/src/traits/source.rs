use super::scan::Scan;
use crate::ReadFailure;

/// Outcome of the most recent read attempt on a [`Source`].
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Status {
    /// The last attempt produced a value (or no attempt was made yet).
    #[default]
    Good,
    /// The last attempt failed.
    Failed(ReadFailure),
}

impl Status {
    #[inline]
    pub fn is_good(&self) -> bool {
        matches!(self, Status::Good)
    }

    /// Returns `true` if the last attempt ran into end of input.
    #[inline]
    pub fn is_end_of_input(&self) -> bool {
        matches!(self, Status::Failed(ReadFailure::EndOfInput))
    }

    /// Returns the failure reason, if any.
    #[inline]
    pub fn failure(&self) -> Option<&ReadFailure> {
        match self {
            Status::Good => None,
            Status::Failed(failure) => Some(failure),
        }
    }
}

/// A sequential source of typed values.
///
/// This is the only capability a [`Cursor`](crate::Cursor) needs from its
/// input. Sources hand out one value at a time; there is no seek, peek or
/// buffering control in the contract.
///
/// # Required Methods
///
/// - `read::<T>()`: attempt to parse one `T`, advancing past it on success
/// - `status()`: outcome of the last `read`
/// - `at_eof()`: whether end of input has been reached
///
/// # Contract
///
/// After `read` returns `None`, `status()` must be `Status::Failed` with the
/// reason. A value that failed to scan must not be consumed. `at_eof` must
/// not perform I/O; it reports what earlier reads have observed. It means a
/// clean end of input only: a source stopped by a reader failure must keep
/// returning `false`, so that an `Eof` comparison falls through to a
/// dereference that reports the failure.
///
/// # Example
///
/// ```ignore
/// use scankit::{ReadFailure, Scan, Source, Status};
///
/// struct Words<'a> {
///     words: std::str::SplitWhitespace<'a>,
///     pending: Option<&'a str>,
///     status: Status,
///     eof: bool,
/// }
///
/// impl Source for Words<'_> {
///     fn read<T: Scan>(&mut self) -> Option<T> {
///         let Some(word) = self.pending.take().or_else(|| self.words.next()) else {
///             self.eof = true;
///             self.status = Status::Failed(ReadFailure::EndOfInput);
///             return None;
///         };
///         match T::scan(word) {
///             Ok(value) => {
///                 self.status = Status::Good;
///                 Some(value)
///             }
///             Err(err) => {
///                 self.pending = Some(word);
///                 self.status = Status::Failed(err.into());
///                 None
///             }
///         }
///     }
///
///     fn status(&self) -> &Status {
///         &self.status
///     }
///
///     fn at_eof(&self) -> bool {
///         self.eof
///     }
/// }
/// ```
pub trait Source {
    /// Attempt to parse one value of type `T`.
    ///
    /// Returns `None` on failure and records the reason in [`Source::status`].
    fn read<T: Scan>(&mut self) -> Option<T>;

    /// Outcome of the last read attempt.
    fn status(&self) -> &Status;

    /// Whether end of input has been reached.
    fn at_eof(&self) -> bool;

    /// Returns `true` if the last attempt succeeded.
    #[inline]
    fn is_good(&self) -> bool {
        self.status().is_good()
    }

    /// Reads a value, converting the recorded failure into a `Result`.
    ///
    /// Convenience for drivers that use a source directly without a cursor.
    fn read_value<T: Scan>(&mut self) -> Result<T, ReadFailure> {
        match self.read::<T>() {
            Some(value) => Ok(value),
            None => Err(self
                .status()
                .failure()
                .cloned()
                .unwrap_or(ReadFailure::EndOfInput)),
        }
    }
}

impl<S: Source> Source for &mut S {
    #[inline]
    fn read<T: Scan>(&mut self) -> Option<T> {
        (**self).read()
    }

    #[inline]
    fn status(&self) -> &Status {
        (**self).status()
    }

    #[inline]
    fn at_eof(&self) -> bool {
        (**self).at_eof()
    }
}

impl<S: Source> Source for Box<S> {
    #[inline]
    fn read<T: Scan>(&mut self) -> Option<T> {
        (**self).read()
    }

    #[inline]
    fn status(&self) -> &Status {
        (**self).status()
    }

    #[inline]
    fn at_eof(&self) -> bool {
        (**self).at_eof()
    }
}
