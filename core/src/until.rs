use core::iter::FusedIterator;

use crate::Error;
use crate::cursor::Cursor;
use crate::traits::{Scan, Source};

/// Iterator over the values between a cursor and a stopping marker.
///
/// Created by [`Cursor::until`]. Each step checks the stopping condition,
/// then moves the current value out of the cursor and advances it. The
/// first error is yielded once, after which the iterator is exhausted.
///
/// # Example
///
/// ```ignore
/// let source = RefCell::new(TextSource::from_text("1 2 3 4"));
/// let values: Vec<i32> = scan(&source)
///     .until(until_count(3))
///     .collect::<Result<_, _>>()?;
/// assert_eq!(values, [1, 2, 3]);
/// ```
pub struct Until<'s, S, T> {
    cursor: Cursor<'s, S, T>,
    stop: Cursor<'s, S, T>,
    done: bool,
}

impl<'s, S, T> Until<'s, S, T> {
    #[inline]
    pub(crate) fn new(cursor: Cursor<'s, S, T>, stop: Cursor<'s, S, T>) -> Self {
        Self {
            cursor,
            stop,
            done: false,
        }
    }

    /// The underlying cursor, positioned on the next unread element.
    #[inline]
    pub fn cursor(&self) -> &Cursor<'s, S, T> {
        &self.cursor
    }

    /// Splits back into cursor and stopping marker.
    #[inline]
    pub fn into_parts(self) -> (Cursor<'s, S, T>, Cursor<'s, S, T>) {
        (self.cursor, self.stop)
    }
}

impl<S: Source, T: Scan + PartialEq> Until<'_, S, T> {
    /// Collects every remaining value, stopping at the first error.
    pub fn collect_values(self) -> Result<Vec<T>, Error> {
        self.collect()
    }
}

impl<S: Source, T: Scan + PartialEq> Iterator for Until<'_, S, T> {
    type Item = Result<T, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let step = match self.cursor.reached(&mut self.stop) {
            Ok(true) => {
                self.done = true;
                return None;
            }
            Ok(false) => self.cursor.take(),
            Err(err) => Err(err),
        };
        if step.is_err() {
            self.done = true;
        }
        Some(step)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            return (0, Some(0));
        }
        match (&self.cursor, &self.stop) {
            (Cursor::Live(live), Cursor::Count(n)) => (0, Some(n.saturating_sub(live.count()))),
            _ => (0, None),
        }
    }
}

impl<S: Source, T: Scan + PartialEq> FusedIterator for Until<'_, S, T> {}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::{ReadFailure, TextSource, scan, until_count, until_eof, until_sentinel};

    #[test]
    fn test_until_count() {
        let source = RefCell::new(TextSource::from_text("1 2 3 4"));
        let values = scan::<_, i32>(&source)
            .until(until_count(3))
            .collect_values()
            .unwrap();
        assert_eq!(values, [1, 2, 3]);
        assert_eq!(source.borrow().tokens_read(), 3);
    }

    #[test]
    fn test_until_sentinel_leaves_rest() {
        let source = RefCell::new(TextSource::from_text("a b stop c"));
        let words = scan::<_, String>(&source)
            .until(until_sentinel("stop".to_string()))
            .collect_values()
            .unwrap();
        assert_eq!(words, ["a", "b"]);

        let rest = scan::<_, String>(&source)
            .until(until_eof())
            .collect_values()
            .unwrap();
        assert_eq!(rest, ["c"]);
    }

    #[test]
    fn test_error_is_yielded_once() {
        let source = RefCell::new(TextSource::from_text("1 x 3"));
        let mut iter = scan::<_, i32>(&source).until(until_eof());
        assert_eq!(iter.next(), Some(Ok(1)));
        assert!(matches!(
            iter.next(),
            Some(Err(Error::StreamRead(ReadFailure::Malformed { .. })))
        ));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn test_size_hint_for_count() {
        let source = RefCell::new(TextSource::from_text("1 2 3 4"));
        let mut iter = scan::<_, i32>(&source).until(until_count(3));
        assert_eq!(iter.size_hint(), (0, Some(3)));
        iter.next();
        assert_eq!(iter.size_hint(), (0, Some(2)));

        let eof_iter = scan::<_, i32>(&source).until(until_eof());
        assert_eq!(eof_iter.size_hint(), (0, None));
    }

    #[test]
    fn test_into_parts_keeps_position() {
        let source = RefCell::new(TextSource::from_text("5 6 7"));
        let mut iter = scan::<_, i32>(&source).until(until_count(2));
        assert_eq!(iter.by_ref().count(), 2);
        let (mut cursor, _) = iter.into_parts();
        assert_eq!(cursor.position(), Some(2));
        assert_eq!(cursor.get(), Ok(&7));
    }
}
