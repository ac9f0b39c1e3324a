//! Generic two-cursor algorithms.
//!
//! Everything here is written against [`Step`] only, so the same routine
//! consumes an in-memory slice through [`SliceCursor`] or values parsed on
//! demand through [`Cursor`](crate::Cursor), whatever stopping marker the
//! end cursor carries.
//!
//! # Example
//!
//! ```ignore
//! use scankit::algorithm::{SliceCursor, sum1};
//!
//! let numbers = [2, 4, 6, 8];
//! assert_eq!(sum1(SliceCursor::begin(&numbers), SliceCursor::end(&numbers))?, 20);
//!
//! let source = RefCell::new(TextSource::from_text("1 2 3 4"));
//! assert_eq!(sum1(scan::<_, i32>(&source), until_count(3))?, 6);
//! ```

use core::ops::AddAssign;

use num_traits::CheckedAdd;

use crate::Error;
use crate::traits::Step;

/// A position within a slice.
///
/// The in-memory counterpart of a live [`Cursor`](crate::Cursor). Two slice
/// cursors are at the same position iff they point into the same slice at
/// the same index.
#[derive(Debug)]
pub struct SliceCursor<'a, T> {
    slice: &'a [T],
    pos: usize,
}

impl<'a, T> SliceCursor<'a, T> {
    /// Cursor on the first element.
    #[inline]
    pub fn begin(slice: &'a [T]) -> Self {
        Self { slice, pos: 0 }
    }

    /// Cursor one past the last element.
    #[inline]
    pub fn end(slice: &'a [T]) -> Self {
        Self {
            slice,
            pos: slice.len(),
        }
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    fn out_of_range(&self) -> Error {
        Error::OutOfRange {
            position: self.pos,
            len: self.slice.len(),
        }
    }
}

impl<T> Clone for SliceCursor<'_, T> {
    fn clone(&self) -> Self {
        Self {
            slice: self.slice,
            pos: self.pos,
        }
    }
}

impl<T> Step for SliceCursor<'_, T> {
    type Item = T;

    #[inline]
    fn current(&mut self) -> Result<&T, Error> {
        let slice = self.slice;
        slice.get(self.pos).ok_or_else(|| self.out_of_range())
    }

    #[inline]
    fn step(&mut self) -> Result<(), Error> {
        if self.pos >= self.slice.len() {
            return Err(self.out_of_range());
        }
        self.pos += 1;
        Ok(())
    }

    #[inline]
    fn reached(&mut self, end: &mut Self) -> Result<bool, Error> {
        Ok(core::ptr::eq(self.slice, end.slice) && self.pos == end.pos)
    }
}

/// Left fold over `[begin, end)`.
pub fn fold<C, B, F>(mut begin: C, mut end: C, init: B, mut f: F) -> Result<B, Error>
where
    C: Step,
    F: FnMut(B, &C::Item) -> B,
{
    let mut acc = init;
    while !begin.reached(&mut end)? {
        acc = f(acc, begin.current()?);
        begin.step()?;
    }
    Ok(acc)
}

/// Combines the elements of a non-empty range, seeding with the first.
///
/// Returns [`Error::EmptyRange`] if `begin` has already reached `end`.
pub fn reduce<C, F>(begin: C, end: C, mut f: F) -> Result<C::Item, Error>
where
    C: Step,
    C::Item: Clone,
    F: FnMut(&mut C::Item, &C::Item),
{
    try_reduce(begin, end, |total, value| {
        f(total, value);
        Ok(())
    })
}

/// [`reduce`] with a combining step that can fail.
///
/// The first error from `f` stops the walk; nothing further is read.
pub fn try_reduce<C, F>(mut begin: C, mut end: C, mut f: F) -> Result<C::Item, Error>
where
    C: Step,
    C::Item: Clone,
    F: FnMut(&mut C::Item, &C::Item) -> Result<(), Error>,
{
    if begin.reached(&mut end)? {
        return Err(Error::EmptyRange);
    }
    let mut total = begin.current()?.clone();
    begin.step()?;
    while !begin.reached(&mut end)? {
        f(&mut total, begin.current()?)?;
        begin.step()?;
    }
    Ok(total)
}

/// Sum of a non-empty range.
///
/// Overflow behaves like `+=`. Use [`checked_sum1`] for integers read from
/// untrusted input.
pub fn sum1<C>(begin: C, end: C) -> Result<C::Item, Error>
where
    C: Step,
    C::Item: Clone + AddAssign,
{
    reduce(begin, end, |total, value| *total += value.clone())
}

/// Sum of a non-empty range that fails with [`Error::Overflow`] instead of
/// wrapping.
pub fn checked_sum1<C>(begin: C, end: C) -> Result<C::Item, Error>
where
    C: Step,
    C::Item: Clone + CheckedAdd,
{
    let mut position = 0;
    try_reduce(begin, end, |total, value| {
        position += 1;
        *total = total
            .checked_add(value)
            .ok_or(Error::Overflow { position })?;
        Ok(())
    })
}

/// Number of elements in `[begin, end)`.
///
/// Every element is read and validated on the way.
pub fn count<C: Step>(begin: C, end: C) -> Result<usize, Error> {
    fold(begin, end, 0, |n, _| n + 1)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::{ReadFailure, TextSource, scan, until_count, until_eof, until_sentinel};

    #[test]
    fn test_sum1_slice() {
        let numbers = [2, 4, 6, 8];
        let total = sum1(SliceCursor::begin(&numbers), SliceCursor::end(&numbers));
        assert_eq!(total, Ok(20));
    }

    #[test]
    fn test_sum1_empty_slice() {
        let empty: [i32; 0] = [];
        let total = sum1(SliceCursor::begin(&empty), SliceCursor::end(&empty));
        assert_eq!(total, Err(Error::EmptyRange));
    }

    #[test]
    fn test_sum1_cursor_count() {
        let source = RefCell::new(TextSource::from_text("10 20 30 40"));
        assert_eq!(sum1(scan::<_, i32>(&source), until_count(3)), Ok(60));
    }

    #[test]
    fn test_sum1_cursor_sentinel() {
        let source = RefCell::new(TextSource::from_text("2 4 6 8 -1 100"));
        assert_eq!(sum1(scan::<_, i32>(&source), until_sentinel(-1)), Ok(20));
    }

    #[test]
    fn test_sum1_floats_until_eof() {
        let source = RefCell::new(TextSource::from_text("1.5 2.5\n3\n"));
        assert_eq!(sum1(scan::<_, f64>(&source), until_eof()), Ok(7.0));
    }

    #[test]
    fn test_sum1_reports_reader_failure_before_eof() {
        let bytes: &[u8] = b"1\n\xff\xfe\n2\n";
        let source = RefCell::new(TextSource::new(bytes));
        assert!(matches!(
            sum1(scan::<_, f64>(&source), until_eof()),
            Err(Error::StreamRead(ReadFailure::Io(_)))
        ));
    }

    #[test]
    fn test_checked_sum1_overflow() {
        let source = RefCell::new(TextSource::from_text("9223372036854775807 1 0"));
        assert_eq!(
            checked_sum1(scan::<_, i64>(&source), until_count(2)),
            Err(Error::Overflow { position: 1 })
        );
    }

    #[test]
    fn test_checked_sum1_in_range() {
        let numbers = [250u8, 5];
        assert_eq!(
            checked_sum1(SliceCursor::begin(&numbers), SliceCursor::end(&numbers)),
            Ok(255)
        );
        let numbers = [250u8, 5, 1];
        assert_eq!(
            checked_sum1(SliceCursor::begin(&numbers), SliceCursor::end(&numbers)),
            Err(Error::Overflow { position: 2 })
        );

        let source = RefCell::new(TextSource::from_text("2 4 6 8 -1"));
        assert_eq!(checked_sum1(scan::<_, i32>(&source), until_sentinel(-1)), Ok(20));
    }

    #[test]
    fn test_try_reduce_stops_at_first_error() {
        let source = RefCell::new(TextSource::from_text("1 2 3 4"));
        let mut seen = Vec::new();
        let result = try_reduce(scan::<_, i32>(&source), until_eof(), |_, value| {
            seen.push(*value);
            if *value == 3 { Err(Error::EmptyRange) } else { Ok(()) }
        });
        assert_eq!(result, Err(Error::EmptyRange));
        assert_eq!(seen, [2, 3]);
        assert_eq!(source.borrow().tokens_read(), 3);
    }

    #[test]
    fn test_reduce_concatenates_words() {
        let source = RefCell::new(TextSource::from_text("ab cd ef"));
        let joined = reduce(scan::<_, String>(&source), until_count(3), |acc, w| {
            acc.push_str(w)
        });
        assert_eq!(joined.as_deref(), Ok("abcdef"));
    }

    #[test]
    fn test_fold_and_count() {
        let numbers = [1, 2, 3];
        let product = fold(
            SliceCursor::begin(&numbers),
            SliceCursor::end(&numbers),
            1,
            |acc, v| acc * v,
        );
        assert_eq!(product, Ok(6));

        let source = RefCell::new(TextSource::from_text("a b c d"));
        assert_eq!(count(scan::<_, String>(&source), until_eof()), Ok(4));
    }

    #[test]
    fn test_count_propagates_read_failure() {
        let source = RefCell::new(TextSource::from_text("1 2 x"));
        assert_eq!(
            count(scan::<_, i32>(&source), until_count(3)),
            Err(Error::StreamRead(ReadFailure::Malformed {
                token: "x".into(),
                expected: "i32",
            }))
        );
    }

    #[test]
    fn test_slice_cursor_bounds() {
        let numbers = [1];
        let mut cursor = SliceCursor::begin(&numbers);
        assert_eq!(cursor.current(), Ok(&1));
        cursor.step().unwrap();
        assert_eq!(
            cursor.current(),
            Err(Error::OutOfRange {
                position: 1,
                len: 1
            })
        );
        assert!(cursor.step().is_err());
        assert_eq!(cursor.position(), 1);
    }

    #[test]
    fn test_slice_cursors_over_different_slices_differ() {
        let a = [1, 2];
        let b = [1, 2];
        let mut end_a = SliceCursor::end(&a);
        let mut end_b = SliceCursor::end(&b);
        assert_eq!(end_a.reached(&mut end_b), Ok(false));
        assert_eq!(end_a.reached(&mut end_a.clone()), Ok(true));
    }
}
