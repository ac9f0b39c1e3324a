//! The cursor/marker union.
//!
//! A [`Cursor`] is either a live cursor bound to a [`Source`] or one of three
//! stopping markers. Both sides share one type so that generic two-cursor
//! algorithms can be written as `while !begin.reached(&mut end)? { ... }`
//! without knowing which stopping condition `end` encodes.
//!
//! # Commit protocol
//!
//! A live cursor reads lazily. Nothing is pulled from the source until a
//! value or an end-of-input answer is needed:
//!
//! - *soft commit*: if nothing is cached, read one value and record the
//!   outcome. Never fails, never reads twice between advances.
//! - *hard commit*: soft commit, then turn a recorded failure into
//!   [`Error::StreamRead`].
//!
//! [`Cursor::get`] and [`Cursor::advance`] hard-commit. Comparing against
//! [`Cursor::Eof`] only soft-commits, so running out of input is detected
//! without going through the error path.
//!
//! # Example
//!
//! ```ignore
//! use std::cell::RefCell;
//! use scankit::{Cursor, TextSource};
//!
//! let source = RefCell::new(TextSource::from_text("2 4 6 8 -1"));
//! let mut it = Cursor::<_, i32>::new(&source);
//! let mut stop = Cursor::until_sentinel(-1);
//!
//! let mut total = 0;
//! while !it.reached(&mut stop)? {
//!     total += *it.get()?;
//!     it.advance()?;
//! }
//! assert_eq!(total, 20);
//! ```

use core::fmt;
use std::cell::RefCell;

use tracing::{debug, trace};

use crate::traits::{Scan, Source, Step};
use crate::until::Until;
use crate::{Error, ReadFailure};

/// Discriminant of a [`Cursor`], used in diagnostics.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    Live,
    Eof,
    Count,
    Sentinel,
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Shape::Live => "live",
            Shape::Eof => "eof",
            Shape::Count => "count",
            Shape::Sentinel => "sentinel",
        })
    }
}

/// The lazily populated value of a live cursor.
#[derive(Debug, Clone, PartialEq)]
pub enum Slot<T> {
    /// Nothing read since the last advance.
    Empty,
    /// A value was read and is waiting to be consumed.
    Ready(T),
    /// A read was attempted and failed; kept so the read is not retried.
    Failed(ReadFailure),
}

impl<T> Slot<T> {
    /// A value is cached and waiting to be consumed.
    #[inline]
    pub fn is_ready(&self) -> bool {
        matches!(self, Slot::Ready(_))
    }

    /// No read has been attempted since the last advance.
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty)
    }
}

/// State of a cursor bound to a source.
///
/// The source is borrowed, never owned: the caller keeps the `RefCell` alive
/// for as long as the cursor exists. Each read takes a short `borrow_mut`
/// that is released before the call returns.
pub struct Live<'s, S, T> {
    source: &'s RefCell<S>,
    count: usize,
    slot: Slot<T>,
}

impl<'s, S, T> Live<'s, S, T> {
    #[inline]
    fn new(source: &'s RefCell<S>) -> Self {
        Self {
            source,
            count: 0,
            slot: Slot::Empty,
        }
    }

    /// Number of successful advances so far.
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    /// The cached value state.
    #[inline]
    pub fn slot(&self) -> &Slot<T> {
        &self.slot
    }

    /// The source this cursor reads from.
    #[inline]
    pub fn source(&self) -> &'s RefCell<S> {
        self.source
    }

    /// Identity comparison: two live cursors are the same iff they read the
    /// same source, regardless of their positions.
    #[inline]
    pub fn same_source(&self, other: &Self) -> bool {
        core::ptr::eq(self.source, other.source)
    }
}

impl<'s, S: Source, T: Scan> Live<'s, S, T> {
    fn soft_commit(&mut self) -> &Slot<T> {
        if self.slot.is_empty() {
            let mut source = self.source.borrow_mut();
            self.slot = match source.read::<T>() {
                Some(value) => {
                    trace!(target: "scankit::cursor", count = self.count, "soft commit read a value");
                    Slot::Ready(value)
                }
                None => {
                    let failure = source
                        .status()
                        .failure()
                        .cloned()
                        .unwrap_or(ReadFailure::EndOfInput);
                    debug!(target: "scankit::cursor", count = self.count, %failure, "soft commit failed");
                    Slot::Failed(failure)
                }
            };
        }
        &self.slot
    }

    fn hard_commit(&mut self) -> Result<&mut T, Error> {
        self.soft_commit();
        match &mut self.slot {
            Slot::Ready(value) => Ok(value),
            Slot::Failed(failure) => Err(Error::StreamRead(failure.clone())),
            // a soft commit never leaves the slot empty
            Slot::Empty => Err(Error::StreamRead(ReadFailure::EndOfInput)),
        }
    }

    fn step(&mut self) -> Result<(), Error> {
        self.hard_commit()?;
        self.count += 1;
        self.slot = Slot::Empty;
        trace!(target: "scankit::cursor", count = self.count, "advanced");
        Ok(())
    }

    fn take(&mut self) -> Result<T, Error> {
        self.soft_commit();
        match core::mem::replace(&mut self.slot, Slot::Empty) {
            Slot::Ready(value) => {
                self.count += 1;
                trace!(target: "scankit::cursor", count = self.count, "advanced");
                Ok(value)
            }
            Slot::Failed(failure) => {
                self.slot = Slot::Failed(failure.clone());
                Err(Error::StreamRead(failure))
            }
            Slot::Empty => Err(Error::StreamRead(ReadFailure::EndOfInput)),
        }
    }

    /// True iff no value is pending and the source has run out.
    fn at_end(&mut self) -> bool {
        let pending = self.soft_commit().is_ready();
        !pending && self.source.borrow().at_eof()
    }

    /// Compares this live cursor against the other side of a comparison.
    ///
    /// `other` is never mutated.
    fn meets(&mut self, other: &Cursor<'s, S, T>) -> Result<bool, Error>
    where
        T: PartialEq,
    {
        match other {
            Cursor::Live(other) => Ok(self.same_source(other)),
            Cursor::Eof => Ok(self.at_end()),
            Cursor::Count(n) => Ok(self.count == *n),
            Cursor::Sentinel(value) => Ok(*self.hard_commit()? == *value),
        }
    }
}

impl<S, T: Clone> Clone for Live<'_, S, T> {
    fn clone(&self) -> Self {
        Self {
            source: self.source,
            count: self.count,
            slot: self.slot.clone(),
        }
    }
}

impl<S, T: fmt::Debug> fmt::Debug for Live<'_, S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Live")
            .field("source", &(self.source as *const RefCell<S>))
            .field("count", &self.count)
            .field("slot", &self.slot)
            .finish()
    }
}

/// A live cursor over a source, or a stopping marker.
///
/// # Shapes
///
/// | Shape | Meaning |
/// |-------|---------|
/// | `Live` | bound to a source, reads lazily |
/// | `Eof` | stop when the source runs out |
/// | `Count(n)` | stop after `n` advances |
/// | `Sentinel(v)` | stop when the next value equals `v` (the sentinel is read but not yielded) |
///
/// The shape is fixed at construction. Only `Live` can be dereferenced or
/// advanced; doing so on a marker returns [`Error::InvalidOperation`].
///
/// # Equality
///
/// `Cursor` intentionally does not implement `PartialEq`. Comparing a live
/// cursor against `Eof` or `Sentinel` may read from the source, so
/// comparison is exposed as the iteration-protocol methods
/// [`equivalent`](Cursor::equivalent) / [`reached`](Cursor::reached), which
/// take `&mut self` and may fail.
pub enum Cursor<'s, S, T> {
    /// Bound to a source.
    Live(Live<'s, S, T>),
    /// Stop at end of input.
    Eof,
    /// Stop after this many elements.
    Count(usize),
    /// Stop at the first element equal to this value.
    Sentinel(T),
}

impl<'s, S, T> Cursor<'s, S, T> {
    /// Creates a live cursor reading from `source`.
    #[inline]
    pub fn new(source: &'s RefCell<S>) -> Self {
        Cursor::Live(Live::new(source))
    }

    /// Creates a marker that stops after `n` elements.
    #[inline]
    pub const fn until_count(n: usize) -> Self {
        Cursor::Count(n)
    }

    /// Creates a marker that stops at the first element equal to `value`.
    #[inline]
    pub const fn until_sentinel(value: T) -> Self {
        Cursor::Sentinel(value)
    }

    /// Creates a marker that stops at end of input.
    #[inline]
    pub const fn until_eof() -> Self {
        Cursor::Eof
    }

    /// Same as [`Cursor::until_count`], with `S` and `T` taken from `self`.
    #[inline]
    pub fn stop_at_count(&self, n: usize) -> Self {
        Cursor::Count(n)
    }

    /// Same as [`Cursor::until_sentinel`], with `S` taken from `self`.
    #[inline]
    pub fn stop_at_sentinel(&self, value: T) -> Self {
        Cursor::Sentinel(value)
    }

    /// Same as [`Cursor::until_eof`], with `S` and `T` taken from `self`.
    #[inline]
    pub fn stop_at_eof(&self) -> Self {
        Cursor::Eof
    }

    /// Which of the four variants this is.
    #[inline]
    pub fn shape(&self) -> Shape {
        match self {
            Cursor::Live(_) => Shape::Live,
            Cursor::Eof => Shape::Eof,
            Cursor::Count(_) => Shape::Count,
            Cursor::Sentinel(_) => Shape::Sentinel,
        }
    }

    /// `true` for a cursor bound to a source.
    #[inline]
    pub fn is_live(&self) -> bool {
        matches!(self, Cursor::Live(_))
    }

    /// `true` for `Eof`, `Count` and `Sentinel`.
    #[inline]
    pub fn is_marker(&self) -> bool {
        !self.is_live()
    }

    /// Live state, if this is a live cursor.
    #[inline]
    pub fn as_live(&self) -> Option<&Live<'s, S, T>> {
        match self {
            Cursor::Live(live) => Some(live),
            _ => None,
        }
    }

    /// Number of elements advanced past, if this is a live cursor.
    #[inline]
    pub fn position(&self) -> Option<usize> {
        self.as_live().map(Live::count)
    }

    #[inline]
    fn invalid(&self, op: &'static str) -> Error {
        Error::InvalidOperation {
            op,
            shape: self.shape(),
        }
    }
}

impl<'s, S: Source, T: Scan> Cursor<'s, S, T> {
    /// Returns the current value, reading it if necessary.
    ///
    /// Repeated calls between advances return the same value and read at
    /// most once.
    pub fn get(&mut self) -> Result<&T, Error> {
        match self {
            Cursor::Live(live) => live.hard_commit().map(|value| &*value),
            marker => Err(marker.invalid("dereference")),
        }
    }

    /// Mutable access to the current value, reading it if necessary.
    pub fn get_mut(&mut self) -> Result<&mut T, Error> {
        match self {
            Cursor::Live(live) => live.hard_commit(),
            marker => Err(marker.invalid("dereference")),
        }
    }

    /// Moves past the current element.
    ///
    /// The current element is read and validated first, so an unread
    /// malformed element cannot be skipped silently.
    pub fn advance(&mut self) -> Result<&mut Self, Error> {
        if let Cursor::Live(live) = self {
            live.step()?;
            Ok(self)
        } else {
            Err(self.invalid("advance"))
        }
    }

    /// Moves past the current element, returning a copy positioned on it.
    ///
    /// The copy holds the already-read value, so dereferencing it performs
    /// no I/O.
    pub fn post_advance(&mut self) -> Result<Self, Error>
    where
        T: Clone,
    {
        match self {
            Cursor::Live(live) => {
                live.hard_commit()?;
                let previous = live.clone();
                live.step()?;
                Ok(Cursor::Live(previous))
            }
            marker => Err(marker.invalid("advance")),
        }
    }

    /// Dereferences and advances in one step, moving the value out.
    pub fn take(&mut self) -> Result<T, Error> {
        match self {
            Cursor::Live(live) => live.take(),
            marker => Err(marker.invalid("advance")),
        }
    }

    /// Iterate from this cursor until `stop` is reached.
    #[inline]
    pub fn until(self, stop: Self) -> Until<'s, S, T>
    where
        T: PartialEq,
    {
        Until::new(self, stop)
    }
}

impl<S: Source, T: Scan + PartialEq> Cursor<'_, S, T> {
    /// Decides whether two cursors are equivalent.
    ///
    /// | left \ right | Live | Eof | Count | Sentinel |
    /// |---|---|---|---|---|
    /// | Live | same source | no value pending and source at end | `count == n` | next value `== v` |
    /// | Eof | mirror | true | false | false |
    /// | Count | mirror | false | `n == m` | false |
    /// | Sentinel | mirror | false | false | `v == w` |
    ///
    /// The relation is symmetric. Markers are never mutated.
    ///
    /// # Side effects
    ///
    /// Comparing a live cursor against `Eof` or `Sentinel` reads the next
    /// value into the live cursor's cache. Against `Eof` a failed read is
    /// recorded but not reported; against `Sentinel` it is returned as
    /// [`Error::StreamRead`].
    ///
    /// Two live cursors over the same source compare equal even if they
    /// have advanced by different amounts.
    pub fn equivalent(&mut self, other: &mut Self) -> Result<bool, Error> {
        match (self, other) {
            (Cursor::Live(a), Cursor::Live(b)) => Ok(a.same_source(b)),
            (Cursor::Live(live), marker) | (marker, Cursor::Live(live)) => live.meets(marker),
            (Cursor::Eof, Cursor::Eof) => Ok(true),
            (Cursor::Count(a), Cursor::Count(b)) => Ok(a == b),
            (Cursor::Sentinel(a), Cursor::Sentinel(b)) => Ok(a == b),
            _ => Ok(false),
        }
    }

    /// Loop-termination spelling of [`equivalent`](Cursor::equivalent).
    #[inline]
    pub fn reached(&mut self, stop: &mut Self) -> Result<bool, Error> {
        self.equivalent(stop)
    }

    /// Negation of [`equivalent`](Cursor::equivalent).
    #[inline]
    pub fn differs(&mut self, other: &mut Self) -> Result<bool, Error> {
        self.equivalent(other).map(|same| !same)
    }
}

impl<S, T> Default for Cursor<'_, S, T> {
    /// The end-of-input marker.
    #[inline]
    fn default() -> Self {
        Cursor::Eof
    }
}

impl<S, T: Clone> Clone for Cursor<'_, S, T> {
    fn clone(&self) -> Self {
        match self {
            Cursor::Live(live) => Cursor::Live(live.clone()),
            Cursor::Eof => Cursor::Eof,
            Cursor::Count(n) => Cursor::Count(*n),
            Cursor::Sentinel(value) => Cursor::Sentinel(value.clone()),
        }
    }
}

impl<S, T: fmt::Debug> fmt::Debug for Cursor<'_, S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cursor::Live(live) => live.fmt(f),
            Cursor::Eof => f.write_str("Eof"),
            Cursor::Count(n) => f.debug_tuple("Count").field(n).finish(),
            Cursor::Sentinel(value) => f.debug_tuple("Sentinel").field(value).finish(),
        }
    }
}

impl<S: Source, T: Scan + PartialEq> Step for Cursor<'_, S, T> {
    type Item = T;

    #[inline]
    fn current(&mut self) -> Result<&T, Error> {
        self.get()
    }

    #[inline]
    fn step(&mut self) -> Result<(), Error> {
        self.advance().map(|_| ())
    }

    #[inline]
    fn reached(&mut self, end: &mut Self) -> Result<bool, Error> {
        self.equivalent(end)
    }
}

/// Creates a live cursor reading `T` from `source`.
#[inline]
pub fn scan<S, T>(source: &RefCell<S>) -> Cursor<'_, S, T> {
    Cursor::new(source)
}

/// Creates a marker that stops after `n` elements.
#[inline]
pub fn until_count<'s, S, T>(n: usize) -> Cursor<'s, S, T> {
    Cursor::Count(n)
}

/// Creates a marker that stops at the first element equal to `value`.
#[inline]
pub fn until_sentinel<'s, S, T>(value: T) -> Cursor<'s, S, T> {
    Cursor::Sentinel(value)
}

/// Creates a marker that stops at end of input.
#[inline]
pub fn until_eof<'s, S, T>() -> Cursor<'s, S, T> {
    Cursor::Eof
}
