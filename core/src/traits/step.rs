use crate::Error;

/// A position in a sequence that can be read, stepped and compared to an end.
///
/// This is the two-cursor protocol generic algorithms are written against.
/// It abstracts over [`Cursor`](crate::Cursor) (values pulled lazily from a
/// source) and [`SliceCursor`](crate::algorithm::SliceCursor) (values in
/// memory), so the same algorithm runs over either.
///
/// # Example
///
/// ```ignore
/// fn largest<C>(mut begin: C, mut end: C) -> Result<Option<C::Item>, Error>
/// where
///     C: Step,
///     C::Item: Ord + Clone,
/// {
///     let mut best = None;
///     while !begin.reached(&mut end)? {
///         let value = begin.current()?.clone();
///         best = best.max(Some(value));
///         begin.step()?;
///     }
///     Ok(best)
/// }
/// ```
pub trait Step {
    /// The element type.
    type Item;

    /// The element at the current position.
    fn current(&mut self) -> Result<&Self::Item, Error>;

    /// Move to the next position.
    fn step(&mut self) -> Result<(), Error>;

    /// Whether this position has reached `end`.
    fn reached(&mut self, end: &mut Self) -> Result<bool, Error>;
}
