//! Core traits for scankit.
//!
//! # Trait Hierarchy
//!
//! ```text
//! Source (token stream interface)
//!     └── read::<T>() where T: Scan
//!
//! Scan (token -> value)
//!
//! Step (two-cursor protocol)
//!     ├── Cursor<'s, S, T>
//!     └── SliceCursor<'a, T>
//! ```
//!
//! # Usage Patterns
//!
//! ## Reading directly from a source
//!
//! ```ignore
//! use scankit::{Source, TextSource};
//!
//! let mut src = TextSource::from_text("3 1 4");
//! let first: i32 = src.read_value()?;
//! ```
//!
//! ## Generic algorithms
//!
//! ```ignore
//! use scankit::Step;
//!
//! fn drain<C: Step>(mut begin: C, mut end: C) -> Result<usize, Error> {
//!     let mut n = 0;
//!     while !begin.reached(&mut end)? {
//!         begin.step()?;
//!         n += 1;
//!     }
//!     Ok(n)
//! }
//! ```

mod scan;
mod source;
mod step;

pub use scan::{Scan, ScanError};
pub use source::{Source, Status};
pub use step::Step;
