pub mod algorithm;
pub mod config;
mod cursor;
mod error;
mod text;
pub mod traits;
mod until;

pub use config::ScanConfig;
pub use cursor::{Cursor, Live, Shape, Slot, scan, until_count, until_eof, until_sentinel};
pub use error::{Error, ReadFailure};
pub use text::TextSource;
pub use traits::{Scan, ScanError, Source, Status, Step};
pub use until::Until;
