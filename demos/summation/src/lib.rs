#![deny(
    unsafe_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro
)]

//! Summation driver built on scankit cursors.
//!
//! Every stage pairs a live cursor with a stopping marker and hands both to
//! the same generic routine, so "three values", "values until -1" and
//! "values until end of input" differ only in the end cursor. Integer
//! stages use a checked sum, so overflow is reported as a stage failure.
//!
//! # Pipeline input
//!
//! ```text
//! 1 2 3
//! 2 4 6 8 -1
//! x y z
//! b c a
//! 1.5 2.5
//! ```
//!
//! produces `20`, `6`, `20`, `xyz`, `bc` and `4`, one per line.

use std::cell::RefCell;
use std::io::{BufRead, Write};

use scankit::algorithm::{SliceCursor, checked_sum1, reduce, sum1};
use scankit::{ScanConfig, TextSource, scan, until_count, until_eof, until_sentinel};
use thiserror::Error;

/// Which driver to run over the input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Mode {
    /// The full sequence of stages, each continuing where the last stopped.
    #[default]
    Pipeline,
    /// Sum a fixed number of integers.
    Count,
    /// Sum integers up to a sentinel value.
    Sentinel,
    /// Sum floating point values until end of input.
    Eof,
}

/// Knobs for a single run.
#[derive(Debug, Clone)]
pub struct Options {
    pub mode: Mode,
    /// Number of values summed in [`Mode::Count`].
    pub count: usize,
    /// Stopping value for [`Mode::Sentinel`].
    pub sentinel: i64,
    pub config: ScanConfig,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            mode: Mode::Pipeline,
            count: 3,
            sentinel: -1,
            config: ScanConfig::DEFAULT,
        }
    }
}

#[derive(Error, Debug)]
pub enum DriverError {
    #[error("{stage}: {source}")]
    Stage {
        stage: &'static str,
        #[source]
        source: scankit::Error,
    },

    #[error("failed to write result")]
    Output(#[from] std::io::Error),
}

impl DriverError {
    /// Name of the stage that failed, if the failure came from scanning.
    pub fn stage(&self) -> Option<&'static str> {
        match self {
            DriverError::Stage { stage, .. } => Some(*stage),
            DriverError::Output(_) => None,
        }
    }
}

trait StageExt<T> {
    fn stage(self, stage: &'static str) -> Result<T, DriverError>;
}

impl<T> StageExt<T> for Result<T, scankit::Error> {
    fn stage(self, stage: &'static str) -> Result<T, DriverError> {
        self.map_err(|source| DriverError::Stage { stage, source })
    }
}

fn concat(total: &mut String, word: &String) {
    total.push_str(word);
}

/// Runs the selected driver, writing one result per line to `out`.
///
/// Results of completed stages are written before a failing stage reports
/// its error.
pub fn run<R: BufRead, W: Write>(
    reader: R,
    out: &mut W,
    options: &Options,
) -> Result<(), DriverError> {
    let source = RefCell::new(TextSource::with_config(reader, options.config));
    tracing::debug!(mode = ?options.mode, "starting driver");

    match options.mode {
        Mode::Pipeline => pipeline(&source, out)?,
        Mode::Count => {
            let total = checked_sum1(scan::<_, i64>(&source), until_count(options.count))
                .stage("count")?;
            writeln!(out, "{total}")?;
        }
        Mode::Sentinel => {
            let total = checked_sum1(scan::<_, i64>(&source), until_sentinel(options.sentinel))
                .stage("sentinel")?;
            writeln!(out, "{total}")?;
        }
        Mode::Eof => {
            let total = sum1(scan::<_, f64>(&source), until_eof()).stage("eof")?;
            writeln!(out, "{total}")?;
        }
    }

    tracing::debug!(
        tokens = source.borrow().tokens_read(),
        lines = source.borrow().lines_read(),
        "driver finished"
    );
    Ok(())
}

fn pipeline<R: BufRead, W: Write>(
    source: &RefCell<TextSource<R>>,
    out: &mut W,
) -> Result<(), DriverError> {
    let numbers = [2, 4, 6, 8];
    let total = checked_sum1(SliceCursor::begin(&numbers), SliceCursor::end(&numbers))
        .stage("in-memory numbers")?;
    writeln!(out, "{total}")?;

    let total =
        checked_sum1(scan::<_, i32>(source), until_count(3)).stage("three integers")?;
    writeln!(out, "{total}")?;

    let total =
        checked_sum1(scan::<_, i32>(source), until_sentinel(-1)).stage("integers until -1")?;
    writeln!(out, "{total}")?;

    let words = scan::<_, String>(source);
    let joined = reduce(words.clone(), words.stop_at_count(3), concat).stage("three strings")?;
    writeln!(out, "{joined}")?;

    let joined = reduce(words.clone(), words.stop_at_sentinel("a".into()), concat)
        .stage("strings until \"a\"")?;
    writeln!(out, "{joined}")?;

    let doubles = scan::<_, f64>(source);
    let end = doubles.stop_at_eof();
    let total = sum1(doubles, end).stage("doubles until end of input")?;
    writeln!(out, "{total}")?;

    Ok(())
}

/// Convenience wrapper collecting the output of [`run`] into a string.
pub fn run_to_string(input: &str, options: &Options) -> (String, Result<(), DriverError>) {
    let mut out = Vec::new();
    let result = run(input.as_bytes(), &mut out, options);
    (String::from_utf8_lossy(&out).into_owned(), result)
}
