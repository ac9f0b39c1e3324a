//! Whitespace-delimited text source.
//!
//! [`TextSource`] reads any [`BufRead`] in bounded chunks, splits the text
//! into words and hands them out one at a time to [`Scan`] implementations.
//! Nothing past the current chunk is read until its words are used up, and
//! a word cut by a chunk boundary is carried into the next chunk. Memory
//! held for the partial word is bounded by
//! [`ScanConfig::max_token_len`](crate::ScanConfig::max_token_len).

use std::collections::VecDeque;
use std::io::{self, BufRead, Read};
use std::ops::Range;

use logos::Logos;
use tracing::{debug, trace};

use crate::ReadFailure;
use crate::config::ScanConfig;
use crate::traits::{Scan, Source, Status};

/// Upper bound on bytes pulled from the reader per refill.
const CHUNK: u64 = 8 * 1024;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"\s+")]
enum Lexeme {
    #[regex(r"\S+")]
    Word,
}

/// A queued word.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Word {
    /// Byte range into the decoded chunk.
    Text(Range<usize>),
    /// A word longer than `max_token_len`, skipped without buffering.
    Oversized(usize),
}

/// A [`Source`] over whitespace-delimited text.
///
/// # Semantics
///
/// - Leading whitespace (including newlines) is skipped.
/// - A word that fails to scan as the requested type stays in the source,
///   so it can be read again as a different type.
/// - Running out of input sets [`at_eof`](Source::at_eof) and reports
///   [`ReadFailure::EndOfInput`].
/// - Reader errors (including invalid UTF-8) are terminal: every later read
///   reports the same [`ReadFailure::Io`], and `at_eof` stays `false` so
///   the failure cannot pass for a clean end of input.
/// - A word longer than `max_token_len` is streamed past, not buffered, and
///   reported as [`ReadFailure::TokenTooLong`]. Like a malformed word it is
///   never consumed.
///
/// # Example
///
/// ```ignore
/// use scankit::{Source, TextSource};
///
/// let mut src = TextSource::from_text("12 apples");
/// assert_eq!(src.read::<i32>(), Some(12));
/// assert_eq!(src.read::<i32>(), None); // "apples" is not consumed
/// assert_eq!(src.read::<String>().as_deref(), Some("apples"));
/// ```
pub struct TextSource<R> {
    reader: R,
    config: ScanConfig,
    /// Bytes read but not yet split into words.
    pending: Vec<u8>,
    /// Decoded text the queued words point into.
    line: String,
    words: VecDeque<Word>,
    status: Status,
    eof: bool,
    broken: Option<ReadFailure>,
    tokens_read: usize,
    lines_read: usize,
}

impl<R: BufRead> TextSource<R> {
    /// Creates a source with the default [`ScanConfig`].
    #[inline]
    pub fn new(reader: R) -> Self {
        Self::with_config(reader, ScanConfig::default())
    }

    /// Creates a source with explicit limits.
    pub fn with_config(reader: R, config: ScanConfig) -> Self {
        Self {
            reader,
            config,
            pending: Vec::new(),
            line: String::new(),
            words: VecDeque::new(),
            status: Status::Good,
            eof: false,
            broken: None,
            tokens_read: 0,
            lines_read: 0,
        }
    }

    #[inline]
    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Number of tokens handed out so far.
    #[inline]
    pub fn tokens_read(&self) -> usize {
        self.tokens_read
    }

    /// Number of newline-terminated lines (plus a final unterminated one)
    /// pulled from the reader so far.
    #[inline]
    pub fn lines_read(&self) -> usize {
        self.lines_read
    }

    /// Consumes the source, returning the reader.
    ///
    /// Words already buffered from the current chunk are discarded.
    #[inline]
    pub fn into_inner(self) -> R {
        self.reader
    }

    fn next_value<T: Scan>(&mut self) -> Result<T, ReadFailure> {
        self.config.check_count(self.tokens_read)?;
        let span = match self.next_word()? {
            Word::Text(span) => span,
            Word::Oversized(len) => {
                return Err(ReadFailure::TokenTooLong {
                    len,
                    limit: self.config.max_token_len,
                });
            }
        };
        let token = &self.line[span];
        self.config.check_len(token.len())?;
        let value = T::scan(token)?;
        self.words.pop_front();
        self.tokens_read += 1;
        Ok(value)
    }

    fn next_word(&mut self) -> Result<Word, ReadFailure> {
        loop {
            if let Some(word) = self.words.front() {
                return Ok(word.clone());
            }
            if let Some(failure) = &self.broken {
                return Err(failure.clone());
            }
            if self.eof {
                return Err(ReadFailure::EndOfInput);
            }
            if let Err(failure) = self.fill() {
                // words queued before the failure are still handed out
                if self.words.is_empty() {
                    return Err(failure);
                }
            }
        }
    }

    /// Pulls up to one chunk from the reader and queues every complete word.
    fn fill(&mut self) -> Result<(), ReadFailure> {
        let read = (&mut self.reader)
            .take(CHUNK)
            .read_until(b'\n', &mut self.pending);
        match read {
            Ok(0) => {
                self.eof = true;
                debug!(target: "scankit::source", lines = self.lines_read, "end of input");
            }
            Ok(_) => {}
            Err(err) => return Err(self.break_with(err.into())),
        }

        let newline = self.pending.last() == Some(&b'\n');
        let complete = newline || self.eof;
        if newline || (self.eof && !self.pending.is_empty()) {
            self.lines_read += 1;
        }

        match valid_prefix(&self.pending, complete) {
            Some(text) => {
                self.line.clear();
                self.line.push_str(text);
            }
            None => return Err(self.break_with(invalid_utf8())),
        }

        let mut spans: Vec<Range<usize>> = Lexeme::lexer(&self.line)
            .spanned()
            .filter_map(|(lexeme, span)| lexeme.ok().map(|_| span))
            .collect();

        // the last word may continue in the next chunk
        let mut keep = self.line.len();
        let mut partial = 0;
        if !complete {
            if let Some(last) = spans.last().filter(|span| span.end == self.line.len()) {
                keep = last.start;
                partial = last.len();
                spans.pop();
            }
        }

        self.words.extend(spans.into_iter().map(Word::Text));
        self.pending.drain(..keep);

        if partial > self.config.max_token_len {
            let len = self.skip_oversized()?;
            debug!(target: "scankit::source", len, limit = self.config.max_token_len, "oversized token");
            self.words.push_back(Word::Oversized(len));
        }

        trace!(
            target: "scankit::source",
            lines = self.lines_read,
            words = self.words.len(),
            carried = self.pending.len(),
            "refilled"
        );
        Ok(())
    }

    /// Streams past the word at the start of `pending`, returning its length.
    ///
    /// Only an incomplete UTF-8 sequence is kept between chunks.
    fn skip_oversized(&mut self) -> Result<usize, ReadFailure> {
        let mut counted = 0;
        loop {
            let complete = match (&mut self.reader)
                .take(CHUNK)
                .read_until(b'\n', &mut self.pending)
            {
                Ok(0) => {
                    self.eof = true;
                    true
                }
                Ok(_) => false,
                Err(err) => return Err(self.break_with(err.into())),
            };
            let valid = match valid_prefix(&self.pending, complete) {
                Some(text) => match text.find(char::is_whitespace) {
                    Some(end) => {
                        self.pending.clear();
                        return Ok(counted + end);
                    }
                    None => text.len(),
                },
                None => return Err(self.break_with(invalid_utf8())),
            };
            counted += valid;
            self.pending.drain(..valid);
            if complete {
                return Ok(counted);
            }
        }
    }

    fn break_with(&mut self, failure: ReadFailure) -> ReadFailure {
        debug!(target: "scankit::source", %failure, "reader failed");
        self.pending.clear();
        self.broken = Some(failure.clone());
        failure
    }
}

/// The longest prefix of `bytes` that is valid UTF-8.
///
/// An incomplete sequence at the end is tolerated unless the input is
/// `complete`. Any other invalid byte yields `None`.
fn valid_prefix(bytes: &[u8], complete: bool) -> Option<&str> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Some(text),
        Err(err) if !complete && err.error_len().is_none() => {
            std::str::from_utf8(&bytes[..err.valid_up_to()]).ok()
        }
        Err(_) => None,
    }
}

fn invalid_utf8() -> ReadFailure {
    io::Error::new(io::ErrorKind::InvalidData, "stream did not contain valid UTF-8").into()
}

impl<'a> TextSource<&'a [u8]> {
    /// Creates a source over in-memory text.
    #[inline]
    pub fn from_text(text: &'a str) -> Self {
        Self::new(text.as_bytes())
    }
}

impl TextSource<io::StdinLock<'static>> {
    /// Creates a source over locked standard input.
    #[inline]
    pub fn stdin() -> Self {
        Self::new(io::stdin().lock())
    }
}

impl<R: BufRead> Source for TextSource<R> {
    fn read<T: Scan>(&mut self) -> Option<T> {
        match self.next_value::<T>() {
            Ok(value) => {
                self.status = Status::Good;
                Some(value)
            }
            Err(failure) => {
                trace!(target: "scankit::source", %failure, "read failed");
                self.status = Status::Failed(failure);
                None
            }
        }
    }

    #[inline]
    fn status(&self) -> &Status {
        &self.status
    }

    #[inline]
    fn at_eof(&self) -> bool {
        self.eof && self.words.is_empty() && self.broken.is_none()
    }
}
