//! Source configuration for resource limits.
//!
//! This module provides [`ScanConfig`] for bounding how much a
//! [`TextSource`](crate::TextSource) will read on behalf of a cursor.
//!
//! # Token Limits
//!
//! A cursor driven by an [`Eof`](crate::Cursor::Eof) marker reads until the
//! input runs out, and a single whitespace-free run of bytes becomes one
//! token. Both are unbounded for hostile input, so sources enforce a maximum
//! token length and an optional maximum token count. Exceeding either limit
//! is reported through the source status like any other read failure.
//!
//! # Example
//!
//! ```ignore
//! use scankit_core::config::ScanConfig;
//!
//! // Default limits (token length: 4096 bytes, no token count limit)
//! let config = ScanConfig::default();
//!
//! // Read at most 1000 tokens of up to 64 bytes each
//! let config = ScanConfig::new()
//!     .with_max_token_len(64)
//!     .with_max_tokens(1000);
//! ```

/// Configuration for source behavior and resource limits.
///
/// # Default Values
///
/// | Setting | Default | Rationale |
/// |---------|---------|-----------|
/// | `max_token_len` | 4096 | Longer than any numeric literal or word in practice |
/// | `max_tokens` | `usize::MAX` | No limit by default |
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanConfig {
    /// Maximum length of a single token in bytes.
    ///
    /// A longer token is rejected with
    /// [`ReadFailure::TokenTooLong`](crate::ReadFailure::TokenTooLong) and
    /// left unconsumed.
    ///
    /// Default: 4096
    pub max_token_len: usize,

    /// Maximum number of tokens the source hands out.
    ///
    /// Once reached, further reads fail with
    /// [`ReadFailure::TokenLimitExceeded`](crate::ReadFailure::TokenLimitExceeded).
    ///
    /// Default: `usize::MAX` (no limit)
    pub max_tokens: usize,
}

impl Default for ScanConfig {
    #[inline]
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl ScanConfig {
    /// Default configuration, usable in const contexts.
    pub const DEFAULT: Self = Self {
        max_token_len: 4096,
        max_tokens: usize::MAX,
    };

    /// Creates a new configuration with default values.
    #[inline]
    pub const fn new() -> Self {
        Self::DEFAULT
    }

    /// Sets the maximum token length in bytes.
    #[inline]
    pub const fn with_max_token_len(mut self, len: usize) -> Self {
        self.max_token_len = len;
        self
    }

    /// Sets the maximum token count. Use `usize::MAX` to disable.
    #[inline]
    pub const fn with_max_tokens(mut self, count: usize) -> Self {
        self.max_tokens = count;
        self
    }

    /// Disables both limits.
    ///
    /// Only use this for trusted input.
    #[inline]
    pub const fn unlimited() -> Self {
        Self {
            max_token_len: usize::MAX,
            max_tokens: usize::MAX,
        }
    }

    /// Checks a token of `len` bytes against `max_token_len`.
    #[inline]
    pub(crate) fn check_len(&self, len: usize) -> Result<(), crate::ReadFailure> {
        if len > self.max_token_len {
            Err(crate::ReadFailure::TokenTooLong {
                len,
                limit: self.max_token_len,
            })
        } else {
            Ok(())
        }
    }

    /// Checks that one more token may be handed out after `consumed`.
    #[inline]
    pub(crate) fn check_count(&self, consumed: usize) -> Result<(), crate::ReadFailure> {
        if consumed >= self.max_tokens {
            Err(crate::ReadFailure::TokenLimitExceeded {
                limit: self.max_tokens,
            })
        } else {
            Ok(())
        }
    }
}
