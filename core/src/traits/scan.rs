use thiserror::Error;

/// Failure to convert a token into a value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("expected {expected}, found `{token}`")]
pub struct ScanError {
    /// The raw token text.
    pub token: String,
    /// Human readable name of the requested type.
    pub expected: &'static str,
}

impl ScanError {
    /// Builds an error for type `T` from the rejected token.
    #[inline]
    pub fn new<T: Scan>(token: &str) -> Self {
        Self {
            token: token.to_owned(),
            expected: T::EXPECTED,
        }
    }
}

impl From<ScanError> for crate::ReadFailure {
    fn from(err: ScanError) -> Self {
        crate::ReadFailure::Malformed {
            token: err.token,
            expected: err.expected,
        }
    }
}

/// Trait for types that can be scanned from a single whitespace-delimited token.
///
/// This is the element-type side of the [`Source`](super::Source) contract:
/// a source finds the next token, `Scan` decides whether it is a valid `Self`.
/// A rejected token is reported as malformed input and left in the source.
///
/// # Example
///
/// ```ignore
/// use scankit::{Scan, ScanError};
///
/// struct Percent(u8);
///
/// impl Scan for Percent {
///     const EXPECTED: &'static str = "percentage";
///
///     fn scan(token: &str) -> Result<Self, ScanError> {
///         let digits = token.strip_suffix('%').ok_or_else(|| ScanError::new::<Self>(token))?;
///         match digits.parse::<u8>() {
///             Ok(v) if v <= 100 => Ok(Percent(v)),
///             _ => Err(ScanError::new::<Self>(token)),
///         }
///     }
/// }
/// ```
///
/// Newtypes and keyword enums can use `#[derive(Scan)]` instead.
pub trait Scan: Sized {
    /// Diagnostic name of the type, e.g. `"integer"`.
    const EXPECTED: &'static str;

    /// Convert one token into a value.
    fn scan(token: &str) -> Result<Self, ScanError>;
}

macro_rules! scan_from_str {
    ($($ty:ty => $name:literal),* $(,)?) => {
        $(
            impl Scan for $ty {
                const EXPECTED: &'static str = $name;

                #[inline]
                fn scan(token: &str) -> Result<Self, ScanError> {
                    token.parse().map_err(|_| ScanError::new::<Self>(token))
                }
            }
        )*
    };
}

scan_from_str! {
    i8 => "i8",
    i16 => "i16",
    i32 => "i32",
    i64 => "i64",
    i128 => "i128",
    isize => "isize",
    u8 => "u8",
    u16 => "u16",
    u32 => "u32",
    u64 => "u64",
    u128 => "u128",
    usize => "usize",
    f32 => "f32",
    f64 => "f64",
    bool => "bool",
}

impl Scan for String {
    const EXPECTED: &'static str = "word";

    #[inline]
    fn scan(token: &str) -> Result<Self, ScanError> {
        Ok(token.to_owned())
    }
}

impl Scan for char {
    const EXPECTED: &'static str = "char";

    /// Accepts single-character tokens only.
    #[inline]
    fn scan(token: &str) -> Result<Self, ScanError> {
        let mut chars = token.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(ScanError::new::<Self>(token)),
        }
    }
}

impl<T: Scan> Scan for Box<T> {
    const EXPECTED: &'static str = T::EXPECTED;

    #[inline]
    fn scan(token: &str) -> Result<Self, ScanError> {
        T::scan(token).map(Box::new)
    }
}
