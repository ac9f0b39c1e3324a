#![deny(
    unsafe_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro
)]

//! Procedural macros for the scankit cursor toolkit.
//!
//! - [`macro@Scan`]: derives `scankit::Scan` for newtypes and keyword enums
use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod derive_scan;

/// Derives `scankit::Scan`.
///
/// # Newtypes
///
/// A struct with exactly one field scans as that field. A token the inner
/// type rejects is reported against the outer type.
///
/// ```ignore
/// #[derive(Scan)]
/// struct Celsius(f64);
///
/// #[derive(Scan)]
/// #[scan(expected = "user id")]
/// struct UserId { raw: u64 }
/// ```
///
/// # Keyword enums
///
/// Fieldless variants match their snake_case name, or the spelling given by
/// `#[scan(rename = "...")]`. Matching is case-sensitive.
///
/// ```ignore
/// #[derive(Scan, PartialEq)]
/// enum Command {
///     Push,
///     Pop,
///     #[scan(rename = "+")]
///     Add,
/// }
///
/// // "push" -> Command::Push, "+" -> Command::Add, "PUSH" -> error
/// ```
///
/// # Attributes
///
/// | Attribute | Position | Effect |
/// |-----------|----------|--------|
/// | `expected = "..."` | type | overrides `Scan::EXPECTED` |
/// | `rename = "..."` | enum variant | overrides the matched spelling |
#[proc_macro_derive(Scan, attributes(scan))]
pub fn derive_scan(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive_scan::expand(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
