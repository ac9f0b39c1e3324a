//! Snapshot tests for user-facing error messages.

use std::cell::RefCell;

use scankit::{Cursor, ScanConfig, TextSource, scan, until_count, until_sentinel};

type Words<'s> = Cursor<'s, TextSource<&'static [u8]>, String>;

#[test]
fn malformed_integer() {
    let source = RefCell::new(TextSource::from_text("1 2 x"));
    let err = scan::<_, i32>(&source)
        .until(until_count(3))
        .collect_values()
        .unwrap_err();
    insta::assert_snapshot!(err, @"stream read failure: expected i32, found `x`");
}

#[test]
fn end_of_input_on_sentinel_search() {
    let source = RefCell::new(TextSource::from_text("2 4"));
    let err = scan::<_, i32>(&source)
        .until(until_sentinel(-1))
        .collect_values()
        .unwrap_err();
    insta::assert_snapshot!(err, @"stream read failure: unexpected end of input");
}

#[test]
fn token_too_long() {
    let config = ScanConfig::new().with_max_token_len(4);
    let source = RefCell::new(TextSource::with_config("abcdefgh".as_bytes(), config));
    let mut cursor = scan::<_, String>(&source);
    let err = cursor.get().unwrap_err();
    insta::assert_snapshot!(err, @"stream read failure: token too long: 8 bytes > limit 4");
}

#[test]
fn token_limit() {
    let config = ScanConfig::new().with_max_tokens(1);
    let source = RefCell::new(TextSource::with_config("a b".as_bytes(), config));
    let err = scan::<_, String>(&source)
        .until(until_count(2))
        .collect_values()
        .unwrap_err();
    insta::assert_snapshot!(err, @"stream read failure: token limit exceeded: limit 1");
}

#[test]
fn advancing_markers() {
    let mut eof = Words::until_eof();
    insta::assert_snapshot!(
        eof.advance().unwrap_err(),
        @"cannot advance: eof marker is not bound to a source"
    );

    let mut sentinel = Words::until_sentinel("stop".into());
    insta::assert_snapshot!(
        sentinel.get().unwrap_err(),
        @"cannot dereference: sentinel marker is not bound to a source"
    );
}

#[derive(thiserror::Error, Debug)]
enum DriverError {
    #[error(transparent)]
    Scan(#[from] scankit::Error),

    #[error("total overflowed after {count} values")]
    Overflow { count: usize },
}

fn checked_total(text: &str) -> Result<u8, DriverError> {
    let source = RefCell::new(TextSource::from_text(text));
    let mut total = 0u8;
    for (count, value) in scan::<_, u8>(&source).until(until_count(4)).enumerate() {
        total = total
            .checked_add(value?)
            .ok_or(DriverError::Overflow { count })?;
    }
    Ok(total)
}

#[test]
fn user_errors_wrap_scan_errors() {
    assert_eq!(checked_total("1 2 3 4").ok(), Some(10));
    insta::assert_snapshot!(
        checked_total("200 100 1 1").unwrap_err(),
        @"total overflowed after 1 values"
    );
    insta::assert_snapshot!(
        checked_total("1 -2").unwrap_err(),
        @"stream read failure: expected u8, found `-2`"
    );
}
