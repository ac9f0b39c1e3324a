//! Tests for `#[derive(Scan)]`.

use std::cell::RefCell;

use scankit::{Error, ReadFailure, Scan, ScanError, TextSource, scan, until_eof, until_sentinel};
use test_case::test_case;

#[derive(Scan, Debug, Clone, Copy, PartialEq)]
struct Celsius(f64);

#[derive(Scan, Debug, Clone, PartialEq)]
#[scan(expected = "user id")]
struct UserId {
    raw: u64,
}

#[derive(Scan, Debug, Clone, Copy, PartialEq)]
enum Command {
    Push,
    Pop,
    DupTop,
    #[scan(rename = "+")]
    Add,
    #[scan(rename = "end")]
    Halt,
}

#[test]
fn newtype_delegates_to_field() {
    assert_eq!(Celsius::scan("21.5"), Ok(Celsius(21.5)));
    assert_eq!(Celsius::EXPECTED, "f64");
}

#[test]
fn newtype_reports_outer_type() {
    assert_eq!(
        UserId::scan("abc"),
        Err(ScanError {
            token: "abc".into(),
            expected: "user id",
        })
    );
    assert_eq!(UserId::scan("17"), Ok(UserId { raw: 17 }));
}

#[test_case("push", Some(Command::Push); "plain")]
#[test_case("dup_top", Some(Command::DupTop); "snake case")]
#[test_case("+", Some(Command::Add); "renamed symbol")]
#[test_case("end", Some(Command::Halt); "renamed word")]
#[test_case("halt", None; "original name hidden by rename")]
#[test_case("Push", None; "case sensitive")]
#[test_case("DupTop", None; "pascal case rejected")]
fn keyword_enum_spellings(token: &str, expected: Option<Command>) {
    assert_eq!(Command::scan(token).ok(), expected);
}

#[test]
fn keyword_enum_expected_name() {
    assert_eq!(Command::EXPECTED, "command");
}

#[test]
fn derived_types_drive_cursors() {
    let source = RefCell::new(TextSource::from_text("push push + pop end dup_top"));
    let program = scan::<_, Command>(&source)
        .until(until_sentinel(Command::Halt))
        .collect_values()
        .unwrap();
    assert_eq!(
        program,
        [Command::Push, Command::Push, Command::Add, Command::Pop]
    );
}

#[test]
fn derived_type_failure_names_the_type() {
    let source = RefCell::new(TextSource::from_text("20.5 warm"));
    let result = scan::<_, Celsius>(&source)
        .until(until_eof())
        .collect_values();
    assert_eq!(
        result,
        Err(Error::StreamRead(ReadFailure::Malformed {
            token: "warm".into(),
            expected: "f64",
        }))
    );
}
