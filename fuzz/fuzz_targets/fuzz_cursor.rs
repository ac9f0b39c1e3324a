#![no_main]

use std::cell::RefCell;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use scankit::{Cursor, ScanConfig, TextSource, scan, until_count, until_eof, until_sentinel};

#[derive(Debug, Clone, Copy, Arbitrary)]
enum Stop {
    Eof,
    Count(u8),
    Sentinel(i16),
}

#[derive(Debug, Arbitrary)]
struct Input {
    config: ScanConfig,
    stop: Stop,
    text: String,
}

fn marker<'s, S>(stop: Stop) -> Cursor<'s, S, i16> {
    match stop {
        Stop::Eof => until_eof(),
        Stop::Count(n) => until_count(usize::from(n)),
        Stop::Sentinel(v) => until_sentinel(v),
    }
}

fuzz_target!(|input: Input| {
    // Comparison is symmetric, including when it fails.
    let forward_src = RefCell::new(TextSource::with_config(input.text.as_bytes(), input.config));
    let forward = scan(&forward_src).equivalent(&mut marker(input.stop));
    let backward_src = RefCell::new(TextSource::with_config(input.text.as_bytes(), input.config));
    let backward = marker(input.stop).equivalent(&mut scan(&backward_src));
    assert_eq!(forward, backward);

    // Eof and Count comparisons never raise.
    if !matches!(input.stop, Stop::Sentinel(_)) {
        assert!(forward.is_ok());
    }

    let source = RefCell::new(TextSource::with_config(input.text.as_bytes(), input.config));
    let mut values = 0usize;
    let mut failed = false;
    for item in scan::<_, i16>(&source).until(marker(input.stop)) {
        assert!(!failed, "iterator yielded after an error");
        match item {
            Ok(value) => {
                if let Stop::Sentinel(stop) = input.stop {
                    assert_ne!(value, stop);
                }
                values += 1;
            }
            Err(_) => failed = true,
        }
    }

    if let Stop::Count(n) = input.stop {
        assert!(values <= usize::from(n));
    }
    assert!(source.borrow().tokens_read() >= values);
    assert!(values <= input.config.max_tokens);
});
