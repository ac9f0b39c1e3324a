#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use scankit::{ReadFailure, ScanConfig, Source, TextSource};

#[derive(Debug, Clone, Copy, Arbitrary)]
enum Request {
    Int,
    Unsigned,
    Float,
    Bool,
    Char,
    Word,
}

#[derive(Debug, Arbitrary)]
struct Input {
    config: ScanConfig,
    requests: Vec<Request>,
    text: Vec<u8>,
}

fn read(source: &mut TextSource<&[u8]>, request: Request) -> bool {
    match request {
        Request::Int => source.read::<i64>().is_some(),
        Request::Unsigned => source.read::<u32>().is_some(),
        Request::Float => source.read::<f64>().is_some(),
        Request::Bool => source.read::<bool>().is_some(),
        Request::Char => source.read::<char>().is_some(),
        Request::Word => source.read::<String>().is_some(),
    }
}

fuzz_target!(|input: Input| {
    let mut source = TextSource::with_config(input.text.as_slice(), input.config);

    for request in input.requests {
        let before = source.tokens_read();
        let was_eof = source.at_eof();
        let ok = read(&mut source, request);

        // A token is consumed exactly when a value comes back.
        assert_eq!(source.tokens_read(), before + usize::from(ok));
        assert_eq!(ok, source.is_good());
        assert!(source.tokens_read() <= input.config.max_tokens);

        if was_eof {
            assert!(!ok);
            assert!(source.at_eof());
        }
        if source.at_eof() {
            assert!(matches!(
                source.status().failure(),
                Some(
                    ReadFailure::EndOfInput
                        | ReadFailure::Io(_)
                        | ReadFailure::TokenLimitExceeded { .. }
                )
            ));
        }
    }
});
