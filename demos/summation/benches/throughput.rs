use std::cell::RefCell;

use divan::{Bencher, black_box};
use scankit::algorithm::sum1;
use scankit::{TextSource, scan, until_count, until_eof, until_sentinel};
use scankit_summation::{Mode, Options, run_to_string};

fn main() {
    divan::main();
}

/// `n` integers, eight per line, followed by a `-1` sentinel.
fn generate_integers(n: usize) -> String {
    let mut result = String::with_capacity(n * 6);
    for i in 0..n {
        result.push_str(&(i % 10_000).to_string());
        result.push(if i % 8 == 7 { '\n' } else { ' ' });
    }
    result.push_str("-1\n");
    result
}

#[divan::bench(args = [100, 1000, 10_000, 100_000])]
fn sum_until_count(bencher: Bencher, n: usize) {
    let input = generate_integers(n);

    bencher
        .counter(divan::counter::BytesCount::new(input.len()))
        .bench(|| {
            let source = RefCell::new(TextSource::from_text(&input));
            black_box(sum1(scan::<_, i64>(&source), until_count(n)))
        });
}

#[divan::bench(args = [100, 1000, 10_000, 100_000])]
fn sum_until_sentinel(bencher: Bencher, n: usize) {
    let input = generate_integers(n);

    bencher
        .counter(divan::counter::BytesCount::new(input.len()))
        .bench(|| {
            let source = RefCell::new(TextSource::from_text(&input));
            black_box(sum1(scan::<_, i64>(&source), until_sentinel(-1)))
        });
}

#[divan::bench(args = [100, 1000, 10_000, 100_000])]
fn sum_until_eof(bencher: Bencher, n: usize) {
    let input = generate_integers(n);

    bencher
        .counter(divan::counter::BytesCount::new(input.len()))
        .bench(|| {
            let source = RefCell::new(TextSource::from_text(&input));
            black_box(sum1(scan::<_, f64>(&source), until_eof()))
        });
}

#[divan::bench(args = [100, 1000, 10_000])]
fn collect_words(bencher: Bencher, n: usize) {
    let input = generate_integers(n);

    bencher.bench(|| {
        let source = RefCell::new(TextSource::from_text(&input));
        black_box(
            scan::<_, String>(&source)
                .until(until_eof())
                .collect_values(),
        )
    });
}

#[divan::bench]
fn pipeline(bencher: Bencher) {
    let input = "1 2 3\n2 4 6 8 -1\nx y z\nb c a\n1.5 2.5\n";
    let options = Options {
        mode: Mode::Pipeline,
        ..Options::default()
    };

    bencher.bench(|| black_box(run_to_string(input, &options)));
}
