#[macro_use]
extern crate criterion;

use criterion::{black_box, Criterion};

use textfmt::args;
use textfmt::dtoa::{to_fixed, to_shortest, Options, Style};

static INPUTS: [f64; 7] = [
    0.1,
    1.0,
    1234.56789,
    3.141592653589793,
    2.718281828459045e-12,
    1.7976931348623157e308,
    5e-324,
];

fn shortest(c: &mut Criterion) {
    let options = Options::default();
    c.bench_function("shortest", |b| {
        let mut buf = [0u8; 64];
        b.iter(|| {
            for &v in &INPUTS {
                let len = to_shortest(&mut buf, black_box(v), Style::General, &options).unwrap();
                black_box(&buf[..len]);
            }
        })
    });
}

fn fixed_six(c: &mut Criterion) {
    let options = Options::default();
    c.bench_function("fixed_six", |b| {
        let mut buf = [0u8; 2048];
        b.iter(|| {
            for &v in &INPUTS {
                let len = to_fixed(&mut buf, black_box(v), 6, &options).unwrap();
                black_box(&buf[..len]);
            }
        })
    });
}

fn brace_format(c: &mut Criterion) {
    c.bench_function("brace_format", |b| {
        b.iter(|| {
            let s = textfmt::format(
                "{}: {:>12.6f} ({:e})",
                &args![black_box("value"), black_box(1234.56789), black_box(1234.56789)],
            )
            .unwrap();
            black_box(s);
        })
    });
}

fn printf_format(c: &mut Criterion) {
    c.bench_function("printf_format", |b| {
        b.iter(|| {
            let s = textfmt::printf(
                "%s: %12.6f (%e)",
                &args![black_box("value"), black_box(1234.56789), black_box(1234.56789)],
            )
            .unwrap();
            black_box(s);
        })
    });
}

criterion_group!(benches, shortest, fixed_six, brace_format, printf_format);
criterion_main!(benches);
