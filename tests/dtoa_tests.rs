//! Conversion-level scenarios, including the extreme magnitudes that force
//! the bignum fallback.

use textfmt::dtoa::{
    to_ecmascript, to_exponential, to_fixed, to_general, to_hex, to_shortest, Options, Style,
};

fn fixed(value: f64, precision: usize) -> String {
    let mut buf = vec![0u8; 2048];
    let len = to_fixed(&mut buf, value, precision, &Options::default()).unwrap();
    String::from_utf8(buf[..len].to_vec()).unwrap()
}

fn general(value: f64, precision: usize) -> String {
    let mut buf = [0u8; 128];
    let len = to_general(&mut buf, value, precision, &Options::default()).unwrap();
    String::from_utf8(buf[..len].to_vec()).unwrap()
}

fn shortest(value: f64) -> String {
    let mut buf = [0u8; 64];
    let len = to_shortest(&mut buf, value, Style::General, &Options::default()).unwrap();
    String::from_utf8(buf[..len].to_vec()).unwrap()
}

fn ecmascript(value: f64) -> String {
    let mut buf = [0u8; 64];
    let len = to_ecmascript(&mut buf, value).unwrap();
    String::from_utf8(buf[..len].to_vec()).unwrap()
}

#[test]
fn huge_fixed_value_goes_through_the_bignum_path() {
    let s = fixed(2.4354608055603473e+307, 6);
    // 308 integer digits, then six zero fraction digits. The exact
    // expansion shares at least 16 leading digits with the shortest form;
    // the 17th may differ by the rounding of the shortest output.
    assert_eq!(s.len(), 308 + 1 + 6);
    assert!(s.starts_with("2435460805560347"));
    assert!(s.ends_with(".000000"));
    let (int_part, frac_part) = s.split_once('.').unwrap();
    assert_eq!(int_part.len(), 308);
    assert_eq!(frac_part, "000000");
    assert!(int_part.bytes().all(|b| b.is_ascii_digit()));
}

#[test]
fn smallest_denormal_prints_its_full_expansion() {
    let s = fixed(5e-324, 1074);
    assert_eq!(s.len(), 2 + 1074);
    assert!(s.starts_with("0."));
    let frac = &s[2..];
    // 323 leading zeros, then the 751 significant digits of 2^-1074.
    assert!(frac[..323].bytes().all(|b| b == b'0'));
    assert!(frac[323..].starts_with("4940656458412465"));
    // The expansion is exact: as a power of five it ends in five.
    assert!(s.ends_with('5'));
    assert!(frac[323..].bytes().all(|b| b.is_ascii_digit()));
}

#[test]
fn fixed_precision_counts_fraction_digits_exactly() {
    for &value in &[0.0, 1.0, 0.5, 1.5, 123.456, 1e10, 1e-10, 12345.6789] {
        for precision in [0usize, 1, 2, 6, 17, 30] {
            let s = fixed(value, precision);
            match s.split_once('.') {
                Some((_, frac)) => assert_eq!(
                    frac.len(),
                    precision,
                    "value {} precision {}",
                    value,
                    precision
                ),
                None => assert_eq!(precision, 0, "value {} precision {}", value, precision),
            }
        }
    }
}

#[test]
fn general_notation_literals() {
    assert_eq!(general(123456.789, 3), "1.23e+05");
    assert_eq!(general(123456.789, 6), "123457");
    assert_eq!(general(0.00001, 6), "1e-05");
}

#[test]
fn ecmascript_literals() {
    assert_eq!(ecmascript(123.456), "123.456");
    assert_eq!(ecmascript(1e21), "1e+21");
    assert_eq!(ecmascript(1e-7), "1e-7");
    assert_eq!(ecmascript(0.0), "0");
    assert_eq!(ecmascript(2f64.powi(64)), "18446744073709552000");
}

#[test]
fn shortest_output_round_trips() {
    let values = [
        0.1,
        0.3,
        1.0 / 3.0,
        123456.789,
        5e-324,
        f64::MAX,
        f64::MIN_POSITIVE,
        2.2250738585072011e-308, // largest denormal-adjacent parse pitfall
        9007199254740993.0,
        1.7588116507170432e-299,
    ];
    for &v in &values {
        let s = shortest(v);
        let parsed: f64 = s.parse().unwrap();
        assert_eq!(parsed.to_bits(), v.to_bits(), "{} reparsed from {}", v, s);
    }
}

#[test]
fn shortest_output_is_minimal() {
    // One digit fewer must not round-trip.
    assert_eq!(shortest(0.3), "0.3");
    assert_eq!(shortest(0.1), "0.1");
    assert_eq!(shortest(1.0 / 3.0), "0.3333333333333333");
    assert_eq!(shortest(2.0 / 3.0), "0.6666666666666666");
    assert_eq!(shortest(5e-324), "5e-324");
}

#[test]
fn hex_digits_reconstruct_the_significand() {
    let options = Options {
        use_upper_case_digits: false,
        normalize: true,
        min_exponent_digits: 1,
        exponent_char: b'p',
        ..Options::default()
    };
    for &v in &[1.0, 1.5, 3.1415927, 123456.789, f64::MIN_POSITIVE, 5e-324, 0.1] {
        let mut buf = [0u8; 64];
        let len = to_hex(&mut buf, v, Some(13), &options).unwrap();
        let s = std::str::from_utf8(&buf[..len]).unwrap();

        // Parse h.hhhh...p+e back into a value.
        let (mantissa, exponent) = s.split_once('p').unwrap();
        let exponent: i32 = exponent.parse().unwrap();
        let (int_digit, frac) = match mantissa.split_once('.') {
            Some((i, f)) => (i, f),
            None => (mantissa, ""),
        };
        let mut value = u64::from_str_radix(int_digit, 16).unwrap() as f64;
        let mut scale = 1.0f64 / 16.0;
        for d in frac.bytes() {
            let digit = (d as char).to_digit(16).unwrap();
            value += digit as f64 * scale;
            scale /= 16.0;
        }
        let reconstructed = value * 2f64.powi(exponent);
        assert_eq!(reconstructed.to_bits(), v.to_bits(), "hex {} for {}", s, v);
    }
}

#[test]
fn every_entry_point_reports_exact_size_hints() {
    let options = Options::default();
    let value = 123456.789;
    let mut big = [0u8; 256];

    let full = to_fixed(&mut big, value, 6, &options).unwrap();
    let err = to_fixed(&mut big[..full - 1], value, 6, &options).unwrap_err();
    assert_eq!(err.required, full);

    let full = to_exponential(&mut big, value, 6, &options).unwrap();
    let err = to_exponential(&mut big[..full - 1], value, 6, &options).unwrap_err();
    assert_eq!(err.required, full);

    let full = to_general(&mut big, value, 6, &options).unwrap();
    let err = to_general(&mut big[..full - 1], value, 6, &options).unwrap_err();
    assert_eq!(err.required, full);

    let full = to_hex(&mut big, value, Some(10), &options).unwrap();
    let err = to_hex(&mut big[..full - 1], value, Some(10), &options).unwrap_err();
    assert_eq!(err.required, full);

    let full = to_shortest(&mut big, value, Style::General, &options).unwrap();
    let err = to_shortest(&mut big[..full - 1], value, Style::General, &options).unwrap_err();
    assert_eq!(err.required, full);

    let full = to_ecmascript(&mut big, value).unwrap();
    let err = to_ecmascript(&mut big[..full - 1], value).unwrap_err();
    assert_eq!(err.required, full);
}

#[test]
fn exponential_of_extreme_magnitudes() {
    let mut buf = [0u8; 128];
    let options = Options::default();
    let len = to_exponential(&mut buf, f64::MAX, 2, &options).unwrap();
    assert_eq!(&buf[..len], b"1.80e+308");
    let len = to_exponential(&mut buf, 5e-324, 2, &options).unwrap();
    assert_eq!(&buf[..len], b"4.94e-324");
    let len = to_exponential(&mut buf, 5e-324, 0, &options).unwrap();
    assert_eq!(&buf[..len], b"5e-324");
}

#[test]
fn fixed_rounding_is_half_up_at_exact_ties() {
    assert_eq!(fixed(0.5, 0), "1");
    assert_eq!(fixed(1.25, 1), "1.3");
    assert_eq!(fixed(0.125, 2), "0.13");
    // Not a tie: 0.45 stored is slightly above 0.45.
    assert_eq!(fixed(0.45, 1), "0.5");
    // Not a tie: 1.005 stored is slightly below 1.005.
    assert_eq!(fixed(1.005, 2), "1.00");
}
