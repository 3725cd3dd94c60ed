//! Property tests for the conversion core: the round-trip and digit-count
//! guarantees over arbitrary bit patterns.

use proptest::prelude::*;

use textfmt::dtoa::{to_ecmascript, to_fixed, to_shortest, Options, Style};

fn finite_positive() -> impl Strategy<Value = f64> {
    any::<u64>().prop_filter_map("finite positive doubles", |bits| {
        let v = f64::from_bits(bits).abs();
        (v.is_finite() && v != 0.0).then_some(v)
    })
}

proptest! {
    #[test]
    fn shortest_round_trips(v in finite_positive()) {
        let mut buf = [0u8; 64];
        let len = to_shortest(&mut buf, v, Style::General, &Options::default()).unwrap();
        let s = std::str::from_utf8(&buf[..len]).unwrap();
        let parsed: f64 = s.parse().unwrap();
        prop_assert_eq!(parsed.to_bits(), v.to_bits());
    }

    #[test]
    fn ecmascript_round_trips(v in finite_positive()) {
        let mut buf = [0u8; 64];
        let len = to_ecmascript(&mut buf, v).unwrap();
        let s = std::str::from_utf8(&buf[..len]).unwrap();
        let parsed: f64 = s.parse().unwrap();
        prop_assert_eq!(parsed.to_bits(), v.to_bits());
    }

    #[test]
    fn fixed_produces_the_requested_digit_count(
        v in finite_positive(),
        precision in 0usize..=40,
    ) {
        let mut buf = vec![0u8; 2048];
        let len = to_fixed(&mut buf, v, precision, &Options::default()).unwrap();
        let s = std::str::from_utf8(&buf[..len]).unwrap();
        match s.split_once('.') {
            Some((int_part, frac)) => {
                prop_assert!(!int_part.is_empty());
                prop_assert_eq!(frac.len(), precision);
            }
            None => prop_assert_eq!(precision, 0),
        }
    }

    #[test]
    fn buffer_hints_are_exact(v in finite_positive(), precision in 0usize..=20) {
        let mut buf = vec![0u8; 2048];
        let len = to_fixed(&mut buf, v, precision, &Options::default()).unwrap();
        if len > 0 {
            let err = to_fixed(&mut buf[..len - 1], v, precision, &Options::default()).unwrap_err();
            prop_assert_eq!(err.required, len);
        }
    }

    #[test]
    fn shortest_never_exceeds_seventeen_digits(v in finite_positive()) {
        let mut buf = [0u8; 64];
        let len = to_shortest(&mut buf, v, Style::Scientific, &Options::default()).unwrap();
        let s = std::str::from_utf8(&buf[..len]).unwrap();
        let mantissa = s.split(['e', 'E']).next().unwrap();
        let digits = mantissa.bytes().filter(|b| b.is_ascii_digit()).count();
        prop_assert!(digits <= 17, "{} has too many digits", s);
    }
}
