//! Exact digit generation over arbitrary-precision fractions. The value is
//! represented as numerator/denominator scaled so that the first digit falls
//! right before the decimal point; shortest mode additionally tracks the
//! half-ulp deltas to know when enough digits uniquely identify the input.

use core::cmp::Ordering;

use crate::dtoa::bignum::Bignum;
use crate::dtoa::DigitBuffer;
use crate::ieee::Double;

// Up to nine digits fit one long-division quotient: 10^9 < 2^32.
const DIGITS_PER_CHUNK: usize = 9;

fn normalized_exponent(mut significand: u64, mut exponent: i32) -> i32 {
    debug_assert!(significand != 0);
    while significand & Double::HIDDEN_BIT == 0 {
        significand <<= 1;
        exponent -= 1;
    }
    exponent
}

/// Estimates the decimal magnitude 10^k of significand * 2^exponent for a
/// normalized significand. The estimate is never too low and at most one
/// too high; the fixup step below corrects the latter.
fn estimate_power(exponent: i32) -> i32 {
    const K1_LOG10: f64 = 0.301_029_995_663_981_14;
    let estimate = f64::from(exponent + 52) * K1_LOG10 - 1e-10;
    let truncated = estimate as i32;
    if estimate > f64::from(truncated) {
        truncated + 1
    } else {
        truncated
    }
}

#[allow(clippy::too_many_arguments)]
fn initial_scaled_start_values(
    significand: u64,
    exponent: i32,
    lower_boundary_is_closer: bool,
    estimated_power: i32,
    need_boundary_deltas: bool,
    num: &mut Bignum,
    den: &mut Bignum,
    delta_minus: &mut Bignum,
    delta_plus: &mut Bignum,
) {
    if exponent >= 0 {
        // The value is significand * 2^exponent, an integer.
        num.assign_u64(significand);
        num.shift_left(exponent as usize);
        den.assign_power_u16(10, estimated_power as usize);
        if need_boundary_deltas {
            // Scale everything by two so the half-ulp deltas stay integral.
            den.shift_left(1);
            num.shift_left(1);
            delta_plus.assign_u16(1);
            delta_plus.shift_left(exponent as usize);
            delta_minus.assign_u16(1);
            delta_minus.shift_left(exponent as usize);
        }
    } else if estimated_power >= 0 {
        num.assign_u64(significand);
        den.assign_power_u16(10, estimated_power as usize);
        den.shift_left((-exponent) as usize);
        if need_boundary_deltas {
            den.shift_left(1);
            num.shift_left(1);
            delta_plus.assign_u16(1);
            delta_minus.assign_u16(1);
        }
    } else {
        num.assign_power_u16(10, (-estimated_power) as usize);
        if need_boundary_deltas {
            delta_plus.assign_bignum(num);
            delta_minus.assign_bignum(num);
        }
        num.multiply_by_u64(significand);
        den.assign_u16(1);
        den.shift_left((-exponent) as usize);
        if need_boundary_deltas {
            num.shift_left(1);
            den.shift_left(1);
        }
    }
    if need_boundary_deltas && lower_boundary_is_closer {
        // The value sits right above a binade boundary; the gap below is
        // half as wide. Scale by two once more so both deltas stay exact,
        // and double only the upper one.
        den.shift_left(1);
        num.shift_left(1);
        delta_plus.shift_left(1);
    }
}

/// The power estimate may be one too high, in which case the first digit
/// would come out as zero. Test for that and scale the numerator (and the
/// deltas with it) instead of producing a leading zero.
fn fixup_multiply10(
    estimated_power: i32,
    is_even: bool,
    decimal_point: &mut i32,
    num: &mut Bignum,
    den: &Bignum,
    delta_minus: &mut Bignum,
    delta_plus: &mut Bignum,
) {
    let cmp = Bignum::plus_compare(num, delta_plus, den);
    let in_range = if is_even {
        cmp != Ordering::Less
    } else {
        cmp == Ordering::Greater
    };
    if in_range {
        *decimal_point = estimated_power + 1;
    } else {
        *decimal_point = estimated_power;
        num.times10();
        delta_minus.times10();
        delta_plus.times10();
    }
}

/// Emits digits until the remaining fraction is inside one of the deltas,
/// then rounds the last digit so the result is the closest decimal to the
/// input, ties broken towards even.
fn generate_shortest_digits(
    num: &mut Bignum,
    den: &Bignum,
    delta_minus: &mut Bignum,
    delta_plus: &mut Bignum,
    is_even: bool,
    buf: &mut DigitBuffer,
) {
    loop {
        let digit = num.divide_modulo_int_bignum(den);
        debug_assert!(digit <= 9);
        buf.push(b'0' + digit as u8);
        // num = num * 10^-kappa - digit, the still missing tail.
        let in_delta_room_minus = if is_even {
            Bignum::less_equal(num, delta_minus)
        } else {
            Bignum::less(num, delta_minus)
        };
        let plus_cmp = Bignum::plus_compare(num, delta_plus, den);
        let in_delta_room_plus = if is_even {
            plus_cmp != Ordering::Less
        } else {
            plus_cmp == Ordering::Greater
        };
        if !in_delta_room_minus && !in_delta_room_plus {
            num.times10();
            delta_minus.times10();
            delta_plus.times10();
        } else if in_delta_room_minus && in_delta_room_plus {
            // Both rounding directions are possible; take whichever decimal
            // is closer, ties to the even digit.
            let last = buf.len() - 1;
            match Bignum::plus_compare(num, num, den) {
                Ordering::Less => {}
                Ordering::Greater => {
                    debug_assert!(buf[last] != b'9');
                    buf[last] += 1;
                }
                Ordering::Equal => {
                    if (buf[last] - b'0') % 2 != 0 {
                        debug_assert!(buf[last] != b'9');
                        buf[last] += 1;
                    }
                }
            }
            return;
        } else if in_delta_room_minus {
            return;
        } else {
            let last = buf.len() - 1;
            debug_assert!(buf[last] != b'9');
            buf[last] += 1;
            return;
        }
    }
}

/// Emits exactly `count` digits, the last one rounded half up. All but the
/// final digit are produced in chunks of up to nine per long division.
fn generate_counted_digits(
    count: usize,
    decimal_point: &mut i32,
    num: &mut Bignum,
    den: &Bignum,
    buf: &mut DigitBuffer,
) {
    debug_assert!(count >= 1);
    let start = buf.len();
    debug_assert!(start == 0);
    let mut produced = 0;
    while produced + 1 < count {
        let chunk = DIGITS_PER_CHUNK.min(count - 1 - produced);
        if chunk > 1 {
            num.multiply_by_power_of_ten(chunk - 1);
        }
        let mut quotient = num.div_mod(den);
        debug_assert!(quotient < 10u64.pow(chunk as u32));
        let mut tmp = [b'0'; DIGITS_PER_CHUNK];
        for slot in tmp[..chunk].iter_mut().rev() {
            *slot = b'0' + (quotient % 10) as u8;
            quotient /= 10;
        }
        for &b in &tmp[..chunk] {
            buf.push(b);
        }
        produced += chunk;
        num.times10();
    }
    // The last digit rounds half up on the remainder.
    let mut digit = num.div_mod(den);
    if Bignum::plus_compare(num, num, den) != Ordering::Less {
        digit += 1;
    }
    debug_assert!(digit <= 10);
    buf.push(b'0' + digit as u8);
    // Correct a run of nines the rounding may have produced.
    let mut i = count - 1;
    while i > 0 {
        if buf[i] != b'0' + 10 {
            break;
        }
        buf[i] = b'0';
        buf[i - 1] += 1;
        i -= 1;
    }
    if buf[0] == b'0' + 10 {
        buf[0] = b'1';
        *decimal_point += 1;
    }
    debug_assert!(buf.len() == count);
}

fn bignum_to_fixed(
    requested_digits: usize,
    decimal_point: &mut i32,
    num: &mut Bignum,
    den: &mut Bignum,
    buf: &mut DigitBuffer,
) {
    let requested = requested_digits as i32;
    // More than just the requested digits can matter: a number like 0.5
    // with zero requested digits still rounds up to "1".
    if -(*decimal_point) > requested {
        *decimal_point = -requested;
    } else if -(*decimal_point) == requested {
        // The first digit sits just past the cut; only the rounding
        // direction matters.
        den.times10();
        if Bignum::plus_compare(num, num, den) != Ordering::Less {
            buf.push(b'1');
            *decimal_point += 1;
        }
    } else {
        let needed_digits = (*decimal_point + requested) as usize;
        generate_counted_digits(needed_digits, decimal_point, num, den, buf);
    }
}

struct Scaled {
    num: Bignum,
    den: Bignum,
    delta_minus: Bignum,
    delta_plus: Bignum,
    is_even: bool,
    decimal_point: i32,
}

fn scale(v: f64, need_boundary_deltas: bool, estimated_power: i32) -> Scaled {
    let d = Double::new(v);
    let significand = d.significand();
    let exponent = d.exponent();
    let is_even = significand & 1 == 0;
    let mut s = Scaled {
        num: Bignum::new(),
        den: Bignum::new(),
        delta_minus: Bignum::new(),
        delta_plus: Bignum::new(),
        is_even,
        decimal_point: 0,
    };
    initial_scaled_start_values(
        significand,
        exponent,
        d.lower_boundary_is_closer(),
        estimated_power,
        need_boundary_deltas,
        &mut s.num,
        &mut s.den,
        &mut s.delta_minus,
        &mut s.delta_plus,
    );
    fixup_multiply10(
        estimated_power,
        is_even,
        &mut s.decimal_point,
        &mut s.num,
        &s.den,
        &mut s.delta_minus,
        &mut s.delta_plus,
    );
    s
}

fn estimated_power_of(v: f64) -> i32 {
    let d = Double::new(v);
    estimate_power(normalized_exponent(d.significand(), d.exponent()))
}

/// Shortest mode: the produced digits round-trip to `v` and no shorter
/// sequence does. Returns the decimal point position.
pub(crate) fn shortest(v: f64, buf: &mut DigitBuffer) -> i32 {
    debug_assert!(!Double::new(v).is_special());
    debug_assert!(v > 0.0);
    let mut s = scale(v, true, estimated_power_of(v));
    generate_shortest_digits(
        &mut s.num,
        &s.den,
        &mut s.delta_minus,
        &mut s.delta_plus,
        s.is_even,
        buf,
    );
    s.decimal_point
}

/// Fixed mode: digits for `requested_digits` places after the decimal
/// point. Trailing zeros are kept; an empty result means every requested
/// digit is zero.
pub(crate) fn fixed(v: f64, requested_digits: usize, buf: &mut DigitBuffer) -> i32 {
    debug_assert!(v > 0.0);
    let estimated_power = estimated_power_of(v);
    // Short-circuit values too small to contribute any digit, Gay's
    // convention for the decimal point.
    if -estimated_power - 1 > requested_digits as i32 {
        return -(requested_digits as i32);
    }
    let mut s = scale(v, false, estimated_power);
    bignum_to_fixed(
        requested_digits,
        &mut s.decimal_point,
        &mut s.num,
        &mut s.den,
        buf,
    );
    s.decimal_point
}

/// Precision mode: exactly `requested_digits` significant digits.
pub(crate) fn counted(v: f64, requested_digits: usize, buf: &mut DigitBuffer) -> i32 {
    debug_assert!(v > 0.0);
    debug_assert!(requested_digits >= 1);
    let mut s = scale(v, false, estimated_power_of(v));
    generate_counted_digits(requested_digits, &mut s.decimal_point, &mut s.num, &s.den, buf);
    s.decimal_point
}
