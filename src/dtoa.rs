//! Double-to-decimal conversion. Each entry point converts a non-negative
//! finite double into one textual notation, writing into a caller-provided
//! byte buffer. On a too-small buffer the exact required size is returned
//! instead, so a retry with that capacity always succeeds.
//!
//! Digit generation is decoupled from layout through the
//! `(digits, decimal point)` intermediate form: the digit string `d1..dn`
//! with decimal point `p` denotes `0.d1..dn * 10^p`. A fast generator is
//! attempted first and an exact bignum fallback covers the rest.

mod bignum;
mod bignum_dtoa;
mod diyfp;
mod fast;
mod fixed;

use arrayvec::ArrayVec;

use crate::ieee::Double;

pub(crate) use diyfp::DiyFp;

/// Digits of the integer part of the largest double.
const MAX_DIGITS_BEFORE_POINT: usize = 309;

/// The longest fraction: the smallest denormal has 1074 binary fraction
/// bits, hence 1074 decimal fraction digits.
pub const MAX_FIXED_PRECISION: usize = 1074;

const MAX_DIGITS: usize = MAX_DIGITS_BEFORE_POINT + MAX_FIXED_PRECISION + 2;

/// Scratch storage for generated digits.
pub(crate) type DigitBuffer = ArrayVec<u8, MAX_DIGITS>;

/// Notation selector for [`to_shortest`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Style {
    Fixed,
    Scientific,
    General,
    Hex,
}

/// Returned when the destination buffer cannot hold the converted text.
/// `required` is the smallest buffer length that would have succeeded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BufferTooSmall {
    pub required: usize,
}

/// Textual options shared by all notations.
#[derive(Clone, Copy, Debug)]
pub struct Options {
    /// Hex digits in upper case.
    pub use_upper_case_digits: bool,
    /// Normalize denormals before hex digit extraction.
    pub normalize: bool,
    /// Digit grouping character for fixed notation, groups of three.
    pub thousands_sep: Option<u8>,
    pub decimal_point: u8,
    /// Emit a decimal point even when no fraction digits follow.
    pub use_alternative_form: bool,
    /// Minimum number of exponent digits, 1 to 4.
    pub min_exponent_digits: u8,
    pub exponent_char: u8,
    pub emit_positive_exponent_sign: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            use_upper_case_digits: true,
            normalize: true,
            thousands_sep: None,
            decimal_point: b'.',
            use_alternative_form: false,
            min_exponent_digits: 2,
            exponent_char: b'e',
            emit_positive_exponent_sign: true,
        }
    }
}

//
// Digit generation.
//

fn generate_shortest_digits(v: f64, buf: &mut DigitBuffer) -> i32 {
    let d = Double::new(v);
    debug_assert!(!d.is_special());
    debug_assert!(!d.is_negative());
    if d.is_zero() {
        buf.push(b'0');
        return 1;
    }
    if let Some(decpt) = fast::shortest(v, buf) {
        return decpt;
    }
    buf.clear();
    bignum_dtoa::shortest(v, buf)
}

fn generate_precision_digits(v: f64, requested_digits: usize, buf: &mut DigitBuffer) -> i32 {
    let d = Double::new(v);
    debug_assert!(!d.is_special());
    debug_assert!(!d.is_negative());
    debug_assert!(requested_digits > 0);
    if d.is_zero() {
        buf.push(b'0');
        return 1;
    }
    if let Some(decpt) = fast::counted(v, requested_digits, buf) {
        return decpt;
    }
    buf.clear();
    bignum_dtoa::counted(v, requested_digits, buf)
}

fn generate_fixed_digits(v: f64, requested_digits: usize, buf: &mut DigitBuffer) -> i32 {
    let d = Double::new(v);
    debug_assert!(!d.is_special());
    debug_assert!(!d.is_negative());
    if d.is_zero() {
        buf.push(b'0');
        return 1;
    }
    if let Some(decpt) = fixed::fixed(v, requested_digits, buf) {
        return decpt;
    }
    buf.clear();
    bignum_dtoa::fixed(v, requested_digits, buf)
}

//
// Fixed notation assembly.
//

fn fixed_representation_length(
    num_digits: usize,
    decpt: i32,
    precision: i32,
    options: &Options,
) -> usize {
    if decpt <= 0 {
        // 0.[000]digits[000]
        if precision > 0 {
            return 2 + precision as usize;
        }
        return 1 + usize::from(options.use_alternative_form);
    }
    let nseps = if options.thousands_sep.is_some() {
        (decpt as usize - 1) / 3
    } else {
        0
    };
    let digits_before_point = decpt as usize + nseps;
    if decpt as usize >= num_digits {
        // digits[000][.000]
        if precision > 0 {
            return digits_before_point + 1 + precision as usize;
        }
        return digits_before_point + usize::from(options.use_alternative_form);
    }
    // dig.its[000]
    debug_assert!(precision >= (num_digits - decpt as usize) as i32);
    digits_before_point + 1 + precision as usize
}

/// Writes the integer part, inserting the grouping character every three
/// digits counted from the decimal point leftwards. Digits past the stored
/// ones are zeros.
fn write_integer_part(out: &mut [u8], mut pos: usize, digits: &[u8], decpt: usize, options: &Options) -> usize {
    for i in 0..decpt {
        if i > 0 && (decpt - i) % 3 == 0 {
            if let Some(sep) = options.thousands_sep {
                out[pos] = sep;
                pos += 1;
            }
        }
        out[pos] = if i < digits.len() { digits[i] } else { b'0' };
        pos += 1;
    }
    pos
}

fn write_fixed_representation(
    out: &mut [u8],
    digits: &[u8],
    decpt: i32,
    precision: i32,
    options: &Options,
) -> usize {
    let num_digits = digits.len();
    let mut pos = 0;
    if decpt <= 0 {
        // 0.[000]digits[000]
        debug_assert!(precision <= 0 || precision >= -decpt + num_digits as i32);
        out[pos] = b'0';
        pos += 1;
        if precision > 0 {
            out[pos] = options.decimal_point;
            pos += 1;
            for _ in 0..-decpt {
                out[pos] = b'0';
                pos += 1;
            }
            out[pos..pos + num_digits].copy_from_slice(digits);
            pos += num_digits;
            let trailing = precision as usize - (-decpt) as usize - num_digits;
            for _ in 0..trailing {
                out[pos] = b'0';
                pos += 1;
            }
        } else if options.use_alternative_form {
            out[pos] = options.decimal_point;
            pos += 1;
        }
        return pos;
    }

    let decpt = decpt as usize;
    if decpt >= num_digits {
        // digits[000][.000]
        pos = write_integer_part(out, pos, digits, decpt, options);
        if precision > 0 {
            out[pos] = options.decimal_point;
            pos += 1;
            for _ in 0..precision {
                out[pos] = b'0';
                pos += 1;
            }
        } else if options.use_alternative_form {
            out[pos] = options.decimal_point;
            pos += 1;
        }
        return pos;
    }

    // dig.its[000]
    debug_assert!(precision >= (num_digits - decpt) as i32);
    pos = write_integer_part(out, pos, &digits[..decpt], decpt, options);
    out[pos] = options.decimal_point;
    pos += 1;
    let fraction = &digits[decpt..];
    out[pos..pos + fraction.len()].copy_from_slice(fraction);
    pos += fraction.len();
    for _ in 0..precision as usize - fraction.len() {
        out[pos] = b'0';
        pos += 1;
    }
    pos
}

//
// Exponential notation assembly.
//

fn exponent_length(exponent: i32, options: &Options) -> usize {
    let mut len = 1;
    let e = if exponent < 0 {
        len += 1;
        -exponent
    } else {
        if options.emit_positive_exponent_sign {
            len += 1;
        }
        exponent
    };
    if e >= 1000 || options.min_exponent_digits >= 4 {
        len + 4
    } else if e >= 100 || options.min_exponent_digits >= 3 {
        len + 3
    } else if e >= 10 || options.min_exponent_digits >= 2 {
        len + 2
    } else {
        len + 1
    }
}

fn write_exponent(out: &mut [u8], mut pos: usize, exponent: i32, options: &Options) -> usize {
    debug_assert!(exponent > -10000 && exponent < 10000);
    debug_assert!((1..=4).contains(&options.min_exponent_digits));
    out[pos] = options.exponent_char;
    pos += 1;
    let mut e = if exponent < 0 {
        out[pos] = b'-';
        pos += 1;
        -exponent
    } else {
        if options.emit_positive_exponent_sign {
            out[pos] = b'+';
            pos += 1;
        }
        exponent
    };
    let k = e;
    if k >= 1000 || options.min_exponent_digits >= 4 {
        out[pos] = b'0' + (e / 1000) as u8;
        pos += 1;
        e %= 1000;
    }
    if k >= 100 || options.min_exponent_digits >= 3 {
        out[pos] = b'0' + (e / 100) as u8;
        pos += 1;
        e %= 100;
    }
    if k >= 10 || options.min_exponent_digits >= 2 {
        out[pos] = b'0' + (e / 10) as u8;
        pos += 1;
        e %= 10;
    }
    out[pos] = b'0' + e as u8;
    pos + 1
}

fn exponential_representation_length(
    num_digits: usize,
    exponent: i32,
    precision: i32,
    options: &Options,
) -> usize {
    debug_assert!(num_digits > 0);
    let mut len = num_digits;
    if num_digits > 1 {
        len += 1;
        if precision > (num_digits - 1) as i32 {
            len += precision as usize - (num_digits - 1);
        }
    } else if precision > 0 {
        len += 1 + precision as usize;
    } else if options.use_alternative_form {
        len += 1;
    }
    len + exponent_length(exponent, options)
}

fn write_exponential_representation(
    out: &mut [u8],
    digits: &[u8],
    exponent: i32,
    precision: i32,
    options: &Options,
) -> usize {
    let num_digits = digits.len();
    debug_assert!(num_digits > 0);
    let mut pos = 0;
    out[pos] = digits[0];
    pos += 1;
    if num_digits > 1 {
        // d.igits[000]e+123
        out[pos] = options.decimal_point;
        pos += 1;
        out[pos..pos + num_digits - 1].copy_from_slice(&digits[1..]);
        pos += num_digits - 1;
        if precision > (num_digits - 1) as i32 {
            for _ in 0..precision as usize - (num_digits - 1) {
                out[pos] = b'0';
                pos += 1;
            }
        }
    } else if precision > 0 {
        // d.0[000]e+123
        out[pos] = options.decimal_point;
        pos += 1;
        for _ in 0..precision {
            out[pos] = b'0';
            pos += 1;
        }
    } else if options.use_alternative_form {
        // d[.]e+123
        out[pos] = options.decimal_point;
        pos += 1;
    }
    write_exponent(out, pos, exponent, options)
}

//
// Hex digit generation.
//

static HEX_DIGITS_LOWER: &[u8; 16] = b"0123456789abcdef";
static HEX_DIGITS_UPPER: &[u8; 16] = b"0123456789ABCDEF";

/// Extracts hex digits straight from the significand bits. Returns the
/// binary exponent. With `normalize` set, denormals are shifted so their
/// leading bit sits in the hidden-bit position like any normal value.
fn generate_hex_digits(
    v: f64,
    precision: i32,
    normalize: bool,
    upper: bool,
    buf: &mut DigitBuffer,
) -> i32 {
    let xdigits = if upper { HEX_DIGITS_UPPER } else { HEX_DIGITS_LOWER };
    let d = Double::new(v);
    debug_assert!(!d.is_special());
    debug_assert!(!d.is_negative());

    if d.is_zero() {
        buf.push(b'0');
        return 0;
    }

    const EXPONENT_BIAS: i32 = 0x3FF;
    let exp = d.exponent_bits();
    let mut sig = d.significand_bits();
    let mut e = exp as i32 - EXPONENT_BIAS;
    if normalize {
        if exp == 0 {
            debug_assert!(sig != 0);
            // Denormal exponent is 1 - bias.
            e += 1;
            // Shift the highest bit into the hidden-bit position and keep
            // the bit cleared so rounding overflow is detectable below.
            let s = sig.leading_zeros() as i32;
            sig <<= s - 12 + 1;
            e -= s - 12 + 1;
            sig &= Double::SIGNIFICAND_MASK;
        }
    } else if exp == 0 {
        e += 1;
    } else {
        sig |= Double::HIDDEN_BIT;
    }

    if (0..13).contains(&precision) {
        let digit = sig >> (52 - 4 * precision - 4);
        let r = 1u64 << (52 - 4 * precision);
        debug_assert!(!normalize || sig & Double::HIDDEN_BIT == 0);
        if digit & 0x8 != 0 {
            // Round half up on the first dropped digit.
            sig += r;
            if normalize {
                debug_assert!(sig >> 52 <= 1);
                if sig & Double::HIDDEN_BIT != 0 {
                    // 0ff... was rounded to 100...
                    e += 1;
                }
            }
        }
        // Zero out the dropped bits so the loop below stops in time.
        sig &= r.wrapping_neg();
    }

    let leading = if normalize { 1 } else { (sig >> 52) as usize };
    buf.push(xdigits[leading]);

    // Only the 52 fraction bits remain; left-align them for the loop.
    sig <<= 64 - 52;
    while sig != 0 {
        buf.push(xdigits[(sig >> 60) as usize]);
        sig <<= 4;
    }
    e
}

//
// Public entry points.
//

/// %f style: `precision` digits after the decimal point.
///
/// The value must be non-negative and finite, and `precision` at most
/// [`MAX_FIXED_PRECISION`].
pub fn to_fixed(
    buf: &mut [u8],
    value: f64,
    precision: usize,
    options: &Options,
) -> Result<usize, BufferTooSmall> {
    assert!(precision <= MAX_FIXED_PRECISION);
    let mut digits = DigitBuffer::new();
    let decpt = generate_fixed_digits(value, precision, &mut digits);
    let len = fixed_representation_length(digits.len(), decpt, precision as i32, options);
    if buf.len() < len {
        return Err(BufferTooSmall { required: len });
    }
    let written = write_fixed_representation(buf, &digits, decpt, precision as i32, options);
    debug_assert!(written == len);
    Ok(len)
}

/// %e style: one leading digit, `precision` digits after the point, then
/// the exponent.
pub fn to_exponential(
    buf: &mut [u8],
    value: f64,
    precision: usize,
    options: &Options,
) -> Result<usize, BufferTooSmall> {
    assert!(precision <= MAX_FIXED_PRECISION);
    let mut digits = DigitBuffer::new();
    let decpt = generate_precision_digits(value, precision + 1, &mut digits);
    debug_assert!(!digits.is_empty());
    let exponent = decpt - 1;
    let len = exponential_representation_length(digits.len(), exponent, precision as i32, options);
    if buf.len() < len {
        return Err(BufferTooSmall { required: len });
    }
    let written = write_exponential_representation(buf, &digits, exponent, precision as i32, options);
    debug_assert!(written == len);
    Ok(len)
}

/// %g style: fixed or scientific depending on the decimal exponent `X`.
/// With precision `P` (a zero precision counts as one): fixed with
/// precision `P - (X + 1)` when `-4 <= X < P`, otherwise scientific with
/// precision `P - 1`. Trailing zeros are trimmed unless the alternative
/// form is requested.
pub fn to_general(
    buf: &mut [u8],
    value: f64,
    precision: usize,
    options: &Options,
) -> Result<usize, BufferTooSmall> {
    let p = precision.max(1);
    assert!(p <= MAX_FIXED_PRECISION);
    let mut digits = DigitBuffer::new();
    let decpt = generate_precision_digits(value, p, &mut digits);
    let x = decpt - 1;

    while digits.last() == Some(&b'0') {
        digits.pop();
    }
    let num_digits = digits.len();

    if -4 <= x && x < p as i32 {
        let mut prec = p as i32 - (x + 1);
        if !options.use_alternative_form {
            prec = prec.min(num_digits as i32 - decpt);
        }
        let len = fixed_representation_length(num_digits, decpt, prec, options);
        if buf.len() < len {
            return Err(BufferTooSmall { required: len });
        }
        let written = write_fixed_representation(buf, &digits, decpt, prec, options);
        debug_assert!(written == len);
        Ok(len)
    } else {
        let mut prec = p as i32 - 1;
        if !options.use_alternative_form {
            prec = prec.min(num_digits as i32 - 1);
        }
        let len = exponential_representation_length(num_digits, x, prec, options);
        if buf.len() < len {
            return Err(BufferTooSmall { required: len });
        }
        let written = write_exponential_representation(buf, &digits, x, prec, options);
        debug_assert!(written == len);
        Ok(len)
    }
}

/// %a style hex float digits with a binary exponent. `None` precision
/// prints exactly as many digits as the significand holds. No `0x` prefix
/// is ever added here.
pub fn to_hex(
    buf: &mut [u8],
    value: f64,
    precision: Option<usize>,
    options: &Options,
) -> Result<usize, BufferTooSmall> {
    let precision = precision.map_or(-1, |p| p as i32);
    let mut digits = DigitBuffer::new();
    let binary_exponent = generate_hex_digits(
        value,
        precision,
        options.normalize,
        options.use_upper_case_digits,
        &mut digits,
    );
    debug_assert!(!digits.is_empty());
    let len = exponential_representation_length(digits.len(), binary_exponent, precision, options);
    if buf.len() < len {
        return Err(BufferTooSmall { required: len });
    }
    let written = write_exponential_representation(buf, &digits, binary_exponent, precision, options);
    debug_assert!(written == len);
    Ok(len)
}

/// Shortest round-trip digits laid out in the requested style. For
/// [`Style::General`] the shorter of the fixed and scientific forms wins,
/// fixed on ties.
pub fn to_shortest(
    buf: &mut [u8],
    value: f64,
    style: Style,
    options: &Options,
) -> Result<usize, BufferTooSmall> {
    if style == Style::Hex {
        return to_hex(buf, value, None, options);
    }

    let mut digits = DigitBuffer::new();
    let decpt = generate_shortest_digits(value, &mut digits);
    let num_digits = digits.len();

    let fixed_precision = if num_digits as i32 <= decpt {
        0
    } else {
        // Works out the same whether the point is inside or left of the
        // digits: every stored fraction digit is displayed.
        num_digits as i32 - decpt
    };
    let fixed_len = fixed_representation_length(num_digits, decpt, fixed_precision, options);
    let exponent = decpt - 1;
    let exponential_precision = num_digits as i32 - 1;
    let exponential_len =
        exponential_representation_length(num_digits, exponent, exponential_precision, options);

    let use_fixed = style == Style::Fixed || (style == Style::General && fixed_len <= exponential_len);

    if use_fixed {
        if buf.len() < fixed_len {
            return Err(BufferTooSmall { required: fixed_len });
        }
        let written = write_fixed_representation(buf, &digits, decpt, fixed_precision, options);
        debug_assert!(written == fixed_len);
        Ok(fixed_len)
    } else {
        if buf.len() < exponential_len {
            return Err(BufferTooSmall {
                required: exponential_len,
            });
        }
        let written =
            write_exponential_representation(buf, &digits, exponent, exponential_precision, options);
        debug_assert!(written == exponential_len);
        Ok(exponential_len)
    }
}

/// The ECMAScript `Number::toString` layout over the shortest digits:
/// plain decimal while `-6 < n <= 21`, exponential otherwise, with a
/// minimum-width exponent that always carries a sign.
pub fn to_ecmascript(buf: &mut [u8], value: f64) -> Result<usize, BufferTooSmall> {
    to_ecmascript_opts(buf, value, b'.', b'e')
}

pub(crate) fn to_ecmascript_opts(
    buf: &mut [u8],
    value: f64,
    decimal_point: u8,
    exponent_char: u8,
) -> Result<usize, BufferTooSmall> {
    let mut digits = DigitBuffer::new();
    let n = generate_shortest_digits(value, &mut digits);
    let k = digits.len();

    let ecma_options = Options {
        min_exponent_digits: 1,
        exponent_char,
        emit_positive_exponent_sign: true,
        decimal_point,
        ..Options::default()
    };

    if k as i32 <= n && n <= 21 {
        // digits[000]
        let len = n as usize;
        if buf.len() < len {
            return Err(BufferTooSmall { required: len });
        }
        buf[..k].copy_from_slice(&digits);
        for slot in buf[k..len].iter_mut() {
            *slot = b'0';
        }
        return Ok(len);
    }

    if 0 < n && n <= 21 {
        // dig.its
        let n = n as usize;
        let len = k + 1;
        if buf.len() < len {
            return Err(BufferTooSmall { required: len });
        }
        buf[..n].copy_from_slice(&digits[..n]);
        buf[n] = decimal_point;
        buf[n + 1..k + 1].copy_from_slice(&digits[n..]);
        return Ok(len);
    }

    if -6 < n && n <= 0 {
        // 0.[000]digits
        let zeros = (-n) as usize;
        let len = 2 + zeros + k;
        if buf.len() < len {
            return Err(BufferTooSmall { required: len });
        }
        buf[0] = b'0';
        buf[1] = decimal_point;
        for slot in buf[2..2 + zeros].iter_mut() {
            *slot = b'0';
        }
        buf[2 + zeros..len].copy_from_slice(&digits);
        return Ok(len);
    }

    // Exponential notation.
    let exponent = n - 1;
    let exp_len = exponent_length(exponent, &ecma_options);
    let len = if k == 1 { 1 + exp_len } else { k + 1 + exp_len };
    if buf.len() < len {
        return Err(BufferTooSmall { required: len });
    }
    if k == 1 {
        // dE+123
        buf[0] = digits[0];
        let written = write_exponent(buf, 1, exponent, &ecma_options);
        debug_assert!(written == len);
    } else {
        // d.igitsE+123
        buf[0] = digits[0];
        buf[1] = decimal_point;
        buf[2..k + 1].copy_from_slice(&digits[1..]);
        let written = write_exponent(buf, k + 1, exponent, &ecma_options);
        debug_assert!(written == len);
    }
    Ok(len)
}

#[cfg(test)]
mod test {
    use super::*;
    use alloc::string::String;

    fn fixed_str(value: f64, precision: usize) -> String {
        let mut buf = [0u8; 1600];
        let len = to_fixed(&mut buf, value, precision, &Options::default()).unwrap();
        core::str::from_utf8(&buf[..len]).unwrap().into()
    }

    fn exp_str(value: f64, precision: usize) -> String {
        let mut buf = [0u8; 1600];
        let len = to_exponential(&mut buf, value, precision, &Options::default()).unwrap();
        core::str::from_utf8(&buf[..len]).unwrap().into()
    }

    fn general_str(value: f64, precision: usize) -> String {
        let mut buf = [0u8; 1600];
        let len = to_general(&mut buf, value, precision, &Options::default()).unwrap();
        core::str::from_utf8(&buf[..len]).unwrap().into()
    }

    fn shortest_str(value: f64, style: Style) -> String {
        let mut buf = [0u8; 1600];
        let len = to_shortest(&mut buf, value, style, &Options::default()).unwrap();
        core::str::from_utf8(&buf[..len]).unwrap().into()
    }

    fn ecma_str(value: f64) -> String {
        let mut buf = [0u8; 64];
        let len = to_ecmascript(&mut buf, value).unwrap();
        core::str::from_utf8(&buf[..len]).unwrap().into()
    }

    fn hex_str(value: f64, precision: Option<usize>, options: &Options) -> String {
        let mut buf = [0u8; 64];
        let len = to_hex(&mut buf, value, precision, options).unwrap();
        core::str::from_utf8(&buf[..len]).unwrap().into()
    }

    #[test]
    fn fixed_shapes() {
        assert_eq!(fixed_str(0.0, 0), "0");
        assert_eq!(fixed_str(0.0, 1), "0.0");
        assert_eq!(fixed_str(3.12, 1), "3.1");
        assert_eq!(fixed_str(3.1415, 3), "3.142");
        assert_eq!(fixed_str(1234.0, 2), "1234.00");
        assert_eq!(fixed_str(0.01, 6), "0.010000");
        assert_eq!(fixed_str(0.4, 0), "0");
        assert_eq!(fixed_str(0.5, 0), "1");
    }

    #[test]
    fn fixed_grouping() {
        let options = Options {
            thousands_sep: Some(b','),
            ..Options::default()
        };
        let mut buf = [0u8; 64];
        let len = to_fixed(&mut buf, 1234567.0, 0, &options).unwrap();
        assert_eq!(&buf[..len], b"1,234,567");
        let len = to_fixed(&mut buf, 1234567.891, 2, &options).unwrap();
        assert_eq!(&buf[..len], b"1,234,567.89");
        let len = to_fixed(&mut buf, 123.0, 0, &options).unwrap();
        assert_eq!(&buf[..len], b"123");
    }

    #[test]
    fn exponential_shapes() {
        assert_eq!(exp_str(0.0, 6), "0.000000e+00");
        assert_eq!(exp_str(0.0, 0), "0e+00");
        assert_eq!(exp_str(1.0, 6), "1.000000e+00");
        assert_eq!(exp_str(123456.789, 6), "1.234568e+05");
        assert_eq!(exp_str(123456.789, 3), "1.235e+05");
        assert_eq!(exp_str(0.00001, 2), "1.00e-05");
    }

    #[test]
    fn general_notation_boundary() {
        assert_eq!(general_str(123456.789, 6), "123457");
        assert_eq!(general_str(123456.789, 3), "1.23e+05");
        assert_eq!(general_str(0.00001, 6), "1e-05");
        assert_eq!(general_str(0.0001, 6), "0.0001");
        assert_eq!(general_str(1.0, 6), "1");
        assert_eq!(general_str(0.0, 6), "0");
        assert_eq!(general_str(12345.6789, 6), "12345.7");
    }

    #[test]
    fn general_alternative_form_keeps_zeros() {
        let options = Options {
            use_alternative_form: true,
            ..Options::default()
        };
        let mut buf = [0u8; 64];
        let len = to_general(&mut buf, 1.0, 6, &options).unwrap();
        assert_eq!(&buf[..len], b"1.00000");
    }

    #[test]
    fn shortest_styles() {
        assert_eq!(shortest_str(123.456, Style::General), "123.456");
        assert_eq!(shortest_str(1e25, Style::General), "1e+25");
        assert_eq!(shortest_str(1e25, Style::Scientific), "1e+25");
        assert_eq!(shortest_str(0.1, Style::Fixed), "0.1");
        assert_eq!(shortest_str(100.0, Style::General), "100");
    }

    #[test]
    fn ecmascript_notation_selection() {
        assert_eq!(ecma_str(0.0), "0");
        assert_eq!(ecma_str(123.456), "123.456");
        assert_eq!(ecma_str(1e21), "1e+21");
        assert_eq!(ecma_str(1e20), "100000000000000000000");
        assert_eq!(ecma_str(1e-7), "1e-7");
        assert_eq!(ecma_str(0.000001), "0.000001");
        assert_eq!(ecma_str(12.5), "12.5");
        assert_eq!(ecma_str(5e-324), "5e-324");
    }

    #[test]
    fn hex_digits() {
        let options = Options {
            use_upper_case_digits: false,
            normalize: true,
            min_exponent_digits: 1,
            exponent_char: b'p',
            ..Options::default()
        };
        assert_eq!(hex_str(0.0, None, &options), "0p+0");
        assert_eq!(hex_str(1.5, None, &options), "1.8p+0");
        assert_eq!(hex_str(1.5, Some(4), &options), "1.8000p+0");
        assert_eq!(hex_str(1.5, Some(0), &options), "1p+1");
        assert_eq!(hex_str(1.0, Some(2), &options), "1.00p+0");
        assert_eq!(hex_str(5e-324, None, &options), "1p-1074");
    }

    #[test]
    fn buffer_hint_is_exact() {
        let needed = to_fixed(&mut [], 123.456, 2, &Options::default()).unwrap_err();
        assert_eq!(needed.required, 6);
        let mut buf = [0u8; 6];
        assert_eq!(to_fixed(&mut buf, 123.456, 2, &Options::default()), Ok(6));
        assert_eq!(&buf, b"123.46");

        let mut short = [0u8; 5];
        let err = to_fixed(&mut short, 123.456, 2, &Options::default()).unwrap_err();
        assert_eq!(err.required, 6);
    }

    #[test]
    fn assembly_is_idempotent() {
        let mut a = [0u8; 64];
        let mut b = [0u8; 64];
        let options = Options::default();
        let la = to_general(&mut a, 1234.5678, 9, &options).unwrap();
        let lb = to_general(&mut b, 1234.5678, 9, &options).unwrap();
        assert_eq!(&a[..la], &b[..lb]);
    }
}
