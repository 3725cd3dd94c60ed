//! The `{...}` placeholder scanner. Literal text is copied through, `{{`
//! and `}}` escape braces, placeholders resolve their argument by explicit
//! index or in order of appearance. Where the original syntax allows
//! recovery (an unusable width, a bad spec argument) the field falls back
//! to its default instead of failing the whole format call.

use crate::args::Arg;
use crate::error::Error;
use crate::fmt::{self, fix_negative_field_width, Align, FormatSpec, Sign};
use crate::writer::Writer;

pub(crate) fn parse_int(bytes: &[u8], i: &mut usize) -> Option<i32> {
    debug_assert!(bytes[*i].is_ascii_digit());
    let mut x: i64 = 0;
    while *i < bytes.len() && bytes[*i].is_ascii_digit() {
        x = x * 10 + i64::from(bytes[*i] - b'0');
        *i += 1;
        if x > i64::from(i32::MAX) {
            // Swallow the rest of the number so the caller can recover.
            while *i < bytes.len() && bytes[*i].is_ascii_digit() {
                *i += 1;
            }
            return None;
        }
    }
    Some(x as i32)
}

pub(crate) fn get_int_arg(index: usize, args: &[Arg<'_>]) -> Result<i32, Error> {
    match args.get(index) {
        None => Err(Error::IndexOutOfRange),
        Some(Arg::Int(v)) => i32::try_from(*v).map_err(|_| Error::ValueOutOfRange),
        Some(Arg::UInt(v)) => i32::try_from(*v).map_err(|_| Error::ValueOutOfRange),
        Some(_) => Err(Error::InvalidArgument),
    }
}

/// Parses a nested `{}` or `{n}` argument reference and resolves it to an
/// integer value.
fn parse_lbrace(
    bytes: &[u8],
    i: &mut usize,
    nextarg: &mut usize,
    args: &[Arg<'_>],
) -> Result<i32, Error> {
    debug_assert!(bytes[*i] == b'{');
    *i += 1;
    if *i == bytes.len() {
        return Err(Error::InvalidFormatString);
    }
    let index;
    if bytes[*i].is_ascii_digit() {
        index = parse_int(bytes, i).ok_or(Error::InvalidFormatString)? as usize;
        if *i == bytes.len() {
            return Err(Error::InvalidFormatString);
        }
        if bytes[*i] != b'}' {
            return Err(Error::InvalidFormatString);
        }
        *i += 1;
    } else {
        index = *nextarg;
        *nextarg += 1;
        // The closing brace of an automatic reference is optional.
        if bytes[*i] == b'}' {
            *i += 1;
        }
    }
    get_int_arg(index, args)
}

/// `{*}` or `{*n...}`: the placeholder takes its whole spec from a
/// [`FormatSpec`] argument.
fn parse_format_spec_arg<'a>(
    spec: &mut FormatSpec<'a>,
    bytes: &[u8],
    i: &mut usize,
    nextarg: &mut usize,
    args: &[Arg<'a>],
) -> Result<(), Error> {
    debug_assert!(bytes[*i] == b'*');
    *i += 1;
    if *i == bytes.len() {
        return Err(Error::InvalidFormatString);
    }
    let index;
    if bytes[*i].is_ascii_digit() {
        index = parse_int(bytes, i).ok_or(Error::InvalidFormatString)? as usize;
    } else {
        index = *nextarg;
        *nextarg += 1;
    }
    match args.get(index) {
        None => Err(Error::IndexOutOfRange),
        Some(Arg::Spec(s)) => {
            *spec = **s;
            fix_negative_field_width(spec);
            Ok(())
        }
        Some(_) => Err(Error::InvalidArgument),
    }
}

fn parse_align(spec: &mut FormatSpec<'_>, c: u8) -> bool {
    match c {
        b'<' => spec.align = Align::Left,
        b'>' => spec.align = Align::Right,
        b'^' => spec.align = Align::Center,
        b'=' => spec.align = Align::PadAfterSign,
        _ => return false,
    }
    true
}

fn parse_format_spec<'a>(
    spec: &mut FormatSpec<'a>,
    bytes: &[u8],
    i: &mut usize,
    nextarg: &mut usize,
    args: &[Arg<'a>],
) -> Result<(), Error> {
    debug_assert!(bytes[*i] == b':');
    *i += 1;
    if *i == bytes.len() {
        return Err(Error::InvalidFormatString);
    }

    // An align char preceded by any byte makes that byte the fill.
    if *i + 1 < bytes.len() && parse_align(spec, bytes[*i + 1]) {
        spec.fill = bytes[*i];
        *i += 2;
        if *i == bytes.len() {
            return Err(Error::InvalidFormatString);
        }
    } else if parse_align(spec, bytes[*i]) {
        *i += 1;
        if *i == bytes.len() {
            return Err(Error::InvalidFormatString);
        }
    }

    loop {
        match bytes[*i] {
            // Flags
            b'-' => {
                spec.sign = Sign::Minus;
                *i += 1;
            }
            b'+' => {
                spec.sign = Sign::Plus;
                *i += 1;
            }
            b' ' => {
                spec.sign = Sign::Space;
                *i += 1;
            }
            b'#' => {
                spec.hash = true;
                *i += 1;
            }
            b'0' => {
                spec.zero = true;
                *i += 1;
            }
            b'\'' | b'_' | b',' => {
                spec.tsep = Some(bytes[*i]);
                *i += 1;
            }
            // Width
            b'1'..=b'9' => match parse_int(bytes, i) {
                Some(n) => spec.width = n,
                None => spec.width = 0,
            },
            b'{' => match parse_lbrace(bytes, i, nextarg, args) {
                Ok(n) => {
                    spec.width = n;
                    fix_negative_field_width(spec);
                }
                Err(_) => spec.width = 0,
            },
            // Precision
            b'.' => {
                *i += 1;
                if *i == bytes.len() {
                    return Err(Error::InvalidFormatString);
                }
                match bytes[*i] {
                    b'0'..=b'9' => match parse_int(bytes, i) {
                        Some(n) => spec.prec = n,
                        None => spec.prec = -1,
                    },
                    b'{' => match parse_lbrace(bytes, i, nextarg, args) {
                        Ok(n) => spec.prec = n,
                        Err(_) => spec.prec = -1,
                    },
                    _ => spec.prec = 0,
                }
            }
            // Conversion
            b'!' | b'}' => return Ok(()),
            c => {
                spec.conv = c;
                *i += 1;
                return Ok(());
            }
        }
        if *i == bytes.len() {
            return Err(Error::InvalidFormatString);
        }
    }
}

fn parse_style<'a>(
    spec: &mut FormatSpec<'a>,
    bytes: &[u8],
    format_str: &'a str,
    i: &mut usize,
) -> Result<(), Error> {
    debug_assert!(bytes[*i] == b'!');
    *i += 1;
    if *i == bytes.len() {
        return Err(Error::InvalidFormatString);
    }
    let delim = match bytes[*i] {
        b'\'' => {
            *i += 1;
            b'\''
        }
        b'"' => {
            *i += 1;
            b'"'
        }
        b'{' => {
            *i += 1;
            b'}'
        }
        b'(' => {
            *i += 1;
            b')'
        }
        b'[' => {
            *i += 1;
            b']'
        }
        _ => 0,
    };
    let start = *i;
    if start == bytes.len() {
        return Err(Error::InvalidFormatString);
    }
    let close = if delim == 0 { b'}' } else { delim };
    while *i < bytes.len() && bytes[*i] != close {
        *i += 1;
    }
    spec.style = &format_str[start..*i];
    if delim != 0 {
        if *i == bytes.len() {
            return Err(Error::InvalidFormatString);
        }
        *i += 1;
    }
    Ok(())
}

fn parse_replacement_field<'a>(
    spec: &mut FormatSpec<'a>,
    bytes: &[u8],
    format_str: &'a str,
    i: &mut usize,
    nextarg: &mut usize,
    args: &[Arg<'a>],
) -> Result<(), Error> {
    debug_assert!(*i < bytes.len());

    if bytes[*i] == b'*' {
        if parse_format_spec_arg(spec, bytes, i, nextarg, args).is_err() {
            *spec = FormatSpec::default();
        }
        if *i == bytes.len() {
            return Err(Error::InvalidFormatString);
        }
    }

    if bytes[*i] == b':' {
        parse_format_spec(spec, bytes, i, nextarg, args)?;
        if *i == bytes.len() {
            return Err(Error::InvalidFormatString);
        }
    }

    if bytes[*i] == b'!' {
        if parse_style(spec, bytes, format_str, i).is_err() {
            spec.style = "";
        }
        if *i == bytes.len() {
            return Err(Error::InvalidFormatString);
        }
    }

    if bytes[*i] != b'}' {
        return Err(Error::InvalidFormatString);
    }
    *i += 1;
    Ok(())
}

/// Calls the matching per-type formatter for one resolved argument.
pub(crate) fn format_arg(
    w: &mut dyn Writer,
    spec: &FormatSpec<'_>,
    arg: &Arg<'_>,
) -> Result<(), Error> {
    match *arg {
        Arg::Int(v) => fmt::format_int(w, spec, v, v as u64),
        Arg::UInt(v) => fmt::format_int(w, spec, 0, v),
        Arg::Double(v) => fmt::format_double(w, spec, v),
        Arg::Bool(v) => fmt::format_bool(w, spec, v),
        Arg::Char(v) => fmt::format_char(w, spec, v),
        Arg::Str(s) => fmt::format_string(w, spec, s),
        Arg::Pointer(p) => fmt::format_pointer(w, spec, p),
        Arg::Spec(_) => Err(Error::InvalidArgument),
        Arg::Other(t) => t.format(w, spec),
    }
}

pub(crate) fn format<'a>(
    w: &mut dyn Writer,
    format: &'a str,
    args: &[Arg<'a>],
) -> Result<(), Error> {
    if format.is_empty() {
        return Ok(());
    }
    let bytes = format.as_bytes();
    let mut nextarg = 0usize;
    let mut i = 0;
    let mut s = 0;
    loop {
        while i < bytes.len() && bytes[i] != b'{' && bytes[i] != b'}' {
            i += 1;
        }
        if i != s {
            w.write(&bytes[s..i])?;
        }
        if i == bytes.len() {
            break;
        }

        let prev = bytes[i];
        i += 1;
        if i == bytes.len() {
            // Missing '}' or stray '}'.
            return Err(Error::InvalidFormatString);
        }

        if bytes[i] == prev {
            // '{{' or '}}'
            s = i;
            i += 1;
            continue;
        }

        if prev == b'}' {
            // A stray '}' passes through as literal text.
            s = i - 1;
            continue;
        }

        let mut arg_index: Option<usize> = None;
        if bytes[i].is_ascii_digit() {
            match parse_int(bytes, &mut i) {
                Some(n) => arg_index = Some(n as usize),
                // Out of range, reported below.
                None => arg_index = Some(usize::MAX),
            }
            if i == bytes.len() {
                return Err(Error::InvalidFormatString);
            }
        }

        let mut spec = FormatSpec::default();
        if bytes[i] != b'}' {
            parse_replacement_field(&mut spec, bytes, format, &mut i, &mut nextarg, args)?;
        } else {
            i += 1;
        }

        let index = match arg_index {
            Some(n) => n,
            None => {
                let n = nextarg;
                nextarg += 1;
                n
            }
        };
        s = i;

        let arg = args.get(index).ok_or(Error::IndexOutOfRange)?;
        if let Arg::Spec(_) = arg {
            return Err(Error::InvalidArgument);
        }
        format_arg(w, &spec, arg)?;
    }
    Ok(())
}
