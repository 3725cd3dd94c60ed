//! The printf-compatible scanner. `%` directives map onto the same
//! [`FormatSpec`] the brace syntax produces, so both front ends share one
//! layout engine. Length modifiers are accepted and ignored; the argument
//! already carries its width.

use crate::args::Arg;
use crate::error::Error;
use crate::fmt::parse::{format_arg, get_int_arg, parse_int};
use crate::fmt::{fix_negative_field_width, Align, FormatSpec, Sign};
use crate::writer::Writer;

/// `*` (next argument) or `*n$` (1-based positional argument) width and
/// precision values.
fn parse_asterisk(
    bytes: &[u8],
    i: &mut usize,
    nextarg: &mut usize,
    args: &[Arg<'_>],
) -> Result<i32, Error> {
    debug_assert!(bytes[*i] == b'*');
    *i += 1;
    if *i == bytes.len() {
        return Err(Error::InvalidFormatString);
    }
    let index;
    if bytes[*i].is_ascii_digit() {
        let n = parse_int(bytes, i).ok_or(Error::InvalidFormatString)?;
        if *i == bytes.len() {
            return Err(Error::InvalidFormatString);
        }
        if n < 1 {
            return Err(Error::InvalidFormatString);
        }
        if bytes[*i] != b'$' {
            return Err(Error::InvalidFormatString);
        }
        *i += 1;
        index = (n - 1) as usize;
    } else {
        index = *nextarg;
        *nextarg += 1;
    }
    get_int_arg(index, args)
}

fn parse_printf_spec<'a>(
    arg_index: &mut Option<usize>,
    spec: &mut FormatSpec<'a>,
    bytes: &[u8],
    i: &mut usize,
    nextarg: &mut usize,
    args: &[Arg<'a>],
) -> Result<(), Error> {
    debug_assert!(*i > 0 && bytes[*i - 1] == b'%');
    loop {
        match bytes[*i] {
            // Flags
            b'-' => {
                spec.align = Align::Left;
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
            // Width, or a "n$" positional argument index.
            b'1'..=b'9' => {
                let n = parse_int(bytes, i).unwrap_or(0);
                if *i == bytes.len() {
                    return Err(Error::InvalidFormatString);
                }
                if bytes[*i] == b'$' {
                    *i += 1;
                    if n >= 1 {
                        *arg_index = Some((n - 1) as usize);
                    }
                } else {
                    spec.width = n;
                }
            }
            b'*' => match parse_asterisk(bytes, i, nextarg, args) {
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
                    b'0'..=b'9' => spec.prec = parse_int(bytes, i).unwrap_or(-1),
                    b'*' => {
                        spec.prec = parse_asterisk(bytes, i, nextarg, args).unwrap_or(-1);
                    }
                    _ => spec.prec = 0,
                }
            }
            // Length modifiers carry no information here.
            b'h' | b'l' | b'j' | b'z' | b't' | b'L' => {
                *i += 1;
            }
            // Conversions
            b'd' | b'i' | b'o' | b'u' | b'x' | b'X' | b'b' | b'B' | b'f' | b'F' | b'e'
            | b'E' | b'g' | b'G' | b'a' | b'A' | b'c' | b's' | b'S' | b'p' | b'q' | b'y' => {
                spec.conv = bytes[*i];
                *i += 1;
                return Ok(());
            }
            b'n' | b'm' => return Err(Error::NotSupported),
            _ => {
                // Unknown conversion, fall back to the default rendering.
                spec.conv = b's';
                *i += 1;
                return Ok(());
            }
        }
        if *i == bytes.len() {
            return Err(Error::InvalidFormatString);
        }
    }
}

pub(crate) fn printf<'a>(
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
        while i < bytes.len() && bytes[i] != b'%' {
            i += 1;
        }
        if i != s {
            w.write(&bytes[s..i])?;
        }
        if i == bytes.len() {
            break;
        }

        i += 1;
        if i == bytes.len() {
            return Err(Error::InvalidFormatString);
        }

        if bytes[i] == b'%' {
            s = i;
            i += 1;
            continue;
        }

        let mut arg_index: Option<usize> = None;
        let mut spec = FormatSpec::default();
        if bytes[i] != b's' {
            parse_printf_spec(&mut arg_index, &mut spec, bytes, &mut i, &mut nextarg, args)?;
        } else {
            // %s is the default conversion, exactly like {}.
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

#[cfg(test)]
mod test {
    use super::*;
    use alloc::string::String;
    use alloc::vec::Vec;
    use crate::args;

    fn run(fmt: &str, args: &[Arg<'_>]) -> Result<String, Error> {
        let mut out = Vec::new();
        printf(&mut out, fmt, args)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn basic_directives() {
        assert_eq!(run("hello %s", &args!["world"]).unwrap(), "hello world");
        assert_eq!(run("%d apples", &args![3]).unwrap(), "3 apples");
        assert_eq!(run("%x", &args![255u32]).unwrap(), "ff");
        assert_eq!(run("%X", &args![255u32]).unwrap(), "FF");
        assert_eq!(run("100%%", &[]).unwrap(), "100%");
    }

    #[test]
    fn flags_width_precision() {
        assert_eq!(run("%05d", &args![42]).unwrap(), "00042");
        assert_eq!(run("%-6d|", &args![42]).unwrap(), "42    |");
        assert_eq!(run("%+d", &args![42]).unwrap(), "+42");
        assert_eq!(run("% d", &args![42]).unwrap(), " 42");
        assert_eq!(run("%#x", &args![255u32]).unwrap(), "0xff");
        assert_eq!(run("%.3d", &args![5]).unwrap(), "005");
        assert_eq!(run("%8.3f", &args![3.14159]).unwrap(), "   3.142");
    }

    #[test]
    fn star_width_and_precision() {
        assert_eq!(run("%*d", &args![6, 42]).unwrap(), "    42");
        assert_eq!(run("%.*f", &args![2, 3.14159]).unwrap(), "3.14");
        // A negative star width left-aligns.
        assert_eq!(run("%*d|", &args![-6, 42]).unwrap(), "42    |");
    }

    #[test]
    fn positional_arguments() {
        assert_eq!(run("%2$s %1$s", &args!["world", "hello"]).unwrap(), "hello world");
        assert_eq!(run("%1$s %1$s", &args!["twice"]).unwrap(), "twice twice");
    }

    #[test]
    fn length_modifiers_are_ignored() {
        assert_eq!(run("%ld %lld %zu", &args![1, 2, 3u64]).unwrap(), "1 2 3");
    }

    #[test]
    fn float_conversions() {
        assert_eq!(run("%f", &args![3.141592653589793]).unwrap(), "3.141593");
        assert_eq!(run("%e", &args![123456.789]).unwrap(), "1.234568e+05");
        assert_eq!(run("%g", &args![123456.789]).unwrap(), "123457");
        assert_eq!(run("%.3g", &args![123456.789]).unwrap(), "1.23e+05");
        assert_eq!(run("%a", &args![1.5]).unwrap(), "0x1.8p+0");
    }

    #[test]
    fn unsupported_conversions() {
        assert_eq!(run("%n", &args![1]), Err(Error::NotSupported));
        assert_eq!(run("%m", &[]), Err(Error::NotSupported));
    }
}
