//! A string formatting library with an exact floating-point core.
//!
//! Two placeholder languages drive the same layout engine: brace
//! placeholders in the style of Python's `str.format`, and a
//! printf-compatible mode.
//!
//! ```
//! use textfmt::args;
//!
//! let s = textfmt::format("{} = {:.3f}", &args!["pi", 3.141592653589793]).unwrap();
//! assert_eq!(s, "pi = 3.142");
//!
//! let s = textfmt::printf("%08.3f", &args![3.141592653589793]).unwrap();
//! assert_eq!(s, "0003.142");
//! ```
//!
//! The heart of the crate is the [`dtoa`] module: conversion of IEEE-754
//! doubles to decimal text with exact, reproducible semantics. Shortest
//! round-trip, fixed, scientific, general and hex-float notations are
//! available directly on byte buffers without any allocation:
//!
//! ```
//! let mut buf = [0u8; 32];
//! let len = textfmt::dtoa::to_ecmascript(&mut buf, 123.456).unwrap();
//! assert_eq!(&buf[..len], b"123.456");
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod args;
mod error;
mod ieee;
mod writer;

pub mod dtoa;
pub mod fmt;

pub use args::{Arg, FormatValue};
pub use error::Error;
pub use fmt::{Align, FormatSpec, Sign};
#[cfg(feature = "std")]
pub use writer::IoWriter;
pub use writer::{ArrayWriter, Writer};

use alloc::string::String;
use alloc::vec::Vec;

/// Renders a brace-placeholder format string into a fresh `String`.
pub fn format(fmt: &str, args: &[Arg<'_>]) -> Result<String, Error> {
    let mut out = Vec::new();
    fmt::parse::format(&mut out, fmt, args)?;
    String::from_utf8(out).map_err(|_| Error::InvalidFormatString)
}

/// Renders a brace-placeholder format string into any [`Writer`].
pub fn format_to(w: &mut dyn Writer, fmt: &str, args: &[Arg<'_>]) -> Result<(), Error> {
    fmt::parse::format(w, fmt, args)
}

/// Renders a printf-style format string into a fresh `String`.
pub fn printf(fmt: &str, args: &[Arg<'_>]) -> Result<String, Error> {
    let mut out = Vec::new();
    fmt::printf::printf(&mut out, fmt, args)?;
    String::from_utf8(out).map_err(|_| Error::InvalidFormatString)
}

/// Renders a printf-style format string into any [`Writer`].
pub fn printf_to(w: &mut dyn Writer, fmt: &str, args: &[Arg<'_>]) -> Result<(), Error> {
    fmt::printf::printf(w, fmt, args)
}
