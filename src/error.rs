use core::fmt;

/// Error type for the library.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// A value could not be converted to text.
    ConversionError,
    /// A placeholder referenced an argument that was not supplied.
    IndexOutOfRange,
    /// The referenced argument cannot be used for this conversion.
    InvalidArgument,
    /// Malformed placeholder syntax.
    InvalidFormatString,
    /// The output sink reported a write failure.
    IoError,
    /// The conversion exists but is not supported.
    NotSupported,
    /// An integer argument used as width or precision was out of range.
    ValueOutOfRange,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::ConversionError => write!(f, "value could not be converted to text"),
            Self::IndexOutOfRange => write!(f, "argument index out of range"),
            Self::InvalidArgument => write!(f, "invalid argument for this conversion"),
            Self::InvalidFormatString => write!(f, "invalid format string"),
            Self::IoError => write!(f, "output sink write failure"),
            Self::NotSupported => write!(f, "conversion not supported"),
            Self::ValueOutOfRange => write!(f, "integer argument out of range"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
