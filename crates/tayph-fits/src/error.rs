use alloc::string::String;

/// Errors raised while encoding or decoding FITS images.
#[derive(Debug)]
pub enum Error {
    /// Malformed header block or a mandatory keyword with a bad value.
    InvalidHeader(&'static str),
    /// The byte stream ended before the header or data was complete.
    UnexpectedEof,
    /// BITPIX is not one of 8, 16, 32, 64, -32, -64.
    InvalidBitpix(i64),
    /// A keyword contains characters outside `A-Z 0-9 - _`.
    InvalidKeyword,
    /// A header value could not be parsed.
    InvalidValue,
    /// A keyword required to interpret the HDU is absent.
    MissingKeyword(String),
    /// Pixel count does not agree with the product of the axis lengths.
    DataLength { expected: usize, found: usize },
    /// An I/O error from the standard library.
    #[cfg(feature = "std")]
    Io(std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::InvalidHeader(msg) => write!(f, "invalid FITS header: {msg}"),
            Error::UnexpectedEof => write!(f, "unexpected end of file"),
            Error::InvalidBitpix(v) => write!(f, "invalid BITPIX value: {v}"),
            Error::InvalidKeyword => write!(f, "invalid keyword name"),
            Error::InvalidValue => write!(f, "invalid header value"),
            Error::MissingKeyword(kw) => write!(f, "missing required keyword: {kw}"),
            Error::DataLength { expected, found } => {
                write!(f, "data length mismatch: expected {expected} pixels, found {found}")
            }
            #[cfg(feature = "std")]
            Error::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(feature = "std")]
impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}
