use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the utility functions.
#[derive(Error, Debug)]
pub enum Error {
    /// A value had the wrong type, e.g. a string where a header number was expected.
    #[error("{varname} should be {expected}, got {found}")]
    Type {
        varname: String,
        expected: String,
        found: String,
    },
    /// An array does not have the required dimensions.
    #[error("{varname} has shape {found:?}, expected {expected}")]
    Shape {
        varname: String,
        expected: String,
        found: Vec<usize>,
    },
    #[error("{} does not exist.", .0.display())]
    NotFound(PathBuf),
    /// An argument is outside its set of accepted values.
    #[error("{0}")]
    Value(String),
    #[error("header keyword {0} is missing")]
    MissingKey(String),
    /// An external command could not be started or exited unsuccessfully.
    #[error("command `{program}` failed: {detail}")]
    Process { program: String, detail: String },
    #[error("could not parse terminal geometry from {0:?}")]
    TerminalGeometry(String),
    #[error("FITS error: {0}")]
    Fits(#[from] tayph_fits::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message() {
        let e = Error::NotFound(PathBuf::from("/data/missing.dat"));
        assert_eq!(e.to_string(), "/data/missing.dat does not exist.");
    }

    #[test]
    fn shape_message_names_variable() {
        let e = Error::Shape {
            varname: "frame 2 of frames in save_stack()".into(),
            expected: "[3, 4]".into(),
            found: vec![4, 3],
        };
        assert_eq!(
            e.to_string(),
            "frame 2 of frames in save_stack() has shape [4, 3], expected [3, 4]"
        );
    }

    #[test]
    fn fits_errors_convert() {
        let e: Error = tayph_fits::Error::InvalidBitpix(7).into();
        assert!(matches!(e, Error::Fits(_)));
        assert_eq!(e.to_string(), "FITS error: invalid BITPIX value: 7");
    }
}
