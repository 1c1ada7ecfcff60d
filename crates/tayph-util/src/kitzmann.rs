//! Reader for headerless binary model spectra (as produced by D. Kitzmann's
//! radiative transfer code): a bare sequence of native-endian floats.

use std::fs;
use std::path::Path;

use bytemuck::pod_read_unaligned;

use crate::error::Result;
use crate::path::check_path;

/// Width of each record in the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Precision {
    /// 4-byte `f32` records.
    Single,
    /// 8-byte `f64` records.
    #[default]
    Double,
}

impl Precision {
    pub fn record_len(self) -> usize {
        match self {
            Precision::Single => 4,
            Precision::Double => 8,
        }
    }
}

/// `true` selects double precision.
impl From<bool> for Precision {
    fn from(double: bool) -> Self {
        if double {
            Precision::Double
        } else {
            Precision::Single
        }
    }
}

/// Decode every complete record of `bytes`; a trailing partial record is
/// ignored.
pub fn decode_records(bytes: &[u8], precision: Precision) -> Vec<f64> {
    let chunks = bytes.chunks_exact(precision.record_len());
    match precision {
        Precision::Single => chunks
            .map(|c| f64::from(pod_read_unaligned::<f32>(c)))
            .collect(),
        Precision::Double => chunks.map(pod_read_unaligned::<f64>).collect(),
    }
}

/// Read a binary model spectrum at `path`.
///
/// The file must exist. Values are returned in file order, widened to `f64`.
pub fn read_binary_kitzmann<P, W>(path: P, precision: W) -> Result<Vec<f64>>
where
    P: AsRef<Path>,
    W: Into<Precision>,
{
    let precision = precision.into();
    let path = check_path(path, "inpath in read_binary_kitzmann()", true)?;
    let bytes = fs::read(&path)?;

    let leftover = bytes.len() % precision.record_len();
    if leftover != 0 {
        log::debug!(
            "{}: ignoring {leftover} trailing bytes of a partial record",
            path.display()
        );
    }
    Ok(decode_records(&bytes, precision))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn write_f64s(path: &Path, values: &[f64]) {
        let bytes: Vec<u8> = values.iter().flat_map(|v| v.to_ne_bytes()).collect();
        fs::write(path, bytes).unwrap();
    }

    #[test]
    fn doubles_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spec.dat");
        let values = [1.0e-3, 2.5, -7.125, 6.02e23];
        write_f64s(&path, &values);

        assert_eq!(read_binary_kitzmann(&path, true).unwrap(), values);
        assert_eq!(read_binary_kitzmann(&path, Precision::Double).unwrap(), values);
    }

    #[test]
    fn singles_are_widened() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spec32.dat");
        let values = [0.5f32, -1.25, 3.0e-8];
        let bytes: Vec<u8> = values.iter().flat_map(|v| v.to_ne_bytes()).collect();
        fs::write(&path, bytes).unwrap();

        let read = read_binary_kitzmann(&path, false).unwrap();
        let expected: Vec<f64> = values.iter().map(|&v| f64::from(v)).collect();
        assert_eq!(read, expected);
    }

    #[test]
    fn truncated_record_is_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("short.dat");
        write_f64s(&path, &[1.0, 2.0, 3.0]);
        let bytes = fs::read(&path).unwrap();
        fs::write(&path, &bytes[..20]).unwrap();

        assert_eq!(read_binary_kitzmann(&path, true).unwrap(), vec![1.0, 2.0]);
    }

    #[test]
    fn empty_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.dat");
        fs::write(&path, b"").unwrap();
        assert!(read_binary_kitzmann(&path, true).unwrap().is_empty());
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_binary_kitzmann(dir.path().join("nope.dat"), true).unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn directory_passes_check_but_fails_to_open() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_binary_kitzmann(dir.path(), true).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn precision_from_flag() {
        assert_eq!(Precision::from(true), Precision::Double);
        assert_eq!(Precision::from(false), Precision::Single);
        assert_eq!(Precision::default().record_len(), 8);
    }
}
