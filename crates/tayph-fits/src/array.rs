//! `ndarray` bridge.
//!
//! Arrays are written in logical (row-major) order with the last axis as
//! NAXIS1, so an array of shape `(planes, rows, cols)` lands on disk as
//! `NAXIS1 = cols, NAXIS2 = rows, NAXIS3 = planes`, and reading reverses it.

use std::path::Path;

use ndarray::{ArrayBase, ArrayD, Data, Dimension};

use crate::error::{Error, Result};
use crate::file::{read_image, write_image};
use crate::header::Card;
use crate::image::Pixel;

/// Write `array` as the primary HDU of `path`, overwriting any existing file.
pub fn write_array<P, S, D, T>(path: P, array: &ArrayBase<S, D>, extra: &[Card]) -> Result<()>
where
    P: AsRef<Path>,
    S: Data<Elem = T>,
    D: Dimension,
    T: Pixel,
{
    let naxes: Vec<usize> = array.shape().iter().rev().copied().collect();
    let pixels: Vec<T> = array.iter().copied().collect();
    write_image(path, &naxes, &pixels, extra)
}

/// Read the primary image of `path` as `f64`, in `ndarray` axis order.
pub fn read_array<P: AsRef<Path>>(path: P) -> Result<ArrayD<f64>> {
    let hdu = read_image(path)?;
    if hdu.layout.naxes.is_empty() {
        return Ok(ArrayD::zeros(vec![0]));
    }
    let shape: Vec<usize> = hdu.layout.naxes.iter().rev().copied().collect();
    let pixels = hdu.data.to_f64();
    let found = pixels.len();
    ArrayD::from_shape_vec(shape, pixels).map_err(|_| Error::DataLength {
        expected: hdu.layout.pixel_count(),
        found,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array3};

    #[test]
    fn axis_order_follows_numpy_convention() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("order.fits");
        let a = array![[1.0f64, 2.0, 3.0], [4.0, 5.0, 6.0]];

        write_array(&path, &a, &[]).unwrap();
        let hdu = read_image(&path).unwrap();
        assert_eq!(hdu.layout.naxes, vec![3, 2]);

        let back = read_array(&path).unwrap();
        assert_eq!(back.shape(), &[2, 3]);
        assert_eq!(back, a.into_dyn());
    }

    #[test]
    fn transposed_view_is_written_logically() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.fits");
        let a = array![[1i32, 2], [3, 4], [5, 6]];

        write_array(&path, &a.t(), &[]).unwrap();
        let back = read_array(&path).unwrap();
        assert_eq!(back, array![[1.0, 3.0, 5.0], [2.0, 4.0, 6.0]].into_dyn());
    }

    #[test]
    fn cube_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cube.fits");
        let cube = Array3::from_shape_fn((2, 3, 4), |(k, i, j)| (100 * k + 10 * i + j) as f32);

        write_array(&path, &cube, &[]).unwrap();
        let back = read_array(&path).unwrap();
        assert_eq!(back.shape(), &[2, 3, 4]);
        assert_eq!(back[[1, 2, 3]], 123.0);
    }
}
