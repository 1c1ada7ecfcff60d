//! FITS output of frames and arbitrary arrays.

use std::path::Path;

use ndarray::{Array3, ArrayBase, Axis, Data, Dimension};
use tayph_fits::{write_array, Card, Pixel};

use crate::error::Result;
use crate::path::check_path;
use crate::validate::{check_ndim, check_shape};

/// Save a list of equally-shaped 2D frames as a 3D cube that can be played
/// through in DS9.
///
/// The cube is written with the frame index as the slowest axis, i.e. an
/// array of shape `(N, rows, cols)`. An existing file is overwritten. An
/// empty list only logs a warning and writes nothing.
pub fn save_stack<P, S, D>(path: P, frames: &[ArrayBase<S, D>]) -> Result<()>
where
    P: AsRef<Path>,
    S: Data<Elem = f64>,
    D: Dimension,
{
    let path = check_path(path, "filename in save_stack()", false)?;

    let Some(first) = frames.first() else {
        log::warn!("frames has length zero. No output was generated by save_stack().");
        return Ok(());
    };

    let base = first.shape();
    check_ndim(base, 2, "shape of frames in save_stack()")?;
    for (i, frame) in frames.iter().enumerate() {
        check_shape(
            frame.shape(),
            base,
            &format!("frame {i} of frames in save_stack()"),
        )?;
    }

    let n = frames.len();
    let mut cube = Array3::<f64>::zeros((base[0], base[1], n));
    for (i, frame) in frames.iter().enumerate() {
        cube.index_axis_mut(Axis(2), i).assign(frame);
    }
    // (rows, cols, N) -> (N, rows, cols)
    let cube = cube.permuted_axes([2, 0, 1]);

    write_array(&path, &cube, &[])?;
    log::debug!("wrote {n} frames of {base:?} to {}", path.display());
    Ok(())
}

/// Write `array` to `path` as-is, overwriting any existing file.
pub fn writefits<P, S, D, T>(path: P, array: &ArrayBase<S, D>) -> Result<()>
where
    P: AsRef<Path>,
    S: Data<Elem = T>,
    D: Dimension,
    T: Pixel,
{
    writefits_with_header(path, array, &[])
}

/// [`writefits`] with additional header cards after the structural ones.
pub fn writefits_with_header<P, S, D, T>(path: P, array: &ArrayBase<S, D>, cards: &[Card]) -> Result<()>
where
    P: AsRef<Path>,
    S: Data<Elem = T>,
    D: Dimension,
    T: Pixel,
{
    let path = check_path(path, "filename in writefits()", false)?;
    write_array(&path, array, cards)?;
    log::debug!("wrote {:?} array to {}", array.shape(), path.display());
    Ok(())
}
