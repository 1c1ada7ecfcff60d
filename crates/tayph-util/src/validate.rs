//! Dimension checks shared by the writers.
//!
//! Each check names the offending variable so the message points at the
//! caller's argument, not at this module.

use crate::error::{Error, Result};

/// Require `shape` to have exactly `ndim` axes.
pub fn check_ndim(shape: &[usize], ndim: usize, varname: &str) -> Result<()> {
    if shape.len() == ndim {
        return Ok(());
    }
    Err(Error::Shape {
        varname: varname.to_owned(),
        expected: format!("{ndim} dimensions"),
        found: shape.to_vec(),
    })
}

/// Require `shape` to equal `expected` axis by axis.
pub fn check_shape(shape: &[usize], expected: &[usize], varname: &str) -> Result<()> {
    check_shape_any(shape, &[expected], varname)
}

/// Require `shape` to equal one of `allowed`.
pub fn check_shape_any(shape: &[usize], allowed: &[&[usize]], varname: &str) -> Result<()> {
    if allowed.iter().any(|a| *a == shape) {
        return Ok(());
    }
    let expected = allowed
        .iter()
        .map(|a| format!("{a:?}"))
        .collect::<Vec<_>>()
        .join(" or ");
    Err(Error::Shape {
        varname: varname.to_owned(),
        expected,
        found: shape.to_vec(),
    })
}
