//! Wavelength solutions of echelle spectra from e2ds header keywords.
//!
//! HARPS and HARPS-N store a cubic polynomial per order in pixel index, with
//! the coefficients of all orders numbered consecutively:
//!
//! ```text
//! <ESO|TNG> DRS CAL TH COEFF LL0 .. LL3    order 0
//! <ESO|TNG> DRS CAL TH COEFF LL4 .. LL7    order 1
//! ```
//!
//! UVES headers carry a start wavelength per order (`WSTART<n>`, 1-based) and
//! a common step `CDELT1`. The accompanying `WEND<n>` keywords disagree with
//! `WSTART + n * CDELT1` and are not used.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use ndarray::{Array1, Array2};
use tayph_fits::read_header;

use crate::error::{Error, Result};
use crate::header::{header_f64, header_usize, HeaderLookup};
use crate::path::check_path;

/// Number of polynomial coefficients per order.
const COEFFS_PER_ORDER: i32 = 4;

/// Spectrograph whose e2ds header conventions apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instrument {
    Harps,
    HarpsN,
    Uves,
}

impl Instrument {
    /// Prefix of the polynomial coefficient keywords, if the instrument uses them.
    pub fn coefficient_prefix(self) -> Option<&'static str> {
        match self {
            Instrument::Harps => Some("ESO"),
            Instrument::HarpsN => Some("TNG"),
            Instrument::Uves => None,
        }
    }
}

impl FromStr for Instrument {
    type Err = Error;

    fn from_str(mode: &str) -> Result<Self> {
        match mode {
            "HARPS" => Ok(Instrument::Harps),
            "HARPSN" | "HARPS-N" => Ok(Instrument::HarpsN),
            "UVES" => Ok(Instrument::Uves),
            _ => Err(Error::Value(format!(
                "in read_wave_from_e2ds_header: mode needs to be set to HARPS, HARPSN, HARPS-N or UVES, got {mode:?}."
            ))),
        }
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Instrument::Harps => "HARPS",
            Instrument::HarpsN => "HARPSN",
            Instrument::Uves => "UVES",
        })
    }
}

fn coefficient_key(prefix: &str, counter: usize) -> String {
    format!("{prefix} DRS CAL TH COEFF LL{counter}")
}

/// Reconstruct the wavelength of every pixel of every order.
///
/// `mode` is one of `HARPS`, `HARPSN`, `HARPS-N` or `UVES`. The result has
/// shape `(NAXIS2, NAXIS1)`: one row per order.
pub fn read_wave_from_e2ds_header<H>(h: &H, mode: &str) -> Result<Array2<f64>>
where
    H: HeaderLookup + ?Sized,
{
    let instrument: Instrument = mode.parse()?;
    wave_from_e2ds_header(h, instrument)
}

/// [`read_wave_from_e2ds_header`] with an already-parsed instrument.
pub fn wave_from_e2ds_header<H>(h: &H, instrument: Instrument) -> Result<Array2<f64>>
where
    H: HeaderLookup + ?Sized,
{
    let npx = header_usize(h, "NAXIS1")?;
    let no = header_usize(h, "NAXIS2")?;
    let x = Array1::range(0.0, npx as f64, 1.0);

    // Pixels along the first axis while filling, one column per order.
    let mut wave = Array2::<f64>::zeros((npx, no));

    match instrument.coefficient_prefix() {
        None => {
            let delt = header_f64(h, "CDELT1")?;
            for i in 0..no {
                let start = header_f64(h, &format!("WSTART{}", i + 1))?;
                wave.column_mut(i).assign(&(&x * delt + start));
            }
        }
        Some(prefix) => {
            let mut key_counter = 0;
            for i in 0..no {
                let mut order = Array1::<f64>::zeros(npx);
                for j in 0..COEFFS_PER_ORDER {
                    let c = header_f64(h, &coefficient_key(prefix, key_counter))?;
                    order += &x.mapv(|v| c * v.powi(j));
                    key_counter += 1;
                }
                wave.column_mut(i).assign(&order);
            }
        }
    }

    log::debug!("{instrument} wavelength solution: {no} orders x {npx} pixels");
    Ok(wave.reversed_axes().as_standard_layout().into_owned())
}

/// Read the primary header of the e2ds file at `path` and reconstruct its
/// wavelength solution.
pub fn read_wave_from_e2ds<P: AsRef<Path>>(path: P, mode: &str) -> Result<Array2<f64>> {
    let instrument: Instrument = mode.parse()?;
    let path = check_path(path, "e2ds file in read_wave_from_e2ds()", true)?;
    let header = read_header(&path)?;
    wave_from_e2ds_header(&header, instrument)
}
