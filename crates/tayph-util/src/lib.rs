//! Small utilities shared by the tayph pipeline: argument checks, timers,
//! progress output, host probes, FITS output of frame stacks, binary model
//! spectra and e2ds wavelength solutions.

pub mod error;
pub mod header;
pub mod kitzmann;
pub mod path;
pub mod process;
pub mod stack;
pub mod status;
pub mod timing;
pub mod validate;
pub mod wavesol;

pub use error::{Error, Result};
pub use header::{header_f64, header_usize, HeaderLookup};
pub use kitzmann::{read_binary_kitzmann, Precision};
pub use path::check_path;
pub use process::{
    get_term_width, get_term_width_with, test_alias, test_alias_with, Platform, ProcessRunner,
    SystemRunner,
};
pub use stack::{save_stack, writefits, writefits_with_header};
pub use status::{percent, statusbar, statusbar_to, Total};
pub use timing::{end, end_to, start};
pub use validate::{check_ndim, check_shape, check_shape_any};
pub use wavesol::{read_wave_from_e2ds, read_wave_from_e2ds_header, Instrument};
