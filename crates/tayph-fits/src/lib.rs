#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod block;
pub mod error;
pub mod header;
pub mod image;
pub mod primary;
pub mod value;

#[cfg(feature = "std")]
pub mod file;

#[cfg(feature = "array")]
pub mod array;

pub use block::{BLOCK_SIZE, CARDS_PER_BLOCK, CARD_SIZE};
pub use error::{Error, Result};
pub use header::{Card, Header};
pub use image::{ImageData, Pixel};
pub use value::Value;

#[cfg(feature = "std")]
pub use file::{read_header, read_image, write_image, PrimaryHdu};

#[cfg(feature = "array")]
pub use array::{read_array, write_array};
