//! Pixel encoding for primary image HDUs.
//!
//! FITS stores pixels big-endian. Each supported element type knows its
//! BITPIX code and how to swap to and from the on-disk byte order; buffers
//! are reinterpreted with `bytemuck` rather than copied element by element.

use alloc::vec::Vec;

use bytemuck::{pod_collect_to_vec, Pod};

use crate::block::{padded_byte_len, DATA_PAD_BYTE};
use crate::error::{Error, Result};

mod sealed {
    pub trait Sealed {}
}

/// An element type that can be stored in a FITS image.
pub trait Pixel: Pod + sealed::Sealed {
    /// The BITPIX code for this type.
    const BITPIX: i64;

    /// Native value to its big-endian in-memory representation.
    fn to_be(self) -> Self;

    /// Big-endian in-memory representation back to a native value.
    fn from_be(self) -> Self;

    fn to_f64(self) -> f64;
}

macro_rules! int_pixel {
    ($t:ty, $bitpix:expr) => {
        impl sealed::Sealed for $t {}
        impl Pixel for $t {
            const BITPIX: i64 = $bitpix;
            #[inline]
            fn to_be(self) -> Self {
                <$t>::to_be(self)
            }
            #[inline]
            fn from_be(self) -> Self {
                <$t>::from_be(self)
            }
            #[inline]
            fn to_f64(self) -> f64 {
                self as f64
            }
        }
    };
}

macro_rules! float_pixel {
    ($t:ty, $bits:ty, $bitpix:expr) => {
        impl sealed::Sealed for $t {}
        impl Pixel for $t {
            const BITPIX: i64 = $bitpix;
            #[inline]
            fn to_be(self) -> Self {
                <$t>::from_bits(<$bits>::to_be(self.to_bits()))
            }
            #[inline]
            fn from_be(self) -> Self {
                <$t>::from_bits(<$bits>::from_be(self.to_bits()))
            }
            #[inline]
            fn to_f64(self) -> f64 {
                self as f64
            }
        }
    };
}

int_pixel!(u8, 8);
int_pixel!(i16, 16);
int_pixel!(i32, 32);
int_pixel!(i64, 64);
float_pixel!(f32, u32, -32);
float_pixel!(f64, u64, -64);

/// Pixel data decoded from an image HDU, typed by BITPIX.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageData {
    U8(Vec<u8>),
    I16(Vec<i16>),
    I32(Vec<i32>),
    I64(Vec<i64>),
    F32(Vec<f32>),
    F64(Vec<f64>),
}

fn widen<T: Pixel>(pixels: &[T]) -> Vec<f64> {
    pixels.iter().map(|&p| p.to_f64()).collect()
}

impl ImageData {
    pub fn bitpix(&self) -> i64 {
        match self {
            ImageData::U8(_) => u8::BITPIX,
            ImageData::I16(_) => i16::BITPIX,
            ImageData::I32(_) => i32::BITPIX,
            ImageData::I64(_) => i64::BITPIX,
            ImageData::F32(_) => f32::BITPIX,
            ImageData::F64(_) => f64::BITPIX,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ImageData::U8(v) => v.len(),
            ImageData::I16(v) => v.len(),
            ImageData::I32(v) => v.len(),
            ImageData::I64(v) => v.len(),
            ImageData::F32(v) => v.len(),
            ImageData::F64(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Widen every pixel to `f64`. BSCALE/BZERO are not applied.
    pub fn to_f64(&self) -> Vec<f64> {
        match self {
            ImageData::U8(v) => widen(v),
            ImageData::I16(v) => widen(v),
            ImageData::I32(v) => widen(v),
            ImageData::I64(v) => widen(v),
            ImageData::F32(v) => widen(v),
            ImageData::F64(v) => v.clone(),
        }
    }
}

/// Bytes per pixel for a BITPIX code.
pub fn bytes_per_pixel(bitpix: i64) -> Result<usize> {
    match bitpix {
        8 | 16 | 32 | 64 | -32 | -64 => Ok(bitpix.unsigned_abs() as usize / 8),
        _ => Err(Error::InvalidBitpix(bitpix)),
    }
}

/// Encode pixels as big-endian bytes padded to a whole number of blocks.
pub fn encode_pixels<T: Pixel>(pixels: &[T]) -> Vec<u8> {
    let swapped: Vec<T> = pixels.iter().map(|&p| p.to_be()).collect();
    let mut buf: Vec<u8> = pod_collect_to_vec(&swapped);
    buf.resize(padded_byte_len(buf.len()), DATA_PAD_BYTE);
    buf
}

fn decode<T: Pixel>(raw: &[u8]) -> Vec<T> {
    let mut pixels: Vec<T> = pod_collect_to_vec(raw);
    for p in &mut pixels {
        *p = p.from_be();
    }
    pixels
}

/// Decode exactly `raw.len() / bytes_per_pixel(bitpix)` big-endian pixels.
pub fn decode_pixels(raw: &[u8], bitpix: i64) -> Result<ImageData> {
    let bpp = bytes_per_pixel(bitpix)?;
    if raw.len() % bpp != 0 {
        return Err(Error::UnexpectedEof);
    }
    Ok(match bitpix {
        8 => ImageData::U8(raw.to_vec()),
        16 => ImageData::I16(decode(raw)),
        32 => ImageData::I32(decode(raw)),
        64 => ImageData::I64(decode(raw)),
        -32 => ImageData::F32(decode(raw)),
        _ => ImageData::F64(decode(raw)),
    })
}
