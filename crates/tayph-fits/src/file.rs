//! Reading and writing single-HDU FITS files on disk.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::block::{BLOCK_SIZE, CARD_SIZE};
use crate::error::{Error, Result};
use crate::header::{parse_header, serialize_header, Card, Header};
use crate::image::{decode_pixels, encode_pixels, ImageData, Pixel};
use crate::primary::{build_primary_header, PrimaryHeader};

/// The primary HDU of a FITS file.
#[derive(Debug, Clone, PartialEq)]
pub struct PrimaryHdu {
    /// Every card, structural keywords included.
    pub header: Header,
    pub layout: PrimaryHeader,
    pub data: ImageData,
}

fn is_structural(keyword: &str) -> bool {
    match keyword {
        "SIMPLE" | "BITPIX" | "NAXIS" | "EXTEND" | "END" => true,
        _ => keyword
            .strip_prefix("NAXIS")
            .is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit())),
    }
}

/// Write `pixels` as the primary HDU of a new file, replacing any existing
/// file at `path`.
///
/// `naxes` lists NAXIS1..NAXISn (fastest-varying first). Structural keywords
/// in `extra` are ignored; everything else is appended after them.
pub fn write_image<P, T>(path: P, naxes: &[usize], pixels: &[T], extra: &[Card]) -> Result<()>
where
    P: AsRef<Path>,
    T: Pixel,
{
    let expected = if naxes.is_empty() {
        0
    } else {
        naxes.iter().product()
    };
    if pixels.len() != expected {
        return Err(Error::DataLength {
            expected,
            found: pixels.len(),
        });
    }

    let mut header = build_primary_header(T::BITPIX, naxes)?;
    header.extend(
        extra
            .iter()
            .filter(|c| !is_structural(&c.keyword))
            .cloned(),
    );

    let mut out = BufWriter::new(File::create(path)?);
    out.write_all(&serialize_header(&header)?)?;
    out.write_all(&encode_pixels(pixels))?;
    out.flush()?;
    Ok(())
}

fn block_has_end(block: &[u8]) -> bool {
    block
        .chunks_exact(CARD_SIZE)
        .any(|card| &card[..8] == b"END     ")
}

fn read_header_bytes<R: Read>(reader: &mut R) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    let mut block = [0u8; BLOCK_SIZE];
    loop {
        reader.read_exact(&mut block).map_err(|e| match e.kind() {
            std::io::ErrorKind::UnexpectedEof => Error::UnexpectedEof,
            _ => Error::Io(e),
        })?;
        bytes.extend_from_slice(&block);
        if block_has_end(&block) {
            return Ok(bytes);
        }
    }
}

/// Read only the primary header of a FITS file.
pub fn read_header<P: AsRef<Path>>(path: P) -> Result<Header> {
    let mut reader = BufReader::new(File::open(path)?);
    let bytes = read_header_bytes(&mut reader)?;
    let (header, _) = parse_header(&bytes)?;
    Ok(header)
}

/// Read the primary header and pixel data of a FITS file.
///
/// Trailing block padding may be missing; the data itself may not.
pub fn read_image<P: AsRef<Path>>(path: P) -> Result<PrimaryHdu> {
    let mut reader = BufReader::new(File::open(path)?);
    let header_bytes = read_header_bytes(&mut reader)?;
    let (header, _) = parse_header(&header_bytes)?;
    let layout = PrimaryHeader::from_header(&header)?;

    let mut raw = vec![0u8; layout.data_byte_count()];
    reader.read_exact(&mut raw).map_err(|e| match e.kind() {
        std::io::ErrorKind::UnexpectedEof => Error::UnexpectedEof,
        _ => Error::Io(e),
    })?;
    let data = decode_pixels(&raw, layout.bitpix)?;

    Ok(PrimaryHdu {
        header,
        layout,
        data,
    })
}
