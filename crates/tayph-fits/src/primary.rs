//! Primary HDU header construction and interpretation.

use alloc::format;
use alloc::vec::Vec;

use crate::block::padded_byte_len;
use crate::error::{Error, Result};
use crate::header::{Card, Header};
use crate::value::Value;

/// BITPIX codes allowed by the FITS standard.
pub const VALID_BITPIX: [i64; 6] = [8, 16, 32, 64, -32, -64];

fn naxis_keyword(n: usize) -> alloc::string::String {
    format!("NAXIS{n}")
}

fn require_integer(header: &Header, keyword: &str) -> Result<i64> {
    match header.get(keyword) {
        Some(Value::Integer(n)) => Ok(*n),
        Some(_) => Err(Error::InvalidHeader("mandatory keyword is not an integer")),
        None => Err(Error::MissingKeyword(keyword.into())),
    }
}

/// The structural keywords of a primary HDU.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimaryHeader {
    pub bitpix: i64,
    /// NAXIS1..NAXISn, fastest-varying axis first.
    pub naxes: Vec<usize>,
}

impl PrimaryHeader {
    /// Validate SIMPLE/BITPIX/NAXIS/NAXISn and extract the data layout.
    pub fn from_header(header: &Header) -> Result<Self> {
        match header.cards().first() {
            Some(card) if card.keyword == "SIMPLE" => {
                if card.value != Some(Value::Logical(true)) {
                    return Err(Error::InvalidHeader("SIMPLE must be T"));
                }
            }
            _ => return Err(Error::InvalidHeader("first card must be SIMPLE")),
        }

        let bitpix = require_integer(header, "BITPIX")?;
        if !VALID_BITPIX.contains(&bitpix) {
            return Err(Error::InvalidBitpix(bitpix));
        }

        let naxis = require_integer(header, "NAXIS")?;
        if !(0..=999).contains(&naxis) {
            return Err(Error::InvalidHeader("NAXIS out of range"));
        }

        let naxes = (1..=naxis as usize)
            .map(|i| {
                let n = require_integer(header, &naxis_keyword(i))?;
                usize::try_from(n).map_err(|_| Error::InvalidHeader("negative NAXISn"))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(PrimaryHeader { bitpix, naxes })
    }

    pub fn pixel_count(&self) -> usize {
        if self.naxes.is_empty() {
            0
        } else {
            self.naxes.iter().product()
        }
    }

    /// `|BITPIX|/8 * NAXIS1 * ... * NAXISn`, unpadded.
    pub fn data_byte_count(&self) -> usize {
        self.pixel_count() * (self.bitpix.unsigned_abs() as usize / 8)
    }

    pub fn data_padded_byte_count(&self) -> usize {
        padded_byte_len(self.data_byte_count())
    }
}

/// Build the mandatory cards of a primary HDU.
pub fn build_primary_header(bitpix: i64, naxes: &[usize]) -> Result<Header> {
    if !VALID_BITPIX.contains(&bitpix) {
        return Err(Error::InvalidBitpix(bitpix));
    }

    let mut header = Header::new();
    header.push(Card::new("SIMPLE", true).with_comment("conforms to FITS standard"));
    header.push(Card::new("BITPIX", bitpix).with_comment("array data type"));
    header.push(Card::new("NAXIS", naxes.len() as i64).with_comment("number of array dimensions"));
    for (i, &dim) in naxes.iter().enumerate() {
        header.push(Card::new(&naxis_keyword(i + 1), dim as i64));
    }
    header.push(Card::new("EXTEND", true));
    Ok(header)
}
