//! Keyword access over anything that behaves like a FITS header.

use std::collections::{BTreeMap, HashMap};

use tayph_fits::{Header, Value};

use crate::error::{Error, Result};

/// Read-only keyword lookup.
pub trait HeaderLookup {
    fn lookup(&self, key: &str) -> Option<&Value>;
}

impl HeaderLookup for Header {
    fn lookup(&self, key: &str) -> Option<&Value> {
        self.get(key)
    }
}

impl HeaderLookup for HashMap<String, Value> {
    fn lookup(&self, key: &str) -> Option<&Value> {
        self.get(key)
    }
}

impl HeaderLookup for BTreeMap<String, Value> {
    fn lookup(&self, key: &str) -> Option<&Value> {
        self.get(key)
    }
}

impl<H: HeaderLookup + ?Sized> HeaderLookup for &H {
    fn lookup(&self, key: &str) -> Option<&Value> {
        (**self).lookup(key)
    }
}

fn require<'h, H: HeaderLookup + ?Sized>(h: &'h H, key: &str) -> Result<&'h Value> {
    h.lookup(key).ok_or_else(|| Error::MissingKey(key.to_owned()))
}

/// A numeric keyword; integers are widened.
pub fn header_f64<H: HeaderLookup + ?Sized>(h: &H, key: &str) -> Result<f64> {
    let value = require(h, key)?;
    value.as_f64().ok_or_else(|| Error::Type {
        varname: key.to_owned(),
        expected: "a number".to_owned(),
        found: value.kind().to_string(),
    })
}

/// A non-negative integer keyword, such as an axis length.
pub fn header_usize<H: HeaderLookup + ?Sized>(h: &H, key: &str) -> Result<usize> {
    let value = require(h, key)?;
    value
        .as_i64()
        .and_then(|n| usize::try_from(n).ok())
        .ok_or_else(|| Error::Type {
            varname: key.to_owned(),
            expected: "a non-negative integer".to_owned(),
            found: format!("{value:?}"),
        })
}
