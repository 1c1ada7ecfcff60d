//! Header card values: parsing from and formatting into the fixed-format
//! value field of an 80-byte card.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::str;

/// Width of the value field (card columns 11-80).
pub const VALUE_FIELD_LEN: usize = 70;

/// A parsed FITS header value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// `T` or `F`.
    Logical(bool),
    Integer(i64),
    Float(f64),
    /// Character string with the FITS quoting removed and trailing blanks trimmed.
    String(String),
}

/// The variant name of a [`Value`], used in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Logical,
    Integer,
    Float,
    String,
}

impl core::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            ValueKind::Logical => "logical",
            ValueKind::Integer => "integer",
            ValueKind::Float => "float",
            ValueKind::String => "string",
        };
        f.write_str(name)
    }
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Logical(_) => ValueKind::Logical,
            Value::Integer(_) => ValueKind::Integer,
            Value::Float(_) => ValueKind::Float,
            Value::String(_) => ValueKind::String,
        }
    }

    /// Numeric value; integers are widened.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(n) => Some(*n as f64),
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Logical(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(String::from(v))
    }
}

// ── Parsing ──

/// Find a ` /` comment separator at or after `from`, returning the index of
/// the space and the trimmed comment text.
fn find_comment(field: &[u8], from: usize) -> Option<(usize, Option<&str>)> {
    let pos = field[from..].windows(2).position(|w| w == b" /")? + from;
    let mut start = pos + 2;
    if field.get(start) == Some(&b' ') {
        start += 1;
    }
    let comment = str::from_utf8(&field[start..])
        .ok()
        .map(str::trim_end)
        .filter(|s| !s.is_empty());
    Some((pos, comment))
}

/// Parse a quoted string starting at `field[0] == '\''`. Doubled quotes
/// encode a literal quote; an unterminated string is accepted as-is.
fn parse_string(field: &[u8]) -> (Value, Option<&str>) {
    let mut text = Vec::new();
    let mut i = 1;
    while i < field.len() {
        if field[i] == b'\'' {
            if field.get(i + 1) == Some(&b'\'') {
                text.push(b'\'');
                i += 2;
                continue;
            }
            i += 1;
            break;
        }
        text.push(field[i]);
        i += 1;
    }
    let s = String::from_utf8_lossy(&text);
    let comment = find_comment(field, i.min(field.len())).and_then(|(_, c)| c);
    (Value::String(String::from(s.trim_end())), comment)
}

fn parse_float(text: &str) -> Option<f64> {
    text.replace(['D', 'd'], "E").parse::<f64>().ok()
}

/// Parse the value portion of a card (everything after `= `).
///
/// Returns `None` for an empty (undefined) value. Leading blanks are
/// skipped, so this also accepts the free-format remainder of a
/// `HIERARCH` card.
pub fn parse_value(field: &[u8]) -> Option<(Value, Option<&str>)> {
    let start = field.iter().position(|&b| b != b' ')?;
    let field = &field[start..];

    if field[0] == b'\'' {
        return Some(parse_string(field));
    }
    if field[0] == b'/' {
        return None;
    }

    let (value_part, comment) = match find_comment(field, 0) {
        Some((pos, comment)) => (&field[..pos], comment),
        None => (field, None),
    };
    let text = str::from_utf8(value_part).ok()?.trim();

    let value = match text {
        "" => return None,
        "T" => Value::Logical(true),
        "F" => Value::Logical(false),
        _ if !text.contains(['.', 'E', 'e', 'D', 'd']) => match text.parse::<i64>() {
            Ok(n) => Value::Integer(n),
            Err(_) => Value::Float(parse_float(text)?),
        },
        _ => Value::Float(parse_float(text)?),
    };
    Some((value, comment))
}

// ── Formatting ──

/// Shortest representation that round-trips, falling back to fewer
/// digits when it would not fit in `max_len` columns.
pub(crate) fn format_float(v: f64, max_len: usize) -> String {
    let shortest = format!("{v:E}");
    if shortest.len() <= max_len {
        return shortest;
    }
    let mut precision = 16usize;
    loop {
        let s = format!("{v:.precision$E}");
        if s.len() <= max_len || precision == 0 {
            return s;
        }
        precision -= 1;
    }
}

fn quote_string(s: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(s.len() + 2);
    out.push(b'\'');
    for b in s.bytes() {
        out.push(b);
        if b == b'\'' {
            out.push(b'\'');
        }
    }
    // Strings are padded to at least 8 characters between the quotes.
    while out.len() < 9 {
        out.push(b' ');
    }
    out.push(b'\'');
    out
}

/// The bare text of a value as it appears in a free-format card, without
/// fixed-column padding.
pub fn value_text(value: &Value) -> Vec<u8> {
    match value {
        Value::Logical(b) => Vec::from(if *b { "T" } else { "F" }),
        Value::Integer(n) => format!("{n}").into_bytes(),
        Value::Float(v) => format_float(*v, 20).into_bytes(),
        Value::String(s) => quote_string(s),
    }
}

/// Serialize a [`Value`] into the 70-byte fixed-format value field.
///
/// Logical and numeric values end in column 30 of the card; strings start in
/// column 11. Overlong strings are truncated and keep their closing quote.
pub fn format_value(value: &Value) -> [u8; VALUE_FIELD_LEN] {
    let mut buf = [b' '; VALUE_FIELD_LEN];
    let text = value_text(value);
    match value {
        Value::String(_) => {
            let len = text.len().min(VALUE_FIELD_LEN);
            buf[..len].copy_from_slice(&text[..len]);
            if text.len() > VALUE_FIELD_LEN {
                buf[VALUE_FIELD_LEN - 1] = b'\'';
            }
        }
        _ => {
            let len = text.len().min(20);
            buf[20 - len..20].copy_from_slice(&text[..len]);
        }
    }
    buf
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(s: &str) -> [u8; VALUE_FIELD_LEN] {
        let mut buf = [b' '; VALUE_FIELD_LEN];
        buf[..s.len()].copy_from_slice(s.as_bytes());
        buf
    }

    #[test]
    fn parse_logical_with_comment() {
        let f = field("                   T / conforms to FITS standard");
        let (val, comment) = parse_value(&f).unwrap();
        assert_eq!(val, Value::Logical(true));
        assert_eq!(comment, Some("conforms to FITS standard"));
    }

    #[test]
    fn parse_integer() {
        let binding = field("                4096");
        let (val, comment) = parse_value(&binding).unwrap();
        assert_eq!(val, Value::Integer(4096));
        assert!(comment.is_none());
    }

    #[test]
    fn parse_float_with_d_exponent() {
        let (val, _) = parse_value(&field("         3.78112D+03 / LL0")).unwrap();
        assert_eq!(val, Value::Float(3781.12));
    }

    #[test]
    fn parse_float_without_comment_space() {
        let binding = field("               0.015 /Step");
        let (val, comment) = parse_value(&binding).unwrap();
        assert_eq!(val, Value::Float(0.015));
        assert_eq!(comment, Some("Step"));
    }

    #[test]
    fn parse_string_with_embedded_quote() {
        let binding = field("'O''Brien' / observer");
        let (val, comment) = parse_value(&binding).unwrap();
        assert_eq!(val, Value::String(String::from("O'Brien")));
        assert_eq!(comment, Some("observer"));
    }

    #[test]
    fn parse_string_trims_padding() {
        let (val, _) = parse_value(&field("'HARPS   '")).unwrap();
        assert_eq!(val.as_str(), Some("HARPS"));
    }

    #[test]
    fn parse_string_keeps_slash_inside_quotes() {
        let binding = field("'a / b'");
        let (val, comment) = parse_value(&binding).unwrap();
        assert_eq!(val.as_str(), Some("a / b"));
        assert!(comment.is_none());
    }

    #[test]
    fn parse_empty_is_undefined() {
        assert!(parse_value(&field("")).is_none());
        assert!(parse_value(&field("                     / only a comment")).is_none());
    }

    #[test]
    fn parse_free_format_remainder() {
        let (val, comment) = parse_value(b" 4.2E3 / coefficient").unwrap();
        assert_eq!(val, Value::Float(4200.0));
        assert_eq!(comment, Some("coefficient"));
    }

    #[test]
    fn format_integer_right_justified() {
        let buf = format_value(&Value::Integer(-64));
        assert_eq!(&buf[..20], b"                 -64");
    }

    #[test]
    fn format_logical_column_30() {
        let buf = format_value(&Value::Logical(true));
        assert_eq!(buf[19], b'T');
        assert!(buf[..19].iter().all(|&b| b == b' '));
    }

    #[test]
    fn format_string_padded_to_eight() {
        let buf = format_value(&Value::from("UVES"));
        assert_eq!(&buf[..10], b"'UVES    '");
    }

    #[test]
    fn format_float_reparses_exactly() {
        for v in [0.0, 1.5, -2.25e-7, 6562.801, 1.0 / 3.0, 1.0e300] {
            let buf = format_value(&Value::Float(v));
            let (parsed, _) = parse_value(&buf).unwrap();
            assert_eq!(parsed, Value::Float(v), "value {v}");
        }
    }

    #[test]
    fn accessors_widen_integers() {
        assert_eq!(Value::Integer(3).as_f64(), Some(3.0));
        assert_eq!(Value::Float(3.5).as_i64(), None);
        assert_eq!(Value::Logical(true).as_f64(), None);
        assert_eq!(Value::from("x").kind(), ValueKind::String);
    }
}
