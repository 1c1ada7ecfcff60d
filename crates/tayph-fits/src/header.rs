//! FITS header cards: parsing, formatting and keyword lookup.
//!
//! Standard cards carry an 8-character keyword in columns 1-8 and a
//! fixed-format value from column 11. Keywords that are longer than eight
//! characters or contain blanks (`ESO DRS CAL TH COEFF LL0`) use the ESO
//! `HIERARCH` convention:
//!
//! ```text
//! HIERARCH ESO DRS CAL TH COEFF LL0 = 3781.12 / coefficient
//! ```
//!
//! The stored keyword never includes the `HIERARCH` prefix, so lookups use the
//! same name a pipeline would use in its own header dictionaries.

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use core::str;

use crate::block::{BLOCK_SIZE, CARDS_PER_BLOCK, CARD_SIZE, HEADER_PAD_BYTE};
use crate::error::{Error, Result};
use crate::value::{format_float, format_value, parse_value, value_text, Value, VALUE_FIELD_LEN};

const HIERARCH: &[u8; 8] = b"HIERARCH";
const END: &[u8; 8] = b"END     ";

/// One header card.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    /// Trimmed keyword, without any `HIERARCH` prefix.
    pub keyword: String,
    /// `None` for commentary cards and undefined values.
    pub value: Option<Value>,
    pub comment: Option<String>,
}

impl Card {
    pub fn new(keyword: &str, value: impl Into<Value>) -> Self {
        Card {
            keyword: String::from(keyword),
            value: Some(value.into()),
            comment: None,
        }
    }

    pub fn with_comment(mut self, comment: &str) -> Self {
        self.comment = Some(String::from(comment));
        self
    }

    /// `true` for COMMENT, HISTORY and blank-keyword cards.
    pub fn is_commentary(&self) -> bool {
        matches!(self.keyword.as_str(), "COMMENT" | "HISTORY" | "")
    }

    /// `true` if the keyword does not fit the 8-character fixed format.
    pub fn is_hierarch(&self) -> bool {
        self.keyword.len() > 8 || self.keyword.contains(' ')
    }
}

/// An ordered list of header cards, excluding the END card.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Header {
    cards: Vec<Card>,
}

impl Header {
    pub fn new() -> Self {
        Header::default()
    }

    pub fn from_cards(cards: Vec<Card>) -> Self {
        Header { cards }
    }

    /// The first card with this keyword.
    pub fn card(&self, keyword: &str) -> Option<&Card> {
        self.cards
            .iter()
            .find(|c| !c.is_commentary() && c.keyword == keyword)
    }

    /// The value of the first card with this keyword.
    pub fn get(&self, keyword: &str) -> Option<&Value> {
        self.card(keyword).and_then(|c| c.value.as_ref())
    }

    pub fn contains(&self, keyword: &str) -> bool {
        self.card(keyword).is_some()
    }

    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Replace the value of an existing keyword or append a new card.
    pub fn set(&mut self, keyword: &str, value: impl Into<Value>) {
        let value = value.into();
        match self
            .cards
            .iter_mut()
            .find(|c| !c.is_commentary() && c.keyword == keyword)
        {
            Some(card) => card.value = Some(value),
            None => self.cards.push(Card::new(keyword, value)),
        }
    }

    pub fn extend<I: IntoIterator<Item = Card>>(&mut self, cards: I) {
        self.cards.extend(cards);
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

// ── Parsing ──

fn validate_keyword(keyword: &[u8]) -> Result<()> {
    if keyword
        .iter()
        .all(|b| matches!(b, b'A'..=b'Z' | b'0'..=b'9' | b' ' | b'-' | b'_'))
    {
        Ok(())
    } else {
        Err(Error::InvalidKeyword)
    }
}

fn trimmed(bytes: &[u8]) -> Result<String> {
    let text = str::from_utf8(bytes).map_err(|_| Error::InvalidHeader("non-ASCII card"))?;
    Ok(String::from(text.trim()))
}

fn text_comment(bytes: &[u8]) -> Result<Option<String>> {
    let text = str::from_utf8(bytes).map_err(|_| Error::InvalidHeader("non-ASCII card"))?;
    let text = text.trim_end();
    Ok((!text.is_empty()).then(|| String::from(text)))
}

fn parse_hierarch(card: &[u8; CARD_SIZE]) -> Result<Card> {
    let rest = &card[8..];
    let Some(eq) = rest.iter().position(|&b| b == b'=') else {
        return Ok(Card {
            keyword: String::from("HIERARCH"),
            value: None,
            comment: text_comment(rest)?,
        });
    };
    validate_keyword(&rest[..eq])?;
    let keyword = trimmed(&rest[..eq])?;
    let (value, comment) = match parse_value(&rest[eq + 1..]) {
        Some((v, c)) => (Some(v), c.map(String::from)),
        None => (None, None),
    };
    Ok(Card {
        keyword,
        value,
        comment,
    })
}

/// Parse a single 80-byte card.
pub fn parse_card(card: &[u8; CARD_SIZE]) -> Result<Card> {
    let keyword_bytes = &card[..8];
    if keyword_bytes == HIERARCH {
        return parse_hierarch(card);
    }
    validate_keyword(keyword_bytes)?;
    let keyword = trimmed(keyword_bytes)?;

    let is_commentary = matches!(keyword.as_str(), "COMMENT" | "HISTORY" | "");
    if !is_commentary && &card[8..10] == b"= " {
        let (value, comment) = match parse_value(&card[10..]) {
            Some((v, c)) => (Some(v), c.map(String::from)),
            None => (None, None),
        };
        return Ok(Card {
            keyword,
            value,
            comment,
        });
    }

    Ok(Card {
        keyword,
        value: None,
        comment: text_comment(&card[8..])?,
    })
}

/// Parse header blocks from the start of `data` up to and including the END
/// card.
///
/// Returns the header and the number of bytes it occupies, which is always a
/// whole number of blocks.
pub fn parse_header(data: &[u8]) -> Result<(Header, usize)> {
    let mut header = Header::new();
    for (index, chunk) in data.chunks_exact(CARD_SIZE).enumerate() {
        let card_bytes: &[u8; CARD_SIZE] = chunk
            .try_into()
            .map_err(|_| Error::InvalidHeader("short card"))?;
        if &card_bytes[..8] == END {
            let cards_used = index + 1;
            let blocks = cards_used.div_ceil(CARDS_PER_BLOCK);
            let consumed = blocks * BLOCK_SIZE;
            if consumed > data.len() {
                return Err(Error::UnexpectedEof);
            }
            return Ok((header, consumed));
        }
        header.push(parse_card(card_bytes)?);
    }
    Err(Error::UnexpectedEof)
}

// ── Writing ──

fn format_hierarch(card: &Card) -> Result<[u8; CARD_SIZE]> {
    let mut text = Vec::with_capacity(CARD_SIZE);
    text.extend_from_slice(b"HIERARCH ");
    text.extend_from_slice(card.keyword.as_bytes());
    text.extend_from_slice(b" = ");
    match &card.value {
        // Free-format values may use the rest of the card.
        Some(Value::Float(v)) => {
            let room = CARD_SIZE.saturating_sub(text.len());
            text.extend_from_slice(format_float(*v, room).as_bytes());
        }
        Some(value) => text.extend_from_slice(&value_text(value)),
        None => {}
    }
    if text.len() > CARD_SIZE {
        return Err(Error::InvalidValue);
    }
    if let Some(comment) = &card.comment {
        text.extend_from_slice(b" / ");
        text.extend_from_slice(comment.as_bytes());
    }
    let mut buf = [b' '; CARD_SIZE];
    let len = text.len().min(CARD_SIZE);
    buf[..len].copy_from_slice(&text[..len]);
    Ok(buf)
}

/// Index in the value field just past the value text.
fn value_end(field: &[u8; VALUE_FIELD_LEN], value: &Value) -> usize {
    match value {
        Value::String(_) => {
            let mut i = 1;
            while i < VALUE_FIELD_LEN {
                if field[i] == b'\'' {
                    if field.get(i + 1) == Some(&b'\'') {
                        i += 2;
                        continue;
                    }
                    return i + 1;
                }
                i += 1;
            }
            VALUE_FIELD_LEN
        }
        _ => 20,
    }
}

/// Serialize a card into its 80-byte image.
///
/// Comments that do not fit are truncated. A `HIERARCH` card whose value
/// does not fit is rejected.
pub fn format_card(card: &Card) -> Result<[u8; CARD_SIZE]> {
    validate_keyword(card.keyword.as_bytes())?;
    if card.is_hierarch() {
        return format_hierarch(card);
    }

    let mut buf = [b' '; CARD_SIZE];
    buf[..card.keyword.len()].copy_from_slice(card.keyword.as_bytes());

    match &card.value {
        Some(value) if !card.is_commentary() => {
            buf[8] = b'=';
            let field = format_value(value);
            buf[10..].copy_from_slice(&field);
            if let Some(comment) = &card.comment {
                let sep = 10 + value_end(&field, value) + 1;
                if sep + 3 < CARD_SIZE {
                    buf[sep] = b'/';
                    let start = sep + 2;
                    let len = comment.len().min(CARD_SIZE - start);
                    buf[start..start + len].copy_from_slice(&comment.as_bytes()[..len]);
                }
            }
        }
        _ => {
            if let Some(comment) = &card.comment {
                let len = comment.len().min(CARD_SIZE - 8);
                buf[8..8 + len].copy_from_slice(&comment.as_bytes()[..len]);
            }
        }
    }
    Ok(buf)
}

/// Serialize a header into whole blocks, appending END and padding with blanks.
pub fn serialize_header(header: &Header) -> Result<Vec<u8>> {
    let total_cards = header.len() + 1;
    let mut buf = vec![HEADER_PAD_BYTE; total_cards.div_ceil(CARDS_PER_BLOCK) * BLOCK_SIZE];

    for (i, card) in header.iter().enumerate() {
        let offset = i * CARD_SIZE;
        buf[offset..offset + CARD_SIZE].copy_from_slice(&format_card(card)?);
    }
    let end_offset = header.len() * CARD_SIZE;
    buf[end_offset..end_offset + 8].copy_from_slice(END);

    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(text: &str) -> [u8; CARD_SIZE] {
        let mut buf = [b' '; CARD_SIZE];
        buf[..text.len()].copy_from_slice(text.as_bytes());
        buf
    }

    #[test]
    fn parse_standard_card() {
        let card = parse_card(&raw("NAXIS1  =                 4096 / pixels per order")).unwrap();
        assert_eq!(card.keyword, "NAXIS1");
        assert_eq!(card.value, Some(Value::Integer(4096)));
        assert_eq!(card.comment.as_deref(), Some("pixels per order"));
    }

    #[test]
    fn parse_hierarch_card() {
        let card = parse_card(&raw(
            "HIERARCH ESO DRS CAL TH COEFF LL0 = 3781.12 / coefficient",
        ))
        .unwrap();
        assert_eq!(card.keyword, "ESO DRS CAL TH COEFF LL0");
        assert_eq!(card.value, Some(Value::Float(3781.12)));
        assert_eq!(card.comment.as_deref(), Some("coefficient"));
    }

    #[test]
    fn parse_commentary_card() {
        let card = parse_card(&raw("HISTORY = not a value")).unwrap();
        assert!(card.is_commentary());
        assert!(card.value.is_none());
        assert_eq!(card.comment.as_deref(), Some("= not a value"));
    }

    #[test]
    fn parse_rejects_lowercase_keyword() {
        assert!(matches!(
            parse_card(&raw("naxis   =                    2")),
            Err(Error::InvalidKeyword)
        ));
    }

    #[test]
    fn format_standard_roundtrip() {
        let card = Card::new("CDELT1", 0.015).with_comment("step");
        let bytes = format_card(&card).unwrap();
        assert_eq!(&bytes[..10], b"CDELT1  = ");
        assert_eq!(parse_card(&bytes).unwrap(), card);
    }

    #[test]
    fn format_string_roundtrip() {
        let card = Card::new("INSTRUME", "HARPS").with_comment("instrument");
        let parsed = parse_card(&format_card(&card).unwrap()).unwrap();
        assert_eq!(parsed, card);
    }

    #[test]
    fn format_hierarch_roundtrip() {
        let card = Card::new("TNG DRS CAL TH COEFF LL7", -1.25e-9);
        let bytes = format_card(&card).unwrap();
        assert!(bytes.starts_with(b"HIERARCH TNG DRS CAL TH COEFF LL7 = "));
        assert_eq!(parse_card(&bytes).unwrap(), card);
    }

    #[test]
    fn hierarch_float_keeps_every_digit() {
        for v in [-1.60491376578986e-11, 3.781123456789012e3, 2.220446049250313e-16] {
            let card = Card::new("ESO DRS CAL TH COEFF LL3", v);
            let parsed = parse_card(&format_card(&card).unwrap()).unwrap();
            assert_eq!(parsed.value, Some(Value::Float(v)), "value {v:E}");
        }
    }

    #[test]
    fn format_rejects_invalid_keyword() {
        assert!(format_card(&Card::new("bad", 1i64)).is_err());
    }

    #[test]
    fn header_set_replaces_existing() {
        let mut header = Header::new();
        header.set("NAXIS1", 10i64);
        header.set("NAXIS1", 20i64);
        assert_eq!(header.len(), 1);
        assert_eq!(header.get("NAXIS1"), Some(&Value::Integer(20)));
    }

    #[test]
    fn header_lookup_skips_commentary() {
        let header = Header::from_cards(vec![Card {
            keyword: String::from("COMMENT"),
            value: None,
            comment: Some(String::from("WSTART1 is not here")),
        }]);
        assert!(header.get("COMMENT").is_none());
        assert!(!header.contains("WSTART1"));
    }

    #[test]
    fn serialize_parse_roundtrip() {
        let mut header = Header::new();
        header.push(Card::new("SIMPLE", true));
        header.push(Card::new("NAXIS", 0i64));
        header.push(Card::new("ESO DRS CAL TH COEFF LL3", 2.5));
        let bytes = serialize_header(&header).unwrap();
        assert_eq!(bytes.len(), BLOCK_SIZE);
        let (parsed, consumed) = parse_header(&bytes).unwrap();
        assert_eq!(consumed, BLOCK_SIZE);
        assert_eq!(parsed, header);
    }

    #[test]
    fn serialize_spills_into_second_block() {
        let mut header = Header::new();
        for i in 0..CARDS_PER_BLOCK {
            header.push(Card::new(&alloc::format!("KEY{i}"), i as i64));
        }
        let bytes = serialize_header(&header).unwrap();
        assert_eq!(bytes.len(), 2 * BLOCK_SIZE);
        let (parsed, consumed) = parse_header(&bytes).unwrap();
        assert_eq!(consumed, 2 * BLOCK_SIZE);
        assert_eq!(parsed.len(), CARDS_PER_BLOCK);
    }

    #[test]
    fn parse_without_end_is_eof() {
        let bytes = vec![b' '; BLOCK_SIZE];
        assert!(matches!(parse_header(&bytes), Err(Error::UnexpectedEof)));
    }
}
