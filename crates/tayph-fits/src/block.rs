/// FITS logical record size in bytes.
pub const BLOCK_SIZE: usize = 2880;

/// Size of one header card in bytes.
pub const CARD_SIZE: usize = 80;

/// Header cards per logical record.
pub const CARDS_PER_BLOCK: usize = BLOCK_SIZE / CARD_SIZE;

/// Header blocks are padded with ASCII spaces.
pub const HEADER_PAD_BYTE: u8 = b' ';

/// Data blocks are padded with zeros.
pub const DATA_PAD_BYTE: u8 = 0;

/// Number of 2880-byte records needed for `num_bytes` (0 for 0).
pub const fn blocks_needed(num_bytes: usize) -> usize {
    num_bytes.div_ceil(BLOCK_SIZE)
}

/// `num_bytes` rounded up to a whole number of records.
pub const fn padded_byte_len(num_bytes: usize) -> usize {
    blocks_needed(num_bytes) * BLOCK_SIZE
}
