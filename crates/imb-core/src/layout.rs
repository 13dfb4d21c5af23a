//! Bar-to-codeword bit mapping.
//!
//! Each of the 65 symbol positions has two halves: the descender half and
//! the ascender half. Every half is wired to one specific bit of one
//! specific codeword, per the USPS bar-to-character mapping table. The four
//! arrays below are that table, reproduced verbatim; together the 130
//! halves touch every bit of every codeword exactly once.

use crate::tables::CODEWORDS;

/// Number of symbol positions in a barcode.
pub(crate) const SYMBOLS: usize = 65;

/// Codeword feeding the descender half of each position.
pub(crate) const DESC_CHAR: [u8; SYMBOLS] = [
    7, 1, 9, 5, 8, 0, 2, 4, 6, 3, 5, 8, 9, 7, 3, 0, 6, 1, 7, 4, 6, 8, 9, 2, 5, 1, 7, 5, 4, 3, 8,
    7, 6, 0, 2, 5, 4, 9, 3, 0, 1, 6, 8, 2, 0, 4, 5, 9, 6, 7, 5, 2, 6, 3, 8, 5, 1, 9, 8, 7, 4, 0,
    6, 2, 3,
];

/// Bit within that codeword for the descender half.
pub(crate) const DESC_BIT: [u8; SYMBOLS] = [
    2, 10, 12, 5, 9, 1, 5, 4, 3, 9, 11, 5, 10, 1, 6, 3, 4, 1, 10, 0, 2, 11, 8, 6, 1, 12, 3, 8, 6,
    4, 4, 11, 0, 6, 1, 9, 11, 5, 3, 7, 3, 10, 7, 11, 8, 2, 10, 3, 5, 8, 0, 3, 12, 11, 8, 4, 5, 1,
    3, 0, 7, 12, 8, 9, 10,
];

/// Codeword feeding the ascender half of each position.
pub(crate) const ASC_CHAR: [u8; SYMBOLS] = [
    4, 0, 2, 6, 3, 5, 1, 9, 8, 7, 1, 2, 0, 6, 4, 8, 2, 9, 5, 3, 0, 1, 3, 7, 4, 6, 8, 9, 2, 0, 5,
    1, 9, 4, 3, 8, 6, 7, 1, 2, 4, 3, 9, 5, 7, 8, 3, 0, 2, 1, 4, 0, 9, 1, 7, 0, 2, 4, 6, 3, 7, 1,
    9, 5, 8,
];

/// Bit within that codeword for the ascender half.
pub(crate) const ASC_BIT: [u8; SYMBOLS] = [
    3, 0, 8, 11, 1, 12, 8, 11, 10, 6, 4, 12, 2, 7, 9, 6, 7, 9, 2, 8, 4, 0, 12, 7, 10, 9, 0, 7,
    10, 5, 7, 9, 6, 8, 2, 12, 1, 4, 2, 0, 1, 5, 4, 6, 12, 1, 0, 9, 4, 7, 5, 10, 2, 6, 9, 11, 2,
    12, 6, 7, 5, 11, 0, 3, 2,
];

/// Extract the (descender, ascender) half bits for one symbol position from
/// a set of ten binary words.
pub(crate) fn symbol_halves(words: &[u16; CODEWORDS], pos: usize) -> (bool, bool) {
    let desc = words[usize::from(DESC_CHAR[pos])] >> DESC_BIT[pos] & 1 != 0;
    let asc = words[usize::from(ASC_CHAR[pos])] >> ASC_BIT[pos] & 1 != 0;
    (desc, asc)
}
