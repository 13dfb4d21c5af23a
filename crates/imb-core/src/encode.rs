//! Record-to-barcode pipeline.
//!
//! Composition order is fixed: routing value and shape marker first, then
//! the twenty tracking digits folded in left to right. The mailer/serial
//! folds are split in two steps so no intermediate multiplier exceeds what
//! a limb-by-limb `muladd` can absorb.

// Allow truncation casts - codeword values are bounded by their divisors
#![allow(clippy::cast_possible_truncation)]

use crate::bignum::BigNum;
use crate::error::EncodeError;
use crate::fcs::calculate_fcs;
use crate::layout::{symbol_halves, SYMBOLS};
use crate::record::Record;
use crate::tables::{tables, CODEWORDS, WORD_MASK};

/// Shape marker deltas: one per optional routing field.
const MARKER_ZIP: i64 = 1;
const MARKER_PLUS4: i64 = 100_000;
const MARKER_DELIVERY_PT: i64 = 1_000_000_000;

/// Numeric value of a validated digit string.
fn digits_value(s: &str) -> u32 {
    s.bytes().fold(0, |acc, b| acc * 10 + u32::from(b - b'0'))
}

/// Encode a record into its 65-symbol barcode string.
///
/// The record is normalized (whitespace stripped, uppercased, empty
/// optionals dropped) before validation.
///
/// # Errors
///
/// Returns the first violated field constraint as an [`EncodeError`].
pub(crate) fn encode_record(record: &Record) -> Result<String, EncodeError> {
    let record = record.normalized();
    record.validate()?;

    let n = compose(&record);
    let fcs = calculate_fcs(&n);
    let codewords = split_codewords(n, fcs);
    let words = binary_words(&codewords, fcs);
    Ok(render_symbols(&words))
}

/// Fold the routing code, shape marker, and tracking digits into one value.
fn compose(record: &Record) -> BigNum {
    let mut n = BigNum::new();
    let mut marker = 0i64;

    if let Some(zip) = &record.zip {
        n.add(i64::from(digits_value(zip)));
        marker += MARKER_ZIP;
    }
    if let Some(plus4) = &record.plus4 {
        n.muladd(10_000, digits_value(plus4));
        marker += MARKER_PLUS4;
    }
    if let Some(delivery_pt) = &record.delivery_pt {
        n.muladd(100, digits_value(delivery_pt));
        marker += MARKER_DELIVERY_PT;
    }
    n.add(marker);

    let id = record.barcode_id.as_bytes();
    n.muladd(10, u32::from(id[0] - b'0'));
    // The second tracking digit is capped at 4, so its base is 5.
    n.muladd(5, u32::from(id[1] - b'0'));
    n.muladd(1000, digits_value(&record.service_type));

    if record.mailer_id.len() == 6 {
        n.muladd(1_000_000, digits_value(&record.mailer_id));
        n.muladd(100_000, 0);
        n.muladd(10_000, digits_value(&record.serial_num));
    } else {
        n.muladd(10_000, 0);
        n.muladd(100_000, digits_value(&record.mailer_id));
        n.muladd(1_000_000, digits_value(&record.serial_num));
    }
    n
}

/// Split the payload into ten codeword values, folding in FCS bit 10.
fn split_codewords(mut n: BigNum, fcs: u16) -> [u16; CODEWORDS] {
    let mut cw = [0u16; CODEWORDS];
    // Codeword 9 is kept even; its low bit is the eleventh FCS bit's slot.
    cw[9] = (n.divmod(636) << 1) as u16;
    for i in (1..=8).rev() {
        cw[i] = n.divmod(1365) as u16;
    }
    // The 21-bit residue left in the two low limbs.
    cw[0] = ((u32::from(n.limbs[8]) << 11) | u32::from(n.limbs[9])) as u16;
    if fcs & 0x400 != 0 {
        cw[0] += 659;
    }
    cw
}

/// Look up each codeword's binary word, complementing where the matching
/// FCS bit is set.
fn binary_words(cw: &[u16; CODEWORDS], fcs: u16) -> [u16; CODEWORDS] {
    let t = tables();
    let mut words = [0u16; CODEWORDS];
    for (i, word) in words.iter_mut().enumerate() {
        *word = t.encode[usize::from(cw[i])];
        if fcs >> i & 1 != 0 {
            *word ^= WORD_MASK;
        }
    }
    words
}

/// Map a (descender, ascender) half pair to its symbol.
pub(crate) const fn symbol_char(desc: bool, asc: bool) -> char {
    match (desc, asc) {
        (false, false) => 'T',
        (false, true) => 'A',
        (true, false) => 'D',
        (true, true) => 'F',
    }
}

/// Emit the 65-symbol string from the ten binary words.
pub(crate) fn render_symbols(words: &[u16; CODEWORDS]) -> String {
    (0..SYMBOLS)
        .map(|pos| {
            let (desc, asc) = symbol_halves(words, pos);
            symbol_char(desc, asc)
        })
        .collect()
}
