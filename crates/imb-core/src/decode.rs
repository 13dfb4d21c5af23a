//! Barcode-to-record pipeline.
//!
//! The strict path parses the 65 symbols into ten 13-bit words through the
//! bar map, recovers codewords and FCS bits from the shared tables, rebuilds
//! the payload value by modular reduction, and peels the decimal fields back
//! out. Anything that fails the strict path is handed to [`crate::repair`].

// Allow truncation casts - peeled digits are remainders below their base
#![allow(clippy::cast_possible_truncation)]

use serde::{Deserialize, Serialize};

use crate::bignum::BigNum;
use crate::error::DecodeError;
use crate::fcs::calculate_fcs;
use crate::layout::{ASC_BIT, ASC_CHAR, DESC_BIT, DESC_CHAR, SYMBOLS};
use crate::record::{normalize_field, Record};
use crate::repair;
use crate::tables::{tables, CODEWORDS, INVALID};

/// Decimal digit groups of the routing code, peeled least significant
/// first: five for the ZIP span, four for the +4 span, two for the
/// delivery point. Each group is preceded by one marker decrement.
const ROUTE_GROUPS: [usize; 3] = [5, 4, 2];

/// Outcome of a successful decode.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeResult {
    /// The recovered record.
    pub data: Record,
    /// Whether the input was accepted as-is or required repair.
    pub repair: RepairStatus,
}

impl DecodeResult {
    /// True when the input needed any repair to decode.
    #[must_use]
    pub fn is_repaired(&self) -> bool {
        self.repair != RepairStatus::Clean
    }
}

/// Repair report attached to a decode.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RepairStatus {
    /// The input decoded without modification.
    Clean,
    /// The input decoded only after repair.
    Damaged {
        /// The corrected 65-symbol string.
        suggested: String,
        /// Positions where the (length-repaired) input differs from the
        /// suggestion.
        positions: Vec<usize>,
    },
}

impl std::fmt::Display for RepairStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Clean => f.write_str("clean"),
            Self::Damaged { .. } => f.write_str("Damaged barcode"),
        }
    }
}

/// Decode a barcode string into a record.
///
/// The input is whitespace-stripped and uppercased first. A 65-symbol input
/// is tried strictly, then through single-bit repair; 64- and 66-symbol
/// inputs go through length repair.
///
/// # Errors
///
/// [`DecodeError`] when no strict or repaired decoding exists.
pub(crate) fn decode_barcode(input: &str) -> Result<DecodeResult, DecodeError> {
    let symbols = parse_symbols(&normalize_field(input))?;
    match symbols.len() {
        SYMBOLS => {
            let words = words_from_symbols(&symbols);
            if let Some(data) = try_decode_words(&words) {
                return Ok(DecodeResult {
                    data,
                    repair: RepairStatus::Clean,
                });
            }
            match repair::bit_flip_repair(&symbols) {
                Err(DecodeError::Invalid) => Err(repair::orientation_verdict(&symbols)),
                outcome => outcome,
            }
        }
        64 | 66 => repair::length_repair(&symbols),
        got => Err(DecodeError::Length { got }),
    }
}

/// Validate the alphabet and return the input as symbol bytes.
fn parse_symbols(input: &str) -> Result<Vec<u8>, DecodeError> {
    for (position, c) in input.chars().enumerate() {
        if !matches!(c, 'A' | 'D' | 'F' | 'T') {
            return Err(DecodeError::InvalidSymbol {
                symbol: c,
                position,
            });
        }
    }
    Ok(input.as_bytes().to_vec())
}

/// Gather the ten 13-bit words from a 65-symbol slice via the bar map.
pub(crate) fn words_from_symbols(symbols: &[u8]) -> [u16; CODEWORDS] {
    debug_assert_eq!(symbols.len(), SYMBOLS);
    let mut words = [0u16; CODEWORDS];
    for (pos, &symbol) in symbols.iter().enumerate() {
        if matches!(symbol, b'D' | b'F') {
            words[usize::from(DESC_CHAR[pos])] |= 1 << DESC_BIT[pos];
        }
        if matches!(symbol, b'A' | b'F') {
            words[usize::from(ASC_CHAR[pos])] |= 1 << ASC_BIT[pos];
        }
    }
    words
}

/// Attempt the full word-to-record pipeline; `None` on any inconsistency.
pub(crate) fn try_decode_words(words: &[u16; CODEWORDS]) -> Option<Record> {
    let t = tables();
    let mut cw = [0u16; CODEWORDS];
    let mut fcs = 0u16;
    for (i, &word) in words.iter().enumerate() {
        let value = t.decode[usize::from(word)];
        if value == INVALID {
            return None;
        }
        cw[i] = value;
        if t.fcs_flag[usize::from(word)] {
            fcs |= 1 << i;
        }
    }

    if cw[0] > 1317 || cw[9] > 1270 {
        return None;
    }
    // An odd codeword 9 never comes out of the encoder; the scan is likely
    // upside down.
    if cw[9] & 1 != 0 {
        return None;
    }
    cw[9] >>= 1;
    if cw[0] >= 659 {
        cw[0] -= 659;
        fcs |= 1 << 10;
    }

    let mut n = BigNum::new();
    n.add(i64::from(cw[0]));
    for &c in &cw[1..=8] {
        n.muladd(1365, u32::from(c));
    }
    n.muladd(636, u32::from(cw[9]));

    if calculate_fcs(&n) != fcs {
        return None;
    }
    extract_record(n)
}

/// Peel the tracking and routing decimal fields back out of the payload.
fn extract_record(mut n: BigNum) -> Option<Record> {
    let mut track = [0u8; 20];
    for j in (2..20).rev() {
        track[j] = n.divmod(10) as u8;
    }
    track[1] = n.divmod(5) as u8;
    track[0] = n.divmod(10) as u8;

    let mut route = [0u8; 11];
    let mut pos = route.len();
    for group in ROUTE_GROUPS {
        if n.is_zero() {
            break;
        }
        n.add(-1);
        for _ in 0..group {
            pos -= 1;
            route[pos] = n.divmod(10) as u8;
        }
    }
    // Leftover value means the routing padding was inconsistent.
    if !n.is_zero() {
        return None;
    }

    let digits = |slice: &[u8]| -> String {
        slice.iter().map(|&d| char::from(b'0' + d)).collect()
    };

    let (mailer_id, serial_num) = if track[5] == 9 {
        (digits(&track[5..14]), digits(&track[14..20]))
    } else {
        (digits(&track[5..11]), digits(&track[11..20]))
    };

    Some(Record {
        barcode_id: digits(&track[0..2]),
        service_type: digits(&track[2..5]),
        mailer_id,
        serial_num,
        zip: (pos <= 6).then(|| digits(&route[pos..pos + 5])),
        plus4: (pos <= 2).then(|| digits(&route[pos + 5..pos + 9])),
        delivery_pt: (pos == 0).then(|| digits(&route[9..11])),
    })
}
