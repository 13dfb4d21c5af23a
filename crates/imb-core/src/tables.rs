//! Codeword tables: the 5-of-13 and 2-of-13 binary word families.
//!
//! Every codeword value maps to a 13-bit binary word with exactly five (or,
//! for the top 78 values, exactly two) set bits. Words pair up with their
//! bit-reversals; palindromic words stand alone and fill each family's index
//! range from the top. The bit-complement of each word decodes to the same
//! codeword but flags one frame-check bit, which is how ten of the eleven
//! FCS bits travel inside the barcode.
//!
//! Construction is a single deterministic scan of all 8192 words, done once
//! per process behind a `OnceLock`.

// Allow truncation casts - indices and words are bounded by the table sizes
#![allow(clippy::cast_possible_truncation)]

use std::sync::OnceLock;

/// Codewords per barcode.
pub(crate) const CODEWORDS: usize = 10;

/// Bits per binary word.
pub(crate) const WORD_BITS: u32 = 13;

/// Mask selecting one binary word.
pub(crate) const WORD_MASK: u16 = (1 << WORD_BITS) - 1;

/// Number of distinct 13-bit words.
const WORD_SPACE: usize = 1 << WORD_BITS;

/// Total codeword values: 1287 five-bit-weight words plus 78 two-bit-weight
/// words.
pub(crate) const CODEWORD_VALUES: usize = 1365;

/// First index of the 2-of-13 family.
const WEIGHT2_BASE: usize = 1287;

/// Sentinel for binary words outside both families.
pub(crate) const INVALID: u16 = u16::MAX;

/// The shared codeword tables.
pub(crate) struct Tables {
    /// Codeword value -> canonical (non-complemented) binary word.
    pub(crate) encode: [u16; CODEWORD_VALUES],
    /// Binary word -> codeword value, or [`INVALID`].
    pub(crate) decode: [u16; WORD_SPACE],
    /// Binary word -> whether it is the complemented form (carries FCS 1).
    pub(crate) fcs_flag: [bool; WORD_SPACE],
}

/// Reverse the low 13 bits of a word.
const fn reverse13(w: u16) -> u16 {
    w.reverse_bits() >> (u16::BITS - WORD_BITS)
}

impl Tables {
    fn build() -> Self {
        let mut encode = [0u16; CODEWORD_VALUES];
        let mut decode = [INVALID; WORD_SPACE];
        let mut fcs_flag = [false; WORD_SPACE];

        let mut assign = |index: usize, word: u16| {
            encode[index] = word;
            decode[usize::from(word)] = index as u16;
            decode[usize::from(word ^ WORD_MASK)] = index as u16;
            fcs_flag[usize::from(word ^ WORD_MASK)] = true;
        };

        // Ascending-word scan yields the canonical codeword numbering:
        // reversal pairs fill each family from the bottom, palindromes from
        // the top.
        let mut low5 = 0;
        let mut high5 = WEIGHT2_BASE - 1;
        let mut low2 = WEIGHT2_BASE;
        let mut high2 = CODEWORD_VALUES - 1;

        for fwd in 0..WORD_SPACE as u16 {
            let (low, high) = match fwd.count_ones() {
                5 => (&mut low5, &mut high5),
                2 => (&mut low2, &mut high2),
                _ => continue,
            };
            let rev = reverse13(fwd);
            if fwd == rev {
                assign(*high, fwd);
                *high -= 1;
            } else if fwd < rev {
                assign(*low, fwd);
                assign(*low + 1, rev);
                *low += 2;
            }
        }

        Self {
            encode,
            decode,
            fcs_flag,
        }
    }
}

/// The process-wide table set, built on first use.
pub(crate) fn tables() -> &'static Tables {
    static TABLES: OnceLock<Tables> = OnceLock::new();
    TABLES.get_or_init(Tables::build)
}
