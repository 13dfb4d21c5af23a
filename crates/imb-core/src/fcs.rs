//! Frame check sequence over the composed payload.
//!
//! An 11-bit CRC with generator polynomial 0xF35, seeded with 0x1F0. Each
//! limb is folded in and clocked through eleven rounds, so the whole 110-bit
//! limb space participates. The result rides along in the barcode split
//! across the ten codewords: bits 0..=9 by complementing the matching
//! codeword's binary form, bit 10 by offsetting codeword 0.

use crate::bignum::{BigNum, LIMB_BITS};

/// Generator polynomial.
const POLY: u16 = 0xF35;

/// Seed value.
const SEED: u16 = 0x1F0;

/// Compute the 11-bit frame check sequence of a payload value.
pub(crate) fn calculate_fcs(n: &BigNum) -> u16 {
    let mut fcs = SEED;
    for &limb in &n.limbs {
        fcs ^= limb;
        for _ in 0..LIMB_BITS {
            fcs <<= 1;
            if fcs & 0x800 != 0 {
                fcs ^= POLY;
            }
        }
    }
    fcs & 0x7FF
}
