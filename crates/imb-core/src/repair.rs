//! Error recovery for damaged barcodes.
//!
//! Three mechanisms, tried in order by the decoder: length repair for 64-
//! and 66-symbol inputs, a bounded per-codeword single-bit-flip search, and
//! an ascender/descender swap check that only ever reports a diagnostic.

use tracing::debug;

use crate::decode::{try_decode_words, words_from_symbols, DecodeResult, RepairStatus};
use crate::encode::render_symbols;
use crate::error::DecodeError;
use crate::layout::SYMBOLS;
use crate::record::Record;
use crate::tables::{tables, CODEWORDS, INVALID, WORD_BITS};

/// Cap on the Cartesian bit-flip search. Bounds worst-case work and
/// separates "one symbol slightly wrong" from "too damaged to trust".
const MAX_COMBINATIONS: usize = 1000;

/// A length-repair candidate must leave fewer invalid codewords than this.
const MAX_INVALID_WORDS: usize = 5;

/// Search for the unique decoding reachable by flipping at most one bit in
/// each codeword's binary word.
///
/// Codewords that already decode are pinned to their current word; invalid
/// ones contribute their valid single-bit neighbors.
///
/// # Errors
///
/// `Invalid` when no consistent repair exists (or the search space exceeds
/// the cap), `Ambiguous` when more than one does.
pub(crate) fn bit_flip_repair(symbols: &[u8]) -> Result<DecodeResult, DecodeError> {
    let words = words_from_symbols(symbols);
    let t = tables();

    let mut options: Vec<Vec<u16>> = Vec::with_capacity(CODEWORDS);
    for &word in &words {
        if t.decode[usize::from(word)] != INVALID {
            options.push(vec![word]);
        } else {
            let neighbors: Vec<u16> = (0..WORD_BITS)
                .map(|bit| word ^ (1 << bit))
                .filter(|&w| t.decode[usize::from(w)] != INVALID)
                .collect();
            if neighbors.is_empty() {
                return Err(DecodeError::Invalid);
            }
            options.push(neighbors);
        }
    }

    let combinations: usize = options.iter().map(Vec::len).product();
    if combinations > MAX_COMBINATIONS {
        debug!(combinations, "bit-flip search space over cap, giving up");
        return Err(DecodeError::Invalid);
    }

    let mut found: Option<([u16; CODEWORDS], Record)> = None;
    for index in 0..combinations {
        let mut k = index;
        let mut candidate = [0u16; CODEWORDS];
        for (i, opts) in options.iter().enumerate() {
            candidate[i] = opts[k % opts.len()];
            k /= opts.len();
        }
        if let Some(record) = try_decode_words(&candidate) {
            if found.is_some() {
                debug!("multiple consistent repairs, reporting ambiguity");
                return Err(DecodeError::Ambiguous);
            }
            found = Some((candidate, record));
        }
    }

    let (corrected, data) = found.ok_or(DecodeError::Invalid)?;
    let suggested = render_symbols(&corrected);
    let positions: Vec<usize> = symbols
        .iter()
        .zip(suggested.bytes())
        .enumerate()
        .filter(|&(_, (&input, fixed))| input != fixed)
        .map(|(pos, _)| pos)
        .collect();
    debug!(?positions, "accepted single-bit repair");
    Ok(DecodeResult {
        data,
        repair: RepairStatus::Damaged {
            suggested,
            positions,
        },
    })
}

/// Repair a 64- or 66-symbol input by trying every single insertion or
/// deletion, keeping the candidate with the fewest invalid codewords, and
/// handing it to the bit-flip search.
///
/// # Errors
///
/// `Invalid` when every candidate leaves too many invalid codewords or the
/// chosen candidate does not repair; `Ambiguous` from the bit-flip stage.
pub(crate) fn length_repair(symbols: &[u8]) -> Result<DecodeResult, DecodeError> {
    let t = tables();
    let mut best: Option<(usize, Vec<u8>)> = None;
    for candidate in length_candidates(symbols) {
        let words = words_from_symbols(&candidate);
        let invalid = words
            .iter()
            .filter(|&&w| t.decode[usize::from(w)] == INVALID)
            .count();
        if best.as_ref().map_or(true, |(fewest, _)| invalid < *fewest) {
            best = Some((invalid, candidate));
        }
    }

    let (invalid, candidate) = best.ok_or(DecodeError::Invalid)?;
    if invalid >= MAX_INVALID_WORDS {
        debug!(invalid, "no length-repair candidate is close enough");
        return Err(DecodeError::Invalid);
    }
    debug!(
        invalid,
        inserted = symbols.len() < SYMBOLS,
        "length repair candidate selected"
    );
    bit_flip_repair(&candidate)
}

/// All 65-symbol candidates reachable by one insertion (the placeholder
/// value is immaterial; the bit-flip stage corrects it) or one deletion.
fn length_candidates(symbols: &[u8]) -> Vec<Vec<u8>> {
    let mut out = Vec::new();
    if symbols.len() < SYMBOLS {
        for pos in 0..SYMBOLS {
            let mut candidate = Vec::with_capacity(SYMBOLS);
            candidate.extend_from_slice(&symbols[..pos.min(symbols.len())]);
            candidate.push(b'T');
            candidate.extend_from_slice(&symbols[pos.min(symbols.len())..]);
            debug_assert_eq!(candidate.len(), SYMBOLS);
            out.push(candidate);
        }
    } else {
        for pos in 0..symbols.len() {
            let mut candidate = symbols.to_vec();
            candidate.remove(pos);
            out.push(candidate);
        }
    }
    out
}

/// Post-failure diagnostic: does the input decode with ascenders and
/// descenders swapped? Reports `UpsideDown` without ever returning the
/// flipped payload.
pub(crate) fn orientation_verdict(symbols: &[u8]) -> DecodeError {
    let flipped: Vec<u8> = symbols
        .iter()
        .map(|&s| match s {
            b'A' => b'D',
            b'D' => b'A',
            other => other,
        })
        .collect();
    if try_decode_words(&words_from_symbols(&flipped)).is_some() {
        debug!("input decodes after ascender/descender swap");
        DecodeError::UpsideDown
    } else {
        DecodeError::Invalid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::encode_record;

    fn sample() -> Record {
        Record {
            barcode_id: "00".into(),
            service_type: "270".into(),
            mailer_id: "103502".into(),
            serial_num: "017955971".into(),
            zip: Some("50310".into()),
            plus4: Some("1605".into()),
            delivery_pt: Some("15".into()),
        }
    }

    fn encoded() -> Vec<u8> {
        encode_record(&sample()).unwrap().into_bytes()
    }

    #[test]
    fn single_symbol_flip_is_repaired_with_position() {
        let clean = encoded();
        let mut damaged = clean.clone();
        damaged[30] = if damaged[30] == b'A' { b'D' } else { b'A' };

        match bit_flip_repair(&damaged) {
            Ok(result) => {
                assert_eq!(result.data, sample());
                match result.repair {
                    RepairStatus::Damaged {
                        suggested,
                        positions,
                    } => {
                        assert_eq!(suggested.as_bytes(), clean.as_slice());
                        assert!(positions.contains(&30));
                    }
                    RepairStatus::Clean => panic!("repair must be reported"),
                }
            }
            // A flip that lands on another valid codeword is allowed to be
            // rejected, but must never decode to a different record.
            Err(err) => assert!(matches!(
                err,
                DecodeError::Invalid | DecodeError::Ambiguous
            )),
        }
    }

    #[test]
    fn deleted_symbol_is_repaired() {
        let clean = encoded();
        let mut short = clean.clone();
        short.remove(40);
        let result = length_repair(&short).unwrap();
        assert_eq!(result.data, sample());
        assert!(result.is_repaired());
    }

    #[test]
    fn inserted_symbol_is_repaired() {
        let clean = encoded();
        let mut long = clean.clone();
        long.insert(20, b'F');
        let result = length_repair(&long).unwrap();
        assert_eq!(result.data, sample());
        assert!(result.is_repaired());
    }

    #[test]
    fn hopeless_length_input_is_rejected() {
        let noise = vec![b'T'; 64];
        assert!(length_repair(&noise).is_err());
    }

    #[test]
    fn orientation_swap_is_flagged_not_decoded() {
        let flipped: Vec<u8> = encoded()
            .iter()
            .map(|&s| match s {
                b'A' => b'D',
                b'D' => b'A',
                other => other,
            })
            .collect();
        assert_eq!(orientation_verdict(&flipped), DecodeError::UpsideDown);
    }

    #[test]
    fn orientation_check_rejects_plain_noise() {
        let noise = vec![b'T'; 65];
        assert_eq!(orientation_verdict(&noise), DecodeError::Invalid);
    }
}
