//! USPS Intelligent Mail Barcode codec.
//!
//! Bidirectional conversion between a structured postal record (barcode
//! identifier, service type, mailer identifier, serial number, optional ZIP
//! routing) and the 65-symbol four-state string over `{A, D, F, T}`:
//!
//! - 102-bit payload composed through a variable-width decimal layout
//! - 11-bit frame check sequence (polynomial 0xF35)
//! - ten codewords from the 5-of-13 / 2-of-13 binary word families
//! - fixed bar-to-codeword bit permutation over 65 positions
//!
//! Decoding accepts clean barcodes and repairs a single corrupted symbol,
//! one inserted symbol, or one missing symbol, reporting what was fixed.
//! Upside-down input is detected and refused rather than decoded.
//!
//! ```
//! use imb_core::{decode, encode, Record};
//!
//! let record = Record {
//!     barcode_id: "01".into(),
//!     service_type: "234".into(),
//!     mailer_id: "567094".into(),
//!     serial_num: "987654321".into(),
//!     ..Record::default()
//! };
//! let barcode = encode(&record)?;
//! assert_eq!(barcode.len(), 65);
//!
//! let decoded = decode(&barcode)?;
//! assert_eq!(decoded.data, record);
//! assert!(!decoded.is_repaired());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

mod bignum;
mod decode;
mod encode;
mod error;
mod fcs;
mod golden;
mod layout;
mod record;
mod repair;
mod tables;

pub use decode::{DecodeResult, RepairStatus};
pub use error::{DecodeError, EncodeError};
pub use record::Record;

/// Encode a record into its 65-symbol barcode string.
///
/// The record is normalized (ASCII whitespace stripped, uppercased, empty
/// optional fields treated as absent) before validation.
///
/// # Errors
///
/// [`EncodeError`] naming the first violated field constraint.
pub fn encode(record: &Record) -> Result<String, EncodeError> {
    encode::encode_record(record)
}

/// Decode a barcode string into a record, repairing single-symbol damage
/// where a unique repair exists.
///
/// # Errors
///
/// [`DecodeError`] when the input has no strict or repaired decoding.
pub fn decode(barcode: &str) -> Result<DecodeResult, DecodeError> {
    decode::decode_barcode(barcode)
}
