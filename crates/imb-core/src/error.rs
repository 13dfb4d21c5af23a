//! Codec error types.

use thiserror::Error;

/// Validation failures raised while encoding a record.
///
/// Each variant names one violated field constraint; the display text is the
/// stable human-readable reason.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// `zip` is present but not exactly five digits.
    #[error("zip must be 5 digits")]
    ZipDigits,

    /// `plus4` is present without `zip`.
    #[error("zip required when plus4 present")]
    ZipRequired,

    /// `plus4` is present but not exactly four digits.
    #[error("plus4 must be 4 digits")]
    Plus4Digits,

    /// `delivery_pt` is present but not exactly two digits.
    #[error("delivery_pt must be 2 digits")]
    DeliveryPtDigits,

    /// `delivery_pt` is present without the rest of the routing code.
    #[error("delivery_pt requires zip and plus4")]
    DeliveryPtRequires,

    /// `barcode_id` is not exactly two digits.
    #[error("barcode_id must be 2 digits")]
    BarcodeIdDigits,

    /// The second digit of `barcode_id` is outside `0-4`.
    #[error("second digit of barcode_id must be 0-4")]
    BarcodeIdRange,

    /// `service_type` is not exactly three digits.
    #[error("service_type must be 3 digits")]
    ServiceTypeDigits,

    /// `mailer_id` is neither six nor nine digits.
    #[error("mailer_id must be 6 or 9 digits")]
    MailerIdDigits,

    /// `mailer_id` and `serial_num` do not total fifteen digits.
    #[error("mailer_id + serial_num must total 15 digits")]
    SerialNumDigits,
}

/// Failures raised while decoding a symbol string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Input length admits no decode attempt (not 65, nor repairable 64/66).
    #[error("barcode must be 65 symbols, got {got}")]
    Length {
        /// Symbol count after normalization.
        got: usize,
    },

    /// A symbol outside the `{A, D, F, T}` alphabet.
    #[error("invalid symbol {symbol:?} at position {position}")]
    InvalidSymbol {
        /// The offending character.
        symbol: char,
        /// Zero-based position in the normalized input.
        position: usize,
    },

    /// The input decodes only after swapping ascenders and descenders; the
    /// scan is upside down and is deliberately not returned as data.
    #[error("barcode appears to be upside down")]
    UpsideDown,

    /// No strict or repaired decoding exists.
    #[error("invalid barcode")]
    Invalid,

    /// More than one single-bit repair yields a valid decoding.
    #[error("damaged barcode with ambiguous repair")]
    Ambiguous,
}
