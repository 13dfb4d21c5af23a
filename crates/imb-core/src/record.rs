//! The structured postal record carried by a barcode.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::EncodeError;

/// The encodable/decoded payload: tracking fields plus an optional routing
/// code in one of four shapes (none, ZIP, ZIP+4, full delivery point).
///
/// All fields are decimal-digit strings; widths are validated by the
/// encoder after normalization. An absent optional field and an empty
/// string are equivalent.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Two digits; the second is restricted to `0-4`.
    pub barcode_id: String,
    /// Three digits.
    pub service_type: String,
    /// Six or nine digits; nine-digit identifiers start with 9.
    pub mailer_id: String,
    /// Nine or six digits; together with `mailer_id` always fifteen.
    pub serial_num: String,
    /// Five digits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    /// Four digits; only with `zip`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plus4: Option<String>,
    /// Two digits; only with `zip` and `plus4`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_pt: Option<String>,
}

/// Remove ASCII whitespace and uppercase the rest.
pub(crate) fn normalize_field(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_ascii_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

fn normalize_opt(s: Option<&String>) -> Option<String> {
    let s = normalize_field(s?.as_str());
    (!s.is_empty()).then_some(s)
}

fn is_digits(s: &str, len: usize) -> bool {
    s.len() == len && s.bytes().all(|b| b.is_ascii_digit())
}

impl Record {
    /// Copy of the record with every field whitespace-stripped and
    /// uppercased, and empty optional fields mapped to `None`.
    #[must_use]
    pub fn normalized(&self) -> Self {
        Self {
            barcode_id: normalize_field(&self.barcode_id),
            service_type: normalize_field(&self.service_type),
            mailer_id: normalize_field(&self.mailer_id),
            serial_num: normalize_field(&self.serial_num),
            zip: normalize_opt(self.zip.as_ref()),
            plus4: normalize_opt(self.plus4.as_ref()),
            delivery_pt: normalize_opt(self.delivery_pt.as_ref()),
        }
    }

    /// Check every field constraint on an already normalized record.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint, in routing-first order.
    pub(crate) fn validate(&self) -> Result<(), EncodeError> {
        if let Some(zip) = &self.zip {
            if !is_digits(zip, 5) {
                return Err(EncodeError::ZipDigits);
            }
        }
        if let Some(plus4) = &self.plus4 {
            if self.zip.is_none() {
                return Err(EncodeError::ZipRequired);
            }
            if !is_digits(plus4, 4) {
                return Err(EncodeError::Plus4Digits);
            }
        }
        if let Some(delivery_pt) = &self.delivery_pt {
            if !is_digits(delivery_pt, 2) {
                return Err(EncodeError::DeliveryPtDigits);
            }
            if self.zip.is_none() || self.plus4.is_none() {
                return Err(EncodeError::DeliveryPtRequires);
            }
        }

        if !is_digits(&self.barcode_id, 2) {
            return Err(EncodeError::BarcodeIdDigits);
        }
        if self.barcode_id.as_bytes()[1] > b'4' {
            return Err(EncodeError::BarcodeIdRange);
        }
        if !is_digits(&self.service_type, 3) {
            return Err(EncodeError::ServiceTypeDigits);
        }
        if !(is_digits(&self.mailer_id, 6) || is_digits(&self.mailer_id, 9)) {
            return Err(EncodeError::MailerIdDigits);
        }
        let serial_len = 15 - self.mailer_id.len();
        if !is_digits(&self.serial_num, serial_len) {
            return Err(EncodeError::SerialNumDigits);
        }
        Ok(())
    }
}

impl fmt::Display for Record {
    /// Concatenation of all present fields in tracking-then-routing order.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}",
            self.barcode_id, self.service_type, self.mailer_id, self.serial_num
        )?;
        for field in [&self.zip, &self.plus4, &self.delivery_pt].into_iter().flatten() {
            write!(f, "{field}")?;
        }
        Ok(())
    }
}
