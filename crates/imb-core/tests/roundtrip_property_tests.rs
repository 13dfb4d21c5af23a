//! Property-based tests for the barcode codec.
//!
//! ## Test Categories
//! 1. **Round-trip correctness**: every valid record decodes back intact
//! 2. **Output shape**: 65 symbols, alphabet `{A, D, F, T}`
//! 3. **Determinism and injectivity**: equal records encode equally,
//!    distinct records never collide
//! 4. **Interface**: the record survives the associative-map boundary

use imb_core::{decode, encode, Record, RepairStatus};
use proptest::prelude::*;

// ─────────────────────────────────────────────────────────────────────────────
// Proptest Strategies
// ─────────────────────────────────────────────────────────────────────────────

/// Strategy for a fixed-length decimal digit string.
fn digits(len: usize) -> impl Strategy<Value = String> {
    prop::collection::vec(0..10u8, len)
        .prop_map(|ds| ds.into_iter().map(|d| char::from(b'0' + d)).collect())
}

/// Strategy for the two-digit barcode id (second digit capped at 4).
fn barcode_id() -> impl Strategy<Value = String> {
    (0..10u8, 0..5u8).prop_map(|(a, b)| format!("{a}{b}"))
}

/// Strategy for a mailer/serial split totalling fifteen digits.
///
/// Nine-digit mailer ids start with 9 and six-digit ids do not; that
/// leading digit is what lets the decoder find the split.
fn mailer_and_serial() -> impl Strategy<Value = (String, String)> {
    prop_oneof![
        (0..9u8, digits(5), digits(9)).prop_map(|(first, rest, serial)| {
            (format!("{first}{rest}"), serial)
        }),
        (digits(8), digits(6)).prop_map(|(rest, serial)| (format!("9{rest}"), serial)),
    ]
}

/// Strategy for the four legal routing shapes.
fn routing() -> impl Strategy<Value = (Option<String>, Option<String>, Option<String>)> {
    prop_oneof![
        Just((None, None, None)),
        digits(5).prop_map(|z| (Some(z), None, None)),
        (digits(5), digits(4)).prop_map(|(z, p)| (Some(z), Some(p), None)),
        (digits(5), digits(4), digits(2)).prop_map(|(z, p, d)| (Some(z), Some(p), Some(d))),
    ]
}

/// Strategy over the full accepted record domain.
fn record() -> impl Strategy<Value = Record> {
    (barcode_id(), digits(3), mailer_and_serial(), routing()).prop_map(
        |(barcode_id, service_type, (mailer_id, serial_num), (zip, plus4, delivery_pt))| Record {
            barcode_id,
            service_type,
            mailer_id,
            serial_num,
            zip,
            plus4,
            delivery_pt,
        },
    )
}

// ─────────────────────────────────────────────────────────────────────────────
// Property Tests
// ─────────────────────────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    /// Every record in the accepted domain round-trips cleanly.
    #[test]
    fn prop_roundtrip_is_clean(record in record()) {
        let barcode = encode(&record).expect("valid record must encode");
        let result = decode(&barcode).expect("encoded barcode must decode");
        prop_assert_eq!(result.data, record);
        prop_assert_eq!(result.repair, RepairStatus::Clean);
    }

    /// The output is always 65 symbols over the four-state alphabet.
    #[test]
    fn prop_output_shape(record in record()) {
        let barcode = encode(&record).expect("valid record must encode");
        prop_assert_eq!(barcode.len(), 65);
        prop_assert!(barcode.bytes().all(|b| matches!(b, b'A' | b'D' | b'F' | b'T')));
    }

    /// Encoding is a pure function of the record.
    #[test]
    fn prop_encoding_is_deterministic(record in record()) {
        let first = encode(&record).expect("valid record must encode");
        let second = encode(&record).expect("valid record must encode");
        prop_assert_eq!(first, second);
    }

    /// Distinct records never share a barcode.
    #[test]
    fn prop_injectivity(a in record(), b in record()) {
        prop_assume!(a != b);
        prop_assert_ne!(
            encode(&a).expect("valid record must encode"),
            encode(&b).expect("valid record must encode")
        );
    }

    /// Records survive the associative-map serialization boundary.
    #[test]
    fn prop_record_survives_map_interface(record in record()) {
        let json = serde_json::to_string(&record).expect("record serializes");
        let back: Record = serde_json::from_str(&json).expect("record deserializes");
        prop_assert_eq!(&back, &record);
        prop_assert_eq!(
            encode(&back).expect("valid record must encode"),
            encode(&record).expect("valid record must encode")
        );
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Deterministic spot checks
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn extreme_records_roundtrip() {
    let all_zero = Record {
        barcode_id: "00".into(),
        service_type: "000".into(),
        mailer_id: "000000".into(),
        serial_num: "000000000".into(),
        zip: Some("00000".into()),
        plus4: Some("0000".into()),
        delivery_pt: Some("00".into()),
    };
    let all_nine = Record {
        barcode_id: "94".into(),
        service_type: "999".into(),
        mailer_id: "999999999".into(),
        serial_num: "999999".into(),
        zip: Some("99999".into()),
        plus4: Some("9999".into()),
        delivery_pt: Some("99".into()),
    };
    for record in [all_zero, all_nine] {
        let result = decode(&encode(&record).unwrap()).unwrap();
        assert_eq!(result.data, record);
        assert_eq!(result.repair, RepairStatus::Clean);
    }
}

#[test]
fn zero_zip_differs_from_no_zip() {
    let without = Record {
        barcode_id: "01".into(),
        service_type: "234".into(),
        mailer_id: "567094".into(),
        serial_num: "987654321".into(),
        ..Record::default()
    };
    let mut with_zero = without.clone();
    with_zero.zip = Some("00000".into());

    let a = encode(&without).unwrap();
    let b = encode(&with_zero).unwrap();
    assert_ne!(a, b);
    assert_eq!(decode(&a).unwrap().data.zip, None);
    assert_eq!(decode(&b).unwrap().data.zip.as_deref(), Some("00000"));
}
