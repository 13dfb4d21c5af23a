//! Golden vector tests for the barcode codec.
//!
//! These pin down concrete encode/decode outcomes so any drift in the
//! tables, the bar map, or the payload composition shows up as a literal
//! mismatch rather than a silent re-interpretation.
