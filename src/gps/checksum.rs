// src/gps/checksum.rs
//! NMEA checksum validation

use crate::error::{GpsError, Result};

/// XOR of every byte in the sentence payload (between `$` and `*`)
pub fn compute(payload: &str) -> u8 {
    payload.bytes().fold(0, |acc, b| acc ^ b)
}

/// Check a raw sentence against its trailing checksum.
///
/// Returns `MalformedSentence` when the `*` separator is missing and
/// `ChecksumMismatch` when the declared value is wrong or not a two digit
/// hex number.
pub fn verify(sentence: &str) -> Result<()> {
    let body = strip_framing(sentence);

    let (payload, declared) = body
        .rsplit_once('*')
        .ok_or_else(|| GpsError::MalformedSentence(body.to_string()))?;

    let computed = compute(payload);
    let declared = declared.trim();

    // from_str_radix accepts a leading '+', so insist on two hex digits
    let matches = declared.len() == 2
        && declared.bytes().all(|b| b.is_ascii_hexdigit())
        && u8::from_str_radix(declared, 16).map_or(false, |cs| cs == computed);

    if matches {
        Ok(())
    } else {
        Err(GpsError::ChecksumMismatch {
            expected: declared.to_string(),
            computed,
        })
    }
}

/// Boolean form of [`verify`]
pub fn validate(sentence: &str) -> bool {
    verify(sentence).is_ok()
}

fn strip_framing(sentence: &str) -> &str {
    let sentence = sentence.trim_end_matches(['\r', '\n']);
    sentence.strip_prefix('$').unwrap_or(sentence)
}
