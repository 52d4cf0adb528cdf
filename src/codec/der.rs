//! DER encoding of ECDSA signatures
//!
//! `WebAuthn` expects ES256 signatures as `SEQUENCE { INTEGER r, INTEGER s }`
//! while signing primitives hand back the fixed-width `r || s` form.

use crate::webauthn::WebAuthnError;

/// Length of a raw P-256 signature (`r || s`)
pub const RAW_SIGNATURE_LEN: usize = 64;

const TAG_INTEGER: u8 = 0x02;
const TAG_SEQUENCE: u8 = 0x30;

/// Append a DER length
fn write_length(out: &mut Vec<u8>, len: usize) {
    if len < 0x80 {
        #[allow(clippy::cast_possible_truncation)]
        out.push(len as u8);
        return;
    }
    let be = len.to_be_bytes();
    let skip = be.iter().take_while(|b| **b == 0).count();
    let significant = &be[skip..];
    #[allow(clippy::cast_possible_truncation)]
    out.push(0x80 | significant.len() as u8);
    out.extend_from_slice(significant);
}

/// Encode an unsigned big-endian magnitude as a DER INTEGER
///
/// Leading zero bytes are stripped, then a single zero is prepended when the
/// most significant bit is set so the value stays non-negative.
fn write_integer(out: &mut Vec<u8>, magnitude: &[u8]) {
    let first_nonzero = magnitude.iter().position(|b| *b != 0);
    let trimmed = first_nonzero.map_or(&[0u8][..], |i| &magnitude[i..]);
    let needs_pad = trimmed[0] & 0x80 != 0;

    out.push(TAG_INTEGER);
    write_length(out, trimmed.len() + usize::from(needs_pad));
    if needs_pad {
        out.push(0x00);
    }
    out.extend_from_slice(trimmed);
}

/// Convert a raw 64 byte ECDSA signature into its DER form
///
/// # Errors
/// Returns `WebAuthnError::InvalidSignatureLength` if `raw` is not exactly
/// 64 bytes long.
pub fn ecdsa_signature(raw: &[u8]) -> Result<Vec<u8>, WebAuthnError> {
    if raw.len() != RAW_SIGNATURE_LEN {
        return Err(WebAuthnError::InvalidSignatureLength(raw.len()));
    }
    let (r, s) = raw.split_at(RAW_SIGNATURE_LEN / 2);

    let mut body = Vec::with_capacity(RAW_SIGNATURE_LEN + 6);
    write_integer(&mut body, r);
    write_integer(&mut body, s);

    let mut out = Vec::with_capacity(body.len() + 2);
    out.push(TAG_SEQUENCE);
    write_length(&mut out, body.len());
    out.extend_from_slice(&body);
    Ok(out)
}
