//! Base64url helpers
//!
//! Output is always unpadded base64url. Decoding is tolerant: padded and
//! unpadded input are both accepted, as is the standard alphabet. Stray
//! bits in the last symbol are ignored, as browser decoders do.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, URL_SAFE_NO_PAD};
use base64::engine::DecodePaddingMode;
use base64::Engine;

use crate::webauthn::WebAuthnError;

/// URL-safe engine that accepts input with or without `=` padding and
/// ignores non-zero bits in the final symbol
const URL_SAFE_TOLERANT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Encode bytes as unpadded base64url
#[must_use]
pub fn encode(data: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(data)
}

/// Rewrite base64 text into unpadded base64url by character substitution
///
/// The text is assumed to already be a base64 or base64url encoding; it is
/// never re-encoded from its UTF-8 bytes.
#[must_use]
pub fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| *c != '=')
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            other => other,
        })
        .collect()
}

/// Decode base64url or base64 text, padded or not
///
/// # Errors
/// Returns `WebAuthnError::EncodingError` if the text is not valid base64
/// in either alphabet.
pub fn decode(text: &str) -> Result<Vec<u8>, WebAuthnError> {
    URL_SAFE_TOLERANT
        .decode(normalize(text))
        .map_err(|e| WebAuthnError::EncodingError(format!("Invalid base64url text: {e}")))
}
