//! PRF (hmac-secret) extension
//!
//! `PRF(secret, salt) = HMAC-SHA256(secret, SHA-256("WebAuthn PRF" || 0x00 || salt))`

use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

use super::errors::WebAuthnError;
use super::types::{PrfResults, PrfValues};
use crate::codec::base64url;
use crate::utils::crypto;

type HmacSha256 = Hmac<Sha256>;

/// Domain separation prefix, NUL terminator included
pub const PRF_CONTEXT: &[u8; 13] = b"WebAuthn PRF\0";

/// Length of a per-credential PRF secret
pub const PRF_SECRET_LEN: usize = 32;

/// Generate a fresh PRF secret for a new credential
///
/// # Errors
/// Returns `WebAuthnError::InternalError` if the random source fails.
pub fn generate_secret() -> Result<Vec<u8>, WebAuthnError> {
    crypto::random_bytes(PRF_SECRET_LEN)
}

/// Evaluate the PRF for a single salt
///
/// # Errors
/// Returns `WebAuthnError::InternalError` if the HMAC key is rejected.
pub fn evaluate(secret: &[u8], salt: &[u8]) -> Result<[u8; 32], WebAuthnError> {
    let salt_hash = Sha256::new()
        .chain_update(PRF_CONTEXT)
        .chain_update(salt)
        .finalize();

    let mut mac = HmacSha256::new_from_slice(secret)
        .map_err(|e| WebAuthnError::InternalError(format!("Invalid PRF secret: {e}")))?;
    mac.update(&salt_hash);
    Ok(mac.finalize().into_bytes().into())
}

/// Evaluate the PRF for one or two salts, returning base64url results
///
/// # Errors
/// Returns `WebAuthnError::EncodingError` if a pre-encoded salt is not valid
/// base64url.
pub fn evaluate_values(secret: &[u8], values: &PrfValues) -> Result<PrfResults, WebAuthnError> {
    let first = evaluate(secret, &values.first.to_bytes()?)?;
    let second = values
        .second
        .as_ref()
        .map(|salt| evaluate(secret, &salt.to_bytes()?))
        .transpose()?;

    Ok(PrfResults {
        first: base64url::encode(&first),
        second: second.map(|output| base64url::encode(&output)),
    })
}
