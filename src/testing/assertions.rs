//! Decoding and verification helpers for testing
//!
//! These helpers take the base64url strings the engine returns and check
//! them the way a relying party would.

use ciborium::value::Value;
use p256::ecdsa::signature::Verifier;
use p256::ecdsa::{Signature, VerifyingKey};
use p256::elliptic_curve::JwkEcKey;

use crate::codec::base64url;
use crate::utils::crypto::sha256;
use crate::webauthn::authenticator_data::{AAGUID, BASE_LEN};
use crate::webauthn::keys::public_key_from_jwk;

/// Fixed length of the ES256 COSE key the authenticator emits
pub const COSE_KEY_LEN: usize = 77;

/// A decoded attestation object
#[derive(Debug)]
pub struct DecodedAttestation {
    pub fmt: String,
    pub att_stmt: Vec<(Value, Value)>,
    pub auth_data: Vec<u8>,
    /// Top-level keys in encoded order
    pub keys: Vec<String>,
}

impl DecodedAttestation {
    /// Look up a text-keyed entry of the attestation statement
    #[must_use]
    pub fn statement(&self, key: &str) -> Option<&Value> {
        self.att_stmt
            .iter()
            .find(|(k, _)| k.as_text() == Some(key))
            .map(|(_, v)| v)
    }
}

/// Decode base64url test output
///
/// # Panics
///
/// Panics if the input is not base64url.
#[must_use]
pub fn decode_b64(encoded: &str) -> Vec<u8> {
    base64url::decode(encoded).expect("engine output should be base64url")
}

/// Decode an attestation object with an independent CBOR decoder
///
/// # Panics
///
/// Panics if the object is not a CBOR map of `fmt`, `attStmt` and `authData`.
#[must_use]
pub fn decode_attestation_object(encoded: &str) -> DecodedAttestation {
    let bytes = decode_b64(encoded);
    let value: Value =
        ciborium::de::from_reader(bytes.as_slice()).expect("attestation object should be CBOR");
    let entries = value.into_map().expect("attestation object should be a map");

    let mut fmt = None;
    let mut att_stmt = None;
    let mut auth_data = None;
    let mut keys = Vec::new();
    for (key, value) in entries {
        let key = key.into_text().expect("attestation keys should be text");
        match key.as_str() {
            "fmt" => fmt = value.into_text().ok(),
            "attStmt" => att_stmt = value.into_map().ok(),
            "authData" => auth_data = value.into_bytes().ok(),
            other => panic!("unexpected attestation key {other}"),
        }
        keys.push(key);
    }

    DecodedAttestation {
        fmt: fmt.expect("fmt should be text"),
        att_stmt: att_stmt.expect("attStmt should be a map"),
        auth_data: auth_data.expect("authData should be bytes"),
        keys,
    }
}

/// Parse clientDataJSON
///
/// # Panics
///
/// Panics if the input is not base64url JSON.
#[must_use]
pub fn parse_client_data(encoded: &str) -> serde_json::Value {
    serde_json::from_slice(&decode_b64(encoded)).expect("client data should be JSON")
}

/// Assert the rpIdHash prefix of authenticator data
///
/// # Panics
///
/// Panics if the first 32 bytes are not SHA-256 of `rp_id`.
pub fn assert_rp_id_hash(auth_data: &[u8], rp_id: &str) {
    assert_eq!(
        &auth_data[..32],
        sha256(rp_id.as_bytes()).as_slice(),
        "rpIdHash does not match {rp_id}"
    );
}

/// Assert the flag byte of authenticator data
///
/// # Panics
///
/// Panics if the flags differ.
pub fn assert_flags(auth_data: &[u8], expected: u8) {
    assert_eq!(
        auth_data[32], expected,
        "Expected flags {expected:#04x}, got {:#04x}",
        auth_data[32]
    );
}

/// Assert the sign counter is zero
///
/// # Panics
///
/// Panics if the counter is not zero.
pub fn assert_zero_sign_count(auth_data: &[u8]) {
    assert_eq!(&auth_data[33..37], &[0, 0, 0, 0], "Sign count should be zero");
}

/// Split registration authenticator data into credential id and COSE key
///
/// # Panics
///
/// Panics if the layout is not 37 + 16 + 2 + L + 77 bytes with the
/// authenticator's AAGUID.
#[must_use]
pub fn attested_credential(auth_data: &[u8]) -> (Vec<u8>, Vec<u8>) {
    assert_eq!(
        &auth_data[BASE_LEN..BASE_LEN + 16],
        AAGUID.as_bytes(),
        "Unexpected AAGUID"
    );
    let len_offset = BASE_LEN + 16;
    let id_len = usize::from(u16::from_be_bytes([
        auth_data[len_offset],
        auth_data[len_offset + 1],
    ]));
    assert_eq!(
        auth_data.len(),
        BASE_LEN + 16 + 2 + id_len + COSE_KEY_LEN,
        "Unexpected registration authenticator data length"
    );
    let id_start = len_offset + 2;
    (
        auth_data[id_start..id_start + id_len].to_vec(),
        auth_data[id_start + id_len..].to_vec(),
    )
}

/// Assert a DER signature over `authData || SHA-256(clientDataJSON)`
///
/// # Panics
///
/// Panics if the signature is not valid DER or does not verify.
pub fn assert_signature_valid(
    public_jwk: &JwkEcKey,
    auth_data: &[u8],
    client_data_json: &[u8],
    signature_der: &[u8],
) {
    let public_key = public_key_from_jwk(public_jwk).expect("public JWK should import");
    let verifying_key = VerifyingKey::from(&public_key);
    let signature = Signature::from_der(signature_der).expect("signature should be DER");
    let message = [auth_data, sha256(client_data_json).as_slice()].concat();
    verifying_key
        .verify(&message, &signature)
        .expect("signature should verify");
}
