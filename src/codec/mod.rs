//! Binary encodings used by the authenticator
//!
//! Only the fixed message shapes that `WebAuthn` needs are produced here:
//! CBOR headers and primitives for the COSE key and attestation object,
//! DER for ECDSA signatures and base64url for everything that crosses the
//! JSON boundary.

pub mod base64url;
pub mod cbor;
pub mod der;
