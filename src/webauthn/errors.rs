//! `WebAuthn` error types
//!
//! This module defines the error type shared by the codec, the builders and
//! both authenticator flows.

/// `WebAuthn` errors that can occur during registration or assertion
#[derive(Debug, thiserror::Error)]
pub enum WebAuthnError {
    /// The request lists acceptable algorithms and ES256 is not among them
    #[error("Unsupported algorithm: ES256 (-7) not in requested algorithms {0:?}")]
    UnsupportedAlgorithm(Vec<i64>),

    /// A raw ECDSA signature did not have the expected r||s length
    #[error("Invalid signature length: expected 64 bytes, got {0}")]
    InvalidSignatureLength(usize),

    /// The supplied passkey record cannot produce a usable private key
    #[error("Passkey record unusable: {0}")]
    RecordUnusable(String),

    /// No relying party id was given and none could be derived from the origin
    #[error("Invalid origin: {0}")]
    InvalidOrigin(String),

    /// Data encoding/parsing error
    #[error("Encoding error: {0}")]
    EncodingError(String),

    /// Failure inside a cryptographic primitive
    #[error("Internal error: {0}")]
    InternalError(String),
}
