//! `WebAuthn` implementation
//!
//! This module provides the protocol building blocks of the authenticator:
//! request/response types, flag computation, authenticator data, client
//! data, attestation objects, credential keys and the PRF extension. It
//! holds no state and performs no I/O.

pub mod attestation;
pub mod authenticator_data;
pub mod client_data;
mod errors;
pub mod flags;
pub mod keys;
pub mod prf;
mod types;

// Re-exports for public use
pub use errors::WebAuthnError;
pub use flags::AuthenticatorFlags;
pub use types::*;
