//! Virtual authenticator service
//!
//! This module provides the service layer for the passkey engine,
//! implementing the `PasskeyAuthenticator` trait on top of the registration
//! and assertion flows.

use super::assertion::{self, AssertionOptions};
use super::record::StoredPasskeyRecord;
use super::registration::{self, RegistrationOptions, RegistrationOutcome};
use super::settings::PasskeySettings;
use crate::utils::crypto::random_bytes;
use crate::webauthn::{Assertion, CreateRequest, GetRequest, WebAuthnError};

/// Trait for passkey authenticators
pub trait PasskeyAuthenticator {
    /// Create a new credential
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - ES256 is not among the requested algorithms
    /// - The relying party id cannot be resolved
    /// - Request data is malformed
    /// - A cryptographic primitive fails
    fn register(
        &self,
        request: &CreateRequest,
        credential_id: &[u8],
        options: &RegistrationOptions,
    ) -> Result<RegistrationOutcome, WebAuthnError>;

    /// Sign an assertion with a stored credential
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The relying party id cannot be resolved
    /// - Request data is malformed
    /// - The record cannot be used
    /// - Signing fails
    fn authenticate(
        &self,
        request: &GetRequest,
        record: &StoredPasskeyRecord,
        options: &AssertionOptions,
    ) -> Result<Assertion, WebAuthnError>;

    /// Get the authenticator name for logging and identification
    fn authenticator_name(&self) -> &'static str;
}

/// Software authenticator holding no credential state
#[derive(Debug, Clone, Default)]
pub struct VirtualAuthenticator {
    settings: PasskeySettings,
}

impl VirtualAuthenticator {
    /// Create a new virtual authenticator
    #[must_use]
    pub fn new(settings: PasskeySettings) -> Self {
        Self { settings }
    }

    /// Settings in effect
    #[must_use]
    pub fn settings(&self) -> &PasskeySettings {
        &self.settings
    }

    /// Generate a random credential id of the configured length
    ///
    /// # Errors
    /// Returns `WebAuthnError::InternalError` if the system RNG fails.
    pub fn generate_credential_id(&self) -> Result<Vec<u8>, WebAuthnError> {
        random_bytes(self.settings.credential_id_length)
    }
}

impl PasskeyAuthenticator for VirtualAuthenticator {
    fn register(
        &self,
        request: &CreateRequest,
        credential_id: &[u8],
        options: &RegistrationOptions,
    ) -> Result<RegistrationOutcome, WebAuthnError> {
        registration::register(&self.settings, request, credential_id, options)
    }

    fn authenticate(
        &self,
        request: &GetRequest,
        record: &StoredPasskeyRecord,
        options: &AssertionOptions,
    ) -> Result<Assertion, WebAuthnError> {
        assertion::authenticate(&self.settings, request, record, options)
    }

    fn authenticator_name(&self) -> &'static str {
        "virtual"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_credential_id_length() {
        let authenticator = VirtualAuthenticator::new(PasskeySettings {
            credential_id_length: 32,
            ..Default::default()
        });
        assert_eq!(authenticator.generate_credential_id().unwrap().len(), 32);
        assert_eq!(authenticator.authenticator_name(), "virtual");
    }
}
