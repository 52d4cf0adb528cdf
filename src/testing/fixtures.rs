//! Pre-built test data

use crate::passkey::{
    PasskeyAuthenticator, PasskeySettings, RegistrationOptions, RegistrationOutcome,
    VirtualAuthenticator,
};
use crate::settings::AuthenticatorSettings;

use super::builders::CreateRequestBuilder;
use super::constants::TEST_CREDENTIAL_ID;

/// Centralized test fixtures
pub struct TestFixtures;

impl TestFixtures {
    /// Default engine settings
    #[must_use]
    pub fn passkey_settings() -> PasskeySettings {
        PasskeySettings::default()
    }

    /// Default top-level settings
    #[must_use]
    pub fn settings() -> AuthenticatorSettings {
        AuthenticatorSettings::default()
    }

    /// Authenticator with default settings
    #[must_use]
    pub fn authenticator() -> VirtualAuthenticator {
        VirtualAuthenticator::new(Self::passkey_settings())
    }

    /// Authenticator that omits BE/BS on assertions unless asked
    #[must_use]
    pub fn non_backup_authenticator() -> VirtualAuthenticator {
        VirtualAuthenticator::new(PasskeySettings {
            backup_eligible: false,
            ..Self::passkey_settings()
        })
    }

    /// A passkey registered for the default origin
    ///
    /// # Panics
    ///
    /// Panics if registration fails.
    #[must_use]
    pub fn registered_passkey() -> RegistrationOutcome {
        Self::authenticator()
            .register(
                &CreateRequestBuilder::new().build(),
                &TEST_CREDENTIAL_ID,
                &RegistrationOptions::default(),
            )
            .expect("registration with default request should succeed")
    }

    /// A PRF-enabled passkey registered for the default origin
    ///
    /// # Panics
    ///
    /// Panics if registration fails.
    #[must_use]
    pub fn registered_prf_passkey() -> RegistrationOutcome {
        Self::authenticator()
            .register(
                &CreateRequestBuilder::new().with_prf().build(),
                &TEST_CREDENTIAL_ID,
                &RegistrationOptions::default(),
            )
            .expect("registration with PRF should succeed")
    }
}
