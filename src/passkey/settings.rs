//! Passkey engine settings
//!
//! This module defines the tunables of the virtual authenticator.

use serde::{Deserialize, Serialize};

use crate::webauthn::authenticator_data::MAX_CREDENTIAL_ID_LEN;
use crate::webauthn::UserVerificationRequirement;

/// Smallest credential id the bridge will generate
pub const MIN_CREDENTIAL_ID_LEN: usize = 16;

/// Passkey settings for `WebAuthn` operations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PasskeySettings {
    /// Length of credential ids generated by the bridge
    pub credential_id_length: usize,
    /// Default for BE/BS on assertions when the caller does not say
    pub backup_eligible: bool,
    /// Requirement applied when a request omits `userVerification`
    pub default_user_verification: UserVerificationRequirement,
}

impl Default for PasskeySettings {
    fn default() -> Self {
        Self {
            credential_id_length: 16,
            backup_eligible: true,
            default_user_verification: UserVerificationRequirement::Preferred,
        }
    }
}

impl PasskeySettings {
    /// Check that the settings are usable
    ///
    /// # Errors
    /// Returns a description of the first invalid value.
    pub fn validate(&self) -> Result<(), String> {
        if !(MIN_CREDENTIAL_ID_LEN..=MAX_CREDENTIAL_ID_LEN).contains(&self.credential_id_length) {
            return Err(format!(
                "credential_id_length must be between {MIN_CREDENTIAL_ID_LEN} and {MAX_CREDENTIAL_ID_LEN}, got {}",
                self.credential_id_length
            ));
        }
        Ok(())
    }
}
