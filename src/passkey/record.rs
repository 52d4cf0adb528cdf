//! Stored passkey record
//!
//! The record is produced by registration and handed back, unchanged, for
//! every assertion. Where and how it is persisted is up to the caller.

use p256::elliptic_curve::JwkEcKey;
use serde::{Deserialize, Serialize};

use crate::codec::base64url;
use crate::webauthn::keys::{self, CredentialKeyPair};
use crate::webauthn::prf::PRF_SECRET_LEN;
use crate::webauthn::WebAuthnError;

/// Durable state of one passkey
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct StoredPasskeyRecord {
    #[serde(rename = "rpId")]
    pub rp_id: String,
    #[serde(rename = "credentialId")]
    pub credential_id: String, // Base64URL-encoded credential ID
    #[serde(rename = "publicKey")]
    pub public_key: JwkEcKey,
    #[serde(rename = "privateKey")]
    pub private_key: JwkEcKey,
    #[serde(rename = "userId", default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>, // As received at registration
    #[serde(rename = "userName", default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(
        rename = "userDisplayName",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub user_display_name: Option<String>,
    #[serde(rename = "prfSecret", default, skip_serializing_if = "Option::is_none")]
    pub prf_secret: Option<String>, // Base64URL-encoded, 32 bytes
}

impl StoredPasskeyRecord {
    /// Import the signing key, checking it against the stored public key
    ///
    /// # Errors
    /// Returns `WebAuthnError::RecordUnusable` if either key is malformed or
    /// the private key does not belong to the stored public key.
    pub fn key_pair(&self) -> Result<CredentialKeyPair, WebAuthnError> {
        let key_pair = CredentialKeyPair::from_private_jwk(&self.private_key)?;
        let public_key = keys::public_key_from_jwk(&self.public_key)?;
        if key_pair.public_key() != public_key {
            return Err(WebAuthnError::RecordUnusable(
                "Private key does not match stored public key".to_string(),
            ));
        }
        Ok(key_pair)
    }

    /// Decoded PRF secret, if the credential was created with PRF enabled
    ///
    /// # Errors
    /// Returns `WebAuthnError::RecordUnusable` if the stored secret is not
    /// 32 bytes of base64url.
    pub fn prf_secret_bytes(&self) -> Result<Option<Vec<u8>>, WebAuthnError> {
        let Some(encoded) = &self.prf_secret else {
            return Ok(None);
        };
        let secret = base64url::decode(encoded)
            .map_err(|_| WebAuthnError::RecordUnusable("PRF secret is not base64url".to_string()))?;
        if secret.len() != PRF_SECRET_LEN {
            return Err(WebAuthnError::RecordUnusable(format!(
                "PRF secret must be {PRF_SECRET_LEN} bytes, got {}",
                secret.len()
            )));
        }
        Ok(Some(secret))
    }

    /// Credential id in canonical unpadded base64url form
    #[must_use]
    pub fn normalized_credential_id(&self) -> String {
        base64url::normalize(&self.credential_id)
    }
}
