//! Authenticator data
//!
//! Layout: `rpIdHash (32) || flags (1) || signCount (4) || [attestedCredentialData]`
//! where attested credential data is
//! `aaguid (16) || credentialIdLength (2) || credentialId || credentialPublicKey`.

use uuid::Uuid;

use super::errors::WebAuthnError;
use super::flags::AuthenticatorFlags;
use crate::utils::crypto;

/// AAGUID reported by this authenticator
pub const AAGUID: Uuid = Uuid::from_u128(0x6e1b_52c4_93d0_4f7a_b5e2_8c41_d7a0_3f96);

/// Signature counter; clone detection is disabled for syncable credentials
pub const SIGN_COUNT: u32 = 0;

/// Length of authenticator data without attested credential data
pub const BASE_LEN: usize = 32 + 1 + 4;

/// Largest credential id accepted, per the `WebAuthn` credential id limit
pub const MAX_CREDENTIAL_ID_LEN: usize = 1023;

/// Attested credential data included at registration
#[derive(Clone, Debug)]
pub struct AttestedCredentialData {
    pub credential_id: Vec<u8>,
    pub credential_public_key: Vec<u8>, // COSE encoded
}

impl AttestedCredentialData {
    /// Create attested credential data for a new credential
    ///
    /// # Errors
    /// Returns `WebAuthnError::EncodingError` if the credential id is empty
    /// or longer than 1023 bytes.
    pub fn new(credential_id: &[u8], credential_public_key: Vec<u8>) -> Result<Self, WebAuthnError> {
        if credential_id.is_empty() || credential_id.len() > MAX_CREDENTIAL_ID_LEN {
            return Err(WebAuthnError::EncodingError(format!(
                "Credential id must be 1 to {MAX_CREDENTIAL_ID_LEN} bytes, got {}",
                credential_id.len()
            )));
        }
        Ok(Self {
            credential_id: credential_id.to_vec(),
            credential_public_key,
        })
    }

    fn write(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(AAGUID.as_bytes());
        // Length checked in `new`
        #[allow(clippy::cast_possible_truncation)]
        let id_len = self.credential_id.len() as u16;
        out.extend_from_slice(&id_len.to_be_bytes());
        out.extend_from_slice(&self.credential_id);
        out.extend_from_slice(&self.credential_public_key);
    }

    fn len(&self) -> usize {
        16 + 2 + self.credential_id.len() + self.credential_public_key.len()
    }
}

/// Authenticator data for a registration or assertion
#[derive(Clone, Debug)]
pub struct AuthenticatorData {
    rp_id_hash: [u8; 32],
    flags: AuthenticatorFlags,
    attested_credential_data: Option<AttestedCredentialData>,
}

impl AuthenticatorData {
    /// Authenticator data for an assertion (no attested credential data)
    #[must_use]
    pub fn for_assertion(rp_id: &str, flags: AuthenticatorFlags) -> Self {
        Self {
            rp_id_hash: crypto::sha256(rp_id.as_bytes()),
            flags,
            attested_credential_data: None,
        }
    }

    /// Authenticator data for a registration
    #[must_use]
    pub fn for_registration(
        rp_id: &str,
        flags: AuthenticatorFlags,
        attested: AttestedCredentialData,
    ) -> Self {
        Self {
            rp_id_hash: crypto::sha256(rp_id.as_bytes()),
            flags,
            attested_credential_data: Some(attested),
        }
    }

    /// Flag byte
    #[must_use]
    pub fn flags(&self) -> AuthenticatorFlags {
        self.flags
    }

    /// Serialize to the binary layout that gets signed
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let extra = self
            .attested_credential_data
            .as_ref()
            .map_or(0, AttestedCredentialData::len);
        let mut out = Vec::with_capacity(BASE_LEN + extra);

        out.extend_from_slice(&self.rp_id_hash);
        out.push(self.flags.bits());
        out.extend_from_slice(&SIGN_COUNT.to_be_bytes());
        if let Some(attested) = &self.attested_credential_data {
            attested.write(&mut out);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::webauthn::types::UserVerificationRequirement;

    #[test]
    fn test_assertion_layout() {
        let flags =
            AuthenticatorFlags::assertion(UserVerificationRequirement::Preferred, false, true);
        let data = AuthenticatorData::for_assertion("example.com", flags).to_bytes();

        assert_eq!(data.len(), 37);
        assert_eq!(&data[..32], &crypto::sha256(b"example.com"));
        assert_eq!(data[32], 0x19);
        assert_eq!(&data[33..37], &[0, 0, 0, 0]);
    }

    #[test]
    fn test_registration_layout() {
        let flags =
            AuthenticatorFlags::registration(UserVerificationRequirement::Preferred, false);
        let credential_id = vec![0xAB; 20];
        let cose_key = vec![0xA5; 77];
        let attested = AttestedCredentialData::new(&credential_id, cose_key.clone()).unwrap();
        let data = AuthenticatorData::for_registration("example.com", flags, attested).to_bytes();

        assert_eq!(data.len(), 37 + 16 + 2 + 20 + 77);
        assert_eq!(data[32] & AuthenticatorFlags::AT, AuthenticatorFlags::AT);
        assert_eq!(&data[37..53], AAGUID.as_bytes());
        assert_eq!(&data[53..55], &[0x00, 20]);
        assert_eq!(&data[55..75], credential_id.as_slice());
        assert_eq!(&data[75..], cose_key.as_slice());
    }

    #[test]
    fn test_credential_id_bounds() {
        assert!(AttestedCredentialData::new(&[], vec![]).is_err());
        assert!(AttestedCredentialData::new(&[0; 1024], vec![]).is_err());
        assert!(AttestedCredentialData::new(&[0; 1023], vec![]).is_ok());
    }
}
