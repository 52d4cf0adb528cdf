//! Attestation object construction
//!
//! The attestation object is the CBOR map `{fmt, attStmt, authData}`. Only
//! two statement formats are produced: `none`, and `packed` self
//! attestation signed by the new credential key. No certificate chain is
//! ever presented.

use super::errors::WebAuthnError;
use super::keys::CredentialKeyPair;
use super::types::AttestationConveyancePreference;
use crate::codec::cbor::{self, COSE_ALG_ES256};

/// Attestation statement format
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttestationFormat {
    None,
    Packed,
}

impl AttestationFormat {
    /// Format used for a conveyance preference
    ///
    /// `none` and `indirect` stay anonymous; `direct` and `enterprise` get
    /// packed self attestation.
    #[must_use]
    pub fn for_preference(preference: AttestationConveyancePreference) -> Self {
        match preference {
            AttestationConveyancePreference::None | AttestationConveyancePreference::Indirect => {
                Self::None
            }
            AttestationConveyancePreference::Direct
            | AttestationConveyancePreference::Enterprise => Self::Packed,
        }
    }

    /// Value of the `fmt` member
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Packed => "packed",
        }
    }
}

/// Build the CBOR attestation object
///
/// For `packed`, the statement is `{alg: -7, sig}` where `sig` is the DER
/// signature over `authData || clientDataHash` by `key_pair`.
///
/// # Errors
/// Returns an error if signing fails.
pub fn build_attestation_object(
    format: AttestationFormat,
    auth_data: &[u8],
    client_data_hash: &[u8; 32],
    key_pair: &CredentialKeyPair,
) -> Result<Vec<u8>, WebAuthnError> {
    let att_stmt = match format {
        AttestationFormat::None => cbor::map(&[]),
        AttestationFormat::Packed => {
            let mut signed = Vec::with_capacity(auth_data.len() + client_data_hash.len());
            signed.extend_from_slice(auth_data);
            signed.extend_from_slice(client_data_hash);
            let signature = key_pair.sign(&signed)?;

            cbor::map(&[
                (cbor::text("alg"), cbor::int(COSE_ALG_ES256)),
                (cbor::text("sig"), cbor::bytes(&signature)),
            ])
        }
    };

    Ok(cbor::map(&[
        (cbor::text("fmt"), cbor::text(format.as_str())),
        (cbor::text("attStmt"), att_stmt),
        (cbor::text("authData"), cbor::bytes(auth_data)),
    ]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_for_preference() {
        use AttestationConveyancePreference as P;
        assert_eq!(AttestationFormat::for_preference(P::None), AttestationFormat::None);
        assert_eq!(AttestationFormat::for_preference(P::Indirect), AttestationFormat::None);
        assert_eq!(AttestationFormat::for_preference(P::Direct), AttestationFormat::Packed);
        assert_eq!(AttestationFormat::for_preference(P::Enterprise), AttestationFormat::Packed);
    }

    #[test]
    fn test_none_attestation_bytes() {
        let key_pair = CredentialKeyPair::generate();
        let auth_data = [0xEEu8; 40];
        let object =
            build_attestation_object(AttestationFormat::None, &auth_data, &[0; 32], &key_pair)
                .unwrap();

        let mut expected = vec![0xA3];
        expected.extend_from_slice(&cbor::text("fmt"));
        expected.extend_from_slice(&cbor::text("none"));
        expected.extend_from_slice(&cbor::text("attStmt"));
        expected.push(0xA0);
        expected.extend_from_slice(&cbor::text("authData"));
        expected.extend_from_slice(&[0x58, 40]);
        expected.extend_from_slice(&auth_data);

        assert_eq!(object, expected);
    }

    #[test]
    fn test_packed_attestation_verifies() {
        use p256::ecdsa::signature::Verifier;
        use p256::ecdsa::{Signature, VerifyingKey};

        let key_pair = CredentialKeyPair::generate();
        let auth_data = [0x01u8; 37];
        let hash = [0x02u8; 32];
        let object =
            build_attestation_object(AttestationFormat::Packed, &auth_data, &hash, &key_pair)
                .unwrap();

        // fmt "packed", then attStmt map(2) with "alg": -7
        let prefix = [vec![0xA3], cbor::text("fmt"), cbor::text("packed")].concat();
        assert!(object.starts_with(&prefix));
        let stmt_start = prefix.len() + cbor::text("attStmt").len();
        assert_eq!(object[stmt_start], 0xA2);
        let alg = [cbor::text("alg"), cbor::int(-7)].concat();
        assert_eq!(&object[stmt_start + 1..stmt_start + 1 + alg.len()], alg.as_slice());

        // sig byte string follows with a one byte length (DER is 68 to 72 bytes)
        let sig_header = stmt_start + 1 + alg.len() + cbor::text("sig").len();
        assert_eq!(object[sig_header], 0x58);
        let sig_len = object[sig_header + 1] as usize;
        let signature = &object[sig_header + 2..sig_header + 2 + sig_len];

        let mut signed = auth_data.to_vec();
        signed.extend_from_slice(&hash);
        let verifying_key = VerifyingKey::from(&key_pair.public_key());
        let signature = Signature::from_der(signature).unwrap();
        assert!(verifying_key.verify(&signed, &signature).is_ok());
    }
}
