//! ES256 credential keys
//!
//! Keys are generated fresh for every registration and exported as JSON Web
//! Keys so any external store can persist them. Assertions re-import the
//! private key from its JWK form.

use p256::ecdsa::signature::Signer;
use p256::ecdsa::{Signature, SigningKey};
use p256::elliptic_curve::sec1::ToEncodedPoint;
use p256::elliptic_curve::JwkEcKey;
use p256::pkcs8::EncodePublicKey;
use p256::{PublicKey, SecretKey};

use super::errors::WebAuthnError;
use crate::codec::{cbor, der};

/// A P-256 credential key pair
pub struct CredentialKeyPair {
    secret: SecretKey,
}

impl CredentialKeyPair {
    /// Generate a fresh key pair from the operating system random source
    #[must_use]
    pub fn generate() -> Self {
        Self {
            secret: SecretKey::random(&mut rand_core::OsRng),
        }
    }

    /// Import the private half of a stored key pair
    ///
    /// # Errors
    /// Returns `WebAuthnError::RecordUnusable` if the JWK is not a valid
    /// P-256 private key.
    pub fn from_private_jwk(jwk: &JwkEcKey) -> Result<Self, WebAuthnError> {
        let secret = SecretKey::from_jwk(jwk).map_err(|_| {
            WebAuthnError::RecordUnusable("Private key is not a valid P-256 JWK".to_string())
        })?;
        Ok(Self { secret })
    }

    /// Public key
    #[must_use]
    pub fn public_key(&self) -> PublicKey {
        self.secret.public_key()
    }

    /// Private key as a JWK (includes `d`)
    #[must_use]
    pub fn private_jwk(&self) -> JwkEcKey {
        self.secret.to_jwk()
    }

    /// Public key as a JWK
    #[must_use]
    pub fn public_jwk(&self) -> JwkEcKey {
        self.public_key().to_jwk()
    }

    /// COSE EC2 encoding of the public key
    #[must_use]
    pub fn cose_public_key(&self) -> Vec<u8> {
        let point = self.public_key().to_encoded_point(false);
        // Uncompressed points always carry both coordinates
        let x = point.x().map(|x| x.as_slice()).unwrap_or_default();
        let y = point.y().map(|y| y.as_slice()).unwrap_or_default();
        cbor::cose_es256_key(x, y)
    }

    /// `SubjectPublicKeyInfo` DER encoding of the public key
    ///
    /// # Errors
    /// Returns `WebAuthnError::EncodingError` if DER encoding fails.
    pub fn public_key_der(&self) -> Result<Vec<u8>, WebAuthnError> {
        self.public_key()
            .to_public_key_der()
            .map(|doc| doc.as_bytes().to_vec())
            .map_err(|e| WebAuthnError::EncodingError(format!("Public key DER encoding failed: {e}")))
    }

    /// Sign `message` with ECDSA P-256 / SHA-256, returning a DER signature
    ///
    /// # Errors
    /// Returns `WebAuthnError::InternalError` if signing fails and
    /// `WebAuthnError::InvalidSignatureLength` if the primitive returns a
    /// malformed raw signature.
    pub fn sign(&self, message: &[u8]) -> Result<Vec<u8>, WebAuthnError> {
        let signing_key = SigningKey::from(&self.secret);
        let signature: Signature = signing_key
            .try_sign(message)
            .map_err(|e| WebAuthnError::InternalError(format!("ECDSA signing failed: {e}")))?;
        der::ecdsa_signature(&signature.to_bytes())
    }
}

/// Check that a public JWK is a P-256 key
///
/// # Errors
/// Returns `WebAuthnError::RecordUnusable` if the JWK is not a valid P-256
/// public key.
pub fn public_key_from_jwk(jwk: &JwkEcKey) -> Result<PublicKey, WebAuthnError> {
    PublicKey::from_jwk(jwk).map_err(|_| {
        WebAuthnError::RecordUnusable("Public key is not a valid P-256 JWK".to_string())
    })
}
