//! `WebAuthn` core types
//!
//! Request types mirror the JSON shapes a browser or mobile shell relays to
//! the authenticator; response types are what the relying party receives.
//! All binary fields leave the authenticator as unpadded base64url text.

use serde::{Deserialize, Serialize};

use super::errors::WebAuthnError;
use crate::codec::{base64url, cbor::COSE_ALG_ES256};

/// Credential type string used throughout `WebAuthn`
pub const PUBLIC_KEY_CREDENTIAL_TYPE: &str = "public-key";

/// Attachment reported for credentials created by this authenticator
pub const PLATFORM_ATTACHMENT: &str = "platform";

/// Binary value received from a caller
///
/// Callers either hand over raw bytes or a string that is already base64 or
/// base64url encoded. The string form is trusted as an encoding and only
/// normalized; it is never re-encoded from its UTF-8 bytes. In JSON the byte
/// form is an array of numbers and the text form is a string.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(untagged)]
pub enum BinaryInput {
    Bytes(Vec<u8>),
    PreEncodedText(String),
}

impl BinaryInput {
    /// Unpadded base64url text for this value
    ///
    /// # Errors
    /// Returns `WebAuthnError::EncodingError` if pre-encoded text does not
    /// decode as base64url after normalization.
    pub fn to_base64url(&self) -> Result<String, WebAuthnError> {
        match self {
            Self::Bytes(bytes) => Ok(base64url::encode(bytes)),
            Self::PreEncodedText(text) => {
                let normalized = base64url::normalize(text);
                base64url::decode(&normalized)?;
                Ok(normalized)
            }
        }
    }

    /// Raw bytes for this value
    ///
    /// # Errors
    /// Returns `WebAuthnError::EncodingError` if pre-encoded text is not
    /// valid base64 or base64url.
    pub fn to_bytes(&self) -> Result<Vec<u8>, WebAuthnError> {
        match self {
            Self::Bytes(bytes) => Ok(bytes.clone()),
            Self::PreEncodedText(text) => base64url::decode(text),
        }
    }
}

impl From<Vec<u8>> for BinaryInput {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

impl From<&[u8]> for BinaryInput {
    fn from(bytes: &[u8]) -> Self {
        Self::Bytes(bytes.to_vec())
    }
}

/// User verification requirement ("required", "preferred", "discouraged")
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UserVerificationRequirement {
    Required,
    #[default]
    Preferred,
    Discouraged,
}

/// Attestation conveyance preference
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AttestationConveyancePreference {
    #[default]
    None,
    Indirect,
    Direct,
    Enterprise,
}

/// `WebAuthn` relying party information
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct RelyingParty {
    pub id: Option<String>,   // Domain name (e.g., "example.com")
    pub name: Option<String>, // Display name
}

/// `WebAuthn` user entity
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct UserEntity {
    pub id: Option<BinaryInput>, // Opaque user handle
    pub name: Option<String>,    // Username (e.g., email)
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
}

/// Public key credential parameters
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct PublicKeyCredentialParameters {
    #[serde(rename = "type", default = "default_credential_type")]
    pub r#type: String, // Always "public-key"
    pub alg: i64, // Algorithm identifier (-7 for ES256, -257 for RS256)
}

fn default_credential_type() -> String {
    PUBLIC_KEY_CREDENTIAL_TYPE.to_string()
}

impl PublicKeyCredentialParameters {
    /// ES256 parameters
    #[must_use]
    pub fn es256() -> Self {
        Self {
            r#type: default_credential_type(),
            alg: COSE_ALG_ES256,
        }
    }
}

/// Authenticator selection criteria
///
/// Only `userVerification` affects the response. Attachment and resident
/// key preferences are accepted and ignored: credentials are always
/// platform-attached and discoverable.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct AuthenticatorSelectionCriteria {
    #[serde(rename = "authenticatorAttachment")]
    pub authenticator_attachment: Option<String>, // "platform", "cross-platform"
    #[serde(rename = "residentKey")]
    pub resident_key: Option<String>, // "required", "preferred", "discouraged"
    #[serde(rename = "requireResidentKey")]
    pub require_resident_key: Option<bool>,
    #[serde(rename = "userVerification")]
    pub user_verification: Option<UserVerificationRequirement>,
}

/// PRF salt inputs (`first` and optional `second`)
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PrfValues {
    pub first: BinaryInput,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub second: Option<BinaryInput>,
}

/// PRF extension input
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct PrfExtensionInput {
    pub eval: Option<PrfValues>,
}

/// Extension inputs understood by the authenticator
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct ExtensionInputs {
    pub prf: Option<PrfExtensionInput>,
    #[serde(rename = "credProps")]
    pub cred_props: Option<bool>,
}

/// Options of a credential creation request
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct PublicKeyCredentialCreationOptions {
    pub rp: Option<RelyingParty>,
    pub user: Option<UserEntity>,
    pub challenge: BinaryInput,
    #[serde(rename = "pubKeyCredParams")]
    pub pub_key_cred_params: Option<Vec<PublicKeyCredentialParameters>>,
    pub timeout: Option<u64>, // Milliseconds, informational only
    #[serde(default)]
    pub attestation: AttestationConveyancePreference,
    #[serde(rename = "authenticatorSelection")]
    pub authenticator_selection: Option<AuthenticatorSelectionCriteria>,
    pub extensions: Option<ExtensionInputs>,
}

/// Options of an assertion request
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct PublicKeyCredentialRequestOptions {
    #[serde(rename = "rpId")]
    pub rp_id: Option<String>,
    pub challenge: BinaryInput,
    pub timeout: Option<u64>, // Milliseconds, informational only
    #[serde(rename = "userVerification")]
    pub user_verification: Option<UserVerificationRequirement>,
    pub extensions: Option<ExtensionInputs>,
}

/// Credential creation request relayed from the page
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct CreateRequest {
    pub origin: String,
    #[serde(rename = "requestId")]
    pub request_id: Option<String>, // Caller correlation id
    #[serde(rename = "publicKey")]
    pub public_key: PublicKeyCredentialCreationOptions,
}

/// Assertion request relayed from the page
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct GetRequest {
    pub origin: String,
    #[serde(rename = "requestId")]
    pub request_id: Option<String>, // Caller correlation id
    #[serde(rename = "publicKey")]
    pub public_key: PublicKeyCredentialRequestOptions,
}

/// PRF outputs, base64url encoded
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PrfResults {
    pub first: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub second: Option<String>,
}

/// PRF client extension output
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct PrfExtensionOutput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<PrfResults>,
}

/// Credential properties output
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct CredentialPropertiesOutput {
    pub rk: bool, // Always discoverable
}

/// Client extension results
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct ClientExtensionResults {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prf: Option<PrfExtensionOutput>,
    #[serde(
        rename = "credProps",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub cred_props: Option<CredentialPropertiesOutput>,
}

/// Authenticator attestation response during registration
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct AuthenticatorAttestationResponse {
    #[serde(rename = "clientDataJSON")]
    pub client_data_json: String, // Base64URL-encoded client data JSON
    #[serde(rename = "attestationObject")]
    pub attestation_object: String, // Base64URL-encoded attestation object
    #[serde(rename = "authenticatorData")]
    pub authenticator_data: String, // Base64URL-encoded authenticator data
    #[serde(rename = "publicKey")]
    pub public_key: String, // Base64URL-encoded SubjectPublicKeyInfo DER
    #[serde(rename = "publicKeyAlgorithm")]
    pub public_key_algorithm: i64,
    pub transports: Vec<String>,
}

/// Authenticator assertion response during authentication
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct AuthenticatorAssertionResponse {
    #[serde(rename = "clientDataJSON")]
    pub client_data_json: String, // Base64URL-encoded client data JSON
    #[serde(rename = "authenticatorData")]
    pub authenticator_data: String, // Base64URL-encoded authenticator data
    pub signature: String, // Base64URL-encoded DER signature
    #[serde(rename = "userHandle")]
    pub user_handle: Option<String>, // Stored user id, as received at registration
}

/// Registration result handed back to the relying party
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Credential {
    pub id: String, // Base64URL-encoded credential ID
    #[serde(rename = "rawId")]
    pub raw_id: String, // Base64URL-encoded raw credential ID
    #[serde(rename = "type")]
    pub r#type: String, // Always "public-key"
    #[serde(rename = "authenticatorAttachment")]
    pub authenticator_attachment: String,
    pub response: AuthenticatorAttestationResponse,
    #[serde(rename = "clientExtensionResults")]
    pub client_extension_results: ClientExtensionResults,
}

/// Authentication result handed back to the relying party
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Assertion {
    pub id: String, // Base64URL-encoded credential ID
    #[serde(rename = "rawId")]
    pub raw_id: String, // Base64URL-encoded raw credential ID
    #[serde(rename = "type")]
    pub r#type: String, // Always "public-key"
    #[serde(rename = "authenticatorAttachment")]
    pub authenticator_attachment: String,
    pub response: AuthenticatorAssertionResponse,
    #[serde(rename = "clientExtensionResults")]
    pub client_extension_results: ClientExtensionResults,
}
