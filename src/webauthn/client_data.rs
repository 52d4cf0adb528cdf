//! `clientDataJSON` construction
//!
//! Fields are serialized in the order `type`, `challenge`, `origin`,
//! `crossOrigin`, matching what browsers emit.

use serde::{Deserialize, Serialize};

use super::errors::WebAuthnError;
use crate::utils::crypto;

/// Client data type for a ceremony
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClientDataType {
    #[serde(rename = "webauthn.create")]
    Create,
    #[serde(rename = "webauthn.get")]
    Get,
}

/// Collected client data
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct CollectedClientData {
    #[serde(rename = "type")]
    pub ty: ClientDataType,
    pub challenge: String, // Base64URL-encoded challenge
    pub origin: String,
    #[serde(rename = "crossOrigin")]
    pub cross_origin: bool, // Always false
}

impl CollectedClientData {
    /// Client data for `ty` with a challenge already in base64url form
    #[must_use]
    pub fn new(ty: ClientDataType, challenge: String, origin: &str) -> Self {
        Self {
            ty,
            challenge,
            origin: origin.to_string(),
            cross_origin: false,
        }
    }

    /// Serialize to the exact JSON bytes that get hashed
    ///
    /// # Errors
    /// Returns `WebAuthnError::EncodingError` if JSON serialization fails.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>, WebAuthnError> {
        serde_json::to_vec(self)
            .map_err(|e| WebAuthnError::EncodingError(format!("Client data serialization failed: {e}")))
    }
}

/// Serialized client data together with its SHA-256 hash
pub struct EncodedClientData {
    pub json: Vec<u8>,
    pub hash: [u8; 32],
}

impl TryFrom<&CollectedClientData> for EncodedClientData {
    type Error = WebAuthnError;

    fn try_from(client_data: &CollectedClientData) -> Result<Self, Self::Error> {
        let json = client_data.to_json_bytes()?;
        let hash = crypto::sha256(&json);
        Ok(Self { json, hash })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_order_and_values() {
        let data = CollectedClientData::new(
            ClientDataType::Create,
            "AQID".to_string(),
            "https://example.com",
        );
        let json = String::from_utf8(data.to_json_bytes().unwrap()).unwrap();
        assert_eq!(
            json,
            r#"{"type":"webauthn.create","challenge":"AQID","origin":"https://example.com","crossOrigin":false}"#
        );
    }

    #[test]
    fn test_get_type_and_hash() {
        let data = CollectedClientData::new(ClientDataType::Get, "AQID".to_string(), "https://a.b");
        let encoded = EncodedClientData::try_from(&data).unwrap();

        let parsed: serde_json::Value = serde_json::from_slice(&encoded.json).unwrap();
        assert_eq!(parsed["type"], "webauthn.get");
        assert_eq!(parsed["crossOrigin"], false);
        assert_eq!(encoded.hash, crypto::sha256(&encoded.json));
    }
}
