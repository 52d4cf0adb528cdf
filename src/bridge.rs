//! JSON command bridge
//!
//! Hosts that relay page requests as JSON (a browser content script, a
//! mobile shell, the bundled binary) send one command envelope and receive
//! one result envelope:
//!
//! ```json
//! {"command": "create", "request": {...}, "options": {...}, "credentialId": "..."}
//! {"command": "get", "request": {...}, "record": {...}, "options": {...}}
//! ```

use log::debug;
use serde::{Deserialize, Serialize};

use crate::passkey::{
    AssertionOptions, PasskeyAuthenticator, RegistrationOptions, StoredPasskeyRecord,
};
use crate::webauthn::{Assertion, BinaryInput, CreateRequest, Credential, GetRequest, WebAuthnError};

/// A single bridge command
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(tag = "command", rename_all = "lowercase")]
pub enum BridgeCommand {
    Create {
        request: CreateRequest,
        #[serde(default)]
        options: RegistrationOptions,
        /// Credential id chosen by the host; generated when absent
        #[serde(rename = "credentialId", default)]
        credential_id: Option<BinaryInput>,
    },
    Get {
        request: GetRequest,
        record: StoredPasskeyRecord,
        #[serde(default)]
        options: AssertionOptions,
    },
}

/// Result of a bridge command
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum BridgeResponse {
    Created {
        credential: Credential,
        record: StoredPasskeyRecord,
    },
    Asserted {
        assertion: Assertion,
    },
    Error {
        message: String,
    },
}

impl From<WebAuthnError> for BridgeResponse {
    fn from(error: WebAuthnError) -> Self {
        Self::Error {
            message: error.to_string(),
        }
    }
}

/// Run a command against an authenticator
///
/// `generate_credential_id` is consulted only for `create` commands that do
/// not carry a credential id.
///
/// # Errors
///
/// Returns an error if the engine rejects the request or the supplied
/// credential id is malformed.
pub fn dispatch<A, F>(
    authenticator: &A,
    command: &BridgeCommand,
    generate_credential_id: F,
) -> Result<BridgeResponse, WebAuthnError>
where
    A: PasskeyAuthenticator,
    F: FnOnce() -> Result<Vec<u8>, WebAuthnError>,
{
    match command {
        BridgeCommand::Create {
            request,
            options,
            credential_id,
        } => {
            let credential_id = match credential_id {
                Some(id) => id.to_bytes()?,
                None => generate_credential_id()?,
            };
            debug!(
                "Bridge create via {} authenticator",
                authenticator.authenticator_name()
            );
            let outcome = authenticator.register(request, &credential_id, options)?;
            Ok(BridgeResponse::Created {
                credential: outcome.credential,
                record: outcome.record,
            })
        }
        BridgeCommand::Get {
            request,
            record,
            options,
        } => {
            debug!(
                "Bridge get via {} authenticator",
                authenticator.authenticator_name()
            );
            let assertion = authenticator.authenticate(request, record, options)?;
            Ok(BridgeResponse::Asserted { assertion })
        }
    }
}

/// Parse a JSON command, run it and serialize the result
///
/// Engine and parse failures are reported as an `error` envelope rather
/// than an `Err`, so hosts always get a JSON answer.
///
/// # Errors
///
/// Returns `WebAuthnError::EncodingError` only if the response cannot be
/// serialized.
pub fn handle_json<A, F>(
    authenticator: &A,
    input: &str,
    generate_credential_id: F,
) -> Result<String, WebAuthnError>
where
    A: PasskeyAuthenticator,
    F: FnOnce() -> Result<Vec<u8>, WebAuthnError>,
{
    let response = match serde_json::from_str::<BridgeCommand>(input) {
        Ok(command) => dispatch(authenticator, &command, generate_credential_id)
            .unwrap_or_else(BridgeResponse::from),
        Err(e) => BridgeResponse::Error {
            message: format!("Invalid command: {e}"),
        },
    };
    serde_json::to_string(&response)
        .map_err(|e| WebAuthnError::EncodingError(format!("Cannot serialize response: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::passkey::VirtualAuthenticator;

    #[test]
    fn test_parse_create_command() {
        let command: BridgeCommand = serde_json::from_str(
            r#"{"command":"create","request":{"origin":"https://example.com","publicKey":{"challenge":"AQID"}},"credentialId":"AAECAwQFBgcICQoLDA0ODw"}"#,
        )
        .unwrap();

        match command {
            BridgeCommand::Create {
                request,
                options,
                credential_id,
            } => {
                assert_eq!(request.origin, "https://example.com");
                assert!(!options.uv_performed);
                assert_eq!(credential_id.unwrap().to_bytes().unwrap().len(), 16);
            }
            BridgeCommand::Get { .. } => panic!("expected create"),
        }
    }

    #[test]
    fn test_unknown_command_is_error_envelope() {
        let authenticator = VirtualAuthenticator::default();
        let output = handle_json(&authenticator, r#"{"command":"delete"}"#, || Ok(vec![1; 16]))
            .unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json["status"], "error");
        assert!(json["message"].as_str().unwrap().starts_with("Invalid command"));
    }

    #[test]
    fn test_generator_used_only_without_credential_id() {
        let authenticator = VirtualAuthenticator::default();
        let command: BridgeCommand = serde_json::from_str(
            r#"{"command":"create","request":{"origin":"https://example.com","publicKey":{"challenge":"AQID"}}}"#,
        )
        .unwrap();

        let response = dispatch(&authenticator, &command, || Ok(vec![0xAB; 16])).unwrap();
        match response {
            BridgeResponse::Created { credential, .. } => {
                assert_eq!(credential.raw_id, crate::codec::base64url::encode(&[0xAB; 16]));
            }
            other => panic!("unexpected response: {other:?}"),
        }
    }
}
