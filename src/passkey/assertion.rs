//! Assertion ("get")
//!
//! Signs a challenge with the key held in a stored passkey record.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use super::record::StoredPasskeyRecord;
use super::relying_party::resolve_rp_id;
use super::settings::PasskeySettings;
use crate::codec::base64url;
use crate::webauthn::authenticator_data::AuthenticatorData;
use crate::webauthn::client_data::{ClientDataType, CollectedClientData, EncodedClientData};
use crate::webauthn::{
    prf, Assertion, AuthenticatorAssertionResponse, AuthenticatorFlags, ClientExtensionResults,
    GetRequest, PrfExtensionOutput, PrfValues, WebAuthnError, PLATFORM_ATTACHMENT,
    PUBLIC_KEY_CREDENTIAL_TYPE,
};

/// Caller supplied options for an assertion
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(default)]
pub struct AssertionOptions {
    /// Whether the host actually verified the user
    #[serde(rename = "uvPerformed")]
    pub uv_performed: bool,
    /// Report BE/BS; falls back to `backup_eligible` from settings
    #[serde(rename = "includeBEBS")]
    pub include_be_bs: Option<bool>,
    /// Salts to evaluate against the record's PRF secret
    #[serde(rename = "prfEval")]
    pub prf_eval: Option<PrfValues>,
}

/// Produce an assertion for `record`
///
/// # Errors
/// Returns an error if:
/// - The relying party id cannot be resolved
/// - The challenge or PRF salts are malformed pre-encoded text
/// - The record's keys or PRF secret cannot be used
/// - Signing fails
pub fn authenticate(
    settings: &PasskeySettings,
    request: &GetRequest,
    record: &StoredPasskeyRecord,
    options: &AssertionOptions,
) -> Result<Assertion, WebAuthnError> {
    let public_key = &request.public_key;

    let rp_id = resolve_rp_id(public_key.rp_id.as_deref(), &request.origin)?;
    if rp_id != record.rp_id {
        warn!(
            "Assertion rp {rp_id} differs from record rp {} (request {:?})",
            record.rp_id, request.request_id
        );
    }

    let requirement = public_key
        .user_verification
        .unwrap_or(settings.default_user_verification);
    let include_backup_flags = options.include_be_bs.unwrap_or(settings.backup_eligible);
    let flags = AuthenticatorFlags::assertion(requirement, options.uv_performed, include_backup_flags);
    let auth_data = AuthenticatorData::for_assertion(&rp_id, flags).to_bytes();

    let challenge = public_key.challenge.to_base64url()?;
    let client_data = CollectedClientData::new(ClientDataType::Get, challenge, &request.origin);
    let encoded_client_data = EncodedClientData::try_from(&client_data)?;

    let key_pair = record.key_pair()?;
    let signed = [auth_data.as_slice(), encoded_client_data.hash.as_slice()].concat();
    let signature = key_pair.sign(&signed)?;
    debug!("Signed assertion for rp {rp_id}, flags {:#04x}", flags.bits());

    let salts = options.prf_eval.as_ref().or_else(|| {
        public_key
            .extensions
            .as_ref()
            .and_then(|e| e.prf.as_ref())
            .and_then(|p| p.eval.as_ref())
    });
    // The stored secret is only decoded when salts were supplied
    let prf_output = match salts {
        Some(values) => match record.prf_secret_bytes()? {
            Some(secret) => Some(PrfExtensionOutput {
                enabled: None,
                results: Some(prf::evaluate_values(&secret, values)?),
            }),
            None => {
                debug!("PRF requested but record has no PRF secret");
                None
            }
        },
        None => None,
    };

    let credential_id = record.normalized_credential_id();
    info!(
        "Produced assertion for rp {rp_id} (request {:?})",
        request.request_id
    );
    Ok(Assertion {
        id: credential_id.clone(),
        raw_id: credential_id,
        r#type: PUBLIC_KEY_CREDENTIAL_TYPE.to_string(),
        authenticator_attachment: PLATFORM_ATTACHMENT.to_string(),
        response: AuthenticatorAssertionResponse {
            client_data_json: base64url::encode(&encoded_client_data.json),
            authenticator_data: base64url::encode(&auth_data),
            signature: base64url::encode(&signature),
            user_handle: record.user_id.clone(),
        },
        client_extension_results: ClientExtensionResults {
            prf: prf_output,
            cred_props: None,
        },
    })
}
