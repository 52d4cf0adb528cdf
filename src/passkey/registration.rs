//! Registration ("create")
//!
//! Generates a fresh ES256 credential, builds the attestation object and
//! returns both the relying-party facing credential and the record the
//! caller must persist.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::record::StoredPasskeyRecord;
use super::relying_party::resolve_rp_id;
use super::settings::PasskeySettings;
use crate::codec::base64url;
use crate::codec::cbor::COSE_ALG_ES256;
use crate::webauthn::attestation::{build_attestation_object, AttestationFormat};
use crate::webauthn::authenticator_data::{AttestedCredentialData, AuthenticatorData};
use crate::webauthn::client_data::{ClientDataType, CollectedClientData, EncodedClientData};
use crate::webauthn::keys::CredentialKeyPair;
use crate::webauthn::{
    prf, AuthenticatorAttestationResponse, AuthenticatorFlags, ClientExtensionResults,
    CreateRequest, Credential, CredentialPropertiesOutput, PrfExtensionOutput, PrfValues,
    PublicKeyCredentialParameters, WebAuthnError, PLATFORM_ATTACHMENT,
    PUBLIC_KEY_CREDENTIAL_TYPE,
};

/// Transports reported for new credentials
const TRANSPORTS: &[&str] = &["internal"];

/// Caller supplied options for a registration
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(default)]
pub struct RegistrationOptions {
    /// Whether the host actually verified the user
    #[serde(rename = "uvPerformed")]
    pub uv_performed: bool,
    /// Provision a PRF secret for the new credential
    #[serde(rename = "enablePrf")]
    pub enable_prf: bool,
    /// Salts to evaluate immediately against the new PRF secret
    #[serde(rename = "prfEval")]
    pub prf_eval: Option<PrfValues>,
}

/// Result of a registration
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct RegistrationOutcome {
    pub credential: Credential,
    pub record: StoredPasskeyRecord,
}

/// Fail unless ES256 is acceptable
///
/// A missing or empty parameter list means the caller expressed no
/// preference and ES256 is used.
fn ensure_es256(params: Option<&[PublicKeyCredentialParameters]>) -> Result<(), WebAuthnError> {
    let Some(params) = params.filter(|p| !p.is_empty()) else {
        return Ok(());
    };
    let supported = params
        .iter()
        .any(|p| p.alg == COSE_ALG_ES256 && p.r#type == PUBLIC_KEY_CREDENTIAL_TYPE);
    if supported {
        Ok(())
    } else {
        Err(WebAuthnError::UnsupportedAlgorithm(
            params.iter().map(|p| p.alg).collect(),
        ))
    }
}

/// Register a new passkey
///
/// # Errors
/// Returns an error if:
/// - ES256 is not among the requested algorithms
/// - The relying party id cannot be resolved
/// - The challenge, user id or PRF salts are malformed pre-encoded text
/// - The credential id is empty or too long
/// - A cryptographic primitive fails
pub fn register(
    settings: &PasskeySettings,
    request: &CreateRequest,
    credential_id: &[u8],
    options: &RegistrationOptions,
) -> Result<RegistrationOutcome, WebAuthnError> {
    let public_key = &request.public_key;

    // 1. Algorithm
    ensure_es256(public_key.pub_key_cred_params.as_deref())?;

    // 2. Relying party
    let explicit_rp_id = public_key.rp.as_ref().and_then(|rp| rp.id.as_deref());
    let rp_id = resolve_rp_id(explicit_rp_id, &request.origin)?;
    debug!(
        "Creating passkey for rp {rp_id} (request {:?})",
        request.request_id
    );

    // 3. Key pair and attested credential data
    let key_pair = CredentialKeyPair::generate();
    let attested = AttestedCredentialData::new(credential_id, key_pair.cose_public_key())?;

    // 4. Flags
    let requirement = public_key
        .authenticator_selection
        .as_ref()
        .and_then(|s| s.user_verification)
        .unwrap_or(settings.default_user_verification);
    let flags = AuthenticatorFlags::registration(requirement, options.uv_performed);

    // 5. Client data
    let challenge = public_key.challenge.to_base64url()?;
    let client_data = CollectedClientData::new(ClientDataType::Create, challenge, &request.origin);
    let encoded_client_data = EncodedClientData::try_from(&client_data)?;

    // 6. Authenticator data and attestation object
    let auth_data = AuthenticatorData::for_registration(&rp_id, flags, attested).to_bytes();
    let format = AttestationFormat::for_preference(public_key.attestation);
    let attestation_object =
        build_attestation_object(format, &auth_data, &encoded_client_data.hash, &key_pair)?;
    debug!("Built {} attestation, flags {:#04x}", format.as_str(), flags.bits());

    // 7. Extensions
    let extensions = public_key.extensions.as_ref();
    let prf_requested = options.enable_prf || extensions.is_some_and(|e| e.prf.is_some());
    let (prf_secret, prf_output) = if prf_requested {
        let secret = prf::generate_secret()?;
        let salts = options.prf_eval.as_ref().or_else(|| {
            extensions
                .and_then(|e| e.prf.as_ref())
                .and_then(|p| p.eval.as_ref())
        });
        let results = salts
            .map(|values| prf::evaluate_values(&secret, values))
            .transpose()?;
        let output = PrfExtensionOutput {
            enabled: Some(true),
            results,
        };
        (Some(base64url::encode(&secret)), Some(output))
    } else {
        (None, None)
    };
    let cred_props = extensions
        .and_then(|e| e.cred_props)
        .filter(|requested| *requested)
        .map(|_| CredentialPropertiesOutput { rk: true });

    // 8. Record and credential
    let user = public_key.user.as_ref();
    let user_id = user
        .and_then(|u| u.id.as_ref())
        .map(crate::webauthn::BinaryInput::to_base64url)
        .transpose()?;
    let credential_id_b64 = base64url::encode(credential_id);

    let record = StoredPasskeyRecord {
        rp_id: rp_id.clone(),
        credential_id: credential_id_b64.clone(),
        public_key: key_pair.public_jwk(),
        private_key: key_pair.private_jwk(),
        user_id,
        user_name: user.and_then(|u| u.name.clone()),
        user_display_name: user.and_then(|u| u.display_name.clone()),
        prf_secret,
    };

    let credential = Credential {
        id: credential_id_b64.clone(),
        raw_id: credential_id_b64,
        r#type: PUBLIC_KEY_CREDENTIAL_TYPE.to_string(),
        authenticator_attachment: PLATFORM_ATTACHMENT.to_string(),
        response: AuthenticatorAttestationResponse {
            client_data_json: base64url::encode(&encoded_client_data.json),
            attestation_object: base64url::encode(&attestation_object),
            authenticator_data: base64url::encode(&auth_data),
            public_key: base64url::encode(&key_pair.public_key_der()?),
            public_key_algorithm: COSE_ALG_ES256,
            transports: TRANSPORTS.iter().map(ToString::to_string).collect(),
        },
        client_extension_results: ClientExtensionResults {
            prf: prf_output,
            cred_props,
        },
    };

    info!(
        "Registered passkey for rp {rp_id} (request {:?}, prf {})",
        request.request_id,
        record.prf_secret.is_some()
    );
    Ok(RegistrationOutcome { credential, record })
}
