//! Fluent builders for creating customizable test requests
//!
//! Every builder starts from a valid request for the default origin.

use crate::webauthn::{
    AttestationConveyancePreference, AuthenticatorSelectionCriteria, BinaryInput, CreateRequest,
    ExtensionInputs, GetRequest, PrfExtensionInput, PrfValues, PublicKeyCredentialCreationOptions,
    PublicKeyCredentialParameters, PublicKeyCredentialRequestOptions, RelyingParty, UserEntity,
    UserVerificationRequirement, PUBLIC_KEY_CREDENTIAL_TYPE,
};

use super::constants::{
    TEST_CHALLENGE, TEST_ORIGIN, TEST_RP_NAME, TEST_USER_DISPLAY_NAME, TEST_USER_ID,
    TEST_USER_NAME,
};

/// Builder for `create` requests
pub struct CreateRequestBuilder {
    origin: String,
    request_id: Option<String>,
    rp_id: Option<String>,
    user_id: Option<BinaryInput>,
    challenge: BinaryInput,
    algorithms: Option<Vec<i64>>,
    attestation: AttestationConveyancePreference,
    user_verification: Option<UserVerificationRequirement>,
    extensions: Option<ExtensionInputs>,
}

impl CreateRequestBuilder {
    /// Create a new builder with defaults
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: TEST_ORIGIN.to_string(),
            request_id: Some("test-request".to_string()),
            rp_id: None,
            user_id: Some(BinaryInput::Bytes(TEST_USER_ID.to_vec())),
            challenge: BinaryInput::Bytes(TEST_CHALLENGE.to_vec()),
            algorithms: Some(vec![-7]),
            attestation: AttestationConveyancePreference::None,
            user_verification: None,
            extensions: None,
        }
    }

    /// Set the page origin
    #[must_use]
    pub fn with_origin(mut self, origin: &str) -> Self {
        self.origin = origin.to_string();
        self
    }

    /// Set an explicit relying party id
    #[must_use]
    pub fn with_rp_id(mut self, rp_id: &str) -> Self {
        self.rp_id = Some(rp_id.to_string());
        self
    }

    /// Set the user handle
    #[must_use]
    pub fn with_user_id(mut self, user_id: BinaryInput) -> Self {
        self.user_id = Some(user_id);
        self
    }

    /// Set the challenge
    #[must_use]
    pub fn with_challenge(mut self, challenge: BinaryInput) -> Self {
        self.challenge = challenge;
        self
    }

    /// Set the requested algorithms; `None` omits `pubKeyCredParams`
    #[must_use]
    pub fn with_algorithms(mut self, algorithms: Option<Vec<i64>>) -> Self {
        self.algorithms = algorithms;
        self
    }

    /// Set the attestation preference
    #[must_use]
    pub fn with_attestation(mut self, attestation: AttestationConveyancePreference) -> Self {
        self.attestation = attestation;
        self
    }

    /// Set the user verification requirement
    #[must_use]
    pub fn with_user_verification(mut self, requirement: UserVerificationRequirement) -> Self {
        self.user_verification = Some(requirement);
        self
    }

    /// Request PRF without salts
    #[must_use]
    pub fn with_prf(mut self) -> Self {
        self.extensions.get_or_insert_with(ExtensionInputs::default).prf =
            Some(PrfExtensionInput::default());
        self
    }

    /// Request PRF with salts to evaluate
    #[must_use]
    pub fn with_prf_eval(mut self, first: &[u8], second: Option<&[u8]>) -> Self {
        self.extensions.get_or_insert_with(ExtensionInputs::default).prf =
            Some(PrfExtensionInput {
                eval: Some(prf_values(first, second)),
            });
        self
    }

    /// Request the credProps extension
    #[must_use]
    pub fn with_cred_props(mut self) -> Self {
        self.extensions
            .get_or_insert_with(ExtensionInputs::default)
            .cred_props = Some(true);
        self
    }

    /// Build the request
    #[must_use]
    pub fn build(self) -> CreateRequest {
        CreateRequest {
            origin: self.origin,
            request_id: self.request_id,
            public_key: PublicKeyCredentialCreationOptions {
                rp: Some(RelyingParty {
                    id: self.rp_id,
                    name: Some(TEST_RP_NAME.to_string()),
                }),
                user: Some(UserEntity {
                    id: self.user_id,
                    name: Some(TEST_USER_NAME.to_string()),
                    display_name: Some(TEST_USER_DISPLAY_NAME.to_string()),
                }),
                challenge: self.challenge,
                pub_key_cred_params: self.algorithms.map(|algs| {
                    algs.into_iter()
                        .map(|alg| PublicKeyCredentialParameters {
                            r#type: PUBLIC_KEY_CREDENTIAL_TYPE.to_string(),
                            alg,
                        })
                        .collect()
                }),
                timeout: Some(60_000),
                attestation: self.attestation,
                authenticator_selection: self.user_verification.map(|requirement| {
                    AuthenticatorSelectionCriteria {
                        user_verification: Some(requirement),
                        ..Default::default()
                    }
                }),
                extensions: self.extensions,
            },
        }
    }
}

impl Default for CreateRequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `get` requests
pub struct GetRequestBuilder {
    origin: String,
    rp_id: Option<String>,
    challenge: BinaryInput,
    user_verification: Option<UserVerificationRequirement>,
    extensions: Option<ExtensionInputs>,
}

impl GetRequestBuilder {
    /// Create a new builder with defaults
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: TEST_ORIGIN.to_string(),
            rp_id: None,
            challenge: BinaryInput::Bytes(TEST_CHALLENGE.to_vec()),
            user_verification: None,
            extensions: None,
        }
    }

    /// Set the page origin
    #[must_use]
    pub fn with_origin(mut self, origin: &str) -> Self {
        self.origin = origin.to_string();
        self
    }

    /// Set an explicit relying party id
    #[must_use]
    pub fn with_rp_id(mut self, rp_id: &str) -> Self {
        self.rp_id = Some(rp_id.to_string());
        self
    }

    /// Set the challenge
    #[must_use]
    pub fn with_challenge(mut self, challenge: BinaryInput) -> Self {
        self.challenge = challenge;
        self
    }

    /// Set the user verification requirement
    #[must_use]
    pub fn with_user_verification(mut self, requirement: UserVerificationRequirement) -> Self {
        self.user_verification = Some(requirement);
        self
    }

    /// Request PRF evaluation with the given salts
    #[must_use]
    pub fn with_prf_eval(mut self, first: &[u8], second: Option<&[u8]>) -> Self {
        self.extensions = Some(ExtensionInputs {
            prf: Some(PrfExtensionInput {
                eval: Some(prf_values(first, second)),
            }),
            cred_props: None,
        });
        self
    }

    /// Build the request
    #[must_use]
    pub fn build(self) -> GetRequest {
        GetRequest {
            origin: self.origin,
            request_id: Some("test-request".to_string()),
            public_key: PublicKeyCredentialRequestOptions {
                rp_id: self.rp_id,
                challenge: self.challenge,
                timeout: Some(60_000),
                user_verification: self.user_verification,
                extensions: self.extensions,
            },
        }
    }
}

impl Default for GetRequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn prf_values(first: &[u8], second: Option<&[u8]>) -> PrfValues {
    PrfValues {
        first: BinaryInput::Bytes(first.to_vec()),
        second: second.map(|s| BinaryInput::Bytes(s.to_vec())),
    }
}
