// Integration tests for the assertion ("get") flow
use passkey_authenticator::codec::base64url;
use passkey_authenticator::passkey::{AssertionOptions, PasskeyAuthenticator};
use passkey_authenticator::testing::constants::{
    TEST_CHALLENGE, TEST_CREDENTIAL_ID, TEST_ORIGIN, TEST_PRF_SALT, TEST_RP_ID, TEST_USER_ID,
};
use passkey_authenticator::testing::{
    assert_flags, assert_rp_id_hash, assert_signature_valid, assert_zero_sign_count, decode_b64,
    parse_client_data, GetRequestBuilder, TestFixtures,
};
use passkey_authenticator::webauthn::{prf, BinaryInput, PrfValues, UserVerificationRequirement, WebAuthnError};
use passkey_authenticator::{RegistrationOutcome, StoredPasskeyRecord};

fn assert_with(
    record: &StoredPasskeyRecord,
    builder: GetRequestBuilder,
    options: &AssertionOptions,
) -> passkey_authenticator::webauthn::Assertion {
    TestFixtures::authenticator()
        .authenticate(&builder.build(), record, options)
        .expect("assertion should succeed")
}

#[test]
fn test_assertion_signature_verifies() {
    let RegistrationOutcome { record, .. } = TestFixtures::registered_passkey();
    let assertion = assert_with(&record, GetRequestBuilder::new(), &AssertionOptions::default());
    let response = &assertion.response;

    let auth_data = decode_b64(&response.authenticator_data);
    assert_eq!(auth_data.len(), 37);
    assert_rp_id_hash(&auth_data, TEST_RP_ID);
    assert_zero_sign_count(&auth_data);

    let signature = decode_b64(&response.signature);
    assert_eq!(signature[0], 0x30);
    assert_signature_valid(
        &record.public_key,
        &auth_data,
        &decode_b64(&response.client_data_json),
        &signature,
    );
}

#[test]
fn test_client_data_for_get() {
    let RegistrationOutcome { record, .. } = TestFixtures::registered_passkey();
    let assertion = assert_with(
        &record,
        GetRequestBuilder::new().with_challenge(BinaryInput::PreEncodedText("AQID".to_string())),
        &AssertionOptions::default(),
    );
    let client_data = parse_client_data(&assertion.response.client_data_json);

    assert_eq!(client_data["type"], "webauthn.get");
    assert_eq!(client_data["challenge"], "AQID");
    assert_eq!(client_data["origin"], TEST_ORIGIN);
    assert_eq!(client_data["crossOrigin"], false);
}

#[test]
fn test_default_challenge_round_trips() {
    let RegistrationOutcome { record, .. } = TestFixtures::registered_passkey();
    let assertion = assert_with(&record, GetRequestBuilder::new(), &AssertionOptions::default());
    let client_data = parse_client_data(&assertion.response.client_data_json);
    assert_eq!(client_data["challenge"], base64url::encode(&TEST_CHALLENGE));
}

#[test]
fn test_required_uv_sets_flag_without_verification() {
    let RegistrationOutcome { record, .. } = TestFixtures::registered_passkey();
    let assertion = assert_with(
        &record,
        GetRequestBuilder::new().with_user_verification(UserVerificationRequirement::Required),
        &AssertionOptions {
            uv_performed: false,
            ..Default::default()
        },
    );
    let auth_data = decode_b64(&assertion.response.authenticator_data);
    assert_flags(&auth_data, 0x1D);
}

#[test]
fn test_backup_flags_can_be_omitted() {
    let RegistrationOutcome { record, .. } = TestFixtures::registered_passkey();
    let assertion = assert_with(
        &record,
        GetRequestBuilder::new(),
        &AssertionOptions {
            include_be_bs: Some(false),
            ..Default::default()
        },
    );
    let auth_data = decode_b64(&assertion.response.authenticator_data);
    assert_flags(&auth_data, 0x01);
}

#[test]
fn test_backup_flags_default_from_settings() {
    let RegistrationOutcome { record, .. } = TestFixtures::registered_passkey();
    let request = GetRequestBuilder::new().build();

    let assertion = TestFixtures::non_backup_authenticator()
        .authenticate(&request, &record, &AssertionOptions::default())
        .unwrap();
    assert_flags(&decode_b64(&assertion.response.authenticator_data), 0x01);

    let assertion = TestFixtures::non_backup_authenticator()
        .authenticate(
            &request,
            &record,
            &AssertionOptions {
                include_be_bs: Some(true),
                uv_performed: true,
                ..Default::default()
            },
        )
        .unwrap();
    assert_flags(&decode_b64(&assertion.response.authenticator_data), 0x1D);
}

#[test]
fn test_rp_id_from_request_wins_over_record() {
    let RegistrationOutcome { record, .. } = TestFixtures::registered_passkey();
    let assertion = assert_with(
        &record,
        GetRequestBuilder::new().with_rp_id("other.example"),
        &AssertionOptions::default(),
    );
    let auth_data = decode_b64(&assertion.response.authenticator_data);
    assert_rp_id_hash(&auth_data, "other.example");
}

#[test]
fn test_rp_id_from_origin_host() {
    let RegistrationOutcome { record, .. } = TestFixtures::registered_passkey();
    let assertion = assert_with(
        &record,
        GetRequestBuilder::new().with_origin("https://accounts.example.org:8443"),
        &AssertionOptions::default(),
    );
    let auth_data = decode_b64(&assertion.response.authenticator_data);
    assert_rp_id_hash(&auth_data, "accounts.example.org");
}

#[test]
fn test_ids_and_user_handle_come_from_record() {
    let RegistrationOutcome { record, .. } = TestFixtures::registered_passkey();
    let assertion = assert_with(&record, GetRequestBuilder::new(), &AssertionOptions::default());

    assert_eq!(assertion.id, base64url::encode(&TEST_CREDENTIAL_ID));
    assert_eq!(assertion.raw_id, assertion.id);
    assert_eq!(
        assertion.response.user_handle,
        Some(base64url::encode(TEST_USER_ID))
    );
}

#[test]
fn test_prf_is_deterministic_per_credential() {
    let RegistrationOutcome { record, credential } = TestFixtures::registered_prf_passkey();
    assert_eq!(
        credential.client_extension_results.prf.unwrap().enabled,
        Some(true)
    );

    let first = assert_with(
        &record,
        GetRequestBuilder::new().with_prf_eval(TEST_PRF_SALT, Some(b"second-salt".as_slice())),
        &AssertionOptions::default(),
    );
    let second = assert_with(
        &record,
        GetRequestBuilder::new().with_prf_eval(TEST_PRF_SALT, None),
        &AssertionOptions::default(),
    );

    let first_results = first.client_extension_results.prf.unwrap().results.unwrap();
    let second_results = second.client_extension_results.prf.unwrap().results.unwrap();
    assert_eq!(first_results.first, second_results.first);
    assert_ne!(first_results.first, first_results.second.clone().unwrap());
    assert!(second_results.second.is_none());

    let secret = record.prf_secret_bytes().unwrap().unwrap();
    assert_eq!(
        decode_b64(&first_results.first),
        prf::evaluate(&secret, TEST_PRF_SALT).unwrap()
    );
}

#[test]
fn test_prf_option_salts_override_request() {
    let RegistrationOutcome { record, .. } = TestFixtures::registered_prf_passkey();
    let assertion = assert_with(
        &record,
        GetRequestBuilder::new().with_prf_eval(b"from-request", None),
        &AssertionOptions {
            prf_eval: Some(PrfValues {
                first: BinaryInput::Bytes(b"from-options".to_vec()),
                second: None,
            }),
            ..Default::default()
        },
    );

    let secret = record.prf_secret_bytes().unwrap().unwrap();
    let results = assertion.client_extension_results.prf.unwrap().results.unwrap();
    assert_eq!(
        decode_b64(&results.first),
        prf::evaluate(&secret, b"from-options").unwrap()
    );
}

#[test]
fn test_prf_without_secret_is_omitted() {
    let RegistrationOutcome { record, .. } = TestFixtures::registered_passkey();
    let assertion = assert_with(
        &record,
        GetRequestBuilder::new().with_prf_eval(TEST_PRF_SALT, None),
        &AssertionOptions::default(),
    );
    assert!(assertion.client_extension_results.prf.is_none());
}

#[test]
fn test_record_survives_json_round_trip() {
    let RegistrationOutcome { record, .. } = TestFixtures::registered_prf_passkey();
    let json = serde_json::to_string(&record).unwrap();
    let restored: StoredPasskeyRecord = serde_json::from_str(&json).unwrap();

    let assertion = assert_with(&restored, GetRequestBuilder::new(), &AssertionOptions::default());
    assert_signature_valid(
        &record.public_key,
        &decode_b64(&assertion.response.authenticator_data),
        &decode_b64(&assertion.response.client_data_json),
        &decode_b64(&assertion.response.signature),
    );
}

#[test]
fn test_mismatched_record_is_unusable() {
    let RegistrationOutcome { mut record, .. } = TestFixtures::registered_passkey();
    record.public_key = TestFixtures::registered_passkey().record.public_key;

    let result = TestFixtures::authenticator().authenticate(
        &GetRequestBuilder::new().build(),
        &record,
        &AssertionOptions::default(),
    );
    assert!(matches!(result, Err(WebAuthnError::RecordUnusable(_))));
}
