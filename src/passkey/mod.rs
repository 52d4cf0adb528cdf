//! Passkey engine
//!
//! This module ties the `WebAuthn` building blocks together into the
//! registration and assertion flows of a virtual platform authenticator.

// Core settings
mod settings;
pub use settings::{PasskeySettings, MIN_CREDENTIAL_ID_LEN};

// Stored credential state
mod record;
pub use record::StoredPasskeyRecord;

// Flows
pub mod assertion;
pub mod registration;
mod relying_party;
pub use assertion::AssertionOptions;
pub use registration::{RegistrationOptions, RegistrationOutcome};
pub use relying_party::resolve_rp_id;

// Service layer
mod service;
pub use service::{PasskeyAuthenticator, VirtualAuthenticator};
