#![warn(clippy::pedantic)]
#![warn(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

/// Version of the passkey authenticator
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod bridge;
pub mod codec;
pub mod passkey;
pub mod settings;
pub mod utils;
pub mod webauthn;

#[cfg(feature = "testing")]
pub mod testing;

/// Re-export commonly used items
pub use bridge::{BridgeCommand, BridgeResponse};
pub use passkey::{
    AssertionOptions, PasskeyAuthenticator, RegistrationOptions, RegistrationOutcome,
    StoredPasskeyRecord, VirtualAuthenticator,
};
pub use settings::AuthenticatorSettings;
pub use webauthn::WebAuthnError;
