//! Testing utilities for the passkey authenticator
//!
//! ## Organization
//!
//! - [`fixtures`] - Pre-built settings, authenticators and registered passkeys
//! - [`builders`] - Fluent builders for `create` and `get` requests
//! - [`assertions`] - Decoding and verification helpers for engine output
//!
//! ## Usage
//!
//! ```rust
//! use passkey_authenticator::testing::{builders::CreateRequestBuilder, fixtures::TestFixtures};
//! use passkey_authenticator::PasskeyAuthenticator;
//!
//! let request = CreateRequestBuilder::new().with_prf().build();
//! let outcome = TestFixtures::authenticator()
//!     .register(&request, &[7; 16], &Default::default())
//!     .unwrap();
//! assert!(outcome.record.prf_secret.is_some());
//! ```

pub mod assertions;
pub mod builders;
pub mod fixtures;

// Re-export commonly used items for convenience
pub use assertions::*;
pub use builders::*;
pub use fixtures::TestFixtures;

/// Common test constants
pub mod constants {
    /// Default page origin
    pub const TEST_ORIGIN: &str = "https://example.com";

    /// Relying party id derived from [`TEST_ORIGIN`]
    pub const TEST_RP_ID: &str = "example.com";

    /// Default relying party display name
    pub const TEST_RP_NAME: &str = "Example";

    /// Default user handle
    pub const TEST_USER_ID: &[u8] = b"user-1234";

    /// Default user name
    pub const TEST_USER_NAME: &str = "test@example.com";

    /// Default user display name
    pub const TEST_USER_DISPLAY_NAME: &str = "Test User";

    /// Default challenge
    pub const TEST_CHALLENGE: [u8; 32] = [0x5A; 32];

    /// Default credential id
    pub const TEST_CREDENTIAL_ID: [u8; 16] = [
        0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0A, 0x0B, 0x0C, 0x0D, 0x0E,
        0x0F,
    ];

    /// Default PRF salt
    pub const TEST_PRF_SALT: &[u8] = b"test-prf-salt";
}
