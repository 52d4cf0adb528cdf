//! Authenticator data flag byte

use super::types::UserVerificationRequirement;

/// Flag byte of authenticator data
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AuthenticatorFlags(u8);

impl AuthenticatorFlags {
    /// User present
    pub const UP: u8 = 0x01;
    /// User verified
    pub const UV: u8 = 0x04;
    /// Backup eligible
    pub const BE: u8 = 0x08;
    /// Backed up
    pub const BS: u8 = 0x10;
    /// Attested credential data included
    pub const AT: u8 = 0x40;

    /// Flags for a registration: UP, AT, BE and BS always set
    #[must_use]
    pub fn registration(requirement: UserVerificationRequirement, uv_performed: bool) -> Self {
        Self(Self::UP | Self::AT | Self::BE | Self::BS)
            .with_user_verification(requirement, uv_performed)
    }

    /// Flags for an assertion: UP always set, AT never set
    #[must_use]
    pub fn assertion(
        requirement: UserVerificationRequirement,
        uv_performed: bool,
        include_backup_flags: bool,
    ) -> Self {
        let mut flags = Self(Self::UP).with_user_verification(requirement, uv_performed);
        if include_backup_flags {
            flags.0 |= Self::BE | Self::BS;
        }
        flags
    }

    /// Apply the UV bit for the given requirement
    ///
    /// `required` always sets the bit, `preferred` sets it only when the
    /// caller performed verification and `discouraged` never sets it.
    #[must_use]
    fn with_user_verification(
        mut self,
        requirement: UserVerificationRequirement,
        uv_performed: bool,
    ) -> Self {
        let verified = match requirement {
            UserVerificationRequirement::Required => true,
            UserVerificationRequirement::Preferred => uv_performed,
            UserVerificationRequirement::Discouraged => false,
        };
        if verified {
            self.0 |= Self::UV;
        }
        self
    }

    /// Raw flag byte
    #[must_use]
    pub fn bits(self) -> u8 {
        self.0
    }

    /// Whether every bit in `mask` is set
    #[must_use]
    pub fn contains(self, mask: u8) -> bool {
        self.0 & mask == mask
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use UserVerificationRequirement::{Discouraged, Preferred, Required};

    #[test]
    fn test_registration_flags() {
        assert_eq!(AuthenticatorFlags::registration(Preferred, false).bits(), 0x59);
        assert_eq!(AuthenticatorFlags::registration(Preferred, true).bits(), 0x5D);
        assert_eq!(AuthenticatorFlags::registration(Required, false).bits(), 0x5D);
        assert_eq!(AuthenticatorFlags::registration(Discouraged, true).bits(), 0x59);
    }

    #[test]
    fn test_assertion_flags() {
        assert_eq!(AuthenticatorFlags::assertion(Preferred, false, true).bits(), 0x19);
        assert_eq!(AuthenticatorFlags::assertion(Required, false, true).bits(), 0x1D);
        assert_eq!(AuthenticatorFlags::assertion(Preferred, true, false).bits(), 0x05);

        let flags = AuthenticatorFlags::assertion(Required, false, false);
        assert!(flags.contains(AuthenticatorFlags::UP));
        assert!(!flags.contains(AuthenticatorFlags::BE));
        assert!(!flags.contains(AuthenticatorFlags::BS));
        assert!(!flags.contains(AuthenticatorFlags::AT));
    }
}
