use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::passkey::PasskeySettings;
use crate::webauthn::UserVerificationRequirement;

/// Name of the settings file looked up in each config location
pub const SETTINGS_FILE: &str = "Settings.toml";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AuthenticatorSettings {
    pub authenticator: PasskeySettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl AuthenticatorSettings {
    /// Load settings from configuration files and environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Settings file cannot be read or parsed
    /// - TOML parsing fails
    /// - The resulting settings are invalid
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        // Load .env before anything reads the environment
        Self::load_env_file();

        // Load base settings from TOML or defaults
        let mut settings = Self::load_base_settings()?;

        // Apply environment variable overrides
        Self::apply_env_overrides(&mut settings);

        settings.authenticator.validate()?;
        Ok(settings)
    }

    /// Parse settings from TOML text, filling missing values with defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed.
    pub fn from_toml_str(content: &str) -> Result<Self, basic_toml::Error> {
        basic_toml::from_str(content)
    }

    /// Initialize `env_logger` at the configured level, writing to stderr
    ///
    /// # Errors
    ///
    /// Returns an error if a logger is already installed
    pub fn init_logging(&self) -> Result<(), log::SetLoggerError> {
        env_logger::Builder::new()
            .parse_filters(&self.logging.level)
            .target(env_logger::Target::Stderr)
            .try_init()
    }

    /// Load base settings from TOML file(s) or use defaults
    /// Settings are loaded with the following priority (highest to lowest):
    /// 1. Environment variables (applied separately after loading base settings)
    /// 2. Settings.toml in `PASSKEY_CONFIG_DIR` (if specified and exists)
    /// 3. Settings.toml in current directory (if exists)
    /// 4. Default settings
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Settings file cannot be read
    /// - TOML parsing fails
    fn load_base_settings() -> Result<Self, Box<dyn std::error::Error>> {
        let mut settings = Self::default();

        if let Some(local) = Self::read_settings_file(Path::new("."))? {
            settings = local;
        }

        // The config directory replaces, not merges with, the local file
        if let Ok(config_dir) = std::env::var("PASSKEY_CONFIG_DIR") {
            match Self::read_settings_file(Path::new(&config_dir))? {
                Some(overriding) => settings = overriding,
                None => eprintln!(
                    "ℹ PASSKEY_CONFIG_DIR set but no {SETTINGS_FILE} found in: {config_dir}"
                ),
            }
        }

        Ok(settings)
    }

    /// Read `Settings.toml` from `dir`, if present
    fn read_settings_file(dir: &Path) -> Result<Option<Self>, Box<dyn std::error::Error>> {
        let path = dir.join(SETTINGS_FILE);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)?;
        let settings = Self::from_toml_str(&content)?;
        eprintln!("✓ Loaded settings from {}", path.display());
        Ok(Some(settings))
    }

    /// Apply environment variable overrides to settings
    fn apply_env_overrides(settings: &mut Self) {
        Self::apply_authenticator_env_overrides(&mut settings.authenticator);
        Self::apply_logging_env_overrides(&mut settings.logging);
    }

    /// Apply environment overrides for authenticator settings
    pub fn apply_authenticator_env_overrides(passkey_settings: &mut PasskeySettings) {
        Self::apply_parsed_env_override(
            "PASSKEY_CREDENTIAL_ID_LENGTH",
            &mut passkey_settings.credential_id_length,
        );
        Self::apply_parsed_env_override(
            "PASSKEY_BACKUP_ELIGIBLE",
            &mut passkey_settings.backup_eligible,
        );
        if let Ok(value) = std::env::var("PASSKEY_USER_VERIFICATION") {
            if let Some(requirement) = Self::parse_user_verification(&value) {
                passkey_settings.default_user_verification = requirement;
            }
        }
    }

    /// Apply environment overrides for logging settings
    fn apply_logging_env_overrides(logging_settings: &mut LoggingSettings) {
        if let Ok(log_level) = std::env::var("RUST_LOG") {
            logging_settings.level = log_level;
        }
    }

    /// Helper function to apply parsed environment variable overrides
    fn apply_parsed_env_override<T: std::str::FromStr>(env_var: &str, target: &mut T) {
        if let Ok(value_str) = std::env::var(env_var) {
            if let Ok(value) = value_str.trim().parse::<T>() {
                *target = value;
            }
        }
    }

    fn parse_user_verification(value: &str) -> Option<UserVerificationRequirement> {
        match value.trim().to_ascii_lowercase().as_str() {
            "required" => Some(UserVerificationRequirement::Required),
            "preferred" => Some(UserVerificationRequirement::Preferred),
            "discouraged" => Some(UserVerificationRequirement::Discouraged),
            _ => None,
        }
    }

    /// Load environment variables from .env file
    fn load_env_file() {
        if let Ok(contents) = std::fs::read_to_string(".env") {
            for line in contents.lines() {
                if line.trim_start().starts_with('#') {
                    continue;
                }
                if let Some((key, value)) = line.split_once('=') {
                    std::env::set_var(key.trim(), value.trim());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    // Helper function to clean all relevant environment variables for tests
    fn clean_env_vars() {
        std::env::remove_var("PASSKEY_CREDENTIAL_ID_LENGTH");
        std::env::remove_var("PASSKEY_BACKUP_ELIGIBLE");
        std::env::remove_var("PASSKEY_USER_VERIFICATION");
        std::env::remove_var("PASSKEY_CONFIG_DIR");
        std::env::remove_var("RUST_LOG");
    }

    #[test]
    fn test_defaults() {
        let settings = AuthenticatorSettings::default();
        assert_eq!(settings.authenticator.credential_id_length, 16);
        assert!(settings.authenticator.backup_eligible);
        assert_eq!(settings.logging.level, "info");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let settings = AuthenticatorSettings::from_toml_str(
            "[authenticator]\ndefault_user_verification = \"required\"\n",
        )
        .unwrap();

        assert_eq!(
            settings.authenticator.default_user_verification,
            UserVerificationRequirement::Required
        );
        assert_eq!(settings.authenticator.credential_id_length, 16);
        assert_eq!(settings.logging.level, "info");
    }

    #[test]
    #[serial]
    fn test_authenticator_env_overrides() {
        clean_env_vars();

        let mut passkey_settings = PasskeySettings::default();
        std::env::set_var("PASSKEY_CREDENTIAL_ID_LENGTH", "32");
        std::env::set_var("PASSKEY_BACKUP_ELIGIBLE", "false");
        std::env::set_var("PASSKEY_USER_VERIFICATION", "Discouraged");

        AuthenticatorSettings::apply_authenticator_env_overrides(&mut passkey_settings);

        assert_eq!(passkey_settings.credential_id_length, 32);
        assert!(!passkey_settings.backup_eligible);
        assert_eq!(
            passkey_settings.default_user_verification,
            UserVerificationRequirement::Discouraged
        );

        clean_env_vars();
    }

    #[test]
    #[serial]
    fn test_invalid_env_values_are_ignored() {
        clean_env_vars();

        let mut passkey_settings = PasskeySettings::default();
        std::env::set_var("PASSKEY_CREDENTIAL_ID_LENGTH", "many");
        std::env::set_var("PASSKEY_USER_VERIFICATION", "sometimes");

        AuthenticatorSettings::apply_authenticator_env_overrides(&mut passkey_settings);

        assert_eq!(passkey_settings.credential_id_length, 16);
        assert_eq!(
            passkey_settings.default_user_verification,
            UserVerificationRequirement::Preferred
        );

        clean_env_vars();
    }

    #[test]
    #[serial]
    fn test_config_dir_settings() {
        clean_env_vars();

        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(SETTINGS_FILE),
            "[authenticator]\ncredential_id_length = 48\n\n[logging]\nlevel = \"debug\"\n",
        )
        .unwrap();
        std::env::set_var("PASSKEY_CONFIG_DIR", dir.path());

        let settings = AuthenticatorSettings::load().unwrap();
        assert_eq!(settings.authenticator.credential_id_length, 48);
        assert_eq!(settings.logging.level, "debug");

        std::env::set_var("RUST_LOG", "warn");
        let settings = AuthenticatorSettings::load().unwrap();
        assert_eq!(settings.logging.level, "warn");

        clean_env_vars();
    }

    #[test]
    #[serial]
    fn test_invalid_settings_fail_to_load() {
        clean_env_vars();

        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(SETTINGS_FILE),
            "[authenticator]\ncredential_id_length = 4\n",
        )
        .unwrap();
        std::env::set_var("PASSKEY_CONFIG_DIR", dir.path());

        assert!(AuthenticatorSettings::load().is_err());

        clean_env_vars();
    }
}
