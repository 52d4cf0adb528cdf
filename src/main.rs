#![warn(clippy::pedantic)]
#![warn(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::io::{Read, Write};

use anyhow::Context;
use log::info;
use passkey_authenticator::{bridge, AuthenticatorSettings, VirtualAuthenticator, VERSION};

fn main() -> anyhow::Result<()> {
    // Load configuration from Settings.toml and environment variables
    let settings = AuthenticatorSettings::load()
        .map_err(|e| anyhow::anyhow!("Failed to load settings: {e}"))?;
    settings
        .init_logging()
        .context("Failed to initialize logging")?;
    info!("passkey-authenticator {VERSION}");

    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("Failed to read command from stdin")?;

    let authenticator = VirtualAuthenticator::new(settings.authenticator);
    let output = bridge::handle_json(&authenticator, &input, || {
        authenticator.generate_credential_id()
    })?;

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{output}").context("Failed to write result to stdout")?;
    Ok(())
}
