//! Tool configuration, read from TOML.

use std::{fs, path::Path};

use alloy_primitives::Address;
use anyhow::Context;
use erc7913_multisig::MultisigParams;
use serde::Deserialize;

#[derive(Clone, Debug, Default, Deserialize)]
pub(crate) struct ToolConfig {
    #[serde(default)]
    pub(crate) logging: LoggingConfig,

    #[serde(default)]
    pub(crate) verifiers: VerifierConfig,

    #[serde(default)]
    pub(crate) multisig: MultisigParams,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub(crate) struct LoggingConfig {
    /// Emit JSON lines instead of compact text.
    #[serde(default)]
    pub(crate) json_format: bool,
}

/// Addresses at which the built-in verifiers are deployed. Unset means not deployed.
#[derive(Clone, Debug, Default, Deserialize)]
pub(crate) struct VerifierConfig {
    pub(crate) secp256k1: Option<Address>,
    pub(crate) bip340: Option<Address>,
}

impl ToolConfig {
    /// Reads the config at `path`, or the defaults when no path is given.
    pub(crate) fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("invalid config {}", path.display()))
    }
}
