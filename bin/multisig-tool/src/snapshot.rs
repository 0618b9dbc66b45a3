//! JSON snapshots of account configurations.

use std::{fs, path::Path};

use alloy_primitives::Address;
use anyhow::Context;
use erc7913_multisig::InstallData;
use erc7913_signer::SignerDescriptor;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Snapshot {
    pub(crate) accounts: Vec<AccountSnapshot>,
}

/// One account as it would be installed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct AccountSnapshot {
    pub(crate) account: Address,
    pub(crate) signers: Vec<SignerDescriptor>,
    pub(crate) threshold: u64,

    /// Parallel to `signers`. Every signer weighs 1 when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) weights: Option<Vec<u64>>,
}

impl Snapshot {
    pub(crate) fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read snapshot {}", path.display()))?;
        serde_json::from_str(&raw).with_context(|| format!("invalid snapshot {}", path.display()))
    }
}

impl AccountSnapshot {
    /// Weighted install payload for this account.
    pub(crate) fn install_data(&self) -> InstallData {
        InstallData {
            signers: self.signers.clone(),
            threshold: self.threshold,
            weights: Some(
                self.weights
                    .clone()
                    .unwrap_or_else(|| vec![1; self.signers.len()]),
            ),
        }
    }
}
