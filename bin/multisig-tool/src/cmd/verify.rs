use std::str::FromStr;

use alloy_primitives::{Address, B256};
use anyhow::{ensure, Context};
use erc7913_multisig::WeightedMultisig;
use erc7913_signer::{
    schemes::{Bip340Verifier, Secp256k1Verifier},
    VerifierRegistry,
};
use tracing::info;

use super::parse_hex;
use crate::{
    args::SubcVerify,
    config::{ToolConfig, VerifierConfig},
    snapshot::Snapshot,
};

pub(super) fn exec(args: SubcVerify, config: &ToolConfig) -> anyhow::Result<()> {
    let snapshot = Snapshot::load(&args.snapshot)?;
    let account = Address::from_str(args.account.trim()).context("invalid account address")?;
    let hash = parse_hex("hash", &args.hash)?;
    ensure!(hash.len() == 32, "hash must be 32 bytes, got {}", hash.len());
    let blob = parse_hex("signature", &args.signature)?;

    let valid = verify_snapshot(&snapshot, config, account, B256::from_slice(&hash), &blob)?;
    info!(%account, valid, "verified multisignature");
    println!("{}", if valid { "valid" } else { "invalid" });
    Ok(())
}

fn registry(verifiers: &VerifierConfig) -> VerifierRegistry {
    let mut registry = VerifierRegistry::new();
    if let Some(address) = verifiers.secp256k1 {
        registry.register_verifier(address, Secp256k1Verifier);
    }
    if let Some(address) = verifiers.bip340 {
        registry.register_verifier(address, Bip340Verifier);
    }
    registry
}

/// Installs every snapshot account and checks `blob` for `account`.
fn verify_snapshot(
    snapshot: &Snapshot,
    config: &ToolConfig,
    account: Address,
    hash: B256,
    blob: &[u8],
) -> anyhow::Result<bool> {
    let mut module = WeightedMultisig::new(config.multisig);
    for entry in &snapshot.accounts {
        module
            .on_install(entry.account, &entry.install_data().abi_encode())
            .with_context(|| format!("invalid configuration for {}", entry.account))?;
    }
    ensure!(
        module.is_initialized(account),
        "account {account} is not in the snapshot"
    );

    let env = registry(&config.verifiers);
    Ok(module.is_valid_multisig_signature(&env, account, hash, blob))
}
