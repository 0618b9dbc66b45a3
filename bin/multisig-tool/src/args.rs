//! Command line arguments for the `multisig-tool` binary.

use std::path::PathBuf;

use argh::FromArgs;

/// Args.
#[derive(FromArgs)]
pub(crate) struct Args {
    #[argh(option, description = "path to a TOML config file", short = 'c')]
    pub(crate) config: Option<PathBuf>,

    #[argh(subcommand)]
    pub(crate) subc: Subcommand,
}

#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand)]
pub(crate) enum Subcommand {
    SignerId(SubcSignerId),
    EncodeSignature(SubcEncodeSignature),
    Verify(SubcVerify),
}

/// Print the canonical id of a signer descriptor.
#[derive(FromArgs, PartialEq, Debug)]
#[argh(
    subcommand,
    name = "signer-id",
    description = "prints keccak256 of a hex signer descriptor"
)]
pub(crate) struct SubcSignerId {
    #[argh(positional, description = "signer descriptor, hex")]
    pub(crate) signer: String,
}

/// Build a multisignature blob from signer/signature pairs.
#[derive(FromArgs, PartialEq, Debug)]
#[argh(
    subcommand,
    name = "encode-signature",
    description = "sorts signer:signature pairs by signer id and ABI-encodes them"
)]
pub(crate) struct SubcEncodeSignature {
    #[argh(
        option,
        description = "a signer and its signature as <signer hex>:<signature hex>, repeatable",
        short = 'p'
    )]
    pub(crate) pair: Vec<String>,
}

/// Check a multisignature against a snapshot of account configurations.
#[derive(FromArgs, PartialEq, Debug)]
#[argh(
    subcommand,
    name = "verify",
    description = "verifies a multisignature blob for an account in a JSON snapshot"
)]
pub(crate) struct SubcVerify {
    #[argh(option, description = "path to the JSON account snapshot", short = 's')]
    pub(crate) snapshot: PathBuf,

    #[argh(option, description = "account address", short = 'a')]
    pub(crate) account: String,

    #[argh(option, description = "signed 32-byte hash, hex")]
    pub(crate) hash: String,

    #[argh(option, description = "multisignature blob, hex")]
    pub(crate) signature: String,
}
