//! Subcommand handlers.

mod encode;
mod signer_id;
mod verify;

use anyhow::Context;

use crate::{args::Subcommand, config::ToolConfig};

pub(crate) fn exec_subc(subc: Subcommand, config: &ToolConfig) -> anyhow::Result<()> {
    match subc {
        Subcommand::SignerId(args) => signer_id::exec(args),
        Subcommand::EncodeSignature(args) => encode::exec(args),
        Subcommand::Verify(args) => verify::exec(args, config),
    }
}

/// Decodes hex with or without a `0x` prefix.
fn parse_hex(what: &str, s: &str) -> anyhow::Result<Vec<u8>> {
    let s = s.trim();
    hex::decode(s.strip_prefix("0x").unwrap_or(s)).with_context(|| format!("invalid hex {what}"))
}
