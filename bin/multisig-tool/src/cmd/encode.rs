use alloy_primitives::Bytes;
use anyhow::Context;
use erc7913_multisig::encode_multisig_signature;
use erc7913_signer::{sort_by_signer_id, SignerDescriptor};
use tracing::debug;

use super::parse_hex;
use crate::args::SubcEncodeSignature;

pub(super) fn exec(args: SubcEncodeSignature) -> anyhow::Result<()> {
    let blob = encode_pairs(&args.pair)?;
    println!("0x{}", hex::encode(blob));
    Ok(())
}

/// Parses `<signer>:<signature>` pairs, sorts them by signer id, and encodes the blob.
fn encode_pairs(pairs: &[String]) -> anyhow::Result<Vec<u8>> {
    let mut parsed = pairs
        .iter()
        .map(|pair| {
            let (signer, signature) = pair
                .split_once(':')
                .with_context(|| format!("expected <signer>:<signature>, got {pair}"))?;
            Ok((
                SignerDescriptor::new(parse_hex("signer", signer)?),
                Bytes::from(parse_hex("signature", signature)?),
            ))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    sort_by_signer_id(&mut parsed);
    debug!(count = parsed.len(), "encoding sorted pairs");

    let (signers, signatures): (Vec<_>, Vec<_>) = parsed.into_iter().unzip();
    Ok(encode_multisig_signature(&signers, &signatures))
}
