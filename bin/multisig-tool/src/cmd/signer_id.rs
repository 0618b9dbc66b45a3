use erc7913_signer::{SignerDescriptor, SignerKind};
use tracing::warn;

use super::parse_hex;
use crate::args::SubcSignerId;

pub(super) fn exec(args: SubcSignerId) -> anyhow::Result<()> {
    let signer = SignerDescriptor::new(parse_hex("signer", &args.signer)?);
    match signer.kind() {
        None => warn!(len = signer.len(), "descriptor shorter than 20 bytes never verifies"),
        Some(SignerKind::Native(account)) => println!("native account {account}"),
        Some(SignerKind::External { verifier, key }) => {
            println!("verifier {verifier}, {}-byte key", key.len())
        }
    }
    println!("{}", signer.id());
    Ok(())
}
