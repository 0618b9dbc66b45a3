//! BIP-340 Schnorr signatures over secp256k1.

use alloy_primitives::{FixedBytes, B256};
use secp256k1::{schnorr::Signature, Message, XOnlyPublicKey, SECP256K1};

use crate::{Erc7913Verifier, VerifierError, ERC7913_MAGIC_VALUE};

/// Verifies 64-byte BIP-340 signatures for 32-byte x-only keys.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bip340Verifier;

impl Erc7913Verifier for Bip340Verifier {
    fn verify(
        &self,
        key: &[u8],
        hash: B256,
        signature: &[u8],
    ) -> Result<FixedBytes<4>, VerifierError> {
        let pubkey = XOnlyPublicKey::from_slice(key)?;
        let signature = Signature::from_slice(signature)
            .map_err(|e| VerifierError::InvalidSignature(e.to_string()))?;
        let message = Message::from_digest(hash.0);

        match SECP256K1.verify_schnorr(&signature, &message, &pubkey) {
            Ok(()) => Ok(ERC7913_MAGIC_VALUE),
            Err(_) => Ok(FixedBytes::ZERO),
        }
    }
}
