//! ECDSA over secp256k1 with an explicit public key.

use alloy_primitives::{FixedBytes, B256};
use secp256k1::{ecdsa::Signature, Message, PublicKey, SECP256K1};

use crate::{Erc7913Verifier, VerifierError, ERC7913_MAGIC_VALUE};

/// Verifies 64-byte compact ECDSA signatures for SEC1-encoded secp256k1 keys.
///
/// The key may be compressed (33 bytes) or uncompressed (65 bytes). Only low-s signatures
/// verify. A well-formed but wrong signature yields `Ok` with a zero value, not an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct Secp256k1Verifier;

impl Erc7913Verifier for Secp256k1Verifier {
    fn verify(
        &self,
        key: &[u8],
        hash: B256,
        signature: &[u8],
    ) -> Result<FixedBytes<4>, VerifierError> {
        let pubkey = PublicKey::from_slice(key)?;
        let signature = Signature::from_compact(signature)
            .map_err(|e| VerifierError::InvalidSignature(e.to_string()))?;
        let message = Message::from_digest(hash.0);

        match SECP256K1.verify_ecdsa(&message, &signature, &pubkey) {
            Ok(()) => Ok(ERC7913_MAGIC_VALUE),
            Err(_) => Ok(FixedBytes::ZERO),
        }
    }
}

#[cfg(test)]
mod tests {
    use secp256k1::SecretKey;

    use super::*;

    fn keypair(seed: u8) -> (SecretKey, PublicKey) {
        let mut sk_bytes = [0u8; 32];
        sk_bytes[31] = seed.max(1);
        let sk = SecretKey::from_slice(&sk_bytes).unwrap();
        (sk, sk.public_key(SECP256K1))
    }

    fn sign(hash: B256, sk: &SecretKey) -> [u8; 64] {
        SECP256K1
            .sign_ecdsa(&Message::from_digest(hash.0), sk)
            .serialize_compact()
    }

    #[test]
    fn test_compressed_and_uncompressed_keys() {
        let (sk, pk) = keypair(5);
        let hash = B256::repeat_byte(0x5a);
        let sig = sign(hash, &sk);

        assert_eq!(
            Secp256k1Verifier.verify(&pk.serialize(), hash, &sig),
            Ok(ERC7913_MAGIC_VALUE)
        );
        assert_eq!(
            Secp256k1Verifier.verify(&pk.serialize_uncompressed(), hash, &sig),
            Ok(ERC7913_MAGIC_VALUE)
        );
    }

    #[test]
    fn test_wrong_key_is_not_magic() {
        let (sk, _) = keypair(5);
        let (_, other) = keypair(6);
        let hash = B256::repeat_byte(0x5a);

        assert_eq!(
            Secp256k1Verifier.verify(&other.serialize(), hash, &sign(hash, &sk)),
            Ok(FixedBytes::ZERO)
        );
    }

    #[test]
    fn test_garbage_key_is_error() {
        let result = Secp256k1Verifier.verify(&[0u8; 7], B256::ZERO, &[0u8; 64]);
        assert!(matches!(result, Err(VerifierError::InvalidKey(_))));
    }
}
