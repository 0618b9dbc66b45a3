//! Deterministic keys and mock verifiers for tests.

use alloy_primitives::{address, keccak256, Address, FixedBytes, B256};
use secp256k1::{Keypair, Message, SecretKey, SECP256K1};

use crate::{
    schemes::{Bip340Verifier, Secp256k1Verifier},
    Erc1271Signer, Erc7913Verifier, SignerDescriptor, VerifierError, VerifierRegistry,
    ERC1271_INVALID_VALUE, ERC1271_MAGIC_VALUE,
};

/// Where [`test_registry`] deploys [`Secp256k1Verifier`].
pub const ECDSA_VERIFIER: Address = address!("0x0000000000000000000000000000000000007913");

/// Where [`test_registry`] deploys [`Bip340Verifier`].
pub const BIP340_VERIFIER: Address = address!("0x0000000000000000000000000000000000000340");

/// Where [`test_registry`] deploys [`FailingVerifier`].
pub const FAILING_VERIFIER: Address = address!("0x00000000000000000000000000000000000fa11d");

/// Where [`test_registry`] deploys [`PanickingVerifier`].
pub const PANICKING_VERIFIER: Address = address!("0x0000000000000000000000000000000000000b0b");

fn secret_key(seed: u64) -> SecretKey {
    let mut bytes = [0u8; 32];
    bytes[24..].copy_from_slice(&seed.max(1).to_be_bytes());
    bytes[0] = 0x01;
    SecretKey::from_slice(&bytes).expect("seeded key below curve order")
}

/// A secp256k1 key usable as an EOA, as an explicit ERC-7913 ECDSA key, or as a BIP-340 key.
#[derive(Debug, Clone, Copy)]
pub struct TestKey {
    sk: SecretKey,
}

impl TestKey {
    /// Deterministic key derived from `seed`.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            sk: secret_key(seed),
        }
    }

    /// Ethereum address of the key.
    pub fn address(&self) -> Address {
        let pk = self.sk.public_key(SECP256K1).serialize_uncompressed();
        Address::from_slice(&keccak256(&pk[1..])[12..])
    }

    /// 20-byte descriptor, verified by ECDSA recovery.
    pub fn eoa_descriptor(&self) -> SignerDescriptor {
        SignerDescriptor::native(self.address())
    }

    /// `ECDSA_VERIFIER || compressed key`.
    pub fn ecdsa_descriptor(&self) -> SignerDescriptor {
        SignerDescriptor::external(ECDSA_VERIFIER, &self.sk.public_key(SECP256K1).serialize())
    }

    /// `BIP340_VERIFIER || x-only key`.
    pub fn bip340_descriptor(&self) -> SignerDescriptor {
        let (xonly, _) = Keypair::from_secret_key(SECP256K1, &self.sk).x_only_public_key();
        SignerDescriptor::external(BIP340_VERIFIER, &xonly.serialize())
    }

    /// `r || s || v` signature with `v` in `{27, 28}`, as ECDSA recovery expects.
    pub fn sign_eoa(&self, hash: B256) -> Vec<u8> {
        let sig = SECP256K1.sign_ecdsa_recoverable(&Message::from_digest(hash.0), &self.sk);
        let (recovery_id, compact) = sig.serialize_compact();
        let mut out = compact.to_vec();
        out.push(recovery_id.to_i32() as u8 + 27);
        out
    }

    /// Compact 64-byte ECDSA signature for [`Secp256k1Verifier`].
    pub fn sign_ecdsa(&self, hash: B256) -> Vec<u8> {
        SECP256K1
            .sign_ecdsa(&Message::from_digest(hash.0), &self.sk)
            .serialize_compact()
            .to_vec()
    }

    /// 64-byte BIP-340 signature for [`Bip340Verifier`].
    pub fn sign_bip340(&self, hash: B256) -> Vec<u8> {
        let kp = Keypair::from_secret_key(SECP256K1, &self.sk);
        SECP256K1
            .sign_schnorr_no_aux_rand(&Message::from_digest(hash.0), &kp)
            .serialize()
            .to_vec()
    }
}

/// A verifier that always errors.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingVerifier;

impl Erc7913Verifier for FailingVerifier {
    fn verify(&self, _: &[u8], _: B256, _: &[u8]) -> Result<FixedBytes<4>, VerifierError> {
        Err(VerifierError::InvalidMessageHash)
    }
}

/// A verifier that always panics.
#[derive(Debug, Clone, Copy, Default)]
pub struct PanickingVerifier;

impl Erc7913Verifier for PanickingVerifier {
    fn verify(&self, _: &[u8], _: B256, _: &[u8]) -> Result<FixedBytes<4>, VerifierError> {
        panic!("verifier exploded")
    }
}

/// An ERC-1271 account that approves signatures made by an owner key.
#[derive(Debug, Clone, Copy)]
pub struct OwnedContractSigner {
    owner: Address,
}

impl OwnedContractSigner {
    /// Contract account controlled by `owner`.
    pub fn new(owner: &TestKey) -> Self {
        Self {
            owner: owner.address(),
        }
    }
}

impl Erc1271Signer for OwnedContractSigner {
    fn is_valid_signature(
        &self,
        hash: B256,
        signature: &[u8],
    ) -> Result<FixedBytes<4>, VerifierError> {
        Ok(if crate::recover_signer(hash, signature) == Some(self.owner) {
            ERC1271_MAGIC_VALUE
        } else {
            ERC1271_INVALID_VALUE
        })
    }
}

/// Registry with the built-in schemes and the failing mocks deployed at their well-known
/// addresses.
pub fn test_registry() -> VerifierRegistry {
    let mut registry = VerifierRegistry::new();
    registry
        .register_verifier(ECDSA_VERIFIER, Secp256k1Verifier)
        .register_verifier(BIP340_VERIFIER, Bip340Verifier)
        .register_verifier(FAILING_VERIFIER, FailingVerifier)
        .register_verifier(PANICKING_VERIFIER, PanickingVerifier);
    registry
}
