//! Shared fixtures for the multisig integration tests.

#![allow(unreachable_pub, reason = "test utilities")]
#![allow(dead_code, reason = "utilities used by different test files")]

use alloy_primitives::{address, Address, Bytes, B256};
use erc7913_signer::{sort_by_signer_id, test_utils::TestKey, SignerDescriptor};

pub const ACCOUNT: Address = address!("0x000000000000000000000000000000000000a11c");
pub const OTHER_ACCOUNT: Address = address!("0x000000000000000000000000000000000000b0b0");

pub fn hash() -> B256 {
    B256::repeat_byte(0x42)
}

/// How a test key is registered as a signer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scheme {
    Eoa,
    Ecdsa,
    Bip340,
}

/// A test key bound to a scheme.
#[derive(Clone, Copy, Debug)]
pub struct TestSigner {
    pub key: TestKey,
    pub scheme: Scheme,
}

impl TestSigner {
    pub fn new(seed: u64, scheme: Scheme) -> Self {
        Self {
            key: TestKey::from_seed(seed),
            scheme,
        }
    }

    pub fn descriptor(&self) -> SignerDescriptor {
        match self.scheme {
            Scheme::Eoa => self.key.eoa_descriptor(),
            Scheme::Ecdsa => self.key.ecdsa_descriptor(),
            Scheme::Bip340 => self.key.bip340_descriptor(),
        }
    }

    pub fn sign(&self, hash: B256) -> Bytes {
        let sig = match self.scheme {
            Scheme::Eoa => self.key.sign_eoa(hash),
            Scheme::Ecdsa => self.key.sign_ecdsa(hash),
            Scheme::Bip340 => self.key.sign_bip340(hash),
        };
        sig.into()
    }
}

/// One signer of each scheme, seeded from `first_seed`.
pub fn mixed_signers(first_seed: u64, count: usize) -> Vec<TestSigner> {
    const SCHEMES: [Scheme; 3] = [Scheme::Eoa, Scheme::Ecdsa, Scheme::Bip340];
    (0..count)
        .map(|i| TestSigner::new(first_seed + i as u64, SCHEMES[i % SCHEMES.len()]))
        .collect()
}

/// Signs `hash` with every signer and returns the pairs sorted by signer id.
pub fn sorted_request(
    signers: &[TestSigner],
    hash: B256,
) -> (Vec<SignerDescriptor>, Vec<Bytes>) {
    let mut pairs: Vec<_> = signers
        .iter()
        .map(|s| (s.descriptor(), s.sign(hash)))
        .collect();
    sort_by_signer_id(&mut pairs);
    pairs.into_iter().unzip()
}

pub fn descriptors(signers: &[TestSigner]) -> Vec<SignerDescriptor> {
    signers.iter().map(TestSigner::descriptor).collect()
}
