//! The host view the oracle verifies against.

use std::{collections::HashMap, fmt, sync::Arc};

use alloy_primitives::{Address, FixedBytes, B256};

use crate::VerifierError;

/// An ERC-7913 signature verifier for one family of keys.
///
/// Implementations are third-party code. The oracle treats any error, panic, or return value
/// other than [`ERC7913_MAGIC_VALUE`](crate::ERC7913_MAGIC_VALUE) as an invalid signature.
pub trait Erc7913Verifier: Send + Sync {
    /// Checks `signature` over `hash` for `key`, returning the magic value on success.
    fn verify(
        &self,
        key: &[u8],
        hash: B256,
        signature: &[u8],
    ) -> Result<FixedBytes<4>, VerifierError>;
}

/// A smart-contract account that validates signatures on its own behalf (ERC-1271).
pub trait Erc1271Signer: Send + Sync {
    /// Checks `signature` over `hash`, returning
    /// [`ERC1271_MAGIC_VALUE`](crate::ERC1271_MAGIC_VALUE) on success.
    fn is_valid_signature(&self, hash: B256, signature: &[u8])
        -> Result<FixedBytes<4>, VerifierError>;
}

/// Everything the oracle needs to know about the world it runs in.
pub trait SignatureEnv {
    /// The ERC-1271 contract deployed at `account`, or `None` if `account` has no code.
    fn contract_signer(&self, account: Address) -> Option<&dyn Erc1271Signer>;

    /// The ERC-7913 verifier deployed at `verifier`, or `None` if nothing is deployed there.
    fn verifier(&self, verifier: Address) -> Option<&dyn Erc7913Verifier>;
}

impl<T: SignatureEnv + ?Sized> SignatureEnv for &T {
    fn contract_signer(&self, account: Address) -> Option<&dyn Erc1271Signer> {
        (**self).contract_signer(account)
    }

    fn verifier(&self, verifier: Address) -> Option<&dyn Erc7913Verifier> {
        (**self).verifier(verifier)
    }
}

/// In-memory [`SignatureEnv`] mapping addresses to verifiers and contract signers.
#[derive(Clone, Default)]
pub struct VerifierRegistry {
    verifiers: HashMap<Address, Arc<dyn Erc7913Verifier>>,
    contract_signers: HashMap<Address, Arc<dyn Erc1271Signer>>,
}

impl VerifierRegistry {
    /// Creates an empty registry. Every 20-byte signer is then an EOA.
    pub fn new() -> Self {
        Self::default()
    }

    /// Deploys `verifier` at `address`, replacing whatever was there.
    pub fn register_verifier(
        &mut self,
        address: Address,
        verifier: impl Erc7913Verifier + 'static,
    ) -> &mut Self {
        self.verifiers.insert(address, Arc::new(verifier));
        self
    }

    /// Deploys a contract account at `address`, replacing whatever was there.
    pub fn register_contract_signer(
        &mut self,
        address: Address,
        signer: impl Erc1271Signer + 'static,
    ) -> &mut Self {
        self.contract_signers.insert(address, Arc::new(signer));
        self
    }
}

impl fmt::Debug for VerifierRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VerifierRegistry")
            .field("verifiers", &self.verifiers.keys().collect::<Vec<_>>())
            .field(
                "contract_signers",
                &self.contract_signers.keys().collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl SignatureEnv for VerifierRegistry {
    fn contract_signer(&self, account: Address) -> Option<&dyn Erc1271Signer> {
        self.contract_signers.get(&account).map(|s| s.as_ref())
    }

    fn verifier(&self, verifier: Address) -> Option<&dyn Erc7913Verifier> {
        self.verifiers.get(&verifier).map(|v| v.as_ref())
    }
}
