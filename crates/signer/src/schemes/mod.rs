//! Built-in ERC-7913 verifiers for key types that are not native Ethereum accounts.

mod bip340;
mod ecdsa;

pub use self::{bip340::Bip340Verifier, ecdsa::Secp256k1Verifier};
