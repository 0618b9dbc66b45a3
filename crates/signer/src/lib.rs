//! ERC-7913 signers and the signature verification oracle.
//!
//! A signer is described by an opaque byte blob. Blobs of exactly 20 bytes are native Ethereum
//! accounts (an EOA checked by ECDSA recovery, or a contract checked through ERC-1271). Longer
//! blobs are `verifier || key`, and the signature is checked by the ERC-7913 verifier deployed
//! at `verifier`. Anything shorter than 20 bytes never verifies.
//!
//! The oracle ([`is_valid_signature_now`]) is total: it always answers with a `bool`. Failures of
//! external verifiers are swallowed and read as "invalid".

mod abi;
mod check;
mod descriptor;
mod env;
mod errors;
mod native;
pub mod schemes;

#[cfg(feature = "test-utils")]
pub mod test_utils;

pub use abi::{ContractSigner, ContractVerifier, StaticCall, IERC1271, IERC7913SignatureVerifier};
pub use check::{are_valid_signatures_now, is_valid_signature_now, sort_by_signer_id};
pub use descriptor::{SignerDescriptor, SignerId, SignerKind, VERIFIER_LEN};
pub use env::{Erc1271Signer, Erc7913Verifier, SignatureEnv, VerifierRegistry};
pub use errors::VerifierError;
pub use native::recover_signer;

use alloy_primitives::FixedBytes;
use alloy_sol_types::SolCall;

/// Value an ERC-7913 verifier returns for a valid signature: the selector of
/// `verify(bytes,bytes32,bytes)`.
pub const ERC7913_MAGIC_VALUE: FixedBytes<4> =
    FixedBytes(<IERC7913SignatureVerifier::verifyCall as SolCall>::SELECTOR);

/// Value an ERC-1271 contract returns for a valid signature: the selector of
/// `isValidSignature(bytes32,bytes)`, `0x1626ba7e`.
pub const ERC1271_MAGIC_VALUE: FixedBytes<4> =
    FixedBytes(<IERC1271::isValidSignatureCall as SolCall>::SELECTOR);

/// Value an ERC-1271 contract returns when a signature is rejected.
pub const ERC1271_INVALID_VALUE: FixedBytes<4> = FixedBytes([0xff; 4]);
