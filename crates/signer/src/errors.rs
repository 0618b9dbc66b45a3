//! Error types for signature verification.

use alloy_primitives::Address;
use thiserror::Error;

/// Failure reported by a verifier or contract signer.
///
/// These never escape [`is_valid_signature_now`](crate::is_valid_signature_now): the oracle
/// downgrades every one of them to an invalid signature.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerifierError {
    /// The key blob could not be parsed for this scheme.
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// The signature blob could not be parsed for this scheme.
    #[error("invalid signature encoding: {0}")]
    InvalidSignature(String),

    /// The message digest is not usable by this scheme.
    #[error("invalid message hash")]
    InvalidMessageHash,

    /// The call into the verifier contract reverted.
    #[error("call to {target} reverted")]
    Reverted {
        /// Contract that was called.
        target: Address,
        /// Raw revert data.
        data: Vec<u8>,
    },

    /// The verifier contract returned data that does not decode as `bytes4`.
    #[error("malformed return data from {target}: {reason}")]
    MalformedReturn {
        /// Contract that was called.
        target: Address,
        /// Why decoding failed.
        reason: String,
    },
}

impl From<secp256k1::Error> for VerifierError {
    fn from(e: secp256k1::Error) -> Self {
        Self::InvalidKey(e.to_string())
    }
}
