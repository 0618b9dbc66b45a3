use erc7913_signer::SignerDescriptor;
use thiserror::Error;

/// Result alias for multisig configuration changes.
pub type MultisigResult<T> = Result<T, MultisigError>;

/// A rejected change to an account's multisig configuration.
///
/// Verification never produces these; a failed verification is just `false`. They come from
/// mutations whose preconditions do not hold, and the account is left untouched.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum MultisigError {
    /// The descriptor is shorter than a verifier identity.
    #[error("invalid signer {0}: descriptor shorter than 20 bytes")]
    InvalidSigner(SignerDescriptor),

    /// The signer is already a member, or appears twice in one batch.
    #[error("signer {0} already exists")]
    AlreadyExists(SignerDescriptor),

    /// The signer is not a member, or appears twice in one removal batch.
    #[error("signer {0} does not exist")]
    NonexistentSigner(SignerDescriptor),

    /// The threshold would exceed what the remaining signers can reach.
    #[error("unreachable threshold: total weight {total_weight} below threshold {threshold}")]
    UnreachableThreshold { total_weight: u64, threshold: u64 },

    /// Thresholds start at 1.
    #[error("threshold must be at least 1")]
    ZeroThreshold,

    /// Weights start at 1.
    #[error("invalid weight 0 for signer {0}")]
    InvalidWeight(SignerDescriptor),

    /// The account would hold more signers than the configured capacity.
    #[error("too many signers: {requested} requested, at most {max} allowed")]
    TooManySigners { max: usize, requested: usize },

    /// Parallel arrays of a mutation call differ in length.
    #[error("mismatched lengths: {signers} signers, {weights} weights")]
    MismatchedLength { signers: usize, weights: usize },

    /// The total weight would not fit in a `u64`.
    #[error("total weight overflow")]
    WeightOverflow,

    /// The install payload does not decode.
    #[error("invalid install data: {0}")]
    InvalidInstallData(String),
}
