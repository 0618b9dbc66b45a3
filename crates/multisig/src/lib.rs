//! Threshold multisignature validation over ERC-7913 signers.
//!
//! Each account owns a set of signer descriptors and a threshold. A request is valid when the
//! listed signers are members, appear in strictly increasing [`SignerId`] order, each produced a
//! valid signature, and together carry at least the threshold weight. [`Multisig`] counts every
//! signer as 1; [`WeightedMultisig`] lets each signer carry its own weight.
//!
//! [`SignerId`]: erc7913_signer::SignerId

mod account;
mod encoding;
mod errors;
mod events;
mod module;
mod params;
mod signer_set;
mod validator;
mod weights;

pub use account::AccountMultisig;
pub use encoding::{decode_multisig_signature, encode_multisig_signature, InstallData};
pub use errors::{MultisigError, MultisigResult};
pub use events::{
    ERC7913SignerWeightChanged, ERC7913SignersAdded, ERC7913SignersRemoved, ERC7913ThresholdSet,
    MultisigEvent,
};
pub use module::{Multisig, WeightedMultisig};
pub use params::{MultisigParams, DEFAULT_MAX_SIGNERS};
pub use signer_set::SignerSet;
pub use validator::{MODULE_TYPE_VALIDATOR, VALIDATION_FAILED, VALIDATION_SUCCESS};
pub use weights::{SignerWeights, UniformWeights, WeightTable};
