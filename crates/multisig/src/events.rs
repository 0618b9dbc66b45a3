//! Notifications emitted by committed configuration changes.

use alloy_primitives::{Address, Bytes, LogData};
use alloy_sol_types::SolEvent;
use erc7913_signer::SignerDescriptor;

mod sol {
    alloy_sol_types::sol! {
        event ERC7913SignersAdded(address indexed account, bytes[] signers);
        event ERC7913SignersRemoved(address indexed account, bytes[] signers);
        event ERC7913ThresholdSet(address indexed account, uint64 threshold);
        event ERC7913SignerWeightChanged(address indexed account, bytes signer, uint64 weight);
    }
}

pub use sol::{
    ERC7913SignerWeightChanged, ERC7913SignersAdded, ERC7913SignersRemoved, ERC7913ThresholdSet,
};

/// A committed change to one account's configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MultisigEvent {
    /// One per successful add batch.
    SignersAdded {
        account: Address,
        signers: Vec<SignerDescriptor>,
    },

    /// One per successful remove batch.
    SignersRemoved {
        account: Address,
        signers: Vec<SignerDescriptor>,
    },

    ThresholdSet { account: Address, threshold: u64 },

    /// One per entry of a successful weight update.
    SignerWeightChanged {
        account: Address,
        signer: SignerDescriptor,
        weight: u64,
    },
}

impl MultisigEvent {
    /// The account the event belongs to.
    pub fn account(&self) -> Address {
        match self {
            Self::SignersAdded { account, .. }
            | Self::SignersRemoved { account, .. }
            | Self::ThresholdSet { account, .. }
            | Self::SignerWeightChanged { account, .. } => *account,
        }
    }

    /// Topics and data of the equivalent EVM log.
    pub fn to_log_data(&self) -> LogData {
        match self {
            Self::SignersAdded { account, signers } => ERC7913SignersAdded {
                account: *account,
                signers: to_bytes(signers),
            }
            .encode_log_data(),
            Self::SignersRemoved { account, signers } => ERC7913SignersRemoved {
                account: *account,
                signers: to_bytes(signers),
            }
            .encode_log_data(),
            Self::ThresholdSet { account, threshold } => ERC7913ThresholdSet {
                account: *account,
                threshold: *threshold,
            }
            .encode_log_data(),
            Self::SignerWeightChanged {
                account,
                signer,
                weight,
            } => ERC7913SignerWeightChanged {
                account: *account,
                signer: signer.clone().into_inner(),
                weight: *weight,
            }
            .encode_log_data(),
        }
    }
}

fn to_bytes(signers: &[SignerDescriptor]) -> Vec<Bytes> {
    signers.iter().map(|s| s.clone().into_inner()).collect()
}
