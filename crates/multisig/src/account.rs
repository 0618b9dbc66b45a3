//! Signer set and threshold of a single account.

use std::collections::HashSet;

use alloy_primitives::B256;
use erc7913_signer::{are_valid_signatures_now, SignatureEnv, SignerDescriptor};
use tracing::trace;

use crate::{
    MultisigError, MultisigParams, MultisigResult, SignerSet, SignerWeights, UniformWeights,
    WeightTable,
};

/// Multisig configuration of one account.
///
/// Every mutation checks all of its preconditions before writing, so a failed call leaves the
/// account exactly as it was. After any successful mutation the threshold is reachable:
/// `threshold <= total_weight()`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AccountMultisig<W = UniformWeights> {
    signers: SignerSet,
    threshold: u64,
    weights: W,
}

impl<W: WeightTable> AccountMultisig<W> {
    pub fn signers(&self) -> &SignerSet {
        &self.signers
    }

    pub fn signer_count(&self) -> usize {
        self.signers.len()
    }

    pub fn is_signer(&self, signer: &SignerDescriptor) -> bool {
        self.signers.contains(signer)
    }

    /// Required weight. Zero means the account was never configured.
    pub fn threshold(&self) -> u64 {
        self.threshold
    }

    /// Weight of `signer`, or 0 if it is not a member.
    pub fn signer_weight(&self, signer: &SignerDescriptor) -> u64 {
        let id = signer.id();
        if self.signers.contains_id(&id) {
            self.weights.weight(&id)
        } else {
            0
        }
    }

    pub fn total_weight(&self) -> u64 {
        self.weights.total_weight(&self.signers)
    }

    pub fn weights(&self) -> &W {
        &self.weights
    }

    /// Whether the account holds any signer.
    pub fn is_configured(&self) -> bool {
        !self.signers.is_empty()
    }

    /// Adds every signer in `signers`.
    ///
    /// Fails on the first descriptor that is too short, already a member, or repeated within
    /// the batch, and when the account would exceed `params.max_signers`.
    pub fn add_signers(
        &mut self,
        signers: &[SignerDescriptor],
        params: &MultisigParams,
    ) -> MultisigResult<()> {
        let requested = self.signers.len() + signers.len();
        if requested > params.max_signers {
            return Err(MultisigError::TooManySigners {
                max: params.max_signers,
                requested,
            });
        }

        let mut batch = HashSet::with_capacity(signers.len());
        for signer in signers {
            if !signer.is_well_formed() {
                return Err(MultisigError::InvalidSigner(signer.clone()));
            }
            let id = signer.id();
            if self.signers.contains_id(&id) || !batch.insert(id) {
                return Err(MultisigError::AlreadyExists(signer.clone()));
            }
        }

        self.weights.insert_default(signers.len())?;
        for signer in signers {
            self.signers.insert(signer.clone());
        }
        self.debug_check_total();
        Ok(())
    }

    /// Removes every signer in `signers`.
    ///
    /// Fails if one is not a member (or is repeated within the batch) and if the remaining
    /// weight would drop below the threshold.
    pub fn remove_signers(&mut self, signers: &[SignerDescriptor]) -> MultisigResult<()> {
        let mut batch = HashSet::with_capacity(signers.len());
        let mut removed_weight = 0u64;
        for signer in signers {
            let id = signer.id();
            if !self.signers.contains_id(&id) || !batch.insert(id) {
                return Err(MultisigError::NonexistentSigner(signer.clone()));
            }
            // Weights of members are looked up before membership goes away.
            removed_weight += self.weights.weight(&id);
        }

        let remaining = self.total_weight() - removed_weight;
        if remaining < self.threshold {
            return Err(MultisigError::UnreachableThreshold {
                total_weight: remaining,
                threshold: self.threshold,
            });
        }

        for signer in signers {
            self.weights.remove(&signer.id());
            self.signers.remove(signer);
        }
        self.debug_check_total();
        Ok(())
    }

    /// Sets the threshold. It must be at least 1 and at most the total weight.
    pub fn set_threshold(&mut self, threshold: u64) -> MultisigResult<()> {
        if threshold == 0 {
            return Err(MultisigError::ZeroThreshold);
        }
        let total_weight = self.total_weight();
        if threshold > total_weight {
            return Err(MultisigError::UnreachableThreshold {
                total_weight,
                threshold,
            });
        }
        self.threshold = threshold;
        Ok(())
    }

    /// Sum of the weights of the members in `signers`. Non-members count 0.
    pub fn validating_weight(&self, signers: &[SignerDescriptor]) -> u64 {
        signers
            .iter()
            .map(|s| self.signer_weight(s))
            .fold(0u64, u64::saturating_add)
    }

    /// Whether `signers` carry enough weight. Never true for an unconfigured account.
    pub fn is_threshold_met(&self, signers: &[SignerDescriptor]) -> bool {
        self.threshold != 0 && self.validating_weight(signers) >= self.threshold
    }

    /// Checks a multisignature over `hash`.
    ///
    /// Valid iff the arrays have equal length, every signer is a member, the signers are in
    /// strictly increasing id order, every signature verifies, and their weight reaches the
    /// threshold. Never mutates.
    pub fn validate_signatures<E, G>(
        &self,
        env: &E,
        hash: B256,
        signers: &[SignerDescriptor],
        signatures: &[G],
    ) -> bool
    where
        E: SignatureEnv + ?Sized,
        G: AsRef<[u8]>,
    {
        if signers.len() != signatures.len() {
            trace!(
                signers = signers.len(),
                signatures = signatures.len(),
                "rejecting multisig: length mismatch"
            );
            return false;
        }

        if let Some(index) = signers.iter().position(|s| !self.is_signer(s)) {
            trace!(index, "rejecting multisig: unauthorized signer");
            return false;
        }

        if !are_valid_signatures_now(env, hash, signers, signatures) {
            trace!("rejecting multisig: bad signature or signer order");
            return false;
        }

        if !self.is_threshold_met(signers) {
            trace!(
                weight = self.validating_weight(signers),
                threshold = self.threshold,
                "rejecting multisig: threshold not met"
            );
            return false;
        }

        true
    }

    /// Removes up to `limit` signers without any threshold check, returning how many remain.
    ///
    /// The threshold is zeroed on the first call so a partly cleared account never validates.
    pub fn clear_page(&mut self, limit: usize) -> usize {
        self.threshold = 0;
        for _ in 0..limit {
            let Some(signer) = self.signers.pop() else {
                break;
            };
            self.weights.remove(&signer.id());
        }
        if self.signers.is_empty() {
            self.weights.clear();
        }
        self.debug_check_total();
        self.signers.len()
    }

    /// Drops all state.
    pub fn clear(&mut self) {
        self.signers.clear();
        self.weights.clear();
        self.threshold = 0;
    }

    fn debug_check_total(&self) {
        debug_assert_eq!(
            self.total_weight(),
            self.signers
                .iter()
                .map(|s| self.weights.weight(&s.id()))
                .sum::<u64>(),
            "running total weight drifted from the member weights"
        );
        debug_assert!(self.threshold <= self.total_weight());
    }
}

impl AccountMultisig<SignerWeights> {
    /// Overwrites the weights of existing members, applied in order.
    ///
    /// Fails if the arrays differ in length, a signer is not a member, a weight is 0, the
    /// total overflows, or the new total cannot reach the threshold.
    pub fn set_signer_weights(
        &mut self,
        signers: &[SignerDescriptor],
        weights: &[u64],
    ) -> MultisigResult<()> {
        if signers.len() != weights.len() {
            return Err(MultisigError::MismatchedLength {
                signers: signers.len(),
                weights: weights.len(),
            });
        }

        for (signer, &weight) in signers.iter().zip(weights) {
            if !self.signers.contains(signer) {
                return Err(MultisigError::NonexistentSigner(signer.clone()));
            }
            if weight == 0 {
                return Err(MultisigError::InvalidWeight(signer.clone()));
            }
        }

        let staged = self
            .weights
            .stage(signers.iter().map(|s| s.id()).zip(weights.iter().copied()))?;
        if staged.total() < self.threshold {
            return Err(MultisigError::UnreachableThreshold {
                total_weight: staged.total(),
                threshold: self.threshold,
            });
        }

        self.weights.commit(staged);
        self.debug_check_total();
        Ok(())
    }
}
