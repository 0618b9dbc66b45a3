//! How much each signer counts towards the threshold.

use std::{collections::HashMap, fmt::Debug};

use erc7913_signer::SignerId;

use crate::{MultisigError, MultisigResult, SignerSet};

/// Per-account weight bookkeeping.
///
/// The table never checks membership itself; callers ask only about members and keep the
/// table in step with the [`SignerSet`] it sits next to.
pub trait WeightTable: Clone + Debug + Default + Send + Sync {
    /// Weight of a member.
    fn weight(&self, id: &SignerId) -> u64;

    /// Sum of the weights of every member of `members`.
    fn total_weight(&self, members: &SignerSet) -> u64;

    /// Accounts for `count` new members at the default weight of 1.
    ///
    /// Fails without changing anything if the total would overflow.
    fn insert_default(&mut self, count: usize) -> MultisigResult<()>;

    /// Forgets a member that is about to leave the set.
    fn remove(&mut self, id: &SignerId);

    fn clear(&mut self);
}

/// Every member weighs 1, so the total is the member count.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UniformWeights;

impl WeightTable for UniformWeights {
    fn weight(&self, _id: &SignerId) -> u64 {
        1
    }

    fn total_weight(&self, members: &SignerSet) -> u64 {
        members.len() as u64
    }

    fn insert_default(&mut self, _count: usize) -> MultisigResult<()> {
        Ok(())
    }

    fn remove(&mut self, _id: &SignerId) {}

    fn clear(&mut self) {}
}

/// Explicit per-signer weights with a running total.
///
/// Members without a stored weight weigh 1, so adding signers needs no per-signer write.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignerWeights {
    weights: HashMap<SignerId, u64>,
    total: u64,
}

impl SignerWeights {
    /// Stored weight of `id`, if one was ever set.
    pub fn stored(&self, id: &SignerId) -> Option<u64> {
        self.weights.get(id).copied()
    }

    /// Running total, without consulting the set.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Writes weights computed by [`SignerWeights::stage`].
    pub(crate) fn commit(&mut self, staged: StagedWeights) {
        self.weights.extend(staged.weights);
        self.total = staged.total;
    }

    /// Computes the effect of applying `updates` in order, without writing.
    ///
    /// A signer listed twice ends with its last weight.
    pub(crate) fn stage(
        &self,
        updates: impl IntoIterator<Item = (SignerId, u64)>,
    ) -> MultisigResult<StagedWeights> {
        let mut staged = StagedWeights {
            weights: HashMap::new(),
            total: self.total,
        };
        for (id, weight) in updates {
            let old = staged
                .weights
                .get(&id)
                .copied()
                .unwrap_or_else(|| self.weight(&id));
            staged.total = (staged.total - old)
                .checked_add(weight)
                .ok_or(MultisigError::WeightOverflow)?;
            staged.weights.insert(id, weight);
        }
        Ok(staged)
    }
}

/// Weight changes computed but not yet written.
#[derive(Debug)]
pub(crate) struct StagedWeights {
    weights: HashMap<SignerId, u64>,
    total: u64,
}

impl StagedWeights {
    pub(crate) fn total(&self) -> u64 {
        self.total
    }
}

impl WeightTable for SignerWeights {
    fn weight(&self, id: &SignerId) -> u64 {
        self.stored(id).unwrap_or(1)
    }

    fn total_weight(&self, _members: &SignerSet) -> u64 {
        self.total
    }

    fn insert_default(&mut self, count: usize) -> MultisigResult<()> {
        self.total = self
            .total
            .checked_add(count as u64)
            .ok_or(MultisigError::WeightOverflow)?;
        Ok(())
    }

    fn remove(&mut self, id: &SignerId) {
        self.total -= self.weight(id);
        self.weights.remove(id);
    }

    fn clear(&mut self) {
        self.weights.clear();
        self.total = 0;
    }
}

#[cfg(test)]
mod tests {
    use erc7913_signer::SignerDescriptor;

    use super::*;

    fn id(tag: u8) -> SignerId {
        SignerDescriptor::new(vec![tag; 24]).id()
    }

    #[test]
    fn test_default_weight_is_one() {
        let mut table = SignerWeights::default();
        table.insert_default(3).unwrap();
        assert_eq!(table.weight(&id(1)), 1);
        assert_eq!(table.stored(&id(1)), None);
        assert_eq!(table.total(), 3);
    }

    #[test]
    fn test_stage_applies_in_order() {
        let mut table = SignerWeights::default();
        table.insert_default(2).unwrap();

        let staged = table
            .stage([(id(1), 5), (id(2), 3), (id(1), 2)])
            .unwrap();
        assert_eq!(staged.total(), 5);
        assert_eq!(table.total(), 2);

        table.commit(staged);
        assert_eq!(table.weight(&id(1)), 2);
        assert_eq!(table.weight(&id(2)), 3);

        table.remove(&id(2));
        assert_eq!(table.total(), 2);
        assert_eq!(table.stored(&id(2)), None);
    }

    #[test]
    fn test_overflow_is_rejected() {
        let mut table = SignerWeights::default();
        table.insert_default(2).unwrap();
        let staged = table.stage([(id(1), u64::MAX - 1)]).unwrap();
        table.commit(staged);

        assert_eq!(table.insert_default(1), Err(MultisigError::WeightOverflow));
        assert_eq!(table.total(), u64::MAX);
        assert!(matches!(
            table.stage([(id(2), 2)]),
            Err(MultisigError::WeightOverflow)
        ));
    }

    #[test]
    fn test_uniform_counts_members() {
        let mut set = SignerSet::new();
        set.insert(SignerDescriptor::new(vec![1; 20]));
        set.insert(SignerDescriptor::new(vec![2; 20]));
        assert_eq!(UniformWeights.total_weight(&set), 2);
        assert_eq!(UniformWeights.weight(&id(9)), 1);
    }
}
