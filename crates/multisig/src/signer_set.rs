//! Enumerable set of signer descriptors keyed by [`SignerId`].

use std::collections::HashMap;

use erc7913_signer::{SignerDescriptor, SignerId};
use serde::{Deserialize, Serialize};

use crate::MultisigError;

/// Unique signer descriptors of one account.
///
/// Membership is by [`SignerId`]. Iteration follows insertion order until a removal, which
/// moves the last member into the freed slot. Callers must not rely on order beyond each member
/// appearing exactly once.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<SignerDescriptor>", into = "Vec<SignerDescriptor>")]
pub struct SignerSet {
    members: Vec<SignerDescriptor>,
    positions: HashMap<SignerId, usize>,
}

impl SignerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, signer: &SignerDescriptor) -> bool {
        self.contains_id(&signer.id())
    }

    pub fn contains_id(&self, id: &SignerId) -> bool {
        self.positions.contains_key(id)
    }

    /// Members in current slot order.
    pub fn as_slice(&self) -> &[SignerDescriptor] {
        &self.members
    }

    pub fn iter(&self) -> impl Iterator<Item = &SignerDescriptor> + '_ {
        self.members.iter()
    }

    /// Inserts `signer`, returning `false` if it was already a member.
    pub fn insert(&mut self, signer: SignerDescriptor) -> bool {
        let id = signer.id();
        if self.positions.contains_key(&id) {
            return false;
        }
        self.positions.insert(id, self.members.len());
        self.members.push(signer);
        true
    }

    /// Removes `signer`, returning `false` if it was not a member.
    pub fn remove(&mut self, signer: &SignerDescriptor) -> bool {
        let Some(pos) = self.positions.remove(&signer.id()) else {
            return false;
        };
        self.members.swap_remove(pos);
        if let Some(moved) = self.members.get(pos) {
            self.positions.insert(moved.id(), pos);
        }
        true
    }

    /// Removes and returns the member in the last slot.
    pub fn pop(&mut self) -> Option<SignerDescriptor> {
        let last = self.members.pop()?;
        self.positions.remove(&last.id());
        Some(last)
    }

    pub fn clear(&mut self) {
        self.members.clear();
        self.positions.clear();
    }
}

impl TryFrom<Vec<SignerDescriptor>> for SignerSet {
    type Error = MultisigError;

    fn try_from(signers: Vec<SignerDescriptor>) -> Result<Self, Self::Error> {
        let mut set = Self::new();
        for signer in signers {
            if !signer.is_well_formed() {
                return Err(MultisigError::InvalidSigner(signer));
            }
            if set.contains(&signer) {
                return Err(MultisigError::AlreadyExists(signer));
            }
            set.insert(signer);
        }
        Ok(set)
    }
}

impl From<SignerSet> for Vec<SignerDescriptor> {
    fn from(set: SignerSet) -> Self {
        set.members
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use proptest::prelude::*;

    use super::*;

    fn desc(tag: u8) -> SignerDescriptor {
        SignerDescriptor::new(vec![tag; 32])
    }

    #[test]
    fn test_insert_remove_keeps_positions() {
        let mut set = SignerSet::new();
        for tag in 1..=4 {
            assert!(set.insert(desc(tag)));
        }
        assert!(!set.insert(desc(2)));
        assert_eq!(set.len(), 4);

        // Removing the first slot moves the last member into it.
        assert!(set.remove(&desc(1)));
        assert_eq!(set.as_slice()[0], desc(4));
        assert!(set.contains(&desc(4)));
        assert!(!set.contains(&desc(1)));
        assert!(!set.remove(&desc(1)));

        assert!(set.remove(&desc(4)));
        assert!(set.remove(&desc(3)));
        assert_eq!(set.as_slice(), &[desc(2)]);
        assert_eq!(set.pop(), Some(desc(2)));
        assert!(set.is_empty());
        assert_eq!(set.pop(), None);
    }

    #[test]
    fn test_try_from_rejects_bad_members() {
        let short = SignerDescriptor::new(vec![0; 19]);
        assert_eq!(
            SignerSet::try_from(vec![desc(1), short.clone()]),
            Err(MultisigError::InvalidSigner(short))
        );
        assert_eq!(
            SignerSet::try_from(vec![desc(1), desc(1)]),
            Err(MultisigError::AlreadyExists(desc(1)))
        );
    }

    #[test]
    fn test_serde_as_list() {
        let set = SignerSet::try_from(vec![desc(1), desc(2)]).unwrap();
        let json = serde_json::to_string(&set).unwrap();
        let back: SignerSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, set);

        let dup = format!("[\"0x{0}\",\"0x{0}\"]", "aa".repeat(20));
        assert!(serde_json::from_str::<SignerSet>(&dup).is_err());
    }

    proptest! {
        #[test]
        fn prop_positions_track_members(ops in prop::collection::vec((any::<bool>(), 0u8..12), 0..64)) {
            let mut set = SignerSet::new();
            let mut model = BTreeSet::new();
            for (insert, tag) in ops {
                if insert {
                    prop_assert_eq!(set.insert(desc(tag)), model.insert(tag));
                } else {
                    prop_assert_eq!(set.remove(&desc(tag)), model.remove(&tag));
                }
            }

            prop_assert_eq!(set.len(), model.len());
            for (pos, member) in set.iter().enumerate() {
                prop_assert_eq!(set.positions.get(&member.id()), Some(&pos));
            }
            for tag in model {
                prop_assert!(set.contains(&desc(tag)));
            }
        }
    }
}
