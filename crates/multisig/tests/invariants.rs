//! Property tests: configuration invariants hold across arbitrary operation sequences.

#![expect(unused_crate_dependencies, reason = "test dependencies")]

use std::collections::HashSet;

use alloy_primitives::{address, Address};
use erc7913_multisig::{MultisigParams, WeightedMultisig};
use erc7913_signer::SignerDescriptor;
use proptest::prelude::*;

const ACCOUNT: Address = address!("0x00000000000000000000000000000000000000a1");

#[derive(Clone, Debug)]
enum Op {
    Add(Vec<u8>),
    Remove(Vec<u8>),
    SetThreshold(u64),
    SetWeights(Vec<(u8, u64)>),
}

fn signer(tag: u8) -> SignerDescriptor {
    // Short tags give malformed descriptors now and then.
    let len = if tag % 17 == 0 { 12 } else { 20 + (tag % 5) as usize };
    SignerDescriptor::new(vec![tag; len])
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        prop::collection::vec(0u8..40, 0..4).prop_map(Op::Add),
        prop::collection::vec(0u8..40, 0..3).prop_map(Op::Remove),
        (0u64..12).prop_map(Op::SetThreshold),
        prop::collection::vec((0u8..40, 0u64..6), 0..3).prop_map(Op::SetWeights),
    ]
}

fn apply(module: &mut WeightedMultisig, op: &Op) -> bool {
    let to_signers = |tags: &[u8]| tags.iter().copied().map(signer).collect::<Vec<_>>();
    match op {
        Op::Add(tags) => module.add_signers(ACCOUNT, &to_signers(tags)).is_ok(),
        Op::Remove(tags) => module.remove_signers(ACCOUNT, &to_signers(tags)).is_ok(),
        Op::SetThreshold(t) => module.set_threshold(ACCOUNT, *t).is_ok(),
        Op::SetWeights(entries) => {
            let (tags, weights): (Vec<u8>, Vec<u64>) = entries.iter().copied().unzip();
            module
                .set_signer_weights(ACCOUNT, &to_signers(&tags), &weights)
                .is_ok()
        }
    }
}

fn snapshot(module: &WeightedMultisig) -> (Vec<SignerDescriptor>, u64, u64) {
    (
        module.signers(ACCOUNT),
        module.threshold(ACCOUNT),
        module.total_weight(ACCOUNT),
    )
}

proptest! {
    #[test]
    fn prop_configuration_invariants(ops in prop::collection::vec(op_strategy(), 1..40)) {
        let mut module = WeightedMultisig::new(MultisigParams { max_signers: 16 });

        for op in &ops {
            let before = snapshot(&module);
            let ok = apply(&mut module, op);
            if !ok {
                prop_assert_eq!(snapshot(&module), before, "failed {:?} changed state", op);
            }

            let signers = module.signers(ACCOUNT);
            let ids: HashSet<_> = signers.iter().map(|s| s.id()).collect();
            prop_assert_eq!(ids.len(), signers.len());
            prop_assert!(signers.iter().all(|s| s.is_well_formed()));
            prop_assert!(signers.len() <= 16);

            let summed: u64 = signers
                .iter()
                .map(|s| module.signer_weight(ACCOUNT, s))
                .sum();
            prop_assert_eq!(summed, module.total_weight(ACCOUNT));
            prop_assert!(signers.iter().all(|s| module.signer_weight(ACCOUNT, s) >= 1));
            prop_assert!(module.threshold(ACCOUNT) <= module.total_weight(ACCOUNT));
        }
    }
}
