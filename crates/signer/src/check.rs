//! The signature oracle and the ordered batch check built on it.

use std::panic::{catch_unwind, AssertUnwindSafe};

use alloy_primitives::{Address, FixedBytes, B256};
use tracing::{trace, warn};

use crate::{
    native::is_valid_eoa_signature, SignatureEnv, SignerDescriptor, SignerId, SignerKind,
    VerifierError, ERC1271_MAGIC_VALUE, ERC7913_MAGIC_VALUE,
};

/// Checks `signature` over `hash` for `signer`.
///
/// - Descriptors shorter than 20 bytes never verify.
/// - A 20-byte descriptor is a native account: ERC-1271 if the environment has a contract
///   signer at that address, ECDSA recovery otherwise.
/// - A longer descriptor is `verifier || key` and is handed to the ERC-7913 verifier at
///   `verifier`.
///
/// Never fails. Errors and panics raised by external code count as an invalid signature.
pub fn is_valid_signature_now<E: SignatureEnv + ?Sized>(
    env: &E,
    signer: &SignerDescriptor,
    hash: B256,
    signature: &[u8],
) -> bool {
    match signer.kind() {
        None => {
            trace!(len = signer.len(), "malformed signer descriptor");
            false
        }
        Some(SignerKind::Native(account)) => match env.contract_signer(account) {
            Some(contract) => fenced(account, ERC1271_MAGIC_VALUE, || {
                contract.is_valid_signature(hash, signature)
            }),
            None => is_valid_eoa_signature(account, hash, signature),
        },
        Some(SignerKind::External { verifier, key }) => match env.verifier(verifier) {
            Some(v) => fenced(verifier, ERC7913_MAGIC_VALUE, || {
                v.verify(key, hash, signature)
            }),
            None => {
                trace!(%verifier, "no verifier deployed");
                false
            }
        },
    }
}

/// Runs an external check and accepts only an exact `magic` answer.
fn fenced(
    target: Address,
    magic: FixedBytes<4>,
    call: impl FnOnce() -> Result<FixedBytes<4>, VerifierError>,
) -> bool {
    match catch_unwind(AssertUnwindSafe(call)) {
        Ok(Ok(value)) => value == magic,
        Ok(Err(err)) => {
            warn!(%target, %err, "external signature check failed");
            false
        }
        Err(_) => {
            warn!(%target, "external signature check panicked");
            false
        }
    }
}

/// Checks a batch of signatures whose signers are listed in strictly increasing
/// [`SignerId`] order.
///
/// Returns `false` if the lengths differ, if any id is not greater than the previous one
/// (the first is compared against [`SignerId::ZERO`]), or if any single signature is invalid.
/// Duplicates are caught by the ordering rule; unordered input is rejected, not sorted.
pub fn are_valid_signatures_now<E, S, G>(
    env: &E,
    hash: B256,
    signers: &[S],
    signatures: &[G],
) -> bool
where
    E: SignatureEnv + ?Sized,
    S: AsRef<SignerDescriptor>,
    G: AsRef<[u8]>,
{
    if signers.len() != signatures.len() {
        trace!(
            signers = signers.len(),
            signatures = signatures.len(),
            "signer and signature counts differ"
        );
        return false;
    }

    let mut last_id = SignerId::ZERO;
    for (index, (signer, signature)) in signers.iter().zip(signatures).enumerate() {
        let signer: &SignerDescriptor = signer.as_ref();
        let id = signer.id();
        if id <= last_id {
            trace!(index, "signers not in strictly increasing id order");
            return false;
        }
        last_id = id;

        if !is_valid_signature_now(env, signer, hash, signature.as_ref()) {
            trace!(index, "invalid signature");
            return false;
        }
    }

    true
}

/// Orders `(signer, signature)` pairs by [`SignerId`], the order [`are_valid_signatures_now`]
/// requires. This is for whoever assembles a request; verification never sorts.
pub fn sort_by_signer_id<G>(pairs: &mut [(SignerDescriptor, G)]) {
    pairs.sort_by_cached_key(|(signer, _)| signer.id());
}
