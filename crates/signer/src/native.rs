//! ECDSA recovery for native (20-byte) signers.

use alloy_primitives::{b256, keccak256, Address, B256};
use secp256k1::{
    ecdsa::{RecoverableSignature, RecoveryId},
    Message, SECP256K1,
};

/// Length of an Ethereum-style `r || s || v` signature.
const RSV_SIGNATURE_LEN: usize = 65;

/// `secp256k1n / 2`. Signatures with a larger `s` are malleable and rejected.
const SECP256K1N_HALF: B256 =
    b256!("0x7fffffffffffffffffffffffffffffff5d576e7357a4501ddfe92f46681b20a0");

/// Recovers the address that produced an `r || s || v` signature over `hash`.
///
/// Returns `None` for anything that is not a canonical 65-byte signature: wrong length,
/// `v` outside `{27, 28}`, high `s`, or a point that does not recover.
pub fn recover_signer(hash: B256, signature: &[u8]) -> Option<Address> {
    if signature.len() != RSV_SIGNATURE_LEN {
        return None;
    }

    if B256::from_slice(&signature[32..64]) > SECP256K1N_HALF {
        return None;
    }

    let recovery_id = match signature[64] {
        27 | 28 => RecoveryId::from_i32(i32::from(signature[64] - 27)).ok()?,
        _ => return None,
    };

    let recoverable = RecoverableSignature::from_compact(&signature[..64], recovery_id).ok()?;
    let message = Message::from_digest(hash.0);
    let pubkey = SECP256K1.recover_ecdsa(&message, &recoverable).ok()?;

    // The address is the low 20 bytes of the hash of the uncompressed point without its tag.
    let uncompressed = pubkey.serialize_uncompressed();
    let digest = keccak256(&uncompressed[1..]);
    let recovered = Address::from_slice(&digest[12..]);

    (recovered != Address::ZERO).then_some(recovered)
}

/// Checks an EOA signature for `account`.
pub(crate) fn is_valid_eoa_signature(account: Address, hash: B256, signature: &[u8]) -> bool {
    recover_signer(hash, signature) == Some(account)
}
