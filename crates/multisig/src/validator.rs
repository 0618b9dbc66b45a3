//! ERC-7579 validator entry points.

use alloy_primitives::{Address, FixedBytes, B256, U256};
use erc7913_signer::{SignatureEnv, ERC1271_INVALID_VALUE, ERC1271_MAGIC_VALUE};

use crate::{Multisig, WeightTable};

/// ERC-7579 module type id of a validator.
pub const MODULE_TYPE_VALIDATOR: U256 = U256::from_limbs([1, 0, 0, 0]);

/// `validationData` for an accepted user operation.
pub const VALIDATION_SUCCESS: U256 = U256::ZERO;

/// `validationData` for a rejected user operation.
pub const VALIDATION_FAILED: U256 = U256::from_limbs([1, 0, 0, 0]);

impl<W: WeightTable> Multisig<W> {
    /// Only the validator type is supported.
    pub fn is_module_type(&self, module_type_id: U256) -> bool {
        module_type_id == MODULE_TYPE_VALIDATOR
    }

    /// Validates a user operation on behalf of `account`, whose signature is a multisignature
    /// blob over `user_op_hash`. Returns [`VALIDATION_SUCCESS`] or [`VALIDATION_FAILED`].
    pub fn validate_user_op<E>(
        &self,
        env: &E,
        account: Address,
        user_op_hash: B256,
        signature: &[u8],
    ) -> U256
    where
        E: SignatureEnv + ?Sized,
    {
        if self.is_valid_multisig_signature(env, account, user_op_hash, signature) {
            VALIDATION_SUCCESS
        } else {
            VALIDATION_FAILED
        }
    }

    /// ERC-1271 check forwarded by `account`. The original `sender` plays no part.
    pub fn is_valid_signature_with_sender<E>(
        &self,
        env: &E,
        account: Address,
        _sender: Address,
        hash: B256,
        signature: &[u8],
    ) -> FixedBytes<4>
    where
        E: SignatureEnv + ?Sized,
    {
        if self.is_valid_multisig_signature(env, account, hash, signature) {
            ERC1271_MAGIC_VALUE
        } else {
            ERC1271_INVALID_VALUE
        }
    }
}
