//! ABI bindings for verifier and contract-signer calls.

use alloy_primitives::{Address, Bytes, FixedBytes, B256};
use alloy_sol_types::{sol, SolCall};

use crate::{Erc1271Signer, Erc7913Verifier, VerifierError};

sol! {
    /// Signature verifier interface for keys that are not native Ethereum accounts.
    interface IERC7913SignatureVerifier {
        /// Returns `IERC7913SignatureVerifier.verify.selector` if the signature is valid.
        function verify(bytes calldata key, bytes32 hash, bytes calldata signature)
            external
            view
            returns (bytes4);
    }

    /// Standard signature validation for contract accounts.
    interface IERC1271 {
        /// Returns `0x1626ba7e` if the signature is valid.
        function isValidSignature(bytes32 hash, bytes memory signature)
            external
            view
            returns (bytes4 magicValue);
    }
}

/// A read-only call into deployed code.
///
/// `Err` carries revert data. `Ok` carries raw return data, which may be anything.
pub trait StaticCall: Send + Sync {
    /// Calls `target` with `calldata`.
    fn static_call(&self, target: Address, calldata: &[u8]) -> Result<Bytes, Bytes>;
}

/// Decodes a `bytes4` return word.
///
/// The whole first word counts: the four value bytes must be followed by zero padding.
fn decode_bytes4(target: Address, ret: &[u8]) -> Result<FixedBytes<4>, VerifierError> {
    let malformed = |reason: &str| VerifierError::MalformedReturn {
        target,
        reason: reason.to_owned(),
    };

    if ret.len() < 32 {
        return Err(malformed("return data shorter than one word"));
    }
    let word = B256::from_slice(&ret[..32]);
    if word[4..].iter().any(|b| *b != 0) {
        return Err(malformed("non-zero padding in bytes4 word"));
    }
    Ok(FixedBytes::from_slice(&word[..4]))
}

/// An [`Erc7913Verifier`] reached through an ABI call to a deployed contract.
#[derive(Debug, Clone)]
pub struct ContractVerifier<C> {
    target: Address,
    caller: C,
}

impl<C: StaticCall> ContractVerifier<C> {
    /// Binds the verifier contract at `target`.
    pub fn new(target: Address, caller: C) -> Self {
        Self { target, caller }
    }

    /// The verifier contract address.
    pub fn target(&self) -> Address {
        self.target
    }
}

impl<C: StaticCall> Erc7913Verifier for ContractVerifier<C> {
    fn verify(
        &self,
        key: &[u8],
        hash: B256,
        signature: &[u8],
    ) -> Result<FixedBytes<4>, VerifierError> {
        let calldata = IERC7913SignatureVerifier::verifyCall {
            key: Bytes::copy_from_slice(key),
            hash,
            signature: Bytes::copy_from_slice(signature),
        }
        .abi_encode();

        let ret = self
            .caller
            .static_call(self.target, &calldata)
            .map_err(|data| VerifierError::Reverted {
                target: self.target,
                data: data.to_vec(),
            })?;

        decode_bytes4(self.target, &ret)
    }
}

/// An [`Erc1271Signer`] reached through an ABI call to a deployed contract account.
#[derive(Debug, Clone)]
pub struct ContractSigner<C> {
    target: Address,
    caller: C,
}

impl<C: StaticCall> ContractSigner<C> {
    /// Binds the contract account at `target`.
    pub fn new(target: Address, caller: C) -> Self {
        Self { target, caller }
    }
}

impl<C: StaticCall> Erc1271Signer for ContractSigner<C> {
    fn is_valid_signature(
        &self,
        hash: B256,
        signature: &[u8],
    ) -> Result<FixedBytes<4>, VerifierError> {
        let calldata = IERC1271::isValidSignatureCall {
            hash,
            signature: Bytes::copy_from_slice(signature),
        }
        .abi_encode();

        let ret = self
            .caller
            .static_call(self.target, &calldata)
            .map_err(|data| VerifierError::Reverted {
                target: self.target,
                data: data.to_vec(),
            })?;

        decode_bytes4(self.target, &ret)
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::address;
    use alloy_sol_types::SolValue;

    use super::*;
    use crate::{
        is_valid_signature_now, SignerDescriptor, VerifierRegistry, ERC1271_INVALID_VALUE,
        ERC1271_MAGIC_VALUE, ERC7913_MAGIC_VALUE,
    };

    /// Echoes whatever it was configured with and records nothing.
    struct FixedReturn(Result<Bytes, Bytes>);

    impl StaticCall for FixedReturn {
        fn static_call(&self, _target: Address, _calldata: &[u8]) -> Result<Bytes, Bytes> {
            self.0.clone()
        }
    }

    /// Answers with the magic value only if the call decodes to the expected arguments.
    struct ExpectKey(Vec<u8>);

    impl StaticCall for ExpectKey {
        fn static_call(&self, _target: Address, calldata: &[u8]) -> Result<Bytes, Bytes> {
            let call = IERC7913SignatureVerifier::verifyCall::abi_decode(calldata)
                .map_err(|_| Bytes::new())?;
            let ret = if call.key[..] == self.0[..] {
                ERC7913_MAGIC_VALUE
            } else {
                FixedBytes::ZERO
            };
            Ok(ret.abi_encode().into())
        }
    }

    /// Contract account that approves one signature over one hash.
    struct ExpectSignature {
        hash: B256,
        signature: Vec<u8>,
    }

    impl StaticCall for ExpectSignature {
        fn static_call(&self, _target: Address, calldata: &[u8]) -> Result<Bytes, Bytes> {
            let call =
                IERC1271::isValidSignatureCall::abi_decode(calldata).map_err(|_| Bytes::new())?;
            let ret = if call.hash == self.hash && call.signature[..] == self.signature[..] {
                ERC1271_MAGIC_VALUE
            } else {
                ERC1271_INVALID_VALUE
            };
            Ok(ret.abi_encode().into())
        }
    }

    const TARGET: Address = address!("0x00000000000000000000000000000000000000c3");
    const ACCOUNT: Address = address!("0x00000000000000000000000000000000000000a7");

    /// `value` followed by non-zero bytes where the padding belongs.
    fn dirty_word(value: FixedBytes<4>) -> Bytes {
        let mut word = [0xffu8; 32];
        word[..4].copy_from_slice(value.as_slice());
        Bytes::copy_from_slice(&word)
    }

    fn clean_word(value: FixedBytes<4>) -> Bytes {
        value.abi_encode().into()
    }

    #[test]
    fn test_verify_call_encoding() {
        let verifier = ContractVerifier::new(TARGET, ExpectKey(vec![9, 9, 9]));
        let hash = B256::repeat_byte(1);

        assert_eq!(
            verifier.verify(&[9, 9, 9], hash, b"sig").unwrap(),
            ERC7913_MAGIC_VALUE
        );
        assert_eq!(
            verifier.verify(&[1], hash, b"sig").unwrap(),
            FixedBytes::ZERO
        );
    }

    #[test]
    fn test_revert_is_error() {
        let verifier = ContractVerifier::new(TARGET, FixedReturn(Err(Bytes::from_static(b"no"))));
        let err = verifier.verify(&[], B256::ZERO, &[]).unwrap_err();
        assert!(matches!(err, VerifierError::Reverted { target, .. } if target == TARGET));
    }

    #[test]
    fn test_short_return_is_malformed() {
        let verifier = ContractVerifier::new(TARGET, FixedReturn(Ok(Bytes::from_static(&[1, 2]))));
        let err = verifier.verify(&[], B256::ZERO, &[]).unwrap_err();
        assert!(matches!(err, VerifierError::MalformedReturn { .. }));
    }

    #[test]
    fn test_dirty_padding_is_malformed() {
        let verifier =
            ContractVerifier::new(TARGET, FixedReturn(Ok(dirty_word(ERC7913_MAGIC_VALUE))));
        let err = verifier.verify(&[], B256::ZERO, &[]).unwrap_err();
        assert!(matches!(err, VerifierError::MalformedReturn { target, .. } if target == TARGET));

        let signer = ContractSigner::new(ACCOUNT, FixedReturn(Ok(dirty_word(ERC1271_MAGIC_VALUE))));
        let err = signer.is_valid_signature(B256::ZERO, &[]).unwrap_err();
        assert!(matches!(err, VerifierError::MalformedReturn { target, .. } if target == ACCOUNT));
    }

    #[test]
    fn test_trailing_data_after_word_is_ignored() {
        let mut ret = clean_word(ERC7913_MAGIC_VALUE).to_vec();
        ret.extend_from_slice(&[0xaa; 8]);
        let verifier = ContractVerifier::new(TARGET, FixedReturn(Ok(ret.into())));
        assert_eq!(
            verifier.verify(&[], B256::ZERO, &[]).unwrap(),
            ERC7913_MAGIC_VALUE
        );
    }

    #[test]
    fn test_is_valid_signature_call_encoding() {
        let hash = B256::repeat_byte(7);
        let signer = ContractSigner::new(
            ACCOUNT,
            ExpectSignature {
                hash,
                signature: b"approved".to_vec(),
            },
        );

        assert_eq!(
            signer.is_valid_signature(hash, b"approved").unwrap(),
            ERC1271_MAGIC_VALUE
        );
        assert_eq!(
            signer.is_valid_signature(hash, b"other").unwrap(),
            ERC1271_INVALID_VALUE
        );
        assert_eq!(
            signer.is_valid_signature(B256::ZERO, b"approved").unwrap(),
            ERC1271_INVALID_VALUE
        );
    }

    #[test]
    fn test_contract_signer_revert_and_short_return() {
        let reverting = ContractSigner::new(ACCOUNT, FixedReturn(Err(Bytes::from_static(b"no"))));
        let err = reverting.is_valid_signature(B256::ZERO, &[]).unwrap_err();
        assert!(matches!(err, VerifierError::Reverted { target, .. } if target == ACCOUNT));

        let short =
            ContractSigner::new(ACCOUNT, FixedReturn(Ok(Bytes::from_static(&[0x16, 0x26]))));
        let err = short.is_valid_signature(B256::ZERO, &[]).unwrap_err();
        assert!(matches!(err, VerifierError::MalformedReturn { .. }));
    }

    /// Runs both adapters through the oracle with the given raw answers.
    fn oracle_accepts(
        verifier_ret: Result<Bytes, Bytes>,
        signer_ret: Result<Bytes, Bytes>,
    ) -> (bool, bool) {
        let mut env = VerifierRegistry::new();
        env.register_verifier(
            TARGET,
            ContractVerifier::new(TARGET, FixedReturn(verifier_ret)),
        )
        .register_contract_signer(
            ACCOUNT,
            ContractSigner::new(ACCOUNT, FixedReturn(signer_ret)),
        );

        let external = SignerDescriptor::external(TARGET, b"key");
        let native = SignerDescriptor::native(ACCOUNT);
        (
            is_valid_signature_now(&env, &external, B256::ZERO, b"sig"),
            is_valid_signature_now(&env, &native, B256::ZERO, b"sig"),
        )
    }

    #[test]
    fn test_oracle_through_adapters() {
        assert_eq!(
            oracle_accepts(
                Ok(clean_word(ERC7913_MAGIC_VALUE)),
                Ok(clean_word(ERC1271_MAGIC_VALUE))
            ),
            (true, true)
        );
        assert_eq!(
            oracle_accepts(
                Ok(dirty_word(ERC7913_MAGIC_VALUE)),
                Ok(dirty_word(ERC1271_MAGIC_VALUE))
            ),
            (false, false)
        );
        assert_eq!(
            oracle_accepts(Err(Bytes::new()), Err(Bytes::new())),
            (false, false)
        );
        assert_eq!(
            oracle_accepts(Ok(Bytes::new()), Ok(Bytes::new())),
            (false, false)
        );
        // Each adapter only accepts its own magic value.
        assert_eq!(
            oracle_accepts(
                Ok(clean_word(ERC1271_MAGIC_VALUE)),
                Ok(clean_word(ERC7913_MAGIC_VALUE))
            ),
            (false, false)
        );
    }
}
