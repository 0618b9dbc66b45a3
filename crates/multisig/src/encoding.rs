//! ABI payloads: multisignature blobs and install data.

use alloy_primitives::Bytes;
use alloy_sol_types::SolValue;
use erc7913_signer::SignerDescriptor;

use crate::{MultisigError, MultisigResult};

type SignatureTuple = (Vec<Bytes>, Vec<Bytes>);
type InstallTuple = (Vec<Bytes>, u64);
type WeightedInstallTuple = (Vec<Bytes>, u64, Vec<u64>);

/// Encodes `abi.encode(bytes[] signers, bytes[] signatures)`.
///
/// Signers must already be in increasing id order for the blob to verify.
pub fn encode_multisig_signature<G: AsRef<[u8]>>(
    signers: &[SignerDescriptor],
    signatures: &[G],
) -> Vec<u8> {
    let signers = signers.iter().map(|s| s.clone().into_inner()).collect();
    let signatures = signatures
        .iter()
        .map(|s| Bytes::copy_from_slice(s.as_ref()))
        .collect();
    SignatureTuple::abi_encode_params(&(signers, signatures))
}

/// Decodes a multisignature blob, or `None` if it is not a valid encoding.
pub fn decode_multisig_signature(blob: &[u8]) -> Option<(Vec<SignerDescriptor>, Vec<Bytes>)> {
    let (signers, signatures) = SignatureTuple::abi_decode_params(blob).ok()?;
    Some((
        signers.into_iter().map(SignerDescriptor::from).collect(),
        signatures,
    ))
}

/// Initial configuration handed to `on_install`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InstallData {
    pub signers: Vec<SignerDescriptor>,
    pub threshold: u64,
    /// Parallel to `signers`. Only the weighted module carries it.
    pub weights: Option<Vec<u64>>,
}

impl InstallData {
    /// `abi.encode(bytes[], uint64)`, or `abi.encode(bytes[], uint64, uint64[])` when weights
    /// are present.
    pub fn abi_encode(&self) -> Vec<u8> {
        let signers: Vec<Bytes> = self
            .signers
            .iter()
            .map(|s| s.clone().into_inner())
            .collect();
        match &self.weights {
            None => InstallTuple::abi_encode_params(&(signers, self.threshold)),
            Some(weights) => WeightedInstallTuple::abi_encode_params(&(
                signers,
                self.threshold,
                weights.clone(),
            )),
        }
    }

    /// Decodes the unweighted layout.
    pub fn decode(data: &[u8]) -> MultisigResult<Self> {
        let (signers, threshold) = InstallTuple::abi_decode_params(data)
            .map_err(|e| MultisigError::InvalidInstallData(e.to_string()))?;
        Ok(Self {
            signers: signers.into_iter().map(SignerDescriptor::from).collect(),
            threshold,
            weights: None,
        })
    }

    /// Decodes the weighted layout.
    pub fn decode_weighted(data: &[u8]) -> MultisigResult<Self> {
        let (signers, threshold, weights) = WeightedInstallTuple::abi_decode_params(data)
            .map_err(|e| MultisigError::InvalidInstallData(e.to_string()))?;
        Ok(Self {
            signers: signers.into_iter().map(SignerDescriptor::from).collect(),
            threshold,
            weights: Some(weights),
        })
    }
}
