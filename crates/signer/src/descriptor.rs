//! Signer descriptors and their canonical identifiers.

use std::fmt;

use alloy_primitives::{keccak256, Address, Bytes, B256};
use arbitrary::Arbitrary;
use serde::{Deserialize, Serialize};

/// Width of the verifier identity at the head of a descriptor.
///
/// This is also the minimum length of a well-formed descriptor.
pub const VERIFIER_LEN: usize = 20;

/// Upper bound on the key length produced by the [`Arbitrary`] impl.
const ARB_MAX_KEY_LEN: usize = 96;

/// An opaque signer descriptor: `verifier || key`, or a bare 20-byte account.
///
/// Descriptors are compared by content and ordered by [`SignerId`], never by raw bytes.
/// Construction does not validate the length; malformed descriptors are representable so
/// that they can be rejected where they show up.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignerDescriptor(Bytes);

impl SignerDescriptor {
    /// Wraps raw descriptor bytes.
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self(bytes.into())
    }

    /// Descriptor for a native account, checked by ECDSA recovery or ERC-1271.
    pub fn native(account: Address) -> Self {
        Self(Bytes::copy_from_slice(account.as_slice()))
    }

    /// Descriptor for a key checked by the ERC-7913 verifier at `verifier`.
    pub fn external(verifier: Address, key: &[u8]) -> Self {
        let mut buf = Vec::with_capacity(VERIFIER_LEN + key.len());
        buf.extend_from_slice(verifier.as_slice());
        buf.extend_from_slice(key);
        Self(buf.into())
    }

    /// Raw descriptor bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the descriptor has no bytes at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether the descriptor is long enough to carry a verifier identity.
    pub fn is_well_formed(&self) -> bool {
        self.0.len() >= VERIFIER_LEN
    }

    /// Canonical identifier, `keccak256(descriptor)`.
    pub fn id(&self) -> SignerId {
        SignerId(keccak256(&self.0))
    }

    /// Splits the descriptor into its tagged form, or `None` if it is malformed.
    pub fn kind(&self) -> Option<SignerKind<'_>> {
        match self.0.len() {
            n if n < VERIFIER_LEN => None,
            VERIFIER_LEN => Some(SignerKind::Native(Address::from_slice(&self.0))),
            _ => {
                let (verifier, key) = self.0.split_at(VERIFIER_LEN);
                Some(SignerKind::External {
                    verifier: Address::from_slice(verifier),
                    key,
                })
            }
        }
    }

    /// Consumes the descriptor, returning the inner bytes.
    pub fn into_inner(self) -> Bytes {
        self.0
    }
}

impl fmt::Debug for SignerDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SignerDescriptor({})", self.0)
    }
}

impl fmt::Display for SignerDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<Bytes> for SignerDescriptor {
    fn from(bytes: Bytes) -> Self {
        Self(bytes)
    }
}

impl From<SignerDescriptor> for Bytes {
    fn from(descriptor: SignerDescriptor) -> Self {
        descriptor.0
    }
}

impl From<Address> for SignerDescriptor {
    fn from(account: Address) -> Self {
        Self::native(account)
    }
}

impl AsRef<[u8]> for SignerDescriptor {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<SignerDescriptor> for SignerDescriptor {
    fn as_ref(&self) -> &SignerDescriptor {
        self
    }
}

impl<'a> Arbitrary<'a> for SignerDescriptor {
    /// Always well-formed: a verifier identity followed by a key of up to 96 bytes.
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        let verifier = <[u8; VERIFIER_LEN]>::arbitrary(u)?;
        let key_len = u.int_in_range(0..=ARB_MAX_KEY_LEN)?;
        let key = u.bytes(key_len)?;
        Ok(Self::external(Address::from(verifier), key))
    }
}

/// The tagged form of a well-formed descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignerKind<'a> {
    /// A 20-byte native account.
    Native(Address),

    /// A key whose signatures are checked by an external ERC-7913 verifier.
    External {
        /// Address of the verifier.
        verifier: Address,
        /// Key bytes handed to the verifier, possibly empty.
        key: &'a [u8],
    },
}

/// Canonical signer identifier, the keccak256 digest of the descriptor bytes.
///
/// Requests must list signers in strictly increasing id order. [`SignerId::ZERO`] is the floor
/// the first id is compared against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignerId(B256);

impl SignerId {
    /// The smallest id, used as the starting point of an ordering walk.
    pub const ZERO: Self = Self(B256::ZERO);

    /// Wraps a raw digest.
    pub const fn new(digest: B256) -> Self {
        Self(digest)
    }

    /// The underlying digest.
    pub fn as_b256(&self) -> &B256 {
        &self.0
    }
}

impl fmt::Display for SignerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<SignerId> for B256 {
    fn from(id: SignerId) -> Self {
        id.0
    }
}
