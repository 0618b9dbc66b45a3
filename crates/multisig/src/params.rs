use serde::{Deserialize, Serialize};

/// Default for [`MultisigParams::max_signers`].
pub const DEFAULT_MAX_SIGNERS: usize = 256;

/// Limits shared by every account of a multisig module.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MultisigParams {
    /// Most signers a single account may hold.
    ///
    /// Bounds the work of full-set reads and of clearing an account on uninstall.
    #[serde(default = "default_max_signers")]
    pub max_signers: usize,
}

fn default_max_signers() -> usize {
    DEFAULT_MAX_SIGNERS
}

impl Default for MultisigParams {
    fn default() -> Self {
        Self {
            max_signers: DEFAULT_MAX_SIGNERS,
        }
    }
}
