//! The multisig module: every account's configuration plus the event log.

use std::{
    collections::{hash_map::Entry, HashMap},
    mem,
};

use alloy_primitives::{Address, B256};
use erc7913_signer::{SignatureEnv, SignerDescriptor};
use tracing::{debug, trace};

use crate::{
    decode_multisig_signature, AccountMultisig, InstallData, MultisigEvent, MultisigParams,
    MultisigResult, SignerWeights, UniformWeights, WeightTable,
};

/// Threshold multisig validation for many accounts.
///
/// All state is keyed by the owning account, which every call names explicitly. Accounts
/// never share state.
#[derive(Clone, Debug, Default)]
pub struct Multisig<W = UniformWeights> {
    params: MultisigParams,
    accounts: HashMap<Address, AccountMultisig<W>>,
    events: Vec<MultisigEvent>,
}

/// Multisig where each signer carries its own weight.
pub type WeightedMultisig = Multisig<SignerWeights>;

impl<W: WeightTable> Multisig<W> {
    pub fn new(params: MultisigParams) -> Self {
        Self {
            params,
            accounts: HashMap::new(),
            events: Vec::new(),
        }
    }

    pub fn params(&self) -> &MultisigParams {
        &self.params
    }

    /// Configuration of `account`, if it was ever touched.
    pub fn account(&self, account: Address) -> Option<&AccountMultisig<W>> {
        self.accounts.get(&account)
    }

    /// Events emitted so far, oldest first.
    pub fn events(&self) -> &[MultisigEvent] {
        &self.events
    }

    /// Takes the emitted events, leaving the log empty.
    pub fn drain_events(&mut self) -> Vec<MultisigEvent> {
        mem::take(&mut self.events)
    }

    pub fn signers(&self, account: Address) -> Vec<SignerDescriptor> {
        self.account(account)
            .map(|a| a.signers().as_slice().to_vec())
            .unwrap_or_default()
    }

    pub fn is_signer(&self, account: Address, signer: &SignerDescriptor) -> bool {
        self.account(account).is_some_and(|a| a.is_signer(signer))
    }

    pub fn signer_count(&self, account: Address) -> usize {
        self.account(account).map_or(0, |a| a.signer_count())
    }

    pub fn threshold(&self, account: Address) -> u64 {
        self.account(account).map_or(0, |a| a.threshold())
    }

    /// Weight of `signer` for `account`, 0 for non-members.
    pub fn signer_weight(&self, account: Address, signer: &SignerDescriptor) -> u64 {
        self.account(account).map_or(0, |a| a.signer_weight(signer))
    }

    pub fn total_weight(&self, account: Address) -> u64 {
        self.account(account).map_or(0, |a| a.total_weight())
    }

    /// Whether `account` holds any signer.
    pub fn is_initialized(&self, account: Address) -> bool {
        self.account(account).is_some_and(|a| a.is_configured())
    }

    pub fn add_signers(
        &mut self,
        account: Address,
        signers: &[SignerDescriptor],
    ) -> MultisigResult<()> {
        self.with_account_mut(account, |state, params| state.add_signers(signers, params))?;
        debug!(%account, count = signers.len(), "added signers");
        self.emit_signers_added(account, signers);
        Ok(())
    }

    pub fn remove_signers(
        &mut self,
        account: Address,
        signers: &[SignerDescriptor],
    ) -> MultisigResult<()> {
        self.with_account_mut(account, |state, _| state.remove_signers(signers))?;
        debug!(%account, count = signers.len(), "removed signers");
        if !signers.is_empty() {
            self.events.push(MultisigEvent::SignersRemoved {
                account,
                signers: signers.to_vec(),
            });
        }
        Ok(())
    }

    pub fn set_threshold(&mut self, account: Address, threshold: u64) -> MultisigResult<()> {
        self.with_account_mut(account, |state, _| state.set_threshold(threshold))?;
        debug!(%account, threshold, "set threshold");
        self.events
            .push(MultisigEvent::ThresholdSet { account, threshold });
        Ok(())
    }

    /// Checks a multisignature for `account` given as parallel arrays.
    ///
    /// Accounts that were never configured reject everything.
    pub fn validate_signatures<E, G>(
        &self,
        env: &E,
        account: Address,
        hash: B256,
        signers: &[SignerDescriptor],
        signatures: &[G],
    ) -> bool
    where
        E: SignatureEnv + ?Sized,
        G: AsRef<[u8]>,
    {
        match self.account(account) {
            Some(state) => state.validate_signatures(env, hash, signers, signatures),
            None => {
                trace!(%account, "rejecting multisig: unknown account");
                false
            }
        }
    }

    /// Checks an `abi.encode(bytes[] signers, bytes[] signatures)` blob for `account`.
    pub fn is_valid_multisig_signature<E>(
        &self,
        env: &E,
        account: Address,
        hash: B256,
        blob: &[u8],
    ) -> bool
    where
        E: SignatureEnv + ?Sized,
    {
        let Some((signers, signatures)) = decode_multisig_signature(blob) else {
            trace!(%account, len = blob.len(), "rejecting multisig: undecodable blob");
            return false;
        };
        self.validate_signatures(env, account, hash, &signers, &signatures)
    }

    /// Drops all configuration of `account`. `data` is ignored.
    pub fn on_uninstall(&mut self, account: Address, _data: &[u8]) {
        if let Some(mut state) = self.accounts.remove(&account) {
            debug!(%account, count = state.signer_count(), "uninstalled");
            state.clear();
        }
    }

    /// Removes up to `limit` signers of `account`, returning how many remain.
    ///
    /// Threshold and weights go with the first page, so the account stops validating at once.
    /// The account is forgotten when nothing remains.
    pub fn clear_signers_page(&mut self, account: Address, limit: usize) -> usize {
        let Some(state) = self.accounts.get_mut(&account) else {
            return 0;
        };
        let remaining = state.clear_page(limit);
        debug!(%account, remaining, "cleared signer page");
        if remaining == 0 {
            self.accounts.remove(&account);
        }
        remaining
    }

    /// Runs `f` on the state of `account`, creating it if needed. A new state is only kept if
    /// `f` succeeds and leaves it with at least one signer.
    fn with_account_mut<T>(
        &mut self,
        account: Address,
        f: impl FnOnce(&mut AccountMultisig<W>, &MultisigParams) -> MultisigResult<T>,
    ) -> MultisigResult<T> {
        match self.accounts.entry(account) {
            Entry::Occupied(mut entry) => f(entry.get_mut(), &self.params),
            Entry::Vacant(entry) => {
                let mut state = AccountMultisig::default();
                let out = f(&mut state, &self.params)?;
                if state.is_configured() {
                    entry.insert(state);
                }
                Ok(out)
            }
        }
    }

    /// Installs a fresh configuration on `account` unless it already has one.
    ///
    /// The state is built aside and stored only after the threshold applies on top of it.
    fn install(
        &mut self,
        account: Address,
        init_data: &[u8],
        decode: impl FnOnce(&[u8]) -> MultisigResult<InstallData>,
        apply_weights: impl FnOnce(
            &mut AccountMultisig<W>,
            &InstallData,
        ) -> MultisigResult<Vec<MultisigEvent>>,
    ) -> MultisigResult<()> {
        if init_data.is_empty() || self.is_initialized(account) {
            trace!(%account, "skipping install");
            return Ok(());
        }

        let data = decode(init_data)?;
        let mut state = AccountMultisig::default();
        state.add_signers(&data.signers, &self.params)?;
        let weight_events = apply_weights(&mut state, &data)?;
        state.set_threshold(data.threshold)?;

        debug!(
            %account,
            signers = data.signers.len(),
            threshold = data.threshold,
            "installed"
        );
        self.accounts.insert(account, state);
        self.emit_signers_added(account, &data.signers);
        self.events.extend(weight_events);
        self.events.push(MultisigEvent::ThresholdSet {
            account,
            threshold: data.threshold,
        });
        Ok(())
    }

    fn emit_signers_added(&mut self, account: Address, signers: &[SignerDescriptor]) {
        if !signers.is_empty() {
            self.events.push(MultisigEvent::SignersAdded {
                account,
                signers: signers.to_vec(),
            });
        }
    }
}

impl Multisig<UniformWeights> {
    /// Configures `account` from `abi.encode(bytes[] signers, uint64 threshold)`.
    ///
    /// No-op for empty data or an account that already has signers.
    pub fn on_install(&mut self, account: Address, init_data: &[u8]) -> MultisigResult<()> {
        self.install(account, init_data, InstallData::decode, |_, _| Ok(Vec::new()))
    }
}

impl Multisig<SignerWeights> {
    /// Configures `account` from
    /// `abi.encode(bytes[] signers, uint64 threshold, uint64[] weights)`.
    ///
    /// No-op for empty data or an account that already has signers.
    pub fn on_install(&mut self, account: Address, init_data: &[u8]) -> MultisigResult<()> {
        self.install(
            account,
            init_data,
            InstallData::decode_weighted,
            |state, data| {
                let weights = data.weights.as_deref().unwrap_or_default();
                state.set_signer_weights(&data.signers, weights)?;
                Ok(weight_events(account, &data.signers, weights))
            },
        )
    }

    /// Overwrites the weights of existing signers of `account`, applied in order.
    pub fn set_signer_weights(
        &mut self,
        account: Address,
        signers: &[SignerDescriptor],
        weights: &[u64],
    ) -> MultisigResult<()> {
        let total = self.with_account_mut(account, |state, _| {
            state.set_signer_weights(signers, weights)?;
            Ok(state.total_weight())
        })?;
        debug!(%account, count = signers.len(), total, "set weights");
        self.events.extend(weight_events(account, signers, weights));
        Ok(())
    }
}

fn weight_events(
    account: Address,
    signers: &[SignerDescriptor],
    weights: &[u64],
) -> Vec<MultisigEvent> {
    signers
        .iter()
        .zip(weights)
        .map(|(signer, &weight)| MultisigEvent::SignerWeightChanged {
            account,
            signer: signer.clone(),
            weight,
        })
        .collect()
}
