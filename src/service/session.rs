use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::adapter::StakeEngine;
use crate::domain::{
    Account, DashboardError, Freeze, FreezeRecord, ResourceView, StakeCommand, StakeContext,
    StakeEvent, StakeOutcome, StakePhase, StoreError, TokenBalance, Unfreeze, ValidationError,
    Wallet, compute_resource_view,
};
use crate::port::{Engine, KeyDeriver, LedgerClient, SessionCallback, WalletStore};

/// Part of a refresh that can fail on its own.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub enum RefreshPart {
    Account,
    Resources,
    Token,
}

/// Outcome of one refresh fan-out.
///
/// Failed parts keep whatever the session already had for them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshReport {
    pub address: String,
    /// Another refresh was running; nothing was fetched.
    pub skipped: bool,
    pub failures: Vec<(RefreshPart, DashboardError)>,
}

impl RefreshReport {
    fn skipped(address: String) -> Self {
        Self {
            address,
            skipped: true,
            failures: Vec::new(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.skipped && self.failures.is_empty()
    }
}

/// What `load_from_store` found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Empty,
    Loaded(RefreshReport),
    /// The record could not be read and has been deleted.
    Discarded(DashboardError),
}

/// Read-only copy of everything the session caches. Carries no key material.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionSnapshot {
    pub address: Option<String>,
    pub account: Option<Account>,
    pub resources: Option<ResourceView>,
    pub frozen: Vec<FreezeRecord>,
    pub tokens: Vec<TokenBalance>,
    /// Last stake input, kept until the node acknowledges it.
    pub stake_form: Option<Freeze>,
    /// Last unstake input, kept until the node acknowledges it.
    pub unstake_form: Option<Unfreeze>,
    pub phase: StakePhase,
}

#[derive(Default)]
struct SessionState {
    wallet: Option<Wallet>,
    account: Option<Account>,
    resources: Option<ResourceView>,
    frozen: Vec<FreezeRecord>,
    tokens: Vec<TokenBalance>,
    stake_form: Option<Freeze>,
    unstake_form: Option<Unfreeze>,
    phase: StakePhase,
}

/// Mirrors every phase the engine records into the session, so a snapshot
/// taken mid-action shows `Validated` or `Submitted`.
struct PhaseTracker {
    state: Arc<RwLock<SessionState>>,
}

#[async_trait]
impl SessionCallback for PhaseTracker {
    async fn on_stake_event(
        &self,
        _event: &StakeEvent,
        phase: &StakePhase,
    ) -> Result<(), DashboardError> {
        self.state.write().await.phase = phase.clone();
        Ok(())
    }
}

/// Clears its flag when dropped.
struct FlagGuard<'a>(&'a AtomicBool);

impl<'a> FlagGuard<'a> {
    /// `None` when the flag was already set.
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        (!flag.swap(true, Ordering::AcqRel)).then_some(Self(flag))
    }
}

impl Drop for FlagGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// The single active wallet and the ledger data cached for it.
pub struct WalletSession {
    ledger: Arc<dyn LedgerClient>,
    keys: Arc<dyn KeyDeriver>,
    store: Arc<dyn WalletStore>,
    engine: Arc<dyn Engine + Send + Sync>,
    callbacks: Vec<Arc<dyn SessionCallback>>,
    state: Arc<RwLock<SessionState>>,
    refreshing: AtomicBool,
    staking: AtomicBool,
}

impl WalletSession {
    pub fn new(
        ledger: Arc<dyn LedgerClient>,
        keys: Arc<dyn KeyDeriver>,
        store: Arc<dyn WalletStore>,
    ) -> Self {
        let state = Arc::new(RwLock::new(SessionState::default()));
        let engine = Self::stake_engine(&ledger, &state, &[]);
        Self {
            ledger,
            keys,
            store,
            engine,
            callbacks: Vec::new(),
            state,
            refreshing: AtomicBool::new(false),
            staking: AtomicBool::new(false),
        }
    }

    /// Register a presentation callback with the session and its stake engine.
    pub fn with_callback(mut self, callback: Arc<dyn SessionCallback>) -> Self {
        self.callbacks.push(callback);
        self.engine = Self::stake_engine(&self.ledger, &self.state, &self.callbacks);
        self
    }

    /// The phase tracker runs first so callbacks observe the session in
    /// the phase they are told about.
    fn stake_engine(
        ledger: &Arc<dyn LedgerClient>,
        state: &Arc<RwLock<SessionState>>,
        callbacks: &[Arc<dyn SessionCallback>],
    ) -> Arc<dyn Engine + Send + Sync> {
        let tracker = PhaseTracker {
            state: state.clone(),
        };
        let engine = callbacks.iter().fold(
            StakeEngine::new(ledger.clone()).with_callback(Arc::new(tracker)),
            |engine, callback| engine.with_callback(callback.clone()),
        );
        Arc::new(engine)
    }

    pub async fn address(&self) -> Option<String> {
        self.state
            .read()
            .await
            .wallet
            .as_ref()
            .map(|w| w.address.clone())
    }

    /// Phrase of the active wallet, for an explicit backup request.
    pub async fn recovery_phrase(&self) -> Option<String> {
        self.state
            .read()
            .await
            .wallet
            .as_ref()
            .map(|w| w.recovery_phrase.clone())
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        let state = self.state.read().await;
        SessionSnapshot {
            address: state.wallet.as_ref().map(|w| w.address.clone()),
            account: state.account.clone(),
            resources: state.resources,
            frozen: state.frozen.clone(),
            tokens: state.tokens.clone(),
            stake_form: state.stake_form.clone(),
            unstake_form: state.unstake_form.clone(),
            phase: state.phase.clone(),
        }
    }

    /// Restore the persisted wallet, if any.
    ///
    /// An unreadable record is deleted and reported, never installed.
    pub async fn load_from_store(&self) -> Result<LoadOutcome, DashboardError> {
        let wallet = match self.store.get().await {
            Ok(None) => return Ok(LoadOutcome::Empty),
            Ok(Some(record)) => Wallet::from_record(&record)
                .map_err(|e| e.to_string())
                .and_then(|wallet| self.verify(wallet)),
            Err(StoreError::Corrupt(reason)) => Err(reason),
            Err(e) => return Err(e.into()),
        };

        let wallet = match wallet {
            Ok(wallet) => wallet,
            Err(reason) => {
                tracing::warn!(%reason, "discarding unreadable wallet record");
                self.store.delete().await?;
                self.install(None).await?;
                return Ok(LoadOutcome::Discarded(DashboardError::CorruptState(reason)));
            }
        };

        tracing::info!(address = %wallet.address, "wallet restored");
        self.install(Some(wallet)).await?;
        Ok(LoadOutcome::Loaded(self.refresh().await?))
    }

    /// Re-derive the key pair from the stored phrase; a record whose address
    /// or key disagrees with it is treated as unreadable.
    fn verify(&self, wallet: Wallet) -> Result<Wallet, String> {
        let material = self
            .keys
            .phrase_to_key(&wallet.recovery_phrase)
            .map_err(|e| format!("stored phrase does not derive a key: {e}"))?;
        if material.address != wallet.address {
            return Err(format!(
                "stored address {} does not match its recovery phrase",
                wallet.address
            ));
        }
        if material.private_key != wallet.private_key {
            return Err("stored private key does not match its recovery phrase".to_string());
        }
        Ok(wallet)
    }

    /// Derive a wallet from `phrase`, make it active, persist it and refresh.
    ///
    /// Refuses while another wallet is loaded or stored: the record is the
    /// only copy of its key, so replacing it goes through [`clear`].
    ///
    /// [`clear`]: WalletSession::clear
    pub async fn import_from_phrase(&self, phrase: &str) -> Result<RefreshReport, DashboardError> {
        let phrase = phrase.split_whitespace().collect::<Vec<_>>().join(" ");
        if phrase.is_empty() {
            return Err(ValidationError::EmptyPhrase.into());
        }

        if self.address().await.is_some() {
            return Err(ValidationError::WalletExists.into());
        }
        match self.store.get().await {
            Ok(Some(_)) => return Err(ValidationError::WalletExists.into()),
            // an unreadable record holds no recoverable key
            Ok(None) | Err(StoreError::Corrupt(_)) => {}
            Err(e) => return Err(e.into()),
        }

        let material = self.keys.phrase_to_key(&phrase)?;
        let wallet = Wallet::new(material, phrase);

        let record = wallet
            .to_record()
            .map_err(|e| StoreError::Io(format!("cannot encode wallet record: {e}")))?;
        self.store.put(&record).await?;

        tracing::info!(address = %wallet.address, "wallet imported");
        self.install(Some(wallet)).await?;
        self.refresh().await
    }

    /// Forget the wallet for good. Needs `confirmed`; the key material is gone
    /// afterwards.
    pub async fn clear(&self, confirmed: bool) -> Result<(), DashboardError> {
        if !confirmed {
            return Err(ValidationError::ConfirmationRequired.into());
        }
        self.store.delete().await?;
        self.install(None).await
    }

    /// Fetch account, resources and token metadata for the active wallet.
    ///
    /// Each part fails on its own: a failed part keeps its previous value.
    /// A refresh that starts while another is running is skipped.
    pub async fn refresh(&self) -> Result<RefreshReport, DashboardError> {
        let address = self.require_address().await?;
        let Some(_guard) = FlagGuard::acquire(&self.refreshing) else {
            tracing::debug!(%address, "refresh already running, skipped");
            return Ok(RefreshReport::skipped(address));
        };
        Ok(self.fetch(address, true).await)
    }

    pub async fn stake(&self, form: Freeze) -> Result<StakeOutcome, DashboardError> {
        self.submit(StakeCommand::Freeze(form)).await
    }

    pub async fn unstake(&self, form: Unfreeze) -> Result<StakeOutcome, DashboardError> {
        self.submit(StakeCommand::Unfreeze(form)).await
    }

    /// Run one stake action to completion.
    ///
    /// Confirmed: forms cleared, account and resources fetched once.
    /// Rejected: reported as [`DashboardError::Rejected`], form kept.
    /// Any other failure: phase back to `Draft`, form kept.
    async fn submit(&self, command: StakeCommand) -> Result<StakeOutcome, DashboardError> {
        let wallet = self
            .state
            .read()
            .await
            .wallet
            .clone()
            .ok_or(ValidationError::NoActiveWallet)?;

        let Some(_guard) = FlagGuard::acquire(&self.staking) else {
            return Err(ValidationError::StakeInFlight.into());
        };

        let context = {
            let mut state = self.state.write().await;
            match &command {
                StakeCommand::Freeze(form) => state.stake_form = Some(form.clone()),
                StakeCommand::Unfreeze(form) => state.unstake_form = Some(form.clone()),
            }
            StakeContext {
                current_phase: state.phase.clone(),
            }
        };

        let result = self
            .engine
            .process_command(&command, &wallet, &context)
            .await;

        let outcome = match result {
            Ok(outcome) => outcome,
            Err(e) => {
                self.state.write().await.phase = StakePhase::Draft;
                return Err(e);
            }
        };

        {
            let mut state = self.state.write().await;
            state.phase = outcome.phase.clone();
            if outcome.is_confirmed() {
                match &command {
                    StakeCommand::Freeze(_) => state.stake_form = None,
                    StakeCommand::Unfreeze(_) => state.unstake_form = None,
                }
            }
        }

        match &outcome.phase {
            StakePhase::Confirmed { .. } => {
                // the position changed on-chain; tokens did not
                let report = self.fetch(wallet.address.clone(), false).await;
                if !report.failures.is_empty() {
                    tracing::warn!(failures = report.failures.len(), "post-stake refresh incomplete");
                }
                Ok(outcome)
            }
            StakePhase::Rejected { tx_id, reason, .. } => Err(DashboardError::Rejected {
                tx_id: tx_id.clone(),
                reason: reason.clone(),
            }),
            _ => Err(DashboardError::StateTransitionFailed),
        }
    }

    async fn require_address(&self) -> Result<String, DashboardError> {
        self.address()
            .await
            .ok_or_else(|| ValidationError::NoActiveWallet.into())
    }

    /// Replace the active wallet and drop everything cached for the old one.
    async fn install(&self, wallet: Option<Wallet>) -> Result<(), DashboardError> {
        let address = wallet.as_ref().map(|w| w.address.clone());
        *self.state.write().await = SessionState {
            wallet,
            ..SessionState::default()
        };
        for callback in &self.callbacks {
            callback.on_wallet_changed(address.as_deref()).await?;
        }
        Ok(())
    }

    async fn fetch(&self, address: String, with_tokens: bool) -> RefreshReport {
        let mut failures = Vec::new();

        let (account, resources) = tokio::join!(
            self.ledger.get_account(&address),
            self.ledger.get_account_resources(&address)
        );

        let account = match account {
            Ok(account) => Some(account),
            Err(e) => {
                tracing::warn!(%address, error = %e, "account fetch failed");
                failures.push((RefreshPart::Account, e.into()));
                None
            }
        };

        let resources = match resources {
            Ok(snapshot) => Some(compute_resource_view(&snapshot)),
            Err(e) => {
                tracing::warn!(%address, error = %e, "resource fetch failed");
                failures.push((RefreshPart::Resources, e.into()));
                None
            }
        };

        let mut tokens = None;
        if with_tokens {
            if let Some(account) = &account {
                let mut balances = Vec::with_capacity(account.tokens.len());
                for (id, raw) in &account.tokens {
                    match self.ledger.get_token_by_id(id).await {
                        Ok(info) => balances.push(TokenBalance { info, raw: *raw }),
                        Err(e) => {
                            tracing::warn!(token = %id, error = %e, "token lookup failed, skipped");
                            failures.push((RefreshPart::Token, e.into()));
                        }
                    }
                }
                tokens = Some(balances);
            }
        }

        {
            let mut state = self.state.write().await;
            // the wallet may have changed while we were fetching
            if state.wallet.as_ref().map(|w| w.address.as_str()) == Some(address.as_str()) {
                if let Some(account) = account {
                    state.frozen = account.frozen.clone();
                    state.account = Some(account);
                }
                if let Some(view) = resources {
                    state.resources = Some(view);
                }
                if let Some(tokens) = tokens {
                    state.tokens = tokens;
                }
            }
        }

        if let Some(view) = &resources {
            for callback in &self.callbacks {
                if let Err(e) = callback.on_resources(view).await {
                    tracing::warn!(error = %e, "resource callback failed");
                }
            }
        }

        RefreshReport {
            address,
            skipped: false,
            failures,
        }
    }
}
