use crate::{
    domain::{
        DashboardError, LedgerError, StakeCommand, StakeConfirmed, StakeContext, StakeEvent,
        StakeOutcome, StakePhase, StakeRejected, StakeReverted, StakeSubmitted, StakeValidated,
        SubmitStage, ValidatedStake, Wallet,
    },
    port::{Engine, EventHandler, LedgerClient, SessionCallback, StakeHandler},
};
use async_trait::async_trait;
use std::sync::Arc;

/// Runs freeze/unfreeze actions against the node
pub struct StakeEngine {
    ledger: Arc<dyn LedgerClient>,
    /// Presentation callbacks, notified after each applied event
    user_callbacks: Vec<Arc<dyn SessionCallback>>,
}

impl StakeEngine {
    pub fn new(ledger: Arc<dyn LedgerClient>) -> Self {
        Self {
            ledger,
            user_callbacks: Vec::with_capacity(4),
        }
    }

    /// Add a callback to be invoked after every applied stake event
    pub fn with_callback(mut self, callback: Arc<dyn SessionCallback>) -> Self {
        self.user_callbacks.push(callback);
        self
    }

    /// Apply `event` to `phase`, notify callbacks and record the event
    ///
    /// A failing callback is logged and skipped: once the node has the
    /// transaction, presentation must not change the outcome.
    async fn record(
        &self,
        phase: &StakePhase,
        event: StakeEvent,
        events: &mut Vec<StakeEvent>,
    ) -> Result<StakePhase, DashboardError> {
        let next = event
            .apply(phase)
            .ok_or(DashboardError::StateTransitionFailed)?;

        for callback in &self.user_callbacks {
            if let Err(e) = callback.on_stake_event(&event, &next).await {
                tracing::warn!(phase = next.name(), error = %e, "stake callback failed");
            }
        }

        events.push(event);
        Ok(next)
    }

    /// Record the revert to draft and hand back the stage error
    async fn revert(
        &self,
        phase: &StakePhase,
        stage: SubmitStage,
        source: LedgerError,
        events: &mut Vec<StakeEvent>,
    ) -> DashboardError {
        tracing::warn!(%stage, error = %source, "stake submission failed, back to draft");

        let reverted = StakeEvent::Reverted(StakeReverted {
            stage,
            reason: source.to_string(),
        });
        if let Err(e) = self.record(phase, reverted, events).await {
            return e;
        }

        DashboardError::Submission { stage, source }
    }

    fn handler(command: &StakeCommand) -> &(dyn StakeHandler + Send + Sync) {
        match command {
            StakeCommand::Freeze(cmd) => cmd,
            StakeCommand::Unfreeze(cmd) => cmd,
        }
    }
}

#[async_trait]
impl Engine for StakeEngine {
    /// Process a staking action:
    /// 1. Validate the typed input (Draft -> Validated)
    /// 2. Build, sign and transmit (Validated -> Submitted)
    /// 3. Read the acknowledgement (Submitted -> Confirmed | Rejected)
    ///
    /// A failure in step 1 leaves the phase untouched; a failure in step 2
    /// reverts to Draft and names the stage.
    async fn process_command(
        &self,
        command: &StakeCommand,
        wallet: &Wallet,
        context: &StakeContext,
    ) -> Result<StakeOutcome, DashboardError> {
        let handler = Self::handler(command);
        let mut events = Vec::with_capacity(4);

        // 1. Validation: pure, no network call on failure
        let stake: ValidatedStake = handler.validate(&wallet.address)?;
        tracing::info!(
            action = %stake.action,
            amount = %stake.amount,
            resource = %stake.resource,
            receiver = %stake.receiver,
            "stake action validated"
        );
        let phase = self
            .record(
                &context.current_phase,
                StakeEvent::Validated(StakeValidated {
                    stake: stake.clone(),
                }),
                &mut events,
            )
            .await?;

        // 2. Build -> sign -> transmit
        let unsigned = match handler.build(&stake, self.ledger.as_ref()).await {
            Ok(tx) => tx,
            Err(e) => {
                return Err(self
                    .revert(&phase, SubmitStage::Build, e, &mut events)
                    .await);
            }
        };

        let signed = match self.ledger.sign(unsigned, &wallet.private_key).await {
            Ok(tx) => tx,
            Err(e) => {
                return Err(self.revert(&phase, SubmitStage::Sign, e, &mut events).await);
            }
        };

        let receipt = match self.ledger.send_raw_transaction(&signed).await {
            Ok(receipt) => receipt,
            Err(e) => {
                return Err(self
                    .revert(&phase, SubmitStage::Submit, e, &mut events)
                    .await);
            }
        };

        let tx_id = if receipt.tx_id.is_empty() {
            signed.tx_id.clone()
        } else {
            receipt.tx_id.clone()
        };
        let phase = self
            .record(
                &phase,
                StakeEvent::Submitted(StakeSubmitted {
                    tx_id: tx_id.clone(),
                }),
                &mut events,
            )
            .await?;

        // 3. Acknowledgement: accepted into the pool, not final
        let terminal = if receipt.accepted {
            tracing::info!(%tx_id, "node acknowledged stake transaction");
            StakeEvent::Confirmed(StakeConfirmed { tx_id })
        } else {
            let reason = receipt
                .message
                .or(receipt.code)
                .unwrap_or_else(|| "transaction not acknowledged".to_string());
            tracing::warn!(%tx_id, %reason, "node rejected stake transaction");
            StakeEvent::Rejected(StakeRejected { tx_id, reason })
        };
        let phase = self.record(&phase, terminal, &mut events).await?;

        Ok(StakeOutcome { events, phase })
    }
}
