use crate::domain::*;
use async_trait::async_trait;

/// Presentation hooks invoked by the session and the stake engine.
///
/// Implementations render or forward what happened; they hold no decision
/// logic. Every method defaults to a no-op.
#[async_trait]
pub trait SessionCallback: Send + Sync {
    /// Called after a stake event has been applied to the phase.
    async fn on_stake_event(
        &self,
        event: &StakeEvent,
        phase: &StakePhase,
    ) -> Result<(), DashboardError> {
        let _ = (event, phase);
        Ok(())
    }

    /// Called when a wallet is installed (`Some`) or unloaded (`None`).
    async fn on_wallet_changed(&self, address: Option<&str>) -> Result<(), DashboardError> {
        let _ = address;
        Ok(())
    }

    /// Called after a refresh recomputed the resource view.
    async fn on_resources(&self, view: &ResourceView) -> Result<(), DashboardError> {
        let _ = view;
        Ok(())
    }
}
