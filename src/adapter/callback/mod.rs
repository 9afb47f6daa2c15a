use crate::domain::*;
use crate::port::SessionCallback;
use async_trait::async_trait;

/// Callback adapter: turns session notifications into structured log lines
pub struct TracingCallback;

#[async_trait]
impl SessionCallback for TracingCallback {
    async fn on_stake_event(
        &self,
        event: &StakeEvent,
        phase: &StakePhase,
    ) -> Result<(), DashboardError> {
        match event {
            StakeEvent::Validated(e) => tracing::debug!(
                phase = phase.name(),
                action = %e.stake.action,
                amount = %e.stake.amount,
                "stake validated"
            ),
            StakeEvent::Submitted(e) => {
                tracing::info!(phase = phase.name(), tx_id = %e.tx_id, "stake submitted")
            }
            StakeEvent::Confirmed(e) => {
                tracing::info!(phase = phase.name(), tx_id = %e.tx_id, "stake confirmed")
            }
            StakeEvent::Rejected(e) => tracing::warn!(
                phase = phase.name(),
                tx_id = %e.tx_id,
                reason = %e.reason,
                "stake rejected"
            ),
            StakeEvent::Reverted(e) => tracing::warn!(
                phase = phase.name(),
                stage = %e.stage,
                reason = %e.reason,
                "stake reverted"
            ),
        }
        Ok(())
    }

    async fn on_wallet_changed(&self, address: Option<&str>) -> Result<(), DashboardError> {
        match address {
            Some(address) => tracing::info!(%address, "wallet loaded"),
            None => tracing::info!("wallet cleared"),
        }
        Ok(())
    }

    async fn on_resources(&self, view: &ResourceView) -> Result<(), DashboardError> {
        tracing::debug!(
            energy_available = view.energy.available,
            energy_percent = view.energy.percent_used,
            bandwidth_available = view.bandwidth.available,
            bandwidth_percent = view.bandwidth.percent_used,
            "resources recomputed"
        );
        Ok(())
    }
}
