use crate::domain::{DashboardError, StakeCommand, StakeContext, StakeOutcome, Wallet};
use async_trait::async_trait;

/// Engine runs one staking action through its lifecycle
///
/// Responsibilities:
/// - Validation of the typed input (no network call on failure)
/// - Build, sign and submit, reporting the stage that failed
/// - Applying every event to the phase and notifying callbacks
#[async_trait]
pub trait Engine {
    /// Run `command` for `wallet`, starting from `context.current_phase`
    ///
    /// Returns the outcome when the node answered (acknowledged or not).
    /// Any `Err` means the phase is back to `Draft`.
    async fn process_command(
        &self,
        command: &StakeCommand,
        wallet: &Wallet,
        context: &StakeContext,
    ) -> Result<StakeOutcome, DashboardError>;
}
