use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::monitor::{check_sync, latest_blocks};
use crate::domain::{Block, SyncReport};
use crate::port::LedgerClient;

/// What a background poller observed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardUpdate {
    Sync(SyncReport),
    Blocks(Vec<Block>),
}

/// Handle to a running poller. Dropping it stops the poller.
pub struct PollerHandle {
    name: &'static str,
    task: JoinHandle<()>,
}

impl PollerHandle {
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Stop polling. A request already sent to the node is abandoned.
    pub fn cancel(&self) {
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

fn ticker(period: Duration) -> tokio::time::Interval {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval
}

/// Check sync state every `period`, starting immediately.
///
/// The poller ends on its own once the receiver is dropped.
pub fn spawn_sync_poller(
    ledger: Arc<dyn LedgerClient>,
    period: Duration,
    updates: mpsc::Sender<DashboardUpdate>,
) -> PollerHandle {
    let task = tokio::spawn(async move {
        let mut interval = ticker(period);
        loop {
            interval.tick().await;
            let report = check_sync(ledger.as_ref(), chrono::Utc::now()).await;
            if updates.send(DashboardUpdate::Sync(report)).await.is_err() {
                tracing::debug!("sync poller stopped, receiver gone");
                break;
            }
        }
    });

    PollerHandle { name: "sync", task }
}

/// Fetch the latest `count` blocks every `period`, starting immediately.
///
/// A failed round is logged and skipped; the next tick tries again.
pub fn spawn_block_poller(
    ledger: Arc<dyn LedgerClient>,
    period: Duration,
    count: usize,
    updates: mpsc::Sender<DashboardUpdate>,
) -> PollerHandle {
    let task = tokio::spawn(async move {
        let mut interval = ticker(period);
        loop {
            interval.tick().await;
            let blocks = match latest_blocks(ledger.as_ref(), count).await {
                Ok(blocks) => blocks,
                Err(e) => {
                    tracing::warn!(error = %e, "latest blocks unavailable");
                    continue;
                }
            };
            if updates.send(DashboardUpdate::Blocks(blocks)).await.is_err() {
                tracing::debug!("block poller stopped, receiver gone");
                break;
            }
        }
    });

    PollerHandle {
        name: "blocks",
        task,
    }
}
