use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Block, ChainParameter, DashboardError, NodeInfo, SyncReport, classify};
use crate::port::LedgerClient;

/// Fetch the current block and classify how far behind the node is.
///
/// A failed fetch is a report, not an error: the state is `ConnectionError`.
pub async fn check_sync(ledger: &dyn LedgerClient, now: DateTime<Utc>) -> SyncReport {
    match ledger.get_current_block().await {
        Ok(block) => SyncReport {
            state: classify(block.timestamp, now),
            head_number: Some(block.number),
            age: Some(now - block.timestamp),
        },
        Err(e) => {
            tracing::warn!(error = %e, "current block unavailable");
            SyncReport::connection_error()
        }
    }
}

/// The current block followed by up to `count - 1` of its predecessors,
/// newest first.
///
/// Only the current block is required; a missing or failing predecessor is
/// logged and left out.
pub async fn latest_blocks(
    ledger: &dyn LedgerClient,
    count: usize,
) -> Result<Vec<Block>, DashboardError> {
    if count == 0 {
        return Ok(Vec::new());
    }

    let head = ledger.get_current_block().await?;
    let mut blocks = Vec::with_capacity(count);
    let first = head.number;
    blocks.push(head);

    for offset in 1..count as u64 {
        let Some(number) = first.checked_sub(offset) else {
            break;
        };
        match ledger.get_block_by_number(number).await {
            Ok(Some(block)) => blocks.push(block),
            Ok(None) => tracing::debug!(number, "block not served by node"),
            Err(e) => tracing::warn!(number, error = %e, "skipping block"),
        }
    }

    Ok(blocks)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkOverview {
    pub node: NodeInfo,
    pub parameters: Vec<ChainParameter>,
}

impl NetworkOverview {
    pub fn parameter(&self, key: &str) -> Option<i64> {
        self.parameters
            .iter()
            .find(|p| p.key == key)
            .and_then(|p| p.value)
    }
}

pub async fn network_overview(ledger: &dyn LedgerClient) -> Result<NetworkOverview, DashboardError> {
    let node = ledger.get_node_info().await?;
    let parameters = ledger.get_chain_parameters().await?;
    Ok(NetworkOverview { node, parameters })
}
