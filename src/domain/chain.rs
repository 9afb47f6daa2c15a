use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub number: u64,
    pub hash: String,
    pub timestamp: DateTime<Utc>,
    pub parent_hash: String,
    pub witness: String,
    pub tx_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub hash: String,
    /// `None` while the transaction is still pending.
    pub block_number: Option<u64>,
    pub block_timestamp: Option<DateTime<Utc>>,
    /// Contract result, e.g. `SUCCESS` or `OUT_OF_ENERGY`.
    pub result: Option<String>,
    pub energy_used: u64,
    pub bandwidth_used: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeInfo {
    pub active_connections: u64,
    pub passive_connections: u64,
    pub total_flow: u64,
    pub begin_sync_num: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainParameter {
    pub key: String,
    pub value: Option<i64>,
}

/// A transaction built by the node and not yet signed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnsignedTransaction {
    pub tx_id: String,
    /// The node's JSON body, passed back untouched on broadcast.
    pub body: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignedTransaction {
    pub tx_id: String,
    pub body: Value,
}

/// The node's answer to a broadcast.
///
/// `accepted` only means the node took the transaction into its pending pool;
/// it says nothing about finality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BroadcastReceipt {
    pub accepted: bool,
    pub tx_id: String,
    pub code: Option<String>,
    pub message: Option<String>,
}
