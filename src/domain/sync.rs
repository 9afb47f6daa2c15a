use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Head blocks younger than this many seconds read as synchronized.
pub const SYNCHRONIZED_WITHIN_SECS: i64 = 60;

/// Head blocks at least this many seconds old read as not synchronized.
pub const NOT_SYNCHRONIZED_AFTER_SECS: i64 = 300;

/// Freshness of the node's chain head against wall-clock time. Never persisted.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SyncState {
    Synchronized,
    Syncing,
    NotSynchronized,
    /// The current block could not be fetched at all.
    ConnectionError,
}

impl Display for SyncState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            SyncState::Synchronized => "Synchronized",
            SyncState::Syncing => "Syncing...",
            SyncState::NotSynchronized => "Not Synchronized",
            SyncState::ConnectionError => "Connection Error",
        };
        f.write_str(label)
    }
}

/// Classify a head block by its age.
///
/// Only called once a block was actually fetched; an unreachable node is
/// reported as [`SyncState::ConnectionError`] by the caller.
pub fn classify(block_timestamp: DateTime<Utc>, now: DateTime<Utc>) -> SyncState {
    classify_age(now - block_timestamp)
}

/// Negative ages (node clock ahead of ours) count as fresh.
pub fn classify_age(age: TimeDelta) -> SyncState {
    if age < TimeDelta::seconds(SYNCHRONIZED_WITHIN_SECS) {
        SyncState::Synchronized
    } else if age < TimeDelta::seconds(NOT_SYNCHRONIZED_AFTER_SECS) {
        SyncState::Syncing
    } else {
        SyncState::NotSynchronized
    }
}

/// Result of one sync check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncReport {
    pub state: SyncState,
    pub head_number: Option<u64>,
    pub age: Option<TimeDelta>,
}

impl SyncReport {
    pub fn connection_error() -> Self {
        Self {
            state: SyncState::ConnectionError,
            head_number: None,
            age: None,
        }
    }
}
