use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::domain::{Sun, ValidationError};

/// The two metered resources an account can stake for.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ResourceType {
    Energy,
    Bandwidth,
}

impl ResourceType {
    /// Name used by the node's HTTP API.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Energy => "ENERGY",
            ResourceType::Bandwidth => "BANDWIDTH",
        }
    }
}

impl Display for ResourceType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "" => Err(ValidationError::MissingResourceType),
            "ENERGY" => Ok(ResourceType::Energy),
            "BANDWIDTH" => Ok(ResourceType::Bandwidth),
            other => Err(ValidationError::InvalidResourceType(other.to_string())),
        }
    }
}

/// Raw used/limit counters reported by the node. Missing fields are 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceSnapshot {
    pub energy_used: u64,
    pub energy_limit: u64,
    pub bandwidth_used: u64,
    pub bandwidth_limit: u64,
}

/// A staked position as reported by the ledger.
///
/// Immutable once observed; it disappears from the account when the ledger
/// stops reporting it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreezeRecord {
    pub resource: ResourceType,
    pub amount: Sun,
    /// Legacy positions carry an expiry; Stake 2.0 positions do not.
    pub expire_at: Option<DateTime<Utc>>,
    pub receiver: String,
    /// Frozen under the pre-Stake 2.0 contracts.
    #[serde(default)]
    pub legacy: bool,
}

impl FreezeRecord {
    /// Only Stake 2.0 positions can be released with an unstake.
    pub fn is_releasable(&self) -> bool {
        !self.legacy
    }
}

/// Read-only cached copy of an on-chain account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub address: String,
    pub balance: Sun,
    pub frozen: Vec<FreezeRecord>,
    pub account_type: Option<String>,
    pub create_time: Option<DateTime<Utc>>,
    /// `(token id, raw balance)` pairs.
    pub tokens: Vec<(String, u64)>,
}

impl Account {
    /// An address the node has never seen resolves to an empty account.
    pub fn empty(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            balance: Sun::ZERO,
            frozen: Vec::new(),
            account_type: None,
            create_time: None,
            tokens: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenInfo {
    pub id: String,
    pub name: String,
    pub abbr: String,
    pub precision: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenBalance {
    pub info: TokenInfo,
    pub raw: u64,
}

impl TokenBalance {
    pub fn formatted(&self) -> String {
        format!(
            "{} {}",
            crate::domain::format_units(self.raw, self.info.precision),
            self.info.abbr
        )
    }
}
