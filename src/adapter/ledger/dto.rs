//! Wire shapes of the full node's HTTP API and their mapping into domain types.

use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::domain::{
    Account, Block, BroadcastReceipt, ChainParameter, FreezeRecord, LedgerError, NodeInfo,
    ResourceSnapshot, ResourceType, Sun, TokenInfo, Transaction, UnsignedTransaction, address,
};

fn millis(ms: i64) -> Option<DateTime<Utc>> {
    if ms <= 0 {
        return None;
    }
    Utc.timestamp_millis_opt(ms).single()
}

/// True for the `{}` the node answers with when an entity does not exist.
pub fn is_empty_object(value: &Value) -> bool {
    value.as_object().is_some_and(|object| object.is_empty())
}

/// Node error messages are sometimes hex-encoded UTF-8.
pub fn decode_message(message: &str) -> String {
    hex::decode(message)
        .ok()
        .and_then(|bytes| String::from_utf8(bytes).ok())
        .unwrap_or_else(|| message.to_string())
}

#[derive(Debug, Default, Deserialize)]
pub struct FrozenDto {
    #[serde(default)]
    pub frozen_balance: u64,
    #[serde(default)]
    pub expire_time: i64,
}

#[derive(Debug, Default, Deserialize)]
pub struct AccountResourceDto {
    #[serde(default)]
    pub frozen_balance_for_energy: Option<FrozenDto>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FrozenV2Dto {
    /// Absent means bandwidth.
    #[serde(default, rename = "type")]
    pub resource: Option<String>,
    #[serde(default)]
    pub amount: u64,
}

#[derive(Debug, Default, Deserialize)]
pub struct KeyValueDto {
    pub key: String,
    #[serde(default)]
    pub value: u64,
}

#[derive(Debug, Default, Deserialize)]
pub struct AccountDto {
    #[serde(default)]
    pub balance: u64,
    #[serde(default)]
    pub frozen: Vec<FrozenDto>,
    #[serde(default)]
    pub account_resource: Option<AccountResourceDto>,
    #[serde(default, rename = "frozenV2")]
    pub frozen_v2: Vec<FrozenV2Dto>,
    #[serde(default, rename = "assetV2")]
    pub asset_v2: Vec<KeyValueDto>,
    #[serde(default)]
    pub create_time: i64,
    #[serde(default, rename = "type")]
    pub account_type: Option<String>,
}

impl AccountDto {
    /// `address` is the address that was queried; every legacy position and
    /// every Stake 2.0 position of an account benefits the account itself.
    pub fn into_account(self, address: &str) -> Account {
        let mut frozen = Vec::new();

        for legacy in &self.frozen {
            if legacy.frozen_balance > 0 {
                frozen.push(FreezeRecord {
                    resource: ResourceType::Bandwidth,
                    amount: Sun::new(legacy.frozen_balance),
                    expire_at: millis(legacy.expire_time),
                    receiver: address.to_string(),
                    legacy: true,
                });
            }
        }

        if let Some(energy) = self
            .account_resource
            .as_ref()
            .and_then(|r| r.frozen_balance_for_energy.as_ref())
            .filter(|e| e.frozen_balance > 0)
        {
            frozen.push(FreezeRecord {
                resource: ResourceType::Energy,
                amount: Sun::new(energy.frozen_balance),
                expire_at: millis(energy.expire_time),
                receiver: address.to_string(),
                legacy: true,
            });
        }

        for position in &self.frozen_v2 {
            let resource = match position.resource.as_deref() {
                None | Some("BANDWIDTH") => ResourceType::Bandwidth,
                Some("ENERGY") => ResourceType::Energy,
                // TRON_POWER and future kinds are not resources we account for
                Some(_) => continue,
            };
            if position.amount > 0 {
                frozen.push(FreezeRecord {
                    resource,
                    amount: Sun::new(position.amount),
                    expire_at: None,
                    receiver: address.to_string(),
                    legacy: false,
                });
            }
        }

        Account {
            address: address.to_string(),
            balance: Sun::new(self.balance),
            frozen,
            account_type: self.account_type,
            create_time: millis(self.create_time),
            tokens: self
                .asset_v2
                .into_iter()
                .map(|asset| (asset.key, asset.value))
                .collect(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AccountResourcesDto {
    #[serde(default, rename = "EnergyUsed")]
    pub energy_used: u64,
    #[serde(default, rename = "EnergyLimit")]
    pub energy_limit: u64,
    #[serde(default, rename = "NetUsed")]
    pub net_used: u64,
    #[serde(default, rename = "NetLimit")]
    pub net_limit: u64,
}

impl From<AccountResourcesDto> for ResourceSnapshot {
    fn from(dto: AccountResourcesDto) -> Self {
        ResourceSnapshot {
            energy_used: dto.energy_used,
            energy_limit: dto.energy_limit,
            bandwidth_used: dto.net_used,
            bandwidth_limit: dto.net_limit,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct RawDataDto {
    #[serde(default)]
    pub number: u64,
    #[serde(default)]
    pub timestamp: i64,
    #[serde(default, rename = "parentHash")]
    pub parent_hash: String,
    #[serde(default)]
    pub witness_address: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct BlockHeaderDto {
    #[serde(default)]
    pub raw_data: RawDataDto,
}

#[derive(Debug, Deserialize)]
pub struct BlockDto {
    #[serde(rename = "blockID")]
    pub block_id: String,
    #[serde(default)]
    pub block_header: BlockHeaderDto,
    #[serde(default)]
    pub transactions: Vec<Value>,
}

impl TryFrom<BlockDto> for Block {
    type Error = LedgerError;

    fn try_from(dto: BlockDto) -> Result<Self, Self::Error> {
        let raw = dto.block_header.raw_data;
        let timestamp = Utc
            .timestamp_millis_opt(raw.timestamp)
            .single()
            .ok_or_else(|| LedgerError::Decode(format!("bad block timestamp {}", raw.timestamp)))?;

        Ok(Block {
            number: raw.number,
            hash: dto.block_id,
            timestamp,
            parent_hash: raw.parent_hash,
            witness: address::display(&raw.witness_address),
            tx_count: dto.transactions.len(),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct RetDto {
    #[serde(default, rename = "contractRet")]
    pub contract_ret: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TransactionDto {
    #[serde(rename = "txID")]
    pub tx_id: String,
    #[serde(default)]
    pub ret: Vec<RetDto>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ReceiptDto {
    #[serde(default)]
    pub energy_usage_total: u64,
    #[serde(default)]
    pub net_usage: u64,
}

#[derive(Debug, Default, Deserialize)]
pub struct TransactionInfoDto {
    #[serde(default, rename = "blockNumber")]
    pub block_number: Option<u64>,
    #[serde(default, rename = "blockTimeStamp")]
    pub block_timestamp: Option<i64>,
    #[serde(default)]
    pub receipt: Option<ReceiptDto>,
}

impl TransactionDto {
    /// Merge with the receipt info; a still-pending transaction has no info.
    pub fn into_transaction(self, info: Option<TransactionInfoDto>) -> Transaction {
        let info = info.unwrap_or_default();
        let receipt = info.receipt.unwrap_or_default();

        Transaction {
            hash: self.tx_id,
            block_number: info.block_number,
            block_timestamp: info.block_timestamp.and_then(millis),
            result: self.ret.into_iter().next().and_then(|r| r.contract_ret),
            energy_used: receipt.energy_usage_total,
            bandwidth_used: receipt.net_usage,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AssetDto {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub abbr: String,
    #[serde(default)]
    pub precision: u32,
}

impl AssetDto {
    pub fn into_token(self, requested_id: &str) -> TokenInfo {
        TokenInfo {
            id: self.id.unwrap_or_else(|| requested_id.to_string()),
            name: self.name,
            abbr: self.abbr,
            precision: self.precision,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeInfoDto {
    #[serde(default)]
    pub active_connect_count: u64,
    #[serde(default)]
    pub passive_connect_count: u64,
    #[serde(default)]
    pub total_flow: u64,
    #[serde(default)]
    pub begin_sync_num: u64,
}

impl From<NodeInfoDto> for NodeInfo {
    fn from(dto: NodeInfoDto) -> Self {
        NodeInfo {
            active_connections: dto.active_connect_count,
            passive_connections: dto.passive_connect_count,
            total_flow: dto.total_flow,
            begin_sync_num: dto.begin_sync_num,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ChainParameterDto {
    pub key: String,
    #[serde(default)]
    pub value: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ChainParametersDto {
    #[serde(default, rename = "chainParameter")]
    pub chain_parameter: Vec<ChainParameterDto>,
}

impl From<ChainParametersDto> for Vec<ChainParameter> {
    fn from(dto: ChainParametersDto) -> Self {
        dto.chain_parameter
            .into_iter()
            .map(|p| ChainParameter {
                key: p.key,
                value: p.value,
            })
            .collect()
    }
}

/// Parse the node's reply to a transaction-building call.
///
/// Failures come back as `{"Error": "..."}` with HTTP 200.
pub fn unsigned_from_value(value: Value) -> Result<UnsignedTransaction, LedgerError> {
    if let Some(error) = value.get("Error").and_then(Value::as_str) {
        return Err(LedgerError::Rpc(error.to_string()));
    }
    let tx_id = value
        .get("txID")
        .and_then(Value::as_str)
        .ok_or_else(|| LedgerError::Decode("built transaction has no txID".to_string()))?
        .to_string();

    Ok(UnsignedTransaction { tx_id, body: value })
}

#[derive(Debug, Default, Deserialize)]
pub struct BroadcastDto {
    #[serde(default)]
    pub result: bool,
    #[serde(default)]
    pub txid: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl BroadcastDto {
    pub fn into_receipt(self, tx_id: &str) -> BroadcastReceipt {
        BroadcastReceipt {
            accepted: self.result,
            tx_id: self.txid.unwrap_or_else(|| tx_id.to_string()),
            code: self.code,
            message: self.message.as_deref().map(decode_message),
        }
    }
}
