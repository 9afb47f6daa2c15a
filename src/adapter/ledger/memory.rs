use crate::{
    domain::{
        Account, Block, BroadcastReceipt, ChainParameter, LedgerError, NodeInfo, PrivateKey,
        ResourceSnapshot, ResourceType, SignedTransaction, Sun, TokenInfo, Transaction,
        UnsignedTransaction,
    },
    port::LedgerClient,
};
use async_trait::async_trait;
use serde_json::json;
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::{Notify, RwLock};

use super::signer::sign_transaction;

/// One method of [`LedgerClient`], used to count calls and inject failures.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum LedgerCall {
    GetAccount,
    GetAccountResources,
    GetCurrentBlock,
    GetBlockByNumber,
    GetTransaction,
    GetTokenById,
    GetNodeInfo,
    GetChainParameters,
    FreezeBalance,
    DelegateResource,
    UnfreezeBalance,
    Sign,
    SendRawTransaction,
}

#[derive(Default)]
struct LedgerData {
    accounts: HashMap<String, Account>,
    resources: HashMap<String, ResourceSnapshot>,
    blocks: BTreeMap<u64, Block>,
    transactions: HashMap<String, Transaction>,
    tokens: HashMap<String, TokenInfo>,
    node_info: NodeInfo,
    chain_parameters: Vec<ChainParameter>,
    failures: HashSet<LedgerCall>,
    /// `Some(reason)` makes every broadcast come back unacknowledged.
    rejection: Option<String>,
    broadcasts: Vec<SignedTransaction>,
    calls: HashMap<LedgerCall, usize>,
    built: u64,
}

/// In-memory ledger used for tests and offline runs.
///
/// Transactions are built locally with a real `raw_data_hex`/`txID` pair and
/// signed with the same signer the HTTP client uses.
pub struct InMemoryLedger {
    data: Arc<RwLock<LedgerData>>,
    /// Held calls park until released.
    gates: RwLock<HashMap<LedgerCall, Arc<Notify>>>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LedgerData::default())),
            gates: RwLock::new(HashMap::new()),
        }
    }

    pub async fn set_account(&self, account: Account) {
        let mut data = self.data.write().await;
        data.accounts.insert(account.address.clone(), account);
    }

    pub async fn set_resources(&self, address: &str, snapshot: ResourceSnapshot) {
        let mut data = self.data.write().await;
        data.resources.insert(address.to_string(), snapshot);
    }

    pub async fn add_block(&self, block: Block) {
        let mut data = self.data.write().await;
        data.blocks.insert(block.number, block);
    }

    pub async fn add_transaction(&self, transaction: Transaction) {
        let mut data = self.data.write().await;
        data.transactions
            .insert(transaction.hash.clone(), transaction);
    }

    pub async fn add_token(&self, token: TokenInfo) {
        let mut data = self.data.write().await;
        data.tokens.insert(token.id.clone(), token);
    }

    pub async fn set_node_info(&self, info: NodeInfo) {
        self.data.write().await.node_info = info;
    }

    pub async fn set_chain_parameters(&self, parameters: Vec<ChainParameter>) {
        self.data.write().await.chain_parameters = parameters;
    }

    /// Make every subsequent `call` fail with a transport error.
    pub async fn fail(&self, call: LedgerCall) {
        self.data.write().await.failures.insert(call);
    }

    pub async fn recover(&self, call: LedgerCall) {
        self.data.write().await.failures.remove(&call);
    }

    /// Make every subsequent broadcast come back unacknowledged with `reason`.
    pub async fn reject_broadcasts(&self, reason: impl Into<String>) {
        self.data.write().await.rejection = Some(reason.into());
    }

    pub async fn accept_broadcasts(&self) {
        self.data.write().await.rejection = None;
    }

    /// Park every subsequent `call` (after it is counted) until [`release`].
    ///
    /// [`release`]: InMemoryLedger::release
    pub async fn hold(&self, call: LedgerCall) {
        self.gates
            .write()
            .await
            .insert(call, Arc::new(Notify::new()));
    }

    /// Let the parked `call` through and stop holding new ones.
    pub async fn release(&self, call: LedgerCall) {
        if let Some(gate) = self.gates.write().await.remove(&call) {
            gate.notify_one();
        }
    }

    pub async fn calls(&self, call: LedgerCall) -> usize {
        self.data
            .read()
            .await
            .calls
            .get(&call)
            .copied()
            .unwrap_or(0)
    }

    pub async fn total_calls(&self) -> usize {
        self.data.read().await.calls.values().sum()
    }

    pub async fn broadcasts(&self) -> Vec<SignedTransaction> {
        self.data.read().await.broadcasts.clone()
    }

    /// Count the call, wait while it is held and fail it when a failure is
    /// injected.
    async fn enter(&self, call: LedgerCall) -> Result<(), LedgerError> {
        let failing = {
            let mut data = self.data.write().await;
            *data.calls.entry(call).or_insert(0) += 1;
            data.failures.contains(&call)
        };

        let gate = self.gates.read().await.get(&call).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        if failing {
            return Err(LedgerError::Transport(format!("{call:?} unavailable")));
        }
        Ok(())
    }

    async fn build(
        &self,
        contract: &str,
        parameter: serde_json::Value,
    ) -> Result<UnsignedTransaction, LedgerError> {
        let mut data = self.data.write().await;
        data.built += 1;

        let raw = format!("{contract}:{}:{parameter}", data.built);
        let raw_data_hex = hex::encode(raw.as_bytes());
        let tx_id = hex::encode(Sha256::digest(raw.as_bytes()));

        Ok(UnsignedTransaction {
            tx_id: tx_id.clone(),
            body: json!({
                "visible": true,
                "txID": tx_id,
                "raw_data": {
                    "contract": [{
                        "type": contract,
                        "parameter": { "value": parameter },
                    }],
                },
                "raw_data_hex": raw_data_hex,
            }),
        })
    }
}

impl Default for InMemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LedgerClient for InMemoryLedger {
    async fn get_account(&self, address: &str) -> Result<Account, LedgerError> {
        self.enter(LedgerCall::GetAccount).await?;
        let data = self.data.read().await;
        Ok(data
            .accounts
            .get(address)
            .cloned()
            .unwrap_or_else(|| Account::empty(address)))
    }

    async fn get_account_resources(&self, address: &str) -> Result<ResourceSnapshot, LedgerError> {
        self.enter(LedgerCall::GetAccountResources).await?;
        let data = self.data.read().await;
        Ok(data.resources.get(address).copied().unwrap_or_default())
    }

    async fn get_current_block(&self) -> Result<Block, LedgerError> {
        self.enter(LedgerCall::GetCurrentBlock).await?;
        let data = self.data.read().await;
        data.blocks
            .values()
            .next_back()
            .cloned()
            .ok_or_else(|| LedgerError::Rpc("no blocks produced yet".to_string()))
    }

    async fn get_block_by_number(&self, number: u64) -> Result<Option<Block>, LedgerError> {
        self.enter(LedgerCall::GetBlockByNumber).await?;
        Ok(self.data.read().await.blocks.get(&number).cloned())
    }

    async fn get_transaction(&self, hash: &str) -> Result<Option<Transaction>, LedgerError> {
        self.enter(LedgerCall::GetTransaction).await?;
        Ok(self.data.read().await.transactions.get(hash).cloned())
    }

    async fn get_token_by_id(&self, id: &str) -> Result<TokenInfo, LedgerError> {
        self.enter(LedgerCall::GetTokenById).await?;
        self.data
            .read()
            .await
            .tokens
            .get(id)
            .cloned()
            .ok_or_else(|| LedgerError::Rpc(format!("token {id} not found")))
    }

    async fn get_node_info(&self) -> Result<NodeInfo, LedgerError> {
        self.enter(LedgerCall::GetNodeInfo).await?;
        Ok(self.data.read().await.node_info.clone())
    }

    async fn get_chain_parameters(&self) -> Result<Vec<ChainParameter>, LedgerError> {
        self.enter(LedgerCall::GetChainParameters).await?;
        Ok(self.data.read().await.chain_parameters.clone())
    }

    async fn freeze_balance(
        &self,
        amount: Sun,
        resource: ResourceType,
        owner: &str,
    ) -> Result<UnsignedTransaction, LedgerError> {
        self.enter(LedgerCall::FreezeBalance).await?;
        self.build(
            "FreezeBalanceV2Contract",
            json!({
                "owner_address": owner,
                "frozen_balance": amount.value(),
                "resource": resource.as_str(),
            }),
        )
        .await
    }

    async fn delegate_resource(
        &self,
        amount: Sun,
        resource: ResourceType,
        owner: &str,
        receiver: &str,
    ) -> Result<UnsignedTransaction, LedgerError> {
        self.enter(LedgerCall::DelegateResource).await?;
        self.build(
            "DelegateResourceContract",
            json!({
                "owner_address": owner,
                "receiver_address": receiver,
                "balance": amount.value(),
                "resource": resource.as_str(),
            }),
        )
        .await
    }

    async fn unfreeze_balance(
        &self,
        amount: Sun,
        resource: ResourceType,
        owner: &str,
    ) -> Result<UnsignedTransaction, LedgerError> {
        self.enter(LedgerCall::UnfreezeBalance).await?;
        self.build(
            "UnfreezeBalanceV2Contract",
            json!({
                "owner_address": owner,
                "unfreeze_balance": amount.value(),
                "resource": resource.as_str(),
            }),
        )
        .await
    }

    async fn sign(
        &self,
        transaction: UnsignedTransaction,
        key: &PrivateKey,
    ) -> Result<SignedTransaction, LedgerError> {
        self.enter(LedgerCall::Sign).await?;
        sign_transaction(transaction, key)
    }

    async fn send_raw_transaction(
        &self,
        transaction: &SignedTransaction,
    ) -> Result<BroadcastReceipt, LedgerError> {
        self.enter(LedgerCall::SendRawTransaction).await?;

        let mut data = self.data.write().await;
        data.broadcasts.push(transaction.clone());
        Ok(match &data.rejection {
            Some(reason) => BroadcastReceipt {
                accepted: false,
                tx_id: transaction.tx_id.clone(),
                code: Some("CONTRACT_VALIDATE_ERROR".to_string()),
                message: Some(reason.clone()),
            },
            None => BroadcastReceipt {
                accepted: true,
                tx_id: transaction.tx_id.clone(),
                code: None,
                message: None,
            },
        })
    }
}
