use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use super::dto::{
    AccountDto, AccountResourcesDto, AssetDto, BlockDto, BroadcastDto, ChainParametersDto,
    NodeInfoDto, TransactionDto, TransactionInfoDto, is_empty_object, unsigned_from_value,
};
use super::signer::sign_transaction;
use crate::domain::{
    Account, Block, BroadcastReceipt, ChainParameter, LedgerError, NodeInfo, PrivateKey,
    ResourceSnapshot, ResourceType, SignedTransaction, Sun, TokenInfo, Transaction,
    UnsignedTransaction, address,
};
use crate::port::LedgerClient;

impl From<reqwest::Error> for LedgerError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            LedgerError::Decode(error.to_string())
        } else {
            LedgerError::Transport(error.to_string())
        }
    }
}

/// Talks to a full node's `/wallet/*` HTTP API.
///
/// Every request sets `visible: true`, so addresses travel in base58check form
/// in both directions.
#[derive(Clone)]
pub struct HttpLedgerClient {
    inner: Client,
    base: Url,
}

impl HttpLedgerClient {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, LedgerError> {
        let mut base = Url::parse(endpoint)
            .map_err(|e| LedgerError::Transport(format!("invalid node url {endpoint:?}: {e}")))?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let inner = Client::builder().timeout(timeout).build()?;
        Ok(Self { inner, base })
    }

    pub fn endpoint(&self) -> &Url {
        &self.base
    }

    fn url(&self, path: &str) -> Result<Url, LedgerError> {
        self.base
            .join(path)
            .map_err(|e| LedgerError::Transport(format!("invalid path {path}: {e}")))
    }

    async fn post(&self, path: &str, body: Value) -> Result<Value, LedgerError> {
        tracing::debug!(%path, "node request");
        let response = self.inner.post(self.url(path)?).json(&body).send().await?;
        Self::read(path, response).await
    }

    async fn get(&self, path: &str) -> Result<Value, LedgerError> {
        tracing::debug!(%path, "node request");
        let response = self.inner.get(self.url(path)?).send().await?;
        Self::read(path, response).await
    }

    async fn read(path: &str, response: reqwest::Response) -> Result<Value, LedgerError> {
        let status = response.status();
        if !status.is_success() {
            return Err(LedgerError::Transport(format!("{path} answered {status}")));
        }
        let value: Value = response.json().await?;
        if let Some(error) = value.get("Error").and_then(Value::as_str) {
            return Err(LedgerError::Rpc(error.to_string()));
        }
        Ok(value)
    }

    fn decode<T: DeserializeOwned>(value: Value) -> Result<T, LedgerError> {
        serde_json::from_value(value).map_err(|e| LedgerError::Decode(e.to_string()))
    }

    /// Addresses handed to the node must be base58check.
    fn wire_address(value: &str) -> Result<String, LedgerError> {
        address::normalize(value)
            .ok_or_else(|| LedgerError::Rpc(format!("malformed address {value:?}")))
    }
}

#[async_trait]
impl LedgerClient for HttpLedgerClient {
    async fn get_account(&self, address: &str) -> Result<Account, LedgerError> {
        let wire = Self::wire_address(address)?;
        let value = self
            .post("wallet/getaccount", json!({ "address": wire, "visible": true }))
            .await?;
        // an address that never received funds comes back as `{}`
        if is_empty_object(&value) {
            return Ok(Account::empty(&wire));
        }
        Ok(Self::decode::<AccountDto>(value)?.into_account(&wire))
    }

    async fn get_account_resources(&self, address: &str) -> Result<ResourceSnapshot, LedgerError> {
        let wire = Self::wire_address(address)?;
        let value = self
            .post(
                "wallet/getaccountresource",
                json!({ "address": wire, "visible": true }),
            )
            .await?;
        Ok(Self::decode::<AccountResourcesDto>(value)?.into())
    }

    async fn get_current_block(&self) -> Result<Block, LedgerError> {
        let value = self.post("wallet/getnowblock", json!({ "visible": true })).await?;
        Self::decode::<BlockDto>(value)?.try_into()
    }

    async fn get_block_by_number(&self, number: u64) -> Result<Option<Block>, LedgerError> {
        let value = self
            .post("wallet/getblockbynum", json!({ "num": number, "visible": true }))
            .await?;
        if is_empty_object(&value) {
            return Ok(None);
        }
        Ok(Some(Self::decode::<BlockDto>(value)?.try_into()?))
    }

    async fn get_transaction(&self, hash: &str) -> Result<Option<Transaction>, LedgerError> {
        let value = self
            .post(
                "wallet/gettransactionbyid",
                json!({ "value": hash, "visible": true }),
            )
            .await?;
        if is_empty_object(&value) {
            return Ok(None);
        }
        let transaction: TransactionDto = Self::decode(value)?;

        let info = self
            .post(
                "wallet/gettransactioninfobyid",
                json!({ "value": hash, "visible": true }),
            )
            .await?;
        let info = if is_empty_object(&info) {
            None
        } else {
            Some(Self::decode::<TransactionInfoDto>(info)?)
        };

        Ok(Some(transaction.into_transaction(info)))
    }

    async fn get_token_by_id(&self, id: &str) -> Result<TokenInfo, LedgerError> {
        let value = self
            .post("wallet/getassetissuebyid", json!({ "value": id, "visible": true }))
            .await?;
        if is_empty_object(&value) {
            return Err(LedgerError::Rpc(format!("token {id} not found")));
        }
        Ok(Self::decode::<AssetDto>(value)?.into_token(id))
    }

    async fn get_node_info(&self) -> Result<NodeInfo, LedgerError> {
        let value = self.get("wallet/getnodeinfo").await?;
        Ok(Self::decode::<NodeInfoDto>(value)?.into())
    }

    async fn get_chain_parameters(&self) -> Result<Vec<ChainParameter>, LedgerError> {
        let value = self.get("wallet/getchainparameters").await?;
        Ok(Self::decode::<ChainParametersDto>(value)?.into())
    }

    async fn freeze_balance(
        &self,
        amount: Sun,
        resource: ResourceType,
        owner: &str,
    ) -> Result<UnsignedTransaction, LedgerError> {
        let owner = Self::wire_address(owner)?;
        let value = self
            .post(
                "wallet/freezebalancev2",
                json!({
                    "owner_address": owner,
                    "frozen_balance": amount.value(),
                    "resource": resource.as_str(),
                    "visible": true,
                }),
            )
            .await?;
        unsigned_from_value(value)
    }

    async fn delegate_resource(
        &self,
        amount: Sun,
        resource: ResourceType,
        owner: &str,
        receiver: &str,
    ) -> Result<UnsignedTransaction, LedgerError> {
        let owner = Self::wire_address(owner)?;
        let receiver = Self::wire_address(receiver)?;
        let value = self
            .post(
                "wallet/delegateresource",
                json!({
                    "owner_address": owner,
                    "receiver_address": receiver,
                    "balance": amount.value(),
                    "resource": resource.as_str(),
                    "lock": false,
                    "visible": true,
                }),
            )
            .await?;
        unsigned_from_value(value)
    }

    async fn unfreeze_balance(
        &self,
        amount: Sun,
        resource: ResourceType,
        owner: &str,
    ) -> Result<UnsignedTransaction, LedgerError> {
        let owner = Self::wire_address(owner)?;
        let value = self
            .post(
                "wallet/unfreezebalancev2",
                json!({
                    "owner_address": owner,
                    "unfreeze_balance": amount.value(),
                    "resource": resource.as_str(),
                    "visible": true,
                }),
            )
            .await?;
        unsigned_from_value(value)
    }

    async fn sign(
        &self,
        transaction: UnsignedTransaction,
        key: &PrivateKey,
    ) -> Result<SignedTransaction, LedgerError> {
        sign_transaction(transaction, key)
    }

    async fn send_raw_transaction(
        &self,
        transaction: &SignedTransaction,
    ) -> Result<BroadcastReceipt, LedgerError> {
        let value = self
            .post("wallet/broadcasttransaction", transaction.body.clone())
            .await;
        // a rejected broadcast is an answer, not a transport failure
        let value = match value {
            Err(LedgerError::Rpc(message)) => {
                return Ok(BroadcastReceipt {
                    accepted: false,
                    tx_id: transaction.tx_id.clone(),
                    code: None,
                    message: Some(message),
                });
            }
            other => other?,
        };
        Ok(Self::decode::<BroadcastDto>(value)?.into_receipt(&transaction.tx_id))
    }
}
