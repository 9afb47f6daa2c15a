use crate::domain::{
    Account, Block, BroadcastReceipt, ChainParameter, LedgerError, NodeInfo, PrivateKey,
    ResourceSnapshot, ResourceType, SignedTransaction, Sun, TokenInfo, Transaction,
    UnsignedTransaction,
};
use async_trait::async_trait;

/// LedgerClient is the remote full node, seen through its RPC surface.
///
/// The node is trusted: nothing returned here is validated beyond decoding.
/// Timeouts are the implementation's concern.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Account by address. An address with no on-chain activity resolves to
    /// [`Account::empty`], not an error.
    async fn get_account(&self, address: &str) -> Result<Account, LedgerError>;

    async fn get_account_resources(&self, address: &str)
    -> Result<ResourceSnapshot, LedgerError>;

    /// Head of the chain.
    async fn get_current_block(&self) -> Result<Block, LedgerError>;

    /// `None` when the node has no block at that height.
    async fn get_block_by_number(&self, number: u64) -> Result<Option<Block>, LedgerError>;

    /// `None` when the node does not know the hash.
    async fn get_transaction(&self, hash: &str) -> Result<Option<Transaction>, LedgerError>;

    async fn get_token_by_id(&self, id: &str) -> Result<TokenInfo, LedgerError>;

    async fn get_node_info(&self) -> Result<NodeInfo, LedgerError>;

    async fn get_chain_parameters(&self) -> Result<Vec<ChainParameter>, LedgerError>;

    /// Build (not sign) a Stake 2.0 freeze for the owner's own use.
    async fn freeze_balance(
        &self,
        amount: Sun,
        resource: ResourceType,
        owner: &str,
    ) -> Result<UnsignedTransaction, LedgerError>;

    /// Build (not sign) a delegation of `amount` of the owner's already
    /// staked TRX, lending its resource to `receiver`.
    async fn delegate_resource(
        &self,
        amount: Sun,
        resource: ResourceType,
        owner: &str,
        receiver: &str,
    ) -> Result<UnsignedTransaction, LedgerError>;

    /// Build (not sign) an unfreeze transaction.
    async fn unfreeze_balance(
        &self,
        amount: Sun,
        resource: ResourceType,
        owner: &str,
    ) -> Result<UnsignedTransaction, LedgerError>;

    async fn sign(
        &self,
        transaction: UnsignedTransaction,
        key: &PrivateKey,
    ) -> Result<SignedTransaction, LedgerError>;

    async fn send_raw_transaction(
        &self,
        transaction: &SignedTransaction,
    ) -> Result<BroadcastReceipt, LedgerError>;
}
