use crate::{
    domain::{LedgerError, UnsignedTransaction, ValidatedStake, ValidationError},
    port::LedgerClient,
};
use async_trait::async_trait;

#[async_trait]
pub trait StakeHandler {
    /// Validate the typed input for `owner`
    ///
    /// Pure and fast: no I/O. Converts TRX to Sun, parses the resource type
    /// and fills a blank receiver with the owner.
    fn validate(&self, owner: &str) -> Result<ValidatedStake, ValidationError>;

    /// Ask the node to build the unsigned transaction
    async fn build(
        &self,
        stake: &ValidatedStake,
        ledger: &dyn LedgerClient,
    ) -> Result<UnsignedTransaction, LedgerError>;
}
