use crate::{
    domain::{
        LedgerError, ResourceType, StakeAction, Sun, Unfreeze, UnsignedTransaction,
        ValidatedStake, ValidationError,
    },
    port::{LedgerClient, StakeHandler},
};
use async_trait::async_trait;

#[async_trait]
impl StakeHandler for Unfreeze {
    fn validate(&self, owner: &str) -> Result<ValidatedStake, ValidationError> {
        let amount = Sun::from_trx(self.amount_trx).ok_or(ValidationError::InvalidAmount)?;
        let resource: ResourceType = self.resource.parse()?;

        Ok(ValidatedStake {
            action: StakeAction::Unfreeze,
            amount,
            resource,
            owner: owner.to_string(),
            receiver: owner.to_string(),
        })
    }

    async fn build(
        &self,
        stake: &ValidatedStake,
        ledger: &dyn LedgerClient,
    ) -> Result<UnsignedTransaction, LedgerError> {
        ledger
            .unfreeze_balance(stake.amount, stake.resource, &stake.owner)
            .await
    }
}
