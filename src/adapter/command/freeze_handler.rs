use crate::{
    domain::{
        Freeze, LedgerError, ResourceType, StakeAction, Sun, UnsignedTransaction, ValidatedStake,
        ValidationError, address,
    },
    port::{LedgerClient, StakeHandler},
};
use async_trait::async_trait;

#[async_trait]
impl StakeHandler for Freeze {
    fn validate(&self, owner: &str) -> Result<ValidatedStake, ValidationError> {
        let amount = Sun::from_trx(self.amount_trx).ok_or(ValidationError::InvalidAmount)?;
        let resource: ResourceType = self.resource.parse()?;

        let receiver = match self.receiver.trim() {
            "" => owner.to_string(),
            given => address::normalize(given)
                .ok_or_else(|| ValidationError::InvalidReceiver(given.to_string()))?,
        };

        Ok(ValidatedStake {
            action: StakeAction::Freeze,
            amount,
            resource,
            owner: owner.to_string(),
            receiver,
        })
    }

    async fn build(
        &self,
        stake: &ValidatedStake,
        ledger: &dyn LedgerClient,
    ) -> Result<UnsignedTransaction, LedgerError> {
        if stake.receiver == stake.owner {
            ledger
                .freeze_balance(stake.amount, stake.resource, &stake.owner)
                .await
        } else {
            // Stake 2.0 freezes have no receiver; resources reach another
            // account through delegation of already staked TRX
            ledger
                .delegate_resource(stake.amount, stake.resource, &stake.owner, &stake.receiver)
                .await
        }
    }
}
