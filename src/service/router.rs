use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::{
    DashboardError, SearchQuery, SearchResult, ValidationError, address, classify_query,
};
use crate::port::LedgerClient;

/// Routes free-text search input to exactly one ledger lookup.
///
/// Only the most recent successful result is kept.
pub struct QueryRouter {
    ledger: Arc<dyn LedgerClient>,
    last: RwLock<Option<SearchResult>>,
}

impl QueryRouter {
    pub fn new(ledger: Arc<dyn LedgerClient>) -> Self {
        Self {
            ledger,
            last: RwLock::new(None),
        }
    }

    /// Trim, classify and resolve `raw`.
    ///
    /// Empty and unclassifiable input fail validation without any ledger call.
    pub async fn search(&self, raw: &str) -> Result<SearchResult, DashboardError> {
        let input = raw.trim();
        if input.is_empty() {
            return Err(ValidationError::EmptyQuery.into());
        }

        let query = classify_query(input);
        tracing::debug!(?query, "search classified");

        let result = self.resolve(query).await?;
        *self.last.write().await = Some(result.clone());
        Ok(result)
    }

    pub async fn resolve(&self, query: SearchQuery) -> Result<SearchResult, DashboardError> {
        match query {
            SearchQuery::BlockNumber(number) => self
                .ledger
                .get_block_by_number(number)
                .await?
                .map(SearchResult::Block)
                .ok_or_else(|| DashboardError::NotFound(format!("block {number}"))),
            SearchQuery::TransactionHash(hash) => self
                .ledger
                .get_transaction(&hash)
                .await?
                .map(SearchResult::Transaction)
                .ok_or_else(|| DashboardError::NotFound(format!("transaction {hash}"))),
            SearchQuery::Address(candidate) => {
                // right length but bad checksum or prefix: nothing to look up
                let normalized = address::normalize(&candidate)
                    .ok_or(ValidationError::InvalidQuery(candidate))?;
                let account = self.ledger.get_account(&normalized).await?;
                Ok(SearchResult::Account(account))
            }
            SearchQuery::Invalid(input) => Err(ValidationError::InvalidQuery(input).into()),
        }
    }

    pub async fn last_result(&self) -> Option<SearchResult> {
        self.last.read().await.clone()
    }
}
