use serde::{Deserialize, Serialize};

use crate::domain::{Account, Block, Transaction};
use crate::domain::address::{BASE58_ADDRESS_LEN, HEX_ADDRESS_LEN};

/// Length of a transaction hash in hex characters.
pub const TRANSACTION_HASH_LEN: usize = 64;

/// A search input classified into exactly one kind of ledger lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchQuery {
    BlockNumber(u64),
    TransactionHash(String),
    Address(String),
    Invalid(String),
}

/// Classify already-trimmed search input. The first matching rule wins:
///
/// 1. only decimal digits (and fits in `u64`) → block number
/// 2. 64 characters → transaction hash
/// 3. 34 or 42 characters → address
/// 4. anything else → invalid
///
/// An all-digit string too large for a block number falls through to the
/// length rules, so a hash made only of digits still routes as a hash.
pub fn classify_query(input: &str) -> SearchQuery {
    if input.is_empty() {
        return SearchQuery::Invalid(String::new());
    }

    if input.bytes().all(|b| b.is_ascii_digit()) {
        if let Ok(number) = input.parse::<u64>() {
            return SearchQuery::BlockNumber(number);
        }
    }

    match input.chars().count() {
        TRANSACTION_HASH_LEN => SearchQuery::TransactionHash(input.to_string()),
        BASE58_ADDRESS_LEN | HEX_ADDRESS_LEN => SearchQuery::Address(input.to_string()),
        _ => SearchQuery::Invalid(input.to_string()),
    }
}

/// The entity a search resolved to. Only the latest lookup is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchResult {
    Block(Block),
    Transaction(Transaction),
    Account(Account),
}
