use crate::context::*;
use trondeck::adapter::LedgerCall;
use trondeck::domain::{
    DashboardError, ErrorCategory, SearchQuery, SearchResult, Sun, Transaction, ValidationError,
    classify_query,
};

const HASH: &str = "7c2d4206c03a883dd9066d620335dc1be272a8dc733cfa3f6d10308faa37facc";

#[test]
fn test_classify_block_number() {
    assert_eq!(classify_query("12345"), SearchQuery::BlockNumber(12345));
    assert_eq!(classify_query("0"), SearchQuery::BlockNumber(0));
}

#[test]
fn test_classify_transaction_hash() {
    assert_eq!(
        classify_query(HASH),
        SearchQuery::TransactionHash(HASH.to_string())
    );
}

#[test]
fn test_classify_addresses() {
    let base58 = other_address();
    assert_eq!(base58.len(), 34);
    assert_eq!(classify_query(&base58), SearchQuery::Address(base58.clone()));

    let hex = "41a614f803b6fd780986a42c78ec9c7f77e6ded13c";
    assert_eq!(classify_query(hex), SearchQuery::Address(hex.to_string()));
}

#[test]
fn test_classify_invalid() {
    assert_eq!(classify_query(""), SearchQuery::Invalid(String::new()));
    assert_eq!(
        classify_query("hello"),
        SearchQuery::Invalid("hello".to_string())
    );
}

#[test]
fn test_digits_checked_before_length() {
    assert_eq!(
        classify_query("1234567890"),
        SearchQuery::BlockNumber(1_234_567_890)
    );
    assert_eq!(
        classify_query("18446744073709551615"),
        SearchQuery::BlockNumber(u64::MAX)
    );
}

#[test]
fn test_oversized_number_falls_through_to_length() {
    let digits = "9".repeat(64);
    assert_eq!(
        classify_query(&digits),
        SearchQuery::TransactionHash(digits.clone())
    );

    // u64::MAX + 1, 20 characters: matches no shape
    assert!(matches!(
        classify_query("18446744073709551616"),
        SearchQuery::Invalid(_)
    ));

    let digits = "1".repeat(34);
    assert_eq!(classify_query(&digits), SearchQuery::Address(digits.clone()));
}

#[tokio::test]
async fn test_empty_search_makes_no_call() {
    let ctx = TestContext::new();

    let result = ctx.router.search("").await;
    assert_validation!(result, "query");

    let result = ctx.router.search("   \t ").await;
    assert!(matches!(
        result,
        Err(DashboardError::Validation(ValidationError::EmptyQuery))
    ));

    assert_eq!(ctx.ledger.total_calls().await, 0);
}

#[tokio::test]
async fn test_invalid_search_makes_no_call() {
    let ctx = TestContext::new();

    let result = ctx.router.search("not-a-thing").await;

    assert!(matches!(
        result,
        Err(DashboardError::Validation(ValidationError::InvalidQuery(ref q))) if q == "not-a-thing"
    ));
    assert_eq!(ctx.ledger.total_calls().await, 0);
}

#[tokio::test]
async fn test_search_block_by_number() {
    let ctx = TestContext::new();
    ctx.ledger.add_block(block(12345)).await;

    let result = ctx.router.search(" 12345 ").await.unwrap();

    match result {
        SearchResult::Block(found) => assert_eq!(found.number, 12345),
        other => panic!("Expected block, got {other:?}"),
    }
    assert_eq!(ctx.ledger.calls(LedgerCall::GetBlockByNumber).await, 1);
    assert_eq!(ctx.ledger.total_calls().await, 1);
}

#[tokio::test]
async fn test_search_missing_block_not_found() {
    let ctx = TestContext::new();

    let err = ctx.router.search("99").await.unwrap_err();

    assert_eq!(err.category(), ErrorCategory::NotFound);
    assert!(err.summary().starts_with("not-found: "));
}

#[tokio::test]
async fn test_search_transaction() {
    let ctx = TestContext::new();
    ctx.ledger
        .add_transaction(Transaction {
            hash: HASH.to_string(),
            block_number: Some(7),
            block_timestamp: None,
            result: Some("SUCCESS".to_string()),
            energy_used: 13_045,
            bandwidth_used: 345,
        })
        .await;

    let result = ctx.router.search(HASH).await.unwrap();

    match result {
        SearchResult::Transaction(tx) => {
            assert_eq!(tx.block_number, Some(7));
            assert_eq!(tx.energy_used, 13_045);
        }
        other => panic!("Expected transaction, got {other:?}"),
    }
    assert_eq!(ctx.ledger.calls(LedgerCall::GetTransaction).await, 1);
}

#[tokio::test]
async fn test_search_unknown_transaction_not_found() {
    let ctx = TestContext::new();

    let result = ctx.router.search(HASH).await;

    assert!(matches!(result, Err(DashboardError::NotFound(_))));
}

#[tokio::test]
async fn test_search_inactive_address_is_empty_account() {
    let ctx = TestContext::new();
    let address = other_address();

    let result = ctx.router.search(&address).await.unwrap();

    match result {
        SearchResult::Account(account) => {
            assert_eq!(account.address, address);
            assert_eq!(account.balance, Sun::ZERO);
            assert!(account.frozen.is_empty());
        }
        other => panic!("Expected account, got {other:?}"),
    }
}

#[tokio::test]
async fn test_search_hex_address_resolves_base58() {
    let ctx = TestContext::new();
    let address = other_address();
    ctx.ledger
        .set_account(funded_account(&address, 5_000_000, 0))
        .await;

    let result = ctx
        .router
        .search("41a614f803b6fd780986a42c78ec9c7f77e6ded13c")
        .await
        .unwrap();

    match result {
        SearchResult::Account(account) => assert_eq!(account.balance, Sun::new(5_000_000)),
        other => panic!("Expected account, got {other:?}"),
    }
}

#[tokio::test]
async fn test_search_bad_checksum_makes_no_call() {
    let ctx = TestContext::new();
    let mut address = other_address();
    // flip the last character to break the checksum
    let last = address.pop().unwrap();
    address.push(if last == 'a' { 'b' } else { 'a' });

    let result = ctx.router.search(&address).await;

    assert_validation!(result, "query");
    assert_eq!(ctx.ledger.total_calls().await, 0);
}

#[tokio::test]
async fn test_search_transport_failure_is_network() {
    let ctx = TestContext::new();
    ctx.ledger.fail(LedgerCall::GetBlockByNumber).await;

    let err = ctx.router.search("5").await.unwrap_err();

    assert_eq!(err.category(), ErrorCategory::Network);
    assert_eq!(ctx.router.last_result().await, None);
}

#[tokio::test]
async fn test_only_latest_result_kept() {
    let ctx = TestContext::new();
    ctx.ledger.add_block(block(1)).await;
    ctx.ledger.add_block(block(2)).await;

    ctx.router.search("1").await.unwrap();
    ctx.router.search("2").await.unwrap();

    match ctx.router.last_result().await {
        Some(SearchResult::Block(found)) => assert_eq!(found.number, 2),
        other => panic!("Expected block 2, got {other:?}"),
    }
}
