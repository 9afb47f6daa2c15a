use crate::context::*;
use std::time::Duration;
use trondeck::adapter::{InMemoryLedger, LedgerCall};
use trondeck::domain::{DashboardError, StakePhase, Sun, ValidationError};

/// Wait until `call` reached the ledger `count` times.
async fn wait_for_calls(ledger: &InMemoryLedger, call: LedgerCall, count: usize) {
    tokio::time::timeout(Duration::from_secs(5), async {
        while ledger.calls(call).await < count {
            tokio::task::yield_now().await;
        }
    })
    .await
    .expect("call never reached the ledger");
}

#[tokio::test]
async fn test_second_stake_refused_while_first_in_flight() {
    let ctx = TestContext::imported().await;
    ctx.ledger.hold(LedgerCall::SendRawTransaction).await;

    let session = ctx.session.clone();
    let first = tokio::spawn(async move { session.stake(freeze(10.0, "ENERGY")).await });
    wait_for_calls(&ctx.ledger, LedgerCall::SendRawTransaction, 1).await;

    let second = ctx.session.stake(freeze(5.0, "BANDWIDTH")).await;
    assert!(matches!(
        second,
        Err(DashboardError::Validation(ValidationError::StakeInFlight))
    ));
    assert_eq!(ctx.ledger.calls(LedgerCall::FreezeBalance).await, 1);

    ctx.ledger.release(LedgerCall::SendRawTransaction).await;
    let outcome = first.await.unwrap().expect("first stake should confirm");
    assert!(outcome.is_confirmed());
    assert_eq!(ctx.ledger.broadcasts().await.len(), 1);
}

#[tokio::test]
async fn test_unstake_blocked_by_pending_stake() {
    let ctx = TestContext::imported().await;
    ctx.ledger.hold(LedgerCall::FreezeBalance).await;

    let session = ctx.session.clone();
    let first = tokio::spawn(async move { session.stake(freeze(10.0, "ENERGY")).await });
    wait_for_calls(&ctx.ledger, LedgerCall::FreezeBalance, 1).await;

    let unstake = ctx.session.unstake(unfreeze(1.0, "ENERGY")).await;
    assert_validation!(unstake, "stake");
    assert_eq!(ctx.ledger.calls(LedgerCall::UnfreezeBalance).await, 0);

    ctx.ledger.release(LedgerCall::FreezeBalance).await;
    first.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_stake_allowed_again_after_completion() {
    let ctx = TestContext::imported().await;

    ctx.session.stake(freeze(10.0, "ENERGY")).await.unwrap();
    let again = ctx.session.stake(freeze(2.0, "BANDWIDTH")).await;

    assert!(again.is_ok());
    assert!(matches!(ctx.phase().await, StakePhase::Confirmed { .. }));
    assert_eq!(ctx.ledger.broadcasts().await.len(), 2);
}

#[tokio::test]
async fn test_overlapping_refresh_skipped() {
    let ctx = TestContext::imported().await;
    let before = ctx.ledger.calls(LedgerCall::GetAccount).await;
    ctx.ledger.hold(LedgerCall::GetAccount).await;

    let session = ctx.session.clone();
    let first = tokio::spawn(async move { session.refresh().await });
    wait_for_calls(&ctx.ledger, LedgerCall::GetAccount, before + 1).await;

    let second = ctx.session.refresh().await.unwrap();
    assert!(second.skipped);
    assert_eq!(ctx.ledger.calls(LedgerCall::GetAccount).await, before + 1);

    ctx.ledger.release(LedgerCall::GetAccount).await;
    let first = first.await.unwrap().unwrap();
    assert!(!first.skipped);
    assert!(first.is_complete());
}

#[tokio::test]
async fn test_refresh_runs_after_previous_finished() {
    let ctx = TestContext::imported().await;
    let before = ctx.ledger.calls(LedgerCall::GetAccount).await;

    let first = ctx.session.refresh().await.unwrap();
    let second = ctx.session.refresh().await.unwrap();

    assert!(!first.skipped);
    assert!(!second.skipped);
    assert_eq!(ctx.ledger.calls(LedgerCall::GetAccount).await, before + 2);
}

#[tokio::test]
async fn test_wallet_switch_during_refresh_drops_stale_data() {
    let ctx = TestContext::imported().await;
    let address = ctx.wallet_address();
    ctx.ledger
        .set_account(funded_account(&address, 50_000_000, 10_000_000))
        .await;
    let before = ctx.ledger.calls(LedgerCall::GetAccount).await;
    ctx.ledger.hold(LedgerCall::GetAccount).await;

    let session = ctx.session.clone();
    let refresh = tokio::spawn(async move { session.refresh().await });
    wait_for_calls(&ctx.ledger, LedgerCall::GetAccount, before + 1).await;

    ctx.session.clear(true).await.unwrap();
    ctx.ledger.release(LedgerCall::GetAccount).await;
    refresh.await.unwrap().unwrap();

    let snapshot = ctx.session.snapshot().await;
    assert_eq!(snapshot.address, None);
    assert!(snapshot.account.is_none());
    assert!(snapshot.frozen.is_empty());
}

#[tokio::test]
async fn test_phase_visible_while_stake_in_flight() {
    let ctx = TestContext::imported().await;
    ctx.ledger.hold(LedgerCall::SendRawTransaction).await;

    let session = ctx.session.clone();
    let stake = tokio::spawn(async move { session.stake(freeze(10.0, "ENERGY")).await });
    wait_for_calls(&ctx.ledger, LedgerCall::SendRawTransaction, 1).await;

    match ctx.phase().await {
        StakePhase::Validated(stake) => assert_eq!(stake.amount, Sun::new(10_000_000)),
        other => panic!("Expected validated phase mid-flight, got {other:?}"),
    }

    ctx.ledger.release(LedgerCall::SendRawTransaction).await;
    stake.await.unwrap().unwrap();
    assert!(matches!(ctx.phase().await, StakePhase::Confirmed { .. }));
}
