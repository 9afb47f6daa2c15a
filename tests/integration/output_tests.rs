use crate::context::*;
use trondeck::domain::*;
use trondeck::service::NetworkOverview;
use trondeck::service::output::*;

#[tokio::test]
async fn test_snapshot_without_wallet() {
    let ctx = TestContext::new();

    let text = render_snapshot(&ctx.session.snapshot().await);

    assert_eq!(text, "no wallet loaded\n");
}

#[tokio::test]
async fn test_snapshot_shows_balance_resources_and_positions() {
    let ctx = TestContext::new();
    let address = ctx.wallet_address();
    ctx.ledger
        .set_account(funded_account(&address, 12_500_000, 3_000_000))
        .await;
    ctx.ledger
        .set_resources(&address, snapshot(1000, 5000, 0, 600))
        .await;
    ctx.session.import_from_phrase(PHRASE).await.unwrap();

    let text = render_snapshot(&ctx.session.snapshot().await);

    assert!(text.contains(&address));
    assert!(text.contains("12.500000 TRX"));
    assert!(text.contains("4000 available / 5000 (20% used)"));
    assert!(text.contains("3.000000 TRX for ENERGY"));
}

#[tokio::test]
async fn test_legacy_position_marked_not_releasable() {
    let ctx = TestContext::new();
    let address = ctx.wallet_address();
    let mut account = funded_account(&address, 1_000_000, 2_000_000);
    account.frozen.push(FreezeRecord {
        resource: ResourceType::Bandwidth,
        amount: Sun::new(5_000_000),
        expire_at: None,
        receiver: address.clone(),
        legacy: true,
    });
    ctx.ledger.set_account(account).await;
    ctx.session.import_from_phrase(PHRASE).await.unwrap();

    let text = render_snapshot(&ctx.session.snapshot().await);

    assert!(text.contains("2.000000 TRX for ENERGY\n"));
    assert!(text.contains(
        "5.000000 TRX for BANDWIDTH (legacy, expires -, not releasable by unstake)"
    ));
}

#[tokio::test]
async fn test_snapshot_marks_unavailable_parts() {
    let ctx = TestContext::new();
    ctx.ledger
        .fail(trondeck::adapter::LedgerCall::GetAccount)
        .await;
    ctx.session.import_from_phrase(PHRASE).await.unwrap();

    let text = render_snapshot(&ctx.session.snapshot().await);

    assert!(text.contains("balance    unavailable"));
}

#[test]
fn test_block_rendering() {
    let text = render_block(&block(1234));

    assert!(text.starts_with("#1234 "));
    assert!(text.contains(&other_address()));
    assert!(text.contains("txs      3"));
}

#[test]
fn test_pending_transaction_rendering() {
    let transaction = Transaction {
        hash: "beef".to_string(),
        block_number: None,
        block_timestamp: None,
        result: None,
        energy_used: 0,
        bandwidth_used: 0,
    };

    let text = render_search(&SearchResult::Transaction(transaction));

    assert!(text.contains("block    pending"));
    assert!(text.contains("result   -"));
}

#[test]
fn test_sync_rendering() {
    assert_eq!(
        render_sync(&SyncReport::connection_error()),
        "Connection Error"
    );

    let report = SyncReport {
        state: SyncState::Syncing,
        head_number: Some(77),
        age: Some(chrono::TimeDelta::seconds(120)),
    };
    assert_eq!(render_sync(&report), "Syncing... (head #77, 120s old)");
}

#[test]
fn test_phase_rendering() {
    assert_eq!(render_phase(&StakePhase::Draft), "draft");
    assert_eq!(
        render_phase(&StakePhase::Rejected {
            stake: validated_stake(),
            tx_id: "ab".to_string(),
            reason: "no funds".to_string(),
        }),
        "rejected ab: no funds"
    );
}

#[test]
fn test_network_rendering() {
    let overview = NetworkOverview {
        node: NodeInfo {
            active_connections: 4,
            passive_connections: 2,
            total_flow: 0,
            begin_sync_num: 10,
        },
        parameters: vec![ChainParameter {
            key: "getEnergyFee".to_string(),
            value: Some(420),
        }],
    };

    let text = render_network(&overview);

    assert!(text.contains("4 active / 2 passive"));
    assert!(text.contains("getEnergyFee"));
    assert!(text.contains("420"));
}
