use serde_json::json;
use trondeck::adapter::dto::*;
use trondeck::domain::*;

const OWNER: &str = "TNPeeaaFB7K9cmo4uQpcU32zGK8G1NYqeL";

fn account_from(value: serde_json::Value) -> Account {
    serde_json::from_value::<AccountDto>(value)
        .expect("account JSON should decode")
        .into_account(OWNER)
}

#[test]
fn test_account_collects_every_position_kind() {
    let account = account_from(json!({
        "balance": 5_000_000,
        "frozen": [{ "frozen_balance": 2_000_000, "expire_time": 1_700_000_000_000_i64 }],
        "account_resource": {
            "frozen_balance_for_energy": { "frozen_balance": 3_000_000, "expire_time": 0 }
        },
        "frozenV2": [
            { "amount": 4_000_000 },
            { "type": "ENERGY", "amount": 6_000_000 },
            { "type": "TRON_POWER", "amount": 9_000_000 },
            { "type": "ENERGY" }
        ],
        "create_time": 1_600_000_000_000_i64,
        "type": "Normal"
    }));

    assert_eq!(account.balance, Sun::new(5_000_000));
    assert_eq!(account.account_type.as_deref(), Some("Normal"));
    assert!(account.create_time.is_some());

    let positions: Vec<(ResourceType, u64)> = account
        .frozen
        .iter()
        .map(|f| (f.resource, f.amount.value()))
        .collect();
    assert_eq!(
        positions,
        vec![
            (ResourceType::Bandwidth, 2_000_000),
            (ResourceType::Energy, 3_000_000),
            (ResourceType::Bandwidth, 4_000_000),
            (ResourceType::Energy, 6_000_000),
        ]
    );

    let legacy: Vec<bool> = account.frozen.iter().map(|f| f.legacy).collect();
    assert_eq!(legacy, vec![true, true, false, false]);
    assert!(!account.frozen[0].is_releasable());
    assert!(account.frozen[2].is_releasable());

    assert!(account.frozen[0].expire_at.is_some());
    assert!(account.frozen[1].expire_at.is_none(), "Zero expiry means none");
    assert!(account.frozen.iter().all(|f| f.receiver == OWNER));
}

#[test]
fn test_account_tokens_from_asset_v2() {
    let account = account_from(json!({
        "assetV2": [{ "key": "1002000", "value": 150 }, { "key": "1000001" }]
    }));

    assert_eq!(
        account.tokens,
        vec![("1002000".to_string(), 150), ("1000001".to_string(), 0)]
    );
    assert_eq!(account.balance, Sun::ZERO);
}

#[test]
fn test_resources_default_missing_counters() {
    let dto: AccountResourcesDto =
        serde_json::from_value(json!({ "EnergyLimit": 5000, "NetUsed": 12, "freeNetLimit": 600 }))
            .expect("resources should decode");

    let snapshot = ResourceSnapshot::from(dto);

    assert_eq!(snapshot.energy_used, 0);
    assert_eq!(snapshot.energy_limit, 5000);
    assert_eq!(snapshot.bandwidth_used, 12);
    assert_eq!(snapshot.bandwidth_limit, 0);
}

#[test]
fn test_block_witness_shown_as_base58() {
    let dto: BlockDto = serde_json::from_value(json!({
        "blockID": "00000000000003e8aa",
        "block_header": { "raw_data": {
            "number": 1000,
            "timestamp": 1_700_000_000_000_i64,
            "parentHash": "00000000000003e7bb",
            "witness_address": "418840E6C55B9ADA326D211D818C34A994AECED808"
        }},
        "transactions": [{}, {}]
    }))
    .expect("block should decode");

    let block = Block::try_from(dto).expect("block should map");

    assert_eq!(block.number, 1000);
    assert_eq!(block.witness, OWNER);
    assert_eq!(block.tx_count, 2);
    assert_eq!(block.parent_hash, "00000000000003e7bb");
    assert_eq!(block.timestamp.timestamp(), 1_700_000_000);
}

#[test]
fn test_transaction_merges_receipt() {
    let dto: TransactionDto = serde_json::from_value(json!({
        "txID": "ab12",
        "ret": [{ "contractRet": "SUCCESS" }]
    }))
    .expect("transaction should decode");
    let info: TransactionInfoDto = serde_json::from_value(json!({
        "blockNumber": 77,
        "blockTimeStamp": 1_700_000_000_000_i64,
        "receipt": { "energy_usage_total": 1234, "net_usage": 345 }
    }))
    .expect("info should decode");

    let tx = dto.into_transaction(Some(info));

    assert_eq!(tx.hash, "ab12");
    assert_eq!(tx.block_number, Some(77));
    assert_eq!(tx.result.as_deref(), Some("SUCCESS"));
    assert_eq!(tx.energy_used, 1234);
    assert_eq!(tx.bandwidth_used, 345);
}

#[test]
fn test_pending_transaction_has_no_block() {
    let dto: TransactionDto =
        serde_json::from_value(json!({ "txID": "ab12" })).expect("transaction should decode");

    let tx = dto.into_transaction(None);

    assert_eq!(tx.block_number, None);
    assert_eq!(tx.block_timestamp, None);
    assert_eq!(tx.result, None);
    assert_eq!(tx.energy_used, 0);
}

#[test]
fn test_unsigned_from_value() {
    let ok = unsigned_from_value(json!({ "txID": "ff", "raw_data": {} }))
        .expect("should parse built transaction");
    assert_eq!(ok.tx_id, "ff");

    assert_eq!(
        unsigned_from_value(json!({ "Error": "balance is not sufficient" })),
        Err(LedgerError::Rpc("balance is not sufficient".to_string()))
    );
    assert!(matches!(
        unsigned_from_value(json!({ "raw_data": {} })),
        Err(LedgerError::Decode(_))
    ));
}

#[test]
fn test_broadcast_message_is_hex_decoded() {
    let dto: BroadcastDto = serde_json::from_value(json!({
        "code": "CONTRACT_VALIDATE_ERROR",
        "message": hex::encode("frozenBalance must be more than 1TRX")
    }))
    .expect("broadcast reply should decode");

    let receipt = dto.into_receipt("cafe");

    assert!(!receipt.accepted);
    assert_eq!(receipt.tx_id, "cafe");
    assert_eq!(receipt.code.as_deref(), Some("CONTRACT_VALIDATE_ERROR"));
    assert_eq!(
        receipt.message.as_deref(),
        Some("frozenBalance must be more than 1TRX")
    );
}

#[test]
fn test_decode_message_keeps_plain_text() {
    assert_eq!(decode_message("plain words"), "plain words");
}

#[test]
fn test_empty_object_detection() {
    assert!(is_empty_object(&json!({})));
    assert!(!is_empty_object(&json!({ "balance": 1 })));
    assert!(!is_empty_object(&json!([])));
}

#[test]
fn test_chain_parameters_keep_missing_values() {
    let dto: ChainParametersDto = serde_json::from_value(json!({
        "chainParameter": [
            { "key": "getEnergyFee", "value": 420 },
            { "key": "getAllowTvmCompatibleEvm" }
        ]
    }))
    .expect("parameters should decode");

    let parameters: Vec<ChainParameter> = dto.into();

    assert_eq!(parameters.len(), 2);
    assert_eq!(parameters[0].value, Some(420));
    assert_eq!(parameters[1].value, None);
}
