use crate::context::PHRASE;
use secp256k1::{
    Message, PublicKey, Secp256k1, SecretKey,
    ecdsa::{RecoverableSignature, RecoveryId},
};
use serde_json::json;
use sha2::{Digest, Sha256};
use trondeck::adapter::{Bip39KeyDeriver, sign_transaction};
use trondeck::domain::*;
use trondeck::port::KeyDeriver;

fn unsigned(raw: &[u8]) -> UnsignedTransaction {
    let tx_id = hex::encode(Sha256::digest(raw));
    UnsignedTransaction {
        tx_id: tx_id.clone(),
        body: json!({ "txID": tx_id, "raw_data": {}, "raw_data_hex": hex::encode(raw) }),
    }
}

fn key() -> PrivateKey {
    Bip39KeyDeriver::new().phrase_to_key(PHRASE).unwrap().private_key
}

#[test]
fn test_signature_recovers_signer() {
    let transaction = unsigned(b"freeze 10 TRX");
    let digest = hex::decode(&transaction.tx_id).unwrap();

    let signed = sign_transaction(transaction, &key()).unwrap();

    let signature_hex = signed.body["signature"][0].as_str().unwrap();
    let signature = hex::decode(signature_hex).unwrap();
    assert_eq!(signature.len(), 65);
    assert!(signature[64] == 27 || signature[64] == 28);

    let secp = Secp256k1::new();
    let recovery_id = RecoveryId::from_i32(signature[64] as i32 - 27).unwrap();
    let recoverable = RecoverableSignature::from_compact(&signature[..64], recovery_id).unwrap();
    let message = Message::from_digest_slice(&digest).unwrap();
    let recovered = secp.recover_ecdsa(&message, &recoverable).unwrap();

    let secret = SecretKey::from_slice(key().as_bytes()).unwrap();
    assert_eq!(recovered, PublicKey::from_secret_key(&secp, &secret));
}

#[test]
fn test_signing_keeps_body() {
    let transaction = unsigned(b"unfreeze");
    let tx_id = transaction.tx_id.clone();

    let signed = sign_transaction(transaction, &key()).unwrap();

    assert_eq!(signed.tx_id, tx_id);
    assert_eq!(signed.body["txID"], json!(tx_id));
    assert!(signed.body.get("raw_data").is_some());
}

#[test]
fn test_tampered_body_not_signed() {
    let mut transaction = unsigned(b"freeze 10 TRX");
    transaction.body["raw_data_hex"] = json!(hex::encode(b"freeze 99999 TRX"));

    let result = sign_transaction(transaction, &key());

    assert!(matches!(result, Err(LedgerError::Signing(_))));
}

#[test]
fn test_non_hex_tx_id_fails() {
    let transaction = UnsignedTransaction {
        tx_id: "not-a-hash".to_string(),
        body: json!({}),
    };

    let result = sign_transaction(transaction, &key());

    assert!(matches!(result, Err(LedgerError::Signing(_))));
}

#[test]
fn test_short_tx_id_fails() {
    let transaction = UnsignedTransaction {
        tx_id: "abcd".to_string(),
        body: json!({}),
    };

    assert!(matches!(
        sign_transaction(transaction, &key()),
        Err(LedgerError::Signing(_))
    ));
}

#[test]
fn test_body_without_raw_hex_still_signs() {
    let tx_id = hex::encode(Sha256::digest(b"legacy node"));
    let transaction = UnsignedTransaction {
        tx_id: tx_id.clone(),
        body: json!({ "txID": tx_id }),
    };

    let signed = sign_transaction(transaction, &key()).unwrap();

    assert_eq!(signed.body["signature"].as_array().map(Vec::len), Some(1));
}
