use crate::domain::{LedgerError, PrivateKey, SignedTransaction, UnsignedTransaction};
use secp256k1::{Message, Secp256k1, SecretKey};
use serde_json::Value;
use sha2::{Digest, Sha256};

/// Sign a node-built transaction locally.
///
/// The transaction id is the SHA-256 of `raw_data_hex`; when the node sent
/// `raw_data_hex` the id is recomputed and checked before signing so that a
/// tampered body is never signed. The signature is the 65-byte recoverable
/// form `r || s || v` with `v = recovery id + 27`.
pub fn sign_transaction(
    transaction: UnsignedTransaction,
    key: &PrivateKey,
) -> Result<SignedTransaction, LedgerError> {
    let digest = hex::decode(&transaction.tx_id)
        .map_err(|e| LedgerError::Signing(format!("txID is not hex: {e}")))?;
    if digest.len() != 32 {
        return Err(LedgerError::Signing(format!(
            "txID must be 32 bytes, got {}",
            digest.len()
        )));
    }

    if let Some(raw_hex) = transaction.body.get("raw_data_hex").and_then(Value::as_str) {
        let raw = hex::decode(raw_hex)
            .map_err(|e| LedgerError::Signing(format!("raw_data_hex is not hex: {e}")))?;
        if Sha256::digest(&raw).as_slice() != digest.as_slice() {
            return Err(LedgerError::Signing(
                "txID does not match raw_data_hex".to_string(),
            ));
        }
    }

    let secp = Secp256k1::signing_only();
    let secret = SecretKey::from_slice(key.as_bytes())
        .map_err(|e| LedgerError::Signing(format!("invalid private key: {e}")))?;
    let message = Message::from_digest_slice(&digest)
        .map_err(|e| LedgerError::Signing(e.to_string()))?;

    let (recovery_id, compact) = secp
        .sign_ecdsa_recoverable(&message, &secret)
        .serialize_compact();
    let mut signature = compact.to_vec();
    signature.push(recovery_id.to_i32() as u8 + 27);

    let mut body = transaction.body;
    match body.as_object_mut() {
        Some(object) => {
            object.insert(
                "signature".to_string(),
                Value::Array(vec![Value::String(hex::encode(signature))]),
            );
        }
        None => {
            return Err(LedgerError::Signing(
                "transaction body is not an object".to_string(),
            ));
        }
    }

    Ok(SignedTransaction {
        tx_id: transaction.tx_id,
        body,
    })
}
