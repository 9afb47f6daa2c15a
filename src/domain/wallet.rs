use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Formatter};

/// Raw secp256k1 secret key bytes.
///
/// Serialized as hex inside the (encrypted) wallet record. `Debug` never
/// prints the key.
#[derive(Clone, PartialEq, Eq)]
pub struct PrivateKey([u8; 32]);

impl PrivateKey {
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn from_hex(value: &str) -> Option<Self> {
        let bytes = hex::decode(value).ok()?;
        let bytes: [u8; 32] = bytes.try_into().ok()?;
        Some(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl Debug for PrivateKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("PrivateKey(<redacted>)")
    }
}

impl Serialize for PrivateKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for PrivateKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        PrivateKey::from_hex(&value)
            .ok_or_else(|| serde::de::Error::custom("private key must be 32 hex-encoded bytes"))
    }
}

/// Output of the key-derivation collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMaterial {
    pub address: String,
    pub private_key: PrivateKey,
}

/// The single active wallet of a session.
///
/// This is also the record that goes, serialized, into the wallet store.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallet {
    pub address: String,
    pub private_key: PrivateKey,
    pub recovery_phrase: String,
}

impl Wallet {
    pub fn new(material: KeyMaterial, recovery_phrase: impl Into<String>) -> Self {
        Self {
            address: material.address,
            private_key: material.private_key,
            recovery_phrase: recovery_phrase.into(),
        }
    }

    pub fn to_record(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    pub fn from_record(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}

impl Debug for Wallet {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wallet")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}
