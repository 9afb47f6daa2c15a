use bip39::{Language, Mnemonic};
use hmac::{Hmac, Mac};
use rand::RngCore;
use secp256k1::{PublicKey, Scalar, Secp256k1, SecretKey};
use sha2::Sha512;
use tiny_keccak::{Hasher, Keccak};

use crate::{
    domain::{KeyError, KeyMaterial, PrivateKey, address},
    port::KeyDeriver,
};

type HmacSha512 = Hmac<Sha512>;

const HARDENED: u32 = 0x8000_0000;

/// m/44'/195'/0'/0/0, the first account of coin type 195.
pub const DERIVATION_PATH: [u32; 5] = [44 | HARDENED, 195 | HARDENED, HARDENED, 0, 0];

/// BIP39 phrase, empty passphrase seed, BIP32 secp256k1 derivation along
/// [`DERIVATION_PATH`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Bip39KeyDeriver;

impl Bip39KeyDeriver {
    pub fn new() -> Self {
        Self
    }

    /// A fresh 12-word English phrase from 128 bits of OS entropy.
    pub fn generate_phrase(&self) -> Result<String, KeyError> {
        let mut entropy = [0u8; 16];
        rand::rng().fill_bytes(&mut entropy);
        let mnemonic = Mnemonic::from_entropy_in(Language::English, &entropy)
            .map_err(|e| KeyError::Derivation(e.to_string()))?;
        Ok(mnemonic.to_string())
    }
}

impl KeyDeriver for Bip39KeyDeriver {
    fn phrase_to_key(&self, phrase: &str) -> Result<KeyMaterial, KeyError> {
        let normalized = phrase
            .split_whitespace()
            .map(str::to_lowercase)
            .collect::<Vec<_>>()
            .join(" ");
        let mnemonic = Mnemonic::parse_in_normalized(Language::English, &normalized)
            .map_err(|e| KeyError::InvalidPhrase(e.to_string()))?;

        let seed = mnemonic.to_seed_normalized("");
        let secret = derive(&seed, &DERIVATION_PATH)?;

        let private_key = PrivateKey::from_bytes(secret.secret_bytes());
        Ok(KeyMaterial {
            address: address_of(&secret),
            private_key,
        })
    }
}

fn hmac_sha512(key: &[u8], data: &[u8]) -> Result<[u8; 64], KeyError> {
    let mut mac =
        HmacSha512::new_from_slice(key).map_err(|e| KeyError::Derivation(e.to_string()))?;
    mac.update(data);
    let mut out = [0u8; 64];
    out.copy_from_slice(&mac.finalize().into_bytes());
    Ok(out)
}

fn split(output: [u8; 64]) -> ([u8; 32], [u8; 32]) {
    let mut left = [0u8; 32];
    let mut right = [0u8; 32];
    left.copy_from_slice(&output[..32]);
    right.copy_from_slice(&output[32..]);
    (left, right)
}

fn derive(seed: &[u8], path: &[u32]) -> Result<SecretKey, KeyError> {
    let secp = Secp256k1::new();
    let (key, mut chain_code) = split(hmac_sha512(b"Bitcoin seed", seed)?);
    let mut secret =
        SecretKey::from_slice(&key).map_err(|e| KeyError::Derivation(e.to_string()))?;

    for &index in path {
        let mut data = Vec::with_capacity(37);
        if index & HARDENED != 0 {
            data.push(0);
            data.extend_from_slice(&secret.secret_bytes());
        } else {
            data.extend_from_slice(&PublicKey::from_secret_key(&secp, &secret).serialize());
        }
        data.extend_from_slice(&index.to_be_bytes());

        let (tweak, next_chain_code) = split(hmac_sha512(&chain_code, &data)?);
        let tweak =
            Scalar::from_be_bytes(tweak).map_err(|e| KeyError::Derivation(e.to_string()))?;
        secret = secret
            .add_tweak(&tweak)
            .map_err(|e| KeyError::Derivation(e.to_string()))?;
        chain_code = next_chain_code;
    }

    Ok(secret)
}

/// Base58check of `0x41 || keccak256(uncompressed public key)[12..]`.
pub fn address_of(secret: &SecretKey) -> String {
    let secp = Secp256k1::signing_only();
    let public = PublicKey::from_secret_key(&secp, secret).serialize_uncompressed();

    let mut hash = [0u8; 32];
    let mut keccak = Keccak::v256();
    keccak.update(&public[1..]);
    keccak.finalize(&mut hash);

    let mut payload = Vec::with_capacity(21);
    payload.push(address::ADDRESS_PREFIX);
    payload.extend_from_slice(&hash[12..]);
    address::encode_base58(&payload)
}
