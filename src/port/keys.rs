use crate::domain::{KeyError, KeyMaterial};

/// Turns a recovery phrase into key material.
///
/// Implementations must use a standard mnemonic and derivation scheme.
pub trait KeyDeriver: Send + Sync {
    fn phrase_to_key(&self, phrase: &str) -> Result<KeyMaterial, KeyError>;
}
