use crate::{domain::StoreError, port::WalletStore};
use argon2::Argon2;
use async_trait::async_trait;
use chacha20poly1305::aead::{Aead, KeyInit};
use chacha20poly1305::{ChaCha20Poly1305, Key, Nonce};
use rand::RngCore;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

const MAGIC: &[u8; 4] = b"TDW1";
const SALT_LEN: usize = 16;
const NONCE_LEN: usize = 12;
const HEADER_LEN: usize = MAGIC.len() + SALT_LEN + NONCE_LEN;

/// Wallet record encrypted at rest in a single file.
///
/// Layout: `TDW1 | salt (16) | nonce (12) | ChaCha20-Poly1305 ciphertext`.
/// The key is stretched from the passphrase with Argon2id and a fresh salt on
/// every write.
pub struct EncryptedFileStore {
    path: PathBuf,
    passphrase: Arc<str>,
}

impl EncryptedFileStore {
    pub fn new(path: impl Into<PathBuf>, passphrase: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            passphrase: Arc::from(passphrase.into()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Runs Argon2 off the async workers; it takes long enough to stall them.
    async fn stretched<T, F>(&self, work: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&str) -> Result<T, StoreError> + Send + 'static,
    {
        let passphrase = Arc::clone(&self.passphrase);
        tokio::task::spawn_blocking(move || work(&passphrase))
            .await
            .map_err(|e| StoreError::Io(format!("key derivation task failed: {e}")))?
    }
}

fn derive_key(passphrase: &str, salt: &[u8]) -> Result<[u8; 32], StoreError> {
    let mut key = [0u8; 32];
    Argon2::default()
        .hash_password_into(passphrase.as_bytes(), salt, &mut key)
        .map_err(|e| StoreError::Io(format!("key derivation failed: {e}")))?;
    Ok(key)
}

fn seal(passphrase: &str, record: &[u8]) -> Result<Vec<u8>, StoreError> {
    let mut salt = [0u8; SALT_LEN];
    let mut nonce = [0u8; NONCE_LEN];
    let mut rng = rand::rng();
    rng.fill_bytes(&mut salt);
    rng.fill_bytes(&mut nonce);

    let key = derive_key(passphrase, &salt)?;
    let cipher = ChaCha20Poly1305::new(Key::from_slice(&key));
    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&nonce), record)
        .map_err(|e| StoreError::Io(format!("encryption failed: {e}")))?;

    let mut sealed = Vec::with_capacity(HEADER_LEN + ciphertext.len());
    sealed.extend_from_slice(MAGIC);
    sealed.extend_from_slice(&salt);
    sealed.extend_from_slice(&nonce);
    sealed.extend_from_slice(&ciphertext);
    Ok(sealed)
}

fn open(passphrase: &str, sealed: &[u8]) -> Result<Vec<u8>, StoreError> {
    if sealed.len() < HEADER_LEN || &sealed[..MAGIC.len()] != MAGIC {
        return Err(StoreError::Corrupt("unrecognised file header".to_string()));
    }
    let salt = &sealed[MAGIC.len()..MAGIC.len() + SALT_LEN];
    let nonce = &sealed[MAGIC.len() + SALT_LEN..HEADER_LEN];

    let key = derive_key(passphrase, salt)?;
    let cipher = ChaCha20Poly1305::new(Key::from_slice(&key));
    cipher
        .decrypt(Nonce::from_slice(nonce), &sealed[HEADER_LEN..])
        .map_err(|_| StoreError::Corrupt("decryption failed".to_string()))
}

#[async_trait]
impl WalletStore for EncryptedFileStore {
    async fn put(&self, record: &[u8]) -> Result<(), StoreError> {
        let record = record.to_vec();
        let sealed = self
            .stretched(move |passphrase| seal(passphrase, &record))
            .await?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::Io(e.to_string()))?;
        }

        // write-then-rename so a crash never leaves half a record
        let staging = self.path.with_extension("tmp");
        tokio::fs::write(&staging, &sealed)
            .await
            .map_err(|e| StoreError::Io(e.to_string()))?;
        tokio::fs::rename(&staging, &self.path)
            .await
            .map_err(|e| StoreError::Io(e.to_string()))?;

        tracing::debug!(path = %self.path.display(), "wallet record written");
        Ok(())
    }

    async fn get(&self) -> Result<Option<Vec<u8>>, StoreError> {
        let sealed = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::Io(e.to_string())),
        };
        self.stretched(move |passphrase| open(passphrase, &sealed))
            .await
            .map(Some)
    }

    async fn delete(&self) -> Result<(), StoreError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Io(e.to_string())),
        }
    }
}
