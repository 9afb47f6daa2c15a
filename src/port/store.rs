use crate::domain::StoreError;
use async_trait::async_trait;

/// Durable home of the single wallet record.
///
/// The bytes are opaque to the caller; encryption at rest is the
/// implementation's job. A record that cannot be decrypted is reported as
/// [`StoreError::Corrupt`].
#[async_trait]
pub trait WalletStore: Send + Sync {
    async fn put(&self, record: &[u8]) -> Result<(), StoreError>;

    async fn get(&self) -> Result<Option<Vec<u8>>, StoreError>;

    /// Deleting an absent record is not an error.
    async fn delete(&self) -> Result<(), StoreError>;
}
