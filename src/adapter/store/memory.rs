use crate::{domain::StoreError, port::WalletStore};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory wallet store; the record lives as long as the process.
pub struct InMemoryWalletStore {
    record: Arc<RwLock<Option<Vec<u8>>>>,
}

impl InMemoryWalletStore {
    pub fn new() -> Self {
        Self {
            record: Arc::new(RwLock::new(None)),
        }
    }

    /// Overwrite the record with arbitrary bytes, bypassing the session.
    pub async fn tamper(&self, bytes: &[u8]) {
        *self.record.write().await = Some(bytes.to_vec());
    }
}

impl Default for InMemoryWalletStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WalletStore for InMemoryWalletStore {
    async fn put(&self, record: &[u8]) -> Result<(), StoreError> {
        *self.record.write().await = Some(record.to_vec());
        Ok(())
    }

    async fn get(&self) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.record.read().await.clone())
    }

    async fn delete(&self) -> Result<(), StoreError> {
        *self.record.write().await = None;
        Ok(())
    }
}
