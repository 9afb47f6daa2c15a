use crate::adapter::{
    Bip39KeyDeriver, EncryptedFileStore, HttpLedgerClient, InMemoryWalletStore, TracingCallback,
};
use crate::config::DashboardConfig;
use crate::domain::DashboardError;
use crate::port::{LedgerClient, WalletStore};
use crate::service::{QueryRouter, WalletSession};
use std::sync::Arc;

/// Everything a front end needs, wired against one full node.
pub struct Dashboard {
    pub config: DashboardConfig,
    pub ledger: Arc<dyn LedgerClient>,
    pub keys: Arc<Bip39KeyDeriver>,
    pub session: Arc<WalletSession>,
    pub router: QueryRouter,
}

/// Setup the dashboard
///
/// This creates all the infrastructure:
/// - HttpLedgerClient (the configured full node)
/// - EncryptedFileStore when a passphrase is configured, otherwise an
///   in-memory store that forgets the wallet on exit
/// - WalletSession with a TracingCallback
/// - QueryRouter sharing the same ledger client
pub fn boot(config: DashboardConfig) -> Result<Dashboard, DashboardError> {
    let ledger: Arc<dyn LedgerClient> = Arc::new(HttpLedgerClient::new(
        &config.full_node,
        config.request_timeout,
    )?);
    let keys = Arc::new(Bip39KeyDeriver::new());

    let store: Arc<dyn WalletStore> = match &config.store_passphrase {
        Some(passphrase) => Arc::new(EncryptedFileStore::new(
            config.store_path.clone(),
            passphrase.clone(),
        )),
        None => {
            tracing::warn!("no store passphrase configured, wallet will not be persisted");
            Arc::new(InMemoryWalletStore::new())
        }
    };

    let session = Arc::new(
        WalletSession::new(ledger.clone(), keys.clone(), store)
            .with_callback(Arc::new(TracingCallback)),
    );
    let router = QueryRouter::new(ledger.clone());

    tracing::info!(node = %config.full_node, "dashboard initialized");

    Ok(Dashboard {
        config,
        ledger,
        keys,
        session,
        router,
    })
}
