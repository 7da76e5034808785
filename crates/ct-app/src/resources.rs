//! Shared mutable resources: the active provider, the active history store
//! and the published config snapshot.
//!
//! ## Locking / 锁
//!
//! - Each slot sits behind its own `RwLock`. Readers clone the `Arc` and
//!   release the lock before any external call.
//! - Writers hold the write lock only for the swap itself. A replacement is
//!   always constructed (and, for stores, initialized) before the swap, and
//!   the previous instance is closed after it, so a slot is never empty.
//! - Whole reconfigurations are serialized by `reconfigure`.

use std::sync::Arc;

use ct_core::ports::{
    HistoryError, HistoryStoreFactoryPort, HistoryStorePort, ProviderError, ProviderFactoryPort,
    TranslationProviderPort,
};
use ct_core::settings::model::{PersistenceConfig, PersistenceTarget, ProviderConfig, Settings};
use tokio::sync::{Mutex, MutexGuard, RwLock};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Swap {
    Unchanged,
    Swapped,
}

struct ActiveProvider {
    instance: Arc<dyn TranslationProviderPort>,
    config: ProviderConfig,
}

struct ActiveStore {
    instance: Arc<dyn HistoryStorePort>,
    target: PersistenceTarget,
}

pub struct ActiveResources {
    settings: RwLock<Arc<Settings>>,
    provider: RwLock<ActiveProvider>,
    store: RwLock<ActiveStore>,
    reconfigure: Mutex<()>,
}

impl ActiveResources {
    /// `provider` must have been built from `settings.provider` and `store`
    /// from `settings.database`; the store must already be initialized.
    pub fn new(
        settings: Settings,
        provider: Arc<dyn TranslationProviderPort>,
        store: Arc<dyn HistoryStorePort>,
    ) -> Self {
        Self {
            provider: RwLock::new(ActiveProvider {
                instance: provider,
                config: settings.provider.clone(),
            }),
            store: RwLock::new(ActiveStore {
                instance: store,
                target: settings.database.target(),
            }),
            settings: RwLock::new(Arc::new(settings)),
            reconfigure: Mutex::new(()),
        }
    }

    pub async fn settings(&self) -> Arc<Settings> {
        self.settings.read().await.clone()
    }

    pub async fn provider(&self) -> Arc<dyn TranslationProviderPort> {
        self.provider.read().await.instance.clone()
    }

    pub async fn store(&self) -> Arc<dyn HistoryStorePort> {
        self.store.read().await.instance.clone()
    }

    /// Held for the duration of one config update.
    pub async fn reconfigure_guard(&self) -> MutexGuard<'_, ()> {
        self.reconfigure.lock().await
    }

    /// Publish `settings` and return the snapshot it replaced.
    pub async fn publish_settings(&self, settings: Arc<Settings>) -> Arc<Settings> {
        std::mem::replace(&mut *self.settings.write().await, settings)
    }

    /// Replace the provider if `config` differs from the active one's.
    ///
    /// On construction failure the active provider stays in place.
    pub async fn swap_provider(
        &self,
        factory: &dyn ProviderFactoryPort,
        config: &ProviderConfig,
    ) -> Result<Swap, ProviderError> {
        if self.provider.read().await.config == *config {
            return Ok(Swap::Unchanged);
        }

        let instance = factory.build(config)?;
        let name = instance.name().to_string();
        let previous = std::mem::replace(
            &mut *self.provider.write().await,
            ActiveProvider {
                instance,
                config: config.clone(),
            },
        );

        if let Err(err) = previous.instance.close().await {
            warn!(provider = previous.instance.name(), error = %err, "Failed to close previous provider");
        }
        info!(from = previous.instance.name(), to = %name, "Translation provider swapped");
        Ok(Swap::Swapped)
    }

    /// Re-point history at a new target if `config` names a different one.
    ///
    /// The new store is initialized before the swap. On failure the active
    /// store stays in place and keeps serving.
    pub async fn swap_store(
        &self,
        factory: &dyn HistoryStoreFactoryPort,
        config: &PersistenceConfig,
    ) -> Result<Swap, HistoryError> {
        let target = config.target();
        if self.store.read().await.target == target {
            return Ok(Swap::Unchanged);
        }

        let instance = factory.build(config)?;
        instance.initialize().await?;

        let previous = std::mem::replace(
            &mut *self.store.write().await,
            ActiveStore {
                instance,
                target: target.clone(),
            },
        );

        if let Err(err) = previous.instance.close().await {
            warn!(target = %previous.target, error = %err, "Failed to close previous history store");
        }
        info!(from = %previous.target, to = %target, "History store swapped");
        Ok(Swap::Swapped)
    }

    /// Close the active provider and store. Used on shutdown.
    pub async fn close(&self) {
        let provider = self.provider().await;
        if let Err(err) = provider.close().await {
            warn!(provider = provider.name(), error = %err, "Failed to close provider");
        }
        let store = self.store().await;
        if let Err(err) = store.close().await {
            warn!(error = %err, "Failed to close history store");
        }
    }
}
