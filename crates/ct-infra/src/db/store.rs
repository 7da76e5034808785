use std::sync::Arc;

use async_trait::async_trait;
use ct_core::ports::{HistoryError, HistoryStorePort};
use ct_core::translation::TranslationResult;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};

use crate::db::pool::init_db_pool;
use crate::db::repositories::HistoryRepository;

/// SQLite-backed history store.
///
/// The connection pool only exists between `initialize` and `close`.
/// All diesel calls run on the blocking pool; append, prune and clear
/// additionally hold `write_lock` so writes never interleave.
pub struct SqliteHistoryStore {
    database_url: String,
    repo: RwLock<Option<Arc<HistoryRepository>>>,
    write_lock: Mutex<()>,
}

impl SqliteHistoryStore {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            repo: RwLock::new(None),
            write_lock: Mutex::new(()),
        }
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    async fn repo(&self) -> Result<Arc<HistoryRepository>, HistoryError> {
        self.repo
            .read()
            .await
            .clone()
            .ok_or(HistoryError::NotInitialized)
    }

    async fn blocking<T, F>(
        repo: Arc<HistoryRepository>,
        f: F,
        error: fn(String) -> HistoryError,
    ) -> Result<T, HistoryError>
    where
        F: FnOnce(&HistoryRepository) -> anyhow::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        tokio::task::spawn_blocking(move || f(&repo))
            .await
            .map_err(|e| error(e.to_string()))?
            .map_err(|e| error(format!("{e:#}")))
    }
}

#[async_trait]
impl HistoryStorePort for SqliteHistoryStore {
    async fn initialize(&self) -> Result<(), HistoryError> {
        let mut slot = self.repo.write().await;
        if slot.is_some() {
            return Ok(());
        }

        let url = self.database_url.clone();
        let pool = tokio::task::spawn_blocking(move || init_db_pool(&url))
            .await
            .map_err(|e| HistoryError::Open(e.to_string()))?
            .map_err(|e| HistoryError::Open(format!("{e:#}")))?;

        *slot = Some(Arc::new(HistoryRepository::new(pool)));
        info!(database_url = %self.database_url, "History store initialized");
        Ok(())
    }

    async fn close(&self) -> Result<(), HistoryError> {
        let _guard = self.write_lock.lock().await;
        if self.repo.write().await.take().is_some() {
            info!(database_url = %self.database_url, "History store closed");
        }
        Ok(())
    }

    async fn append(&self, result: &TranslationResult) -> Result<(), HistoryError> {
        let _guard = self.write_lock.lock().await;
        let repo = self.repo().await?;
        let result = result.clone();
        let id = result.id.clone();

        Self::blocking(repo, move |repo| repo.insert(&result), HistoryError::Write).await?;
        debug!(id = %id, "History entry appended");
        Ok(())
    }

    async fn list(&self) -> Result<Vec<TranslationResult>, HistoryError> {
        let repo = self.repo().await?;
        Self::blocking(repo, |repo| repo.list_newest_first(), HistoryError::Read).await
    }

    async fn count(&self) -> Result<u64, HistoryError> {
        let repo = self.repo().await?;
        Self::blocking(repo, |repo| repo.count(), HistoryError::Read).await
    }

    async fn clear(&self) -> Result<(), HistoryError> {
        let _guard = self.write_lock.lock().await;
        let repo = self.repo().await?;

        let removed = Self::blocking(repo, |repo| repo.delete_all(), HistoryError::Write).await?;
        info!(removed, "History cleared");
        Ok(())
    }

    async fn prune(&self, keep: i64) -> Result<u64, HistoryError> {
        if keep <= 0 {
            return Ok(0);
        }
        let _guard = self.write_lock.lock().await;
        let repo = self.repo().await?;

        let removed =
            Self::blocking(repo, move |repo| repo.delete_beyond(keep), HistoryError::Write).await?;
        if removed > 0 {
            debug!(removed, keep, "History pruned");
        }
        Ok(removed)
    }
}
