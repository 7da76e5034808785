use async_trait::async_trait;

use super::errors::HistoryError;
use crate::translation::TranslationResult;

/// Append-only, time-ordered translation history.
///
/// `initialize` and `close` bracket an instance's lifetime; every other
/// operation fails with `HistoryError::NotInitialized` outside that window.
/// Mutations are serialized by the implementation.
#[async_trait]
pub trait HistoryStorePort: Send + Sync {
    async fn initialize(&self) -> Result<(), HistoryError>;

    /// Idempotent.
    async fn close(&self) -> Result<(), HistoryError>;

    async fn append(&self, result: &TranslationResult) -> Result<(), HistoryError>;

    /// Newest first; equal timestamps in reverse insertion order.
    async fn list(&self) -> Result<Vec<TranslationResult>, HistoryError>;

    async fn count(&self) -> Result<u64, HistoryError>;

    async fn clear(&self) -> Result<(), HistoryError>;

    /// Remove the oldest entries beyond `keep`. No-op when `keep <= 0`.
    /// Returns the number of removed entries.
    async fn prune(&self, keep: i64) -> Result<u64, HistoryError>;
}
